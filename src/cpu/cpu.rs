use log::{debug};

use super::bus_trait::{BusTrait};
use super::disasm::{update_after_write, update_mnemonics};
use super::flags::{ConditionFlags};
use super::memory::{Memory};
use super::mnemonics::{MnemonicTable};
use super::registers::{Registers, REGISTER_COUNT};
use super::super::types::{Byte, Word, Adr};

/// Outcome of one `execute_next_instruction` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionResult {
    Ok,
    Noop,
    Halt,
    BreakPoint,
    EndOfMemory,
}

impl ExecutionResult {
    /// Whether a run loop should keep going after this result.
    pub fn continues(self) -> bool {
        matches!(self, ExecutionResult::Ok | ExecutionResult::Noop)
    }
}

/// The Cesar machine: registers, flags, memory and the mnemonic table kept
/// in sync with memory.
pub struct Cpu {
    pub(super) regs: Registers,
    pub(super) flags: ConditionFlags,
    pub(super) mem: Memory,
    mnemonics: MnemonicTable,
    breakpoint: Option<Adr>,
}

impl Cpu {
    pub fn new() -> Self {
        let mut cpu = Self {
            regs: Registers::new(),
            flags: ConditionFlags::new(),
            mem: Memory::new(),
            mnemonics: MnemonicTable::new(),
            breakpoint: None,
        };
        cpu.update_mnemonics(0, true);
        cpu
    }

    pub fn register(&self, no: usize) -> Word {
        self.regs.r[no % REGISTER_COUNT]
    }

    pub fn set_register(&mut self, no: usize, value: Word) {
        self.regs.r[no % REGISTER_COUNT] = value;
    }

    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    pub fn pc(&self) -> Adr {
        self.regs.pc()
    }

    pub fn set_pc(&mut self, adr: Adr) {
        self.regs.set_pc(adr);
    }

    pub fn flags(&self) -> ConditionFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: ConditionFlags) {
        self.flags = flags;
    }

    pub fn breakpoint(&self) -> Option<Adr> {
        self.breakpoint
    }

    pub fn set_breakpoint(&mut self, adr: Option<Adr>) {
        self.breakpoint = adr;
    }

    pub fn memory(&self) -> &Memory {
        &self.mem
    }

    /// Memory byte without counting an access.
    pub fn memory_byte(&self, adr: Adr) -> Byte {
        self.mem.peek8(adr)
    }

    pub fn original_byte(&self, adr: Adr) -> Byte {
        self.mem.original(adr)
    }

    pub fn read_byte(&mut self, adr: Adr) -> Byte {
        self.mem.read8(adr)
    }

    pub fn read_word(&mut self, adr: Adr) -> Word {
        self.mem.read16(adr)
    }

    pub fn set_byte(&mut self, adr: Adr, value: Byte) {
        self.mem.write8(adr, value);
        self.sync_mnemonics();
    }

    pub fn set_word(&mut self, adr: Adr, value: Word) {
        self.mem.write16(adr, value);
        self.sync_mnemonics();
    }

    /// Bulk load of the whole memory; also becomes the original copy.
    pub fn set_memory(&mut self, bytes: &[Byte]) {
        debug!("loading {} bytes", bytes.len());
        self.mem.load(bytes);
        self.update_mnemonics(0, true);
    }

    /// Copies `bytes[start..=end]` into memory at `target`.
    pub fn set_memory_range(&mut self, bytes: &[Byte], start: Adr, end: Adr, target: Adr) {
        let n = self.mem.load_range(bytes, start, end, target);
        debug!("partial load of {} bytes at {:04x}", n, target);
        self.update_mnemonics(0, true);
    }

    pub fn zero_memory(&mut self, start: Adr, end: Adr) {
        self.mem.zero(start, end);
        self.update_mnemonics(0, true);
    }

    pub fn copy_memory(&mut self, start: Adr, end: Adr, target: Adr) {
        self.mem.copy(start, end, target);
        self.update_mnemonics(0, true);
    }

    pub fn restore_original(&mut self) {
        self.mem.restore_original();
        self.update_mnemonics(0, true);
    }

    pub fn mnemonic(&self, adr: Adr) -> &str {
        self.mnemonics.text(adr)
    }

    pub fn mnemonics(&self) -> &MnemonicTable {
        &self.mnemonics
    }

    /// Regenerates the mnemonic table from `start`. Returns the last row
    /// reached.
    pub fn update_mnemonics(&mut self, start: Adr, force_all: bool) -> Adr {
        if force_all {
            debug!("full disassembly from {:04x}", start);
        }
        update_mnemonics(&mut self.mnemonics, &self.mem, start, force_all)
    }

    pub fn access_count(&self) -> u64 {
        self.mem.access_count()
    }

    pub fn last_changed(&self) -> Option<Adr> {
        self.mem.last_changed()
    }

    pub fn last_mnemonic_row(&self) -> Adr {
        self.mnemonics.last_row()
    }

    /// Registers and flags on one line.
    pub fn state_line(&self) -> String {
        let regs = self.registers().r.iter().enumerate()
            .map(|(i, r)| format!("R{}={:04x}", i, r))
            .collect::<Vec<String>>().join(" ");
        let f = self.flags;
        format!("{}  {}{}{}{}", regs,
                if f.n { 'N' } else { '-' },
                if f.z { 'Z' } else { '-' },
                if f.v { 'V' } else { '-' },
                if f.c { 'C' } else { '-' })
    }

    /// Resynchronizes the mnemonic table after memory writes.
    pub(super) fn sync_mnemonics(&mut self) {
        for adr in self.mem.take_written() {
            update_after_write(&mut self.mnemonics, &self.mem, adr);
        }
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
