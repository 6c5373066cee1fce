//! Operand addressing.
//!
//! The second instruction byte (and each half of a two-operand pair) holds
//! a 3-bit mode and a 3-bit register number. Resolving an operand applies
//! the mode's register side effects exactly once; loading and storing the
//! resolved operand can then happen any number of times.

use super::bus_trait::{BusTrait};
use super::cpu::{Cpu};
use super::registers::{PC};
use super::super::types::{Byte, Word, Adr};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressMode {
    Register,                  // Rn
    PostIncremented,           // (Rn)+
    PreDecremented,            // -(Rn)
    Indexed,                   // d(Rn)
    RegisterIndirect,          // (Rn)
    PostIncrementedIndirect,   // ((Rn)+)
    PreDecrementedIndirect,    // (-(Rn))
    IndexedIndirect,           // (d(Rn))
}

impl AddressMode {
    pub fn from_bits(bits: Byte) -> Self {
        match bits & 7 {
            0 => AddressMode::Register,
            1 => AddressMode::PostIncremented,
            2 => AddressMode::PreDecremented,
            3 => AddressMode::Indexed,
            4 => AddressMode::RegisterIndirect,
            5 => AddressMode::PostIncrementedIndirect,
            6 => AddressMode::PreDecrementedIndirect,
            _ => AddressMode::IndexedIndirect,
        }
    }

    /// Bytes the operand consumes after the instruction: a displacement
    /// word, or the word skipped by post-incrementing the PC.
    pub fn extra_bytes(self, reg: usize) -> usize {
        match self {
            AddressMode::Indexed | AddressMode::IndexedIndirect => 2,
            AddressMode::PostIncremented | AddressMode::PostIncrementedIndirect if reg == PC => 2,
            _ => 0,
        }
    }
}

/// Splits a `xx mmm rrr` byte.
pub fn mode_reg(b: Byte) -> (AddressMode, usize) {
    (AddressMode::from_bits(b >> 3), (b & 7) as usize)
}

/// A resolved operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Register(usize),
    Memory(Adr),
}

impl Cpu {
    pub(super) fn resolve(&mut self, mode: AddressMode, reg: usize) -> Operand {
        match mode {
            AddressMode::Register => Operand::Register(reg),
            AddressMode::PostIncremented => {
                Operand::Memory(self.post_increment(reg))
            },
            AddressMode::PreDecremented => {
                Operand::Memory(self.pre_decrement(reg))
            },
            AddressMode::Indexed => {
                let d = self.fetch_word();
                Operand::Memory(self.regs.r[reg].wrapping_add(d))
            },
            AddressMode::RegisterIndirect => {
                Operand::Memory(self.regs.r[reg])
            },
            AddressMode::PostIncrementedIndirect => {
                let first = self.post_increment(reg);
                Operand::Memory(self.mem.read16(first))
            },
            AddressMode::PreDecrementedIndirect => {
                let first = self.pre_decrement(reg);
                Operand::Memory(self.mem.read16(first))
            },
            AddressMode::IndexedIndirect => {
                let d = self.fetch_word();
                let first = self.regs.r[reg].wrapping_add(d);
                Operand::Memory(self.mem.read16(first))
            },
        }
    }

    pub(super) fn load(&mut self, operand: Operand) -> Word {
        match operand {
            Operand::Register(reg) => self.regs.r[reg],
            Operand::Memory(adr) => self.mem.read16(adr),
        }
    }

    pub(super) fn store(&mut self, operand: Operand, value: Word) {
        match operand {
            Operand::Register(reg) => self.regs.r[reg] = value,
            Operand::Memory(adr) => self.mem.write16(adr, value),
        }
    }

    /// Word at the PC, PC += 2.
    pub(super) fn fetch_word(&mut self) -> Word {
        let adr = self.post_increment(PC);
        self.mem.read16(adr)
    }

    fn post_increment(&mut self, reg: usize) -> Adr {
        let adr = self.regs.r[reg];
        self.regs.r[reg] = adr.wrapping_add(2);
        adr
    }

    fn pre_decrement(&mut self, reg: usize) -> Adr {
        let adr = self.regs.r[reg].wrapping_sub(2);
        self.regs.r[reg] = adr;
        adr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn extra_bytes_for_pc_modes() {
        assert_eq!(0, AddressMode::PostIncremented.extra_bytes(3));
        assert_eq!(2, AddressMode::PostIncremented.extra_bytes(PC));
        assert_eq!(2, AddressMode::PostIncrementedIndirect.extra_bytes(PC));
        assert_eq!(0, AddressMode::PreDecremented.extra_bytes(PC));
        assert_eq!(2, AddressMode::Indexed.extra_bytes(0));
        assert_eq!(2, AddressMode::IndexedIndirect.extra_bytes(5));
    }

    #[test]
    fn indexed_reads_displacement_at_pc() {
        let mut cpu = Cpu::new();
        cpu.set_word(0x0100, 0xfffe);  // -2
        cpu.set_pc(0x0100);
        cpu.set_register(2, 0x2000);
        let op = cpu.resolve(AddressMode::Indexed, 2);
        assert_eq!(Operand::Memory(0x1ffe), op);
        assert_eq!(0x0102, cpu.pc());
    }

    #[test]
    fn indirect_modes_dereference_once() {
        let mut cpu = Cpu::new();
        cpu.set_word(0x0200, 0x0300);
        cpu.set_register(1, 0x0200);
        assert_eq!(Operand::Memory(0x0200), cpu.resolve(AddressMode::RegisterIndirect, 1));
        assert_eq!(Operand::Memory(0x0300), cpu.resolve(AddressMode::PostIncrementedIndirect, 1));
        assert_eq!(0x0202, cpu.register(1));
        assert_eq!(Operand::Memory(0x0300), cpu.resolve(AddressMode::PreDecrementedIndirect, 1));
        assert_eq!(0x0200, cpu.register(1));
    }

    #[test]
    fn post_incremented_pc_is_immediate() {
        let mut cpu = Cpu::new();
        cpu.set_word(0x0040, 1234);
        cpu.set_pc(0x0040);
        let op = cpu.resolve(AddressMode::PostIncremented, PC);
        assert_eq!(1234, cpu.load(op));
        assert_eq!(0x0042, cpu.pc());
    }

    #[test]
    fn displacement_at_top_wraps_pc() {
        let mut cpu = Cpu::new();
        cpu.set_byte(0xfffe, 0x12);  // byte port: word read gives 0x0012
        cpu.set_pc(0xfffe);
        cpu.set_register(2, 0x0100);
        let op = cpu.resolve(AddressMode::Indexed, 2);
        assert_eq!(Operand::Memory(0x0112), op);
        assert_eq!(0x0000, cpu.pc());
    }

    quickcheck! {
        fn post_increment_advances_once(start: u16, reads: u8) -> bool {
            let mut cpu = Cpu::new();
            cpu.set_register(3, start);
            let op = cpu.resolve(AddressMode::PostIncremented, 3);
            for _ in 0..(reads % 8) {
                cpu.load(op);
            }
            cpu.register(3) == start.wrapping_add(2)
        }
    }
}
