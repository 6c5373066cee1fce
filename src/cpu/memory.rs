use super::bus_trait::{BusTrait};
use super::super::types::{Byte, Adr};

pub const MEMORY_SIZE: usize = 0x10000;

// Memory mapped I/O, all byte-wide.
pub const KEYBOARD_STATE: Adr = 0xffda;  // 65498
pub const KEYBOARD_INPUT: Adr = 0xffdb;  // 65499
pub const DISPLAY_START: Adr  = 0xffdc;  // 65500
pub const DISPLAY_END: Adr    = 0xffff;  // 65535
pub const IO_START: Adr = KEYBOARD_STATE;

/// The 64K byte memory of the machine.
///
/// Every `read8`/`write8` counts as one memory access. Writes are also
/// remembered until the owner drains them with `take_written`, which is how
/// the mnemonic table learns what to resynchronize.
pub struct Memory {
    mem: Box<[Byte; MEMORY_SIZE]>,
    original: Box<[Byte; MEMORY_SIZE]>,
    access_count: u64,
    last_changed: Option<Adr>,
    written: Vec<Adr>,
}

impl Memory {
    pub fn new() -> Self {
        Self {
            mem: Box::new([0; MEMORY_SIZE]),
            original: Box::new([0; MEMORY_SIZE]),
            access_count: 0,
            last_changed: None,
            written: Vec::new(),
        }
    }

    /// Replaces the whole memory and the original copy. Bytes beyond the
    /// end of `bytes` become zero.
    pub fn load(&mut self, bytes: &[Byte]) {
        let n = bytes.len().min(MEMORY_SIZE);
        self.mem[..n].copy_from_slice(&bytes[..n]);
        for b in self.mem[n..].iter_mut() {
            *b = 0;
        }
        self.original.copy_from_slice(&self.mem[..]);
        self.written.clear();
    }

    /// Copies `bytes[start..=end]` to `target..`, clipped at the top of the
    /// address space and at the end of `bytes`. Returns the number of bytes
    /// copied.
    pub fn load_range(&mut self, bytes: &[Byte], start: Adr, end: Adr, target: Adr) -> usize {
        if end < start {
            return 0;
        }
        let start = start as usize;
        let end = (end as usize).min(bytes.len().saturating_sub(1));
        if bytes.is_empty() || start > end {
            return 0;
        }
        let target = target as usize;
        let n = (end - start + 1).min(MEMORY_SIZE - target);
        self.mem[target..target + n].copy_from_slice(&bytes[start..start + n]);
        self.original[target..target + n].copy_from_slice(&bytes[start..start + n]);
        n
    }

    /// Fills `[start, end]` with zero.
    pub fn zero(&mut self, start: Adr, end: Adr) {
        if end < start {
            return;
        }
        for b in self.mem[start as usize..=end as usize].iter_mut() {
            *b = 0;
        }
    }

    /// Copies `[start, end]` to `target..`, clipped at the top of the
    /// address space. Overlapping ranges behave like `memmove`.
    pub fn copy(&mut self, start: Adr, end: Adr, target: Adr) {
        if end < start {
            return;
        }
        let n = (end as usize - start as usize + 1).min(MEMORY_SIZE - target as usize);
        self.mem.copy_within(start as usize..start as usize + n, target as usize);
    }

    pub fn restore_original(&mut self) {
        self.mem.copy_from_slice(&self.original[..]);
    }

    pub fn original(&self, adr: Adr) -> Byte {
        self.original[adr as usize]
    }

    pub fn as_slice(&self) -> &[Byte] {
        &self.mem[..]
    }

    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    pub fn last_changed(&self) -> Option<Adr> {
        self.last_changed
    }

    /// Addresses written since the previous call, in write order.
    pub fn take_written(&mut self) -> Vec<Adr> {
        std::mem::take(&mut self.written)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl BusTrait for Memory {
    fn read8(&mut self, adr: Adr) -> Byte {
        self.access_count += 1;
        self.mem[adr as usize]
    }

    fn write8(&mut self, adr: Adr, value: Byte) {
        self.access_count += 1;
        self.mem[adr as usize] = value;
        self.last_changed = Some(adr);
        self.written.push(adr);
    }

    fn peek8(&self, adr: Adr) -> Byte {
        self.mem[adr as usize]
    }

    fn is_byte_port(&self, adr: Adr) -> bool {
        adr >= IO_START
    }
}
