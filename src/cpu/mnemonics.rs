use super::memory::{MEMORY_SIZE};
use super::super::types::{Adr};

/// One row of the mnemonic table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    /// First byte of an instruction, with its disassembled text.
    Start(String),
    /// Operand byte of the instruction starting at `start`.
    Continuation { start: Adr },
}

/// Per-address disassembly.
///
/// The rows always partition the address space: each `Start` row is
/// followed by the `Continuation` rows of its operand bytes.
pub struct MnemonicTable {
    cells: Vec<Cell>,
    last_row: Adr,
}

impl MnemonicTable {
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::Start(String::new()); MEMORY_SIZE],
            last_row: 0,
        }
    }

    pub fn cell(&self, adr: Adr) -> &Cell {
        &self.cells[adr as usize]
    }

    /// Text of the row, empty for continuation rows.
    pub fn text(&self, adr: Adr) -> &str {
        match &self.cells[adr as usize] {
            Cell::Start(text) => text,
            Cell::Continuation { .. } => "",
        }
    }

    pub fn is_continuation(&self, adr: Adr) -> bool {
        matches!(self.cells[adr as usize], Cell::Continuation { .. })
    }

    /// Address of the instruction that owns row `adr`.
    pub fn instruction_start(&self, adr: Adr) -> Adr {
        match self.cells[adr as usize] {
            Cell::Start(_) => adr,
            Cell::Continuation { start } => start,
        }
    }

    /// Last row reached by the latest regeneration pass.
    pub fn last_row(&self) -> Adr {
        self.last_row
    }

    /// Instruction rows in `[start, end]` as `(address, text)`.
    pub fn instructions(&self, start: Adr, end: Adr) -> impl Iterator<Item = (Adr, &str)> + '_ {
        (start as usize..=end as usize)
            .filter_map(move |i| match &self.cells[i] {
                Cell::Start(text) => Some((i as Adr, text.as_str())),
                Cell::Continuation { .. } => None,
            })
    }

    pub(super) fn matches(&self, adr: Adr, text: &str) -> bool {
        match &self.cells[adr as usize] {
            Cell::Start(old) => old == text,
            Cell::Continuation { .. } => false,
        }
    }

    /// Stores an instruction of `size` bytes at `adr`. Continuation rows are
    /// clipped at the top of the address space.
    pub(super) fn put(&mut self, adr: Adr, size: usize, text: String) {
        self.cells[adr as usize] = Cell::Start(text);
        let end = (adr as usize + size).min(MEMORY_SIZE);
        for cell in self.cells[adr as usize + 1..end].iter_mut() {
            *cell = Cell::Continuation { start: adr };
        }
    }

    pub(super) fn set_last_row(&mut self, adr: Adr) {
        self.last_row = adr;
    }
}

impl Default for MnemonicTable {
    fn default() -> Self {
        Self::new()
    }
}
