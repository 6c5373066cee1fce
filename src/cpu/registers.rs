use super::super::types::{Word};

pub const REGISTER_COUNT: usize = 8;
pub const SP: usize = 6;  // Stack pointer = R6.
pub const PC: usize = 7;  // Program counter = R7.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub r: [Word; REGISTER_COUNT],
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pc(&self) -> Word { self.r[PC] }
    pub fn sp(&self) -> Word { self.r[SP] }

    pub fn set_pc(&mut self, value: Word) { self.r[PC] = value; }
    pub fn set_sp(&mut self, value: Word) { self.r[SP] = value; }
}

#[test]
fn test_named_registers() {
    let mut regs = Registers::new();
    regs.set_sp(0x8000);
    regs.set_pc(0x0010);
    assert_eq!(0x8000, regs.r[6]);
    assert_eq!(0x8000, regs.sp());
    assert_eq!(0x0010, regs.pc());
}
