//! Condition flags (N, Z, V, C).
//!
//! The packed view keeps the flags in the low nibble in `NZVC` order, which
//! is also the operand layout of the CCC/SCC instructions.

use super::super::types::{Byte, Word, SWord};

pub const FLAG_C: Byte = 1 << 0;
pub const FLAG_V: Byte = 1 << 1;
pub const FLAG_Z: Byte = 1 << 2;
pub const FLAG_N: Byte = 1 << 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarryOp {
    Add,
    Sub,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConditionFlags {
    pub n: bool,
    pub z: bool,
    pub v: bool,
    pub c: bool,
}

impl ConditionFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn test_negative(&mut self, r: Word) {
        self.n = (r as SWord) < 0;
    }

    pub fn test_zero(&mut self, r: Word) {
        self.z = r == 0;
    }

    pub fn test_overflow(&mut self, a: i32, b: i32, r: Word) {
        self.v = overflow(a, b, r);
    }

    pub fn test_carry(&mut self, a: Word, b: Word, op: CarryOp) {
        self.c = carry(a, b, op);
    }

    /// N and Z from a result.
    pub fn test_nz(&mut self, r: Word) {
        self.test_negative(r);
        self.test_zero(r);
    }

    pub fn bits(&self) -> Byte {
        let mut bits = 0;
        if self.n { bits |= FLAG_N; }
        if self.z { bits |= FLAG_Z; }
        if self.v { bits |= FLAG_V; }
        if self.c { bits |= FLAG_C; }
        bits
    }

    pub fn set_bits(&mut self, bits: Byte) {
        self.n = (bits & FLAG_N) != 0;
        self.z = (bits & FLAG_Z) != 0;
        self.v = (bits & FLAG_V) != 0;
        self.c = (bits & FLAG_C) != 0;
    }

    // CCC/SCC operate on the packed bits, then every flag is re-derived.
    // Not validated against the hardware; keep the literal masking.
    pub fn ccc(&mut self, mask: Byte) {
        let bits = self.bits() & !mask;
        self.set_bits(bits);
    }

    pub fn scc(&mut self, mask: Byte) {
        let bits = self.bits() | mask;
        self.set_bits(bits);
    }
}

/// Signed add/sub overflow: two like-signed operands giving an
/// opposite-signed result. `a` and `b` are the sign-extended operands as
/// they take part in the addition, `r` the truncated result.
pub fn overflow(a: i32, b: i32, r: Word) -> bool {
    let r = (r as SWord) as i32;
    (a > 0 && b > 0 && r < 0) || (a < 0 && b < 0 && r > 0)
}

/// Carry (or borrow) out of bit 15, computed on 17-bit unsigned operands.
pub fn carry(a: Word, b: Word, op: CarryOp) -> bool {
    let a = a as u32;
    let b = b as u32;
    let r = match op {
        CarryOp::Add => a + b,
        CarryOp::Sub => a.wrapping_sub(b),
    };
    (r & 0x1_0000) != 0
}
