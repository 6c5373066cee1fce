use super::super::types::{Byte};

use lazy_static::lazy_static;

/// Branch conditions, selected by the low nibble of a `0011 cccc` opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    Br,    // always
    Bne,   // !Z
    Beq,   // Z
    Bpl,   // !N
    Bmi,   // N
    Bvc,   // !V
    Bvs,   // V
    Bcc,   // !C
    Bcs,   // C
    Bge,   // N == V
    Blt,   // N != V
    Bgt,   // N == V && !Z
    Ble,   // N != V || Z
    Bhi,   // !C && !Z
    Bls,   // C || Z
}

impl Condition {
    pub fn from_bits(bits: Byte) -> Option<Self> {
        let cond = match bits & 0x0f {
            0x0 => Condition::Br,
            0x1 => Condition::Bne,
            0x2 => Condition::Beq,
            0x3 => Condition::Bpl,
            0x4 => Condition::Bmi,
            0x5 => Condition::Bvc,
            0x6 => Condition::Bvs,
            0x7 => Condition::Bcc,
            0x8 => Condition::Bcs,
            0x9 => Condition::Bge,
            0xa => Condition::Blt,
            0xb => Condition::Bgt,
            0xc => Condition::Ble,
            0xd => Condition::Bhi,
            0xe => Condition::Bls,
            _ => return None,
        };
        Some(cond)
    }

    pub fn name(self) -> &'static str {
        match self {
            Condition::Br => "BR",
            Condition::Bne => "BNE",
            Condition::Beq => "BEQ",
            Condition::Bpl => "BPL",
            Condition::Bmi => "BMI",
            Condition::Bvc => "BVC",
            Condition::Bvs => "BVS",
            Condition::Bcc => "BCC",
            Condition::Bcs => "BCS",
            Condition::Bge => "BGE",
            Condition::Blt => "BLT",
            Condition::Bgt => "BGT",
            Condition::Ble => "BLE",
            Condition::Bhi => "BHI",
            Condition::Bls => "BLS",
        }
    }
}

/// One-operand instructions, selected by the low nibble of `1000 cccc`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OneOp {
    Clr,
    Not,
    Inc,
    Dec,
    Neg,
    Tst,
    Ror,
    Rol,
    Asr,
    Asl,
    Adc,
    Sbc,
}

impl OneOp {
    pub fn from_bits(bits: Byte) -> Option<Self> {
        let op = match bits & 0x0f {
            0x0 => OneOp::Clr,
            0x1 => OneOp::Not,
            0x2 => OneOp::Inc,
            0x3 => OneOp::Dec,
            0x4 => OneOp::Neg,
            0x5 => OneOp::Tst,
            0x6 => OneOp::Ror,
            0x7 => OneOp::Rol,
            0x8 => OneOp::Asr,
            0x9 => OneOp::Asl,
            0xa => OneOp::Adc,
            0xb => OneOp::Sbc,
            _ => return None,
        };
        Some(op)
    }

    pub fn name(self) -> &'static str {
        match self {
            OneOp::Clr => "CLR",
            OneOp::Not => "NOT",
            OneOp::Inc => "INC",
            OneOp::Dec => "DEC",
            OneOp::Neg => "NEG",
            OneOp::Tst => "TST",
            OneOp::Ror => "ROR",
            OneOp::Rol => "ROL",
            OneOp::Asr => "ASR",
            OneOp::Asl => "ASL",
            OneOp::Adc => "ADC",
            OneOp::Sbc => "SBC",
        }
    }
}

/// Two-operand instructions, selected by bits 6..4 of the first byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TwoOp {
    Mov,
    Add,
    Sub,
    Cmp,
    And,
    Or,
}

impl TwoOp {
    pub fn name(self) -> &'static str {
        match self {
            TwoOp::Mov => "MOV",
            TwoOp::Add => "ADD",
            TwoOp::Sub => "SUB",
            TwoOp::Cmp => "CMP",
            TwoOp::And => "AND",
            TwoOp::Or => "OR",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    Nop,                  // nop
    Ccc,                  // ccc NZVC
    Scc,                  // scc NZVC
    Branch(Condition),    // bxx offset
    Jmp,                  // jmp XX
    Sob,                  // sob Rn, offset
    Jsr,                  // jsr Rn, XX
    Rts,                  // rts Rn
    Rti,                  // rti (placeholder)
    OneOperand(OneOp),    // clr XX, ...
    TwoOperand(TwoOp),    // mov XX, YY, ...
    Hlt,                  // hlt
}

impl Opcode {
    /// Classifies a first instruction byte. Total: patterns without a
    /// meaning decode as `Nop`.
    pub fn from_bits(op: Byte) -> Opcode {
        INST[op as usize]
    }
}

fn decode(op: Byte) -> Opcode {
    match op >> 4 {
        0x0 => Opcode::Nop,
        0x1 => Opcode::Ccc,
        0x2 => Opcode::Scc,
        0x3 => Condition::from_bits(op).map_or(Opcode::Nop, Opcode::Branch),
        0x4 => Opcode::Jmp,
        0x5 => Opcode::Sob,
        0x6 => Opcode::Jsr,
        0x7 => if (op & 0x08) == 0 { Opcode::Rts } else { Opcode::Rti },
        0x8 => OneOp::from_bits(op).map_or(Opcode::Nop, Opcode::OneOperand),
        0x9 => Opcode::TwoOperand(TwoOp::Mov),
        0xa => Opcode::TwoOperand(TwoOp::Add),
        0xb => Opcode::TwoOperand(TwoOp::Sub),
        0xc => Opcode::TwoOperand(TwoOp::Cmp),
        0xd => Opcode::TwoOperand(TwoOp::And),
        0xe => Opcode::TwoOperand(TwoOp::Or),
        _ => Opcode::Hlt,
    }
}

lazy_static! {
    static ref INST: Vec<Opcode> = (0..=0xff).map(decode).collect();
}
