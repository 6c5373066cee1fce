use log::{trace};

use super::addressing::{mode_reg, AddressMode, Operand};
use super::bus_trait::{BusTrait};
use super::cpu::{Cpu, ExecutionResult};
use super::flags::{CarryOp};
use super::opcode::{Condition, OneOp, Opcode, TwoOp};
use super::registers::{PC};
use super::util::{branch_target};
use super::super::types::{Byte, Word, SByte, SWord};

impl Cpu {
    /// Executes one instruction at the PC.
    ///
    /// A PC sitting on the breakpoint stops before anything is fetched.
    pub fn execute_next_instruction(&mut self) -> ExecutionResult {
        if self.breakpoint() == Some(self.pc()) {
            return ExecutionResult::BreakPoint;
        }
        self.execute_ignoring_breakpoint()
    }

    /// Same as `execute_next_instruction` without the breakpoint check, for
    /// resuming a run that stopped on the breakpoint.
    pub fn execute_ignoring_breakpoint(&mut self) -> ExecutionResult {
        let startadr = self.pc();
        trace!("{:04x}: {}", startadr, self.mnemonic(startadr));
        let result = self.step();
        self.sync_mnemonics();
        result
    }

    fn step(&mut self) -> ExecutionResult {
        let op = match self.fetch_byte() {
            Some(op) => op,
            None => return ExecutionResult::EndOfMemory,
        };

        match Opcode::from_bits(op) {
            Opcode::Nop => {
                ExecutionResult::Noop
            },
            Opcode::Ccc => {
                self.flags.ccc(op & 0x0f);
                ExecutionResult::Ok
            },
            Opcode::Scc => {
                self.flags.scc(op & 0x0f);
                ExecutionResult::Ok
            },
            Opcode::Branch(cond) => {
                let ofs = match self.fetch_byte() {
                    Some(b) => b as SByte,
                    None => return ExecutionResult::EndOfMemory,
                };
                if self.condition(cond) {
                    let pc = branch_target(self.pc(), ofs);
                    self.set_pc(pc);
                }
                ExecutionResult::Ok
            },
            Opcode::Jmp => {
                let (mode, reg) = match self.fetch_byte() {
                    Some(b) => mode_reg(b),
                    None => return ExecutionResult::EndOfMemory,
                };
                if let Operand::Memory(adr) = self.resolve(mode, reg) {
                    self.set_pc(adr);
                }
                ExecutionResult::Ok
            },
            Opcode::Sob => {
                let reg = (op & 7) as usize;
                let ofs = match self.fetch_byte() {
                    Some(b) => b as Word,
                    None => return ExecutionResult::EndOfMemory,
                };
                let count = self.regs.r[reg].wrapping_sub(1);
                self.regs.r[reg] = count;
                if count != 0 {
                    let pc = self.pc().wrapping_sub(ofs);
                    self.set_pc(pc);
                }
                ExecutionResult::Ok
            },
            Opcode::Jsr => {
                let link = (op & 7) as usize;
                let (mode, reg) = match self.fetch_byte() {
                    Some(b) => mode_reg(b),
                    None => return ExecutionResult::EndOfMemory,
                };
                if let Operand::Memory(target) = self.resolve(mode, reg) {
                    let value = self.regs.r[link];
                    self.push(value);
                    if link != PC {
                        self.regs.r[link] = self.pc();
                    }
                    self.set_pc(target);
                }
                ExecutionResult::Ok
            },
            Opcode::Rts => {
                let reg = (op & 7) as usize;
                if reg != PC {
                    self.regs.r[PC] = self.regs.r[reg];
                }
                self.regs.r[reg] = self.pop();
                ExecutionResult::Ok
            },
            Opcode::Rti => {
                // Not implemented by the machine.
                ExecutionResult::Ok
            },
            Opcode::OneOperand(one) => {
                let (mode, reg) = match self.fetch_byte() {
                    Some(b) => mode_reg(b),
                    None => return ExecutionResult::EndOfMemory,
                };
                self.one_operand(one, mode, reg);
                ExecutionResult::Ok
            },
            Opcode::TwoOperand(two) => {
                let second = match self.fetch_byte() {
                    Some(b) => b,
                    None => return ExecutionResult::EndOfMemory,
                };
                let pair = ((op as Word) << 8) | second as Word;
                let (smode, sreg) = mode_reg((pair >> 6) as Byte);
                let (dmode, dreg) = mode_reg(pair as Byte);
                self.two_operand(two, smode, sreg, dmode, dreg);
                ExecutionResult::Ok
            },
            Opcode::Hlt => {
                ExecutionResult::Halt
            },
        }
    }

    fn one_operand(&mut self, one: OneOp, mode: AddressMode, reg: usize) {
        let dst = self.resolve(mode, reg);
        let value = self.load(dst);
        let carry_in = self.flags.c as Word;
        let f = &mut self.flags;
        let result = match one {
            OneOp::Clr => {
                f.n = false;
                f.z = true;
                f.v = false;
                f.c = false;
                0
            },
            OneOp::Not => {
                let r = !value;
                f.test_nz(r);
                f.v = false;
                f.c = true;
                r
            },
            OneOp::Inc => {
                let r = value.wrapping_add(1);
                f.test_nz(r);
                f.test_overflow(signed(value), 1, r);
                f.test_carry(value, 1, CarryOp::Add);
                r
            },
            OneOp::Dec => {
                let r = value.wrapping_sub(1);
                f.test_nz(r);
                f.test_overflow(signed(value), -1, r);
                f.test_carry(value, 1, CarryOp::Sub);
                r
            },
            OneOp::Neg => {
                let r = value.wrapping_neg();
                f.test_nz(r);
                f.v = value == 0x8000;
                f.test_carry(0, value, CarryOp::Sub);
                r
            },
            OneOp::Tst => {
                f.test_nz(value);
                f.v = false;
                f.c = false;
                value
            },
            OneOp::Ror => {
                let r = (value >> 1) | (carry_in << 15);
                f.c = (value & 1) != 0;
                f.test_nz(r);
                f.v = f.n ^ f.c;
                r
            },
            OneOp::Rol => {
                let r = (value << 1) | carry_in;
                f.c = (value & 0x8000) != 0;
                f.test_nz(r);
                f.v = f.n ^ f.c;
                r
            },
            OneOp::Asr => {
                let r = ((value as SWord) >> 1) as Word;
                f.c = (value & 1) != 0;
                f.test_nz(r);
                f.v = f.n ^ f.c;
                r
            },
            OneOp::Asl => {
                let r = value << 1;
                f.c = (value & 0x8000) != 0;
                f.test_nz(r);
                f.v = f.n ^ f.c;
                r
            },
            OneOp::Adc => {
                let r = value.wrapping_add(carry_in);
                f.test_nz(r);
                f.test_overflow(signed(value), carry_in as i32, r);
                f.test_carry(value, carry_in, CarryOp::Add);
                r
            },
            OneOp::Sbc => {
                let r = value.wrapping_sub(carry_in);
                f.test_nz(r);
                f.test_overflow(signed(value), -(carry_in as i32), r);
                f.test_carry(value, carry_in, CarryOp::Sub);
                r
            },
        };
        if one != OneOp::Tst {
            self.store(dst, result);
        }
    }

    fn two_operand(&mut self, two: TwoOp, smode: AddressMode, sreg: usize, dmode: AddressMode, dreg: usize) {
        let src_op = self.resolve(smode, sreg);
        let src = self.load(src_op);
        let dst_op = self.resolve(dmode, dreg);
        let dst = self.load(dst_op);
        let f = &mut self.flags;
        let result = match two {
            TwoOp::Mov => {
                f.test_nz(src);
                f.v = false;
                src
            },
            TwoOp::Add => {
                let r = dst.wrapping_add(src);
                f.test_nz(r);
                f.test_overflow(signed(dst), signed(src), r);
                f.test_carry(dst, src, CarryOp::Add);
                r
            },
            TwoOp::Sub => {
                let r = dst.wrapping_sub(src);
                f.test_nz(r);
                f.test_overflow(signed(dst), -signed(src), r);
                f.test_carry(dst, src, CarryOp::Sub);
                r
            },
            TwoOp::Cmp => {
                let r = src.wrapping_sub(dst);
                f.test_nz(r);
                f.test_overflow(signed(src), -signed(dst), r);
                f.test_carry(src, dst, CarryOp::Sub);
                // Destination is stored back unchanged.
                dst
            },
            TwoOp::And => {
                let r = dst & src;
                f.test_nz(r);
                f.v = false;
                r
            },
            TwoOp::Or => {
                let r = dst | src;
                f.test_nz(r);
                f.v = false;
                r
            },
        };
        self.store(dst_op, result);
    }

    fn condition(&self, cond: Condition) -> bool {
        let f = self.flags;
        match cond {
            Condition::Br => true,
            Condition::Bne => !f.z,
            Condition::Beq => f.z,
            Condition::Bpl => !f.n,
            Condition::Bmi => f.n,
            Condition::Bvc => !f.v,
            Condition::Bvs => f.v,
            Condition::Bcc => !f.c,
            Condition::Bcs => f.c,
            Condition::Bge => f.n == f.v,
            Condition::Blt => f.n != f.v,
            Condition::Bgt => f.n == f.v && !f.z,
            Condition::Ble => f.n != f.v || f.z,
            Condition::Bhi => !f.c && !f.z,
            Condition::Bls => f.c || f.z,
        }
    }

    /// Instruction byte at the PC. `None` when the PC would have to move
    /// past the top of memory.
    fn fetch_byte(&mut self) -> Option<Byte> {
        let pc = self.pc();
        if pc == 0xffff {
            return None;
        }
        let b = self.mem.read8(pc);
        self.set_pc(pc + 1);
        Some(b)
    }

    fn push(&mut self, value: Word) {
        let sp = self.regs.sp().wrapping_sub(2);
        self.regs.set_sp(sp);
        self.mem.write16(sp, value);
    }

    fn pop(&mut self) -> Word {
        let sp = self.regs.sp();
        self.regs.set_sp(sp.wrapping_add(2));
        self.mem.read16(sp)
    }
}

fn signed(w: Word) -> i32 {
    (w as SWord) as i32
}
