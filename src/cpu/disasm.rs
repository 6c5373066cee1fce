use super::addressing::{mode_reg, AddressMode};
use super::bus_trait::{BusTrait};
use super::memory::{MEMORY_SIZE};
use super::mnemonics::{MnemonicTable};
use super::opcode::{Opcode};
use super::registers::{PC};
use super::util::{cc_letters};
use super::super::types::{Byte, Word, SByte, SWord, Adr};

/// Opcode, mode byte and two extra words.
pub const MAX_INSTRUCTION_SIZE: usize = 6;

/// Disassembles the instruction at `adr`, returning its size in bytes and
/// its text. Only reads memory through `peek`, so nothing is counted.
pub fn disasm<BusT: BusTrait>(bus: &BusT, adr: Adr) -> (usize, String) {
    let op = bus.peek8(adr);
    let next = adr.wrapping_add(1);
    let ext = adr.wrapping_add(2);

    match Opcode::from_bits(op) {
        Opcode::Nop => {
            (1, "NOP".to_string())
        },
        Opcode::Ccc => {
            (1, cc("CCC", op))
        },
        Opcode::Scc => {
            (1, cc("SCC", op))
        },
        Opcode::Branch(cond) => {
            let ofs = bus.peek8(next) as SByte;
            (2, format!("{} {}", cond.name(), ofs))
        },
        Opcode::Jmp => {
            let (mode, reg) = mode_reg(bus.peek8(next));
            let (sz, s) = operand(bus, ext, mode, reg);
            (2 + sz, format!("JMP {}", s))
        },
        Opcode::Sob => {
            let ofs = bus.peek8(next);
            (2, format!("SOB R{}, {}", op & 7, ofs))
        },
        Opcode::Jsr => {
            let (mode, reg) = mode_reg(bus.peek8(next));
            let (sz, s) = operand(bus, ext, mode, reg);
            (2 + sz, format!("JSR R{}, {}", op & 7, s))
        },
        Opcode::Rts => {
            (1, format!("RTS R{}", op & 7))
        },
        Opcode::Rti => {
            (1, "RTI".to_string())
        },
        Opcode::OneOperand(one) => {
            let (mode, reg) = mode_reg(bus.peek8(next));
            let (sz, s) = operand(bus, ext, mode, reg);
            (2 + sz, format!("{} {}", one.name(), s))
        },
        Opcode::TwoOperand(two) => {
            let pair = ((op as Word) << 8) | bus.peek8(next) as Word;
            let (smode, sreg) = mode_reg((pair >> 6) as Byte);
            let (dmode, dreg) = mode_reg(pair as Byte);
            let (ssz, sstr) = operand(bus, ext, smode, sreg);
            let (dsz, dstr) = operand(bus, ext.wrapping_add(ssz as Word), dmode, dreg);
            (2 + ssz + dsz, format!("{} {}, {}", two.name(), sstr, dstr))
        },
        Opcode::Hlt => {
            (1, "HLT".to_string())
        },
    }
}

fn cc(name: &str, op: Byte) -> String {
    let letters = cc_letters(op & 0x0f);
    if letters.is_empty() {
        name.to_string()
    } else {
        format!("{} {}", name, letters)
    }
}

/// Operand text. `adr` is where the operand's extra word would be.
fn operand<BusT: BusTrait>(bus: &BusT, adr: Adr, mode: AddressMode, reg: usize) -> (usize, String) {
    let sz = mode.extra_bytes(reg);
    let s = match mode {
        AddressMode::Register => format!("R{}", reg),
        AddressMode::PostIncremented if reg == PC => format!("#{}", bus.peek16(adr)),
        AddressMode::PostIncremented => format!("(R{})+", reg),
        AddressMode::PreDecremented => format!("-(R{})", reg),
        AddressMode::Indexed => format!("{}(R{})", bus.peek16(adr) as SWord, reg),
        AddressMode::RegisterIndirect => format!("(R{})", reg),
        AddressMode::PostIncrementedIndirect if reg == PC => format!("{}", bus.peek16(adr)),
        AddressMode::PostIncrementedIndirect => format!("((R{})+)", reg),
        AddressMode::PreDecrementedIndirect => format!("(-(R{}))", reg),
        AddressMode::IndexedIndirect => format!("({}(R{}))", bus.peek16(adr) as SWord, reg),
    };
    (sz, s)
}

/// Regenerates `table` from the instruction that owns row `start`.
///
/// With `force_all` every row up to the top of memory is rewritten.
/// Otherwise the scan stops at the first instruction row whose text is
/// already what is stored: from there on the table was consistent before
/// and the bytes it depends on did not change. Returns the last row reached.
pub fn update_mnemonics<BusT: BusTrait>(table: &mut MnemonicTable, bus: &BusT, start: Adr, force_all: bool) -> Adr {
    let mut row = table.instruction_start(start) as usize;
    let mut last = row;
    while row < MEMORY_SIZE {
        let adr = row as Adr;
        let (sz, text) = disasm(bus, adr);
        last = row;
        if !force_all && table.matches(adr, &text) {
            break;
        }
        table.put(adr, sz, text);
        row += sz;
    }
    table.set_last_row(last as Adr);
    last as Adr
}

/// Resyncs `table` after a write to `adr`.
///
/// Operands of an instruction in the last few rows wrap around to the
/// lowest addresses, but its continuation rows stop at the top. A write to
/// one of those low bytes therefore also revisits the top rows.
pub fn update_after_write<BusT: BusTrait>(table: &mut MnemonicTable, bus: &BusT, adr: Adr) -> Adr {
    if (adr as usize) < MAX_INSTRUCTION_SIZE - 1 {
        for top in (MEMORY_SIZE - (MAX_INSTRUCTION_SIZE - 1))..MEMORY_SIZE {
            let top = top as Adr;
            if !table.is_continuation(top) {
                update_mnemonics(table, bus, top, false);
            }
        }
    }
    update_mnemonics(table, bus, adr, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::mnemonics::{Cell};

    struct DummyBus {
        data: Vec<Byte>,
    }

    impl DummyBus {
        fn new(program: &[Byte]) -> Self {
            let mut data = vec![0; MEMORY_SIZE];
            data[..program.len()].copy_from_slice(program);
            Self { data }
        }
    }

    impl BusTrait for DummyBus {
        fn read8(&mut self, adr: Adr) -> Byte { self.data[adr as usize] }
        fn write8(&mut self, adr: Adr, value: Byte) { self.data[adr as usize] = value; }
        fn peek8(&self, adr: Adr) -> Byte { self.data[adr as usize] }
    }

    fn text(program: &[Byte]) -> (usize, String) {
        disasm(&DummyBus::new(program), 0)
    }

    #[test]
    fn single_byte_instructions() {
        assert_eq!((1, "NOP".to_string()), text(&[0x00]));
        assert_eq!((1, "CCC".to_string()), text(&[0x10]));
        assert_eq!((1, "CCC NZVC".to_string()), text(&[0x1f]));
        assert_eq!((1, "SCC ZC".to_string()), text(&[0x25]));
        assert_eq!((1, "RTS R7".to_string()), text(&[0x77]));
        assert_eq!((1, "RTI".to_string()), text(&[0x78]));
        assert_eq!((1, "HLT".to_string()), text(&[0xf0]));
    }

    #[test]
    fn branches_and_sob() {
        assert_eq!((2, "BR -2".to_string()), text(&[0x30, 0xfe]));
        assert_eq!((2, "BLS 10".to_string()), text(&[0x3e, 0x0a]));
        assert_eq!((2, "SOB R3, 200".to_string()), text(&[0x53, 0xc8]));
    }

    #[test]
    fn every_addressing_mode() {
        assert_eq!((2, "CLR R1".to_string()), text(&[0x80, 0x01]));
        assert_eq!((2, "CLR (R1)+".to_string()), text(&[0x80, 0x09]));
        assert_eq!((2, "CLR -(R1)".to_string()), text(&[0x80, 0x11]));
        assert_eq!((4, "CLR -3(R1)".to_string()), text(&[0x80, 0x19, 0xff, 0xfd]));
        assert_eq!((2, "CLR (R1)".to_string()), text(&[0x80, 0x21]));
        assert_eq!((2, "CLR ((R1)+)".to_string()), text(&[0x80, 0x29]));
        assert_eq!((2, "CLR (-(R1))".to_string()), text(&[0x80, 0x31]));
        assert_eq!((4, "CLR (8(R1))".to_string()), text(&[0x80, 0x39, 0x00, 0x08]));
    }

    #[test]
    fn pc_post_increment_takes_a_word() {
        assert_eq!((4, "JMP 1024".to_string()), text(&[0x40, 0x2f, 0x04, 0x00]));
        assert_eq!((4, "JSR R7, 256".to_string()), text(&[0x67, 0x2f, 0x01, 0x00]));
        // MOV #5, 2(R7)
        assert_eq!((6, "MOV #5, 2(R7)".to_string()),
                   text(&[0x93, 0xdf, 0x00, 0x05, 0x00, 0x02]));
        assert_eq!((2, "TST (R7)".to_string()), text(&[0x85, 0x27]));
    }

    #[test]
    fn two_operand_sizes_add_up() {
        // ADD 4(R2), (100(R3))
        assert_eq!((6, "ADD 4(R2), (100(R3))".to_string()),
                   text(&[0xa6, 0xbb, 0x00, 0x04, 0x00, 0x64]));
        assert_eq!((2, "OR R1, R2".to_string()), text(&[0xe0, 0x42]));
    }

    #[test]
    fn forced_update_partitions_memory() {
        let bus = DummyBus::new(&[0x93, 0xc2, 0x80, 0x00, 0xf0]);
        let mut table = MnemonicTable::new();
        let last = update_mnemonics(&mut table, &bus, 0, true);
        assert_eq!(0xffff, last);
        assert_eq!("MOV #32768, R2", table.text(0));
        assert_eq!(&Cell::Continuation { start: 0 }, table.cell(3));
        assert_eq!("HLT", table.text(4));
        assert_eq!("NOP", table.text(5));
    }

    #[test]
    fn incremental_update_stops_when_converged() {
        let mut bus = DummyBus::new(&[0x00, 0x00, 0x00, 0x00]);
        let mut table = MnemonicTable::new();
        update_mnemonics(&mut table, &bus, 0, true);
        bus.data[1] = 0x80;
        let last = update_mnemonics(&mut table, &bus, 1, false);
        assert_eq!(3, last);
        assert_eq!("CLR R0", table.text(1));
        assert!(table.is_continuation(2));
        assert_eq!("NOP", table.text(3));
    }

    #[test]
    fn instruction_near_top_is_clipped() {
        let mut bus = DummyBus::new(&[]);
        bus.data[0xfffe] = 0x80;
        bus.data[0xffff] = 0x19;
        let mut table = MnemonicTable::new();
        update_mnemonics(&mut table, &bus, 0, true);
        assert_eq!("CLR 0(R1)", table.text(0xfffe));
        assert!(table.is_continuation(0xffff));
        assert!(!table.is_continuation(0));
    }

    fn assert_same_as_forced(table: &MnemonicTable, bus: &DummyBus) {
        let mut fresh = MnemonicTable::new();
        update_mnemonics(&mut fresh, bus, 0, true);
        for adr in 0..=0xffffu16 {
            assert_eq!(fresh.cell(adr), table.cell(adr), "row {:04x}", adr);
        }
    }

    #[test]
    fn low_write_revisits_wrapped_operands() {
        let mut bus = DummyBus::new(&[]);
        let mut table = MnemonicTable::new();
        update_mnemonics(&mut table, &bus, 0, true);

        bus.data[0xffff] = 0x30;
        update_after_write(&mut table, &bus, 0xffff);
        assert_eq!("BR 0", table.text(0xffff));
        bus.data[0x0000] = 0x05;
        update_after_write(&mut table, &bus, 0x0000);
        assert_eq!("BR 5", table.text(0xffff));
        assert_same_as_forced(&table, &bus);

        // CLR d(R1) with its displacement at 0000-0001
        bus.data[0xfffe] = 0x80;
        update_after_write(&mut table, &bus, 0xfffe);
        bus.data[0xffff] = 0x19;
        update_after_write(&mut table, &bus, 0xffff);
        assert_eq!("CLR 1280(R1)", table.text(0xfffe));
        bus.data[0x0001] = 0x07;
        let last = update_after_write(&mut table, &bus, 0x0001);
        assert_eq!("CLR 1287(R1)", table.text(0xfffe));
        assert_eq!(0x0001, last);
        assert_same_as_forced(&table, &bus);
    }

    #[test]
    fn high_write_leaves_top_rows_alone() {
        let mut bus = DummyBus::new(&[]);
        let mut table = MnemonicTable::new();
        update_mnemonics(&mut table, &bus, 0, true);
        bus.data[0x0005] = 0x80;
        assert_eq!(0x0007, update_after_write(&mut table, &bus, 0x0005));
        assert_eq!("CLR R0", table.text(0x0005));
        assert_same_as_forced(&table, &bus);
    }
}
