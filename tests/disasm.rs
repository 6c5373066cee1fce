use cesar::cpu::disasm::{disasm};
use cesar::cpu::{Cell, Cpu, ExecutionResult};

fn snapshot(cpu: &Cpu) -> Vec<Cell> {
    (0..=0xffffu16).map(|adr| cpu.mnemonics().cell(adr).clone()).collect()
}

fn sample() -> Cpu {
    let mut cpu = Cpu::new();
    cpu.set_memory(&[
        0x93, 0xc1, 0x00, 0x03,  // MOV #3, R1
        0x82, 0x00,              // INC R0
        0x51, 0x04,              // SOB R1, 4
        0xa6, 0xbb, 0x00, 0x04, 0x00, 0x64,  // ADD 4(R2), (100(R3))
        0x1f,                    // CCC NZVC
        0xf0,                    // HLT
    ]);
    cpu
}

#[test]
fn forced_pass_is_idempotent() {
    let mut cpu = sample();
    let before = snapshot(&cpu);
    assert_eq!(0xffff, cpu.update_mnemonics(0, true));
    assert_eq!(before, snapshot(&cpu));
    cpu.update_mnemonics(0, true);
    assert_eq!(before, snapshot(&cpu));
}

#[test]
fn listing() {
    let cpu = sample();
    let rows: Vec<(u16, &str)> = cpu.mnemonics().instructions(0, 0x10).collect();
    assert_eq!(vec![
        (0x00, "MOV #3, R1"),
        (0x04, "INC R0"),
        (0x06, "SOB R1, 4"),
        (0x08, "ADD 4(R2), (100(R3))"),
        (0x0e, "CCC NZVC"),
        (0x0f, "HLT"),
        (0x10, "NOP"),
    ], rows);
}

#[test]
fn every_row_belongs_to_an_instruction() {
    let cpu = sample();
    for adr in 0..=0xffffu16 {
        if let Cell::Continuation { start } = cpu.mnemonics().cell(adr) {
            let (sz, _) = disasm(cpu.memory(), *start);
            assert!(*start < adr && (adr as usize) < *start as usize + sz);
        }
    }
}

#[test]
fn instruction_length_matches_execution() {
    let programs: &[&[u8]] = &[
        &[0x00],
        &[0x80, 0x19, 0x00, 0x02],        // CLR 2(R1)
        &[0x85, 0x0f, 0x12, 0x34],        // TST #4660
        &[0x93, 0xdf, 0x00, 0x05, 0x00, 0x02],  // MOV #5, 2(R7)
        &[0xb0, 0x52],                    // SUB R1, -(R2)
        &[0x3f, 0x00],                    // undefined branch code
    ];
    for program in programs {
        let mut cpu = Cpu::new();
        cpu.set_memory(program);
        cpu.set_register(1, 0x4000);
        let (sz, _) = disasm(cpu.memory(), 0);
        assert_eq!(ExecutionResult::Ok.continues(), cpu.execute_next_instruction().continues());
        assert_eq!(sz as u16, cpu.pc(), "{:02x?}", program);
    }
}

#[test]
fn edit_reinterprets_following_bytes() {
    let mut cpu = sample();
    cpu.set_byte(8, 0x00);
    let table = cpu.mnemonics();
    assert_eq!("NOP", table.text(8));
    assert_eq!("SUB ((R4)+), R0", table.text(9));
    assert!(table.is_continuation(10));
    assert_eq!("NOP", table.text(11));
    assert_eq!("NOP", table.text(12));
    assert_eq!("JSR R4, -4096(R7)", table.text(13));
    assert!(table.is_continuation(14));
    assert!(table.is_continuation(16));
    assert_eq!("NOP", table.text(17));
    assert_eq!(17, cpu.last_mnemonic_row());
}

#[test]
fn operand_wrapping_past_top_follows_low_writes() {
    let mut cpu = Cpu::new();
    cpu.set_byte(0xffff, 0x30);
    assert_eq!("BR 0", cpu.mnemonic(0xffff));
    cpu.set_byte(0x0000, 5);
    assert_eq!("BR 5", cpu.mnemonic(0xffff));

    let incremental = snapshot(&cpu);
    cpu.update_mnemonics(0, true);
    assert_eq!(incremental, snapshot(&cpu));
}
