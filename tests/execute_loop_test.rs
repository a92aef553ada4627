//! Execution loop tests
//!
//! Verifies tick granularity, halting on BRK and the subroutine call helper.

use sid6502::{ExecutionError, FlatMemory, MemoryBus, CPU, RETURN_TRAP};

fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

#[test]
fn test_step_is_one_tick() {
    let mut cpu = setup_cpu();
    cpu.load(&[0xAD, 0x34, 0x12, 0xEA], 0x8000).unwrap(); // LDA $1234 ; NOP

    cpu.step().unwrap();
    assert_eq!(cpu.cycles(), 1);
    assert_eq!(cpu.cycles_remaining(), 3);
    assert_eq!(cpu.pc(), 0x8003);

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.cycles_remaining(), 1);
    // Still inside LDA, the NOP has not been fetched
    assert_eq!(cpu.pc(), 0x8003);

    cpu.step().unwrap();
    assert_eq!(cpu.cycles_remaining(), 0);
    assert_eq!(cpu.cycles(), 4);

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x8004);
}

#[test]
fn test_run_for_cycles_never_overshoots() {
    let mut cpu = setup_cpu();
    // INC $10 (5) ; INC $10 (5)
    cpu.load(&[0xE6, 0x10, 0xE6, 0x10], 0x8000).unwrap();

    assert_eq!(cpu.run_for_cycles(6).unwrap(), 6);
    assert_eq!(cpu.cycles(), 6);
    // The second INC was dispatched on tick 6 and has 4 ticks to go
    assert_eq!(cpu.memory().read(0x0010), 0x02);
    assert_eq!(cpu.cycles_remaining(), 4);

    cpu.run_for_cycles(4).unwrap();
    assert_eq!(cpu.cycles_remaining(), 0);
}

#[test]
fn test_brk_halts_and_costs_seven() {
    let mut cpu = setup_cpu();
    cpu.load(&[0xA9, 0x01, 0x00, 0xA9, 0x02], 0x8000).unwrap();

    cpu.step_instruction().unwrap();
    assert_eq!(cpu.step_instruction().unwrap(), 7);
    assert!(cpu.is_halted());
    assert!(cpu.flag_b());
    assert_eq!(cpu.pc(), 0x8003);

    // Halted ticks do not dispatch
    cpu.run_for_cycles(20).unwrap();
    assert_eq!(cpu.a(), 0x01);

    cpu.clear_break();
    cpu.step_instruction().unwrap();
    assert_eq!(cpu.a(), 0x02);
}

#[test]
fn test_call_runs_routine_until_return() {
    let mut cpu = setup_cpu();
    // 1000: LDX #$04 ; loop: TXA ; STA $D400,X ; DEX ; BNE loop ; RTS
    cpu.load(
        &[0xA2, 0x04, 0x8A, 0x9D, 0x00, 0xD4, 0xCA, 0xD0, 0xF9, 0x60],
        0x1000,
    )
    .unwrap();

    cpu.call(0x1000);
    let mut ticks = 0u64;
    while !cpu.is_halted() {
        cpu.step().unwrap();
        ticks += 1;
    }

    for offset in 1..=4u16 {
        assert_eq!(cpu.memory().read(0xD400 + offset), offset as u8);
    }
    assert_eq!(cpu.memory().read(RETURN_TRAP), 0x00);
    assert_eq!(cpu.pc(), RETURN_TRAP + 1);
    // Halts on the BRK dispatch tick: LDX 2, 4 x (TXA 2 + STA 5 + DEX 2),
    // 3 taken BNE at 3, one untaken at 2, RTS 6, then the BRK tick
    assert_eq!(ticks, 2 + 4 * 9 + 3 * 3 + 2 + 6 + 1);
}

#[test]
fn test_call_with_accumulator_argument() {
    let mut cpu = setup_cpu();
    // 2000: STA $0300 ; RTS
    cpu.load(&[0x8D, 0x00, 0x03, 0x60], 0x2000).unwrap();

    cpu.set_a(0x05);
    cpu.call(0x2000);
    while !cpu.is_halted() {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.memory().read(0x0300), 0x05);
}

#[test]
fn test_illegal_opcode_surfaces_from_step() {
    let mut cpu = setup_cpu();
    cpu.load(&[0xEA, 0xEA, 0x12], 0x8000).unwrap();

    match cpu.run_for_cycles(100) {
        Err(ExecutionError::IllegalOpcode { opcode: 0x12, pc }) => assert_eq!(pc, 0x8002),
        other => panic!("expected illegal opcode error, got {:?}", other),
    }
    assert_eq!(cpu.cycles(), 4);
}
