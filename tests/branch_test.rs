//! Branch timing and target tests.
//!
//! A branch costs 2 cycles when not taken, 3 when taken within the same page
//! and 4 when the target lies on a different page than the next instruction.

use sid6502::{FlatMemory, MemoryBus, CPU};

fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

fn branch_at(cpu: &mut CPU<FlatMemory>, pc: u16, opcode: u8, offset: u8) -> u64 {
    cpu.set_pc(pc);
    cpu.memory_mut().write(pc, opcode);
    cpu.memory_mut().write(pc.wrapping_add(1), offset);
    cpu.step_instruction().unwrap()
}

#[test]
fn test_branch_not_taken() {
    let mut cpu = setup_cpu();
    cpu.set_flag_c(true);

    assert_eq!(branch_at(&mut cpu, 0x8000, 0x90, 0x10), 2); // BCC
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_branch_taken_same_page() {
    let mut cpu = setup_cpu();
    cpu.set_flag_c(false);

    assert_eq!(branch_at(&mut cpu, 0x8000, 0x90, 0x10), 3);
    assert_eq!(cpu.pc(), 0x8012);
}

#[test]
fn test_branch_taken_backward_same_page() {
    let mut cpu = setup_cpu();
    cpu.set_flag_z(false);

    assert_eq!(branch_at(&mut cpu, 0x8010, 0xD0, 0xFC), 3); // BNE -4
    assert_eq!(cpu.pc(), 0x800E);
}

#[test]
fn test_branch_taken_crossing_page() {
    let mut cpu = setup_cpu();
    cpu.set_flag_z(true);

    assert_eq!(branch_at(&mut cpu, 0x80F0, 0xF0, 0x20), 4); // BEQ
    assert_eq!(cpu.pc(), 0x8112);
}

#[test]
fn test_branch_page_measured_from_next_instruction() {
    let mut cpu = setup_cpu();
    cpu.set_flag_n(false);

    // Branch opcode at 0x80FE, next instruction at 0x8100, target 0x8100 + 2
    assert_eq!(branch_at(&mut cpu, 0x80FE, 0x10, 0x02), 3); // BPL
    assert_eq!(cpu.pc(), 0x8102);
}

#[test]
fn test_all_branch_conditions() {
    // (opcode, flag setter, value that makes the branch taken)
    let cases: [(u8, fn(&mut CPU<FlatMemory>, bool), bool); 8] = [
        (0x90, CPU::set_flag_c, false),
        (0xB0, CPU::set_flag_c, true),
        (0xD0, CPU::set_flag_z, false),
        (0xF0, CPU::set_flag_z, true),
        (0x10, CPU::set_flag_n, false),
        (0x30, CPU::set_flag_n, true),
        (0x50, CPU::set_flag_v, false),
        (0x70, CPU::set_flag_v, true),
    ];

    for (opcode, set_flag, taken) in cases {
        let mut cpu = setup_cpu();

        set_flag(&mut cpu, taken);
        assert_eq!(branch_at(&mut cpu, 0x8000, opcode, 0x04), 3, "opcode {:02X}", opcode);
        assert_eq!(cpu.pc(), 0x8006);

        set_flag(&mut cpu, !taken);
        assert_eq!(branch_at(&mut cpu, 0x8000, opcode, 0x04), 2, "opcode {:02X}", opcode);
        assert_eq!(cpu.pc(), 0x8002);
    }
}

#[test]
fn test_loop_counts_cycles() {
    let mut cpu = setup_cpu();
    // LDX #$03 ; loop: DEX ; BNE loop ; BRK
    cpu.load(&[0xA2, 0x03, 0xCA, 0xD0, 0xFD, 0x00], 0x8000).unwrap();

    let mut total = 0;
    while !cpu.is_halted() {
        total += cpu.step_instruction().unwrap();
    }

    // LDX 2 + 3 * DEX 2 + 2 taken BNE 3 + 1 untaken BNE 2 + BRK 7
    assert_eq!(total, 2 + 6 + 6 + 2 + 7);
    assert_eq!(cpu.x(), 0);
}
