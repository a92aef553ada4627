//! Opcode table and cycle accounting tests.
//!
//! Every bound, non-branch opcode is executed once from a zeroed memory image
//! with X = Y = 0, so no index can cross a page and the measured cost must
//! equal the published NMOS cycle count for that opcode.

use sid6502::{AddressingMode, FlatMemory, MemoryBus, CPU, OPCODE_TABLE};

fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

/// NMOS 6502 cycle counts without page-cross or branch penalties, indexed
/// by opcode. Zero marks the JAM opcodes that halt the chip.
#[rustfmt::skip]
const NMOS_CYCLES: [u8; 256] = [
    // 0  1  2  3  4  5  6  7  8  9  A  B  C  D  E  F
       7, 6, 0, 8, 3, 3, 5, 5, 3, 2, 2, 2, 4, 4, 6, 6, // 0x00
       2, 5, 0, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // 0x10
       6, 6, 0, 8, 3, 3, 5, 5, 4, 2, 2, 2, 4, 4, 6, 6, // 0x20
       2, 5, 0, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // 0x30
       6, 6, 0, 8, 3, 3, 5, 5, 3, 2, 2, 2, 3, 4, 6, 6, // 0x40
       2, 5, 0, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // 0x50
       6, 6, 0, 8, 3, 3, 5, 5, 4, 2, 2, 2, 5, 4, 6, 6, // 0x60
       2, 5, 0, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // 0x70
       2, 6, 2, 6, 3, 3, 3, 3, 2, 2, 2, 2, 4, 4, 4, 4, // 0x80
       2, 6, 0, 6, 4, 4, 4, 4, 2, 5, 2, 5, 5, 5, 5, 5, // 0x90
       2, 6, 2, 6, 3, 3, 3, 3, 2, 2, 2, 2, 4, 4, 4, 4, // 0xA0
       2, 5, 0, 5, 4, 4, 4, 4, 2, 4, 2, 4, 4, 4, 4, 4, // 0xB0
       2, 6, 2, 8, 3, 3, 5, 5, 2, 2, 2, 2, 4, 4, 6, 6, // 0xC0
       2, 5, 0, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // 0xD0
       2, 6, 2, 8, 3, 3, 5, 5, 2, 2, 2, 2, 4, 4, 6, 6, // 0xE0
       2, 5, 0, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // 0xF0
];

#[test]
fn test_opcode_table_completeness() {
    assert_eq!(OPCODE_TABLE.len(), 256);

    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        assert!(!metadata.mnemonic.is_empty(), "opcode 0x{:02X}", opcode);
        assert!(
            (1..=3).contains(&metadata.size_bytes),
            "opcode 0x{:02X} has size {}",
            opcode,
            metadata.size_bytes
        );
        assert_eq!(
            metadata.operand_bytes(),
            metadata.addressing_mode.operand_bytes(),
            "opcode 0x{:02X}",
            opcode
        );
        if metadata.implemented() {
            assert!(metadata.base_cycles >= 2, "opcode 0x{:02X}", opcode);
        }
    }
}

#[test]
fn test_table_matches_nmos_cycle_counts() {
    let mut bound = 0;
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if !metadata.implemented() {
            continue;
        }
        bound += 1;

        assert_ne!(NMOS_CYCLES[opcode], 0, "JAM opcode 0x{:02X} is bound", opcode);
        assert_eq!(
            metadata.base_cycles, NMOS_CYCLES[opcode],
            "{} (0x{:02X}) {:?}",
            metadata.mnemonic, opcode, metadata.addressing_mode
        );
    }
    assert_eq!(bound, 231);
}

#[test]
fn test_base_cycles_for_every_bound_opcode() {
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if !metadata.implemented() || metadata.addressing_mode == AddressingMode::Relative {
            continue;
        }

        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, opcode as u8);

        let cost = cpu.step_instruction().unwrap();
        assert_eq!(
            cost, NMOS_CYCLES[opcode] as u64,
            "{} (0x{:02X}) {:?}",
            metadata.mnemonic, opcode, metadata.addressing_mode
        );
    }
}

#[test]
fn test_pc_advances_by_instruction_size() {
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if !metadata.implemented()
            || metadata.addressing_mode == AddressingMode::Relative
            || matches!(metadata.mnemonic, "JMP" | "JSR" | "RTS" | "RTI" | "BRK")
        {
            continue;
        }

        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, opcode as u8);
        cpu.step_instruction().unwrap();

        assert_eq!(
            cpu.pc(),
            0x8000 + metadata.size_bytes as u16,
            "{} (0x{:02X})",
            metadata.mnemonic,
            opcode
        );
    }
}

#[test]
fn test_cycles_accumulate_across_instructions() {
    let mut cpu = setup_cpu();
    // LDA #$01 (2) ; STA $D400 (4) ; INC $D400 (6) ; PHA (3) ; PLA (4)
    cpu.load(
        &[0xA9, 0x01, 0x8D, 0x00, 0xD4, 0xEE, 0x00, 0xD4, 0x48, 0x68],
        0x8000,
    )
    .unwrap();

    for _ in 0..5 {
        cpu.step_instruction().unwrap();
    }

    assert_eq!(cpu.cycles(), 2 + 4 + 6 + 3 + 4);
    assert_eq!(cpu.memory().read(0xD400), 0x02);
}
