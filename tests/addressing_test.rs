//! Addressing-mode resolution and page-crossing penalty tests.

use sid6502::{FlatMemory, MemoryBus, CPU};

fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

#[test]
fn test_zero_page_x_wraps() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x007F, 0x33);
    cpu.set_x(0xFF);
    cpu.load(&[0xB5, 0x80], 0x8000).unwrap(); // LDA $80,X

    assert_eq!(cpu.step_instruction().unwrap(), 4);
    assert_eq!(cpu.a(), 0x33);
}

#[test]
fn test_zero_page_y_wraps() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0001, 0x44);
    cpu.set_y(0x02);
    cpu.load(&[0xB6, 0xFF], 0x8000).unwrap(); // LDX $FF,Y

    assert_eq!(cpu.step_instruction().unwrap(), 4);
    assert_eq!(cpu.x(), 0x44);
}

#[test]
fn test_absolute_x_penalty_only_on_cross() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x20FF, 0x01);
    cpu.memory_mut().write(0x2100, 0x02);
    // LDA $20F0,X twice
    cpu.load(&[0xBD, 0xF0, 0x20, 0xBD, 0xF0, 0x20], 0x8000).unwrap();

    cpu.set_x(0x0F);
    assert_eq!(cpu.step_instruction().unwrap(), 4);
    assert_eq!(cpu.a(), 0x01);

    cpu.set_x(0x10);
    assert_eq!(cpu.step_instruction().unwrap(), 5);
    assert_eq!(cpu.a(), 0x02);
}

#[test]
fn test_absolute_y_penalty() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x3001, 0x77);
    cpu.set_y(0x02);
    cpu.load(&[0x59, 0xFF, 0x2F], 0x8000).unwrap(); // EOR $2FFF,Y

    assert_eq!(cpu.step_instruction().unwrap(), 5);
    assert_eq!(cpu.a(), 0x77);
}

#[test]
fn test_indirect_x() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0024, 0x74);
    cpu.memory_mut().write(0x0025, 0x20);
    cpu.memory_mut().write(0x2074, 0x5A);
    cpu.set_x(0x04);
    cpu.load(&[0xA1, 0x20], 0x8000).unwrap(); // LDA ($20,X)

    assert_eq!(cpu.step_instruction().unwrap(), 6);
    assert_eq!(cpu.a(), 0x5A);
}

#[test]
fn test_indirect_x_pointer_wraps_in_zero_page() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x00FF, 0x00);
    cpu.memory_mut().write(0x0000, 0x30);
    cpu.memory_mut().write(0x3000, 0x11);
    cpu.set_x(0x00);
    cpu.load(&[0xA1, 0xFF], 0x8000).unwrap();

    cpu.step_instruction().unwrap();
    assert_eq!(cpu.a(), 0x11);
}

#[test]
fn test_indirect_y_penalty() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0086, 0x28);
    cpu.memory_mut().write(0x0087, 0x40);
    cpu.memory_mut().write(0x4038, 0x99);
    cpu.memory_mut().write(0x4127, 0x66);
    // LDA ($86),Y twice
    cpu.load(&[0xB1, 0x86, 0xB1, 0x86], 0x8000).unwrap();

    cpu.set_y(0x10);
    assert_eq!(cpu.step_instruction().unwrap(), 5);
    assert_eq!(cpu.a(), 0x99);

    cpu.set_y(0xFF);
    assert_eq!(cpu.step_instruction().unwrap(), 6);
    assert_eq!(cpu.a(), 0x66);
}

#[test]
fn test_stores_never_pay_penalty() {
    let mut cpu = setup_cpu();
    cpu.set_a(0xAB);
    cpu.set_x(0xFF);
    cpu.set_y(0xFF);
    // STA $20F0,X ; STA $20F0,Y
    cpu.load(&[0x9D, 0xF0, 0x20, 0x99, 0xF0, 0x20], 0x8000).unwrap();

    assert_eq!(cpu.step_instruction().unwrap(), 5);
    assert_eq!(cpu.step_instruction().unwrap(), 5);
    assert_eq!(cpu.memory().read(0x21EF), 0xAB);
}

#[test]
fn test_read_modify_write_never_pays_penalty() {
    let mut cpu = setup_cpu();
    cpu.set_x(0xFF);
    cpu.memory_mut().write(0x21EF, 0x40);
    cpu.load(&[0x1E, 0xF0, 0x20], 0x8000).unwrap(); // ASL $20F0,X

    assert_eq!(cpu.step_instruction().unwrap(), 7);
    assert_eq!(cpu.memory().read(0x21EF), 0x80);
    assert!(cpu.flag_n());
}

#[test]
fn test_jmp_indirect_page_wrap_bug() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x10FF, 0x34);
    cpu.memory_mut().write(0x1000, 0x12);
    cpu.memory_mut().write(0x1100, 0x56);
    cpu.load(&[0x6C, 0xFF, 0x10], 0x8000).unwrap();

    assert_eq!(cpu.step_instruction().unwrap(), 5);
    assert_eq!(cpu.pc(), 0x1234);
}

#[test]
fn test_jmp_absolute() {
    let mut cpu = setup_cpu();
    cpu.load(&[0x4C, 0x00, 0xC0], 0x8000).unwrap();

    assert_eq!(cpu.step_instruction().unwrap(), 3);
    assert_eq!(cpu.pc(), 0xC000);
}

#[test]
fn test_shift_and_rotate_accumulator() {
    let mut cpu = setup_cpu();
    // SEC ; LDA #$81 ; ROR A ; ROL A ; LSR A
    cpu.load(&[0x38, 0xA9, 0x81, 0x6A, 0x2A, 0x4A], 0x8000).unwrap();

    cpu.step_instruction().unwrap();
    cpu.step_instruction().unwrap();

    assert_eq!(cpu.step_instruction().unwrap(), 2);
    assert_eq!(cpu.a(), 0xC0);
    assert!(cpu.flag_c());

    cpu.step_instruction().unwrap();
    assert_eq!(cpu.a(), 0x81);
    assert!(cpu.flag_c());

    cpu.step_instruction().unwrap();
    assert_eq!(cpu.a(), 0x40);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
}

#[test]
fn test_inc_dec_memory_wrap() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0010, 0xFF);
    cpu.memory_mut().write(0x0011, 0x00);
    // INC $10 ; DEC $11
    cpu.load(&[0xE6, 0x10, 0xC6, 0x11], 0x8000).unwrap();

    assert_eq!(cpu.step_instruction().unwrap(), 5);
    assert_eq!(cpu.memory().read(0x0010), 0x00);
    assert!(cpu.flag_z());

    assert_eq!(cpu.step_instruction().unwrap(), 5);
    assert_eq!(cpu.memory().read(0x0011), 0xFF);
    assert!(cpu.flag_n());
}
