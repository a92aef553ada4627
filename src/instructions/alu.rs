//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry
//! - AND, ORA, EOR: Bitwise logic into the accumulator
//! - CMP, CPX, CPY: Register comparisons
//! - BIT: Bit test
//!
//! The decimal flag is ignored; ADC and SBC always operate in binary.

use super::cost;
use crate::{MemoryBus, CPU, OPCODE_TABLE};

/// Adds `value` and the carry flag to the accumulator, updating N, V, Z and C.
///
/// Overflow is set when both inputs share a sign bit and the result's sign
/// bit differs from it.
pub(crate) fn add_with_carry<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a;
    let result16 = a as u16 + value as u16 + cpu.flag_c as u16;
    let result = result16 as u8;

    let sign_a = a >> 7;
    let sign_value = value >> 7;
    let sign_result = result >> 7;

    cpu.flag_c = result16 > 0xFF;
    cpu.flag_v = ((1 ^ (sign_a ^ sign_value)) & (sign_a ^ sign_result)) != 0;
    cpu.a = result;
    cpu.update_zn(result);
}

/// Subtraction is addition of the one's complement of the operand.
pub(crate) fn subtract_with_carry<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    add_with_carry(cpu, value ^ 0xFF);
}

/// Compares a register against `value`, setting N, Z and C. The register is unchanged.
pub(crate) fn compare<M: MemoryBus>(cpu: &mut CPU<M>, register: u8, value: u8) {
    let difference = (register as u16 + 0x100).wrapping_sub(value as u16);

    cpu.flag_n = (difference & 0x80) != 0;
    cpu.flag_z = register == value;
    cpu.flag_c = register >= value;
}

pub(crate) fn and_accumulator<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    cpu.a &= value;
    cpu.update_zn(cpu.a);
}

pub(crate) fn or_accumulator<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    cpu.a |= value;
    cpu.update_zn(cpu.a);
}

pub(crate) fn xor_accumulator<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    cpu.a ^= value;
    cpu.update_zn(cpu.a);
}

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the operand plus the carry flag to the accumulator. Indexed reads
/// cost one extra cycle when they cross a page.
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.read_operand(metadata.addressing_mode);

    add_with_carry(cpu, value);

    cpu.cycles_remaining = cost(metadata, page_crossed);
}

/// Executes the SBC (Subtract with Carry) instruction, including the 0xEB alias.
///
/// Carry clear means "borrow": `A = A - M - (1 - C)`.
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.read_operand(metadata.addressing_mode);

    subtract_with_carry(cpu, value);

    cpu.cycles_remaining = cost(metadata, page_crossed);
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.read_operand(metadata.addressing_mode);

    and_accumulator(cpu, value);

    cpu.cycles_remaining = cost(metadata, page_crossed);
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.read_operand(metadata.addressing_mode);

    or_accumulator(cpu, value);

    cpu.cycles_remaining = cost(metadata, page_crossed);
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.read_operand(metadata.addressing_mode);

    xor_accumulator(cpu, value);

    cpu.cycles_remaining = cost(metadata, page_crossed);
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn execute_cmp<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.read_operand(metadata.addressing_mode);

    let register = cpu.a;
    compare(cpu, register, value);

    cpu.cycles_remaining = cost(metadata, page_crossed);
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, _) = cpu.read_operand(metadata.addressing_mode);

    let register = cpu.x;
    compare(cpu, register, value);

    cpu.cycles_remaining = metadata.base_cycles;
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, _) = cpu.read_operand(metadata.addressing_mode);

    let register = cpu.y;
    compare(cpu, register, value);

    cpu.cycles_remaining = metadata.base_cycles;
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z is set from `A & M`; N and V are copied from bits 7 and 6 of the operand.
/// The accumulator is not modified.
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, _) = cpu.read_operand(metadata.addressing_mode);

    cpu.flag_z = (cpu.a & value) == 0;
    cpu.flag_n = (value & 0x80) != 0;
    cpu.flag_v = (value & 0x40) != 0;

    cpu.cycles_remaining = metadata.base_cycles;
}
