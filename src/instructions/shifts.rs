//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Each works on the accumulator or on memory. Memory forms are
//! read-modify-write and have no page-cross penalty.

use crate::{AddressingMode, MemoryBus, CPU, OPCODE_TABLE};

pub(crate) fn shift_left<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) -> u8 {
    cpu.flag_c = (value & 0x80) != 0;
    let result = value << 1;
    cpu.update_zn(result);
    result
}

pub(crate) fn shift_right<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) -> u8 {
    cpu.flag_c = (value & 0x01) != 0;
    let result = value >> 1;
    cpu.update_zn(result);
    result
}

pub(crate) fn rotate_left<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) -> u8 {
    let carry_in = cpu.flag_c as u8;
    cpu.flag_c = (value & 0x80) != 0;
    let result = (value << 1) | carry_in;
    cpu.update_zn(result);
    result
}

pub(crate) fn rotate_right<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) -> u8 {
    let carry_in = (cpu.flag_c as u8) << 7;
    cpu.flag_c = (value & 0x01) != 0;
    let result = (value >> 1) | carry_in;
    cpu.update_zn(result);
    result
}

/// Applies `operation` to the accumulator or to the memory operand.
fn shift_with<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
    operation: fn(&mut CPU<M>, u8) -> u8,
) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    if metadata.addressing_mode == AddressingMode::Accumulator {
        let value = cpu.a;
        cpu.a = operation(cpu, value);
    } else {
        let (addr, _) = cpu.resolve_address(metadata.addressing_mode);
        let value = cpu.memory.read(addr);
        let result = operation(cpu, value);
        cpu.memory.write(addr, result);
    }

    cpu.cycles_remaining = metadata.base_cycles;
}

pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    shift_with(cpu, opcode, shift_left);
}

pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    shift_with(cpu, opcode, shift_right);
}

pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    shift_with(cpu, opcode, rotate_left);
}

pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    shift_with(cpu, opcode, rotate_right);
}
