//! # Undocumented Instructions
//!
//! The subset of NMOS undocumented opcodes that music player routines use.
//!
//! - LAX: load A and X with the same value
//! - SAX: store `A & X`
//! - DCP: DEC memory, then CMP against A
//! - ISC: INC memory, then SBC from A
//! - SLO: ASL memory, then ORA into A
//! - RLA: ROL memory, then AND into A
//! - SRE: LSR memory, then EOR into A
//! - RRA: ROR memory, then ADC into A
//!
//! The read-modify-write fusions perform both side effects atomically and cost
//! a fixed number of cycles per addressing mode, with no page-cross penalty.

use super::alu::{
    add_with_carry, and_accumulator, compare, or_accumulator, subtract_with_carry,
    xor_accumulator,
};
use super::inc_dec::{decrement_memory, increment_memory};
use super::shifts::{rotate_left, rotate_right, shift_left, shift_right};
use super::cost;
use crate::{MemoryBus, CPU, OPCODE_TABLE};

/// LAX: A = X = M. Pays the page-cross penalty like LDA.
pub(crate) fn execute_lax<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.read_operand(metadata.addressing_mode);

    cpu.a = value;
    cpu.x = value;
    cpu.update_zn(value);

    cpu.cycles_remaining = cost(metadata, page_crossed);
}

/// SAX: M = A & X. Flags are not affected.
pub(crate) fn execute_sax<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (addr, _) = cpu.resolve_address(metadata.addressing_mode);

    cpu.memory.write(addr, cpu.a & cpu.x);

    cpu.cycles_remaining = metadata.base_cycles;
}

pub(crate) fn execute_dcp<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (addr, _) = cpu.resolve_address(metadata.addressing_mode);

    let value = decrement_memory(cpu, addr);
    let register = cpu.a;
    compare(cpu, register, value);

    cpu.cycles_remaining = metadata.base_cycles;
}

pub(crate) fn execute_isc<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (addr, _) = cpu.resolve_address(metadata.addressing_mode);

    let value = increment_memory(cpu, addr);
    subtract_with_carry(cpu, value);

    cpu.cycles_remaining = metadata.base_cycles;
}

/// Read-modify-write of the memory operand followed by an accumulator operation.
fn modify_then<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
    modify: fn(&mut CPU<M>, u8) -> u8,
    combine: fn(&mut CPU<M>, u8),
) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (addr, _) = cpu.resolve_address(metadata.addressing_mode);

    let value = cpu.memory.read(addr);
    let result = modify(cpu, value);
    cpu.memory.write(addr, result);
    combine(cpu, result);

    cpu.cycles_remaining = metadata.base_cycles;
}

pub(crate) fn execute_slo<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    modify_then(cpu, opcode, shift_left, or_accumulator);
}

pub(crate) fn execute_rla<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    modify_then(cpu, opcode, rotate_left, and_accumulator);
}

pub(crate) fn execute_sre<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    modify_then(cpu, opcode, shift_right, xor_accumulator);
}

/// RRA: the carry out of the rotate feeds the addition.
pub(crate) fn execute_rra<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    modify_then(cpu, opcode, rotate_right, add_with_carry);
}
