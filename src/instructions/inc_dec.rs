//! # Increment and Decrement Instructions
//!
//! INC and DEC operate on memory (read-modify-write, no page-cross penalty);
//! INX, INY, DEX and DEY operate on the index registers. All wrap at 8 bits
//! and update Z and N.

use crate::{MemoryBus, CPU, OPCODE_TABLE};

/// Increments the byte at `addr` and returns the new value.
pub(crate) fn increment_memory<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) -> u8 {
    let result = cpu.memory.read(addr).wrapping_add(1);
    cpu.memory.write(addr, result);
    cpu.update_zn(result);
    result
}

/// Decrements the byte at `addr` and returns the new value.
pub(crate) fn decrement_memory<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) -> u8 {
    let result = cpu.memory.read(addr).wrapping_sub(1);
    cpu.memory.write(addr, result);
    cpu.update_zn(result);
    result
}

pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (addr, _) = cpu.resolve_address(metadata.addressing_mode);

    increment_memory(cpu, addr);

    cpu.cycles_remaining = metadata.base_cycles;
}

pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (addr, _) = cpu.resolve_address(metadata.addressing_mode);

    decrement_memory(cpu, addr);

    cpu.cycles_remaining = metadata.base_cycles;
}

pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.update_zn(cpu.x);
    cpu.cycles_remaining = OPCODE_TABLE[opcode as usize].base_cycles;
}

pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.update_zn(cpu.y);
    cpu.cycles_remaining = OPCODE_TABLE[opcode as usize].base_cycles;
}

pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.update_zn(cpu.x);
    cpu.cycles_remaining = OPCODE_TABLE[opcode as usize].base_cycles;
}

pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.update_zn(cpu.y);
    cpu.cycles_remaining = OPCODE_TABLE[opcode as usize].base_cycles;
}
