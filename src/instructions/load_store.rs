//! # Load and Store Instructions
//!
//! Loads update Z and N and pay the page-cross penalty on indexed reads.
//! Stores never affect flags and always cost their base cycles.

use super::cost;
use crate::{MemoryBus, CPU, OPCODE_TABLE};

/// Executes the LDA (Load Accumulator) instruction.
pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.read_operand(metadata.addressing_mode);

    cpu.a = value;
    cpu.update_zn(value);

    cpu.cycles_remaining = cost(metadata, page_crossed);
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.read_operand(metadata.addressing_mode);

    cpu.x = value;
    cpu.update_zn(value);

    cpu.cycles_remaining = cost(metadata, page_crossed);
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.read_operand(metadata.addressing_mode);

    cpu.y = value;
    cpu.update_zn(value);

    cpu.cycles_remaining = cost(metadata, page_crossed);
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn execute_sta<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (addr, _) = cpu.resolve_address(metadata.addressing_mode);

    cpu.memory.write(addr, cpu.a);

    cpu.cycles_remaining = metadata.base_cycles;
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (addr, _) = cpu.resolve_address(metadata.addressing_mode);

    cpu.memory.write(addr, cpu.x);

    cpu.cycles_remaining = metadata.base_cycles;
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (addr, _) = cpu.resolve_address(metadata.addressing_mode);

    cpu.memory.write(addr, cpu.y);

    cpu.cycles_remaining = metadata.base_cycles;
}
