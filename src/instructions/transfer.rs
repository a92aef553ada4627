//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA and TSX update Z and N from the copied value.
//! TXS does not touch any flag.

use crate::{MemoryBus, CPU, OPCODE_TABLE};

pub(crate) fn execute_tax<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    cpu.x = cpu.a;
    cpu.update_zn(cpu.x);
    cpu.cycles_remaining = OPCODE_TABLE[opcode as usize].base_cycles;
}

pub(crate) fn execute_tay<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    cpu.y = cpu.a;
    cpu.update_zn(cpu.y);
    cpu.cycles_remaining = OPCODE_TABLE[opcode as usize].base_cycles;
}

pub(crate) fn execute_txa<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    cpu.a = cpu.x;
    cpu.update_zn(cpu.a);
    cpu.cycles_remaining = OPCODE_TABLE[opcode as usize].base_cycles;
}

pub(crate) fn execute_tya<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    cpu.a = cpu.y;
    cpu.update_zn(cpu.a);
    cpu.cycles_remaining = OPCODE_TABLE[opcode as usize].base_cycles;
}

pub(crate) fn execute_tsx<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    cpu.x = cpu.sp;
    cpu.update_zn(cpu.x);
    cpu.cycles_remaining = OPCODE_TABLE[opcode as usize].base_cycles;
}

pub(crate) fn execute_txs<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    cpu.sp = cpu.x;
    cpu.cycles_remaining = OPCODE_TABLE[opcode as usize].base_cycles;
}
