//! # Stack Instructions
//!
//! PHA, PHP, PLA and PLP. The stack lives in page 1 and grows downward:
//! a push writes at `0x0100 + SP` and then decrements SP, a pull increments
//! SP first and then reads.

use crate::{MemoryBus, CPU, OPCODE_TABLE};

/// Bits forced on in a status byte pushed by PHP (B and the unused bit 5).
const PUSHED_STATUS_BITS: u8 = 0b00110000;

/// PHA: Push Accumulator. 3 cycles.
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    cpu.push_byte(cpu.a);
    cpu.cycles_remaining = OPCODE_TABLE[opcode as usize].base_cycles;
}

/// PHP: Push Processor Status with B and bit 5 set. 3 cycles.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let status = cpu.status() | PUSHED_STATUS_BITS;
    cpu.push_byte(status);
    cpu.cycles_remaining = OPCODE_TABLE[opcode as usize].base_cycles;
}

/// PLA: Pull Accumulator, updating Z and N. 4 cycles.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    cpu.a = cpu.pull_byte();
    cpu.update_zn(cpu.a);
    cpu.cycles_remaining = OPCODE_TABLE[opcode as usize].base_cycles;
}

/// PLP: Pull Processor Status. The B flag keeps its current value. 4 cycles.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let status = cpu.pull_byte();
    let flag_b = cpu.flag_b;
    cpu.set_status(status);
    cpu.flag_b = flag_b;
    cpu.cycles_remaining = OPCODE_TABLE[opcode as usize].base_cycles;
}
