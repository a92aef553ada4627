//! # Branch Instructions
//!
//! All eight conditional branches share one implementation. They read a
//! signed 8-bit offset relative to the address of the next instruction.
//!
//! Cycle timing:
//! - 2 cycles if branch not taken
//! - 3 cycles if branch taken to the same page
//! - 4 cycles if branch taken to a different page

use crate::{MemoryBus, CPU, OPCODE_TABLE};

fn branch<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8, condition: bool) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let offset = cpu.fetch_byte() as i8;

    // PC now points at the next instruction
    let pc_after_instruction = cpu.pc;
    let mut cycles = metadata.base_cycles;

    if condition {
        let target_pc = pc_after_instruction.wrapping_add_signed(offset as i16);

        cycles += 1;
        if (pc_after_instruction & 0xFF00) != (target_pc & 0xFF00) {
            cycles += 1;
        }

        cpu.pc = target_pc;
    }

    cpu.cycles_remaining = cycles;
}

/// BCC: Branch if Carry Clear.
pub(crate) fn execute_bcc<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let condition = !cpu.flag_c;
    branch(cpu, opcode, condition);
}

/// BCS: Branch if Carry Set.
pub(crate) fn execute_bcs<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let condition = cpu.flag_c;
    branch(cpu, opcode, condition);
}

/// BEQ: Branch if Equal (Z set).
pub(crate) fn execute_beq<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let condition = cpu.flag_z;
    branch(cpu, opcode, condition);
}

/// BNE: Branch if Not Equal (Z clear).
pub(crate) fn execute_bne<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let condition = !cpu.flag_z;
    branch(cpu, opcode, condition);
}

/// BMI: Branch if Minus (N set).
pub(crate) fn execute_bmi<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let condition = cpu.flag_n;
    branch(cpu, opcode, condition);
}

/// BPL: Branch if Positive (N clear).
pub(crate) fn execute_bpl<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let condition = !cpu.flag_n;
    branch(cpu, opcode, condition);
}

/// BVC: Branch if Overflow Clear.
pub(crate) fn execute_bvc<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let condition = !cpu.flag_v;
    branch(cpu, opcode, condition);
}

/// BVS: Branch if Overflow Set.
pub(crate) fn execute_bvs<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let condition = cpu.flag_v;
    branch(cpu, opcode, condition);
}
