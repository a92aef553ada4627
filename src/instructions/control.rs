//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - BRK: Terminal break
//! - JMP: Jump to address
//! - JSR / RTS: Subroutine call and return
//! - RTI: Return from interrupt
//! - NOP: No operation, including the undocumented multi-byte forms
//!
//! BRK does not vector through $FFFE here. Player routines are run to
//! completion, so BRK sets the B flag and halts dispatch until the driver
//! clears the break condition.

use super::cost;
use crate::{AddressingMode, MemoryBus, CPU, OPCODE_TABLE};

/// Executes the BRK instruction.
///
/// Sets B, halts the CPU and costs 7 cycles. PC is left pointing after the
/// opcode so a trace shows where the break happened.
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    cpu.flag_b = true;
    cpu.halted = true;
    log::trace!("BRK at ${:04X}, halting", cpu.pc.wrapping_sub(1));

    cpu.cycles_remaining = metadata.base_cycles;
}

/// Executes the JMP (Jump) instruction.
///
/// Addressing modes:
/// - Absolute (0x4C): 3 cycles
/// - Indirect (0x6C): 5 cycles
///
/// Note: the indirect form reproduces the NMOS page-wrap bug. If the pointer's
/// low byte is 0xFF, the high byte of the target is read from the start of the
/// same page. For example, JMP ($10FF) reads from $10FF and $1000 (not $1100).
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let target_address = match metadata.addressing_mode {
        AddressingMode::Indirect => {
            let ptr = cpu.fetch_word();

            let target_lo = cpu.memory.read(ptr) as u16;
            let target_hi_addr = if (ptr & 0xFF) == 0xFF {
                ptr & 0xFF00
            } else {
                ptr.wrapping_add(1)
            };
            let target_hi = cpu.memory.read(target_hi_addr) as u16;

            (target_hi << 8) | target_lo
        }
        _ => cpu.fetch_word(),
    };

    cpu.pc = target_address;
    cpu.cycles_remaining = metadata.base_cycles;
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last byte of the JSR (return address minus one),
/// high byte first, then jumps. 6 cycles.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let target = cpu.fetch_word();
    let return_address = cpu.pc.wrapping_sub(1);

    cpu.push_byte((return_address >> 8) as u8);
    cpu.push_byte((return_address & 0xFF) as u8);

    cpu.pc = target;
    cpu.cycles_remaining = metadata.base_cycles;
}

/// Executes the RTS (Return from Subroutine) instruction.
///
/// Pulls the return address (low byte first) and adds one. 6 cycles.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let lo = cpu.pull_byte() as u16;
    let hi = cpu.pull_byte() as u16;

    cpu.pc = ((hi << 8) | lo).wrapping_add(1);
    cpu.cycles_remaining = metadata.base_cycles;
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the status register (B is not restored), then PC. Unlike RTS the
/// pulled address is used as-is. 6 cycles.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let status = cpu.pull_byte();
    let flag_b = cpu.flag_b;
    cpu.set_status(status);
    cpu.flag_b = flag_b;

    let lo = cpu.pull_byte() as u16;
    let hi = cpu.pull_byte() as u16;

    cpu.pc = (hi << 8) | lo;
    cpu.cycles_remaining = metadata.base_cycles;
}

/// Executes NOP in all its forms.
///
/// The undocumented variants still consume their operand bytes and perform
/// the dummy read, and the absolute,X forms pay the page-cross penalty.
pub(crate) fn execute_nop<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let page_crossed = match metadata.addressing_mode {
        AddressingMode::Implicit => false,
        mode => cpu.read_operand(mode).1,
    };

    cpu.cycles_remaining = cost(metadata, page_crossed);
}
