//! # Status Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED and CLV. All are implied-mode, 2 cycles.

use crate::{MemoryBus, CPU, OPCODE_TABLE};

macro_rules! flag_instruction {
    ($name:ident, $flag:ident, $value:expr, $doc:literal) => {
        #[doc = $doc]
        pub(crate) fn $name<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
            cpu.$flag = $value;
            cpu.cycles_remaining = OPCODE_TABLE[opcode as usize].base_cycles;
        }
    };
}

flag_instruction!(execute_clc, flag_c, false, "CLC: Clear Carry Flag.");
flag_instruction!(execute_sec, flag_c, true, "SEC: Set Carry Flag.");
flag_instruction!(execute_cli, flag_i, false, "CLI: Clear Interrupt Disable.");
flag_instruction!(execute_sei, flag_i, true, "SEI: Set Interrupt Disable.");
flag_instruction!(execute_cld, flag_d, false, "CLD: Clear Decimal Mode.");
flag_instruction!(execute_sed, flag_d, true, "SED: Set Decimal Mode (stored only).");
flag_instruction!(execute_clv, flag_v, false, "CLV: Clear Overflow Flag.");
