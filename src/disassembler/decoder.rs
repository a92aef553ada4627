//! Instruction decoder for the 6502 disassembler

use crate::disassembler::Instruction;
use crate::opcodes::OPCODE_TABLE;

/// Decode a single instruction from a byte slice
///
/// # Arguments
///
/// * `bytes` - The byte slice starting at the instruction to decode
/// * `address` - The memory address of this instruction
///
/// # Returns
///
/// `Some(Instruction)` for a bound opcode with all its operand bytes present,
/// `None` for unbound opcodes or truncated input
pub fn decode_instruction(bytes: &[u8], address: u16) -> Option<Instruction> {
    let (&opcode, rest) = bytes.split_first()?;
    let metadata = &OPCODE_TABLE[opcode as usize];

    if !metadata.implemented() {
        return None;
    }

    let operand_bytes = rest.get(..metadata.operand_bytes() as usize)?.to_vec();

    Some(Instruction {
        address,
        opcode,
        mnemonic: metadata.mnemonic,
        addressing_mode: metadata.addressing_mode,
        operand_bytes,
        size_bytes: metadata.size_bytes,
        base_cycles: metadata.base_cycles,
        reversed_operands: metadata.reversed_operands,
        undocumented: metadata.undocumented,
    })
}
