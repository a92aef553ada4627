//! 6502 Disassembler Module
//!
//! Converts machine code into assembly text using the opcode table. The CPU
//! uses it for per-instruction trace logging and drivers use it to show
//! context around a failing program counter.

pub mod decoder;
pub mod formatter;

pub use decoder::decode_instruction;
pub use formatter::{format_hex, format_instruction};

use crate::addressing::AddressingMode;

/// A single disassembled instruction with full metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// Instruction mnemonic (e.g., "LDA", "DCP"), ".byte" for unbound opcodes
    pub mnemonic: &'static str,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,

    /// Operand bytes in memory order (0-2 bytes depending on addressing mode)
    pub operand_bytes: Vec<u8>,

    /// Total size in bytes (1-3 bytes: opcode + operands)
    pub size_bytes: u8,

    /// Base cycle cost (excluding page-crossing penalties)
    pub base_cycles: u8,

    /// Operand bytes form one word that is displayed high byte first
    pub reversed_operands: bool,

    /// Opcode is outside the official instruction set
    pub undocumented: bool,
}

impl Instruction {
    /// Placeholder for a byte whose opcode slot is unbound.
    fn data_byte(address: u16, value: u8) -> Self {
        Self {
            address,
            opcode: value,
            mnemonic: ".byte",
            addressing_mode: AddressingMode::Implicit,
            operand_bytes: Vec::new(),
            size_bytes: 1,
            base_cycles: 0,
            reversed_operands: false,
            undocumented: false,
        }
    }
}

/// Disassemble a byte slice into a vector of instructions
///
/// Unbound opcodes and truncated trailing instructions become one-byte
/// `.byte` entries, so every input byte is accounted for.
///
/// # Examples
///
/// ```
/// use sid6502::disassembler::{disassemble, format_instruction};
///
/// let code = [0xA9, 0x0F, 0x8D, 0x18, 0xD4, 0x02];
/// let lines: Vec<String> = disassemble(&code, 0x1000)
///     .iter()
///     .map(format_instruction)
///     .collect();
///
/// assert_eq!(lines, vec!["LDA #$0F", "STA $D418", ".byte $02"]);
/// ```
pub fn disassemble(bytes: &[u8], start_address: u16) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut offset = 0;
    let mut address = start_address;

    while offset < bytes.len() {
        let instr = decode_instruction(&bytes[offset..], address)
            .unwrap_or_else(|| Instruction::data_byte(address, bytes[offset]));

        offset += instr.size_bytes as usize;
        address = address.wrapping_add(instr.size_bytes as u16);
        instructions.push(instr);
    }

    instructions
}
