//! Formatting functions for disassembled instructions

use crate::addressing::AddressingMode;
use crate::disassembler::Instruction;

/// Format a single instruction as assembly text
///
/// Undocumented opcodes keep their conventional mnemonics (`LAX`, `DCP`, ...);
/// unbound bytes render as `.byte $XX`.
pub fn format_instruction(instr: &Instruction) -> String {
    let operand = format_operand(instr);

    if operand.is_empty() {
        instr.mnemonic.to_string()
    } else {
        format!("{} {}", instr.mnemonic, operand)
    }
}

/// Format the raw bytes of an instruction as a hex column, e.g. `8D 18 D4`.
pub fn format_hex(instr: &Instruction) -> String {
    std::iter::once(instr.opcode)
        .chain(instr.operand_bytes.iter().copied())
        .map(|byte| format!("{:02X}", byte))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Operand digits in display order.
///
/// Two-byte operands are stored low byte first; the table marks them as
/// reversed so they print as a single big-endian word.
fn operand_digits(instr: &Instruction) -> String {
    match instr.operand_bytes.as_slice() {
        [] => String::new(),
        [byte] => format!("{:02X}", byte),
        [lo, hi] if instr.reversed_operands => format!("{:02X}{:02X}", hi, lo),
        [first, second] => format!("{:02X}{:02X}", first, second),
        _ => unreachable!("instructions carry at most two operand bytes"),
    }
}

/// Format the operand based on addressing mode
fn format_operand(instr: &Instruction) -> String {
    use AddressingMode::*;

    if instr.mnemonic == ".byte" {
        return format!("${:02X}", instr.opcode);
    }

    let digits = operand_digits(instr);

    match instr.addressing_mode {
        Implicit => String::new(),
        Accumulator => "A".to_string(),
        Immediate => format!("#${}", digits),
        ZeroPage | Absolute => format!("${}", digits),
        ZeroPageX | AbsoluteX => format!("${},X", digits),
        ZeroPageY | AbsoluteY => format!("${},Y", digits),
        Indirect => format!("(${})", digits),
        IndirectX => format!("(${},X)", digits),
        IndirectY => format!("(${}),Y", digits),
        Relative => {
            let offset = instr.operand_bytes.first().copied().unwrap_or(0) as i8;
            let target = instr
                .address
                .wrapping_add(instr.size_bytes as u16)
                .wrapping_add_signed(offset as i16);
            format!("${:04X}", target)
        }
    }
}
