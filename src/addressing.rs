//! # Addressing Modes
//!
//! This module defines the 13 addressing modes supported by the 6502 processor.
//! Each mode determines how the CPU interprets operand bytes and calculates
//! effective addresses.

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X register, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y register, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions.
    ///
    /// Example: BEQ label
    Relative,

    /// Full 16-bit address, low byte first.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteY,

    /// Indirect jump through 16-bit pointer. Only used by JMP.
    Indirect,

    /// Indexed indirect: `(operand + X) & 0xFF` then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: zero page dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    /// May incur +1 cycle penalty if page boundary is crossed.
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_bytes() {
        assert_eq!(AddressingMode::Implicit.operand_bytes(), 0);
        assert_eq!(AddressingMode::Accumulator.operand_bytes(), 0);
        assert_eq!(AddressingMode::Immediate.operand_bytes(), 1);
        assert_eq!(AddressingMode::Relative.operand_bytes(), 1);
        assert_eq!(AddressingMode::IndirectY.operand_bytes(), 1);
        assert_eq!(AddressingMode::AbsoluteX.operand_bytes(), 2);
        assert_eq!(AddressingMode::Indirect.operand_bytes(), 2);
    }
}
