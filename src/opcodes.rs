//! # Opcode Metadata Table
//!
//! This module contains the 256-entry opcode table that serves as the single
//! source of truth for instruction decoding, dispatch, timing and disassembly.
//!
//! The table covers:
//! - **151 documented instructions** - Official NMOS 6502 opcodes
//! - **Undocumented opcodes used by player routines** - multi-byte NOPs, LAX,
//!   SAX, the 0xEB SBC alias and the read-modify-write fusions DCP, ISC, SLO,
//!   RLA, SRE and RRA
//! - **Unbound slots** - marked with the "???" mnemonic and no operation
//!
//! The table is built once at compile time and is immutable.

use crate::addressing::AddressingMode;

/// The handler an opcode is bound to.
///
/// Each variant names one instruction; addressing mode and timing come from
/// the table entry, so the same operation serves every opcode that shares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    // Undocumented
    Dcp,
    Isc,
    Lax,
    Rla,
    Rra,
    Sax,
    Slo,
    Sre,
}

/// Metadata for a single 6502 opcode.
///
/// # Fields
///
/// - `mnemonic`: Three-letter instruction name ("???" for unbound slots)
/// - `operation`: Bound handler, `None` for unbound slots
/// - `addressing_mode`: How the instruction interprets operand bytes
/// - `base_cycles`: Cycle cost before page-crossing or branch penalties
/// - `size_bytes`: Total instruction size including opcode and operands (1-3 bytes)
/// - `reversed_operands`: Disassembly prints the operand bytes high byte first
/// - `undocumented`: Opcode is outside the official instruction set
///
/// # Examples
///
/// ```
/// use sid6502::{AddressingMode, Operation, OPCODE_TABLE};
///
/// let lda_imm = &OPCODE_TABLE[0xA9];
/// assert_eq!(lda_imm.mnemonic, "LDA");
/// assert_eq!(lda_imm.operation, Some(Operation::Lda));
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic (e.g., "LDA", "DCP", "???" for unbound slots).
    pub mnemonic: &'static str,

    /// Operation this opcode dispatches to.
    pub operation: Option<Operation>,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Base cycle cost (before page crossing or branch penalties).
    pub base_cycles: u8,

    /// Total instruction size in bytes (opcode + operands).
    pub size_bytes: u8,

    /// Whether disassembly shows the two operand bytes in reversed (big-endian) order.
    pub reversed_operands: bool,

    /// Whether this opcode belongs to the undocumented set.
    pub undocumented: bool,
}

impl OpcodeMetadata {
    /// Returns true if this slot is bound to a handler.
    pub const fn implemented(&self) -> bool {
        self.operation.is_some()
    }

    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(&self) -> u8 {
        self.size_bytes - 1
    }
}

const UNBOUND: OpcodeMetadata = OpcodeMetadata {
    mnemonic: "???",
    operation: None,
    addressing_mode: AddressingMode::Implicit,
    base_cycles: 0,
    size_bytes: 1,
    reversed_operands: false,
    undocumented: false,
};

const fn op(
    mnemonic: &'static str,
    operation: Operation,
    addressing_mode: AddressingMode,
    base_cycles: u8,
) -> OpcodeMetadata {
    let operands = addressing_mode.operand_bytes();
    OpcodeMetadata {
        mnemonic,
        operation: Some(operation),
        addressing_mode,
        base_cycles,
        size_bytes: 1 + operands,
        reversed_operands: operands == 2,
        undocumented: false,
    }
}

const fn undoc(
    mnemonic: &'static str,
    operation: Operation,
    addressing_mode: AddressingMode,
    base_cycles: u8,
) -> OpcodeMetadata {
    let mut metadata = op(mnemonic, operation, addressing_mode, base_cycles);
    metadata.undocumented = true;
    metadata
}

/// Complete 256-entry opcode table indexed by opcode byte value.
///
/// # Examples
///
/// ```
/// use sid6502::OPCODE_TABLE;
///
/// let brk = &OPCODE_TABLE[0x00];
/// assert_eq!(brk.mnemonic, "BRK");
/// assert_eq!(brk.base_cycles, 7);
///
/// // JAM opcodes stay unbound
/// let jam = &OPCODE_TABLE[0x02];
/// assert_eq!(jam.mnemonic, "???");
/// assert!(!jam.implemented());
/// ```
pub static OPCODE_TABLE: [OpcodeMetadata; 256] = build_table();

const fn build_table() -> [OpcodeMetadata; 256] {
    use AddressingMode::*;
    use Operation::*;

    let mut t = [UNBOUND; 256];

    // ADC
    t[0x69] = op("ADC", Adc, Immediate, 2);
    t[0x65] = op("ADC", Adc, ZeroPage, 3);
    t[0x75] = op("ADC", Adc, ZeroPageX, 4);
    t[0x6D] = op("ADC", Adc, Absolute, 4);
    t[0x7D] = op("ADC", Adc, AbsoluteX, 4);
    t[0x79] = op("ADC", Adc, AbsoluteY, 4);
    t[0x61] = op("ADC", Adc, IndirectX, 6);
    t[0x71] = op("ADC", Adc, IndirectY, 5);

    // AND
    t[0x29] = op("AND", And, Immediate, 2);
    t[0x25] = op("AND", And, ZeroPage, 3);
    t[0x35] = op("AND", And, ZeroPageX, 4);
    t[0x2D] = op("AND", And, Absolute, 4);
    t[0x3D] = op("AND", And, AbsoluteX, 4);
    t[0x39] = op("AND", And, AbsoluteY, 4);
    t[0x21] = op("AND", And, IndirectX, 6);
    t[0x31] = op("AND", And, IndirectY, 5);

    // ASL
    t[0x0A] = op("ASL", Asl, Accumulator, 2);
    t[0x06] = op("ASL", Asl, ZeroPage, 5);
    t[0x16] = op("ASL", Asl, ZeroPageX, 6);
    t[0x0E] = op("ASL", Asl, Absolute, 6);
    t[0x1E] = op("ASL", Asl, AbsoluteX, 7);

    // Branches
    t[0x90] = op("BCC", Bcc, Relative, 2);
    t[0xB0] = op("BCS", Bcs, Relative, 2);
    t[0xF0] = op("BEQ", Beq, Relative, 2);
    t[0x30] = op("BMI", Bmi, Relative, 2);
    t[0xD0] = op("BNE", Bne, Relative, 2);
    t[0x10] = op("BPL", Bpl, Relative, 2);
    t[0x50] = op("BVC", Bvc, Relative, 2);
    t[0x70] = op("BVS", Bvs, Relative, 2);

    // BIT
    t[0x24] = op("BIT", Bit, ZeroPage, 3);
    t[0x2C] = op("BIT", Bit, Absolute, 4);

    // BRK
    t[0x00] = op("BRK", Brk, Implicit, 7);

    // Flag operations
    t[0x18] = op("CLC", Clc, Implicit, 2);
    t[0xD8] = op("CLD", Cld, Implicit, 2);
    t[0x58] = op("CLI", Cli, Implicit, 2);
    t[0xB8] = op("CLV", Clv, Implicit, 2);
    t[0x38] = op("SEC", Sec, Implicit, 2);
    t[0xF8] = op("SED", Sed, Implicit, 2);
    t[0x78] = op("SEI", Sei, Implicit, 2);

    // CMP
    t[0xC9] = op("CMP", Cmp, Immediate, 2);
    t[0xC5] = op("CMP", Cmp, ZeroPage, 3);
    t[0xD5] = op("CMP", Cmp, ZeroPageX, 4);
    t[0xCD] = op("CMP", Cmp, Absolute, 4);
    t[0xDD] = op("CMP", Cmp, AbsoluteX, 4);
    t[0xD9] = op("CMP", Cmp, AbsoluteY, 4);
    t[0xC1] = op("CMP", Cmp, IndirectX, 6);
    t[0xD1] = op("CMP", Cmp, IndirectY, 5);

    // CPX / CPY
    t[0xE0] = op("CPX", Cpx, Immediate, 2);
    t[0xE4] = op("CPX", Cpx, ZeroPage, 3);
    t[0xEC] = op("CPX", Cpx, Absolute, 4);
    t[0xC0] = op("CPY", Cpy, Immediate, 2);
    t[0xC4] = op("CPY", Cpy, ZeroPage, 3);
    t[0xCC] = op("CPY", Cpy, Absolute, 4);

    // DEC / DEX / DEY
    t[0xC6] = op("DEC", Dec, ZeroPage, 5);
    t[0xD6] = op("DEC", Dec, ZeroPageX, 6);
    t[0xCE] = op("DEC", Dec, Absolute, 6);
    t[0xDE] = op("DEC", Dec, AbsoluteX, 7);
    t[0xCA] = op("DEX", Dex, Implicit, 2);
    t[0x88] = op("DEY", Dey, Implicit, 2);

    // EOR
    t[0x49] = op("EOR", Eor, Immediate, 2);
    t[0x45] = op("EOR", Eor, ZeroPage, 3);
    t[0x55] = op("EOR", Eor, ZeroPageX, 4);
    t[0x4D] = op("EOR", Eor, Absolute, 4);
    t[0x5D] = op("EOR", Eor, AbsoluteX, 4);
    t[0x59] = op("EOR", Eor, AbsoluteY, 4);
    t[0x41] = op("EOR", Eor, IndirectX, 6);
    t[0x51] = op("EOR", Eor, IndirectY, 5);

    // INC / INX / INY
    t[0xE6] = op("INC", Inc, ZeroPage, 5);
    t[0xF6] = op("INC", Inc, ZeroPageX, 6);
    t[0xEE] = op("INC", Inc, Absolute, 6);
    t[0xFE] = op("INC", Inc, AbsoluteX, 7);
    t[0xE8] = op("INX", Inx, Implicit, 2);
    t[0xC8] = op("INY", Iny, Implicit, 2);

    // JMP / JSR
    t[0x4C] = op("JMP", Jmp, Absolute, 3);
    t[0x6C] = op("JMP", Jmp, Indirect, 5);
    t[0x20] = op("JSR", Jsr, Absolute, 6);

    // LDA
    t[0xA9] = op("LDA", Lda, Immediate, 2);
    t[0xA5] = op("LDA", Lda, ZeroPage, 3);
    t[0xB5] = op("LDA", Lda, ZeroPageX, 4);
    t[0xAD] = op("LDA", Lda, Absolute, 4);
    t[0xBD] = op("LDA", Lda, AbsoluteX, 4);
    t[0xB9] = op("LDA", Lda, AbsoluteY, 4);
    t[0xA1] = op("LDA", Lda, IndirectX, 6);
    t[0xB1] = op("LDA", Lda, IndirectY, 5);

    // LDX
    t[0xA2] = op("LDX", Ldx, Immediate, 2);
    t[0xA6] = op("LDX", Ldx, ZeroPage, 3);
    t[0xB6] = op("LDX", Ldx, ZeroPageY, 4);
    t[0xAE] = op("LDX", Ldx, Absolute, 4);
    t[0xBE] = op("LDX", Ldx, AbsoluteY, 4);

    // LDY
    t[0xA0] = op("LDY", Ldy, Immediate, 2);
    t[0xA4] = op("LDY", Ldy, ZeroPage, 3);
    t[0xB4] = op("LDY", Ldy, ZeroPageX, 4);
    t[0xAC] = op("LDY", Ldy, Absolute, 4);
    t[0xBC] = op("LDY", Ldy, AbsoluteX, 4);

    // LSR
    t[0x4A] = op("LSR", Lsr, Accumulator, 2);
    t[0x46] = op("LSR", Lsr, ZeroPage, 5);
    t[0x56] = op("LSR", Lsr, ZeroPageX, 6);
    t[0x4E] = op("LSR", Lsr, Absolute, 6);
    t[0x5E] = op("LSR", Lsr, AbsoluteX, 7);

    // NOP
    t[0xEA] = op("NOP", Nop, Implicit, 2);

    // ORA
    t[0x09] = op("ORA", Ora, Immediate, 2);
    t[0x05] = op("ORA", Ora, ZeroPage, 3);
    t[0x15] = op("ORA", Ora, ZeroPageX, 4);
    t[0x0D] = op("ORA", Ora, Absolute, 4);
    t[0x1D] = op("ORA", Ora, AbsoluteX, 4);
    t[0x19] = op("ORA", Ora, AbsoluteY, 4);
    t[0x01] = op("ORA", Ora, IndirectX, 6);
    t[0x11] = op("ORA", Ora, IndirectY, 5);

    // Stack
    t[0x48] = op("PHA", Pha, Implicit, 3);
    t[0x08] = op("PHP", Php, Implicit, 3);
    t[0x68] = op("PLA", Pla, Implicit, 4);
    t[0x28] = op("PLP", Plp, Implicit, 4);

    // ROL
    t[0x2A] = op("ROL", Rol, Accumulator, 2);
    t[0x26] = op("ROL", Rol, ZeroPage, 5);
    t[0x36] = op("ROL", Rol, ZeroPageX, 6);
    t[0x2E] = op("ROL", Rol, Absolute, 6);
    t[0x3E] = op("ROL", Rol, AbsoluteX, 7);

    // ROR
    t[0x6A] = op("ROR", Ror, Accumulator, 2);
    t[0x66] = op("ROR", Ror, ZeroPage, 5);
    t[0x76] = op("ROR", Ror, ZeroPageX, 6);
    t[0x6E] = op("ROR", Ror, Absolute, 6);
    t[0x7E] = op("ROR", Ror, AbsoluteX, 7);

    // RTI / RTS
    t[0x40] = op("RTI", Rti, Implicit, 6);
    t[0x60] = op("RTS", Rts, Implicit, 6);

    // SBC
    t[0xE9] = op("SBC", Sbc, Immediate, 2);
    t[0xE5] = op("SBC", Sbc, ZeroPage, 3);
    t[0xF5] = op("SBC", Sbc, ZeroPageX, 4);
    t[0xED] = op("SBC", Sbc, Absolute, 4);
    t[0xFD] = op("SBC", Sbc, AbsoluteX, 4);
    t[0xF9] = op("SBC", Sbc, AbsoluteY, 4);
    t[0xE1] = op("SBC", Sbc, IndirectX, 6);
    t[0xF1] = op("SBC", Sbc, IndirectY, 5);

    // STA
    t[0x85] = op("STA", Sta, ZeroPage, 3);
    t[0x95] = op("STA", Sta, ZeroPageX, 4);
    t[0x8D] = op("STA", Sta, Absolute, 4);
    t[0x9D] = op("STA", Sta, AbsoluteX, 5);
    t[0x99] = op("STA", Sta, AbsoluteY, 5);
    t[0x81] = op("STA", Sta, IndirectX, 6);
    t[0x91] = op("STA", Sta, IndirectY, 6);

    // STX / STY
    t[0x86] = op("STX", Stx, ZeroPage, 3);
    t[0x96] = op("STX", Stx, ZeroPageY, 4);
    t[0x8E] = op("STX", Stx, Absolute, 4);
    t[0x84] = op("STY", Sty, ZeroPage, 3);
    t[0x94] = op("STY", Sty, ZeroPageX, 4);
    t[0x8C] = op("STY", Sty, Absolute, 4);

    // Transfers
    t[0xAA] = op("TAX", Tax, Implicit, 2);
    t[0xA8] = op("TAY", Tay, Implicit, 2);
    t[0xBA] = op("TSX", Tsx, Implicit, 2);
    t[0x8A] = op("TXA", Txa, Implicit, 2);
    t[0x9A] = op("TXS", Txs, Implicit, 2);
    t[0x98] = op("TYA", Tya, Implicit, 2);

    // ===== Undocumented =====

    // Single-byte NOPs
    t[0x1A] = undoc("NOP", Nop, Implicit, 2);
    t[0x3A] = undoc("NOP", Nop, Implicit, 2);
    t[0x5A] = undoc("NOP", Nop, Implicit, 2);
    t[0x7A] = undoc("NOP", Nop, Implicit, 2);
    t[0xDA] = undoc("NOP", Nop, Implicit, 2);
    t[0xFA] = undoc("NOP", Nop, Implicit, 2);

    // Double-byte NOPs
    t[0x80] = undoc("NOP", Nop, Immediate, 2);
    t[0x82] = undoc("NOP", Nop, Immediate, 2);
    t[0x89] = undoc("NOP", Nop, Immediate, 2);
    t[0xC2] = undoc("NOP", Nop, Immediate, 2);
    t[0xE2] = undoc("NOP", Nop, Immediate, 2);
    t[0x04] = undoc("NOP", Nop, ZeroPage, 3);
    t[0x44] = undoc("NOP", Nop, ZeroPage, 3);
    t[0x64] = undoc("NOP", Nop, ZeroPage, 3);
    t[0x14] = undoc("NOP", Nop, ZeroPageX, 4);
    t[0x34] = undoc("NOP", Nop, ZeroPageX, 4);
    t[0x54] = undoc("NOP", Nop, ZeroPageX, 4);
    t[0x74] = undoc("NOP", Nop, ZeroPageX, 4);
    t[0xD4] = undoc("NOP", Nop, ZeroPageX, 4);
    t[0xF4] = undoc("NOP", Nop, ZeroPageX, 4);

    // Triple-byte NOPs
    t[0x0C] = undoc("NOP", Nop, Absolute, 4);
    t[0x1C] = undoc("NOP", Nop, AbsoluteX, 4);
    t[0x3C] = undoc("NOP", Nop, AbsoluteX, 4);
    t[0x5C] = undoc("NOP", Nop, AbsoluteX, 4);
    t[0x7C] = undoc("NOP", Nop, AbsoluteX, 4);
    t[0xDC] = undoc("NOP", Nop, AbsoluteX, 4);
    t[0xFC] = undoc("NOP", Nop, AbsoluteX, 4);

    // LAX
    t[0xA7] = undoc("LAX", Lax, ZeroPage, 3);
    t[0xB7] = undoc("LAX", Lax, ZeroPageY, 4);
    t[0xAF] = undoc("LAX", Lax, Absolute, 4);
    t[0xBF] = undoc("LAX", Lax, AbsoluteY, 4);
    t[0xA3] = undoc("LAX", Lax, IndirectX, 6);
    t[0xB3] = undoc("LAX", Lax, IndirectY, 5);

    // SAX
    t[0x87] = undoc("SAX", Sax, ZeroPage, 3);
    t[0x97] = undoc("SAX", Sax, ZeroPageY, 4);
    t[0x8F] = undoc("SAX", Sax, Absolute, 4);
    t[0x83] = undoc("SAX", Sax, IndirectX, 6);

    // SBC alias
    t[0xEB] = undoc("SBC", Sbc, Immediate, 2);

    // DCP (DEC then CMP)
    t[0xC7] = undoc("DCP", Dcp, ZeroPage, 5);
    t[0xD7] = undoc("DCP", Dcp, ZeroPageX, 6);
    t[0xCF] = undoc("DCP", Dcp, Absolute, 6);
    t[0xDF] = undoc("DCP", Dcp, AbsoluteX, 7);
    t[0xDB] = undoc("DCP", Dcp, AbsoluteY, 7);
    t[0xC3] = undoc("DCP", Dcp, IndirectX, 8);
    t[0xD3] = undoc("DCP", Dcp, IndirectY, 8);

    // ISC (INC then SBC)
    t[0xE7] = undoc("ISC", Isc, ZeroPage, 5);
    t[0xF7] = undoc("ISC", Isc, ZeroPageX, 6);
    t[0xEF] = undoc("ISC", Isc, Absolute, 6);
    t[0xFF] = undoc("ISC", Isc, AbsoluteX, 7);
    t[0xFB] = undoc("ISC", Isc, AbsoluteY, 7);
    t[0xE3] = undoc("ISC", Isc, IndirectX, 8);
    t[0xF3] = undoc("ISC", Isc, IndirectY, 8);

    // SLO (ASL then ORA)
    t[0x07] = undoc("SLO", Slo, ZeroPage, 5);
    t[0x17] = undoc("SLO", Slo, ZeroPageX, 6);
    t[0x0F] = undoc("SLO", Slo, Absolute, 6);
    t[0x1F] = undoc("SLO", Slo, AbsoluteX, 7);
    t[0x1B] = undoc("SLO", Slo, AbsoluteY, 7);
    t[0x03] = undoc("SLO", Slo, IndirectX, 8);
    t[0x13] = undoc("SLO", Slo, IndirectY, 8);

    // RLA (ROL then AND)
    t[0x27] = undoc("RLA", Rla, ZeroPage, 5);
    t[0x37] = undoc("RLA", Rla, ZeroPageX, 6);
    t[0x2F] = undoc("RLA", Rla, Absolute, 6);
    t[0x3F] = undoc("RLA", Rla, AbsoluteX, 7);
    t[0x3B] = undoc("RLA", Rla, AbsoluteY, 7);
    t[0x23] = undoc("RLA", Rla, IndirectX, 8);
    t[0x33] = undoc("RLA", Rla, IndirectY, 8);

    // SRE (LSR then EOR)
    t[0x47] = undoc("SRE", Sre, ZeroPage, 5);
    t[0x57] = undoc("SRE", Sre, ZeroPageX, 6);
    t[0x4F] = undoc("SRE", Sre, Absolute, 6);
    t[0x5F] = undoc("SRE", Sre, AbsoluteX, 7);
    t[0x5B] = undoc("SRE", Sre, AbsoluteY, 7);
    t[0x43] = undoc("SRE", Sre, IndirectX, 8);
    t[0x53] = undoc("SRE", Sre, IndirectY, 8);

    // RRA (ROR then ADC)
    t[0x67] = undoc("RRA", Rra, ZeroPage, 5);
    t[0x77] = undoc("RRA", Rra, ZeroPageX, 6);
    t[0x6F] = undoc("RRA", Rra, Absolute, 6);
    t[0x7F] = undoc("RRA", Rra, AbsoluteX, 7);
    t[0x7B] = undoc("RRA", Rra, AbsoluteY, 7);
    t[0x63] = undoc("RRA", Rra, IndirectX, 8);
    t[0x73] = undoc("RRA", Rra, IndirectY, 8);

    t
}
