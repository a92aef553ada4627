//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all bound instructions, organized by category.
//! Each instruction is a standalone function that takes a mutable reference to the CPU and the
//! opcode byte. By the time a handler runs the opcode has been fetched and PC points at the
//! first operand byte; the handler consumes its operands, performs the operation and stores the
//! instruction's total cycle cost in `cycles_remaining`.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)
//! - **undocumented**: LAX, SAX and the read-modify-write fusions (DCP, ISC, SLO, RLA, SRE, RRA)

pub mod alu;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;
pub mod undocumented;

use crate::{MemoryBus, OpcodeMetadata, Operation, CPU};

/// Routes a fetched opcode to its handler.
pub(crate) fn execute<M: MemoryBus>(cpu: &mut CPU<M>, operation: Operation, opcode: u8) {
    use Operation::*;

    match operation {
        Adc => alu::execute_adc(cpu, opcode),
        And => alu::execute_and(cpu, opcode),
        Bit => alu::execute_bit(cpu, opcode),
        Cmp => alu::execute_cmp(cpu, opcode),
        Cpx => alu::execute_cpx(cpu, opcode),
        Cpy => alu::execute_cpy(cpu, opcode),
        Eor => alu::execute_eor(cpu, opcode),
        Ora => alu::execute_ora(cpu, opcode),
        Sbc => alu::execute_sbc(cpu, opcode),

        Bcc => branches::execute_bcc(cpu, opcode),
        Bcs => branches::execute_bcs(cpu, opcode),
        Beq => branches::execute_beq(cpu, opcode),
        Bmi => branches::execute_bmi(cpu, opcode),
        Bne => branches::execute_bne(cpu, opcode),
        Bpl => branches::execute_bpl(cpu, opcode),
        Bvc => branches::execute_bvc(cpu, opcode),
        Bvs => branches::execute_bvs(cpu, opcode),

        Brk => control::execute_brk(cpu, opcode),
        Jmp => control::execute_jmp(cpu, opcode),
        Jsr => control::execute_jsr(cpu, opcode),
        Nop => control::execute_nop(cpu, opcode),
        Rti => control::execute_rti(cpu, opcode),
        Rts => control::execute_rts(cpu, opcode),

        Clc => flags::execute_clc(cpu, opcode),
        Cld => flags::execute_cld(cpu, opcode),
        Cli => flags::execute_cli(cpu, opcode),
        Clv => flags::execute_clv(cpu, opcode),
        Sec => flags::execute_sec(cpu, opcode),
        Sed => flags::execute_sed(cpu, opcode),
        Sei => flags::execute_sei(cpu, opcode),

        Dec => inc_dec::execute_dec(cpu, opcode),
        Dex => inc_dec::execute_dex(cpu, opcode),
        Dey => inc_dec::execute_dey(cpu, opcode),
        Inc => inc_dec::execute_inc(cpu, opcode),
        Inx => inc_dec::execute_inx(cpu, opcode),
        Iny => inc_dec::execute_iny(cpu, opcode),

        Lda => load_store::execute_lda(cpu, opcode),
        Ldx => load_store::execute_ldx(cpu, opcode),
        Ldy => load_store::execute_ldy(cpu, opcode),
        Sta => load_store::execute_sta(cpu, opcode),
        Stx => load_store::execute_stx(cpu, opcode),
        Sty => load_store::execute_sty(cpu, opcode),

        Asl => shifts::execute_asl(cpu, opcode),
        Lsr => shifts::execute_lsr(cpu, opcode),
        Rol => shifts::execute_rol(cpu, opcode),
        Ror => shifts::execute_ror(cpu, opcode),

        Pha => stack::execute_pha(cpu, opcode),
        Php => stack::execute_php(cpu, opcode),
        Pla => stack::execute_pla(cpu, opcode),
        Plp => stack::execute_plp(cpu, opcode),

        Tax => transfer::execute_tax(cpu, opcode),
        Tay => transfer::execute_tay(cpu, opcode),
        Tsx => transfer::execute_tsx(cpu, opcode),
        Txa => transfer::execute_txa(cpu, opcode),
        Txs => transfer::execute_txs(cpu, opcode),
        Tya => transfer::execute_tya(cpu, opcode),

        Dcp => undocumented::execute_dcp(cpu, opcode),
        Isc => undocumented::execute_isc(cpu, opcode),
        Lax => undocumented::execute_lax(cpu, opcode),
        Rla => undocumented::execute_rla(cpu, opcode),
        Rra => undocumented::execute_rra(cpu, opcode),
        Sax => undocumented::execute_sax(cpu, opcode),
        Slo => undocumented::execute_slo(cpu, opcode),
        Sre => undocumented::execute_sre(cpu, opcode),
    }
}

/// Total cost of an instruction: base cycles plus one on a page crossing.
pub(crate) fn cost(metadata: &OpcodeMetadata, page_crossed: bool) -> u8 {
    metadata.base_cycles + page_crossed as u8
}

impl<M: MemoryBus> CPU<M> {
    /// Sets Z and N from a result byte.
    pub(crate) fn update_zn(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = (value & 0x80) != 0;
    }
}
