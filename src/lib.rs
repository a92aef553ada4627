//! # 6502 CPU Core for SID Register Capture
//!
//! A cycle-timed NMOS 6502 emulator designed to execute the player routines
//! embedded in Commodore 64 music files, tick by tick, so that every write to
//! the sound chip lands on the correct video frame.
//!
//! This crate provides the CPU state and clock loop, a range-addressed memory
//! bus built from pluggable regions, and a table-driven opcode system covering
//! the documented instruction set plus the undocumented read-modify-write
//! fusions that real player routines rely on.
//!
//! ## Quick Start
//!
//! ```rust
//! use sid6502::{CPU, FlatMemory, MemoryBus};
//!
//! // Create 64KB flat memory
//! let mut memory = FlatMemory::new();
//!
//! // Set reset vector to point to program start at 0x8000
//! memory.write(0xFFFC, 0x00); // Low byte
//! memory.write(0xFFFD, 0x80); // High byte
//!
//! // Initialize CPU - it will load PC from the reset vector
//! let mut cpu = CPU::new(memory);
//!
//! // LDA #$05 ; ADC #$03
//! cpu.load(&[0xA9, 0x05, 0x69, 0x03], 0x8000).unwrap();
//! cpu.run_for_cycles(4).unwrap();
//!
//! assert_eq!(cpu.a(), 0x08);
//! assert_eq!(cpu.cycles(), 4);
//! ```
//!
//! ## Architecture
//!
//! - **Tick-level stepping**: `CPU::step()` advances exactly one clock tick. An
//!   instruction executes on the tick where the remaining-cycle counter is
//!   zero and then occupies the CPU for its full cycle cost.
//! - **Pluggable bus**: the CPU is generic over `MemoryBus`; `AddressSpace`
//!   routes accesses to attached `Device` regions (first match wins, unmapped
//!   addresses read 0 and drop writes).
//! - **Table-driven design**: all opcode metadata, including which handler
//!   an opcode is bound to, lives in `OPCODE_TABLE`.
//!
//! ## Modules
//!
//! - `cpu` - CPU state and the fetch/execute/tick loop
//! - `memory` - MemoryBus trait and FlatMemory
//! - `devices` - Device trait, the range-mapped AddressSpace and the RAM region
//! - `opcodes` - Opcode metadata table
//! - `addressing` - Addressing mode enumeration
//! - `disassembler` - Opcode-table driven disassembly for traces and diagnostics

pub mod addressing;
pub mod cpu;
pub mod devices;
pub mod disassembler;
pub mod memory;
pub mod opcodes;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::{IllegalOpcodePolicy, CPU, RETURN_TRAP, STACK_PAGE};
pub use devices::{AddressSpace, AttachError, Device, RamDevice, RegionId};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{OpcodeMetadata, Operation, OPCODE_TABLE};

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// The fetched opcode has no bound handler and the CPU is configured to
    /// fail on illegal opcodes.
    #[error("illegal opcode 0x{opcode:02X} at ${pc:04X}")]
    IllegalOpcode {
        /// The opcode byte that was fetched
        opcode: u8,
        /// Address the opcode was fetched from
        pc: u16,
    },
}

/// Errors raised when copying a program image into memory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The image does not fit between its base address and the top of memory.
    #[error("image of {len} bytes does not fit at ${base:04X}")]
    ImageTooLarge {
        /// Requested base address
        base: u16,
        /// Image length in bytes
        len: usize,
    },
}
