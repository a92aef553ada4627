//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from specific
//! memory implementations. Two implementations ship with the crate:
//!
//! - `FlatMemory`: a single 64KB RAM array, handy for tests
//! - `AddressSpace` (in `devices`): a sparse map of named regions, used to put
//!   the sound chip's register file on the bus next to RAM
//!
//! ## Design Principles
//!
//! The MemoryBus trait follows 6502 hardware behavior:
//! - No bus errors - reads/writes always succeed
//! - Unmapped reads return a defined default
//! - Writes to unmapped regions are dropped

/// Memory bus trait for CPU to read/write bytes.
///
/// The CPU accesses all memory (RAM, chip registers) through this abstraction.
///
/// - `read(&self)`: Immutable reference allows shared reads
/// - `write(&mut self)`: Mutable reference makes side effects explicit
/// - No error types: 6502 hardware has no bus error mechanism
///
/// # Examples
///
/// ```
/// use sid6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
///
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// This method must never panic.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// This method must never panic. Writes to read-only or unmapped
    /// addresses are ignored.
    fn write(&mut self, addr: u16, value: u8);
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses are mapped to a single contiguous RAM array
/// initialized to 0x00.
///
/// # Examples
///
/// ```
/// use sid6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Reset vector low byte
/// memory.write(0xFFFD, 0x80); // Reset vector high byte (PC = 0x8000)
/// memory.write(0x8000, 0xEA); // NOP
///
/// let cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
pub struct FlatMemory {
    /// 64KB contiguous memory array
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}
