//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state and
//! the tick-level fetch/execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next byte to fetch
//! - **Stack pointer** (SP): 8-bit offset into the stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, B, D, I, Z, C (individual bool fields)
//! - **Cycle counter**: u64 monotonically increasing tick count
//! - **Remaining cycles**: ticks left before the in-flight instruction completes
//!
//! ## Execution Model
//!
//! `step()` advances exactly one clock tick. When no instruction is in flight
//! the tick fetches the opcode at PC, runs its handler immediately, and the
//! handler records the instruction's full cost (base cycles plus page-cross or
//! branch penalties). The remaining ticks of that cost are then spent idle, so
//! an N-cycle instruction spans exactly N calls to `step()`.
//!
//! Sound chip writes therefore land on the tick the instruction is dispatched,
//! and a frame boundary that falls inside an instruction sees its effects.

use crate::disassembler::{decode_instruction, format_instruction};
use crate::instructions;
use crate::{AddressingMode, ExecutionError, LoadError, MemoryBus, OPCODE_TABLE};

/// Base address of the hardware stack page.
pub const STACK_PAGE: u16 = 0x0100;

/// Address a routine started with [`CPU::call`] returns to.
///
/// `call` writes a BRK here, so the final RTS of the routine halts the CPU.
/// It sits at the very bottom of the stack page, which a well-behaved routine
/// never reaches.
pub const RETURN_TRAP: u16 = 0x0100;

/// What the CPU does when it fetches an opcode with no bound handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IllegalOpcodePolicy {
    /// Return [`ExecutionError::IllegalOpcode`] and leave the CPU untouched.
    #[default]
    Fail,
    /// Treat the byte as a 1-cycle, 1-byte no-op and log a warning.
    Nop,
}

/// 6502 CPU state and execution context.
///
/// The CPU struct contains all processor state including registers, flags, program counter,
/// stack pointer, and cycle counter. It is generic over the memory implementation via the
/// `MemoryBus` trait.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation (must implement `MemoryBus` trait)
///
/// # Examples
///
/// ```
/// use sid6502::{CPU, FlatMemory, MemoryBus};
///
/// // Create memory and set reset vector
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Low byte
/// memory.write(0xFFFD, 0x80); // High byte (PC = 0x8000)
///
/// // Initialize CPU - loads PC from reset vector
/// let cpu = CPU::new(memory);
///
/// // Inspect initial state
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert!(cpu.flag_i()); // Interrupt disable set on reset
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next byte to fetch)
    pub(crate) pc: u16,

    /// Stack pointer (STACK_PAGE + sp gives full stack address)
    pub(crate) sp: u8,

    /// Negative flag (set if bit 7 of result is 1)
    pub(crate) flag_n: bool,

    /// Overflow flag (set on signed overflow)
    pub(crate) flag_v: bool,

    /// Break flag (set when BRK instruction executed)
    pub(crate) flag_b: bool,

    /// Decimal mode flag (stored only, arithmetic is always binary)
    pub(crate) flag_d: bool,

    /// Interrupt disable flag
    pub(crate) flag_i: bool,

    /// Zero flag (set if result is zero)
    pub(crate) flag_z: bool,

    /// Carry flag (set on unsigned overflow/underflow)
    pub(crate) flag_c: bool,

    /// Total CPU ticks elapsed
    pub(crate) cycles: u64,

    /// Ticks left before the in-flight instruction completes
    pub(crate) cycles_remaining: u8,

    /// Set by BRK, stops instruction dispatch until cleared
    pub(crate) halted: bool,

    illegal_opcode_policy: IllegalOpcodePolicy,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU with the given memory bus.
    ///
    /// The CPU is initialized to the 6502 power-on reset state:
    /// - Program counter (PC) is loaded from the reset vector at addresses 0xFFFC/0xFFFD (little-endian)
    /// - Stack pointer (SP) is set to 0xFD
    /// - Status register has Interrupt Disable flag set (I = true)
    /// - All other registers (A, X, Y) are zeroed
    /// - Cycle counter is reset to 0
    /// - Illegal opcodes fail
    pub fn new(memory: M) -> Self {
        // Read reset vector from 0xFFFC/0xFFFD (little-endian)
        let pc_low = memory.read(0xFFFC) as u16;
        let pc_high = memory.read(0xFFFD) as u16;
        let pc = (pc_high << 8) | pc_low;

        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc,
            sp: 0xFD,
            flag_n: false,
            flag_v: false,
            flag_b: false,
            flag_d: false,
            flag_i: true, // Interrupt disable set on reset
            flag_z: false,
            flag_c: false,
            cycles: 0,
            cycles_remaining: 0,
            halted: false,
            illegal_opcode_policy: IllegalOpcodePolicy::default(),
            memory,
        }
    }

    /// Builder-style variant of [`set_illegal_opcode_policy`](Self::set_illegal_opcode_policy).
    pub fn with_illegal_opcode_policy(mut self, policy: IllegalOpcodePolicy) -> Self {
        self.illegal_opcode_policy = policy;
        self
    }

    /// Advances the CPU by exactly one clock tick.
    ///
    /// If an instruction is in flight, the tick is spent and the remaining
    /// cycle count decreases. If the CPU is halted by BRK, the tick is spent
    /// without dispatching. Otherwise the opcode at PC is fetched and executed
    /// and the tick becomes the first cycle of that instruction.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::IllegalOpcode`] when the fetched opcode has no
    /// bound handler and the policy is [`IllegalOpcodePolicy::Fail`]. The CPU
    /// state (including PC and the cycle counter) is left as it was before the
    /// call.
    ///
    /// # Examples
    ///
    /// ```
    /// use sid6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// mem.write(0x8000, 0xEA); // NOP (2 cycles)
    ///
    /// let mut cpu = CPU::new(mem);
    ///
    /// cpu.step().unwrap(); // fetch + execute
    /// assert_eq!(cpu.pc(), 0x8001);
    /// assert_eq!(cpu.cycles_remaining(), 1);
    ///
    /// cpu.step().unwrap(); // second cycle of NOP
    /// assert_eq!(cpu.cycles_remaining(), 0);
    /// assert_eq!(cpu.cycles(), 2);
    /// ```
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        if self.cycles_remaining == 0 && !self.halted {
            self.dispatch()?;
        }

        self.cycles_remaining = self.cycles_remaining.saturating_sub(1);
        self.cycles += 1;

        Ok(())
    }

    /// Fetch the opcode at PC and run its handler.
    fn dispatch(&mut self) -> Result<(), ExecutionError> {
        let pc = self.pc;
        let opcode = self.fetch_byte();
        let metadata = &OPCODE_TABLE[opcode as usize];

        match metadata.operation {
            Some(operation) => {
                if log::log_enabled!(log::Level::Trace) {
                    self.trace_instruction(pc);
                }
                instructions::execute(self, operation, opcode);
            }
            None => match self.illegal_opcode_policy {
                IllegalOpcodePolicy::Fail => {
                    self.pc = pc;
                    return Err(ExecutionError::IllegalOpcode { opcode, pc });
                }
                IllegalOpcodePolicy::Nop => {
                    log::warn!("illegal opcode 0x{:02X} at ${:04X} treated as NOP", opcode, pc);
                    self.cycles_remaining = 1;
                }
            },
        }

        Ok(())
    }

    fn trace_instruction(&self, pc: u16) {
        let bytes = [
            self.memory.read(pc),
            self.memory.read(pc.wrapping_add(1)),
            self.memory.read(pc.wrapping_add(2)),
        ];
        let text = decode_instruction(&bytes, pc)
            .map(|instr| format_instruction(&instr))
            .unwrap_or_else(|| format!(".byte ${:02X}", bytes[0]));

        log::trace!(
            "{:04X}  {:<14} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc,
            text,
            self.a,
            self.x,
            self.y,
            self.status(),
            self.sp,
            self.cycles
        );
    }

    /// Runs ticks until the current instruction has completed.
    ///
    /// Starting between instructions this executes exactly one instruction and
    /// returns its total cycle cost. Starting mid-instruction it finishes the
    /// in-flight one. While halted, a single tick is spent and 1 is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use sid6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.load(&[0xAD, 0x34, 0x12], 0x8000).unwrap(); // LDA $1234
    ///
    /// assert_eq!(cpu.step_instruction().unwrap(), 4);
    /// assert_eq!(cpu.pc(), 0x8003);
    /// ```
    pub fn step_instruction(&mut self) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;

        loop {
            self.step()?;
            if self.cycles_remaining == 0 {
                break;
            }
        }

        Ok(self.cycles - start_cycles)
    }

    /// Runs the CPU for exactly `cycle_budget` ticks.
    ///
    /// Because `step()` is tick-granular, the budget is never overshot; an
    /// instruction still in flight at the end simply completes on the next
    /// call. Returns the number of ticks consumed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sid6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// for addr in 0x8000..0x8010 {
    ///     mem.write(addr, 0xEA); // NOP
    /// }
    ///
    /// let mut cpu = CPU::new(mem);
    /// assert_eq!(cpu.run_for_cycles(7).unwrap(), 7);
    /// assert_eq!(cpu.pc(), 0x8004); // fourth NOP is in flight
    /// ```
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        for _ in 0..cycle_budget {
            self.step()?;
        }

        Ok(cycle_budget)
    }

    /// Copies a program image into memory starting at `base`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ImageTooLarge`] if the image would run past 0xFFFF.
    /// Nothing is written in that case.
    pub fn load(&mut self, bytes: &[u8], base: u16) -> Result<(), LoadError> {
        if base as usize + bytes.len() > 0x10000 {
            return Err(LoadError::ImageTooLarge {
                base,
                len: bytes.len(),
            });
        }

        for (offset, &byte) in bytes.iter().enumerate() {
            self.memory.write(base.wrapping_add(offset as u16), byte);
        }

        Ok(())
    }

    /// Prepares the CPU to run the subroutine at `address`.
    ///
    /// Clears any break condition, resets the stack pointer to 0xFF and pushes
    /// a return address pointing at [`RETURN_TRAP`], where a BRK is written.
    /// When the routine executes its final RTS the CPU halts, which the caller
    /// observes with [`is_halted`](Self::is_halted).
    ///
    /// # Examples
    ///
    /// ```
    /// use sid6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0x1000, 0xA9); // LDA #$07
    /// mem.write(0x1001, 0x07);
    /// mem.write(0x1002, 0x60); // RTS
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.call(0x1000);
    /// while !cpu.is_halted() {
    ///     cpu.step().unwrap();
    /// }
    ///
    /// assert_eq!(cpu.a(), 0x07);
    /// ```
    pub fn call(&mut self, address: u16) {
        self.clear_break();
        self.sp = 0xFF;

        let return_address = RETURN_TRAP.wrapping_sub(1);
        self.push_byte((return_address >> 8) as u8);
        self.push_byte((return_address & 0xFF) as u8);
        self.memory.write(RETURN_TRAP, 0x00);

        self.pc = address;
        self.cycles_remaining = 0;

        log::debug!("calling routine at ${:04X}", address);
    }

    /// Returns true once BRK has executed and dispatch is suspended.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Clears the break condition so dispatch resumes at PC.
    pub fn clear_break(&mut self) {
        self.halted = false;
        self.flag_b = false;
    }

    // ========== Internal bus helpers ==========

    /// Reads the byte at PC and advances PC, wrapping at 16 bits.
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Reads a little-endian word at PC and advances PC by two.
    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte() as u16;
        let hi = self.fetch_byte() as u16;
        (hi << 8) | lo
    }

    /// Reads a little-endian pointer from page zero, wrapping within the page.
    fn read_zero_page_word(&self, addr: u8) -> u16 {
        let lo = self.memory.read(addr as u16) as u16;
        let hi = self.memory.read(addr.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }

    pub(crate) fn push_byte(&mut self, value: u8) {
        self.memory.write(STACK_PAGE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pull_byte(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_PAGE | self.sp as u16)
    }

    /// Consumes the operand bytes of `mode` and returns the effective address
    /// plus whether an index addition crossed a page boundary.
    ///
    /// Immediate mode resolves to the address of the operand byte itself.
    ///
    /// # Panics
    ///
    /// Panics for modes with no data address (implicit, accumulator, relative,
    /// indirect). Handlers bound to those modes never call this.
    pub(crate) fn resolve_address(&mut self, mode: AddressingMode) -> (u16, bool) {
        match mode {
            AddressingMode::Immediate => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                (addr, false)
            }
            AddressingMode::ZeroPage => (self.fetch_byte() as u16, false),
            AddressingMode::ZeroPageX => (self.fetch_byte().wrapping_add(self.x) as u16, false),
            AddressingMode::ZeroPageY => (self.fetch_byte().wrapping_add(self.y) as u16, false),
            AddressingMode::Absolute => (self.fetch_word(), false),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word();
                indexed(base, self.x)
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word();
                indexed(base, self.y)
            }
            AddressingMode::IndirectX => {
                let zp = self.fetch_byte().wrapping_add(self.x);
                (self.read_zero_page_word(zp), false)
            }
            AddressingMode::IndirectY => {
                let zp = self.fetch_byte();
                let base = self.read_zero_page_word(zp);
                indexed(base, self.y)
            }
            AddressingMode::Implicit
            | AddressingMode::Accumulator
            | AddressingMode::Relative
            | AddressingMode::Indirect => {
                unreachable!("{:?} has no data address", mode)
            }
        }
    }

    /// Resolves the operand of `mode` and reads the byte it names.
    pub(crate) fn read_operand(&mut self, mode: AddressingMode) -> (u8, bool) {
        let (addr, page_crossed) = self.resolve_address(mode);
        (self.memory.read(addr), page_crossed)
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a packed byte.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: (unused, always 1)
    /// - Bit 4: B (Break)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    ///
    /// # Examples
    ///
    /// ```
    /// use sid6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    ///
    /// let cpu = CPU::new(mem);
    /// let status = cpu.status();
    ///
    /// // I flag set (bit 2), bit 5 always 1
    /// assert_eq!(status & 0b00100100, 0b00100100);
    /// ```
    pub fn status(&self) -> u8 {
        let mut status: u8 = 0b00100000; // Bit 5 always 1

        if self.flag_n {
            status |= 0b10000000;
        }
        if self.flag_v {
            status |= 0b01000000;
        }
        if self.flag_b {
            status |= 0b00010000;
        }
        if self.flag_d {
            status |= 0b00001000;
        }
        if self.flag_i {
            status |= 0b00000100;
        }
        if self.flag_z {
            status |= 0b00000010;
        }
        if self.flag_c {
            status |= 0b00000001;
        }

        status
    }

    /// Returns the total number of ticks elapsed since initialization.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Ticks left before the in-flight instruction completes (0 between instructions).
    pub fn cycles_remaining(&self) -> u8 {
        self.cycles_remaining
    }

    /// Current illegal-opcode policy.
    pub fn illegal_opcode_policy(&self) -> IllegalOpcodePolicy {
        self.illegal_opcode_policy
    }

    /// Shared access to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Mutable access to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.flag_b
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    // ========== Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Unpacks a status byte into the individual flags. Bit 5 is ignored.
    pub fn set_status(&mut self, value: u8) {
        self.flag_n = value & 0b10000000 != 0;
        self.flag_v = value & 0b01000000 != 0;
        self.flag_b = value & 0b00010000 != 0;
        self.flag_d = value & 0b00001000 != 0;
        self.flag_i = value & 0b00000100 != 0;
        self.flag_z = value & 0b00000010 != 0;
        self.flag_c = value & 0b00000001 != 0;
    }

    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.flag_i = value;
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }

    /// Changes how opcodes with no bound handler are treated.
    pub fn set_illegal_opcode_policy(&mut self, policy: IllegalOpcodePolicy) {
        self.illegal_opcode_policy = policy;
    }
}

/// Adds an index register to a base address, reporting a page crossing.
fn indexed(base: u16, index: u8) -> (u16, bool) {
    let addr = base.wrapping_add(index as u16);
    (addr, (base & 0xFF00) != (addr & 0xFF00))
}
