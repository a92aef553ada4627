//! Fuzz target for tick-level CPU execution.
//!
//! Builds an arbitrary CPU state and memory image, then runs a bounded number
//! of ticks under the tolerant illegal-opcode policy. Nothing may panic and
//! the cycle counter must advance by exactly one per tick.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sid6502::{AddressSpace, IllegalOpcodePolicy, MemoryBus, RamDevice, CPU};

#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
}

#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Program bytes placed at 0x8000
    program: [u8; 64],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
    ticks: u8,
}

fuzz_target!(|input: FuzzInput| {
    // Leave 0xC000-0xFFFF unmapped so stray jumps exercise the zero-read path
    let mut memory = AddressSpace::new();
    memory
        .attach("ram", 0x0000, 0xBFFF, Box::new(RamDevice::new(0xC000)))
        .unwrap();

    for (i, &byte) in input.memory.zero_page.iter().enumerate() {
        memory.write(i as u16, byte);
    }
    for (i, &byte) in input.memory.stack_page.iter().enumerate() {
        memory.write(0x0100 + i as u16, byte);
    }
    for (i, &byte) in input.memory.program.iter().enumerate() {
        memory.write(0x8000 + i as u16, byte);
    }

    let mut cpu = CPU::new(memory).with_illegal_opcode_policy(IllegalOpcodePolicy::Nop);
    cpu.set_pc(0x8000);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);

    for tick in 0..input.ticks as u64 {
        assert!(cpu.step().is_ok());
        assert_eq!(cpu.cycles(), tick + 1);
        assert!(cpu.cycles_remaining() < 8);
    }
});
