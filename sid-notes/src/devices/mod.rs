//! Memory-mapped chip implementations for the sid6502 bus.
//!
//! - [`VoiceBank`]: the sound chip's register file, feeding note reconstruction
//!
//! All devices implement `sid6502::Device`.

mod voice_bank;

pub use voice_bank::{
    FilterRegisters, VoiceBank, VoiceRegisters, REGISTER_WINDOW, VOICE_COUNT, VOICE_REGISTERS,
};

/// First address of the sound chip.
pub const SID_BASE: u16 = 0xD400;

/// Last address of the sound chip's mirrored register block.
pub const SID_END: u16 = 0xD7FF;
