//! Register file of the SID (MOS 6581) sound chip.
//!
//! The chip exposes 25 write-only registers at $D400-$D418:
//! - three voices of seven registers each (frequency lo/hi, pulse width
//!   lo/hi, control, attack/decay, sustain/release)
//! - four shared filter and volume registers
//!
//! Only the address lines A0-A4 are decoded, so the 32-byte block repeats
//! across $D400-$D7FF. Writes are latched; nothing is synthesized. At each
//! frame boundary the latched voice registers are handed to the per-voice
//! [`NoteReconstructor`]s.

use crate::notes::{Note, NoteReconstructor};
use crate::session::FrameClock;
use sid6502::Device;
use std::any::Any;

/// Number of voices in the SID.
pub const VOICE_COUNT: usize = 3;

/// Registers per voice.
pub const VOICE_REGISTERS: u8 = 7;

/// Decoded register window (the block mirrors every 32 bytes).
pub const REGISTER_WINDOW: u16 = 0x20;

/// Latched registers of one voice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoiceRegisters {
    /// 16-bit frequency register.
    frequency: u16,
    /// 12-bit pulse width.
    pulse_width: u16,
    /// Control register (waveform, test, ring mod, sync, gate).
    control: u8,
    /// Attack/Decay nibbles.
    attack_decay: u8,
    /// Sustain/Release nibbles.
    sustain_release: u8,
}

impl VoiceRegisters {
    /// Latches a write to voice register `register` (0-6). Other values are
    /// ignored.
    pub fn write(&mut self, register: u8, value: u8) {
        match register {
            0 => self.frequency = (self.frequency & 0xFF00) | value as u16,
            1 => self.frequency = (self.frequency & 0x00FF) | ((value as u16) << 8),
            2 => self.pulse_width = (self.pulse_width & 0xF00) | value as u16,
            3 => self.pulse_width = (self.pulse_width & 0x0FF) | (((value & 0x0F) as u16) << 8),
            4 => self.control = value,
            5 => self.attack_decay = value,
            6 => self.sustain_release = value,
            _ => {}
        }
    }

    pub fn frequency(&self) -> u16 {
        self.frequency
    }

    pub fn pulse_width(&self) -> u16 {
        self.pulse_width
    }

    pub fn control(&self) -> u8 {
        self.control
    }

    pub fn attack_decay(&self) -> u8 {
        self.attack_decay
    }

    pub fn sustain_release(&self) -> u8 {
        self.sustain_release
    }

    /// Check if gate is on.
    #[inline]
    pub fn gate(&self) -> bool {
        self.control & 0x01 != 0
    }

    #[inline]
    pub fn sync_enabled(&self) -> bool {
        self.control & 0x02 != 0
    }

    #[inline]
    pub fn ring_mod_enabled(&self) -> bool {
        self.control & 0x04 != 0
    }

    #[inline]
    pub fn test_bit(&self) -> bool {
        self.control & 0x08 != 0
    }
}

/// Filter and master volume registers. Latched only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterRegisters {
    /// 11-bit cutoff frequency.
    pub cutoff: u16,
    /// Resonance (high nibble) and voice routing (low nibble).
    pub resonance_routing: u8,
    /// Filter mode (high nibble) and master volume (low nibble).
    pub mode_volume: u8,
}

impl FilterRegisters {
    pub fn volume(&self) -> u8 {
        self.mode_volume & 0x0F
    }
}

/// The sound chip as seen from the bus: a register latch plus one note
/// reconstructor per voice.
#[derive(Debug, Clone)]
pub struct VoiceBank {
    voices: [VoiceRegisters; VOICE_COUNT],
    filter: FilterRegisters,
    reconstructors: [NoteReconstructor; VOICE_COUNT],
}

impl VoiceBank {
    /// Creates a bank whose pitches are computed against `clock_hz`.
    pub fn new(clock_hz: f64) -> Self {
        Self {
            voices: [VoiceRegisters::default(); VOICE_COUNT],
            filter: FilterRegisters::default(),
            reconstructors: std::array::from_fn(|_| NoteReconstructor::new(clock_hz)),
        }
    }

    /// Stores a write to flat register index `register` (0-24).
    ///
    /// ```
    /// use sid_notes::devices::VoiceBank;
    ///
    /// let mut bank = VoiceBank::new(985_248.0);
    /// bank.poke(7, 0x34);  // voice 2 frequency lo
    /// bank.poke(8, 0x12);  // voice 2 frequency hi
    /// bank.poke(24, 0x0F); // volume
    ///
    /// assert_eq!(bank.voice(1).unwrap().frequency(), 0x1234);
    /// assert_eq!(bank.filter().volume(), 0x0F);
    /// ```
    pub fn poke(&mut self, register: u8, value: u8) {
        match register {
            0..=20 => {
                let voice = (register / VOICE_REGISTERS) as usize;
                self.voices[voice].write(register % VOICE_REGISTERS, value);
            }
            21 => self.filter.cutoff = (self.filter.cutoff & 0x7F8) | (value & 0x07) as u16,
            22 => self.filter.cutoff = (self.filter.cutoff & 0x007) | ((value as u16) << 3),
            23 => self.filter.resonance_routing = value,
            24 => self.filter.mode_volume = value,
            // Read-only registers or unused
            _ => {}
        }
    }

    /// Latched registers of voice `index` (0-2).
    pub fn voice(&self, index: usize) -> Option<&VoiceRegisters> {
        self.voices.get(index)
    }

    pub fn filter(&self) -> &FilterRegisters {
        &self.filter
    }

    /// Runs every voice's end-of-frame reconstruction.
    pub fn finish_frame(&mut self, clock: &FrameClock) {
        for (reconstructor, registers) in self.reconstructors.iter_mut().zip(&self.voices) {
            reconstructor.finish_frame(registers, clock);
        }
    }

    /// Finalizes every voice's held or releasing note.
    pub fn stop(&mut self, clock: &FrameClock) {
        for reconstructor in &mut self.reconstructors {
            reconstructor.stop(clock);
        }
    }

    /// Reconstructor of voice `index` (0-2).
    pub fn reconstructor(&self, index: usize) -> Option<&NoteReconstructor> {
        self.reconstructors.get(index)
    }

    /// Notes produced so far, one list per voice.
    pub fn notes(&self) -> [&[Note]; VOICE_COUNT] {
        std::array::from_fn(|voice| self.reconstructors[voice].notes())
    }

    /// Consumes the bank, returning one note list per voice.
    pub fn into_notes(self) -> Vec<Vec<Note>> {
        self.reconstructors
            .into_iter()
            .map(NoteReconstructor::into_notes)
            .collect()
    }
}

impl Device for VoiceBank {
    fn read(&self, _offset: u16) -> u8 {
        // Voice registers are write-only; oscillator and envelope readback
        // is not modelled
        0
    }

    fn write(&mut self, offset: u16, value: u8) {
        self.poke((offset % REGISTER_WINDOW) as u8, value);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_registers() {
        let mut bank = VoiceBank::new(985_248.0);

        // Set voice 1 frequency to 0x1234
        bank.write(0x00, 0x34);
        bank.write(0x01, 0x12);
        assert_eq!(bank.voices[0].frequency(), 0x1234);

        // Set voice 1 pulse width to 0xABC, upper nibble of the high byte is dropped
        bank.write(0x02, 0xBC);
        bank.write(0x03, 0xFA);
        assert_eq!(bank.voices[0].pulse_width(), 0xABC);
    }

    #[test]
    fn test_register_groups() {
        let mut bank = VoiceBank::new(985_248.0);

        for voice in 0..3u8 {
            let base = voice * VOICE_REGISTERS;
            bank.poke(base + 4, 0x41 + voice);
            bank.poke(base + 5, 0x10 * voice);
            bank.poke(base + 6, 0x0F - voice);
        }

        for voice in 0..3usize {
            let registers = bank.voice(voice).unwrap();
            assert_eq!(registers.control(), 0x41 + voice as u8);
            assert_eq!(registers.attack_decay(), 0x10 * voice as u8);
            assert_eq!(registers.sustain_release(), 0x0F - voice as u8);
        }
        assert!(bank.voice(3).is_none());
    }

    #[test]
    fn test_control_bits() {
        let mut registers = VoiceRegisters::default();
        registers.write(4, 0x0F);

        assert!(registers.gate());
        assert!(registers.sync_enabled());
        assert!(registers.ring_mod_enabled());
        assert!(registers.test_bit());
    }

    #[test]
    fn test_filter_registers() {
        let mut bank = VoiceBank::new(985_248.0);

        bank.write(0x15, 0x07);
        bank.write(0x16, 0xFF);
        assert_eq!(bank.filter().cutoff, 0x7FF);

        bank.write(0x17, 0xF7);
        bank.write(0x18, 0x1F);
        assert_eq!(bank.filter().resonance_routing, 0xF7);
        assert_eq!(bank.filter().volume(), 0x0F);
    }

    #[test]
    fn test_register_block_mirrors() {
        let mut bank = VoiceBank::new(985_248.0);

        // $D420 and $D7E0 both decode to $D400
        bank.write(0x0020, 0x11);
        assert_eq!(bank.voices[0].frequency(), 0x0011);
        bank.write(0x03E1, 0x22);
        assert_eq!(bank.voices[0].frequency(), 0x2211);

        // Unused slots are ignored
        let before = bank.voices;
        bank.write(0x1D, 0xFF);
        assert_eq!(bank.voices, before);
    }

    #[test]
    fn test_reads_return_zero() {
        let mut bank = VoiceBank::new(985_248.0);
        bank.write(0x04, 0x41);
        assert_eq!(bank.read(0x04), 0);
    }
}
