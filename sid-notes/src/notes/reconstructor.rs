//! Per-voice note reconstruction.
//!
//! At every frame boundary a [`NoteReconstructor`] looks at the registers
//! latched for its voice and decides whether a note starts, continues, bends
//! or is released. All notes it ever produced stay in its list; at most one
//! of them is unreleased at any time.

use super::{nearest_pitch, Envelope, Note, Waveform};
use crate::devices::VoiceRegisters;
use crate::session::FrameClock;

#[derive(Debug, Clone)]
pub struct NoteReconstructor {
    /// Clock the frequency register is scaled by.
    clock_hz: f64,
    /// Every note this voice produced, in start order.
    notes: Vec<Note>,
    /// Upper control nibbles already reported as unknown waveforms.
    warned_waveforms: u16,
}

impl NoteReconstructor {
    pub fn new(clock_hz: f64) -> Self {
        Self {
            clock_hz,
            notes: Vec::new(),
            warned_waveforms: 0,
        }
    }

    /// End-of-frame hook.
    ///
    /// With the gate set and a nonzero frequency, opens a note if none is
    /// held (finalizing one that is already in its release) and otherwise
    /// refreshes the held note. With the gate clear, releases the held note.
    pub fn finish_frame(&mut self, registers: &VoiceRegisters, clock: &FrameClock) {
        if !registers.gate() {
            if let Some(note) = self.unstopped_mut() {
                if !note.is_released() {
                    log::debug!("note released at frame {}", clock.frame());
                    note.release(clock);
                }
            }
            return;
        }

        let pitch = match nearest_pitch(registers.frequency(), self.clock_hz) {
            Some(pitch) => pitch,
            None => return,
        };
        let waveform = self.waveform(registers.control());
        let envelope = Envelope::from_registers(registers.attack_decay(), registers.sustain_release());

        match self.unstopped_mut() {
            Some(note) if !note.is_released() => {
                note.refresh(clock.frame(), pitch, waveform, envelope);
            }
            held => {
                // A new gate-high interval after a release always starts fresh
                if let Some(released) = held {
                    released.stop(clock);
                }
                log::debug!(
                    "note {} ({:?}) opened at frame {}",
                    pitch,
                    waveform,
                    clock.frame()
                );
                self.notes
                    .push(Note::open(clock.frame(), pitch, waveform, envelope));
            }
        }
    }

    /// Finalizes the last note, if it is still held or releasing.
    pub fn stop(&mut self, clock: &FrameClock) {
        if let Some(note) = self.unstopped_mut() {
            note.stop(clock);
        }
    }

    /// All notes produced so far, oldest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// The note that is held or releasing, if any.
    pub fn current(&self) -> Option<&Note> {
        self.notes.last().filter(|note| !note.is_stopped())
    }

    pub fn into_notes(self) -> Vec<Note> {
        self.notes
    }

    fn unstopped_mut(&mut self) -> Option<&mut Note> {
        self.notes.last_mut().filter(|note| !note.is_stopped())
    }

    /// Decodes the waveform bits, falling back to noise for anything that is
    /// not a single waveform. Each unknown pattern is reported once.
    fn waveform(&mut self, control: u8) -> Waveform {
        if let Some(waveform) = Waveform::from_control(control) {
            return waveform;
        }

        let mask = 1u16 << (control >> 4);
        if self.warned_waveforms & mask == 0 {
            self.warned_waveforms |= mask;
            log::warn!(
                "unknown waveform in control register 0x{:02X}, using noise",
                control
            );
        }
        Waveform::Noise
    }
}
