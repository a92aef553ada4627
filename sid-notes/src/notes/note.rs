//! A single reconstructed note and its lifecycle.
//!
//! A note is opened when a voice's gate goes high with a nonzero frequency,
//! refreshed every frame while the gate stays high, released when the gate
//! drops, and finally stopped. Release and stop both replace the nominal
//! envelope timings with what actually sounded.

use super::{Envelope, Waveform};
use crate::session::FrameClock;
use serde::Serialize;

/// A change of pitch inside a held note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PitchBend {
    /// Frame on which the new pitch was first observed.
    pub frame: u64,
    /// New note number.
    pub pitch: i32,
}

/// Where a note is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteState {
    /// Gate is held.
    Open,
    /// Gate dropped on `frame`; the release phase is sounding.
    Released { frame: u64 },
    /// Finalized; the record no longer changes.
    Stopped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Frame the gate went high.
    pub start_frame: u64,
    /// Note number at `start_frame`. Later changes are in `pitch_bends`.
    pub pitch: i32,
    pub waveform: Waveform,
    /// Attack duration in seconds.
    pub attack: f64,
    /// Decay duration in seconds.
    pub decay: f64,
    /// Seconds spent at the sustain level.
    pub sustain_length: f64,
    /// Release duration in seconds.
    pub release: f64,
    /// Pitch changes in frame order, never two equal pitches in a row.
    pub pitch_bends: Vec<PitchBend>,
    state: NoteState,
}

impl Note {
    /// Opens a note on the current frame.
    pub fn open(start_frame: u64, pitch: i32, waveform: Waveform, envelope: Envelope) -> Self {
        Self {
            start_frame,
            pitch,
            waveform,
            attack: envelope.attack,
            decay: envelope.decay,
            sustain_length: 0.0,
            release: envelope.release,
            pitch_bends: Vec::new(),
            state: NoteState::Open,
        }
    }

    pub fn state(&self) -> NoteState {
        self.state
    }

    /// True once the gate has dropped (or the note was stopped).
    pub fn is_released(&self) -> bool {
        self.state != NoteState::Open
    }

    pub fn is_stopped(&self) -> bool {
        self.state == NoteState::Stopped
    }

    /// The most recently observed pitch.
    pub fn current_pitch(&self) -> i32 {
        self.pitch_bends
            .last()
            .map(|bend| bend.pitch)
            .unwrap_or(self.pitch)
    }

    /// Applies this frame's register values to a held note.
    ///
    /// A pitch different from the current one records a bend on `frame`.
    /// Waveform and envelope timings are overwritten so that late register
    /// changes before the release are kept.
    pub fn refresh(&mut self, frame: u64, pitch: i32, waveform: Waveform, envelope: Envelope) {
        debug_assert_eq!(self.state, NoteState::Open, "refresh after release");

        if pitch != self.current_pitch() {
            self.pitch_bends.push(PitchBend { frame, pitch });
        }

        self.waveform = waveform;
        self.attack = envelope.attack;
        self.decay = envelope.decay;
        self.release = envelope.release;
    }

    /// Gate dropped: clip the envelope to the time the note actually sounded.
    ///
    /// If the note was released during its attack, the attack is shortened
    /// and there is no decay or sustain. Released during the decay, the decay
    /// is shortened. Otherwise the remainder is the sustain length. Releasing
    /// an already released note does nothing.
    pub fn release(&mut self, clock: &FrameClock) {
        if self.state != NoteState::Open {
            return;
        }

        let held = clock.seconds_since(self.start_frame);
        if held < self.attack {
            self.attack = held;
            self.decay = 0.0;
            self.sustain_length = 0.0;
        } else if held < self.attack + self.decay {
            self.decay = held - self.attack;
            self.sustain_length = 0.0;
        } else {
            self.sustain_length = held - self.attack - self.decay;
        }

        self.state = NoteState::Released {
            frame: clock.frame(),
        };
    }

    /// Finalizes the note.
    ///
    /// A released note keeps the shorter of its nominal release and the time
    /// that has passed since the release began. A note that was never
    /// released is released now with no release phase at all.
    pub fn stop(&mut self, clock: &FrameClock) {
        match self.state {
            NoteState::Open => {
                self.release(clock);
                self.release = 0.0;
            }
            NoteState::Released { frame } => {
                self.release = self.release.min(clock.seconds_since(frame));
            }
            NoteState::Stopped => return,
        }

        self.state = NoteState::Stopped;
    }

    /// Seconds from gate-on to gate-off.
    pub fn held_seconds(&self) -> f64 {
        self.attack + self.decay + self.sustain_length
    }
}
