//! Note reconstruction from latched voice registers.
//!
//! - `envelope`: ADSR duration tables and register decoding
//! - `pitch`: frequency register to note number
//! - `waveform`: control register waveform bits
//! - `note`: the note record and its open/release/stop lifecycle
//! - `reconstructor`: the per-voice end-of-frame state machine

mod envelope;
mod note;
mod pitch;
mod reconstructor;
mod waveform;

pub use envelope::{
    attack_seconds, decay_release_seconds, Envelope, ATTACK_SECONDS, DECAY_RELEASE_SECONDS,
};
pub use note::{Note, NoteState, PitchBend};
pub use pitch::{nearest_pitch, register_to_hz};
pub use reconstructor::NoteReconstructor;
pub use waveform::Waveform;
