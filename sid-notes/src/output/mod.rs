//! Serializers for reconstructed notes.
//!
//! - [`dump`]: JSON list of every note, ordered by start frame
//! - [`midi`]: format 1 Standard MIDI File

pub mod dump;
pub mod midi;

pub use dump::{note_records, write_json, NoteRecord};
pub use midi::{
    delta_time, midi_file_bytes, note_events, write_midi, MidiError, MidiEvent, TimedEvent,
};
