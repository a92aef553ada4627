//! JSON note dump.

use crate::notes::{Note, PitchBend, Waveform};
use serde::Serialize;
use std::io::Write;

/// One note in the dump, tagged with its voice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteRecord {
    /// 0-based voice number.
    pub voice: u8,
    pub start_frame: u64,
    /// Note number at `start_frame`. A note whose frequency moved while it
    /// sounded lists each change in `pitch_bends`, so this is not the pitch
    /// it ended on.
    pub pitch: i32,
    /// Note number after the last pitch bend, or `pitch` when there is none.
    pub final_pitch: i32,
    pub waveform: Waveform,
    pub attack: f64,
    pub decay: f64,
    pub sustain_length: f64,
    pub release: f64,
    pub pitch_bends: Vec<PitchBend>,
}

impl NoteRecord {
    pub fn new(voice: u8, note: &Note) -> Self {
        Self {
            voice,
            start_frame: note.start_frame,
            pitch: note.pitch,
            final_pitch: note.current_pitch(),
            waveform: note.waveform,
            attack: round3(note.attack),
            decay: round3(note.decay),
            sustain_length: note.sustain_length,
            release: round3(note.release),
            pitch_bends: note.pitch_bends.clone(),
        }
    }
}

/// Flattens per-voice note lists into one list ordered by start frame.
///
/// Notes starting on the same frame keep voice order.
pub fn note_records(voices: &[Vec<Note>]) -> Vec<NoteRecord> {
    let mut records: Vec<NoteRecord> = voices
        .iter()
        .enumerate()
        .flat_map(|(voice, notes)| notes.iter().map(move |note| NoteRecord::new(voice as u8, note)))
        .collect();

    records.sort_by_key(|record| record.start_frame);
    records
}

/// Writes the dump as pretty-printed JSON and flushes the writer.
pub fn write_json<W: Write>(mut writer: W, voices: &[Vec<Note>]) -> crate::Result<()> {
    serde_json::to_writer_pretty(&mut writer, &note_records(voices))?;
    writer.flush()?;
    Ok(())
}

fn round3(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}
