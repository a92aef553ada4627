//! Standard MIDI file export.
//!
//! Each voice/waveform pair gets its own channel (`voice * 4 + waveform`)
//! with program `waveform + 1`, so the twelve combinations can be given
//! distinct instruments in a sequencer. Everything goes into a single
//! track at 25 ticks per quarter note, which at the default tempo of 120
//! BPM is 50 ticks per second: one tick per PAL frame.

use crate::notes::Note;
use std::io::Write;

/// Ticks per quarter note.
pub const DIVISION: u16 = 25;

/// Ticks per second at the default tempo.
pub const TICKS_PER_SECOND: f64 = 50.0;

/// Tracks declared in the header.
pub const DECLARED_TRACKS: u16 = 3;

/// Velocity used for every note on and off.
pub const VELOCITY: u8 = 40;

/// Channels used: four waveforms for each of three voices.
const CHANNELS: u8 = 12;

/// Values that do not fit the MIDI wire format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MidiError {
    #[error("channel {0} is out of range (0-15)")]
    ChannelOutOfRange(usize),

    #[error("key {0} is out of range (0-127)")]
    KeyOutOfRange(i32),

    #[error("program {0} is out of range (0-127)")]
    ProgramOutOfRange(u8),
}

/// A track event, without its delta time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    TimeSignature {
        numerator: u8,
        denominator_power_of_two: u8,
        clocks_per_click: u8,
        thirty_seconds_per_quarter: u8,
    },
    KeySignature {
        sharps_or_flats: i8,
        major: bool,
    },
    ProgramChange {
        channel: usize,
        program: u8,
    },
    NoteOn {
        channel: usize,
        key: i32,
    },
    NoteOff {
        channel: usize,
        key: i32,
    },
    EndOfTrack,
}

impl MidiEvent {
    /// Encodes the event.
    ///
    /// ```
    /// use sid_notes::output::MidiEvent;
    ///
    /// let on = MidiEvent::NoteOn { channel: 4, key: 69 };
    /// assert_eq!(on.bytes().unwrap(), vec![0x94, 69, 40]);
    ///
    /// let bad = MidiEvent::NoteOn { channel: 16, key: 69 };
    /// assert!(bad.bytes().is_err());
    /// ```
    pub fn bytes(&self) -> Result<Vec<u8>, MidiError> {
        let bytes = match *self {
            MidiEvent::TimeSignature {
                numerator,
                denominator_power_of_two,
                clocks_per_click,
                thirty_seconds_per_quarter,
            } => vec![
                0xFF,
                0x58,
                0x04,
                numerator,
                denominator_power_of_two,
                clocks_per_click,
                thirty_seconds_per_quarter,
            ],
            MidiEvent::KeySignature {
                sharps_or_flats,
                major,
            } => vec![0xFF, 0x59, 0x02, sharps_or_flats as u8, if major { 0 } else { 1 }],
            MidiEvent::ProgramChange { channel, program } => {
                if program > 127 {
                    return Err(MidiError::ProgramOutOfRange(program));
                }
                vec![0xC0 | channel_nibble(channel)?, program]
            }
            MidiEvent::NoteOn { channel, key } => {
                vec![0x90 | channel_nibble(channel)?, key_byte(key)?, VELOCITY]
            }
            MidiEvent::NoteOff { channel, key } => {
                vec![0x80 | channel_nibble(channel)?, key_byte(key)?, VELOCITY]
            }
            MidiEvent::EndOfTrack => vec![0xFF, 0x2F, 0x00],
        };

        Ok(bytes)
    }

    fn is_note_on(&self) -> bool {
        matches!(self, MidiEvent::NoteOn { .. })
    }
}

fn channel_nibble(channel: usize) -> Result<u8, MidiError> {
    if channel > 15 {
        return Err(MidiError::ChannelOutOfRange(channel));
    }
    Ok(channel as u8)
}

fn key_byte(key: i32) -> Result<u8, MidiError> {
    if !(0..=127).contains(&key) {
        return Err(MidiError::KeyOutOfRange(key));
    }
    Ok(key as u8)
}

/// Encodes a delta time as a variable-length quantity, most significant
/// group first.
///
/// ```
/// use sid_notes::output::delta_time;
///
/// assert_eq!(delta_time(0), vec![0x00]);
/// assert_eq!(delta_time(127), vec![0x7F]);
/// assert_eq!(delta_time(128), vec![0x81, 0x00]);
/// assert_eq!(delta_time(0x0FFF_FFFF), vec![0xFF, 0xFF, 0xFF, 0x7F]);
/// ```
pub fn delta_time(ticks: u32) -> Vec<u8> {
    let mut groups = vec![(ticks & 0x7F) as u8];
    let mut rest = ticks >> 7;
    while rest > 0 {
        groups.push((rest & 0x7F) as u8 | 0x80);
        rest >>= 7;
    }
    groups.reverse();
    groups
}

/// An event placed at an absolute tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedEvent {
    pub tick: u64,
    pub event: MidiEvent,
}

/// Converts a frame number to a tick.
pub fn frame_to_tick(frame: u64, fps: f64) -> u64 {
    (frame as f64 * TICKS_PER_SECOND / fps).round() as u64
}

/// Sounding length of a note in whole frames, at least one.
pub fn note_frames(note: &Note, fps: f64) -> u64 {
    ((fps * note.held_seconds()).floor() as u64).max(1)
}

/// Builds the note events of every voice, sorted by tick.
///
/// A note with pitch bends becomes consecutive segments, each ending where
/// the next pitch starts. Bends at or after the note's end are dropped. On
/// the same tick, note offs come before note ons so a re-struck key is not
/// cut short.
///
/// Above 50 fps neighbouring frames can round to the same tick. Segments of
/// one note that start on the same tick collapse into one, keeping the later
/// pitch. Every segment lasts at least one tick, and a note never starts
/// before the previous note on its channel has ended, so each note on comes
/// strictly before its note off.
pub fn note_events(voices: &[Vec<Note>], fps: f64) -> Vec<TimedEvent> {
    let mut events = Vec::new();

    for (voice, notes) in voices.iter().enumerate() {
        // Per waveform, the tick the channel's last segment ended on
        let mut channel_free = [0u64; 4];

        for note in notes {
            let slot = note.waveform.index() as usize;
            let channel = voice * 4 + slot;
            let end = note.start_frame + note_frames(note, fps);

            let bends = note
                .pitch_bends
                .iter()
                .filter(|bend| bend.frame > note.start_frame && bend.frame < end)
                .map(|bend| (bend.frame, bend.pitch));

            let mut segments: Vec<(u64, i32)> = Vec::new();
            for (frame, key) in std::iter::once((note.start_frame, note.pitch)).chain(bends) {
                let tick = frame_to_tick(frame, fps).max(channel_free[slot]);
                match segments.last_mut() {
                    Some(last) if last.0 >= tick => last.1 = key,
                    _ => segments.push((tick, key)),
                }
            }

            let end_tick = frame_to_tick(end, fps);
            for (index, &(on_tick, key)) in segments.iter().enumerate() {
                let until = segments.get(index + 1).map_or(end_tick, |&(next, _)| next);
                let off_tick = until.max(on_tick + 1);
                channel_free[slot] = off_tick;

                events.push(TimedEvent {
                    tick: on_tick,
                    event: MidiEvent::NoteOn { channel, key },
                });
                events.push(TimedEvent {
                    tick: off_tick,
                    event: MidiEvent::NoteOff { channel, key },
                });
            }
        }
    }

    events.sort_by_key(|timed| (timed.tick, timed.event.is_note_on()));
    events
}

/// Events that open the track: meter, key and one program per channel.
fn preamble() -> Vec<MidiEvent> {
    let mut events = vec![
        MidiEvent::TimeSignature {
            numerator: 4,
            denominator_power_of_two: 2,
            clocks_per_click: 24,
            thirty_seconds_per_quarter: 8,
        },
        MidiEvent::KeySignature {
            sharps_or_flats: 0,
            major: true,
        },
    ];

    events.extend((0..CHANNELS).map(|channel| MidiEvent::ProgramChange {
        channel: channel as usize,
        program: channel % 4 + 1,
    }));
    events
}

/// Encodes the body of the single `MTrk` chunk.
pub fn track_bytes(voices: &[Vec<Note>], fps: f64) -> Result<Vec<u8>, MidiError> {
    let mut bytes = Vec::new();

    for event in preamble() {
        bytes.extend(delta_time(0));
        bytes.extend(event.bytes()?);
    }

    let mut current = 0u64;
    for timed in note_events(voices, fps) {
        let delta = (timed.tick - current).min(u32::MAX as u64) as u32;
        bytes.extend(delta_time(delta));
        bytes.extend(timed.event.bytes()?);
        current = timed.tick;
    }

    bytes.extend(delta_time(0));
    bytes.extend(MidiEvent::EndOfTrack.bytes()?);
    Ok(bytes)
}

/// Encodes a complete file: header chunk followed by the track chunk.
pub fn midi_file_bytes(voices: &[Vec<Note>], fps: f64) -> Result<Vec<u8>, MidiError> {
    let track = track_bytes(voices, fps)?;

    let mut bytes = Vec::with_capacity(22 + track.len());
    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&6u32.to_be_bytes());
    bytes.extend_from_slice(&1u16.to_be_bytes());
    bytes.extend_from_slice(&DECLARED_TRACKS.to_be_bytes());
    bytes.extend_from_slice(&DIVISION.to_be_bytes());

    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&(track.len() as u32).to_be_bytes());
    bytes.extend_from_slice(&track);

    Ok(bytes)
}

/// Encodes the file, writes it out and flushes the writer.
pub fn write_midi<W: Write>(mut writer: W, voices: &[Vec<Note>], fps: f64) -> crate::Result<()> {
    let bytes = midi_file_bytes(voices, fps)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
