//! Tests for the MIDI export: event placement, channel mapping and file layout

use sid_notes::notes::{Envelope, Note, PitchBend, Waveform};
use sid_notes::output::{midi_file_bytes, note_events, write_midi, MidiEvent, MidiError};
use sid_notes::Error;
use std::io::{self, BufWriter, Write};

const PAL_FPS: f64 = 50.0;
const NTSC_FPS: f64 = 60.0;
const ONE_FRAME: f64 = 0.02;
const TWO_FRAMES: f64 = 0.04;
const THREE_FRAMES: f64 = 0.06;
const FOUR_FRAMES: f64 = 0.08;

/// A stopped note whose attack, decay and sustain each last `phase` seconds.
fn note(start_frame: u64, pitch: i32, waveform: Waveform, phase: f64) -> Note {
    let mut note = Note::open(
        start_frame,
        pitch,
        waveform,
        Envelope {
            attack: phase,
            decay: phase,
            release: phase,
        },
    );
    note.sustain_length = phase;
    note
}

/// Flattens timed events into (delta, event) pairs.
fn deltas(voices: &[Vec<Note>]) -> Vec<(u64, MidiEvent)> {
    deltas_at(voices, PAL_FPS)
}

fn deltas_at(voices: &[Vec<Note>], fps: f64) -> Vec<(u64, MidiEvent)> {
    let mut current = 0;
    note_events(voices, fps)
        .into_iter()
        .map(|timed| {
            let delta = timed.tick - current;
            current = timed.tick;
            (delta, timed.event)
        })
        .collect()
}

fn on(channel: usize, key: i32) -> MidiEvent {
    MidiEvent::NoteOn { channel, key }
}

fn off(channel: usize, key: i32) -> MidiEvent {
    MidiEvent::NoteOff { channel, key }
}

#[test]
fn test_sequential_notes_one_voice() {
    let voices = vec![
        vec![
            note(50, 75, Waveform::Triangle, ONE_FRAME),
            note(100, 76, Waveform::Triangle, TWO_FRAMES),
        ],
        vec![],
        vec![],
    ];

    assert_eq!(
        deltas(&voices),
        vec![(50, on(0, 75)), (3, off(0, 75)), (47, on(0, 76)), (6, off(0, 76))]
    );
}

#[test]
fn test_waveforms_use_separate_channels() {
    let voices = vec![
        vec![
            note(50, 75, Waveform::Triangle, ONE_FRAME),
            note(100, 76, Waveform::Sawtooth, ONE_FRAME),
            note(150, 77, Waveform::Pulse, ONE_FRAME),
            note(200, 78, Waveform::Noise, ONE_FRAME),
        ],
        vec![],
        vec![],
    ];

    assert_eq!(
        deltas(&voices),
        vec![
            (50, on(0, 75)),
            (3, off(0, 75)),
            (47, on(1, 76)),
            (3, off(1, 76)),
            (47, on(2, 77)),
            (3, off(2, 77)),
            (47, on(3, 78)),
            (3, off(3, 78)),
        ]
    );
}

#[test]
fn test_voices_map_to_channel_groups() {
    let voices = vec![
        vec![
            note(50, 75, Waveform::Triangle, ONE_FRAME),
            note(200, 78, Waveform::Triangle, TWO_FRAMES),
        ],
        vec![
            note(100, 76, Waveform::Triangle, TWO_FRAMES),
            note(250, 79, Waveform::Triangle, THREE_FRAMES),
        ],
        vec![
            note(150, 77, Waveform::Triangle, THREE_FRAMES),
            note(300, 80, Waveform::Triangle, FOUR_FRAMES),
        ],
    ];

    assert_eq!(
        deltas(&voices),
        vec![
            (50, on(0, 75)),
            (3, off(0, 75)),
            (47, on(4, 76)),
            (6, off(4, 76)),
            (44, on(8, 77)),
            (9, off(8, 77)),
            (41, on(0, 78)),
            (6, off(0, 78)),
            (44, on(4, 79)),
            (9, off(4, 79)),
            (41, on(8, 80)),
            (12, off(8, 80)),
        ]
    );
}

#[test]
fn test_interleaved_voices() {
    let voices = vec![
        vec![note(50, 75, Waveform::Triangle, ONE_FRAME)],
        vec![note(51, 76, Waveform::Triangle, TWO_FRAMES)],
        vec![note(52, 77, Waveform::Triangle, THREE_FRAMES)],
    ];

    assert_eq!(
        deltas(&voices),
        vec![
            (50, on(0, 75)),
            (1, on(4, 76)),
            (1, on(8, 77)),
            (1, off(0, 75)),
            (4, off(4, 76)),
            (4, off(8, 77)),
        ]
    );
}

#[test]
fn test_short_note_lasts_one_frame() {
    let voices = vec![vec![note(10, 60, Waveform::Pulse, 0.0)]];

    assert_eq!(deltas(&voices), vec![(10, on(2, 60)), (1, off(2, 60))]);
}

#[test]
fn test_pitch_bends_split_note() {
    // Held for 12 frames, bending up at frame 4 and back at frame 8
    let mut bent = note(0, 60, Waveform::Sawtooth, FOUR_FRAMES);
    bent.pitch_bends = vec![
        PitchBend { frame: 4, pitch: 62 },
        PitchBend { frame: 8, pitch: 60 },
        // Past the end of the note, dropped
        PitchBend { frame: 20, pitch: 64 },
    ];

    assert_eq!(
        deltas(&[vec![bent]]),
        vec![
            (0, on(1, 60)),
            (4, off(1, 60)),
            (0, on(1, 62)),
            (4, off(1, 62)),
            (0, on(1, 60)),
            (4, off(1, 60)),
        ]
    );
}

#[test]
fn test_restruck_key_releases_first() {
    let voices = vec![vec![
        note(0, 60, Waveform::Pulse, ONE_FRAME),
        note(3, 60, Waveform::Pulse, ONE_FRAME),
    ]];

    assert_eq!(
        deltas(&voices),
        vec![(0, on(2, 60)), (3, off(2, 60)), (0, on(2, 60)), (3, off(2, 60))]
    );
}

#[test]
fn test_file_layout() {
    let voices = vec![vec![note(50, 75, Waveform::Triangle, ONE_FRAME)], vec![], vec![]];
    let bytes = midi_file_bytes(&voices, PAL_FPS).unwrap();

    assert_eq!(
        &bytes[0..14],
        &[b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 3, 0, 25]
    );
    assert_eq!(&bytes[14..18], b"MTrk");

    let length = u32::from_be_bytes([bytes[18], bytes[19], bytes[20], bytes[21]]) as usize;
    let track = &bytes[22..];
    assert_eq!(track.len(), length);

    // Time signature then key signature, both at delta 0
    assert_eq!(&track[0..8], &[0x00, 0xFF, 0x58, 0x04, 4, 2, 24, 8]);
    assert_eq!(&track[8..14], &[0x00, 0xFF, 0x59, 0x02, 0, 0]);

    // Twelve program changes: channel n gets program n % 4 + 1
    for channel in 0..12u8 {
        let at = 14 + channel as usize * 3;
        assert_eq!(&track[at..at + 3], &[0x00, 0xC0 | channel, channel % 4 + 1]);
    }

    // NoteOn at delta 50, NoteOff three ticks later, then end of track
    assert_eq!(
        &track[50..],
        &[50, 0x90, 75, 40, 3, 0x80, 75, 40, 0x00, 0xFF, 0x2F, 0x00]
    );
}

#[test]
fn test_out_of_range_key_is_rejected() {
    let voices = vec![vec![note(0, -5, Waveform::Noise, ONE_FRAME)]];

    assert_eq!(
        midi_file_bytes(&voices, PAL_FPS),
        Err(MidiError::KeyOutOfRange(-5))
    );
}

#[test]
fn test_long_gap_uses_multi_byte_delta() {
    let voices = vec![vec![note(200, 60, Waveform::Triangle, ONE_FRAME)]];
    let bytes = midi_file_bytes(&voices, PAL_FPS).unwrap();
    let notes = &bytes[22 + 50..];

    // 200 = 0b1_1001000
    assert_eq!(&notes[0..5], &[0x81, 0x48, 0x90, 60, 40]);
}

#[test]
fn test_ntsc_frames_sharing_a_tick_keep_note_on_first() {
    // Frames 3 and 4 both round to tick 3 at 60 fps
    let voices = vec![vec![note(3, 70, Waveform::Triangle, 0.0)]];

    assert_eq!(deltas_at(&voices, NTSC_FPS), vec![(3, on(0, 70)), (1, off(0, 70))]);
}

#[test]
fn test_ntsc_bend_sharing_start_tick_replaces_key() {
    // Held frames 3..6, bending at frame 4; frames 3 and 4 are both tick 3
    let mut bent = note(3, 60, Waveform::Pulse, ONE_FRAME);
    bent.pitch_bends = vec![PitchBend { frame: 4, pitch: 62 }];

    assert_eq!(
        deltas_at(&[vec![bent]], NTSC_FPS),
        vec![(3, on(2, 62)), (2, off(2, 62))]
    );
}

#[test]
fn test_ntsc_vibrato_pairs_every_note_on_with_later_note_off() {
    // Two 36-frame notes bending on every frame
    let notes: Vec<Note> = [0u64, 40]
        .iter()
        .map(|&start| {
            let mut bent = note(start, 60, Waveform::Sawtooth, 0.2);
            bent.pitch_bends = (start + 1..start + 36)
                .map(|frame| PitchBend {
                    frame,
                    pitch: 60 + (frame % 2) as i32,
                })
                .collect();
            bent
        })
        .collect();

    let events = note_events(&[notes], NTSC_FPS);
    assert!(events.len() > 4);

    let mut sounding: Option<(u64, i32)> = None;
    for timed in events {
        match timed.event {
            MidiEvent::NoteOn { key, .. } => {
                assert_eq!(sounding, None, "overlapping note on at tick {}", timed.tick);
                sounding = Some((timed.tick, key));
            }
            MidiEvent::NoteOff { key, .. } => {
                let (start, sounding_key) = sounding.take().expect("note off without note on");
                assert_eq!(sounding_key, key);
                assert!(timed.tick > start, "empty segment at tick {}", start);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
    assert_eq!(sounding, None);
}

/// Accepts writes but fails to flush.
struct UnflushableWriter;

impl Write for UnflushableWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }
}

#[test]
fn test_write_midi_reports_flush_failure() {
    let voices = vec![vec![note(0, 60, Waveform::Triangle, ONE_FRAME)]];

    let err = write_midi(BufWriter::new(UnflushableWriter), &voices, PAL_FPS).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
