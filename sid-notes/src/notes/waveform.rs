//! Oscillator waveform selection from the voice control register.

use serde::Serialize;

/// One of the four oscillator waveforms.
///
/// The discriminant order matches the control register bit order (bit 4 =
/// triangle through bit 7 = noise) and is used as the waveform index when
/// mapping voices onto output channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Triangle,
    Sawtooth,
    Pulse,
    Noise,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Triangle,
        Waveform::Sawtooth,
        Waveform::Pulse,
        Waveform::Noise,
    ];

    /// Decodes bits 4-7 of a control register.
    ///
    /// Returns `None` unless exactly one waveform bit is set. Combined
    /// waveforms and a silent oscillator have no single waveform.
    ///
    /// ```
    /// use sid_notes::notes::Waveform;
    ///
    /// assert_eq!(Waveform::from_control(0x41), Some(Waveform::Pulse));
    /// assert_eq!(Waveform::from_control(0x51), None); // triangle + pulse
    /// assert_eq!(Waveform::from_control(0x01), None);
    /// ```
    pub fn from_control(control: u8) -> Option<Self> {
        match control >> 4 {
            0b0001 => Some(Waveform::Triangle),
            0b0010 => Some(Waveform::Sawtooth),
            0b0100 => Some(Waveform::Pulse),
            0b1000 => Some(Waveform::Noise),
            _ => None,
        }
    }

    /// Position of the waveform bit above bit 4 (0-3).
    pub fn index(self) -> u8 {
        self as u8
    }
}
