//! Conversion from the chip's 16-bit frequency register to note numbers.

/// The oscillator adds the frequency register to a 24-bit phase accumulator
/// once per clock cycle.
const ACCUMULATOR_STEPS: f64 = 16_777_216.0;

/// Reference pitch: A4 = 440 Hz = note 69.
const A4_HZ: f64 = 440.0;
const A4_NOTE: f64 = 69.0;

/// Output frequency in Hz for a frequency register value.
///
/// ```
/// use sid_notes::notes::register_to_hz;
///
/// // 0x1D45 is A4 on a PAL machine
/// let hz = register_to_hz(0x1D45, 985_248.0);
/// assert!((hz - 440.0).abs() < 0.05);
/// ```
pub fn register_to_hz(register: u16, clock_hz: f64) -> f64 {
    register as f64 * (clock_hz / ACCUMULATOR_STEPS)
}

/// Nearest note number (semitones, A4 = 69) for a frequency register value.
///
/// Rounds to the nearest integer with ties away from zero. A register value
/// of 0 has no pitch and yields `None`.
pub fn nearest_pitch(register: u16, clock_hz: f64) -> Option<i32> {
    if register == 0 {
        return None;
    }

    let hz = register_to_hz(register, clock_hz);
    Some((12.0 * (hz / A4_HZ).log2() + A4_NOTE).round() as i32)
}
