//! ADSR duration tables.
//!
//! The sound chip's envelope generator takes a 4-bit rate for attack, decay
//! and release. These tables give the nominal duration, in seconds, of a full
//! attack (0 to peak) and of a full decay or release (peak to 0) for each
//! rate, as published in the chip's datasheet for a 1 MHz clock.

/// Full attack time in seconds for each attack rate.
pub const ATTACK_SECONDS: [f64; 16] = [
    0.002, // 0: 2 ms
    0.008, // 1: 8 ms
    0.016, // 2: 16 ms
    0.024, // 3: 24 ms
    0.038, // 4: 38 ms
    0.056, // 5: 56 ms
    0.068, // 6: 68 ms
    0.08,  // 7: 80 ms
    0.1,   // 8: 100 ms
    0.25,  // 9: 250 ms
    0.5,   // 10: 500 ms
    0.8,   // 11: 800 ms
    1.0,   // 12: 1 s
    3.0,   // 13: 3 s
    5.0,   // 14: 5 s
    8.0,   // 15: 8 s
];

/// Full decay or release time in seconds for each rate.
pub const DECAY_RELEASE_SECONDS: [f64; 16] = [
    0.006, // 0: 6 ms
    0.024, // 1: 24 ms
    0.048, // 2: 48 ms
    0.072, // 3: 72 ms
    0.114, // 4: 114 ms
    0.168, // 5: 168 ms
    0.204, // 6: 204 ms
    0.240, // 7: 240 ms
    0.3,   // 8: 300 ms
    0.75,  // 9: 750 ms
    1.5,   // 10: 1.5 s
    2.4,   // 11: 2.4 s
    3.0,   // 12: 3 s
    9.0,   // 13: 9 s
    15.0,  // 14: 15 s
    24.0,  // 15: 24 s
];

/// Attack duration for a 4-bit rate.
///
/// # Panics
///
/// Panics if `rate` is greater than 15. Rates are always extracted from a
/// nibble, so a larger value is a bug in the caller.
pub fn attack_seconds(rate: u8) -> f64 {
    assert!(rate <= 0x0F, "attack rate {} is not a 4-bit value", rate);
    ATTACK_SECONDS[rate as usize]
}

/// Decay or release duration for a 4-bit rate.
///
/// # Panics
///
/// Panics if `rate` is greater than 15.
pub fn decay_release_seconds(rate: u8) -> f64 {
    assert!(
        rate <= 0x0F,
        "decay/release rate {} is not a 4-bit value",
        rate
    );
    DECAY_RELEASE_SECONDS[rate as usize]
}

/// Nominal envelope timing decoded from the AD and SR registers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub attack: f64,
    pub decay: f64,
    pub release: f64,
}

impl Envelope {
    /// Decodes the attack/decay and sustain/release register pair.
    ///
    /// Attack is the high nibble of `attack_decay`, decay its low nibble.
    /// Release is the low nibble of `sustain_release`; the high nibble is a
    /// level, not a duration.
    ///
    /// ```
    /// use sid_notes::notes::Envelope;
    ///
    /// let envelope = Envelope::from_registers(0x29, 0xA8);
    /// assert_eq!(envelope.attack, 0.016);
    /// assert_eq!(envelope.decay, 0.75);
    /// assert_eq!(envelope.release, 0.3);
    /// ```
    pub fn from_registers(attack_decay: u8, sustain_release: u8) -> Self {
        Self {
            attack: attack_seconds(attack_decay >> 4),
            decay: decay_release_seconds(attack_decay & 0x0F),
            release: decay_release_seconds(sustain_release & 0x0F),
        }
    }
}
