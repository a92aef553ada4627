//! Playback configuration.

use sid6502::IllegalOpcodePolicy;

/// Video standard, which fixes the CPU clock and the frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    /// PAL timing: 985,248 Hz, 50 frames per second
    #[default]
    Pal,
    /// NTSC timing: 1,022,727 Hz, 60 frames per second
    Ntsc,
}

impl Region {
    /// CPU (and sound chip) clock frequency in Hz.
    pub fn clock_hz(&self) -> u32 {
        match self {
            Region::Pal => 985_248,
            Region::Ntsc => 1_022_727,
        }
    }

    /// Output frames per second.
    pub fn frame_rate(&self) -> f64 {
        match self {
            Region::Pal => 50.0,
            Region::Ntsc => 60.0,
        }
    }

    /// Whole CPU cycles executed per frame, `floor(clock / fps)`.
    pub fn cycles_per_frame(&self) -> u64 {
        (self.clock_hz() as f64 / self.frame_rate()).floor() as u64
    }
}

/// Frames' worth of cycles the init routine may run before it is abandoned.
const DEFAULT_INIT_FRAMES: u64 = 50;

/// Options for [`Player`](crate::Player).
///
/// # Examples
///
/// ```
/// use sid_notes::{PlayerConfig, Region};
/// use sid6502::IllegalOpcodePolicy;
///
/// let config = PlayerConfig::default()
///     .with_region(Region::Ntsc)
///     .with_song(2)
///     .with_illegal_opcode_policy(IllegalOpcodePolicy::Nop);
///
/// assert_eq!(config.cycles_per_frame(), 17_045);
/// assert_eq!(config.init_cycle_limit(), 50 * 17_045);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerConfig {
    /// Clock and frame rate.
    pub region: Region,

    /// 1-based song number. `None` selects the file's start song.
    pub song: Option<u16>,

    /// What the CPU does with opcodes that have no handler.
    pub illegal_opcodes: IllegalOpcodePolicy,

    /// Cycle budget for the init routine. `None` means 50 frames' worth.
    pub init_cycles: Option<u64>,
}

impl PlayerConfig {
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    pub fn with_song(mut self, song: u16) -> Self {
        self.song = Some(song);
        self
    }

    pub fn with_illegal_opcode_policy(mut self, policy: IllegalOpcodePolicy) -> Self {
        self.illegal_opcodes = policy;
        self
    }

    pub fn with_init_cycles(mut self, cycles: u64) -> Self {
        self.init_cycles = Some(cycles);
        self
    }

    /// CPU cycles executed between two frame boundaries.
    pub fn cycles_per_frame(&self) -> u64 {
        self.region.cycles_per_frame()
    }

    /// Effective cycle budget for the init routine.
    pub fn init_cycle_limit(&self) -> u64 {
        self.init_cycles
            .unwrap_or(DEFAULT_INIT_FRAMES * self.cycles_per_frame())
    }
}
