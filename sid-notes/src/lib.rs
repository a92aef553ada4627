//! # sid-notes
//!
//! Reconstructs the notes of a Commodore 64 PSID tune by running its player
//! routine on the [`sid6502`] CPU and watching what it writes to the sound
//! chip.
//!
//! Nothing is synthesized. At the end of every frame each of the three
//! voices looks at its latched gate, frequency, waveform and envelope
//! registers and decides whether a note starts, bends, or is released. The
//! result is a list of notes per voice with start frame, pitch, waveform and
//! envelope timings clipped to what actually sounded, which can be dumped as
//! JSON or written as a Standard MIDI File.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sid_notes::{output, Player, PlayerConfig, PsidFile, Region};
//!
//! # fn main() -> sid_notes::Result<()> {
//! let psid = PsidFile::read("Ocean_Loader_2.sid")?;
//! let config = PlayerConfig::default().with_region(Region::Pal);
//! let fps = config.region.frame_rate();
//!
//! let mut player = Player::new(&psid, config)?;
//! player.run_seconds(60.0)?;
//! let voices = player.finish();
//!
//! output::write_midi(std::fs::File::create("loader.mid")?, &voices, fps)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - `psid` - PSID container reader
//! - `config` - Region timing and player options
//! - `session` - The frame clock
//! - `devices` - The sound chip's register file
//! - `notes` - Per-voice note reconstruction
//! - `system` - The player driver
//! - `output` - JSON and MIDI serializers

pub mod config;
pub mod devices;
pub mod error;
pub mod notes;
pub mod output;
pub mod psid;
pub mod session;
pub mod system;

pub use config::{PlayerConfig, Region};
pub use devices::VoiceBank;
pub use error::{Error, Result};
pub use output::MidiError;
pub use psid::{PsidError, PsidFile};
pub use session::FrameClock;
pub use system::Player;
