//! Crate-level error type.

use crate::output::MidiError;
use crate::psid::PsidError;
use sid6502::{AttachError, ExecutionError, LoadError};

/// Result type for player and output operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input container was rejected.
    #[error(transparent)]
    Psid(#[from] PsidError),

    /// The CPU stopped on an opcode it was not allowed to execute.
    #[error("CPU fault in frame {frame}: {source}")]
    Execution {
        /// Frame being rendered, or 0 during init
        frame: u64,
        source: ExecutionError,
    },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Attach(#[from] AttachError),

    #[error(transparent)]
    Midi(#[from] MidiError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The tune installs its own interrupt handler instead of exposing a
    /// play routine.
    #[error("play address is 0; interrupt-driven players are not supported")]
    UnsupportedPlayAddress,

    /// The init routine did not return within its cycle budget.
    #[error("init routine did not return within {cycles} cycles (PC=${pc:04X})")]
    InitTimeout { cycles: u64, pc: u16 },

    #[error("song {song} does not exist (file has {songs} songs)")]
    InvalidSong { song: u16, songs: u16 },
}
