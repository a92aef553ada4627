//! Machine assembly and the frame loop.

mod player;

pub use player::Player;
