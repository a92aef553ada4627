//! The frame clock shared by the player and the note reconstructors.
//!
//! One frame is one call of the tune's play routine. The clock is owned by
//! the driver and passed by reference to everything that needs to know the
//! current frame, so independent sessions never share state.

/// Monotonically increasing frame counter with a fixed frame rate.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameClock {
    frame: u64,
    fps: f64,
}

impl FrameClock {
    /// Creates a clock at frame 0.
    ///
    /// # Panics
    ///
    /// Panics if `fps` is not a positive finite number.
    pub fn new(fps: f64) -> Self {
        assert!(
            fps.is_finite() && fps > 0.0,
            "frame rate must be positive, got {}",
            fps
        );
        Self { frame: 0, fps }
    }

    /// The current frame.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Frames per second.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Moves to the next frame.
    pub fn advance(&mut self) {
        self.frame += 1;
    }

    /// Seconds between `since` and the current frame.
    pub fn seconds_since(&self, since: u64) -> f64 {
        self.frame.saturating_sub(since) as f64 / self.fps
    }

    /// Number of whole frames in `seconds`, rounded up.
    pub fn frames_in(&self, seconds: f64) -> u64 {
        (seconds * self.fps).ceil().max(0.0) as u64
    }
}
