//! Ports the host environment implements for the simulation.
//!
//! The core never owns a frame loop or a wall clock; it asks the host for
//! both through these traits.

/// Frame-scheduling primitive (e.g. `requestAnimationFrame`).
pub trait FrameScheduler {
    /// Ask the host to call `tick()` again on its next frame.
    fn request_frame(&mut self);
}

/// Millisecond clock used only to time ticks for diagnostics.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Scheduler that only remembers whether a frame was requested.
/// Hosts that poll (tests, headless drivers, the web bridge) read and clear it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingFrame {
    requested: bool,
}

impl PendingFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame is pending, without consuming it.
    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Consume the pending request. Returns whether one was set.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }
}

impl FrameScheduler for PendingFrame {
    fn request_frame(&mut self) {
        self.requested = true;
    }
}
