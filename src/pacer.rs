use std::time::{Duration, Instant};

/// Length of one tick at `rate` ticks per second.
pub fn tick_duration(rate: f64) -> Duration {
    Duration::from_secs_f64(1.0 / rate)
}

/// Tracks when the next tick is due at a given rate.
///
/// The game loop waits on the input queue for `remaining()` instead of
/// sleeping, so a quit key never has to sit out the rest of a frame.
pub struct FramePacer {
    last_tick: Instant,
}

impl FramePacer {
    pub fn new() -> Self {
        FramePacer { last_tick: Instant::now() }
    }

    pub fn remaining(&self, rate: f64) -> Duration {
        tick_duration(rate).checked_sub(self.last_tick.elapsed()).unwrap_or_default()
    }

    pub fn is_due(&self, rate: f64) -> bool {
        self.last_tick.elapsed() >= tick_duration(rate)
    }

    pub fn mark_tick(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new()
    }
}
