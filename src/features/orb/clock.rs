//! Animation clock
//!
//! The single source of temporal variation. The host calls [`AnimationClock::tick`]
//! once per display refresh; time advances only while motion is enabled and is
//! frozen (never reset) otherwise.

use std::time::Duration;

/// Ticks per second the host is expected to drive the clock at
pub const TICK_RATE_HZ: u32 = 60;

/// Time added per tick while motion is enabled
pub const TICK_STEP: f64 = 1.0 / TICK_RATE_HZ as f64;

/// Wall-clock interval between ticks
pub const TICK_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE_HZ as u64);

/// Monotonic animation time
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationClock {
    time: f64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick. Returns the new time.
    pub fn tick(&mut self, motion_enabled: bool) -> f64 {
        if motion_enabled {
            self.time += TICK_STEP;
        }
        self.time
    }

    /// Current time in animation units
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Current time narrowed for the kernels and shader uniforms
    pub fn time_f32(&self) -> f32 {
        self.time() as f32
    }
}
