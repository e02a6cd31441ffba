use std::time::{Duration, Instant};

use crate::config::PlaybackSettings;

/// Timings of a simulated recitation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SimTimings {
    pub duration: Duration,
    pub tick: Duration,
    pub reset_delay: Duration,
}

impl Default for SimTimings {
    fn default() -> Self {
        Self::from(&PlaybackSettings::default())
    }
}

impl From<&PlaybackSettings> for SimTimings {
    fn from(p: &PlaybackSettings) -> Self {
        Self {
            duration: p.simulated_duration(),
            tick: p.tick(),
            reset_delay: p.reset_delay(),
        }
    }
}

impl SimTimings {
    /// Progress gained per tick, in percent.
    pub fn step(&self) -> f32 {
        if self.duration.is_zero() {
            return 100.0;
        }
        (self.tick.as_secs_f32() / self.duration.as_secs_f32()) * 100.0
    }
}

/// Periodic tick source for one simulated card. Dropping it cancels it.
#[derive(Debug)]
pub struct SimTimer {
    tick: Duration,
    next_tick: Instant,
}

impl SimTimer {
    pub fn start(now: Instant, tick: Duration) -> Self {
        let tick = tick.max(Duration::from_millis(1));
        Self {
            tick,
            next_tick: now + tick,
        }
    }

    /// Number of ticks that fired up to `now`; each is consumed once.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        if now < self.next_tick {
            return 0;
        }
        let behind = now.duration_since(self.next_tick);
        let extra = (behind.as_nanos() / self.tick.as_nanos()) as u32;
        let fired = extra.saturating_add(1);
        self.next_tick += self.tick * fired;
        fired
    }
}
