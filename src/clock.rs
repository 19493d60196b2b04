use std::thread::sleep;
use std::time::{Duration, Instant};

/// Monotonic millisecond counter. Only the HUD timer reads it; tick pacing
/// belongs to `FrameLimiter`.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock { origin: Instant::now() }
    }
}

impl Clock for MonotonicClock {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Caps the main loop at a fixed number of ticks per second by sleeping
/// whatever is left of the current frame.
pub struct FrameLimiter {
    frame: Duration,
    last_frame: Instant,
}

impl FrameLimiter {
    pub fn new(ticks_per_second: u32) -> Self {
        FrameLimiter {
            frame: Duration::from_secs(1) / ticks_per_second,
            last_frame: Instant::now(),
        }
    }

    pub fn wait(&mut self) {
        let elapsed = self.last_frame.elapsed();
        if elapsed < self.frame {
            sleep(self.frame - elapsed);
        }
        self.last_frame = Instant::now();
    }
}
