use std::io::{stdout, Stdout, Write};

use log::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SoundCue {
    FoodEaten,
    PoisonHit,
    SpecialFoodEaten,
    HitSelf,
}

/// Fire-and-forget sound triggers.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Rings the terminal bell for every cue.
pub struct TerminalBell {
    enabled: bool,
    stdout: Stdout,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        TerminalBell { enabled, stdout: stdout() }
    }
}

impl AudioSink for TerminalBell {
    fn play(&mut self, cue: SoundCue) {
        debug!("sound cue: {:?}", cue);

        if self.enabled {
            // Bell failures are ignored
            let _ = self.stdout.write_all(b"\x07").and_then(|_| self.stdout.flush());
        }
    }
}
