use log::info;
use rand::Rng;

use crate::audio::AudioSink;
use crate::clock::Clock;
use crate::grid::Grid;
use crate::input::{InputEvent, InputLatch};
use crate::state::{GameState, TickOutcome};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Intro,
    Playing,
    GameOver,
}

/// Whether the process should keep going after an input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Top-level state machine: Intro -> Playing -> (GameOver -> Playing) | Exit.
pub struct Session {
    phase: Phase,
    state: GameState,
    latch: InputLatch,
}

impl Session {
    pub fn new<R: Rng + ?Sized>(grid: Grid, rng: &mut R, clock: &dyn Clock) -> Self {
        Session { phase: Phase::Intro, state: GameState::new(grid, rng, clock), latch: InputLatch::new() }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn handle_input<R: Rng + ?Sized>(
        &mut self,
        event: InputEvent,
        rng: &mut R,
        clock: &dyn Clock,
    ) -> Control {
        match (self.phase, event) {
            (_, InputEvent::Quit) => return Control::Exit,

            (Phase::Intro, InputEvent::Confirm) => {
                self.state.restart_clock(clock);
                self.enter(Phase::Playing);
            }
            (Phase::Intro, InputEvent::Exit) => return Control::Exit,

            (Phase::Playing, InputEvent::Turn(direction)) => {
                self.latch.offer(direction, &mut self.state.snake);
            }

            (Phase::GameOver, InputEvent::Confirm) => {
                self.state.reset(rng, clock);
                self.latch.release();
                self.enter(Phase::Playing);
            }
            (Phase::GameOver, InputEvent::Exit) => return Control::Exit,

            _ => {}
        }

        Control::Continue
    }

    /// Advances the simulation by one tick. Only the Playing phase moves.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, clock: &dyn Clock, audio: &mut dyn AudioSink) {
        if self.phase != Phase::Playing {
            return;
        }

        let outcome = self.state.update(rng, clock, audio);
        self.latch.release();

        if outcome == TickOutcome::GameOver {
            info!("Game over, final score {}", self.state.score);
            self.enter(Phase::GameOver);
        }
    }

    fn enter(&mut self, phase: Phase) {
        info!("{:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }
}
