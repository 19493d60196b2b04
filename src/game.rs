use anyhow::Result;
use log::info;
use rand::rngs::StdRng;

use crate::audio::AudioSink;
use crate::clock::{Clock, FrameLimiter};
use crate::grid::Grid;
use crate::input::InputSource;
use crate::render::Renderer;
use crate::session::{Control, Phase, Session};

pub const TICKS_PER_SECOND: u32 = 10;

/// Drives one session: input poll, state update, render, frame cap.
pub struct SnakeGame<'a, T, A, C>
where
    T: Renderer + InputSource,
    A: AudioSink,
    C: Clock,
{
    term: &'a mut T,
    audio: A,
    clock: C,
    rng: StdRng,
    session: Session,
    limiter: FrameLimiter,
}

impl<'a, T, A, C> SnakeGame<'a, T, A, C>
where
    T: Renderer + InputSource,
    A: AudioSink,
    C: Clock,
{
    pub fn new(term: &'a mut T, audio: A, clock: C, grid: Grid, mut rng: StdRng) -> Self {
        let session = Session::new(grid, &mut rng, &clock);
        SnakeGame { term, audio, clock, rng, session, limiter: FrameLimiter::new(TICKS_PER_SECOND) }
    }

    /// Runs until the player exits or quits.
    pub fn run(&mut self) -> Result<()> {
        loop {
            for event in self.term.poll_events()? {
                if self.session.handle_input(event, &mut self.rng, &self.clock) == Control::Exit {
                    info!("Exit requested");
                    return Ok(());
                }
            }

            self.session.tick(&mut self.rng, &self.clock, &mut self.audio);
            self.render()?;
            self.limiter.wait();
        }
    }

    fn render(&mut self) -> Result<()> {
        match self.session.phase() {
            Phase::Intro => self.term.draw_intro(),
            Phase::Playing => self.term.draw_frame(self.session.state()),
            Phase::GameOver => self.term.draw_game_over(self.session.state().score),
        }
    }
}
