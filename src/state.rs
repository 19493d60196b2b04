use std::mem;
use std::ops::RangeInclusive;

use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::audio::{AudioSink, SoundCue};
use crate::clock::Clock;
use crate::food::{Entity, Food, Poison, SpecialFood};
use crate::grid::{Cell, Grid};
use crate::snake::{Direction, Snake};

pub const INITIAL_LIVES: u32 = 3;
pub const MAX_LIVES: u32 = 5;

const START_COLUMN: i32 = 2;
const START_ROW: i32 = 1;

const SPECIAL_FOOD_SCORE: u32 = 5;
const FOOD_PER_SPECIAL: u32 = 5;
const SPECIAL_TIMER_STEP: f32 = 0.5;
const SPECIAL_COOLDOWN: f32 = 20.0;
const SPECIAL_LIFETIME: f32 = 25.0;
const SPECIAL_COUNTDOWN_FROM: f32 = 24.0;

const POISON_PERIOD: u32 = 50;
const POISON_BATCH: RangeInclusive<usize> = 2..=6;

const PLACEMENT_ATTEMPTS: usize = 1000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    GameOver,
}

/// Everything that changes while a round is being played.
pub struct GameState {
    grid: Grid,
    pub snake: Snake,
    pub food: Food,
    pub special_food: Option<SpecialFood>,
    pub poisons: Vec<Poison>,
    pub score: u32,
    pub lives: u32,
    start_millis: u64,
    now_millis: u64,
    special_timer: f32,
    poison_timer: u32,
    food_eaten: u32,
}

impl GameState {
    pub fn new<R: Rng + ?Sized>(grid: Grid, rng: &mut R, clock: &dyn Clock) -> Self {
        let snake = Snake::new(grid.cell_at(START_COLUMN, START_ROW), Direction::Right);

        let mut food = Food::new(grid.random_cell(rng));
        if !place(&mut food, &grid, rng, |cell| !snake.contains(cell)) {
            warn!("Board has no room for food");
        }

        let now = clock.now_millis();
        GameState {
            grid,
            snake,
            food,
            special_food: None,
            poisons: Vec::new(),
            score: 0,
            lives: INITIAL_LIVES,
            start_millis: now,
            now_millis: now,
            special_timer: 0.0,
            poison_timer: 0,
            food_eaten: 0,
        }
    }

    /// Throws the round away and starts a fresh one on the same board.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, clock: &dyn Clock) {
        *self = GameState::new(self.grid, rng, clock);
    }

    /// Starts the HUD timer from now.
    pub fn restart_clock(&mut self, clock: &dyn Clock) {
        self.start_millis = clock.now_millis();
        self.now_millis = self.start_millis;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn elapsed_millis(&self) -> u64 {
        self.now_millis.saturating_sub(self.start_millis)
    }

    /// Seconds shown on top of the special food while it is on the board.
    pub fn special_countdown(&self) -> Option<u32> {
        self.special_food
            .map(|_| (SPECIAL_COUNTDOWN_FROM - self.special_timer).max(0.0) as u32)
    }

    /// Advances the round by one tick.
    ///
    /// A self-collision game over ends the tick on the spot. A poison game over
    /// lets the poison scan finish, so earlier hits in the same tick still count.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        clock: &dyn Clock,
        audio: &mut dyn AudioSink,
    ) -> TickOutcome {
        let head = self.snake.move_step(&self.grid);

        if head == self.food.cell() {
            self.score += 1;
            audio.play(SoundCue::FoodEaten);
            self.respawn_food(rng);
            self.food_eaten += 1;
            debug!("Food eaten, score {}", self.score);
        } else {
            self.snake.pop_tail();
        }

        if self.snake.hits_itself() {
            self.lives = self.lives.saturating_sub(1);
            audio.play(SoundCue::HitSelf);

            if self.lives > 1 {
                self.snake.truncate_to_head();
                debug!("Snake bit itself, {} lives left", self.lives);
            } else {
                info!("Snake bit itself with no lives to spare");
                return TickOutcome::GameOver;
            }
        }

        self.now_millis = clock.now_millis();
        self.special_timer += SPECIAL_TIMER_STEP;
        self.poison_timer += 1;

        if let Some(special) = self.special_food.as_mut() {
            special.grow_older();
        }

        if self.food_eaten == FOOD_PER_SPECIAL {
            if self.special_timer >= SPECIAL_COOLDOWN {
                self.spawn_special_food(rng);
                self.special_timer = 0.0;
            }
            self.food_eaten = 0;
        }

        if self.special_timer >= SPECIAL_LIFETIME {
            if let Some(special) = self.special_food.take() {
                debug!("Special food expired after {} ticks", special.age());
            }
        }

        if self.poison_timer == POISON_PERIOD {
            self.regenerate_poisons(rng);
            self.poison_timer = 0;
        }

        if self.special_food.map_or(false, |special| special.cell() == head) {
            self.lives = (self.lives + 1).min(MAX_LIVES);
            self.score += SPECIAL_FOOD_SCORE;
            audio.play(SoundCue::SpecialFoodEaten);
            self.special_food = None;
            debug!("Special food eaten, score {}, lives {}", self.score, self.lives);
        }

        self.eat_poisons(head, audio)
    }

    fn respawn_food<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let snake = &self.snake;
        if !place(&mut self.food, &self.grid, rng, |cell| !snake.contains(cell)) {
            warn!("Board has no room for food, leaving it in place");
        }
    }

    fn spawn_special_food<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let snake = &self.snake;
        let mut special = SpecialFood::new(self.grid.random_cell(rng));

        if place(&mut special, &self.grid, rng, |cell| !snake.contains(cell)) {
            debug!("Special food spawned at {:?}", special.cell());
            self.special_food = Some(special);
        } else {
            warn!("Board has no room for special food");
        }
    }

    fn regenerate_poisons<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let count = rng.gen_range(POISON_BATCH);
        let grid = &self.grid;
        let snake = &self.snake;
        let head = snake.head();
        let food = self.food.cell();
        let special = self.special_food.map(|special| special.cell());

        let allowed = |cell: Cell| {
            !snake.contains(cell)
                && !grid.is_near(cell, head)
                && !special.map_or(false, |special| grid.is_near(cell, special))
                && !grid.is_near(cell, food)
        };

        let mut batch = Vec::with_capacity(count);
        for _ in 0..count {
            let mut poison = Poison::new(grid.random_cell(rng));
            if place(&mut poison, grid, rng, &allowed) {
                batch.push(poison);
            } else {
                warn!("Board has no room for poison, batch cut short");
            }
        }

        debug!("Poison batch regenerated with {} cells", batch.len());
        self.poisons = batch;
    }

    /// Scans a snapshot of the batch and drops the eaten poisons once the scan is over.
    /// A poison that ends the game stays on the board.
    fn eat_poisons(&mut self, head: Cell, audio: &mut dyn AudioSink) -> TickOutcome {
        let mut outcome = TickOutcome::Running;
        let mut remaining = Vec::with_capacity(self.poisons.len());

        for poison in mem::take(&mut self.poisons) {
            if poison.cell() == head {
                if self.lives > 1 {
                    self.lives -= 1;
                    audio.play(SoundCue::PoisonHit);
                    debug!("Poison eaten, {} lives left", self.lives);
                    continue;
                }

                info!("Poison eaten with no lives to spare");
                outcome = TickOutcome::GameOver;
            }
            remaining.push(poison);
        }

        self.poisons = remaining;
        outcome
    }
}

/// Respawns `entity` until it lands on an allowed cell. After a bounded number of
/// random draws, falls back to picking among every allowed cell; with none left
/// the entity goes back where it was and `false` is returned.
fn place<E, R, F>(entity: &mut E, grid: &Grid, rng: &mut R, allowed: F) -> bool
where
    E: Entity,
    R: Rng + ?Sized,
    F: Fn(Cell) -> bool,
{
    let previous = entity.cell();

    for _ in 0..PLACEMENT_ATTEMPTS {
        entity.respawn(grid, rng);
        if allowed(entity.cell()) {
            return true;
        }
    }

    let free: Vec<Cell> = grid.cells().filter(|&cell| allowed(cell)).collect();
    match free.choose(rng) {
        Some(&cell) => {
            entity.set_cell(cell);
            true
        }
        None => {
            entity.set_cell(previous);
            false
        }
    }
}
