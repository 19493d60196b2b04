use anyhow::Result;
use crossterm::style::Color;

use crate::food::Entity;
use crate::grid::Cell;
use crate::state::GameState;

pub const INTRO_LINES: [&str; 2] = ["Welcome to Snake Game", "Press Enter to Start"];

/// Draws whatever the session is showing.
pub trait Renderer {
    fn draw_intro(&mut self) -> Result<()>;
    fn draw_frame(&mut self, state: &GameState) -> Result<()>;
    fn draw_game_over(&mut self, score: u32) -> Result<()>;
}

/// What one board cell looks like. Cells are two terminal columns wide.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub text: [char; 2],
    pub color: Color,
}

impl Glyph {
    const fn new(text: [char; 2], color: Color) -> Self {
        Glyph { text, color }
    }
}

pub const EMPTY: Glyph = Glyph::new([' ', ' '], Color::Reset);
const SNAKE_HEAD: Glyph = Glyph::new(['█', '█'], Color::Green);
const SNAKE_BODY: Glyph = Glyph::new(['▓', '▓'], Color::Green);
const SPECIAL_FOOD_COLOR: Color = Color::Yellow;
const POISON: Glyph = Glyph::new(['X', 'X'], Color::Magenta);

/// `MM:SS`, minutes not wrapping at the hour.
pub fn format_time(millis: u64) -> String {
    let seconds = millis / 1000;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn hud_line(state: &GameState) -> String {
    format!(
        "Lives: {}   Score: {}   Time: {}",
        state.lives,
        state.score,
        format_time(state.elapsed_millis())
    )
}

pub fn game_over_lines(score: u32) -> [String; 3] {
    [
        format!("Game over! Your score is {}", score),
        "To play again press Enter. To exit press Escape!".to_string(),
        format!("Final Score: {}", score),
    ]
}

/// Board contents in row-major order, painted back to front:
/// snake, food, special food with its countdown, poison.
pub fn board_glyphs(state: &GameState) -> Vec<Glyph> {
    let grid = state.grid();
    let columns = grid.columns() as usize;
    let mut glyphs = vec![EMPTY; columns * grid.rows() as usize];

    let mut paint = |cell: Cell, glyph: Glyph| {
        let (col, row) = grid.index_of(cell);
        glyphs[row as usize * columns + col as usize] = glyph;
    };

    for (i, &segment) in state.snake.body().iter().enumerate().rev() {
        paint(segment, if i == 0 { SNAKE_HEAD } else { SNAKE_BODY });
    }

    paint(state.food.cell(), Glyph::new(['(', ')'], state.food.color()));

    if let (Some(special), Some(countdown)) = (state.special_food, state.special_countdown()) {
        paint(special.cell(), countdown_glyph(countdown));
    }

    for poison in &state.poisons {
        paint(poison.cell(), POISON);
    }

    glyphs
}

fn countdown_glyph(countdown: u32) -> Glyph {
    let digits: Vec<char> = format!("{:>2}", countdown.min(99)).chars().collect();
    Glyph::new([digits[0], digits[1]], SPECIAL_FOOD_COLOR)
}

#[cfg(test)]
pub mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Drawn {
        Intro,
        Frame { score: u32, lives: u32 },
        GameOver { score: u32 },
    }

    /// Remembers what it was asked to draw.
    #[derive(Default)]
    pub struct RecordingRenderer {
        pub drawn: Vec<Drawn>,
    }

    impl Renderer for RecordingRenderer {
        fn draw_intro(&mut self) -> Result<()> {
            self.drawn.push(Drawn::Intro);
            Ok(())
        }

        fn draw_frame(&mut self, state: &GameState) -> Result<()> {
            self.drawn.push(Drawn::Frame { score: state.score, lives: state.lives });
            Ok(())
        }

        fn draw_game_over(&mut self, score: u32) -> Result<()> {
            self.drawn.push(Drawn::GameOver { score });
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::testing::ManualClock;
    use crate::food::{Food, Poison, SpecialFood};
    use crate::grid::Grid;
    use crate::snake::{Direction, Snake};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state() -> GameState {
        let mut rng = StdRng::seed_from_u64(21);
        let clock = ManualClock::default();
        GameState::new(Grid::new(10, 10, 1), &mut rng, &clock)
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59_999), "00:59");
        assert_eq!(format_time(65_000), "01:05");
        assert_eq!(format_time(6_000_000), "100:00");
    }

    #[test]
    fn hud_shows_lives_score_and_time() {
        let mut state = state();
        state.score = 7;

        assert_eq!(hud_line(&state), "Lives: 3   Score: 7   Time: 00:00");
    }

    #[test]
    fn paints_every_entity() {
        let mut state = state();
        let grid = *state.grid();
        state.snake = Snake::with_body(vec![grid.cell_at(1, 0), grid.cell_at(0, 0)], Direction::Right);
        state.food = Food::new(grid.cell_at(5, 5));
        state.special_food = Some(SpecialFood::new(grid.cell_at(9, 9)));
        state.poisons = vec![Poison::new(grid.cell_at(3, 7))];

        let glyphs = board_glyphs(&state);

        assert_eq!(glyphs.len(), 100);
        assert_eq!(glyphs[1], SNAKE_HEAD);
        assert_eq!(glyphs[0], SNAKE_BODY);
        assert_eq!(glyphs[55].text, ['(', ')']);
        assert_eq!(glyphs[99], Glyph::new(['2', '4'], SPECIAL_FOOD_COLOR));
        assert_eq!(glyphs[73], POISON);
        assert_eq!(glyphs[50], EMPTY);
    }

    #[test]
    fn single_digit_countdown_is_right_aligned() {
        assert_eq!(countdown_glyph(7).text, [' ', '7']);
        assert_eq!(countdown_glyph(0).text, [' ', '0']);
    }

    #[test]
    fn game_over_screen_repeats_the_score() {
        let lines = game_over_lines(42);
        assert_eq!(lines[0], "Game over! Your score is 42");
        assert_eq!(lines[2], "Final Score: 42");
    }
}
