use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::{Direction, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Turn(Direction),
    Confirm,
    Exit,
    Quit,
}

/// Yields the key presses that arrived since the last call, without blocking.
pub trait InputSource {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;
}

/// Maps a key press to a game input. Unknown keys and releases map to nothing.
pub fn map_key(ev: &KeyEvent) -> Option<InputEvent> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }

    if is_ctrl_c(ev) {
        return Some(InputEvent::Quit);
    }

    let event = match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => InputEvent::Turn(Direction::Up),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => InputEvent::Turn(Direction::Left),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => InputEvent::Turn(Direction::Down),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => InputEvent::Turn(Direction::Right),
        KeyCode::Enter => InputEvent::Confirm,
        KeyCode::Esc => InputEvent::Exit,
        _ => return None,
    };

    Some(event)
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

/// Lets exactly one direction change through per tick.
///
/// The latch closes when a turn is accepted and reopens when the tick ends.
/// A rejected reversal leaves it open.
#[derive(Debug)]
pub struct InputLatch {
    open: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        InputLatch { open: true }
    }

    pub fn offer(&mut self, direction: Direction, snake: &mut Snake) -> bool {
        if !self.open {
            return false;
        }

        let accepted = snake.set_direction(direction);
        if accepted {
            self.open = false;
        }
        accepted
    }

    pub fn release(&mut self) {
        self.open = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn maps_arrows_and_wasd() {
        let pairs = [
            (KeyCode::Up, KeyCode::Char('w'), Direction::Up),
            (KeyCode::Down, KeyCode::Char('s'), Direction::Down),
            (KeyCode::Left, KeyCode::Char('a'), Direction::Left),
            (KeyCode::Right, KeyCode::Char('d'), Direction::Right),
        ];

        for (arrow, letter, direction) in pairs {
            assert_eq!(map_key(&press(arrow)), Some(InputEvent::Turn(direction)));
            assert_eq!(map_key(&press(letter)), Some(InputEvent::Turn(direction)));
        }

        let shifted = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(map_key(&shifted), Some(InputEvent::Turn(Direction::Up)));
    }

    #[test]
    fn maps_control_keys() {
        assert_eq!(map_key(&press(KeyCode::Enter)), Some(InputEvent::Confirm));
        assert_eq!(map_key(&press(KeyCode::Esc)), Some(InputEvent::Exit));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_c), Some(InputEvent::Quit));
    }

    #[test]
    fn ignores_unknown_keys_and_releases() {
        assert_eq!(map_key(&press(KeyCode::Char('x'))), None);
        assert_eq!(map_key(&press(KeyCode::Char('c'))), None);
        assert_eq!(map_key(&press(KeyCode::Tab)), None);

        let mut release = press(KeyCode::Up);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(&release), None);
    }

    #[test]
    fn latch_accepts_one_turn_per_tick() {
        let mut snake = Snake::new(Cell::new(0, 0), Direction::Right);
        let mut latch = InputLatch::new();

        assert!(latch.offer(Direction::Up, &mut snake));
        assert!(!latch.open);
        // Would be legal on its own, but the tick already turned
        assert!(!latch.offer(Direction::Left, &mut snake));
        assert_eq!(snake.get_direction(), Direction::Up);

        latch.release();
        assert!(latch.offer(Direction::Left, &mut snake));
        assert_eq!(snake.get_direction(), Direction::Left);
    }

    #[test]
    fn rejected_reversal_keeps_latch_open() {
        let mut snake = Snake::new(Cell::new(0, 0), Direction::Left);
        let mut latch = InputLatch::new();

        assert!(!latch.offer(Direction::Right, &mut snake));
        assert!(latch.open);
        assert!(latch.offer(Direction::Down, &mut snake));
        assert_eq!(snake.get_direction(), Direction::Down);
    }
}
