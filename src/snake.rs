use std::collections::VecDeque;

use crate::grid::{Cell, Grid};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// The player's snake. The head is the front of `body`.
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
}

impl Snake {
    pub fn new(head: Cell, direction: Direction) -> Self {
        Snake { body: VecDeque::from(vec![head]), direction }
    }

    #[cfg(test)]
    pub fn with_body(body: Vec<Cell>, direction: Direction) -> Self {
        assert!(!body.is_empty());
        Snake { body: body.into(), direction }
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Pushes a new head one cell ahead, wrapping around the board.
    /// The tail stays put; the caller pops it unless the snake grows.
    pub fn move_step(&mut self, grid: &Grid) -> Cell {
        let (dx, dy) = self.direction.delta();
        let step = grid.cell_size();
        let new_head = grid.wrap(self.head().offset(dx * step, dy * step));

        self.body.push_front(new_head);
        new_head
    }

    pub fn pop_tail(&mut self) -> Option<Cell> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    /// Turns unless the new direction reverses the current one. Returns whether it turned.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() {
            return false;
        }

        self.direction = new_direction;
        true
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    /// Head sits on one of the trailing segments.
    pub fn hits_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&segment| segment == head)
    }

    pub fn truncate_to_head(&mut self) {
        self.body.truncate(1);
    }
}
