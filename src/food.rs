use crossterm::style::Color;
use rand::Rng;

use crate::grid::{Cell, Grid};

/// Something that occupies a single cell and can be dropped somewhere new.
///
/// `respawn` picks any cell on the board; whoever owns the entity is
/// responsible for rejecting cells that break placement rules.
pub trait Entity {
    fn cell(&self) -> Cell;
    fn set_cell(&mut self, cell: Cell);

    fn respawn<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) {
        self.set_cell(grid.random_cell(rng));
    }
}

pub const FOOD_COLOR: Color = Color::Red;

/// Regular food. Exactly one is on the board at any time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Food {
    cell: Cell,
    color: Color,
}

impl Food {
    pub fn new(cell: Cell) -> Self {
        Food { cell, color: FOOD_COLOR }
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// Bonus food worth an extra life. Lives until eaten or its timer runs out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpecialFood {
    cell: Cell,
    age: u32,
}

impl SpecialFood {
    pub fn new(cell: Cell) -> Self {
        SpecialFood { cell, age: 0 }
    }

    /// Ticks spent on the board so far.
    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn grow_older(&mut self) {
        self.age += 1;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Poison {
    cell: Cell,
}

impl Poison {
    pub fn new(cell: Cell) -> Self {
        Poison { cell }
    }
}

macro_rules! impl_entity {
    ($($ty:ty),*) => {
        $(impl Entity for $ty {
            fn cell(&self) -> Cell {
                self.cell
            }

            fn set_cell(&mut self, cell: Cell) {
                self.cell = cell;
            }
        })*
    };
}

impl_entity!(Food, SpecialFood, Poison);
