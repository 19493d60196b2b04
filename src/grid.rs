use rand::Rng;

/// A cell-aligned position on the board, measured in board units
/// (always a multiple of the grid's cell size).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Cell { x: self.x + dx, y: self.y + dy }
    }
}

/// Fixed-size toroidal board. Edges are identified with the opposite edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: i32,
    rows: i32,
    cell_size: i32,
}

impl Grid {
    pub fn new(columns: u16, rows: u16, cell_size: u16) -> Self {
        Grid { columns: columns as i32, rows: rows as i32, cell_size: cell_size as i32 }
    }

    pub fn columns(&self) -> u16 {
        self.columns as u16
    }

    pub fn rows(&self) -> u16 {
        self.rows as u16
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn width(&self) -> i32 {
        self.columns * self.cell_size
    }

    pub fn height(&self) -> i32 {
        self.rows * self.cell_size
    }

    /// Cell at the given column and row.
    pub fn cell_at(&self, column: i32, row: i32) -> Cell {
        Cell::new(column * self.cell_size, row * self.cell_size)
    }

    /// Column and row of a cell, for presentation.
    pub fn index_of(&self, cell: Cell) -> (u16, u16) {
        ((cell.x / self.cell_size) as u16, (cell.y / self.cell_size) as u16)
    }

    /// Wraps each axis independently: anything off one edge lands on the opposite one.
    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell::new(
            wrap_axis(cell.x, self.width(), self.cell_size),
            wrap_axis(cell.y, self.height(), self.cell_size),
        )
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        self.cell_at(rng.gen_range(0..self.columns), rng.gen_range(0..self.rows))
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.columns).map(move |col| self.cell_at(col, row)))
    }

    /// True when `a` and `b` are less than two cells apart on both axes
    /// (Chebyshev distance below two cells).
    pub fn is_near(&self, a: Cell, b: Cell) -> bool {
        let reach = self.cell_size * 2;
        (a.x - b.x).abs() < reach && (a.y - b.y).abs() < reach
    }
}

fn wrap_axis(value: i32, bound: i32, cell_size: i32) -> i32 {
    if value < 0 {
        bound - cell_size
    } else if value >= bound {
        0
    } else {
        value
    }
}
