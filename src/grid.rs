use rand::Rng;

use crate::config::GridSize;
use crate::input::Direction;
use crate::snake::Snake;

/// One board square in `(row, col)` coordinates, 0-indexed from the top left.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

/// Returns true when `cell` lies outside `[0, height) x [0, width)`.
#[must_use]
pub fn is_out_of_bounds(cell: Cell, bounds: GridSize) -> bool {
    cell.row < 0
        || cell.col < 0
        || cell.row >= i32::from(bounds.height)
        || cell.col >= i32::from(bounds.width)
}

/// Returns true when `cell` equals any cell of `body`.
pub fn is_occupied<'a, I>(cell: Cell, body: I) -> bool
where
    I: IntoIterator<Item = &'a Cell>,
{
    body.into_iter().any(|segment| *segment == cell)
}

/// Returns true when `cell` is off the board or already taken by `body`.
///
/// The caller picks which segments count as `body`.
pub fn is_collision<'a, I>(cell: Cell, body: I, bounds: GridSize) -> bool
where
    I: IntoIterator<Item = &'a Cell>,
{
    is_out_of_bounds(cell, bounds) || is_occupied(cell, body)
}

/// Picks a uniformly random cell not covered by `snake` by rejection sampling.
///
/// Returns `None` when the snake fills the whole board.
#[must_use]
pub fn random_free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Cell> {
    if bounds.total_cells() == 0 || snake.len() >= bounds.total_cells() {
        return None;
    }

    loop {
        let candidate = Cell {
            row: rng.gen_range(0..i32::from(bounds.height)),
            col: rng.gen_range(0..i32::from(bounds.width)),
        };

        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }
}
