use std::collections::VecDeque;

use crate::config::GridSize;
use crate::grid::{Cell, is_out_of_bounds, is_occupied};
use crate::input::Direction;

/// What the snake ran into.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    Wall,
    SelfBite,
}

/// Result of advancing the snake by one cell.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum StepOutcome {
    /// The head moved to a free cell. `grew` is set when it landed on food.
    Advanced { snake: Snake, grew: bool },
    /// The next head position was blocked; the snake is left as it was.
    Collided(Collision),
}

/// Snake body stored head-first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Cell) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>) -> Self {
        assert!(!segments.is_empty(), "a snake needs at least one segment");
        Self {
            body: VecDeque::from(segments),
        }
    }

    /// Computes the snake after one move towards `direction`.
    ///
    /// The new head is checked against every segment except the current
    /// head, tail included. Moving into the tail cell is a bite even though
    /// the tail would vacate on a non-growing move.
    #[must_use]
    pub fn step(&self, direction: Direction, food: Cell, bounds: GridSize) -> StepOutcome {
        let new_head = self.head().offset(direction);

        if is_out_of_bounds(new_head, bounds) {
            return StepOutcome::Collided(Collision::Wall);
        }
        if is_occupied(new_head, self.body.iter().skip(1)) {
            return StepOutcome::Collided(Collision::SelfBite);
        }

        let grew = new_head == food;
        let mut body = self.body.clone();
        body.push_front(new_head);
        if !grew {
            let _ = body.pop_back();
        }

        StepOutcome::Advanced {
            snake: Self { body },
            grew,
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Returns the last segment.
    #[must_use]
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::grid::Cell;
    use crate::input::Direction;

    use super::{Collision, Snake, StepOutcome};

    const BOUNDS: GridSize = GridSize {
        width: 10,
        height: 10,
    };
    const FAR_FOOD: Cell = Cell::new(9, 9);

    fn advanced(outcome: StepOutcome) -> (Snake, bool) {
        match outcome {
            StepOutcome::Advanced { snake, grew } => (snake, grew),
            StepOutcome::Collided(collision) => panic!("unexpected collision: {collision:?}"),
        }
    }

    #[test]
    fn snake_moves_one_cell_per_step() {
        let snake = Snake::new(Cell::new(5, 5));

        let (moved, grew) = advanced(snake.step(Direction::Right, FAR_FOOD, BOUNDS));

        assert!(!grew);
        assert_eq!(moved.head(), Cell::new(5, 6));
        assert_eq!(moved.len(), 1);
    }

    #[test]
    fn eating_food_keeps_previous_tail() {
        let snake = Snake::new(Cell::new(5, 5));

        let (moved, grew) = advanced(snake.step(Direction::Right, Cell::new(5, 6), BOUNDS));

        assert!(grew);
        assert_eq!(
            moved.segments().copied().collect::<Vec<_>>(),
            vec![Cell::new(5, 6), Cell::new(5, 5)]
        );
    }

    #[test]
    fn length_is_conserved_without_food() {
        let snake = Snake::from_segments(vec![Cell::new(3, 3), Cell::new(3, 2), Cell::new(3, 1)]);

        let (moved, _) = advanced(snake.step(Direction::Down, FAR_FOOD, BOUNDS));

        assert_eq!(
            moved.segments().copied().collect::<Vec<_>>(),
            vec![Cell::new(4, 3), Cell::new(3, 3), Cell::new(3, 2)]
        );
        assert_eq!(moved.tail(), Cell::new(3, 2));
    }

    #[test]
    fn leaving_the_board_is_a_wall_collision() {
        let snake = Snake::new(Cell::new(0, 0));

        assert_eq!(
            snake.step(Direction::Up, FAR_FOOD, BOUNDS),
            StepOutcome::Collided(Collision::Wall)
        );
        assert_eq!(
            snake.step(Direction::Left, FAR_FOOD, BOUNDS),
            StepOutcome::Collided(Collision::Wall)
        );
    }

    #[test]
    fn moving_into_the_tail_is_a_bite() {
        // 2x2 loop: head at (1,1) moving up lands on the tail at (0,1).
        let snake = Snake::from_segments(vec![
            Cell::new(1, 1),
            Cell::new(1, 0),
            Cell::new(0, 0),
            Cell::new(0, 1),
        ]);

        assert_eq!(
            snake.step(Direction::Up, FAR_FOOD, BOUNDS),
            StepOutcome::Collided(Collision::SelfBite)
        );
    }

    #[test]
    fn moving_into_the_body_is_a_bite() {
        let snake = Snake::from_segments(vec![
            Cell::new(2, 2),
            Cell::new(2, 1),
            Cell::new(3, 1),
            Cell::new(3, 2),
            Cell::new(3, 3),
        ]);

        assert_eq!(
            snake.step(Direction::Down, FAR_FOOD, BOUNDS),
            StepOutcome::Collided(Collision::SelfBite)
        );
    }
}
