use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GridSize;
use crate::grid::{Cell, random_free_cell};
use crate::input::{Direction, accept_direction};
use crate::snake::{Collision, Snake, StepOutcome};

/// Current high-level gameplay state. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Complete state of one game.
#[derive(Debug, Clone)]
pub struct Game {
    pub snake: Snake,
    pub food: Cell,
    pub score: u32,
    pub status: GameStatus,
    /// Set when the game ended by running into something. `None` while
    /// running, or when the board filled up.
    pub death_reason: Option<Collision>,
    pub tick_count: u64,
    /// Latched for the next tick.
    direction: Direction,
    /// Applied on the previous tick.
    last_direction: Direction,
    bounds: GridSize,
    rng: StdRng,
}

impl Game {
    /// Starts a game seeded from system entropy.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::start(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic game for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::start(bounds, StdRng::seed_from_u64(seed))
    }

    /// Builds a running game from an explicit layout.
    ///
    /// The score is derived from the snake length.
    #[must_use]
    pub fn from_parts(
        bounds: GridSize,
        snake: Snake,
        food: Cell,
        direction: Direction,
        seed: u64,
    ) -> Self {
        Self {
            score: score_for(&snake),
            snake,
            food,
            status: GameStatus::Running,
            death_reason: None,
            tick_count: 0,
            direction,
            last_direction: direction,
            bounds,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn start(bounds: GridSize, mut rng: StdRng) -> Self {
        let snake = Snake::new(Cell::new(
            i32::from(bounds.height / 2),
            i32::from(bounds.width / 2),
        ));
        // A one-cell snake always leaves room on any board larger than 1x1.
        let food = random_free_cell(&mut rng, bounds, &snake).unwrap_or(snake.head());

        Self {
            snake,
            food,
            score: 0,
            status: GameStatus::Running,
            death_reason: None,
            tick_count: 0,
            direction: Direction::Right,
            last_direction: Direction::Right,
            bounds,
            rng,
        }
    }

    /// Requests a new heading for the next tick.
    ///
    /// A reversal of the direction applied on the previous tick is ignored
    /// and leaves any earlier latched request in place.
    pub fn steer(&mut self, requested: Direction) {
        if self.status != GameStatus::Running {
            return;
        }

        if accept_direction(requested, self.last_direction) == requested {
            self.direction = requested;
        }
    }

    /// Advances the game by one tick. Does nothing once the game is over.
    pub fn tick(&mut self) {
        if self.status != GameStatus::Running {
            return;
        }

        self.tick_count += 1;
        let direction = self.direction;

        match self.snake.step(direction, self.food, self.bounds) {
            StepOutcome::Collided(collision) => {
                info!(
                    "game over after {} ticks: {collision:?}, score {}",
                    self.tick_count, self.score
                );
                self.death_reason = Some(collision);
                self.status = GameStatus::GameOver;
            }
            StepOutcome::Advanced { snake, grew } => {
                self.snake = snake;
                self.last_direction = direction;

                if grew {
                    self.score = score_for(&self.snake);
                    debug!("food eaten at {:?}, score {}", self.food, self.score);
                    self.respawn_food();
                }
            }
        }
    }

    /// Returns the direction the next tick will use.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction applied on the most recent tick.
    #[must_use]
    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    fn respawn_food(&mut self) {
        match random_free_cell(&mut self.rng, self.bounds, &self.snake) {
            Some(cell) => self.food = cell,
            None => {
                info!("board full, score {}", self.score);
                self.status = GameStatus::GameOver;
            }
        }
    }
}

fn score_for(snake: &Snake) -> u32 {
    u32::try_from(snake.len().saturating_sub(1)).unwrap_or(u32::MAX)
}
