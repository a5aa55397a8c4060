use std::collections::VecDeque;

use crate::config::{START_BODY, START_HEADING};
use crate::grid::{Cell, GridSize};
use crate::input::Direction;

/// Ordered snake body, head first and tail last.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Creates a snake from explicit cells (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `cells` is empty.
    #[must_use]
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        assert!(!cells.is_empty(), "snake needs at least one cell");
        Self {
            body: VecDeque::from(cells),
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the last segment.
    #[must_use]
    pub fn tail(&self) -> Cell {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns true if moving the head to `next_head` would run into the body.
    ///
    /// Without growth the tail cell is vacated during the same move, so it is
    /// excluded from the check.
    #[must_use]
    pub fn blocks(&self, next_head: Cell, grows: bool) -> bool {
        let still_occupied = if grows {
            self.body.len()
        } else {
            self.body.len() - 1
        };

        self.body
            .iter()
            .take(still_occupied)
            .skip(1)
            .any(|segment| *segment == next_head)
    }

    /// Pushes a new head and drops the tail unless the snake grows.
    pub fn advance(&mut self, next_head: Cell, grows: bool) {
        self.body.push_front(next_head);
        if !grows {
            let _ = self.body.pop_back();
        }
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}

/// Why a step ended the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Outcome of one simulation step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepResult {
    Moved,
    Ate { new_food: Cell },
    Collided(DeathReason),
}

/// Discrete-time snake movement on a bounded grid.
#[derive(Debug, Clone)]
pub struct SnakeSimulation {
    body: Snake,
    heading: Direction,
    pending_heading: Direction,
    tick_count: u64,
    grid: GridSize,
}

impl SnakeSimulation {
    #[must_use]
    pub fn new(body: Snake, heading: Direction, grid: GridSize) -> Self {
        Self {
            body,
            heading,
            pending_heading: heading,
            tick_count: 0,
            grid,
        }
    }

    /// The fixed three-cell horizontal opening position, heading right.
    #[must_use]
    pub fn starting(grid: GridSize) -> Self {
        Self::new(Snake::from_cells(START_BODY.to_vec()), START_HEADING, grid)
    }

    /// Latches `direction` for the next step.
    ///
    /// Reversals of the committed heading are ignored while the snake is
    /// longer than one cell. Returns whether the direction was latched.
    pub fn set_heading(&mut self, direction: Direction) -> bool {
        if self.body.len() > 1 && direction == self.heading.opposite() {
            return false;
        }

        self.pending_heading = direction;
        true
    }

    /// Advances the snake one cell.
    ///
    /// `respawn` is only called when the head lands on `food`; it sees the
    /// already-grown body and returns the replacement food cell. Collisions
    /// leave the body untouched.
    pub fn step<F>(&mut self, food: Cell, respawn: F) -> StepResult
    where
        F: FnOnce(&Snake) -> Cell,
    {
        self.tick_count += 1;
        self.heading = self.pending_heading;

        let next_head = self.body.head().offset(self.heading);
        if !self.grid.contains(next_head) {
            return StepResult::Collided(DeathReason::WallCollision);
        }

        let eats = next_head == food;
        if self.body.blocks(next_head, eats) {
            return StepResult::Collided(DeathReason::SelfCollision);
        }

        self.body.advance(next_head, eats);
        if eats {
            StepResult::Ate {
                new_food: respawn(&self.body),
            }
        } else {
            StepResult::Moved
        }
    }

    #[must_use]
    pub fn body(&self) -> &Snake {
        &self.body
    }

    /// Returns the committed movement direction.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Returns the direction the next step will commit.
    #[must_use]
    pub fn pending_heading(&self) -> Direction {
        self.pending_heading
    }

    /// Number of steps executed, including a terminal collision step.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }
}
