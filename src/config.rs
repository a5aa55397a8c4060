use ratatui::style::Color;
use thiserror::Error;

use crate::food::SpawnPolicy;
use crate::grid::{Cell, GridSize};
use crate::input::Direction;

/// Reference board side length.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Smallest board that still fits the starting body with room to turn.
pub const MIN_GRID_SIZE: u16 = 8;

/// Largest board the terminal front end is expected to draw.
pub const MAX_GRID_SIZE: u16 = 200;

/// Score granted for every food eaten.
pub const SCORE_PER_FOOD: u32 = 5;

/// Scheduler callbacks per simulation step.
pub const DEFAULT_FRAMES_PER_STEP: u32 = 8;

/// Delay between scheduler callbacks in milliseconds (roughly 60 Hz).
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Draws attempted by the resampling spawner before scanning for a free cell.
pub const DEFAULT_MAX_FOOD_ATTEMPTS: u32 = 32;

/// Fixed starting body, head first.
pub const START_BODY: [Cell; 3] = [Cell::new(6, 3), Cell::new(5, 3), Cell::new(4, 3)];

/// Heading every session starts with.
pub const START_HEADING: Direction = Direction::Right;

/// Cosmetic food colours, cycled once per food eaten.
pub const FOOD_COLORS: [Color; 5] = [
    Color::Rgb(147, 51, 234),
    Color::Rgb(101, 163, 13),
    Color::Rgb(225, 29, 72),
    Color::Rgb(79, 70, 229),
    Color::Rgb(202, 138, 4),
];

pub const SNAKE_HEAD_COLOR: Color = Color::Rgb(226, 232, 240);
pub const SNAKE_BODY_COLOR: Color = Color::Rgb(203, 213, 225);
pub const BOARD_BG_COLOR: Color = Color::Rgb(34, 29, 42);
pub const BOARD_BORDER_COLOR: Color = Color::Rgb(32, 42, 70);

/// Rejected configuration values.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("grid size {0} is outside 8..=200")]
    GridSize(u16),
    #[error("max food attempts must be at least 1")]
    FoodAttempts,
}

/// Tunables for one game session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub grid_size: GridSize,
    pub frames_per_step: u32,
    pub spawn_policy: SpawnPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GridSize(DEFAULT_GRID_SIZE),
            frames_per_step: DEFAULT_FRAMES_PER_STEP,
            spawn_policy: SpawnPolicy::Resample {
                max_attempts: DEFAULT_MAX_FOOD_ATTEMPTS,
            },
        }
    }
}

impl GameConfig {
    /// Checks that the board can hold the starting body and the policy is usable.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let GridSize(n) = self.grid_size;
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&n) {
            return Err(ConfigError::GridSize(n));
        }

        if let SpawnPolicy::Resample { max_attempts: 0 } = self.spawn_policy {
            return Err(ConfigError::FoodAttempts);
        }

        Ok(self)
    }
}
