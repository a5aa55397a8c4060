//! Grid snake: a discrete-time snake simulation core with a terminal front end.
//!
//! The core ([`grid`], [`food`], [`snake`], [`game`]) is free of I/O. It reads and
//! writes the high score through [`score::HighScoreStore`] and is driven one step
//! at a time by a frame scheduler ([`scheduler`]).

pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
