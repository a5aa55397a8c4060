use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

/// Minimum drag distance, in terminal cells, before a mouse drag counts as a swipe.
pub const SWIPE_MIN_DISTANCE: i32 = 2;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the `(col, row)` step for one move. Rows grow downwards.
    #[must_use]
    pub fn unit_vector(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Resolves a swipe vector to the direction of its dominant axis.
    ///
    /// Gestures shorter than `min_distance` on both axes, and perfectly
    /// diagonal gestures, resolve to `None`.
    #[must_use]
    pub fn from_swipe(dx: i32, dy: i32, min_distance: i32) -> Option<Self> {
        let (abs_x, abs_y) = (dx.abs(), dy.abs());
        if abs_x.max(abs_y) < min_distance || abs_x == abs_y {
            return None;
        }

        if abs_x > abs_y {
            Some(if dx > 0 { Self::Right } else { Self::Left })
        } else {
            Some(if dy > 0 { Self::Down } else { Self::Up })
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Confirm,
    Quit,
}

/// Polls crossterm for keyboard and mouse events and maps them to [`GameInput`].
#[derive(Debug, Default)]
pub struct InputHandler {
    drag_origin: Option<(u16, u16)>,
}

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next pending input, if any, without blocking.
    pub fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
        while event::poll(Duration::ZERO)? {
            let mapped = match event::read()? {
                Event::Key(key) => map_key(key),
                Event::Mouse(mouse) => self.map_mouse(mouse),
                _ => None,
            };

            if mapped.is_some() {
                return Ok(mapped);
            }
        }

        Ok(None)
    }

    fn map_mouse(&mut self, mouse: MouseEvent) -> Option<GameInput> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_origin = Some((mouse.column, mouse.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (start_col, start_row) = self.drag_origin.take()?;
                let dx = i32::from(mouse.column) - i32::from(start_col);
                // Terminal cells are roughly twice as tall as they are wide.
                let dy = (i32::from(mouse.row) - i32::from(start_row)) * 2;
                Direction::from_swipe(dx, dy, SWIPE_MIN_DISTANCE).map(GameInput::Direction)
            }
            _ => None,
        }
    }
}

/// Maps one key press to a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => {
            Some(GameInput::Direction(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => {
            Some(GameInput::Direction(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => {
            Some(GameInput::Direction(Direction::Right))
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameInput::Confirm),
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(GameInput::Quit),
        _ => None,
    }
}
