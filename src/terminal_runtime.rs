use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{execute, queue};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::warn;

/// Concrete terminal type used by the game loop.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Optional terminal features switched on for a run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TerminalModes {
    /// Report mouse drags so they can steer as swipes.
    pub mouse_capture: bool,
}

impl Default for TerminalModes {
    fn default() -> Self {
        Self {
            mouse_capture: true,
        }
    }
}

/// Raw mode, alternate screen and (optionally) mouse capture for one run.
///
/// Only the modes that were switched on are switched off again, and only once:
/// either by [`TerminalSession::leave`] or on drop.
pub struct TerminalSession {
    terminal: AppTerminal,
    modes: TerminalModes,
    active: bool,
}

impl TerminalSession {
    pub fn enter(modes: TerminalModes) -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = switch_on(&mut stdout, modes) {
            let _ = restore_modes(modes);
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self {
                terminal,
                modes,
                active: true,
            }),
            Err(error) => {
                let _ = restore_modes(modes);
                Err(error)
            }
        }
    }

    #[must_use]
    pub fn modes(&self) -> TerminalModes {
        self.modes
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }

    /// Restores the terminal and reports failures, unlike the restore on drop.
    pub fn leave(mut self) -> io::Result<()> {
        self.active = false;
        restore_modes(self.modes)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            if let Err(error) = restore_modes(self.modes) {
                warn!(%error, "failed to restore terminal");
            }
        }
    }
}

fn switch_on(stdout: &mut io::Stdout, modes: TerminalModes) -> io::Result<()> {
    queue!(stdout, EnterAlternateScreen, Hide)?;
    if modes.mouse_capture {
        queue!(stdout, EnableMouseCapture)?;
    }
    stdout.flush()
}

fn restore_modes(modes: TerminalModes) -> io::Result<()> {
    let raw_mode = disable_raw_mode();

    let mut stdout = io::stdout();
    if modes.mouse_capture {
        queue!(stdout, DisableMouseCapture)?;
    }
    execute!(stdout, Show, LeaveAlternateScreen)?;
    raw_mode
}

/// Puts the terminal back into cooked mode without a session, e.g. from a panic hook.
pub fn restore_terminal() -> io::Result<()> {
    restore_modes(TerminalModes::default())
}
