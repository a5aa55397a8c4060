use std::fs::File;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use grid_snake::config::{
    DEFAULT_FRAME_INTERVAL_MS, DEFAULT_FRAMES_PER_STEP, DEFAULT_GRID_SIZE,
    DEFAULT_MAX_FOOD_ATTEMPTS, GameConfig,
};
use grid_snake::food::SpawnPolicy;
use grid_snake::game::GameSession;
use grid_snake::grid::GridSize;
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::renderer;
use grid_snake::scheduler::{FrameOutcome, FrameScheduler};
use grid_snake::score::{HighScoreStore, JsonFileStore, MemoryStore};
use grid_snake::terminal_runtime::{TerminalModes, TerminalSession, restore_terminal};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum FoodPolicyArg {
    /// Accept the first random cell, even under the snake.
    SingleDraw,
    /// Redraw cells that land on the snake.
    Resample,
}

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board side length in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    grid_size: u16,

    /// Display frames per simulation step.
    #[arg(long, default_value_t = DEFAULT_FRAMES_PER_STEP)]
    frames_per_step: u32,

    /// Milliseconds between display frames.
    #[arg(long = "frame-ms", default_value_t = DEFAULT_FRAME_INTERVAL_MS)]
    frame_ms: u64,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// How food placement treats cells under the snake.
    #[arg(long, value_enum, default_value_t = FoodPolicyArg::Resample)]
    food_policy: FoodPolicyArg,

    /// Random draws before the resampling policy scans for a free cell.
    #[arg(long, default_value_t = DEFAULT_MAX_FOOD_ATTEMPTS)]
    max_food_attempts: u32,

    /// High score file (defaults to the platform data directory).
    #[arg(long)]
    scores_file: Option<PathBuf>,

    /// Keep the high score in memory only.
    #[arg(long = "no-persist")]
    no_persist: bool,

    /// Ignore the mouse instead of reading drags as swipes.
    #[arg(long = "no-mouse")]
    no_mouse: bool,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        let spawn_policy = match self.food_policy {
            FoodPolicyArg::SingleDraw => SpawnPolicy::SingleDraw,
            FoodPolicyArg::Resample => SpawnPolicy::Resample {
                max_attempts: self.max_food_attempts,
            },
        };

        GameConfig {
            grid_size: GridSize(self.grid_size),
            frames_per_step: self.frames_per_step,
            spawn_policy,
        }
    }

    fn terminal_modes(&self) -> TerminalModes {
        TerminalModes {
            mouse_capture: !self.no_mouse,
        }
    }

    fn high_score_store(&self) -> Box<dyn HighScoreStore> {
        if self.no_persist {
            return Box::new(MemoryStore::default());
        }

        match &self.scores_file {
            Some(path) => Box::new(JsonFileStore::new(path)),
            None => Box::new(JsonFileStore::at_default_location()),
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config();
    let store = cli.high_score_store();
    let mut session = match cli.seed {
        Some(seed) => GameSession::with_seed(config, store, seed),
        None => GameSession::new(config, store),
    }
    .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    // Must be printed before the alternate screen hides it.
    if let Some(error) = session.take_load_error() {
        eprintln!("Warning: could not load high score, starting from 0: {error}");
    }

    install_panic_hook();
    let terminal_session = TerminalSession::enter(cli.terminal_modes())?;
    run(
        terminal_session,
        session,
        config,
        Duration::from_millis(cli.frame_ms),
    )
}

fn run(
    mut terminal_session: TerminalSession,
    mut session: GameSession<Box<dyn HighScoreStore>>,
    config: GameConfig,
    frame_interval: Duration,
) -> io::Result<()> {
    let mut input = InputHandler::new();
    let mut scheduler = FrameScheduler::new(config.frames_per_step);

    info!(
        grid = config.grid_size.0,
        policy = ?config.spawn_policy,
        mouse = terminal_session.modes().mouse_capture,
        "session ready"
    );

    'frames: loop {
        let frame_started = Instant::now();

        while let Some(game_input) = input.poll_input()? {
            if game_input == GameInput::Quit {
                scheduler.cancel();
                break 'frames;
            }

            session.handle_input(game_input);
        }

        if let FrameOutcome::Stepped(Some(event)) = scheduler.on_frame(&mut session) {
            debug!(?event, "tick event");
        }

        let snapshot = session.snapshot();
        terminal_session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &snapshot))?;

        thread::sleep(frame_interval.saturating_sub(frame_started.elapsed()));
    }

    info!(
        score = session.score(),
        high_score = session.high_score(),
        "quit"
    );
    terminal_session.leave()
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use grid_snake::config::ConfigError;
    use grid_snake::food::SpawnPolicy;
    use grid_snake::game::GameSession;
    use grid_snake::grid::GridSize;

    use super::Cli;

    #[test]
    fn defaults_match_reference_behavior() {
        let cli = Cli::parse_from(["grid-snake"]);
        let config = cli.game_config();

        assert_eq!(config.grid_size, GridSize(20));
        assert_eq!(config.frames_per_step, 8);
        assert_eq!(config.spawn_policy, SpawnPolicy::Resample { max_attempts: 32 });
        assert!(cli.terminal_modes().mouse_capture);
    }

    #[test]
    fn single_draw_policy_is_selectable() {
        let cli = Cli::parse_from([
            "grid-snake",
            "--food-policy",
            "single-draw",
            "--grid-size",
            "30",
        ]);
        let config = cli.game_config();

        assert_eq!(config.spawn_policy, SpawnPolicy::SingleDraw);
        assert_eq!(config.grid_size, GridSize(30));
    }

    #[test]
    fn mouse_capture_can_be_disabled() {
        let cli = Cli::parse_from(["grid-snake", "--no-mouse"]);

        assert!(!cli.terminal_modes().mouse_capture);
    }

    #[test]
    fn undersized_grid_is_rejected_before_play() {
        let cli = Cli::parse_from(["grid-snake", "--grid-size", "5", "--no-persist"]);

        let result = GameSession::new(cli.game_config(), cli.high_score_store());

        assert!(matches!(result, Err(ConfigError::GridSize(5))));
    }
}
