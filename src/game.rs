use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, GameConfig, SCORE_PER_FOOD};
use crate::food::{FoodPalette, FoodSpawner};
use crate::grid::{Cell, GridSize};
use crate::input::{Direction, GameInput};
use crate::score::{HighScoreStore, ScoreError};
use crate::snake::{DeathReason, SnakeSimulation, StepResult};

/// Current high-level session state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionState {
    Idle,
    Running,
    GameOver,
}

/// Discrete notifications produced by [`GameSession::tick`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    FoodEaten {
        cell: Cell,
        score: u32,
    },
    GameOver {
        reason: DeathReason,
        score: u32,
        high_score: u32,
        new_high_score: bool,
    },
}

/// Immutable view of the session for drawing.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    pub snake_cells: Vec<Cell>,
    pub food: Cell,
    pub food_color: usize,
    pub heading: Direction,
    pub score: u32,
    pub high_score: u32,
    pub state: SessionState,
    pub death_reason: Option<DeathReason>,
    pub new_high_score: bool,
    pub tick_count: u64,
    pub grid: GridSize,
}

/// One player's game: simulation plus score, high score and lifecycle.
#[derive(Debug)]
pub struct GameSession<S> {
    simulation: SnakeSimulation,
    food: Cell,
    palette: FoodPalette,
    score: u32,
    high_score: u32,
    state: SessionState,
    death_reason: Option<DeathReason>,
    new_high_score: bool,
    grid: GridSize,
    spawner: FoodSpawner,
    rng: StdRng,
    store: S,
    load_error: Option<ScoreError>,
}

impl<S: HighScoreStore> GameSession<S> {
    /// Creates an idle session seeded from OS entropy.
    ///
    /// The stored high score is read once here; a failed read starts from 0
    /// and is kept for [`GameSession::take_load_error`].
    pub fn new(config: GameConfig, store: S) -> Result<Self, ConfigError> {
        Self::from_rng(config, store, StdRng::from_entropy())
    }

    /// Creates a deterministic idle session for tests and reproducible runs.
    pub fn with_seed(config: GameConfig, store: S, seed: u64) -> Result<Self, ConfigError> {
        Self::from_rng(config, store, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: GameConfig, store: S, mut rng: StdRng) -> Result<Self, ConfigError> {
        let config = config.validate()?;
        let grid = config.grid_size;
        let spawner = FoodSpawner::new(config.spawn_policy);
        let simulation = SnakeSimulation::starting(grid);
        let food = spawner.spawn(&mut rng, simulation.body(), grid);

        let (high_score, load_error) = match store.read_high_score() {
            Ok(stored) => (stored, None),
            Err(error) => {
                warn!(%error, "failed to load high score");
                (0, Some(error))
            }
        };

        Ok(Self {
            simulation,
            food,
            palette: FoodPalette::default(),
            score: 0,
            high_score,
            state: SessionState::Idle,
            death_reason: None,
            new_high_score: false,
            grid,
            spawner,
            rng,
            store,
            load_error,
        })
    }

    /// Starts play from [`SessionState::Idle`]; ignored otherwise.
    pub fn start(&mut self) {
        if self.state == SessionState::Idle {
            self.reset();
        }
    }

    /// Starts a new round from [`SessionState::GameOver`]; ignored otherwise.
    pub fn restart(&mut self) {
        if self.state == SessionState::GameOver {
            self.reset();
        }
    }

    /// Steers the snake. The first intent on an idle session also starts it.
    pub fn handle_direction_intent(&mut self, direction: Direction) {
        match self.state {
            SessionState::Idle => {
                self.start();
                self.simulation.set_heading(direction);
            }
            SessionState::Running => {
                self.simulation.set_heading(direction);
            }
            SessionState::GameOver => {}
        }
    }

    /// Applies one external input event.
    pub fn handle_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => self.handle_direction_intent(direction),
            GameInput::Confirm => match self.state {
                SessionState::Idle => self.start(),
                SessionState::GameOver => self.restart(),
                SessionState::Running => {}
            },
            GameInput::Quit => {}
        }
    }

    /// Advances the simulation by one step while running.
    pub fn tick(&mut self) -> Option<GameEvent> {
        if self.state != SessionState::Running {
            return None;
        }

        let spawner = self.spawner;
        let grid = self.grid;
        let rng = &mut self.rng;
        let result = self
            .simulation
            .step(self.food, |body| spawner.spawn(rng, body, grid));

        match result {
            StepResult::Moved => None,
            StepResult::Ate { new_food } => {
                let eaten = self.food;
                self.score += SCORE_PER_FOOD;
                self.food = new_food;
                self.palette.advance();
                debug!(score = self.score, ?eaten, ?new_food, "food eaten");

                Some(GameEvent::FoodEaten {
                    cell: eaten,
                    score: self.score,
                })
            }
            StepResult::Collided(reason) => Some(self.game_over(reason)),
        }
    }

    fn game_over(&mut self, reason: DeathReason) -> GameEvent {
        self.state = SessionState::GameOver;
        self.death_reason = Some(reason);
        self.new_high_score = self.score > self.high_score;

        if self.score >= self.high_score {
            self.high_score = self.score;
            if let Err(error) = self.store.write_high_score(self.score) {
                warn!(%error, score = self.score, "failed to save high score");
            }
        }

        info!(?reason, score = self.score, high_score = self.high_score, "game over");

        GameEvent::GameOver {
            reason,
            score: self.score,
            high_score: self.high_score,
            new_high_score: self.new_high_score,
        }
    }

    fn reset(&mut self) {
        self.simulation = SnakeSimulation::starting(self.grid);
        self.food = self
            .spawner
            .spawn(&mut self.rng, self.simulation.body(), self.grid);
        self.score = 0;
        self.death_reason = None;
        self.new_high_score = false;
        self.state = SessionState::Running;
        debug!(food = ?self.food, "session started");
    }

    /// Returns an owned view of everything the presentation layer draws.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake_cells: self.simulation.body().segments().copied().collect(),
            food: self.food,
            food_color: self.palette.index(),
            heading: self.simulation.heading(),
            score: self.score,
            high_score: self.high_score,
            state: self.state,
            death_reason: self.death_reason,
            new_high_score: self.new_high_score,
            tick_count: self.simulation.tick_count(),
            grid: self.grid,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn food(&self) -> Cell {
        self.food
    }

    #[must_use]
    pub fn simulation(&self) -> &SnakeSimulation {
        &self.simulation
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Hands out the error from the initial high-score read, at most once.
    pub fn take_load_error(&mut self) -> Option<ScoreError> {
        self.load_error.take()
    }

    /// Moves the current food, e.g. to stage a scenario.
    pub fn place_food(&mut self, cell: Cell) {
        self.food = cell;
    }

    /// Replaces the simulation, e.g. to stage a scenario.
    pub fn set_simulation(&mut self, simulation: SnakeSimulation) {
        self.simulation = simulation;
    }
}
