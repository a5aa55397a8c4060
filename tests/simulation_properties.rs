use std::collections::HashSet;

use grid_snake::config::{GameConfig, SCORE_PER_FOOD};
use grid_snake::food::SpawnPolicy;
use grid_snake::game::{GameEvent, GameSession, SessionState};
use grid_snake::grid::{Cell, GridSize};
use grid_snake::input::Direction;
use grid_snake::score::MemoryStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

fn assert_body_invariants(cells: &[Cell], grid: GridSize) {
    let distinct: HashSet<Cell> = cells.iter().copied().collect();
    assert_eq!(distinct.len(), cells.len(), "body cells must be distinct");
    assert!(cells.iter().all(|cell| grid.contains(*cell)));
    assert!(
        cells.windows(2).all(|pair| pair[0].is_adjacent(pair[1])),
        "consecutive cells must be grid-adjacent"
    );
}

/// Plays random steering on a small board until the snake dies.
fn random_round(seed: u64, spawn_policy: SpawnPolicy) {
    let config = GameConfig {
        grid_size: GridSize(10),
        spawn_policy,
        ..GameConfig::default()
    };
    let mut session =
        GameSession::with_seed(config, MemoryStore::default(), seed).expect("valid config");
    let mut steering = StdRng::seed_from_u64(seed ^ 0x5eed);
    session.start();

    for _ in 0..2_000 {
        if steering.gen_bool(0.3) {
            session.handle_direction_intent(DIRECTIONS[steering.gen_range(0..4)]);
        }

        let before = session.snapshot();
        let event = session.tick();
        let after = session.snapshot();

        match event {
            None => {
                assert_eq!(after.snake_cells.len(), before.snake_cells.len());
                assert_eq!(after.score, before.score);
            }
            Some(GameEvent::FoodEaten { score, .. }) => {
                assert_eq!(after.snake_cells.len(), before.snake_cells.len() + 1);
                assert_eq!(score, before.score + SCORE_PER_FOOD);
            }
            Some(GameEvent::GameOver { score, .. }) => {
                assert_eq!(score, before.score);
                assert_eq!(after.snake_cells, before.snake_cells);
                assert_eq!(after.state, SessionState::GameOver);
                return;
            }
        }

        assert_body_invariants(&after.snake_cells, config.grid_size);
        assert!(after.snake_cells[0].is_adjacent(before.snake_cells[0]));
    }
}

#[test]
fn random_play_preserves_body_invariants() {
    for seed in 0..50 {
        random_round(seed, SpawnPolicy::Resample { max_attempts: 32 });
    }
}

#[test]
fn random_play_with_single_draw_food_preserves_body_invariants() {
    for seed in 0..50 {
        random_round(seed, SpawnPolicy::SingleDraw);
    }
}
