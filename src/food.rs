use rand::Rng;

use crate::config::FOOD_COLORS;
use crate::grid::{Cell, GridSize};
use crate::snake::Snake;

/// How the spawner treats draws that land on the snake.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SpawnPolicy {
    /// One uniform draw, accepted even when it lands on the snake.
    SingleDraw,
    /// Redraw occupied cells up to `max_attempts` times, then pick uniformly
    /// among the free cells that remain.
    Resample { max_attempts: u32 },
}

/// Places food on the board according to a [`SpawnPolicy`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FoodSpawner {
    policy: SpawnPolicy,
}

impl FoodSpawner {
    #[must_use]
    pub fn new(policy: SpawnPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(self) -> SpawnPolicy {
        self.policy
    }

    /// Returns a food cell inside `grid`.
    ///
    /// Only [`SpawnPolicy::Resample`] avoids the snake, and even then a full
    /// board leaves no choice but an occupied cell.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(self, rng: &mut R, snake: &Snake, grid: GridSize) -> Cell {
        let draw = random_cell(rng, grid);

        let max_attempts = match self.policy {
            SpawnPolicy::SingleDraw => return draw,
            SpawnPolicy::Resample { max_attempts } => max_attempts,
        };

        let mut last = draw;
        for _ in 1..max_attempts.max(1) {
            if !snake.occupies(last) {
                return last;
            }
            last = random_cell(rng, grid);
        }
        if !snake.occupies(last) {
            return last;
        }

        free_cell(rng, snake, grid).unwrap_or(last)
    }
}

impl Default for FoodSpawner {
    fn default() -> Self {
        Self::new(SpawnPolicy::Resample {
            max_attempts: crate::config::DEFAULT_MAX_FOOD_ATTEMPTS,
        })
    }
}

fn random_cell<R: Rng + ?Sized>(rng: &mut R, grid: GridSize) -> Cell {
    let n = i32::from(grid.0.max(1));
    Cell {
        col: rng.gen_range(0..n),
        row: rng.gen_range(0..n),
    }
}

/// Uniformly picks a cell the snake does not occupy.
fn free_cell<R: Rng + ?Sized>(rng: &mut R, snake: &Snake, grid: GridSize) -> Option<Cell> {
    let candidates: Vec<Cell> = grid.cells().filter(|cell| !snake.occupies(*cell)).collect();
    if candidates.is_empty() {
        return None;
    }

    Some(candidates[rng.gen_range(0..candidates.len())])
}

/// Cyclic cosmetic colour index for the current food.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct FoodPalette {
    index: usize,
}

impl FoodPalette {
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }

    /// Moves to the next colour, wrapping after the last one.
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % FOOD_COLORS.len();
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::FOOD_COLORS;
    use crate::grid::{Cell, GridSize};
    use crate::snake::Snake;

    use super::{FoodPalette, FoodSpawner, SpawnPolicy};

    fn three_cell_snake() -> Snake {
        Snake::from_cells(vec![Cell::new(2, 0), Cell::new(1, 0), Cell::new(0, 0)])
    }

    #[test]
    fn resampled_food_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = three_cell_snake();
        let spawner = FoodSpawner::new(SpawnPolicy::Resample { max_attempts: 4 });

        for _ in 0..200 {
            let food = spawner.spawn(&mut rng, &snake, GridSize(3));
            assert!(GridSize(3).contains(food));
            assert!(!snake.occupies(food));
        }
    }

    #[test]
    fn single_draw_stays_on_board() {
        let mut rng = StdRng::seed_from_u64(11);
        let snake = three_cell_snake();
        let spawner = FoodSpawner::new(SpawnPolicy::SingleDraw);

        for _ in 0..200 {
            assert!(GridSize(20).contains(spawner.spawn(&mut rng, &snake, GridSize(20))));
        }
    }

    #[test]
    fn single_draw_can_land_on_snake() {
        let mut rng = StdRng::seed_from_u64(3);
        let snake = three_cell_snake();
        let spawner = FoodSpawner::new(SpawnPolicy::SingleDraw);

        // On a 2x2 board three of four cells are snake.
        let overlapping = (0..100)
            .map(|_| spawner.spawn(&mut rng, &snake, GridSize(2)))
            .filter(|cell| snake.occupies(*cell))
            .count();

        assert!(overlapping > 0);
    }

    #[test]
    fn resample_finds_the_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(5);
        let snake = Snake::from_cells(vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)]);
        let spawner = FoodSpawner::new(SpawnPolicy::Resample { max_attempts: 1 });

        for _ in 0..20 {
            assert_eq!(spawner.spawn(&mut rng, &snake, GridSize(2)), Cell::new(0, 1));
        }
    }

    #[test]
    fn full_board_falls_back_to_occupied_cell() {
        let mut rng = StdRng::seed_from_u64(9);
        let snake = Snake::from_cells(vec![
            Cell::new(1, 0),
            Cell::new(1, 1),
            Cell::new(0, 1),
            Cell::new(0, 0),
        ]);
        let spawner = FoodSpawner::default();

        let food = spawner.spawn(&mut rng, &snake, GridSize(2));

        assert!(GridSize(2).contains(food));
        assert!(snake.occupies(food));
    }

    #[test]
    fn palette_cycles_through_all_colors() {
        let mut palette = FoodPalette::default();
        assert_eq!(palette.index(), 0);

        for expected in 1..FOOD_COLORS.len() {
            palette.advance();
            assert_eq!(palette.index(), expected);
        }

        palette.advance();
        assert_eq!(palette.index(), 0);
    }
}
