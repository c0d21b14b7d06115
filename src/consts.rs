//! Fixed gameplay constants.
//!
//! Coordinates are turtle-style: origin at the centre of the play area,
//! `y` grows upwards.

use std::time::Duration;

// Screen layout
pub const DIM_PLAY_AREA: i32 = 500;
pub const DIM_STAT_AREA: i32 = 40;
pub const DIM_MARGIN: i32 = 30;

/// Grid cell size, also the distance the snake and monsters move per tick.
pub const SZ_SQUARE: f64 = 20.0;

// Tick cadences, in milliseconds
pub const TIMER_SNAKE_MS: u64 = 200;
pub const TIMER_MONSTER_MIN_MS: u64 = TIMER_SNAKE_MS - 50;
pub const TIMER_MONSTER_MAX_MS: u64 = TIMER_SNAKE_MS + 200;
pub const TIMER_FOOD_MIN_MS: u64 = 5000;
pub const TIMER_FOOD_MAX_MS: u64 = 10000;

pub const SNAKE_TICK: Duration = Duration::from_millis(TIMER_SNAKE_MS);

// Population
pub const FOOD_COUNT: u32 = 5;
pub const NUM_MONSTERS: usize = 4;

// Snake size
pub const ORIGINAL_SIZE: usize = 6;
pub const MAX_SNAKE_SIZE: usize = 100;

// Distances
pub const CONSUME_RADIUS: f64 = 14.0;
pub const HEAD_HIT_RADIUS: f64 = 14.0;
pub const BODY_HIT_RADIUS: f64 = SZ_SQUARE;
pub const SAFE_DISTANCE: f64 = 100.0;
pub const FOOD_SHIFT: f64 = 40.0;

// Snake motion bounds (exclusive). The top edge is lower to leave room for
// the status band.
pub const SNAKE_X_LIMIT: f64 = 260.0;
pub const SNAKE_Y_MIN: f64 = -270.0;
pub const SNAKE_Y_MAX: f64 = 240.0;

// Food relocation bounds (inclusive)
pub const FOOD_X_MIN: f64 = -250.0;
pub const FOOD_X_MAX: f64 = 250.0;
pub const FOOD_Y_MIN: f64 = -285.0;
pub const FOOD_Y_MAX: f64 = 210.0;

/// Food spawns on a `FOOD_GRID x FOOD_GRID` lattice of cells.
pub const FOOD_GRID: i32 = DIM_PLAY_AREA / SZ_SQUARE as i32;
/// Extra downward offset of the food lattice, keeping it below the status band.
pub const FOOD_Y_OFFSET: f64 = 30.0;

/// Monster spawn coordinates are sampled in `[-MONSTER_SPAWN_LIMIT, MONSTER_SPAWN_LIMIT]`.
pub const MONSTER_SPAWN_LIMIT: i32 = DIM_PLAY_AREA / 2 - DIM_MARGIN;
pub const MONSTER_SPAWN_ATTEMPTS: usize = 10_000;

/// Snake body length at which the game is won for `food_count` items.
pub const fn win_length(food_count: u32) -> usize {
    ((1 + food_count) * food_count / 2) as usize + ORIGINAL_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_win_length_is_21() {
        assert_eq!(win_length(FOOD_COUNT), 21);
    }

    #[test]
    fn monster_jitter_window() {
        assert_eq!(TIMER_MONSTER_MIN_MS, 150);
        assert_eq!(TIMER_MONSTER_MAX_MS, 400);
    }
}
