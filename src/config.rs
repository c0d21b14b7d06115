use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::consts::{win_length, FOOD_COUNT, MAX_SNAKE_SIZE, NUM_MONSTERS};
use crate::error::{GameError, GameResult};

/// Runtime settings. Every field defaults to the classic game.
#[derive(Parser, Debug, Clone)]
#[command(name = "monster-snake")]
#[command(about = "Eat the numbered food in the terminal while monsters chase you")]
pub struct Settings {
    /// Number of food items; the snake must eat all of them to win
    #[arg(long, default_value_t = FOOD_COUNT)]
    pub food_count: u32,

    /// Number of monsters chasing the snake
    #[arg(long, default_value_t = NUM_MONSTERS)]
    pub monsters: usize,

    /// Seed for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to write the log (the terminal is used by the game)
    #[arg(long, default_value = "snake.log")]
    pub log_file: PathBuf,

    /// Log verbosity: off, error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            food_count: FOOD_COUNT,
            monsters: NUM_MONSTERS,
            seed: None,
            log_file: PathBuf::from("snake.log"),
            log_level: LevelFilter::Info,
        }
    }
}

impl Settings {
    /// Rejects settings the game cannot be won with.
    pub fn validate(&self) -> GameResult<()> {
        if self.food_count == 0 {
            return Err(GameError::InvalidConfig("food count must be at least 1".into()));
        }

        // Checked before `win_length` so the arithmetic cannot overflow
        if self.food_count as usize > MAX_SNAKE_SIZE || win_length(self.food_count) > MAX_SNAKE_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "{} food items need a snake longer than the maximum size {}",
                self.food_count, MAX_SNAKE_SIZE
            )));
        }

        Ok(())
    }

    /// Body length that wins the game with these settings.
    pub fn win_length(&self) -> usize {
        win_length(self.food_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_classic() {
        let s = Settings::parse_from(["monster-snake"]);
        assert_eq!(s.food_count, 5);
        assert_eq!(s.monsters, 4);
        assert_eq!(s.seed, None);
        assert_eq!(s.log_level, LevelFilter::Info);
        assert_eq!(s.win_length(), 21);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn parses_overrides() {
        let s = Settings::parse_from(["monster-snake", "--food-count", "3", "--seed", "42", "--log-level", "debug"]);
        assert_eq!(s.food_count, 3);
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.log_level, LevelFilter::Debug);
        assert_eq!(s.win_length(), 12);
    }

    #[test]
    fn rejects_unwinnable_food_counts() {
        let mut s = Settings::default();
        s.food_count = 0;
        assert!(matches!(s.validate(), Err(GameError::InvalidConfig(_))));

        s.food_count = 13;
        assert!(s.validate().is_ok());

        s.food_count = 14;
        assert!(matches!(s.validate(), Err(GameError::InvalidConfig(_))));
    }
}
