use std::io;

use thiserror::Error;

/// Failures outside of normal gameplay.
///
/// Blocked moves, missed food lookups and ticks after the game ended are
/// ordinary outcomes and never show up here.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("could not place monster {index} at least {distance} units away from the snake")]
    NoSpawnRoom { index: usize, distance: f64 },

    #[error("terminal is {width}x{height}, need at least {min_width}x{min_height}")]
    TerminalTooSmall { width: u16, height: u16, min_width: u16, min_height: u16 },

    #[error("terminal I/O failed")]
    Terminal(#[from] io::Error),
}

pub type GameResult<T> = Result<T, GameError>;
