//! Snake versus monsters: eat the numbered food, keep your head away from
//! the monsters.

pub mod config;
pub mod consts;
pub mod error;
pub mod food;
pub mod game;
pub mod geometry;
pub mod input;
pub mod monster;
pub mod random;
pub mod schedule;
pub mod session;
pub mod snake;
pub mod term;

/// Terminal cell coordinates (column, row).
pub type Coords = (u16, u16);
