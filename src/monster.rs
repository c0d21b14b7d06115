use std::time::Duration;

use log::debug;

use crate::consts::*;
use crate::error::{GameError, GameResult};
use crate::geometry::{quantize_heading, Position};
use crate::random::RandomSource;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Monster {
    pos: Position,
    heading: f64,
}

/// What a pursuit tick found after every monster moved.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Pursuit {
    /// Monsters that ended the tick touching the snake's body.
    pub contacts: u32,
    /// Whether any monster reached the snake's head.
    pub head_hit: bool,
}

impl Monster {
    pub fn new(pos: Position) -> Self {
        Monster { pos, heading: 0.0 }
    }

    /// Samples positions until one is farther than `SAFE_DISTANCE` from `head`.
    pub fn spawn<R: RandomSource>(index: usize, head: Position, rng: &mut R) -> GameResult<Self> {
        let limit = MONSTER_SPAWN_LIMIT as i64;

        for _ in 0..MONSTER_SPAWN_ATTEMPTS {
            let x = rng.int_in(-limit, limit) as f64;
            let y = rng.int_in(-limit, limit) as f64;
            let pos = Position::new(x, y);

            if pos.distance(head) > SAFE_DISTANCE {
                debug!("monster {} spawned at {}", index, pos);
                return Ok(Monster::new(pos));
            }
        }

        Err(GameError::NoSpawnRoom { index, distance: SAFE_DISTANCE })
    }

    pub fn pos(&self) -> Position {
        self.pos
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Turns toward `target` on the 8-way compass and advances one cell.
    pub fn pursue(&mut self, target: Position) {
        self.heading = quantize_heading(self.pos.bearing_to(target));
        self.pos = self.pos.forward(self.heading, SZ_SQUARE);
    }

    pub fn touches_body(&self, body: &[Position]) -> bool {
        body.iter().any(|seg| self.pos.is_close_to(*seg, BODY_HIT_RADIUS))
    }

    pub fn touches_head(&self, head: Position) -> bool {
        self.pos.is_close_to(head, HEAD_HIT_RADIUS)
    }
}

/// Spawns `count` monsters away from `head`.
pub fn spawn_pack<R: RandomSource>(count: usize, head: Position, rng: &mut R) -> GameResult<Vec<Monster>> {
    (0..count).map(|i| Monster::spawn(i, head, rng)).collect()
}

/// Moves every monster toward `head`, then checks body contacts per monster
/// and head collision over the whole pack.
pub fn pursue_tick(monsters: &mut [Monster], head: Position, body: &[Position]) -> Pursuit {
    let mut result = Pursuit::default();

    for monster in monsters.iter_mut() {
        monster.pursue(head);
        if monster.touches_body(body) {
            result.contacts += 1;
        }
    }

    result.head_hit = monsters.iter().any(|m| m.touches_head(head));
    result
}

/// Randomised delay before the next pursuit tick.
pub fn next_delay<R: RandomSource>(rng: &mut R) -> Duration {
    let ms = rng.int_in(TIMER_MONSTER_MIN_MS as i64, TIMER_MONSTER_MAX_MS as i64);
    Duration::from_millis(ms as u64)
}
