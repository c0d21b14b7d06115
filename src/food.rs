use std::collections::BTreeMap;
use std::time::Duration;

use log::debug;

use crate::consts::*;
use crate::geometry::{Direction, Position};
use crate::random::RandomSource;

/// Active numbered food items, keyed by index.
///
/// Iteration is always in ascending index order, which is what makes
/// `try_consume` pick the lowest index when several items are in range.
#[derive(Debug, Default, Clone)]
pub struct FoodManager {
    items: BTreeMap<u32, Position>,
}

impl FoodManager {
    pub fn new() -> Self {
        FoodManager { items: BTreeMap::new() }
    }

    /// Places items `1..=count` on the spawn lattice.
    pub fn spawn_batch<R: RandomSource>(&mut self, count: u32, rng: &mut R) {
        let half = (SZ_SQUARE + DIM_PLAY_AREA as f64) / 2.0;

        for index in 1..=count {
            let col = rng.int_in(1, FOOD_GRID as i64) as f64;
            let row = rng.int_in(1, FOOD_GRID as i64) as f64;
            let pos = Position::new(col * SZ_SQUARE - half, row * SZ_SQUARE - half - FOOD_Y_OFFSET);
            debug!("food {} spawned at {}", index, pos);
            self.items.insert(index, pos);
        }
    }

    /// Nudges every item one shift in a random direction, skipping shifts that
    /// would leave the relocation bounds. Returns the delay until the next
    /// relocation.
    pub fn relocate<R: RandomSource>(&mut self, rng: &mut R) -> Duration {
        for (index, pos) in self.items.iter_mut() {
            let dir = Direction::ALL[rng.index(Direction::ALL.len())];
            let (dx, dy) = dir.unit();
            let next = pos.offset(dx * FOOD_SHIFT, dy * FOOD_SHIFT);

            if in_relocation_bounds(next) {
                debug!("food {} moved {} to {}", index, dir, next);
                *pos = next;
            }
        }

        let delay = rng.int_in(TIMER_FOOD_MIN_MS as i64, TIMER_FOOD_MAX_MS as i64);
        Duration::from_millis(delay as u64)
    }

    /// Removes and returns the lowest-indexed item within the consumption
    /// radius of `pos`.
    pub fn try_consume(&mut self, pos: Position) -> Option<u32> {
        let index = self
            .items
            .iter()
            .find(|(_, food)| food.is_close_to(pos, CONSUME_RADIUS))
            .map(|(index, _)| *index)?;

        self.items.remove(&index);
        Some(index)
    }

    pub fn get(&self, index: u32) -> Option<Position> {
        self.items.get(&index).copied()
    }

    pub fn contains(&self, index: u32) -> bool {
        self.items.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Position)> + '_ {
        self.items.iter().map(|(i, p)| (*i, *p))
    }

    pub fn place(&mut self, index: u32, pos: Position) {
        self.items.insert(index, pos);
    }
}

fn in_relocation_bounds(pos: Position) -> bool {
    (FOOD_X_MIN..=FOOD_X_MAX).contains(&pos.x) && (FOOD_Y_MIN..=FOOD_Y_MAX).contains(&pos.y)
}
