use std::collections::VecDeque;

use crate::consts::{MAX_SNAKE_SIZE, ORIGINAL_SIZE};
use crate::geometry::{Direction, Position};
use Direction::*;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveResult {
    Moved { new_head: Position, old_head: Position },
    /// The next cell is outside the play area; nothing changed.
    Blocked { candidate: Position },
    /// No intent yet; nothing changed.
    Idle,
}

#[derive(Clone, Debug)]
pub struct Snake {
    head: Position,
    direction: Direction,
    // Oldest segment at the front
    body: VecDeque<Position>,
    size: usize,
}

impl Snake {
    pub fn new(head: Position, direction: Direction) -> Self {
        Snake { head, direction, body: VecDeque::new(), size: ORIGINAL_SIZE }
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn heading(&self) -> f64 {
        self.direction.heading()
    }

    /// Body segments, oldest first. The head is not included.
    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    /// Contiguous copy of the body for collision checks and rendering.
    pub fn body_snapshot(&self) -> Vec<Position> {
        self.body.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Advances one cell toward `intent`, leaving the old head behind as a
    /// body segment. Out-of-bounds moves are rejected whole.
    pub fn move_step(&mut self, intent: Option<Direction>) -> MoveResult {
        let dir = match intent {
            Some(d) => d,
            None => return Idle,
        };

        let candidate = dir.step_from(self.head);
        if !candidate.in_snake_bounds() {
            return Blocked { candidate };
        }

        let old_head = self.head;
        self.body.push_back(old_head);
        self.direction = dir;
        self.head = candidate;

        Moved { new_head: candidate, old_head }
    }

    /// Grows the target length by `amount`, never past `MAX_SNAKE_SIZE`.
    pub fn grow(&mut self, amount: usize) {
        self.size = (self.size + amount).min(MAX_SNAKE_SIZE);
    }

    /// Evicts the oldest segments until the body fits `size`.
    pub fn trim(&mut self) -> Vec<Position> {
        let mut evicted = vec![];
        while self.body.len() > self.size {
            if let Some(tail) = self.body.pop_front() {
                evicted.push(tail);
            }
        }
        evicted
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }

    #[cfg(test)]
    pub(crate) fn set_size(&mut self, size: usize) {
        self.size = size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_without_intent() {
        let mut snake = Snake::new(Position::ORIGIN, Right);
        assert_eq!(snake.move_step(None), Idle);
        assert_eq!(snake.head(), Position::ORIGIN);
        assert!(snake.is_empty());
    }

    #[test]
    fn blocked_at_right_edge() {
        let mut snake = Snake::new(Position::new(258.0, 0.0), Up);
        let res = snake.move_step(Some(Right));
        assert_eq!(res, Blocked { candidate: Position::new(278.0, 0.0) });
        assert_eq!(snake.head(), Position::new(258.0, 0.0));
        assert_eq!(snake.direction(), Up);
        assert!(snake.is_empty());
    }

    #[test]
    fn old_head_becomes_segment() {
        let mut snake = Snake::new(Position::ORIGIN, Right);
        let res = snake.move_step(Some(Up));
        assert_eq!(res, Moved { new_head: Position::new(0.0, 20.0), old_head: Position::ORIGIN });
        assert_eq!(snake.heading(), 90.0);
        assert_eq!(snake.body_snapshot(), vec![Position::ORIGIN]);
        assert_eq!(snake.head_char(), '^');
    }

    #[test]
    fn body_is_a_sliding_window() {
        let mut snake = Snake::new(Position::new(-240.0, 0.0), Right);
        for i in 0..10 {
            let before = snake.len();
            snake.move_step(Some(Right));
            let evicted = snake.trim();
            assert_eq!(snake.len(), (before + 1).min(snake.size()));
            assert_eq!(evicted.len(), usize::from(i >= ORIGINAL_SIZE));
        }
        // Oldest segment first
        assert_eq!(snake.body().front(), Some(&Position::new(-160.0, 0.0)));
        assert_eq!(snake.body().back(), Some(&Position::new(-60.0, 0.0)));
    }

    #[test]
    fn growth_is_clamped() {
        let mut snake = Snake::new(Position::ORIGIN, Right);
        snake.set_size(99);
        snake.grow(5);
        assert_eq!(snake.size(), 100);
        snake.grow(1);
        assert_eq!(snake.size(), 100);
    }
}
