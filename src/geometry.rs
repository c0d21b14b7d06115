use std::fmt;

use crate::consts::{SNAKE_X_LIMIT, SNAKE_Y_MAX, SNAKE_Y_MIN, SZ_SQUARE};
use Direction::*;

/// A point on the play plane.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    pub fn distance(&self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Strict proximity test: `true` when the points are less than `threshold` apart.
    pub fn is_close_to(&self, other: Position, threshold: f64) -> bool {
        self.distance(other) < threshold
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Position { x: self.x + dx, y: self.y + dy }
    }

    /// Moves `distance` units along `heading` (degrees, counter-clockwise from +x).
    pub fn forward(&self, heading: f64, distance: f64) -> Self {
        let rad = heading.to_radians();
        self.offset(distance * rad.cos(), distance * rad.sin())
    }

    /// Angle from `self` towards `target` in degrees, in `[0, 360)`.
    pub fn bearing_to(&self, target: Position) -> f64 {
        let deg = (target.y - self.y).atan2(target.x - self.x).to_degrees();
        // Round away float noise so exact diagonals land on their octant boundary
        let deg = (deg * 1e10).round() / 1e10;
        deg.rem_euclid(360.0)
    }

    /// Whether the snake head may occupy this position.
    pub fn in_snake_bounds(&self) -> bool {
        -SNAKE_X_LIMIT < self.x && self.x < SNAKE_X_LIMIT && SNAKE_Y_MIN < self.y && self.y < SNAKE_Y_MAX
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// One of the four directional intents a player can issue.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    /// Heading in degrees.
    pub fn heading(self) -> f64 {
        match self {
            Up => 90.0,
            Down => 270.0,
            Left => 180.0,
            Right => 0.0,
        }
    }

    /// Unit offset on the plane (y grows upwards).
    pub fn unit(self) -> (f64, f64) {
        match self {
            Up => (0.0, 1.0),
            Down => (0.0, -1.0),
            Left => (-1.0, 0.0),
            Right => (1.0, 0.0),
        }
    }

    /// Position one grid cell away from `from`.
    pub fn step_from(self, from: Position) -> Position {
        let (dx, dy) = self.unit();
        from.offset(dx * SZ_SQUARE, dy * SZ_SQUARE)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Up => "Up",
            Down => "Down",
            Left => "Left",
            Right => "Right",
        };
        f.write_str(s)
    }
}

/// Snaps a bearing to one of eight 45° headings.
///
/// Even octants keep their lower edge, odd octants round up to the next
/// one, so pursuit favours cardinal headings.
pub fn quantize_heading(angle: f64) -> f64 {
    let q = (angle / 45.0).floor() as i64;
    let q = if q % 2 == 0 { q } else { q + 1 };
    ((q * 45) as f64).rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_rounds_odd_octants_up() {
        assert_eq!(quantize_heading(46.0), 90.0);
        assert_eq!(quantize_heading(44.0), 0.0);
        assert_eq!(quantize_heading(135.0), 180.0);
        assert_eq!(quantize_heading(180.0), 180.0);
        assert_eq!(quantize_heading(359.0), 0.0);
    }

    #[test]
    fn bearing_is_counter_clockwise_from_east() {
        let o = Position::ORIGIN;
        assert_eq!(o.bearing_to(Position::new(10.0, 0.0)), 0.0);
        assert_eq!(o.bearing_to(Position::new(0.0, 10.0)), 90.0);
        assert_eq!(o.bearing_to(Position::new(-10.0, 0.0)), 180.0);
        assert_eq!(o.bearing_to(Position::new(0.0, -10.0)), 270.0);
        assert_eq!(o.bearing_to(Position::new(10.0, 10.0)), 45.0);
    }

    #[test]
    fn snake_bounds_are_exclusive_and_asymmetric() {
        assert!(Position::new(240.0, 220.0).in_snake_bounds());
        assert!(!Position::new(260.0, 0.0).in_snake_bounds());
        assert!(!Position::new(0.0, 240.0).in_snake_bounds());
        assert!(Position::new(0.0, -260.0).in_snake_bounds());
        assert!(!Position::new(0.0, -270.0).in_snake_bounds());
    }

    #[test]
    fn close_enough_is_strict() {
        let a = Position::ORIGIN;
        assert!(a.is_close_to(Position::new(13.9, 0.0), 14.0));
        assert!(!a.is_close_to(Position::new(14.0, 0.0), 14.0));
    }

    #[test]
    fn direction_steps_one_cell() {
        assert_eq!(Up.step_from(Position::ORIGIN), Position::new(0.0, 20.0));
        assert_eq!(Left.step_from(Position::new(40.0, 0.0)), Position::new(20.0, 0.0));
    }
}
