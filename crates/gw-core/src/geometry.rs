//! Grid position and facing direction.

use std::fmt;
use std::ops::Add;

/// A point on the infinite integer lattice.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Chebyshev (`L∞`) distance, the metric interaction radii are expressed in.
    #[inline]
    pub fn chebyshev_distance(self, other: Position) -> i64 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Displacement `other - self`.
    #[inline]
    pub fn delta_to(self, other: Position) -> (i64, i64) {
        (other.x - self.x, other.y - self.y)
    }

    /// The position one step away in `dir`.
    #[inline]
    pub fn step(self, dir: Direction) -> Position {
        let (dx, dy) = dir.unit_vector();
        Position::new(self.x + dx, self.y + dy)
    }

    /// Floored-division patch coordinates for a given patch side length.
    ///
    /// Uses `div_euclid` rather than plain integer division so negative
    /// coordinates floor towards negative infinity instead of truncating
    /// towards zero.
    #[inline]
    pub fn patch_coords(self, patch_size: i64) -> (i64, i64) {
        (self.x.div_euclid(patch_size), self.y.div_euclid(patch_size))
    }

    /// This position's offset within its own patch, in `[0, patch_size)`.
    #[inline]
    pub fn local_coords(self, patch_size: i64) -> (i64, i64) {
        (self.x.rem_euclid(patch_size), self.y.rem_euclid(patch_size))
    }
}

impl Add<(i64, i64)> for Position {
    type Output = Position;
    #[inline]
    fn add(self, (dx, dy): (i64, i64)) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four axis-aligned facings an agent can hold.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(dx, dy)` for one step in this direction. `+y` is "up".
    #[inline]
    pub fn unit_vector(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Rotate 90° counter-clockwise. Total — every direction has a left turn.
    #[inline]
    pub fn turn_left(self) -> Direction {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// Rotate 90° clockwise. Total — every direction has a right turn.
    #[inline]
    pub fn turn_right(self) -> Direction {
        self.turn_left().turn_left().turn_left()
    }

    /// Index into the 4-element `allowed_movement_directions` /
    /// `allowed_rotations` configuration arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        })
    }
}
