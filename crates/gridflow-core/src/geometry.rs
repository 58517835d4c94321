//! Integer grid geometry: cell positions, unit directions and boxes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;
use thiserror::Error;

/// A cell position on the grid.
///
/// Its `Display` form (`"x,y"`) is the canonical key used in persisted
/// documents and parses back losslessly, negative values included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Multiply both components by `n`.
    pub fn scale(self, n: i32) -> Self {
        Self::new(self.x * n, self.y * n)
    }

    /// Step once in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        self + direction.delta()
    }

    /// Component-wise addition, or `None` if either axis overflows.
    pub fn checked_add(self, other: Vector) -> Option<Self> {
        Some(Self::new(self.x.checked_add(other.x)?, self.y.checked_add(other.y)?))
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, other: Vector) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Failure to parse a `"x,y"` key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid vector key: {0:?}")]
pub struct ParseVectorError(pub String);

impl FromStr for Vector {
    type Err = ParseVectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| ParseVectorError(s.to_string()))?;
        let x = x.trim().parse().map_err(|_| ParseVectorError(s.to_string()))?;
        let y = y.trim().parse().map_err(|_| ParseVectorError(s.to_string()))?;
        Ok(Vector::new(x, y))
    }
}

/// One of the four axis-aligned unit steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// The unit vector for this direction (y grows downwards).
    pub fn delta(self) -> Vector {
        match self {
            Direction::Up => Vector::new(0, -1),
            Direction::Down => Vector::new(0, 1),
            Direction::Left => Vector::new(-1, 0),
            Direction::Right => Vector::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The offset reached after `n` unit steps.
    pub fn scale(self, n: i32) -> Vector {
        self.delta().scale(n)
    }

    pub fn orientation(self) -> Orientation {
        match self {
            Direction::Left | Direction::Right => Orientation::Horizontal,
            Direction::Up | Direction::Down => Orientation::Vertical,
        }
    }
}

/// Axis of a straight line run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The two directions a run of this orientation extends in.
    pub fn directions(self) -> [Direction; 2] {
        match self {
            Orientation::Horizontal => [Direction::Left, Direction::Right],
            Orientation::Vertical => [Direction::Up, Direction::Down],
        }
    }

    /// The two directions perpendicular to this orientation.
    pub fn perpendicular(self) -> [Direction; 2] {
        match self {
            Orientation::Horizontal => [Direction::Up, Direction::Down],
            Orientation::Vertical => [Direction::Left, Direction::Right],
        }
    }
}

/// Axis-aligned rectangle of cells, inclusive on both corners.
///
/// The two corners may be given in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridBox {
    pub start: Vector,
    pub end: Vector,
}

impl GridBox {
    pub fn new(start: Vector, end: Vector) -> Self {
        Self { start, end }
    }

    pub fn top_left(&self) -> Vector {
        Vector::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y))
    }

    pub fn bottom_right(&self) -> Vector {
        Vector::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y))
    }

    pub fn contains(&self, position: Vector) -> bool {
        let tl = self.top_left();
        let br = self.bottom_right();
        position.x >= tl.x && position.x <= br.x && position.y >= tl.y && position.y <= br.y
    }

    /// Shift both corners by `delta`, normalizing corner order.
    pub fn translate(&self, delta: Vector) -> Self {
        Self::new(self.top_left() + delta, self.bottom_right() + delta)
    }

    /// Smallest box containing every position, or `None` for an empty iterator.
    pub fn bounding<I: IntoIterator<Item = Vector>>(positions: I) -> Option<Self> {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| {
            (
                Vector::new(min.x.min(p.x), min.y.min(p.y)),
                Vector::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(Self::new(min, max))
    }
}
