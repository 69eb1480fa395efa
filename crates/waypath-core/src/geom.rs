//! Geometry primitive: [`Pos`], a `(row, col)` grid coordinate.

use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A grid coordinate. Row grows downward, column grows rightward.
///
/// Coordinates are signed so that neighbour arithmetic may step outside the
/// grid; bounds checks on [`Grid`](crate::Grid) then reject the result.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[i32; 2]", into = "[i32; 2]")
)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a position shifted by (dr, dc).
    #[inline]
    pub const fn shift(self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// The four orthogonal neighbours in the order up, down, left, right.
    #[inline]
    pub fn neighbors_4(self) -> [Pos; 4] {
        [
            self.shift(-1, 0),
            self.shift(1, 0),
            self.shift(0, -1),
            self.shift(0, 1),
        ]
    }

    /// All eight neighbours, scanned row by row from the top-left.
    #[inline]
    pub fn neighbors_8(self) -> [Pos; 8] {
        [
            self.shift(-1, -1),
            self.shift(-1, 0),
            self.shift(-1, 1),
            self.shift(0, -1),
            self.shift(0, 1),
            self.shift(1, -1),
            self.shift(1, 0),
            self.shift(1, 1),
        ]
    }

    /// Unit direction from `self` towards `other`, each component in -1..=1.
    #[inline]
    pub fn dir_to(self, other: Pos) -> Pos {
        Pos::new(
            (other.row - self.row).signum(),
            (other.col - self.col).signum(),
        )
    }

    /// Whether `self` and `other` are orthogonally adjacent.
    #[inline]
    pub fn is_adjacent_4(self, other: Pos) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }

    /// Whether `self` and `other` are adjacent, diagonals included.
    #[inline]
    pub fn is_adjacent_8(self, other: Pos) -> bool {
        self != other && (self.row - other.row).abs() <= 1 && (self.col - other.col).abs() <= 1
    }

    /// Whether this value, read as a direction, has both components set.
    #[inline]
    pub fn is_diagonal(self) -> bool {
        self.row != 0 && self.col != 0
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

/// Renders as `row,col`, the key format used by step traces.
impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl From<[i32; 2]> for Pos {
    fn from([row, col]: [i32; 2]) -> Self {
        Self::new(row, col)
    }
}

impl From<Pos> for [i32; 2] {
    fn from(p: Pos) -> Self {
        [p.row, p.col]
    }
}

impl From<(i32, i32)> for Pos {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Pos {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Pos {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl Mul<i32> for Pos {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.row * rhs, self.col * rhs)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn pos_is_a_pair() {
        let json = serde_json::to_string(&Pos::new(5, 9)).unwrap();
        assert_eq!(json, "[5,9]");
        let back: Pos = serde_json::from_str("[5,9]").unwrap();
        assert_eq!(back, Pos::new(5, 9));
    }
}
