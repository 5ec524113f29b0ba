//! Grid coordinates: [`Pos`].

use std::fmt;
use std::ops::{Add, Sub};

/// A cell coordinate. Rows grow downward, columns grow right.
///
/// Ordering is row-major: first by `row`, then by `col`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    /// Top-left corner (0, 0).
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

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

    /// Absolute row and column distance to `other`.
    #[inline]
    pub const fn abs_delta(self, other: Self) -> (i32, i32) {
        ((self.row - other.row).abs(), (self.col - other.col).abs())
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
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

impl From<(i32, i32)> for Pos {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_row_major() {
        let mut v = vec![Pos::new(1, 0), Pos::new(0, 5), Pos::new(0, 1)];
        v.sort();
        assert_eq!(v, vec![Pos::new(0, 1), Pos::new(0, 5), Pos::new(1, 0)]);
    }

    #[test]
    fn abs_delta_is_symmetric() {
        let a = Pos::new(2, 7);
        let b = Pos::new(5, 3);
        assert_eq!(a.abs_delta(b), (3, 4));
        assert_eq!(b.abs_delta(a), (3, 4));
    }

    #[test]
    fn display() {
        assert_eq!(Pos::new(3, 4).to_string(), "(3, 4)");
    }
}
