//! Movement policies and their neighbor offsets.

use std::f64::consts::SQRT_2;
use std::fmt;

/// Cost of an axis-aligned move.
pub const STRAIGHT_COST: f64 = 1.0;

/// Cost of a diagonal move.
pub const DIAGONAL_COST: f64 = SQRT_2;

/// A single move: row delta, column delta and its cost.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Offset {
    pub dr: i32,
    pub dc: i32,
    pub cost: f64,
}

const fn straight(dr: i32, dc: i32) -> Offset {
    Offset {
        dr,
        dc,
        cost: STRAIGHT_COST,
    }
}

const fn diagonal(dr: i32, dc: i32) -> Offset {
    Offset {
        dr,
        dc,
        cost: DIAGONAL_COST,
    }
}

// Axis-aligned moves come first (up, down, left, right), then diagonals.
const OFFSETS: [Offset; 8] = [
    straight(-1, 0),
    straight(1, 0),
    straight(0, -1),
    straight(0, 1),
    diagonal(-1, -1),
    diagonal(-1, 1),
    diagonal(1, -1),
    diagonal(1, 1),
];

/// Whether diagonal moves are permitted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Movement {
    /// 4-directional, axis-aligned moves only.
    #[default]
    FourWay,
    /// 8-directional, diagonals cost `SQRT_2`.
    EightWay,
}

impl Movement {
    /// Build a policy from a "diagonals enabled" flag.
    #[inline]
    pub const fn from_diagonals(diagonals: bool) -> Self {
        if diagonals {
            Self::EightWay
        } else {
            Self::FourWay
        }
    }

    #[inline]
    pub const fn allows_diagonals(self) -> bool {
        matches!(self, Self::EightWay)
    }

    /// The offsets reachable in one move under this policy.
    #[inline]
    pub fn offsets(self) -> &'static [Offset] {
        match self {
            Self::FourWay => &OFFSETS[..4],
            Self::EightWay => &OFFSETS,
        }
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FourWay => f.write_str("4-way"),
            Self::EightWay => f.write_str("8-way"),
        }
    }
}
