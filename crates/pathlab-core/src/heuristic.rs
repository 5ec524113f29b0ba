//! Distance estimates used to guide A*.
//!
//! Each built-in heuristic is paired with the movement policy under which it
//! is admissible: Manhattan with 4-way movement, Euclidean and Octile with
//! 8-way movement. [`HeuristicKind::movement`] exposes that pairing so callers
//! never have to pick the two independently.

use std::f64::consts::SQRT_2;
use std::fmt;
use std::str::FromStr;

use crate::neighbors::Movement;
use crate::pos::Pos;

/// An estimate of the remaining cost from `from` to `to`.
///
/// Must be non-negative and, for an optimal search, never overestimate the
/// true cost under the movement policy it is used with.
pub trait Heuristic {
    fn estimate(&self, from: Pos, to: Pos) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(Pos, Pos) -> f64,
{
    #[inline]
    fn estimate(&self, from: Pos, to: Pos) -> f64 {
        self(from, to)
    }
}

/// Manhattan (L1) distance.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> f64 {
    let (dr, dc) = a.abs_delta(b);
    f64::from(dr + dc)
}

/// Euclidean (L2) distance.
#[inline]
pub fn euclidean(a: Pos, b: Pos) -> f64 {
    let (dr, dc) = a.abs_delta(b);
    f64::from(dr).hypot(f64::from(dc))
}

/// Octile distance: the exact cost on an open 8-way grid with diagonal cost
/// `SQRT_2`.
#[inline]
pub fn octile(a: Pos, b: Pos) -> f64 {
    let (dr, dc) = a.abs_delta(b);
    let (lo, hi) = if dr < dc { (dr, dc) } else { (dc, dr) };
    f64::from(hi) + (SQRT_2 - 1.0) * f64::from(lo)
}

/// Error returned when parsing an unknown heuristic name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHeuristic(pub String);

impl fmt::Display for UnknownHeuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown heuristic {:?} (expected manhattan, euclidean or octile)",
            self.0
        )
    }
}

impl std::error::Error for UnknownHeuristic {}

/// The built-in heuristics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HeuristicKind {
    #[default]
    Manhattan,
    Euclidean,
    Octile,
}

impl HeuristicKind {
    pub const ALL: [Self; 3] = [Self::Manhattan, Self::Euclidean, Self::Octile];

    /// Registry name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Manhattan => "manhattan",
            Self::Euclidean => "euclidean",
            Self::Octile => "octile",
        }
    }

    /// The movement policy this heuristic must be used with.
    pub const fn movement(self) -> Movement {
        match self {
            Self::Manhattan => Movement::FourWay,
            Self::Euclidean | Self::Octile => Movement::EightWay,
        }
    }

    /// Whether the paired movement policy enables diagonals.
    pub const fn diagonals_enabled(self) -> bool {
        self.movement().allows_diagonals()
    }

    /// The next heuristic in registry order, wrapping around.
    pub const fn next(self) -> Self {
        match self {
            Self::Manhattan => Self::Euclidean,
            Self::Euclidean => Self::Octile,
            Self::Octile => Self::Manhattan,
        }
    }
}

impl Heuristic for HeuristicKind {
    #[inline]
    fn estimate(&self, from: Pos, to: Pos) -> f64 {
        match self {
            Self::Manhattan => manhattan(from, to),
            Self::Euclidean => euclidean(from, to),
            Self::Octile => octile(from, to),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Manhattan => "Manhattan",
            Self::Euclidean => "Euclidean",
            Self::Octile => "Octile",
        };
        f.write_str(label)
    }
}

impl FromStr for HeuristicKind {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|h| h.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownHeuristic(s.to_string()))
    }
}
