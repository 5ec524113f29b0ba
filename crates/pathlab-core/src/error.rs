//! Error types for grid construction, editing and search.

use std::fmt;

use crate::pos::Pos;

/// Errors raised by [`Grid`](crate::Grid) construction and edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Rows and columns must both be positive.
    InvalidDimensions { rows: i32, cols: i32 },
    /// A position outside the grid was addressed.
    OutOfBounds { pos: Pos, rows: i32, cols: i32 },
    /// An ASCII layout could not be parsed.
    Parse { line: usize, reason: String },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "grid dimensions must be positive, got {rows}x{cols}")
            }
            Self::OutOfBounds { pos, rows, cols } => {
                write!(f, "position {pos} is outside the {rows}x{cols} grid")
            }
            Self::Parse { line, reason } => write!(f, "grid layout line {line}: {reason}"),
        }
    }
}

impl std::error::Error for GridError {}

/// Why a start/end pair was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointProblem {
    OutOfBounds(Pos),
    /// Start and end are the same cell.
    SameCell(Pos),
    Wall(Pos),
}

impl fmt::Display for EndpointProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "{p} is outside the grid"),
            Self::SameCell(p) => write!(f, "start and end are both {p}"),
            Self::Wall(p) => write!(f, "{p} is a wall"),
        }
    }
}

/// Errors raised by [`search`](crate::search).
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The start/end pair is unusable; nothing was searched.
    InvalidEndpoint(EndpointProblem),
    /// The predecessor table loops or is longer than the grid. Indicates a
    /// bug in score relaxation.
    InconsistentPredecessorChain {
        start: Option<Pos>,
        end: Pos,
        rows: i32,
        cols: i32,
    },
    /// The search was cancelled between two expansions. Transient cell state
    /// has been reset.
    Cancelled { nodes_explored: usize },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoint(problem) => write!(f, "invalid endpoint: {problem}"),
            Self::InconsistentPredecessorChain {
                start,
                end,
                rows,
                cols,
            } => {
                write!(f, "inconsistent predecessor chain ending at {end} on a {rows}x{cols} grid")?;
                match start {
                    Some(s) => write!(f, " (start {s})"),
                    None => f.write_str(" (no start placed)"),
                }
            }
            Self::Cancelled { nodes_explored } => {
                write!(f, "search cancelled after {nodes_explored} expansions")
            }
        }
    }
}

impl std::error::Error for SearchError {}

impl From<EndpointProblem> for SearchError {
    fn from(p: EndpointProblem) -> Self {
        Self::InvalidEndpoint(p)
    }
}
