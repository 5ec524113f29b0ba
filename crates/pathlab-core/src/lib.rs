//! A* pathfinding on editable 2D grids.
//!
//! This crate is the engine behind the `pathlab` demonstrator:
//!
//! - [`Grid`] / [`Cell`]: a fixed-size grid with wall, start and end
//!   classification plus per-search status (unvisited / open / closed / path)
//! - [`Movement`]: 4-way or 8-way adjacency, diagonals costing `SQRT_2`
//! - [`HeuristicKind`]: Manhattan, Euclidean and Octile estimates, each paired
//!   with the movement policy it is admissible for
//! - [`search`] / [`AStar`]: best-first search with re-opening of closed cells,
//!   an optional [`SearchObserver`] and cooperative cancellation via
//!   [`Context`]
//! - [`reconstruct`]: predecessor-table walk producing the final path
//!
//! # Tie-breaking
//!
//! Among frontier cells with equal f-score the engine expands the one with
//! the lowest g-score, then the lowest row, then the lowest column. The
//! choice only affects which of several equal-cost paths is returned.

mod astar;
mod cell;
mod context;
mod error;
mod grid;
mod heuristic;
mod neighbors;
mod observer;
mod path;
mod pos;

pub use astar::{AStar, SearchResult, search};
pub use cell::{Cell, Status};
pub use context::Context;
pub use error::{EndpointProblem, GridError, SearchError};
pub use grid::Grid;
pub use heuristic::{Heuristic, HeuristicKind, UnknownHeuristic, euclidean, manhattan, octile};
pub use neighbors::{DIAGONAL_COST, Movement, Offset, STRAIGHT_COST};
pub use observer::{NoopObserver, SearchObserver, Step};
pub use path::reconstruct;
pub use pos::Pos;
