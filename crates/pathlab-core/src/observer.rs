//! Read-only hooks into a running search.

use crate::astar::SearchResult;
use crate::grid::Grid;
use crate::pos::Pos;

/// Snapshot handed to a [`SearchObserver`] after each expansion.
///
/// The grid reflects the open/closed status of every cell at this point of
/// the search.
#[derive(Debug, Clone, Copy)]
pub struct Step<'a> {
    pub grid: &'a Grid,
    /// The cell just expanded.
    pub current: Pos,
    /// Its g-score when expanded.
    pub g: f64,
    /// Its f-score when expanded.
    pub f: f64,
    /// Expansions so far, including this one.
    pub nodes_explored: usize,
    /// Number of cells currently open.
    pub open_cells: usize,
}

/// Receives search progress. Observers cannot alter control flow; use a
/// [`Context`](crate::Context) to cancel.
pub trait SearchObserver {
    /// Called once per expansion, after neighbors have been relaxed.
    fn on_expand(&mut self, _step: &Step<'_>) {}

    /// Called once when the search ends with a result.
    fn on_finish(&mut self, _result: &SearchResult) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

impl<F> SearchObserver for F
where
    F: FnMut(&Step<'_>),
{
    fn on_expand(&mut self, step: &Step<'_>) {
        self(step)
    }
}
