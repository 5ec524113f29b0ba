use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use crate::cell::Status;
use crate::context::Context;
use crate::error::{EndpointProblem, SearchError};
use crate::grid::Grid;
use crate::heuristic::Heuristic;
use crate::neighbors::Movement;
use crate::observer::{NoopObserver, SearchObserver, Step};
use crate::path::reconstruct;
use crate::pos::Pos;

/// Outcome of one A* invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub found: bool,
    /// Cells from start to end inclusive. Empty when not found.
    pub path: Vec<Pos>,
    /// Number of open → closed transitions.
    pub nodes_explored: usize,
    /// Total move cost of `path`, `0.0` when not found.
    pub cost: f64,
    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}

impl SearchResult {
    /// Number of moves in the path.
    pub fn path_length(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

// ---------------------------------------------------------------------------
// Open-set entries
// ---------------------------------------------------------------------------

/// Frontier entry, ordered for use in a max-`BinaryHeap` so that the entry
/// with the lowest f pops first; ties go to lowest g, then lowest row, then
/// lowest column.
#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    idx: usize,
    pos: Pos,
    f: f64,
    g: f64,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.g.total_cmp(&self.g))
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

/// Score tables for a single invocation, keyed by flat cell index.
struct SearchState {
    g: Vec<f64>,
    f: Vec<f64>,
    came_from: Vec<Option<usize>>,
    open: BinaryHeap<OpenEntry>,
    open_cells: usize,
}

impl SearchState {
    fn new(len: usize) -> Self {
        Self {
            g: vec![f64::INFINITY; len],
            f: vec![f64::INFINITY; len],
            came_from: vec![None; len],
            open: BinaryHeap::new(),
            open_cells: 0,
        }
    }

    /// Record a better route to `idx` and (re-)open it.
    fn open(&mut self, grid: &mut Grid, idx: usize, g: f64, f: f64, from: Option<usize>) {
        self.g[idx] = g;
        self.f[idx] = f;
        self.came_from[idx] = from;
        if grid.status_at(idx) != Status::Open {
            grid.set_status(idx, Status::Open);
            self.open_cells += 1;
        }
        self.open.push(OpenEntry {
            idx,
            pos: grid.pos_at(idx),
            f,
            g,
        });
    }

    /// Pop the best entry whose cell is still open at the same score.
    fn pop(&mut self, grid: &Grid) -> Option<OpenEntry> {
        while let Some(entry) = self.open.pop() {
            let stale = grid.status_at(entry.idx) != Status::Open
                || entry.g.to_bits() != self.g[entry.idx].to_bits();
            if !stale {
                return Some(entry);
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// AStar
// ---------------------------------------------------------------------------

/// A configured A* search: heuristic, movement policy and an optional
/// cancellation context, fixed for the lifetime of the value.
///
/// ```
/// use pathlab_core::{AStar, Grid, HeuristicKind, Pos};
///
/// let mut grid = Grid::parse("S.#\n..#\n..E").unwrap();
/// let h = HeuristicKind::Manhattan;
/// let result = AStar::new(&h, h.movement())
///     .run(&mut grid, Pos::new(0, 0), Pos::new(2, 2))
///     .unwrap();
/// assert!(result.found);
/// assert_eq!(result.path_length(), 4);
/// ```
pub struct AStar<'h, H: Heuristic + ?Sized> {
    heuristic: &'h H,
    movement: Movement,
    ctx: Option<Context>,
}

impl<'h, H: Heuristic + ?Sized> AStar<'h, H> {
    pub fn new(heuristic: &'h H, movement: Movement) -> Self {
        Self {
            heuristic,
            movement,
            ctx: None,
        }
    }

    /// Check `ctx` between expansion steps and stop when it is cancelled.
    pub fn with_context(mut self, ctx: Context) -> Self {
        self.ctx = Some(ctx);
        self
    }

    pub fn movement(&self) -> Movement {
        self.movement
    }

    /// Run the search without an observer.
    pub fn run(&self, grid: &mut Grid, start: Pos, end: Pos) -> Result<SearchResult, SearchError> {
        self.run_observed(grid, start, end, &mut NoopObserver)
    }

    /// Run the search, reporting every expansion to `observer`.
    ///
    /// Transient cell status is reset first. On success the path cells are
    /// flagged; on cancellation the transient state is reset again.
    pub fn run_observed<O: SearchObserver + ?Sized>(
        &self,
        grid: &mut Grid,
        start: Pos,
        end: Pos,
        observer: &mut O,
    ) -> Result<SearchResult, SearchError> {
        let (start_idx, goal_idx) = validate(grid, start, end)?;
        log::debug!(
            "A* from {start} to {end} on {}x{} grid, {}",
            grid.rows(),
            grid.cols(),
            self.movement
        );

        let started = Instant::now();
        grid.reset_search_state();

        let mut state = SearchState::new(grid.len());
        let h_start = self.heuristic.estimate(start, end);
        state.open(grid, start_idx, 0.0, h_start, None);

        let mut nodes_explored = 0usize;
        let mut nbuf = Vec::with_capacity(8);

        let found = loop {
            let Some(current) = state.pop(grid) else {
                break false;
            };
            let ci = current.idx;

            if ci == goal_idx {
                break true;
            }

            grid.set_status(ci, Status::Closed);
            state.open_cells -= 1;
            nodes_explored += 1;

            let current_g = state.g[ci];
            grid.neighbors_into(current.pos, self.movement, &mut nbuf);

            for &(np, cost) in &nbuf {
                let Some(ni) = grid.index(np) else {
                    continue;
                };
                let tentative_g = current_g + cost;
                if tentative_g >= state.g[ni] {
                    continue;
                }
                let f = tentative_g + self.heuristic.estimate(np, end);
                state.open(grid, ni, tentative_g, f, Some(ci));
            }

            observer.on_expand(&Step {
                grid,
                current: current.pos,
                g: current_g,
                f: current.f,
                nodes_explored,
                open_cells: state.open_cells,
            });

            if self.ctx.as_ref().is_some_and(Context::is_done) {
                grid.reset_search_state();
                log::info!("A* cancelled after {nodes_explored} expansions");
                return Err(SearchError::Cancelled { nodes_explored });
            }
        };

        let result = if found {
            let path = reconstruct(grid, &state.came_from, end)?;
            SearchResult {
                found: true,
                path,
                nodes_explored,
                cost: state.g[goal_idx],
                elapsed: started.elapsed(),
            }
        } else {
            SearchResult {
                found: false,
                path: Vec::new(),
                nodes_explored,
                cost: 0.0,
                elapsed: started.elapsed(),
            }
        };

        if result.found {
            log::info!(
                "A* found path: {} moves, cost {:.3}, {} nodes explored in {:?}",
                result.path_length(),
                result.cost,
                result.nodes_explored,
                result.elapsed
            );
        } else {
            log::info!(
                "A* found no path from {start} to {end} after {} nodes",
                result.nodes_explored
            );
        }

        observer.on_finish(&result);
        Ok(result)
    }
}

/// Find a shortest path from `start` to `end`.
///
/// `heuristic` and `movement` are explicit: the engine never infers one from
/// the other. Use [`HeuristicKind::movement`](crate::HeuristicKind::movement)
/// to obtain the admissible pairing for a built-in heuristic.
pub fn search<H: Heuristic + ?Sized>(
    grid: &mut Grid,
    start: Pos,
    end: Pos,
    heuristic: &H,
    movement: Movement,
) -> Result<SearchResult, SearchError> {
    AStar::new(heuristic, movement).run(grid, start, end)
}

fn validate(grid: &Grid, start: Pos, end: Pos) -> Result<(usize, usize), EndpointProblem> {
    let endpoint = |p: Pos| match grid.cell(p) {
        None => Err(EndpointProblem::OutOfBounds(p)),
        Some(c) if c.is_wall() => Err(EndpointProblem::Wall(p)),
        Some(_) => Ok(()),
    };
    endpoint(start)?;
    endpoint(end)?;
    if start == end {
        return Err(EndpointProblem::SameCell(start));
    }
    match (grid.index(start), grid.index(end)) {
        (Some(s), Some(e)) => Ok((s, e)),
        _ => Err(EndpointProblem::OutOfBounds(start)),
    }
}
