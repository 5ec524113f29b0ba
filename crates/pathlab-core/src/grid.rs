//! The [`Grid`] type: a fixed-size 2D array of [`Cell`]s.
//!
//! The grid owns every cell and tracks where the start and end markers are.
//! Cells are addressed by [`Pos`]; internally they live in a row-major
//! vector and the search engine keys its tables by flat index.

use std::fmt;
use std::str::FromStr;

use crate::cell::{Cell, Status};
use crate::error::GridError;
use crate::neighbors::Movement;
use crate::pos::Pos;

/// A `rows × cols` grid of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: i32,
    cols: i32,
    start: Option<Pos>,
    end: Option<Pos>,
}

impl Grid {
    /// Build a grid of plain, non-wall, unvisited cells.
    pub fn build(rows: i32, cols: i32) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        let cells = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| Cell::new(Pos::new(r, c))))
            .collect();
        Ok(Self {
            cells,
            rows,
            cols,
            start: None,
            end: None,
        })
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.row >= 0 && p.col >= 0 && p.row < self.rows && p.col < self.cols
    }

    /// Current start position, if placed.
    #[inline]
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    /// Current end position, if placed.
    #[inline]
    pub fn end(&self) -> Option<Pos> {
        self.end
    }

    /// The cell at `p`, or `None` if outside the grid.
    pub fn cell(&self, p: Pos) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.wall).count()
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Set or clear the wall flag at `p`.
    ///
    /// Start and end cells cannot become walls: the call is ignored and
    /// `Ok(false)` returned. Otherwise returns `Ok(true)`.
    pub fn set_wall(&mut self, p: Pos, wall: bool) -> Result<bool, GridError> {
        let i = self.checked_index(p)?;
        let cell = &mut self.cells[i];
        if cell.start || cell.end {
            return Ok(false);
        }
        cell.wall = wall;
        Ok(true)
    }

    /// Flip the wall flag at `p`, returning the new flag. Start and end cells
    /// are left untouched.
    pub fn toggle_wall(&mut self, p: Pos) -> Result<bool, GridError> {
        let i = self.checked_index(p)?;
        let cell = &mut self.cells[i];
        if !cell.start && !cell.end {
            cell.wall = !cell.wall;
        }
        Ok(cell.wall)
    }

    /// Place the start marker at `p`, clearing any wall there and removing
    /// the marker from its previous cell. If `p` was the end, it stops being
    /// the end.
    pub fn set_start(&mut self, p: Pos) -> Result<(), GridError> {
        let i = self.checked_index(p)?;
        if let Some(prev) = self.start.take().and_then(|s| self.index(s)) {
            self.cells[prev].start = false;
        }
        if self.end == Some(p) {
            self.end = None;
        }
        let cell = &mut self.cells[i];
        cell.wall = false;
        cell.end = false;
        cell.start = true;
        self.start = Some(p);
        Ok(())
    }

    /// Place the end marker at `p`. Mirror of [`set_start`](Grid::set_start).
    pub fn set_end(&mut self, p: Pos) -> Result<(), GridError> {
        let i = self.checked_index(p)?;
        if let Some(prev) = self.end.take().and_then(|e| self.index(e)) {
            self.cells[prev].end = false;
        }
        if self.start == Some(p) {
            self.start = None;
        }
        let cell = &mut self.cells[i];
        cell.wall = false;
        cell.start = false;
        cell.end = true;
        self.end = Some(p);
        Ok(())
    }

    /// Assign walls from `f` on every cell except start and end. Clears
    /// transient search state. Returns the resulting wall count.
    pub fn map_walls<F: FnMut(Pos) -> bool>(&mut self, mut f: F) -> usize {
        let mut walls = 0;
        for cell in &mut self.cells {
            cell.clear_search_state();
            if cell.start || cell.end {
                continue;
            }
            cell.wall = f(cell.pos());
            if cell.wall {
                walls += 1;
            }
        }
        walls
    }

    /// Remove every wall and all transient search state. Start and end stay.
    pub fn clear_walls(&mut self) {
        for cell in &mut self.cells {
            cell.wall = false;
            cell.clear_search_state();
        }
    }

    /// Clear walls, start, end and transient search state.
    pub fn full_reset(&mut self) {
        for cell in &mut self.cells {
            cell.wall = false;
            cell.start = false;
            cell.end = false;
            cell.clear_search_state();
        }
        self.start = None;
        self.end = None;
    }

    /// Reset every cell to unvisited and clear path flags, leaving walls,
    /// start and end untouched.
    pub fn reset_search_state(&mut self) {
        for cell in &mut self.cells {
            cell.clear_search_state();
        }
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// Append the traversable neighbors of `p` and their move costs to `buf`.
    ///
    /// `buf` is cleared first. Walls are never returned. Reflects the wall
    /// layout at call time.
    pub fn neighbors_into(&self, p: Pos, movement: Movement, buf: &mut Vec<(Pos, f64)>) {
        buf.clear();
        if !self.contains(p) {
            return;
        }
        for off in movement.offsets() {
            let n = p.shift(off.dr, off.dc);
            if let Some(i) = self.index(n) {
                if !self.cells[i].wall {
                    buf.push((n, off.cost));
                }
            }
        }
    }

    /// Traversable neighbors of `p` with their move costs.
    pub fn neighbors_of(&self, p: Pos, movement: Movement) -> Vec<(Pos, f64)> {
        let mut buf = Vec::with_capacity(8);
        self.neighbors_into(p, movement, &mut buf);
        buf
    }

    // -----------------------------------------------------------------------
    // Index helpers
    // -----------------------------------------------------------------------

    /// Convert a `Pos` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn index(&self, p: Pos) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.row * self.cols + p.col) as usize)
    }

    fn checked_index(&self, p: Pos) -> Result<usize, GridError> {
        self.index(p).ok_or(GridError::OutOfBounds {
            pos: p,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Convert a flat index back to a `Pos`.
    #[inline]
    pub(crate) fn pos_at(&self, idx: usize) -> Pos {
        self.cells[idx].pos()
    }

    #[inline]
    pub(crate) fn status_at(&self, idx: usize) -> Status {
        self.cells[idx].status
    }

    #[inline]
    pub(crate) fn set_status(&mut self, idx: usize, status: Status) {
        self.cells[idx].status = status;
    }

    #[inline]
    pub(crate) fn mark_path(&mut self, idx: usize) {
        self.cells[idx].path = true;
    }

    // -----------------------------------------------------------------------
    // ASCII layouts
    // -----------------------------------------------------------------------

    /// Parse an ASCII layout: `#` wall, `S` start, `E` end, `.` floor.
    ///
    /// Blank lines are skipped and each line is trimmed, so indented raw
    /// strings work. All rows must have the same width.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let lines: Vec<(usize, &str)> = s
            .lines()
            .enumerate()
            .map(|(n, l)| (n + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty())
            .collect();
        let Some(&(_, first)) = lines.first() else {
            return Err(GridError::Parse {
                line: 0,
                reason: "empty layout".into(),
            });
        };
        let cols = first.chars().count() as i32;
        let mut grid = Grid::build(lines.len() as i32, cols)?;

        for (row, &(line, text)) in lines.iter().enumerate() {
            if text.chars().count() as i32 != cols {
                return Err(GridError::Parse {
                    line,
                    reason: format!("expected {cols} columns, found {}", text.chars().count()),
                });
            }
            for (col, ch) in text.chars().enumerate() {
                let p = Pos::new(row as i32, col as i32);
                match ch {
                    '.' => {}
                    '#' => {
                        grid.set_wall(p, true)?;
                    }
                    'S' if grid.start.is_some() => {
                        return Err(GridError::Parse {
                            line,
                            reason: "more than one start".into(),
                        });
                    }
                    'S' => grid.set_start(p)?,
                    'E' if grid.end.is_some() => {
                        return Err(GridError::Parse {
                            line,
                            reason: "more than one end".into(),
                        });
                    }
                    'E' => grid.set_end(p)?,
                    other => {
                        return Err(GridError::Parse {
                            line,
                            reason: format!("unexpected character {other:?}"),
                        });
                    }
                }
            }
        }
        Ok(grid)
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Grid {
    /// One line per row using [`Cell::glyph`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.chunks(self.cols as usize).enumerate() {
            if r > 0 {
                f.write_str("\n")?;
            }
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    #[test]
    fn build_rejects_empty_dimensions() {
        assert_eq!(
            Grid::build(0, 4),
            Err(GridError::InvalidDimensions { rows: 0, cols: 4 })
        );
        assert!(Grid::build(3, -1).is_err());
        let g = Grid::build(2, 3).unwrap();
        assert_eq!(g.len(), 6);
        assert!(g.iter().all(|c| !c.is_wall() && c.status() == Status::Unvisited));
    }

    #[test]
    fn start_and_end_are_unique() {
        let mut g = Grid::build(3, 3).unwrap();
        g.set_start(Pos::new(0, 0)).unwrap();
        g.set_start(Pos::new(1, 1)).unwrap();
        assert_eq!(g.start(), Some(Pos::new(1, 1)));
        assert!(!g.cell(Pos::new(0, 0)).unwrap().is_start());
        assert_eq!(g.iter().filter(|c| c.is_start()).count(), 1);

        g.set_end(Pos::new(2, 2)).unwrap();
        g.set_end(Pos::new(2, 1)).unwrap();
        assert_eq!(g.iter().filter(|c| c.is_end()).count(), 1);
    }

    #[test]
    fn start_clears_wall() {
        let mut g = Grid::build(3, 3).unwrap();
        g.set_wall(Pos::new(1, 1), true).unwrap();
        g.set_start(Pos::new(1, 1)).unwrap();
        let c = g.cell(Pos::new(1, 1)).unwrap();
        assert!(c.is_start() && !c.is_wall());
        // Walls cannot be placed on start.
        assert_eq!(g.set_wall(Pos::new(1, 1), true), Ok(false));
        assert_eq!(g.toggle_wall(Pos::new(1, 1)), Ok(false));
        assert!(!g.cell(Pos::new(1, 1)).unwrap().is_wall());
    }

    #[test]
    fn start_over_end_moves_marker() {
        let mut g = Grid::build(2, 2).unwrap();
        g.set_end(Pos::new(0, 1)).unwrap();
        g.set_start(Pos::new(0, 1)).unwrap();
        assert_eq!(g.end(), None);
        let c = g.cell(Pos::new(0, 1)).unwrap();
        assert!(c.is_start() && !c.is_end());
    }

    #[test]
    fn out_of_bounds_edit() {
        let mut g = Grid::build(2, 2).unwrap();
        assert_eq!(
            g.set_start(Pos::new(2, 0)),
            Err(GridError::OutOfBounds {
                pos: Pos::new(2, 0),
                rows: 2,
                cols: 2
            })
        );
        assert!(g.toggle_wall(Pos::new(-1, 0)).is_err());
    }

    #[test]
    fn neighbors_skip_walls_and_edges() {
        let mut g = Grid::build(3, 3).unwrap();
        g.set_wall(Pos::new(0, 1), true).unwrap();
        let n = g.neighbors_of(Pos::new(0, 0), Movement::FourWay);
        assert_eq!(n, vec![(Pos::new(1, 0), 1.0)]);

        let n = g.neighbors_of(Pos::new(0, 0), Movement::EightWay);
        assert_eq!(n, vec![(Pos::new(1, 0), 1.0), (Pos::new(1, 1), SQRT_2)]);

        let n = g.neighbors_of(Pos::new(1, 1), Movement::EightWay);
        assert_eq!(n.len(), 7);
        assert!(n.iter().all(|(p, _)| *p != Pos::new(0, 1)));
    }

    #[test]
    fn neighbors_follow_current_walls() {
        let mut g = Grid::build(1, 3).unwrap();
        assert_eq!(g.neighbors_of(Pos::new(0, 1), Movement::FourWay).len(), 2);
        g.toggle_wall(Pos::new(0, 2)).unwrap();
        assert_eq!(g.neighbors_of(Pos::new(0, 1), Movement::FourWay).len(), 1);
        g.toggle_wall(Pos::new(0, 2)).unwrap();
        assert_eq!(g.neighbors_of(Pos::new(0, 1), Movement::FourWay).len(), 2);
    }

    #[test]
    fn reset_search_state_is_idempotent() {
        let mut g = Grid::parse(
            "S.#
             ..E",
        )
        .unwrap();
        g.set_status(0, Status::Closed);
        g.set_status(1, Status::Open);
        g.mark_path(4);

        g.reset_search_state();
        let once = g.clone();
        g.reset_search_state();
        assert_eq!(g, once);
        assert!(g.iter().all(|c| c.status() == Status::Unvisited && !c.is_path()));
        assert!(g.cell(Pos::new(0, 2)).unwrap().is_wall());
        assert_eq!(g.start(), Some(Pos::new(0, 0)));
    }

    #[test]
    fn clear_walls_keeps_endpoints() {
        let mut g = Grid::parse("S##E").unwrap();
        g.clear_walls();
        assert_eq!(g.wall_count(), 0);
        assert_eq!(g.start(), Some(Pos::new(0, 0)));
        assert_eq!(g.end(), Some(Pos::new(0, 3)));
    }

    #[test]
    fn full_reset_clears_everything() {
        let mut g = Grid::parse(
            "S.#
             #.E",
        )
        .unwrap();
        g.set_status(1, Status::Open);
        g.full_reset();
        assert!(g.iter().all(|c| !c.is_wall() && !c.is_start() && !c.is_end()));
        assert!(g.iter().all(|c| c.status() == Status::Unvisited));
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), None);
    }

    #[test]
    fn map_walls_skips_endpoints() {
        let mut g = Grid::parse("S..E").unwrap();
        let walls = g.map_walls(|_| true);
        assert_eq!(walls, 2);
        assert_eq!(g.to_string(), "S##E");
    }

    #[test]
    fn parse_and_display() {
        let layout = "S.#\n.#.\n..E";
        let g: Grid = layout.parse().unwrap();
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 3);
        assert_eq!(g.wall_count(), 2);
        assert_eq!(g.to_string(), layout);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            Grid::parse("S.\n..."),
            Err(GridError::Parse { line: 2, .. })
        ));
        assert!(matches!(Grid::parse("SS"), Err(GridError::Parse { .. })));
        assert!(matches!(Grid::parse("S?E"), Err(GridError::Parse { .. })));
        assert!(matches!(Grid::parse("  \n"), Err(GridError::Parse { .. })));
    }
}
