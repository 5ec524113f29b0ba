//! Path reconstruction from a predecessor table.

use crate::error::SearchError;
use crate::grid::Grid;
use crate::pos::Pos;

/// Walk `came_from` backwards from `end` to the cell without a predecessor
/// and return the path in start-to-end order.
///
/// `came_from` is indexed by flat cell index (row-major) and must hold one
/// entry per grid cell. Interior path cells (all but the first and last) get
/// their path flag set.
///
/// A chain longer than the number of cells, or one that leaves the grid,
/// yields [`SearchError::InconsistentPredecessorChain`].
pub fn reconstruct(
    grid: &mut Grid,
    came_from: &[Option<usize>],
    end: Pos,
) -> Result<Vec<Pos>, SearchError> {
    let Some(mut ci) = grid.index(end) else {
        return Err(inconsistent(grid, end));
    };
    if came_from.len() != grid.len() {
        return Err(inconsistent(grid, end));
    }

    let mut chain = vec![ci];
    while let Some(prev) = came_from[ci] {
        if prev >= grid.len() || chain.len() >= grid.len() {
            log::error!("predecessor chain from {end} does not terminate");
            return Err(inconsistent(grid, end));
        }
        chain.push(prev);
        ci = prev;
    }
    chain.reverse();

    if chain.len() > 2 {
        for &i in &chain[1..chain.len() - 1] {
            grid.mark_path(i);
        }
    }
    Ok(chain.into_iter().map(|i| grid.pos_at(i)).collect())
}

fn inconsistent(grid: &Grid, end: Pos) -> SearchError {
    SearchError::InconsistentPredecessorChain {
        start: grid.start(),
        end,
        rows: grid.rows(),
        cols: grid.cols(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_back_and_marks_interior() {
        let mut g = Grid::parse("S..E").unwrap();
        let came_from = vec![None, Some(0), Some(1), Some(2)];
        let path = reconstruct(&mut g, &came_from, Pos::new(0, 3)).unwrap();
        assert_eq!(
            path,
            vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(0, 2), Pos::new(0, 3)]
        );
        assert_eq!(g.to_string(), "S**E");
        assert!(!g.cell(Pos::new(0, 0)).unwrap().is_path());
        assert!(!g.cell(Pos::new(0, 3)).unwrap().is_path());
    }

    #[test]
    fn adjacent_endpoints_have_no_interior() {
        let mut g = Grid::parse("SE").unwrap();
        let path = reconstruct(&mut g, &[None, Some(0)], Pos::new(0, 1)).unwrap();
        assert_eq!(path.len(), 2);
        assert!(g.iter().all(|c| !c.is_path()));
    }

    #[test]
    fn cycle_is_reported() {
        let mut g = Grid::parse("S..E").unwrap();
        // 1 -> 2 -> 1 loops forever.
        let came_from = vec![None, Some(2), Some(1), Some(2)];
        let err = reconstruct(&mut g, &came_from, Pos::new(0, 3)).unwrap_err();
        assert_eq!(
            err,
            SearchError::InconsistentPredecessorChain {
                start: Some(Pos::new(0, 0)),
                end: Pos::new(0, 3),
                rows: 1,
                cols: 4,
            }
        );
    }

    #[test]
    fn dangling_index_is_reported() {
        let mut g = Grid::parse("S.E").unwrap();
        let came_from = vec![None, Some(0), Some(99)];
        assert!(reconstruct(&mut g, &came_from, Pos::new(0, 2)).is_err());
        assert!(reconstruct(&mut g, &[None], Pos::new(0, 2)).is_err());
    }
}
