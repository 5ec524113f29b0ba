//! Random maze stimulus for pathlab grids.
//!
//! [`MazeGen::scatter_walls`] turns every cell except the start and end into
//! a wall with a fixed probability, independently. It only produces a grid
//! configuration; it never touches search state beyond clearing it.

use pathlab_core::Grid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Wall probability used by the demonstrator.
pub const DEFAULT_DENSITY: f64 = 0.3;

/// Maze generator wrapping a random number generator.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl MazeGen<StdRng> {
    /// A generator with a fixed seed, for reproducible layouts.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// A generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> MazeGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Replace the grid's walls: each cell other than start and end becomes
    /// a wall with probability `density`. Values outside `[0, 1]` behave as
    /// the nearest bound; NaN places no walls.
    ///
    /// Transient search state is cleared. Returns the number of walls placed.
    pub fn scatter_walls(&mut self, grid: &mut Grid, density: f64) -> usize {
        let rng = &mut self.rng;
        let walls = grid.map_walls(|_| {
            let r: f64 = rng.random();
            r < density
        });
        log::debug!(
            "scattered {walls} walls over {} cells at density {density}",
            grid.len()
        );
        walls
    }
}
