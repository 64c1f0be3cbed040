use rand::Rng;

use crate::{grid::Grid, Coords};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pos: Coords,
}

impl Food {
    /// Picks a uniformly random cell, each axis sampled on its own.
    pub fn spawn<R: Rng>(grid: &Grid, rng: &mut R) -> Self {
        let step = grid.block_size();
        let x = rng.gen_range(0..grid.columns()) * step;
        let y = rng.gen_range(0..grid.rows()) * step;
        Food { pos: (x, y) }
    }

    pub fn at(pos: Coords) -> Self {
        Food { pos }
    }

    pub fn position(&self) -> Coords {
        self.pos
    }
}
