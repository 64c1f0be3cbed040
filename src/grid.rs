use crate::{config::GameConfig, Coords, TermCoords, TermInt};

/// The bounded playfield. Positions are pixels, cells are `block_size` wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    block_size: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32, block_size: i32) -> Self {
        Grid { width, height, block_size }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Grid::new(config.width, config.height, config.block_size)
    }

    pub fn block_size(&self) -> i32 {
        self.block_size
    }

    pub fn columns(&self) -> i32 {
        self.width / self.block_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.block_size
    }

    /// Applies a delta and wraps each axis back into the playfield.
    pub fn wrap(&self, pos: Coords, delta: Coords) -> Coords {
        (
            (pos.0 + delta.0).rem_euclid(self.width),
            (pos.1 + delta.1).rem_euclid(self.height),
        )
    }

    pub fn contains(&self, pos: Coords) -> bool {
        (0..self.width).contains(&pos.0)
            && (0..self.height).contains(&pos.1)
            && pos.0 % self.block_size == 0
            && pos.1 % self.block_size == 0
    }

    /// Column and row of the cell holding `pos`.
    pub fn cell_of(&self, pos: Coords) -> TermCoords {
        (
            (pos.0 / self.block_size) as TermInt,
            (pos.1 / self.block_size) as TermInt,
        )
    }

    pub fn cells(&self) -> impl Iterator<Item = Coords> {
        let Grid { width, height, block_size } = *self;
        let step = block_size as usize;

        (0..height)
            .step_by(step)
            .flat_map(move |y| (0..width).step_by(step).map(move |x| (x, y)))
    }
}
