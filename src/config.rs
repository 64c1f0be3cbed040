use crate::{error::SnakeError, TermInt};

/// Cells per axis are addressed as terminal coordinates.
pub const MAX_CELLS_PER_AXIS: i32 = TermInt::MAX as i32;

/// Playfield and speed settings for a game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Playfield width in pixels
    pub width: i32,
    /// Playfield height in pixels
    pub height: i32,
    /// Side of one square cell, in pixels. Every move is one block.
    pub block_size: i32,
    /// Ticks per second with an empty stomach
    pub base_rate: f64,
    /// Quadratic speed-up per food eaten
    pub acceleration: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            block_size: 10,
            base_rate: 10.0,
            acceleration: 0.0004,
        }
    }
}

impl GameConfig {
    pub fn new(width: i32, height: i32, block_size: i32) -> Self {
        Self {
            width,
            height,
            block_size,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), SnakeError> {
        if self.block_size <= 0 {
            return Err(SnakeError::InvalidConfig(format!(
                "block size must be positive, got {}",
                self.block_size
            )));
        }

        for (name, value) in [("width", self.width), ("height", self.height)].iter() {
            if *value < self.block_size || value % self.block_size != 0 {
                return Err(SnakeError::InvalidConfig(format!(
                    "{} must be a positive multiple of the block size {}, got {}",
                    name, self.block_size, value
                )));
            }

            let cells = value / self.block_size;
            if cells > MAX_CELLS_PER_AXIS {
                return Err(SnakeError::InvalidConfig(format!(
                    "{} spans {} cells, at most {} are supported",
                    name, cells, MAX_CELLS_PER_AXIS
                )));
            }
        }

        if !self.base_rate.is_finite() || self.base_rate <= 0.0 {
            return Err(SnakeError::InvalidConfig(format!(
                "base rate must be a positive number, got {}",
                self.base_rate
            )));
        }

        if !self.acceleration.is_finite() || self.acceleration < 0.0 {
            return Err(SnakeError::InvalidConfig(format!(
                "acceleration must not be negative, got {}",
                self.acceleration
            )));
        }

        Ok(())
    }

    /// Ticks per second once the snake has eaten `length` items.
    pub fn tick_rate(&self, length: u32) -> f64 {
        let length = f64::from(length);
        self.base_rate + self.acceleration * length * length
    }
}
