//! A wraparound snake game for the terminal.
//!
//! The game logic (`grid`, `food`, `snake`, `session`) has no I/O and can be
//! driven directly from tests. `game` and `term` put it on a crossterm screen.

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod logger;
pub mod pacer;
pub mod session;
pub mod snake;
pub mod term;

/// Pixel-space position on the playfield, always a multiple of the block size.
pub type Coords = (i32, i32);

/// Terminal cell coordinate.
pub type TermInt = u16;
pub type TermCoords = (TermInt, TermInt);

pub use config::GameConfig;
pub use error::SnakeError;
pub use session::{GameSession, SessionState, TickOutcome};
