use thiserror::Error;

use crate::TermInt;

#[derive(Debug, Error, PartialEq)]
pub enum SnakeError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(
        "terminal is {width}x{height} but the playfield needs {needed_width}x{needed_height}; \
         enlarge the window or pass a smaller --width/--height"
    )]
    TerminalTooSmall {
        width: TermInt,
        height: TermInt,
        needed_width: TermInt,
        needed_height: TermInt,
    },
}
