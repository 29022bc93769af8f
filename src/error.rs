/// Error taxonomy for the game core and the terminal front end.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// A level index outside the catalog was requested.
    #[error("no such level: index {index} (catalog has {count} levels)")]
    NoSuchLevel { index: usize, count: usize },

    /// "Next level" was requested while already on the last level.
    #[error("no level after index {current}")]
    NoMoreLevels { current: usize },

    #[error("terminal is {width}x{height}, need at least {min_width}x{min_height}")]
    TerminalTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
