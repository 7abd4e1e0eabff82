//! Error types for the simulation.

use crate::Position;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Grid dimensions must be positive, got {depth}x{width}")]
    InvalidDimensions { depth: usize, width: usize },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Position {0} is outside the grid")]
    OutOfBounds(Position),

    #[error("Position {0} is already occupied")]
    Occupied(Position),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
