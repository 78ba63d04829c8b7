use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must be at least 2x2")]
    InvalidSize,
    #[error("Too many obstacles")]
    TooManyObstacles,
    #[error("Minimum start-end distance does not fit on the board")]
    DistanceTooLarge,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Invalid direction, expected one of up, down, left or right")]
    InvalidDirection,
    #[error("Could not generate a board with a path from start to end")]
    GenerationUnsatisfiable,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
