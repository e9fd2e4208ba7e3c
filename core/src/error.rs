use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Block does not fit at the requested position")]
    InvalidPlacement,
    #[error("Block slot is empty or out of range")]
    InvalidBlockSlot,
    #[error("Game already ended, no new moves are accepted")]
    GameAlreadyOver,
    #[error("Game has not been started")]
    NotStarted,
    #[error("Grid shape does not match the board size")]
    InvalidGridShape,
    #[error("Unknown shape id")]
    InvalidShapeId,
}

pub type Result<T> = core::result::Result<T, GameError>;
