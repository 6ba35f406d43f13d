use crate::types::Move;
use thiserror::Error;

/// Errors that can occur while playing or searching an m,n,k game
#[derive(Error, Debug)]
pub enum MnkError {
    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    #[error("Move {mv} is outside a {dimension}x{dimension} board")]
    OutOfBounds { mv: Move, dimension: usize },

    #[error("Cell {0} is already occupied")]
    Occupied(Move),

    #[error("Game is already over")]
    GameOver,

    #[error("Cannot undo {requested}: last move was {last}")]
    UndoMismatch { requested: Move, last: String },

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported configuration: {0}")]
    Unsupported(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for m,n,k operations
pub type Result<T> = std::result::Result<T, MnkError>;
