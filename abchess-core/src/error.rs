//! Error types

use std::io;

/// Misuse of the apply/undo stack
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StateError {
    #[error("undo called without a matching apply")]
    NothingToUndo,
}

/// Failure to pick a move
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("no legal moves in this position")]
    NoLegalMoves,

    #[error("it is not the agent's turn")]
    OutOfTurn,

    #[error(transparent)]
    State(#[from] StateError),
}

/// Opening book could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    #[error("failed to read opening book: {0}")]
    Io(#[from] io::Error),

    #[error("opening book is truncated: {len} bytes is not a whole number of entries")]
    Truncated { len: usize },
}

/// Invalid agent configuration
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("search depth must be at least 1")]
    ZeroDepth,
}

/// Rejected user move
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("illegal move: {0}")]
    Illegal(String),

    #[error("it is not your turn")]
    OutOfTurn,
}

/// Invalid position setup
#[derive(Debug, thiserror::Error)]
pub enum FenError {
    #[error("invalid FEN: {0}")]
    Parse(#[from] shakmaty::fen::ParseFenError),

    #[error("illegal position: {0}")]
    Position(String),
}
