//! abchess Core - Chess engine and AI
//!
//! This crate provides the move-selection logic for an automated chess player:
//! - Piece and color types
//! - Rules adapter over a shared, mutable position (apply/undo)
//! - Static evaluation with piece-square tables
//! - Depth-limited minimax with alpha-beta pruning
//! - Root move selection with an opening book in front of the search
//! - Configuration and the game session that ties it together

pub mod error;
pub mod pieces;
pub mod game;
pub mod eval;
pub mod search;
pub mod ai;
pub mod book;
pub mod config;
pub mod session;

// Re-exports for convenient access
pub use error::{AiError, BookError, ConfigError, FenError, MoveError, StateError};
pub use pieces::{Color, Piece, PieceType};
pub use game::{ChessBoard, GameResult, Rules};
pub use eval::{evaluate, Evaluate, PieceSquareEval, Score, MATE_VALUE, SCORE_BOUND};
pub use search::{search, Search};
pub use ai::{choose_and_apply_move, AlphaBetaAI, Choice};
pub use book::{NoBook, OpeningBook, PolyglotBook};
pub use config::AiConfig;
pub use session::Session;
