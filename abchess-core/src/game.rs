//! Game state and the rules-engine seam

use std::fmt;

use shakmaty::fen::Fen;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, EnPassantMode, File, Move, Outcome, Position, Square};

use crate::error::{FenError, StateError};
use crate::pieces::{Color, Piece};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Half-moves without capture or pawn move before the game is drawn
const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// Occurrences of one position before the game is drawn
const FIVEFOLD: usize = 5;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    WhiteWins,
    BlackWins,
    Draw,
}

/// Everything search and evaluation need from a rules engine.
///
/// Moves are applied to one shared position and reverted in LIFO order. Every
/// `apply` must be paired with exactly one `undo` before the caller returns.
pub trait Rules {
    type Move: Clone + fmt::Debug;

    /// Legal moves in a stable order
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Play a legal move in place
    fn apply(&mut self, mv: &Self::Move);

    /// Revert the most recent `apply`
    fn undo(&mut self) -> Result<(), StateError>;

    fn result(&self) -> GameResult;

    fn is_terminal(&self) -> bool {
        self.result() != GameResult::Ongoing
    }

    /// Piece on a square, a1 = 0 through h8 = 63
    fn piece_at(&self, square: usize) -> Option<Piece>;

    fn side_to_move(&self) -> Color;

    /// Human-readable move, for logs
    fn describe(&self, mv: &Self::Move) -> String {
        format!("{:?}", mv)
    }
}

// ============================================================================
// CHESS BOARD
// ============================================================================

/// Standard chess position with an undo stack.
#[derive(Clone, Debug)]
pub struct ChessBoard {
    position: Chess,
    history: Vec<Chess>,
    /// Zobrist keys of every position reached, current one last
    keys: Vec<u64>,
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::from_position(Chess::default())
    }
}

impl ChessBoard {
    /// Standard starting position
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fen: Fen = fen.trim().parse()?;
        let position: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| FenError::Position(e.to_string()))?;
        Ok(Self::from_position(position))
    }

    fn from_position(position: Chess) -> Self {
        let key = zobrist_key(&position);
        Self {
            position,
            history: Vec::new(),
            keys: vec![key],
        }
    }

    pub fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    /// Polyglot-compatible Zobrist key of the current position
    pub fn key(&self) -> u64 {
        self.keys.last().copied().unwrap_or_else(|| zobrist_key(&self.position))
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// Number of moves applied and not yet undone
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// UCI long algebraic notation, castling as king move (e1g1)
    pub fn uci(mv: &Move) -> String {
        match *mv {
            Move::Castle { king, rook } => {
                let file = if rook.file() > king.file() { File::G } else { File::C };
                format!("{}{}", king, Square::from_coords(file, king.rank()))
            }
            _ => {
                let mut s = match mv.from() {
                    Some(from) => format!("{}{}", from, mv.to()),
                    None => format!("@{}", mv.to()),
                };
                if let Some(role) = mv.promotion() {
                    s.push(role.char());
                }
                s
            }
        }
    }

    /// Find the legal move written in UCI notation
    pub fn parse_uci(&self, input: &str) -> Option<Move> {
        let input = input.trim().to_ascii_lowercase();
        self.position
            .legal_moves()
            .into_iter()
            .find(|mv| Self::uci(mv) == input)
    }

    fn repetitions(&self) -> usize {
        let current = self.key();
        self.keys.iter().filter(|&&k| k == current).count()
    }
}

impl Rules for ChessBoard {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves().to_vec()
    }

    fn apply(&mut self, mv: &Move) {
        self.history.push(self.position.clone());
        self.position.play_unchecked(mv);
        self.keys.push(zobrist_key(&self.position));
    }

    fn undo(&mut self) -> Result<(), StateError> {
        let previous = self.history.pop().ok_or(StateError::NothingToUndo)?;
        self.position = previous;
        self.keys.pop();
        Ok(())
    }

    fn result(&self) -> GameResult {
        match self.position.outcome() {
            Some(Outcome::Decisive { winner }) => match Color::from(winner) {
                Color::White => GameResult::WhiteWins,
                Color::Black => GameResult::BlackWins,
            },
            Some(Outcome::Draw) => GameResult::Draw,
            None if self.position.halfmoves() >= SEVENTY_FIVE_MOVE_PLIES => GameResult::Draw,
            None if self.repetitions() >= FIVEFOLD => GameResult::Draw,
            None => GameResult::Ongoing,
        }
    }

    fn piece_at(&self, square: usize) -> Option<Piece> {
        self.position
            .board()
            .piece_at(Square::new(square as u32))
            .map(Piece::from)
    }

    fn side_to_move(&self) -> Color {
        self.position.turn().into()
    }

    fn describe(&self, mv: &Move) -> String {
        Self::uci(mv)
    }
}

fn zobrist_key(position: &Chess) -> u64 {
    position.zobrist_hash::<Zobrist64>(EnPassantMode::Legal).0
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::PieceType;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn play(board: &mut ChessBoard, moves: &[&str]) {
        for uci in moves {
            let mv = board.parse_uci(uci).unwrap();
            board.apply(&mv);
        }
    }

    #[test]
    fn test_start_position() {
        let board = ChessBoard::new();
        assert_eq!(board.fen(), START_FEN);
        assert_eq!(board.legal_moves().len(), 20);
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.result(), GameResult::Ongoing);
        assert_eq!(
            board.piece_at(4),
            Some(Piece::new(PieceType::King, Color::White))
        );
        assert_eq!(
            board.piece_at(59),
            Some(Piece::new(PieceType::Queen, Color::Black))
        );
        assert_eq!(board.piece_at(27), None);
    }

    #[test]
    fn test_undo_without_apply() {
        let mut board = ChessBoard::new();
        assert_eq!(board.undo(), Err(StateError::NothingToUndo));
    }

    #[test]
    fn test_apply_undo_round_trip() {
        let fens = [
            START_FEN,
            // castling both ways, both sides
            "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1",
            // en passant available
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            // promotions with and without capture
            "1n5k/P7/8/8/8/8/8/7K w - - 0 1",
        ];

        for fen in fens {
            let mut board = ChessBoard::from_fen(fen).unwrap();
            let before = board.fen();
            let key = board.key();
            for mv in board.legal_moves() {
                board.apply(&mv);
                board.undo().unwrap();
                assert_eq!(board.fen(), before, "after {}", ChessBoard::uci(&mv));
                assert_eq!(board.key(), key);
            }
            assert_eq!(board.ply(), 0);
        }
    }

    #[test]
    fn test_uci_notation() {
        let board = ChessBoard::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert!(board.parse_uci("e1g1").is_some());
        assert!(board.parse_uci("e1c1").is_some());
        assert!(board.parse_uci("e1e3").is_none());

        let board = ChessBoard::from_fen("8/4P3/8/8/8/8/k7/7K w - - 0 1").unwrap();
        let mv = board.parse_uci("E7E8Q").unwrap();
        assert_eq!(ChessBoard::uci(&mv), "e7e8q");
        assert!(board.parse_uci("e7e8").is_none());
    }

    #[test]
    fn test_checkmate_result() {
        let mut board = ChessBoard::new();
        play(&mut board, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert_eq!(board.result(), GameResult::BlackWins);
        assert!(board.is_terminal());
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_draw_results() {
        let stalemate = ChessBoard::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(stalemate.result(), GameResult::Draw);

        let bare_kings = ChessBoard::from_fen("8/8/8/8/8/8/k7/7K w - - 0 1").unwrap();
        assert_eq!(bare_kings.result(), GameResult::Draw);

        let idle = ChessBoard::from_fen("8/8/8/8/8/8/k6p/7K w - - 150 90").unwrap();
        assert_eq!(idle.result(), GameResult::Draw);
    }

    #[test]
    fn test_fivefold_repetition() {
        let mut board = ChessBoard::new();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        for _ in 0..3 {
            play(&mut board, &shuffle);
        }
        assert_eq!(board.result(), GameResult::Ongoing);

        play(&mut board, &shuffle);
        assert_eq!(board.result(), GameResult::Draw);

        board.undo().unwrap();
        assert_eq!(board.result(), GameResult::Ongoing);
    }
}
