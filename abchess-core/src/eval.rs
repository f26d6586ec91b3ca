//! Position evaluation
//!
//! Scores are always from White's point of view: material plus a piece-square
//! bonus for every piece, White minus Black. Checkmate short-circuits to
//! `±MATE_VALUE`.
//!
//! Stalemate and the other draws are not special-cased here. A drawn position
//! reached at a leaf is scored by material like any other.

use crate::game::{GameResult, Rules};
use crate::pieces::{Color, Piece, PieceType};

/// Signed evaluation, positive favours White
pub type Score = i32;

/// Checkmate score (sign = winner)
pub const MATE_VALUE: Score = 100_000;

/// Initial alpha/beta and best-score seed, beyond any reachable score
pub const SCORE_BOUND: Score = 1_000_000;

/// Leaf evaluator used by the search
pub trait Evaluate<R: Rules> {
    fn evaluate(&self, position: &R) -> Score;
}

/// Material and piece-square tables
#[derive(Clone, Copy, Debug, Default)]
pub struct PieceSquareEval;

impl<R: Rules> Evaluate<R> for PieceSquareEval {
    fn evaluate(&self, position: &R) -> Score {
        evaluate(position)
    }
}

/// Evaluate a position for White
pub fn evaluate<R: Rules>(position: &R) -> Score {
    match position.result() {
        GameResult::WhiteWins => MATE_VALUE,
        GameResult::BlackWins => -MATE_VALUE,
        GameResult::Ongoing | GameResult::Draw => (0..64)
            .filter_map(|sq| position.piece_at(sq).map(|piece| piece_score(piece, sq)))
            .sum(),
    }
}

/// Signed contribution of one piece on one square
pub fn piece_score(piece: Piece, square: usize) -> Score {
    piece.color.sign() * (piece.kind.base_value() + square_bonus(piece.kind, piece.color)[square])
}

/// Piece-square table for a piece type in a color's orientation
pub fn square_bonus(kind: PieceType, color: Color) -> &'static [Score; 64] {
    match (kind, color) {
        (PieceType::Pawn, Color::White) => &PAWN_WHITE,
        (PieceType::Pawn, Color::Black) => &PAWN_BLACK,
        (PieceType::Knight, Color::White) => &KNIGHT_WHITE,
        (PieceType::Knight, Color::Black) => &KNIGHT_BLACK,
        (PieceType::Bishop, Color::White) => &BISHOP_WHITE,
        (PieceType::Bishop, Color::Black) => &BISHOP_BLACK,
        (PieceType::Rook, Color::White) => &ROOK_WHITE,
        (PieceType::Rook, Color::Black) => &ROOK_BLACK,
        (PieceType::Queen, Color::White) => &QUEEN_WHITE,
        (PieceType::Queen, Color::Black) => &QUEEN_BLACK,
        (PieceType::King, Color::White) => &KING_WHITE,
        (PieceType::King, Color::Black) => &KING_BLACK,
    }
}

// ============================================================================
// PIECE-SQUARE TABLES
// ============================================================================
//
// Index 0 = a1, 63 = h8. Rows below run rank 1 (top) to rank 8 (bottom).

#[rustfmt::skip]
const PAWN_WHITE: [Score; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     1,  1,  1, -2, -2,  1,  1,  1,
     1, -1, -1,  0,  0, -1, -1,  1,
     0,  0,  0,  2,  2,  0,  0,  0,
     1,  1,  1,  3,  3,  1,  1,  1,
     1,  1,  2,  3,  3,  2,  1,  1,
     5,  5,  5,  5,  5,  5,  5,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_WHITE: [Score; 64] = [
    -5, -4, -3, -3, -3, -3, -4, -5,
    -4, -2,  0,  1,  1,  0, -2, -4,
    -3,  1,  1,  2,  2,  1,  1, -3,
    -3,  0,  2,  2,  2,  2,  0, -3,
    -3,  1,  2,  2,  2,  2,  1, -3,
    -3,  0,  1,  2,  2,  1,  0, -3,
    -4, -2,  0,  0,  0,  0, -2, -4,
    -5, -4, -3, -3, -3, -3, -4, -5,
];

#[rustfmt::skip]
const BISHOP_WHITE: [Score; 64] = [
    -2, -1, -1, -1, -1, -1, -1, -2,
    -1,  1,  0,  0,  0,  0,  1, -1,
    -1,  1,  1,  1,  1,  1,  1, -1,
    -1,  0,  1,  1,  1,  1,  0, -1,
    -1,  1,  1,  1,  1,  1,  1, -1,
    -1,  0,  1,  1,  1,  1,  0, -1,
    -1,  0,  0,  0,  0,  0,  0, -1,
    -2, -1, -1, -1, -1, -1, -1, -2,
];

#[rustfmt::skip]
const ROOK_WHITE: [Score; 64] = [
     0,  0,  0,  1,  1,  0,  0,  0,
    -1,  0,  0,  0,  0,  0,  0, -1,
    -1,  0,  0,  0,  0,  0,  0, -1,
    -1,  0,  0,  0,  0,  0,  0, -1,
    -1,  0,  0,  0,  0,  0,  0, -1,
    -1,  0,  0,  0,  0,  0,  0, -1,
     1,  1,  1,  1,  1,  1,  1,  1,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_WHITE: [Score; 64] = [
    -2, -1, -1, -1, -1, -1, -1, -2,
    -1,  0,  1,  0,  0,  0,  0, -1,
    -1,  1,  1,  1,  1,  1,  0, -1,
     0,  0,  1,  1,  1,  1,  0, -1,
    -1,  0,  1,  1,  1,  1,  0, -1,
    -1,  0,  1,  1,  1,  1,  0, -1,
    -1,  0,  0,  0,  0,  0,  0, -1,
    -2, -1, -1, -1, -1, -1, -1, -2,
];

#[rustfmt::skip]
const KING_WHITE: [Score; 64] = [
     2,  3,  1,  0,  0,  1,  3,  2,
     2,  2,  0,  0,  0,  0,  2,  2,
    -1, -2, -2, -2, -2, -2, -2, -1,
    -2, -3, -3, -4, -4, -3, -3, -2,
    -3, -4, -4, -5, -5, -4, -4, -3,
    -3, -4, -4, -5, -5, -4, -4, -3,
    -3, -4, -4, -5, -5, -4, -4, -3,
    -3, -4, -4, -5, -5, -4, -4, -3,
];

const PAWN_BLACK: [Score; 64] = mirror(&PAWN_WHITE);
const KNIGHT_BLACK: [Score; 64] = mirror(&KNIGHT_WHITE);
const BISHOP_BLACK: [Score; 64] = mirror(&BISHOP_WHITE);
const ROOK_BLACK: [Score; 64] = mirror(&ROOK_WHITE);
const QUEEN_BLACK: [Score; 64] = mirror(&QUEEN_WHITE);
const KING_BLACK: [Score; 64] = mirror(&KING_WHITE);

/// Flip a table vertically (a1 <-> a8)
const fn mirror(table: &[Score; 64]) -> [Score; 64] {
    let mut out = [0; 64];
    let mut sq = 0;
    while sq < 64 {
        out[sq] = table[sq ^ 56];
        sq += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ChessBoard;

    fn board_after(moves: &[&str]) -> ChessBoard {
        let mut board = ChessBoard::new();
        for uci in moves {
            let mv = board.parse_uci(uci).unwrap();
            board.apply(&mv);
        }
        board
    }

    #[test]
    fn test_start_position_is_level() {
        assert_eq!(evaluate(&ChessBoard::new()), 0);
    }

    #[test]
    fn test_white_checkmate() {
        let board = board_after(&["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"]);
        assert_eq!(evaluate(&board), MATE_VALUE);
    }

    #[test]
    fn test_black_checkmate() {
        let board = board_after(&["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert_eq!(evaluate(&board), -MATE_VALUE);
    }

    #[test]
    fn test_stalemate_scored_by_material() {
        let board = ChessBoard::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let expected = piece_score(Piece::new(PieceType::Queen, Color::White), 53)
            + piece_score(Piece::new(PieceType::King, Color::White), 46)
            + piece_score(Piece::new(PieceType::King, Color::Black), 63);
        assert_eq!(evaluate(&board), expected);
        assert!(evaluate(&board) > 0);
    }

    #[test]
    fn test_mirrored_position_negates() {
        let white = ChessBoard::from_fen("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1").unwrap();
        let black = ChessBoard::from_fen("4k3/8/8/3n4/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(evaluate(&white), 32);
        assert_eq!(evaluate(&black), -32);
    }

    #[test]
    fn test_extra_pawn_favours_owner() {
        let board = ChessBoard::from_fen(
            "rnbqkbnr/ppp1pppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        )
        .unwrap();
        assert!(evaluate(&board) > 0);
    }

    #[test]
    fn test_black_tables_mirror_white() {
        for kind in PieceType::ALL {
            let white = square_bonus(kind, Color::White);
            let black = square_bonus(kind, Color::Black);
            for sq in 0..64 {
                assert_eq!(white[sq], black[sq ^ 56], "{:?} on {}", kind, sq);
            }
        }
    }
}
