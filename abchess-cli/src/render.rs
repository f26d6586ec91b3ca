//! Board rendering for the terminal

use abchess_core::{ChessBoard, GameResult, Rules};

const FILE_LEGEND: &str = "a b c d e f g h";

/// Rank 8 at the top, file legend underneath
pub fn board(board: &ChessBoard, unicode: bool) -> String {
    let mut out = String::new();
    for rank in (0..8).rev() {
        for file in 0..8 {
            let cell = match board.piece_at(rank * 8 + file) {
                Some(piece) if unicode => piece.glyph(),
                Some(piece) => piece.symbol(),
                None if unicode => ' ',
                None => '.',
            };
            out.push(cell);
            out.push(' ');
        }
        out.pop();
        out.push('\n');
    }
    out.push_str(FILE_LEGEND);
    out
}

pub fn result(result: GameResult) -> &'static str {
    match result {
        GameResult::WhiteWins => "Game over. White won.",
        GameResult::BlackWins => "Game over. Black won.",
        GameResult::Draw => "Game finished by Draw.",
        GameResult::Ongoing => "Game in progress.",
    }
}
