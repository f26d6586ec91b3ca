//! Opening books
//!
//! The Polyglot format is a sorted array of 16-byte big-endian records:
//!
//! | bytes | field  |
//! |-------|--------|
//! | 0-7   | key    |
//! | 8-9   | move   |
//! | 10-11 | weight |
//! | 12-15 | learn  |
//!
//! Move bits: to-file 0-2, to-rank 3-5, from-file 6-8, from-rank 9-11,
//! promotion 12-14. Castling is written as the king taking its own rook.

use std::path::Path;

use rustc_hash::FxHashMap;
use shakmaty::{Move, Role, Square};

use crate::error::BookError;
use crate::game::{ChessBoard, Rules};

/// Size of one Polyglot record
const ENTRY_SIZE: usize = 16;

/// Entries lighter than this are ignored
const MIN_WEIGHT: u16 = 1;

/// Source of prepared moves consulted before searching
pub trait OpeningBook<R: Rules> {
    /// Candidate moves for this position, possibly none
    fn lookup(&self, position: &R) -> Vec<R::Move>;
}

/// A book that never knows anything
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBook;

impl<R: Rules> OpeningBook<R> for NoBook {
    fn lookup(&self, _position: &R) -> Vec<R::Move> {
        Vec::new()
    }
}

/// Raw book move, before matching against the legal moves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BookMove {
    from: Square,
    to: Square,
    promotion: Option<Role>,
}

impl BookMove {
    fn decode(raw: u16) -> Self {
        let to = Square::new(u32::from(raw & 0x3f));
        let from = Square::new(u32::from((raw >> 6) & 0x3f));
        let promotion = match (raw >> 12) & 0x7 {
            1 => Some(Role::Knight),
            2 => Some(Role::Bishop),
            3 => Some(Role::Rook),
            4 => Some(Role::Queen),
            _ => None,
        };
        Self { from, to, promotion }
    }

    fn matches(&self, mv: &Move) -> bool {
        match *mv {
            Move::Castle { king, rook } => king == self.from && rook == self.to,
            _ => {
                mv.from() == Some(self.from)
                    && mv.to() == self.to
                    && mv.promotion() == self.promotion
            }
        }
    }
}

/// Polyglot `.bin` opening book, held in memory
#[derive(Clone, Debug, Default)]
pub struct PolyglotBook {
    entries: FxHashMap<u64, Vec<BookMove>>,
}

impl PolyglotBook {
    /// Load a book file
    pub fn open(path: &Path) -> Result<Self, BookError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BookError> {
        if bytes.len() % ENTRY_SIZE != 0 {
            return Err(BookError::Truncated { len: bytes.len() });
        }

        let mut entries: FxHashMap<u64, Vec<BookMove>> = FxHashMap::default();
        for record in bytes.chunks_exact(ENTRY_SIZE) {
            let key = u64::from_be_bytes([
                record[0], record[1], record[2], record[3],
                record[4], record[5], record[6], record[7],
            ]);
            let raw_move = u16::from_be_bytes([record[8], record[9]]);
            let weight = u16::from_be_bytes([record[10], record[11]]);

            if weight < MIN_WEIGHT {
                continue;
            }
            entries.entry(key).or_default().push(BookMove::decode(raw_move));
        }

        Ok(Self { entries })
    }

    /// Number of distinct positions in the book
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl OpeningBook<ChessBoard> for PolyglotBook {
    fn lookup(&self, position: &ChessBoard) -> Vec<Move> {
        let Some(book_moves) = self.entries.get(&position.key()) else {
            return Vec::new();
        };

        let legal = position.legal_moves();
        let mut found: Vec<Move> = Vec::new();
        for book_move in book_moves {
            if let Some(mv) = legal.iter().find(|mv| book_move.matches(mv)) {
                if !found.contains(mv) {
                    found.push(mv.clone());
                }
            }
        }
        found
    }
}
