//! A game between the agent and a human
//!
//! The session owns everything one game needs: the position, the turn
//! counter, the agent and its opening book, and the random source used for
//! book moves.

use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shakmaty::Move;

use crate::ai::{AlphaBetaAI, Choice};
use crate::book::{NoBook, OpeningBook, PolyglotBook};
use crate::config::AiConfig;
use crate::error::{AiError, ConfigError, MoveError};
use crate::game::{ChessBoard, GameResult, Rules};
use crate::pieces::Color;

pub struct Session {
    board: ChessBoard,
    turn: u32,
    config: AiConfig,
    agent: AlphaBetaAI,
    book: Box<dyn OpeningBook<ChessBoard>>,
    rng: ChaCha8Rng,
}

impl Session {
    /// New game from the starting position, loading the configured book
    pub fn new(config: AiConfig) -> Result<Self, ConfigError> {
        let book = load_book(config.book.as_deref());
        Self::with_book(config, ChessBoard::new(), book)
    }

    /// New game from an arbitrary position and book
    pub fn with_book(
        config: AiConfig,
        board: ChessBoard,
        book: Box<dyn OpeningBook<ChessBoard>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self {
            board,
            turn: 1,
            agent: AlphaBetaAI::new(config.color, config.depth),
            config,
            book,
            rng,
        })
    }

    pub fn board(&self) -> &ChessBoard {
        &self.board
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Full-move counter, starting at 1
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn agent_to_move(&self) -> bool {
        self.board.side_to_move() == self.config.color
    }

    /// Nodes searched for the agent's last move
    pub fn last_nodes(&self) -> u64 {
        self.agent.nodes()
    }

    /// Let the agent pick and play its move
    pub fn agent_move(&mut self) -> Result<Choice<Move>, AiError> {
        if !self.agent_to_move() {
            return Err(AiError::OutOfTurn);
        }
        let choice = self
            .agent
            .choose_and_apply_move(&mut self.board, self.book.as_ref(), &mut self.rng)?;
        self.after_move();
        Ok(choice)
    }

    /// Play the human's move, given in UCI notation
    pub fn user_move(&mut self, input: &str) -> Result<Move, MoveError> {
        if self.agent_to_move() {
            return Err(MoveError::OutOfTurn);
        }
        let mv = self
            .board
            .parse_uci(input)
            .ok_or_else(|| MoveError::Illegal(input.trim().to_string()))?;
        self.board.apply(&mv);
        self.after_move();
        Ok(mv)
    }

    pub fn result(&self) -> GameResult {
        self.board.result()
    }

    pub fn is_over(&self) -> bool {
        self.board.is_terminal()
    }

    fn after_move(&mut self) {
        // a new full move starts once Black has played
        if self.board.side_to_move() == Color::White {
            self.turn += 1;
        }
    }
}

fn load_book(path: Option<&Path>) -> Box<dyn OpeningBook<ChessBoard>> {
    let Some(path) = path else {
        return Box::new(NoBook);
    };

    match PolyglotBook::open(path) {
        Ok(book) => {
            tracing::info!("Loaded opening book {} ({} positions)", path.display(), book.len());
            Box::new(book)
        }
        Err(e) => {
            tracing::warn!("Failed to load opening book {}: {}", path.display(), e);
            Box::new(NoBook)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn session(color: Color, depth: u32) -> Session {
        let config = AiConfig::new(color, depth).with_book(None).with_seed(1);
        Session::new(config).unwrap()
    }

    #[test]
    fn test_agent_then_user() {
        let mut game = session(Color::White, 1);
        assert!(game.agent_to_move());

        let choice = game.agent_move().unwrap();
        assert!(matches!(choice, Choice::Search { .. }));
        assert_eq!(game.turn(), 1);

        assert_eq!(
            game.user_move("e2e4"),
            Err(MoveError::Illegal("e2e4".to_string()))
        );
        game.user_move("e7e5").unwrap();
        assert_eq!(game.turn(), 2);
        assert!(game.agent_to_move());
    }

    #[test]
    fn test_out_of_turn() {
        let mut game = session(Color::Black, 1);
        assert!(matches!(game.agent_move(), Err(AiError::OutOfTurn)));

        game.user_move("d2d4").unwrap();
        assert_eq!(game.user_move("d7d5"), Err(MoveError::OutOfTurn));
        game.agent_move().unwrap();
        assert_eq!(game.turn(), 2);
    }

    #[test]
    fn test_missing_book_falls_back() {
        let config = AiConfig::new(Color::White, 1)
            .with_book(Some(PathBuf::from("does-not-exist.bin")))
            .with_seed(3);
        let mut game = Session::new(config).unwrap();
        let choice = game.agent_move().unwrap();
        assert!(choice.score().is_some());
    }

    #[test]
    fn test_book_moves_first() {
        // e2e4 for the starting position
        let mut bytes = 0x463b_9618_1691_fc9c_u64.to_be_bytes().to_vec();
        bytes.extend_from_slice(&0x031c_u16.to_be_bytes());
        bytes.extend_from_slice(&1u16.to_be_bytes());
        bytes.extend_from_slice(&0u32.to_be_bytes());
        let book = PolyglotBook::from_bytes(&bytes).unwrap();

        let config = AiConfig::new(Color::White, 2).with_seed(5);
        let mut game = Session::with_book(config, ChessBoard::new(), Box::new(book)).unwrap();
        let choice = game.agent_move().unwrap();
        assert_eq!(ChessBoard::uci(choice.mv()), "e2e4");
        assert!(matches!(choice, Choice::Book(_)));
        assert_eq!(game.last_nodes(), 0);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let config = AiConfig::new(Color::White, 0).with_book(None);
        assert!(matches!(Session::new(config), Err(ConfigError::ZeroDepth)));
    }
}
