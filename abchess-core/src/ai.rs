//! Root move selection
//!
//! One decision per call: ask the opening book first, and only search when it
//! has nothing to offer.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::book::OpeningBook;
use crate::error::AiError;
use crate::eval::{Evaluate, PieceSquareEval, Score, SCORE_BOUND};
use crate::game::Rules;
use crate::pieces::Color;
use crate::search::Search;

/// What the agent played and why
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Choice<M> {
    /// Drawn at random from the opening book
    Book(M),
    /// Best root move found by search
    Search { mv: M, score: Score },
}

impl<M> Choice<M> {
    pub fn mv(&self) -> &M {
        match self {
            Choice::Book(mv) => mv,
            Choice::Search { mv, .. } => mv,
        }
    }

    pub fn score(&self) -> Option<Score> {
        match self {
            Choice::Book(_) => None,
            Choice::Search { score, .. } => Some(*score),
        }
    }
}

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Alpha-Beta AI player
pub struct AlphaBetaAI<E = PieceSquareEval> {
    pub color: Color,
    pub depth: u32,
    evaluator: E,
    nodes: u64,
}

impl AlphaBetaAI {
    pub fn new(color: Color, depth: u32) -> Self {
        Self::with_evaluator(color, depth, PieceSquareEval)
    }
}

impl<E> AlphaBetaAI<E> {
    pub fn with_evaluator(color: Color, depth: u32, evaluator: E) -> Self {
        Self {
            color,
            depth,
            evaluator,
            nodes: 0,
        }
    }

    /// Nodes searched by the last decision (0 after a book move)
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Pick a move, play it on `position` and report it
    pub fn choose_and_apply_move<R, B, G>(
        &mut self,
        position: &mut R,
        book: &B,
        rng: &mut G,
    ) -> Result<Choice<R::Move>, AiError>
    where
        R: Rules,
        B: OpeningBook<R> + ?Sized,
        G: Rng + ?Sized,
        E: Evaluate<R>,
    {
        let candidates = book.lookup(position);
        if let Some(mv) = candidates.choose(rng).cloned() {
            self.nodes = 0;
            tracing::info!(
                "Opening book move: {} ({} candidates)",
                position.describe(&mv),
                candidates.len()
            );
            position.apply(&mv);
            return Ok(Choice::Book(mv));
        }

        let (mv, score) = self.best_move(position)?;
        tracing::info!(
            "Computer move: {} || Value of move: {} ({} nodes)",
            position.describe(&mv),
            score,
            self.nodes
        );
        position.apply(&mv);
        Ok(Choice::Search { mv, score })
    }

    /// Search every root move and return the best one without playing it.
    ///
    /// Ties keep the first move found. A depth of 0 is treated as 1.
    pub fn best_move<R>(&mut self, position: &mut R) -> Result<(R::Move, Score), AiError>
    where
        R: Rules,
        E: Evaluate<R>,
    {
        let maximizing = self.color.is_white();
        let child_depth = self.depth.saturating_sub(1);
        let mut best_score = if maximizing { -SCORE_BOUND } else { SCORE_BOUND };
        let mut chosen = None;
        let mut search = Search::new(&self.evaluator);

        for mv in position.legal_moves() {
            position.apply(&mv);
            let score = search.alpha_beta(position, child_depth, !maximizing, -SCORE_BOUND, SCORE_BOUND);
            position.undo()?;
            let score = score?;

            tracing::debug!(
                "Possible move: {} || Move evaluation: {}",
                position.describe(&mv),
                score
            );

            let improves = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if improves {
                best_score = score;
                chosen = Some(mv);
            }
        }

        self.nodes = search.nodes();
        chosen.map(|mv| (mv, best_score)).ok_or(AiError::NoLegalMoves)
    }
}

/// One decision with the default evaluator
pub fn choose_and_apply_move<R, B, G>(
    position: &mut R,
    agent: Color,
    depth: u32,
    book: &B,
    rng: &mut G,
) -> Result<Choice<R::Move>, AiError>
where
    R: Rules,
    B: OpeningBook<R> + ?Sized,
    G: Rng + ?Sized,
{
    AlphaBetaAI::new(agent, depth).choose_and_apply_move(position, book, rng)
}

// ============================================================================
// TESTS
// ============================================================================
