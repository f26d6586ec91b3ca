//! Minimax with alpha-beta pruning
//!
//! The search walks one shared position: every move is applied, searched and
//! undone before the next sibling is tried. Moves are visited in the order the
//! rules engine returns them.

use crate::error::StateError;
use crate::eval::{Evaluate, PieceSquareEval, Score, SCORE_BOUND};
use crate::game::Rules;

/// Depth-limited alpha-beta search with a node counter
pub struct Search<'e, E> {
    evaluator: &'e E,
    nodes: u64,
}

impl<'e, E> Search<'e, E> {
    pub fn new(evaluator: &'e E) -> Self {
        Self { evaluator, nodes: 0 }
    }

    /// Nodes visited since creation
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Score `position` to `depth` plies. White maximizes, Black minimizes.
    ///
    /// `alpha <= beta` on entry. The position is restored before returning.
    pub fn alpha_beta<R>(
        &mut self,
        position: &mut R,
        depth: u32,
        maximizing: bool,
        mut alpha: Score,
        mut beta: Score,
    ) -> Result<Score, StateError>
    where
        R: Rules,
        E: Evaluate<R>,
    {
        self.nodes += 1;

        if depth == 0 {
            return Ok(self.evaluator.evaluate(position));
        }

        let moves = position.legal_moves();
        if moves.is_empty() {
            return Ok(self.evaluator.evaluate(position));
        }

        let mut best = if maximizing { -SCORE_BOUND } else { SCORE_BOUND };

        for mv in &moves {
            position.apply(mv);
            let score = self.alpha_beta(position, depth - 1, !maximizing, alpha, beta);
            position.undo()?;
            let score = score?;

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if beta <= alpha {
                break;
            }
        }

        Ok(best)
    }
}

/// Alpha-beta search with the default evaluator
pub fn search<R: Rules>(
    position: &mut R,
    depth: u32,
    maximizing: bool,
    alpha: Score,
    beta: Score,
) -> Result<Score, StateError> {
    Search::new(&PieceSquareEval).alpha_beta(position, depth, maximizing, alpha, beta)
}

// ============================================================================
// TESTS
// ============================================================================
