//! Memoized negamax evaluation

use std::collections::HashMap;

use crate::{
    policy::{MoveClassification, MoveSet},
    tictactoe::BoardState,
};

/// Score offset for terminal positions. Wins score `BASE - depth` for the
/// winner, so faster wins and slower losses are preferred.
pub const BASE: i32 = 10;

/// Negamax evaluator shared by the optimal-set and Win/Draw/Lose modes.
///
/// Scores are always from the perspective of the player to move. The memo is
/// keyed by board code, or by the canonical board code when symmetry
/// reduction is on. Depth is the absolute mark count, so a memoized score
/// does not depend on where the search started.
#[derive(Debug, Default)]
pub struct Evaluator {
    memo: HashMap<u32, i32>,
    symmetry: bool,
}

impl Evaluator {
    pub fn new(symmetry: bool) -> Self {
        Self {
            memo: HashMap::new(),
            symmetry,
        }
    }

    pub fn symmetry(&self) -> bool {
        self.symmetry
    }

    /// Number of memoized positions
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Minimax value of `state` for the player to move.
    pub fn score(&mut self, state: &BoardState) -> i32 {
        let state = if self.symmetry {
            state.canonical()
        } else {
            *state
        };
        let key = state.code();
        if let Some(&score) = self.memo.get(&key) {
            return score;
        }

        let score = match terminal_score(&state) {
            Some(score) => score,
            None => self
                .child_scores(&state)
                .into_iter()
                .map(|(_, score)| score)
                .max()
                .unwrap_or(0),
        };
        self.memo.insert(key, score);
        score
    }

    /// Score of every legal move, as seen by the player making it, in
    /// ascending position order.
    ///
    /// With symmetry reduction the moves are scored on the canonical board
    /// and mapped back through the inverse transform.
    pub fn move_scores(&mut self, state: &BoardState) -> Vec<(usize, i32)> {
        if !self.symmetry {
            return self.child_scores(state);
        }

        let ctx = state.canonical_context();
        let mut scores: Vec<(usize, i32)> = self
            .child_scores(&ctx.state)
            .into_iter()
            .map(|(pos, score)| (ctx.map_canonical_to_original(pos), score))
            .collect();
        scores.sort_unstable_by_key(|&(pos, _)| pos);
        scores
    }

    fn child_scores(&mut self, state: &BoardState) -> Vec<(usize, i32)> {
        state
            .legal_moves()
            .into_iter()
            .filter_map(|pos| {
                let child = state.make_move(pos).ok()?;
                Some((pos, -self.score(&child)))
            })
            .collect()
    }
}

/// Score of a finished game for the player to move, `None` while play continues.
pub fn terminal_score(state: &BoardState) -> Option<i32> {
    let depth = state.occupied_count() as i32;
    match state.winner() {
        Some(winner) if winner == state.to_move => Some(BASE - depth),
        Some(_) => Some(depth - BASE),
        None if state.is_terminal() => Some(0),
        None => None,
    }
}

/// Moves achieving the best score. Empty when every legal move loses, and
/// for terminal states.
pub fn optimal_moves(evaluator: &mut Evaluator, state: &BoardState) -> MoveSet {
    let scores = evaluator.move_scores(state);
    let Some(best) = scores.iter().map(|&(_, score)| score).max() else {
        return MoveSet::EMPTY;
    };
    if best < 0 {
        return MoveSet::EMPTY;
    }
    scores
        .into_iter()
        .filter(|&(_, score)| score == best)
        .map(|(pos, _)| pos)
        .collect()
}

/// Bucket every legal move by the sign of its score.
pub fn classify_moves(evaluator: &mut Evaluator, state: &BoardState) -> MoveClassification {
    let mut classification = MoveClassification::default();
    for (pos, score) in evaluator.move_scores(state) {
        classification.record(pos, score);
    }
    classification
}
