//! Accepted causal rules

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    policy::MoveSet,
    tictactoe::{BoardState, Cell, Player},
};

/// A learned rule: when the cells in `cause_indices` hold `cause_pattern` and
/// `turn` is to move, `target` is an optimal move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Ascending, distinct cell indices
    pub cause_indices: Vec<usize>,
    /// One value per cause index
    pub cause_pattern: Vec<Cell>,
    pub turn: Player,
    pub target: usize,
    /// Evidence states explained when the rule was accepted
    pub support: usize,
    /// Fixpoint pass (1-based, per cause size) that accepted the rule
    pub pass: usize,
}

impl Rule {
    pub fn cause_size(&self) -> usize {
        self.cause_indices.len()
    }

    /// Whether the rule fires on `state`: the turn and every cause cell
    /// match, and the target is still empty.
    pub fn matches(&self, state: &BoardState) -> bool {
        state.to_move == self.turn
            && state.is_empty(self.target)
            && self
                .cause_indices
                .iter()
                .zip(&self.cause_pattern)
                .all(|(&idx, &cell)| state.get(idx) == cell)
    }

    /// Whether this rule's cause is contained in the given cause and agrees
    /// with it on every shared cell.
    pub fn generalizes(&self, cause_indices: &[usize], cause_pattern: &[Cell]) -> bool {
        self.cause_indices
            .iter()
            .zip(&self.cause_pattern)
            .all(|(idx, cell)| {
                cause_indices
                    .iter()
                    .position(|other| other == idx)
                    .is_some_and(|i| cause_pattern[i] == *cell)
            })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cause = self
            .cause_indices
            .iter()
            .zip(&self.cause_pattern)
            .map(|(idx, cell)| format!("{idx}={cell}"))
            .collect::<Vec<_>>()
            .join(" ");
        write!(
            f,
            "{} to move, [{}] -> {} (support {}, k={}, pass {})",
            self.turn,
            cause,
            self.target,
            self.support,
            self.cause_size(),
            self.pass
        )
    }
}

/// Union of the targets of every rule that fires on `state`.
pub fn predict(rules: &[Rule], state: &BoardState) -> MoveSet {
    rules
        .iter()
        .filter(|rule| rule.matches(state))
        .map(|rule| rule.target)
        .collect()
}
