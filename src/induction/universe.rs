//! Induction universe and the shrinking set of active pairs

use std::collections::BTreeMap;

use crate::{
    policy::{MoveSet, Policy},
    tictactoe::{BoardState, Cell, Player},
};

/// A state of the induction universe with its optimal moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub state: BoardState,
    pub optimal: MoveSet,
}

/// States that carry a discriminating signal, plus the (state, move) pairs
/// no accepted rule explains yet.
///
/// A state belongs to the universe when its optimal set is non-empty and
/// smaller than its set of empty cells. `active[i]` holds the unexplained
/// optimal moves of `samples[i]`.
#[derive(Debug, Clone)]
pub struct Universe {
    samples: Vec<Sample>,
    active: Vec<MoveSet>,
}

impl Universe {
    pub fn from_policy(policy: &Policy<MoveSet>) -> Self {
        let samples: Vec<Sample> = policy
            .iter()
            .filter(|(state, optimal)| {
                !optimal.is_empty() && **optimal != MoveSet::empty_cells(state)
            })
            .map(|(state, optimal)| Sample {
                state: *state,
                optimal: *optimal,
            })
            .collect();
        log::debug!(
            "induction universe: {} of {} states",
            samples.len(),
            policy.len()
        );
        let active = samples.iter().map(|sample| sample.optimal).collect();
        Self { samples, active }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn sample(&self, index: usize) -> &Sample {
        &self.samples[index]
    }

    /// Unexplained optimal moves of one sample
    pub fn active(&self, index: usize) -> MoveSet {
        self.active[index]
    }

    pub fn active_pair_count(&self) -> usize {
        self.active.iter().map(|moves| moves.len()).sum()
    }

    pub fn is_exhausted(&self) -> bool {
        self.active.iter().all(|moves| moves.is_empty())
    }

    /// Mark a (state, move) pair as explained.
    pub fn explain(&mut self, index: usize, target: usize) {
        self.active[index].remove(target);
    }

    /// Samples holding an active pair, grouped by their values on `cause`
    /// and the player to move. Keys order by base-3 pattern code, then turn.
    pub fn buckets(&self, cause: &[usize]) -> BTreeMap<(u32, Player), Vec<usize>> {
        let mut buckets: BTreeMap<(u32, Player), Vec<usize>> = BTreeMap::new();
        for (index, sample) in self.samples.iter().enumerate() {
            if self.active[index].is_empty() {
                continue;
            }
            buckets
                .entry((pattern_code(&sample.state, cause), sample.state.to_move))
                .or_default()
                .push(index);
        }
        buckets
    }

    /// Remaining unexplained pairs grouped by state
    pub fn unexplained(&self) -> Vec<(BoardState, MoveSet)> {
        self.samples
            .iter()
            .zip(&self.active)
            .filter(|(_, moves)| !moves.is_empty())
            .map(|(sample, moves)| (sample.state, *moves))
            .collect()
    }
}

/// Values of `state` at the given cells
pub fn pattern_at(state: &BoardState, cause: &[usize]) -> Vec<Cell> {
    cause.iter().map(|&idx| state.get(idx)).collect()
}

/// Base-3 code of the values at the given cells
pub fn pattern_code(state: &BoardState, cause: &[usize]) -> u32 {
    cause
        .iter()
        .fold(0, |acc, &idx| acc * 3 + state.get(idx).code())
}
