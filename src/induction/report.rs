//! Per-pass summaries and the final induction report

use serde::{Deserialize, Serialize};

use super::{hypothesis::Rejection, rule::Rule};
use crate::{policy::MoveSet, tictactoe::BoardState};

/// Rejected hypotheses of one pass, by reason
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionCounts {
    pub subsumed: usize,
    pub counterexample: usize,
    pub insufficient_support: usize,
    pub not_minimal: usize,
}

impl RejectionCounts {
    pub fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::Subsumed => self.subsumed += 1,
            Rejection::Counterexample => self.counterexample += 1,
            Rejection::InsufficientSupport => self.insufficient_support += 1,
            Rejection::NotMinimal => self.not_minimal += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.subsumed + self.counterexample + self.insufficient_support + self.not_minimal
    }
}

/// Outcome of one fixpoint pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassSummary {
    pub cause_size: usize,
    /// 1-based pass number within this cause size
    pub pass: usize,
    pub hypotheses: usize,
    pub accepted: usize,
    pub rejected: RejectionCounts,
    /// Active pairs left after the pass was applied
    pub remaining_pairs: usize,
}

/// Result of a rule induction run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InductionReport {
    /// Accepted rules in acceptance order
    pub rules: Vec<Rule>,
    pub passes: Vec<PassSummary>,
    /// States in the induction universe
    pub universe_size: usize,
    pub initial_pairs: usize,
    /// States with optimal moves no rule explains
    pub unexplained: Vec<(BoardState, MoveSet)>,
    /// Set when an observer stopped the run early
    pub cancelled: bool,
}

impl InductionReport {
    pub fn unexplained_pairs(&self) -> usize {
        self.unexplained.iter().map(|(_, moves)| moves.len()).sum()
    }

    /// Fraction of the initial active pairs explained by some rule
    pub fn coverage(&self) -> f64 {
        if self.initial_pairs == 0 {
            return 1.0;
        }
        (self.initial_pairs - self.unexplained_pairs()) as f64 / self.initial_pairs as f64
    }

    /// Rule count per cause size, indexed from 1
    pub fn rules_by_cause_size(&self) -> Vec<(usize, usize)> {
        let max = self.rules.iter().map(Rule::cause_size).max().unwrap_or(0);
        (1..=max)
            .map(|k| (k, self.rules.iter().filter(|r| r.cause_size() == k).count()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(initial_pairs: usize, unexplained: Vec<(BoardState, MoveSet)>) -> InductionReport {
        InductionReport {
            rules: Vec::new(),
            passes: Vec::new(),
            universe_size: 0,
            initial_pairs,
            unexplained,
            cancelled: false,
        }
    }

    #[test]
    fn coverage_counts_explained_pairs() {
        let state = BoardState::parse("XX..O....").unwrap();
        let partial = report(4, vec![(state, MoveSet::single(2))]);
        assert_eq!(partial.unexplained_pairs(), 1);
        assert!((partial.coverage() - 0.75).abs() < 1e-12);

        assert_eq!(report(0, Vec::new()).coverage(), 1.0);
    }

    #[test]
    fn rejection_counts_total() {
        let mut counts = RejectionCounts::default();
        counts.record(Rejection::Counterexample);
        counts.record(Rejection::Counterexample);
        counts.record(Rejection::NotMinimal);
        assert_eq!(counts.counterexample, 2);
        assert_eq!(counts.total(), 3);
    }
}
