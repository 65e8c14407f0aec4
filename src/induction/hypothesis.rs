//! Evaluation of a single candidate rule against a frozen snapshot

use serde::{Deserialize, Serialize};

use super::{registry::RuleRegistry, rule::Rule, universe::Universe};
use crate::tictactoe::{Cell, Player, board::CELL_COUNT};

/// A candidate rule before its checks have run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hypothesis {
    pub cause_indices: Vec<usize>,
    pub cause_pattern: Vec<Cell>,
    pub turn: Player,
    pub target: usize,
}

impl Hypothesis {
    pub fn into_rule(self, support: usize, pass: usize) -> Rule {
        Rule {
            cause_indices: self.cause_indices,
            cause_pattern: self.cause_pattern,
            turn: self.turn,
            target: self.target,
            support,
            pass,
        }
    }
}

/// Why a hypothesis was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejection {
    /// An accepted rule with a smaller cause already implies it
    Subsumed,
    /// A matching state does not have the target among its optimal moves
    Counterexample,
    /// Too few evidence states
    InsufficientSupport,
    /// A cell outside the cause is constant across the evidence
    NotMinimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Indices of the evidence samples whose (state, target) pair the rule explains
    Accepted { evidence: Vec<usize> },
    Rejected(Rejection),
}

/// Run the subsumption, accuracy, support and minimality checks.
///
/// `candidates` are the universe samples that still hold an active pair and
/// match the hypothesis' cause pattern and turn.
pub fn evaluate(
    hypothesis: &Hypothesis,
    candidates: &[usize],
    universe: &Universe,
    registry: &RuleRegistry,
    min_support: usize,
) -> Verdict {
    if registry.subsumes(hypothesis) {
        return Verdict::Rejected(Rejection::Subsumed);
    }

    let target = hypothesis.target;
    let mut evidence = Vec::new();
    for &index in candidates {
        let sample = universe.sample(index);
        if !sample.state.is_empty(target) {
            continue;
        }
        if !sample.optimal.contains(target) {
            return Verdict::Rejected(Rejection::Counterexample);
        }
        if universe.active(index).contains(target) {
            evidence.push(index);
        }
    }

    if evidence.len() < min_support {
        return Verdict::Rejected(Rejection::InsufficientSupport);
    }

    if has_constant_free_cell(hypothesis, &evidence, universe) {
        return Verdict::Rejected(Rejection::NotMinimal);
    }

    Verdict::Accepted { evidence }
}

fn has_constant_free_cell(hypothesis: &Hypothesis, evidence: &[usize], universe: &Universe) -> bool {
    let Some((&first, rest)) = evidence.split_first() else {
        return false;
    };
    let reference = universe.sample(first).state;
    (0..CELL_COUNT)
        .filter(|pos| *pos != hypothesis.target && !hypothesis.cause_indices.contains(pos))
        .any(|pos| {
            rest.iter()
                .all(|&index| universe.sample(index).state.get(pos) == reference.get(pos))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        policy::{MoveSet, Policy},
        tictactoe::BoardState,
    };

    fn universe(entries: &[(&str, &[usize])]) -> Universe {
        let policy: Policy<MoveSet> = entries
            .iter()
            .map(|(key, optimal)| {
                (
                    BoardState::parse(key).unwrap(),
                    optimal.iter().copied().collect(),
                )
            })
            .collect();
        Universe::from_policy(&policy)
    }

    fn candidates(universe: &Universe, hypothesis: &Hypothesis) -> Vec<usize> {
        universe
            .buckets(&hypothesis.cause_indices)
            .into_iter()
            .filter(|((_, turn), _)| *turn == hypothesis.turn)
            .flat_map(|(_, indices)| indices)
            .filter(|&i| {
                hypothesis
                    .cause_indices
                    .iter()
                    .zip(&hypothesis.cause_pattern)
                    .all(|(&idx, &cell)| universe.sample(i).state.get(idx) == cell)
            })
            .collect()
    }

    fn block_at_two() -> Hypothesis {
        Hypothesis {
            cause_indices: vec![0, 1],
            cause_pattern: vec![Cell::X, Cell::X],
            turn: Player::O,
            target: 2,
        }
    }

    #[test]
    fn accepts_consistent_varied_evidence() {
        let universe = universe(&[
            ("XX..O....", &[2]),
            ("XXO.O.X..", &[3]),
            ("XX...O...", &[2]),
            ("XX.O.XOXO", &[2]),
        ]);
        let hypothesis = block_at_two();
        let verdict = evaluate(
            &hypothesis,
            &candidates(&universe, &hypothesis),
            &universe,
            &RuleRegistry::new(),
            2,
        );
        assert!(matches!(verdict, Verdict::Accepted { evidence } if evidence.len() == 3));
    }

    #[test]
    fn single_counterexample_rejects() {
        let universe = universe(&[
            ("XX..O....", &[2]),
            ("XX...O...", &[2]),
            ("XX.O.....", &[3]),
        ]);
        let hypothesis = block_at_two();
        let verdict = evaluate(
            &hypothesis,
            &candidates(&universe, &hypothesis),
            &universe,
            &RuleRegistry::new(),
            2,
        );
        assert_eq!(verdict, Verdict::Rejected(Rejection::Counterexample));
    }

    #[test]
    fn thin_evidence_rejects() {
        let universe = universe(&[("XX..O....", &[2])]);
        let hypothesis = block_at_two();
        let verdict = evaluate(
            &hypothesis,
            &candidates(&universe, &hypothesis),
            &universe,
            &RuleRegistry::new(),
            2,
        );
        assert_eq!(verdict, Verdict::Rejected(Rejection::InsufficientSupport));
    }

    #[test]
    fn under_specified_cause_is_not_minimal() {
        // O at 4 in every evidence state: the cause is missing a cell
        let universe = universe(&[("XX..O....", &[2]), ("XX.XO.O..", &[2])]);
        let hypothesis = block_at_two();
        let verdict = evaluate(
            &hypothesis,
            &candidates(&universe, &hypothesis),
            &universe,
            &RuleRegistry::new(),
            2,
        );
        assert_eq!(verdict, Verdict::Rejected(Rejection::NotMinimal));
    }

    #[test]
    fn registered_generalization_subsumes() {
        let universe = universe(&[("XX..O....", &[2]), ("XX...O...", &[2])]);
        let mut registry = RuleRegistry::new();
        registry.insert(
            Hypothesis {
                cause_indices: vec![1],
                cause_pattern: vec![Cell::X],
                turn: Player::O,
                target: 2,
            }
            .into_rule(2, 1),
        );
        let hypothesis = block_at_two();
        let verdict = evaluate(
            &hypothesis,
            &candidates(&universe, &hypothesis),
            &universe,
            &registry,
            2,
        );
        assert_eq!(verdict, Verdict::Rejected(Rejection::Subsumed));
    }
}
