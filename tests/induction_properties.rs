//! Properties of rule induction over the fully solved game

mod common;

use std::{collections::HashMap, sync::OnceLock};

use common::full_policy;
use ttt_rules::{
    Error,
    induction::{InductionConfig, InductionReport, Rule, RuleInduction, Universe, predict},
    policy::{MoveSet, Policy},
    ports::NullObserver,
    tictactoe::BoardState,
};

fn full_report() -> &'static InductionReport {
    static REPORT: OnceLock<InductionReport> = OnceLock::new();
    REPORT.get_or_init(|| {
        RuleInduction::new(InductionConfig::default())
            .unwrap()
            .run(full_policy(), &mut NullObserver)
            .unwrap()
    })
}

mod determinism {
    use super::*;

    #[test]
    fn sequential_and_parallel_runs_agree() {
        let config = InductionConfig::default().with_max_cause_size(2);
        let parallel = RuleInduction::new(config.clone())
            .unwrap()
            .run(full_policy(), &mut NullObserver)
            .unwrap();
        let sequential = RuleInduction::new(config.sequential())
            .unwrap()
            .run(full_policy(), &mut NullObserver)
            .unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn repeated_runs_agree() {
        let again = RuleInduction::new(InductionConfig::default())
            .unwrap()
            .run(full_policy(), &mut NullObserver)
            .unwrap();
        assert_eq!(&again, full_report());
    }
}

mod rules {
    use super::*;

    #[test]
    fn rules_are_found_and_ordered_by_cause_size() {
        let report = full_report();
        assert!(!report.rules.is_empty());
        assert!(!report.cancelled);
        assert!(
            report
                .rules
                .windows(2)
                .all(|pair| pair[0].cause_size() <= pair[1].cause_size())
        );
    }

    #[test]
    fn no_rule_generalizes_another_with_the_same_target() {
        let rules = &full_report().rules;
        for (i, rule) in rules.iter().enumerate() {
            for (j, other) in rules.iter().enumerate() {
                if i == j || other.target != rule.target || other.turn != rule.turn {
                    continue;
                }
                assert!(
                    !other.generalizes(&rule.cause_indices, &rule.cause_pattern),
                    "{other} generalizes {rule}"
                );
            }
        }
    }

    #[test]
    fn first_pass_rules_never_fire_on_a_non_optimal_move() {
        // every universe state is still active during the first single-cell pass
        let rules: Vec<_> = full_report()
            .rules
            .iter()
            .filter(|rule| rule.cause_size() == 1 && rule.pass == 1)
            .cloned()
            .collect();
        let universe = Universe::from_policy(full_policy());
        for sample in universe.samples() {
            let predicted = predict(&rules, &sample.state);
            assert!(
                predicted.is_subset(sample.optimal),
                "state {} predicted {predicted} optimal {}",
                sample.state.key(),
                sample.optimal
            );
        }
    }

    #[test]
    fn support_is_bounded_by_matching_states() {
        let report = full_report();
        let universe = Universe::from_policy(full_policy());
        for rule in &report.rules {
            let matching = universe
                .samples()
                .iter()
                .filter(|sample| rule.matches(&sample.state))
                .count();
            assert!(rule.support >= InductionConfig::default().min_support, "{rule}");
            assert!(rule.support <= matching, "{rule} matches {matching}");
        }
    }
}

mod minimality {
    use super::*;
    use ttt_rules::tictactoe::Cell;

    /// Whether some state of the full policy matches the reduced cause with
    /// the target empty but does not have the target among its optimal moves.
    fn has_counterexample(cause: &[(usize, Cell)], rule: &Rule) -> bool {
        full_policy().iter().any(|(state, optimal)| {
            state.to_move == rule.turn
                && state.is_empty(rule.target)
                && cause.iter().all(|&(idx, cell)| state.get(idx) == cell)
                && !optimal.contains(rule.target)
        })
    }

    /// Whether a cell outside the reduced cause and the target holds one value
    /// in every universe state that supports the reduced hypothesis.
    fn has_constant_free_cell(cause: &[(usize, Cell)], rule: &Rule, universe: &Universe) -> bool {
        let evidence: Vec<BoardState> = universe
            .samples()
            .iter()
            .filter(|sample| {
                sample.state.to_move == rule.turn
                    && sample.state.is_empty(rule.target)
                    && sample.optimal.contains(rule.target)
                    && cause.iter().all(|&(idx, cell)| sample.state.get(idx) == cell)
            })
            .map(|sample| sample.state)
            .collect();
        let Some((first, rest)) = evidence.split_first() else {
            return false;
        };
        (0..9)
            .filter(|pos| *pos != rule.target && cause.iter().all(|&(idx, _)| idx != *pos))
            .any(|pos| rest.iter().all(|state| state.get(pos) == first.get(pos)))
    }

    #[test]
    fn dropping_any_cause_cell_breaks_the_rule() {
        let universe = Universe::from_policy(full_policy());
        let mut checked = 0;
        for rule in full_report().rules.iter().filter(|rule| rule.cause_size() >= 2) {
            let cause: Vec<(usize, Cell)> = rule
                .cause_indices
                .iter()
                .copied()
                .zip(rule.cause_pattern.iter().copied())
                .collect();
            for dropped in 0..cause.len() {
                let mut reduced = cause.clone();
                reduced.remove(dropped);
                assert!(
                    has_counterexample(&reduced, rule)
                        || has_constant_free_cell(&reduced, rule, &universe),
                    "{rule} still holds without cell {}",
                    cause[dropped].0
                );
                checked += 1;
            }
        }
        assert!(checked > 0);
    }
}

mod coverage {
    use super::*;

    #[test]
    fn every_explained_pair_is_predicted() {
        let report = full_report();
        let unexplained: HashMap<BoardState, MoveSet> =
            report.unexplained.iter().copied().collect();
        let universe = Universe::from_policy(full_policy());

        for sample in universe.samples() {
            let remaining = unexplained.get(&sample.state).copied().unwrap_or_default();
            let predicted = predict(&report.rules, &sample.state);
            for pos in sample.optimal.iter().filter(|pos| !remaining.contains(*pos)) {
                assert!(
                    predicted.contains(pos),
                    "state {} move {pos} explained but not predicted",
                    sample.state.key()
                );
            }
        }
    }

    #[test]
    fn pair_accounting_balances() {
        let report = full_report();
        let last = report.passes.last().unwrap();
        assert_eq!(last.remaining_pairs, report.unexplained_pairs());
        assert!(report.unexplained_pairs() < report.initial_pairs);
        let coverage = report.coverage();
        assert!(coverage > 0.0 && coverage <= 1.0);
    }
}

mod failures {
    use super::*;

    #[test]
    fn corrupt_policy_is_rejected_before_induction() {
        let mut policy: Policy<MoveSet> = full_policy().clone();
        // cell 0 is taken on this board
        policy.insert(BoardState::parse("X...O....").unwrap(), MoveSet::single(0));

        let result = RuleInduction::new(InductionConfig::default())
            .unwrap()
            .run(&policy, &mut NullObserver);
        assert!(matches!(result, Err(Error::CorruptPolicy { .. })));
    }
}
