//! Fixpoint rule induction over an optimal-move policy

use itertools::Itertools;
use rayon::prelude::*;

use super::{
    config::InductionConfig,
    hypothesis::{Hypothesis, Verdict, evaluate},
    registry::RuleRegistry,
    report::{InductionReport, PassSummary, RejectionCounts},
    rule::Rule,
    universe::{Universe, pattern_at},
};
use crate::{
    Result,
    policy::{MoveSet, Policy},
    ports::{InductionObserver, NullObserver},
    tictactoe::board::CELL_COUNT,
};

/// A hypothesis together with the outcome of its checks
#[derive(Debug, Clone)]
struct Candidate {
    hypothesis: Hypothesis,
    verdict: Verdict,
}

/// Rule induction engine.
///
/// For each cause size `k` from 1 up to the configured maximum, passes are
/// repeated until one accepts nothing. Every pass reads a frozen snapshot of
/// the active pairs and the registry; its acceptances are applied only after
/// all of its hypotheses have been evaluated, so the parallel and sequential
/// modes produce the same rules in the same order.
#[derive(Debug, Clone)]
pub struct RuleInduction {
    config: InductionConfig,
}

impl RuleInduction {
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if the configuration
    /// does not validate.
    pub fn new(config: InductionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &InductionConfig {
        &self.config
    }

    /// Induce rules from `policy`.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::CorruptPolicy`] if an entry names an occupied cell;
    ///   nothing is induced in that case
    /// - any error raised by the observer
    pub fn run(
        &self,
        policy: &Policy<MoveSet>,
        observer: &mut dyn InductionObserver,
    ) -> Result<InductionReport> {
        policy.check_integrity()?;

        let mut universe = Universe::from_policy(policy);
        let mut registry = RuleRegistry::new();
        let universe_size = universe.samples().len();
        let initial_pairs = universe.active_pair_count();
        let mut passes = Vec::new();
        let mut cancelled = false;

        log::info!(
            "inducing rules over {} states ({} active pairs, max cause size {}, min support {})",
            universe_size,
            initial_pairs,
            self.config.max_cause_size,
            self.config.min_support
        );
        observer.on_run_start(universe_size, initial_pairs)?;

        'sizes: for cause_size in 1..=self.config.max_cause_size {
            let mut pass = 1;
            while !universe.is_exhausted() {
                let candidates = self.evaluate_pass(cause_size, &universe, &registry);
                let summary = apply_pass(
                    cause_size,
                    pass,
                    candidates,
                    &mut universe,
                    &mut registry,
                );

                log::info!(
                    "k={} pass {:<3} {:>6} hypotheses {:>5} accepted {:>7} pairs left",
                    cause_size,
                    summary.pass,
                    summary.hypotheses,
                    summary.accepted,
                    summary.remaining_pairs
                );

                let accepted = summary.accepted;
                let flow = observer.on_pass_end(&summary)?;
                passes.push(summary);

                if flow.is_break() {
                    log::info!("induction stopped by observer after k={cause_size} pass {pass}");
                    cancelled = true;
                    break 'sizes;
                }
                if accepted == 0 {
                    break;
                }
                pass += 1;
            }
        }

        let report = InductionReport {
            rules: registry.into_rules(),
            passes,
            universe_size,
            initial_pairs,
            unexplained: universe.unexplained(),
            cancelled,
        };
        if report.unexplained_pairs() > 0 {
            log::info!(
                "{} pairs in {} states remain unexplained",
                report.unexplained_pairs(),
                report.unexplained.len()
            );
        }
        observer.on_run_end(&report)?;
        Ok(report)
    }

    fn evaluate_pass(
        &self,
        cause_size: usize,
        universe: &Universe,
        registry: &RuleRegistry,
    ) -> Vec<Candidate> {
        let combinations: Vec<Vec<usize>> = (0..CELL_COUNT).combinations(cause_size).collect();
        let min_support = self.config.min_support;
        let per_combination: Vec<Vec<Candidate>> = if self.config.parallel {
            combinations
                .par_iter()
                .map(|cause| evaluate_combination(cause, universe, registry, min_support))
                .collect()
        } else {
            combinations
                .iter()
                .map(|cause| evaluate_combination(cause, universe, registry, min_support))
                .collect()
        };
        per_combination.into_iter().flatten().collect()
    }
}

/// Every hypothesis for one cause combination, in (pattern, turn, target) order.
fn evaluate_combination(
    cause: &[usize],
    universe: &Universe,
    registry: &RuleRegistry,
    min_support: usize,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for ((_, turn), members) in universe.buckets(cause) {
        let Some(&first) = members.first() else {
            continue;
        };
        let cause_pattern = pattern_at(&universe.sample(first).state, cause);

        for target in (0..CELL_COUNT).filter(|pos| !cause.contains(pos)) {
            let hypothesis = Hypothesis {
                cause_indices: cause.to_vec(),
                cause_pattern: cause_pattern.clone(),
                turn,
                target,
            };
            let verdict = evaluate(&hypothesis, &members, universe, registry, min_support);
            candidates.push(Candidate {
                hypothesis,
                verdict,
            });
        }
    }
    candidates
}

fn apply_pass(
    cause_size: usize,
    pass: usize,
    candidates: Vec<Candidate>,
    universe: &mut Universe,
    registry: &mut RuleRegistry,
) -> PassSummary {
    let hypotheses = candidates.len();
    let mut accepted = 0;
    let mut rejected = RejectionCounts::default();

    for Candidate {
        hypothesis,
        verdict,
    } in candidates
    {
        match verdict {
            Verdict::Rejected(reason) => rejected.record(reason),
            Verdict::Accepted { evidence } => {
                for &index in &evidence {
                    universe.explain(index, hypothesis.target);
                }
                let rule = hypothesis.into_rule(evidence.len(), pass);
                log::debug!("accepted {rule}");
                registry.insert(rule);
                accepted += 1;
            }
        }
    }

    PassSummary {
        cause_size,
        pass,
        hypotheses,
        accepted,
        rejected,
        remaining_pairs: universe.active_pair_count(),
    }
}

/// Induce rules with default settings and the given largest cause size.
///
/// # Errors
///
/// See [`RuleInduction::new`] and [`RuleInduction::run`].
pub fn induce(policy: &Policy<MoveSet>, max_cause_size: usize) -> Result<Vec<Rule>> {
    let config = InductionConfig::default().with_max_cause_size(max_cause_size);
    let report = RuleInduction::new(config)?.run(policy, &mut NullObserver)?;
    Ok(report.rules)
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use super::*;
    use crate::tictactoe::{BoardState, Cell, Player};

    fn policy(entries: &[(&str, &[usize])]) -> Policy<MoveSet> {
        entries
            .iter()
            .map(|(key, optimal)| {
                (
                    BoardState::parse(key).unwrap(),
                    optimal.iter().copied().collect(),
                )
            })
            .collect()
    }

    /// Three O-to-move positions where X threatens the top row at 2
    fn blocking_policy() -> Policy<MoveSet> {
        policy(&[
            ("XX..O....", &[2]),
            ("XX...O...", &[2]),
            ("XX.O.XOXO", &[2]),
        ])
    }

    #[test]
    fn learns_a_two_cell_block() {
        let report = RuleInduction::new(InductionConfig::default().sequential())
            .unwrap()
            .run(&blocking_policy(), &mut NullObserver)
            .unwrap();

        let rule = report
            .rules
            .iter()
            .find(|rule| rule.target == 2 && rule.cause_indices == vec![0, 1])
            .unwrap();
        assert_eq!(rule.cause_pattern, vec![Cell::X, Cell::X]);
        assert_eq!(rule.turn, Player::O);
        assert_eq!(rule.support, 3);
        assert_eq!(report.unexplained_pairs(), 0);
        assert_eq!(report.coverage(), 1.0);
    }

    #[test]
    fn corrupt_policy_aborts_before_induction() {
        let corrupt = policy(&[("XX..O....", &[0])]);
        assert!(matches!(
            induce(&corrupt, 2),
            Err(crate::Error::CorruptPolicy { position: 0, .. })
        ));
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        assert!(RuleInduction::new(InductionConfig::default().with_max_cause_size(0)).is_err());
    }

    #[test]
    fn single_state_policy_is_left_unexplained() {
        let report = RuleInduction::new(InductionConfig::default())
            .unwrap()
            .run(&policy(&[("XX..O....", &[2])]), &mut NullObserver)
            .unwrap();
        assert!(report.rules.is_empty());
        assert_eq!(report.unexplained_pairs(), 1);
        assert_eq!(report.coverage(), 0.0);
    }

    struct StopAfterFirstPass {
        passes: usize,
        finished: bool,
    }

    impl InductionObserver for StopAfterFirstPass {
        fn on_pass_end(&mut self, _summary: &PassSummary) -> Result<ControlFlow<()>> {
            self.passes += 1;
            Ok(ControlFlow::Break(()))
        }

        fn on_run_end(&mut self, _report: &InductionReport) -> Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn observer_can_stop_between_passes() {
        let mut observer = StopAfterFirstPass {
            passes: 0,
            finished: false,
        };
        let report = RuleInduction::new(InductionConfig::default())
            .unwrap()
            .run(&blocking_policy(), &mut observer)
            .unwrap();
        assert!(report.cancelled);
        assert_eq!(report.passes.len(), 1);
        assert_eq!(observer.passes, 1);
        assert!(observer.finished);
    }
}
