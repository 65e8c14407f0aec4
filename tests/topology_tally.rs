//! Signature tallies over the fully classified game

mod common;

use common::{full_classified_policy, full_policy};
use ttt_rules::{
    induction::induce,
    policy::OutcomeCategory,
    topology::{Signature, StoneContext, summarize_rules, tally},
};

#[test]
fn completing_own_lines_shows_up_as_winning() {
    let result = tally(full_classified_policy());
    assert!(!result.is_empty());
    assert!(result.count(StoneContext::Mover, OutcomeCategory::Win, Signature::LineCompletion) > 0);
    // blocking moves complete the opponent's line and are not losses
    let blocks = [OutcomeCategory::Win, OutcomeCategory::Draw]
        .into_iter()
        .map(|category| result.count(StoneContext::Opponent, category, Signature::LineCompletion))
        .sum::<usize>();
    assert!(blocks > 0);
}

#[test]
fn totals_add_up_per_category() {
    let result = tally(full_classified_policy());
    for context in [StoneContext::Mover, StoneContext::Opponent] {
        for category in OutcomeCategory::ALL {
            let by_signature: usize = Signature::ALL
                .iter()
                .map(|&signature| result.count(context, category, signature))
                .sum();
            assert_eq!(by_signature, result.total(context, category));
        }
    }
}

#[test]
fn pair_signatures_never_use_single_cell_variants() {
    let result = tally(full_classified_policy());
    for ((_, _, signature), _) in result.iter() {
        assert!(!matches!(
            signature,
            Signature::SameLineExtension | Signature::DisjointPosition
        ));
    }
}

#[test]
fn tally_is_deterministic() {
    let first = tally(full_classified_policy());
    let second = tally(full_classified_policy());
    assert_eq!(first, second);
}

#[test]
fn rule_summary_counts_every_rule() {
    let rules = induce(full_policy(), 2).unwrap();
    let summary = summarize_rules(&rules).unwrap();
    assert_eq!(summary.values().sum::<usize>(), rules.len());
}
