//! Geometric classification of cause cells against a target move.
//!
//! A signature names how a set of cause cells relates to a target through
//! the eight winning lines. The tally counts signatures over a classified
//! policy; it only reads the policy.

use std::{collections::BTreeMap, fmt};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    induction::Rule,
    policy::{MoveClassification, MoveSet, OutcomeCategory, Policy},
    tictactoe::{LineAnalyzer, board::CELL_COUNT},
};

/// Relation between cause cells and a target cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Signature {
    /// One cause cell sharing a line with the target
    SameLineExtension,
    /// One cause cell sharing no line with the target
    DisjointPosition,
    /// Collinear cause cells whose line passes through the target
    LineCompletion,
    /// Collinear cause cells whose line misses the target
    LineIrrelevant,
    /// Scattered cause cells, two or more of them on a line with the target
    ForkIntersection,
    /// Scattered cause cells, exactly one on a line with the target
    SingleLink,
    /// Scattered cause cells, none on a line with the target
    NoRelation,
}

impl Signature {
    pub const ALL: [Signature; 7] = [
        Signature::SameLineExtension,
        Signature::DisjointPosition,
        Signature::LineCompletion,
        Signature::LineIrrelevant,
        Signature::ForkIntersection,
        Signature::SingleLink,
        Signature::NoRelation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Signature::SameLineExtension => "same-line extension",
            Signature::DisjointPosition => "disjoint position",
            Signature::LineCompletion => "line completion",
            Signature::LineIrrelevant => "line irrelevant",
            Signature::ForkIntersection => "fork intersection",
            Signature::SingleLink => "single link",
            Signature::NoRelation => "no relation",
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify `cause` cells against `target`.
///
/// # Errors
///
/// Returns [`Error::InvalidCause`] when the cause is empty, repeats a cell,
/// names a cell outside the board or contains the target.
pub fn classify(cause: &[usize], target: usize) -> Result<Signature> {
    if cause.is_empty() {
        return Err(Error::InvalidCause {
            message: "cause set is empty".to_string(),
        });
    }
    if let Some(&cell) = cause
        .iter()
        .chain(std::iter::once(&target))
        .find(|&&cell| cell >= CELL_COUNT)
    {
        return Err(Error::InvalidCause {
            message: format!("cell {cell} is outside the board"),
        });
    }
    if cause.contains(&target) {
        return Err(Error::InvalidCause {
            message: format!("target {target} is part of the cause"),
        });
    }
    if !cause.iter().all_unique() {
        return Err(Error::InvalidCause {
            message: format!("cause {cause:?} repeats a cell"),
        });
    }

    if let [cell] = cause {
        return Ok(if LineAnalyzer::shared_line_count(*cell, target) > 0 {
            Signature::SameLineExtension
        } else {
            Signature::DisjointPosition
        });
    }

    if let Some(line) = LineAnalyzer::lines_containing(cause).first() {
        return Ok(if line.contains(&target) {
            Signature::LineCompletion
        } else {
            Signature::LineIrrelevant
        });
    }

    let linked = cause
        .iter()
        .filter(|&&cell| LineAnalyzer::shared_line_count(cell, target) > 0)
        .count();
    Ok(match linked {
        0 => Signature::NoRelation,
        1 => Signature::SingleLink,
        _ => Signature::ForkIntersection,
    })
}

/// Whose stones form the cause pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StoneContext {
    Mover,
    Opponent,
}

impl fmt::Display for StoneContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoneContext::Mover => f.write_str("mover"),
            StoneContext::Opponent => f.write_str("opponent"),
        }
    }
}

/// Signature counts keyed by stone context and outcome category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologyTally {
    counts: BTreeMap<(StoneContext, OutcomeCategory, Signature), usize>,
    states: usize,
}

impl TopologyTally {
    pub fn count(
        &self,
        context: StoneContext,
        category: OutcomeCategory,
        signature: Signature,
    ) -> usize {
        self.counts
            .get(&(context, category, signature))
            .copied()
            .unwrap_or(0)
    }

    /// Sum over every signature of one context and category
    pub fn total(&self, context: StoneContext, category: OutcomeCategory) -> usize {
        Signature::ALL
            .iter()
            .map(|&signature| self.count(context, category, signature))
            .sum()
    }

    /// Non-degenerate (state, category) pairs that contributed
    pub fn states(&self) -> usize {
        self.states
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(StoneContext, OutcomeCategory, Signature), &usize)> {
        self.counts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Count signatures of every pair of same-owner stones against every move
/// of a non-degenerate outcome category.
///
/// A category is degenerate for a state when it is empty or holds every
/// empty cell; such categories carry no signal and are skipped.
pub fn tally(policy: &Policy<MoveClassification>) -> TopologyTally {
    let mut result = TopologyTally::default();

    for (state, classification) in policy.iter() {
        let empty = MoveSet::empty_cells(state);
        let mover = state.positions_of(state.to_move);
        let opponent = state.positions_of(state.to_move.opponent());

        for category in OutcomeCategory::ALL {
            let moves = classification.category(category);
            if moves.is_empty() || moves == empty {
                continue;
            }
            result.states += 1;

            for target in moves.iter() {
                for (context, stones) in [
                    (StoneContext::Mover, &mover),
                    (StoneContext::Opponent, &opponent),
                ] {
                    for pair in stones.iter().copied().combinations(2) {
                        if let Ok(signature) = classify(&pair, target) {
                            *result
                                .counts
                                .entry((context, category, signature))
                                .or_default() += 1;
                        }
                    }
                }
            }
        }
    }

    log::debug!(
        "topology tally: {} categories, {} signature keys",
        result.states,
        result.counts.len()
    );
    result
}

/// Signature counts over accepted rules, cause cells against target.
///
/// # Errors
///
/// Returns [`Error::InvalidCause`] if a rule's cause is malformed.
pub fn summarize_rules(rules: &[Rule]) -> Result<BTreeMap<Signature, usize>> {
    let mut counts = BTreeMap::new();
    for rule in rules {
        *counts
            .entry(classify(&rule.cause_indices, rule.target)?)
            .or_default() += 1;
    }
    Ok(counts)
}
