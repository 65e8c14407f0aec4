//! Accepted-rule registry with (target, turn) lookup

use std::collections::HashMap;

use super::{hypothesis::Hypothesis, rule::Rule};
use crate::tictactoe::Player;

/// Rules accepted so far, in acceptance order.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
    by_target: HashMap<(usize, Player), Vec<usize>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rule: Rule) {
        self.by_target
            .entry((rule.target, rule.turn))
            .or_default()
            .push(self.rules.len());
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    /// Rules sharing a target and turn
    pub fn for_target(&self, target: usize, turn: Player) -> impl Iterator<Item = &Rule> {
        self.by_target
            .get(&(target, turn))
            .into_iter()
            .flatten()
            .map(|&i| &self.rules[i])
    }

    /// Whether an accepted rule already implies the hypothesis.
    pub fn subsumes(&self, hypothesis: &Hypothesis) -> bool {
        self.for_target(hypothesis.target, hypothesis.turn)
            .any(|rule| rule.generalizes(&hypothesis.cause_indices, &hypothesis.cause_pattern))
    }
}
