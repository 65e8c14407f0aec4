//! Causal rule induction.
//!
//! Derives a compact list of `(cause pattern, turn) -> target` rules that
//! explain the optimal moves of a policy. Rules are searched from the
//! smallest cause upward; each accepted rule must be exact on every matching
//! state, carry enough evidence and leave no cell outside its cause constant
//! across that evidence.

pub mod config;
pub mod engine;
pub mod hypothesis;
pub mod registry;
pub mod report;
pub mod rule;
pub mod universe;

pub use config::InductionConfig;
pub use engine::{RuleInduction, induce};
pub use hypothesis::{Hypothesis, Rejection, Verdict};
pub use registry::RuleRegistry;
pub use report::{InductionReport, PassSummary, RejectionCounts};
pub use rule::{Rule, predict};
pub use universe::{Sample, Universe};
