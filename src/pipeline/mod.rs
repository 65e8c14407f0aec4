//! Solve-then-induce pipeline
//!
//! Obtains an optimal-move policy (solved fresh or loaded from disk), runs
//! rule induction on it and optionally tallies the topology of the result.

pub mod observers;

use std::path::PathBuf;

pub use observers::{JsonlObserver, PassLimitObserver, ProgressObserver};

pub use crate::ports::InductionObserver;
use crate::{
    Result,
    adapters::load_policy_file,
    induction::{InductionConfig, InductionReport, RuleInduction},
    policy::{MoveSet, Policy},
    solver::{SolverConfig, solve},
    tictactoe::BoardState,
};

/// Where the pipeline takes its policy from
#[derive(Debug, Clone)]
pub enum PolicySource {
    /// Solve every state reachable from `initial`
    Solve {
        initial: BoardState,
        config: SolverConfig,
    },
    /// Load a persisted policy (JSON or MessagePack by extension)
    File(PathBuf),
}

impl PolicySource {
    /// # Errors
    ///
    /// Returns [`crate::Error::InputNotFound`] for a missing file, or the
    /// validation error of a malformed policy.
    pub fn load(&self) -> Result<Policy<MoveSet>> {
        match self {
            PolicySource::Solve { initial, config } => solve(initial, config),
            PolicySource::File(path) => {
                let policy: Policy<MoveSet> = load_policy_file(path)?;
                log::info!("loaded {} states from {}", policy.len(), path.display());
                Ok(policy)
            }
        }
    }
}

/// Policy and induction report of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub policy: Policy<MoveSet>,
    pub report: InductionReport,
}

/// Load or solve the policy, then induce rules from it.
///
/// # Errors
///
/// Fails without a partial run when the policy cannot be obtained, when the
/// induction configuration is invalid or the policy is corrupt.
pub fn run(
    source: &PolicySource,
    induction: &InductionConfig,
    observer: &mut dyn InductionObserver,
) -> Result<PipelineOutput> {
    let engine = RuleInduction::new(induction.clone())?;
    let policy = source.load()?;
    let report = engine.run(&policy, observer)?;
    Ok(PipelineOutput { policy, report })
}
