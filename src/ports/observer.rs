//! Observer port - abstraction for watching rule induction runs
//!
//! Progress reporting and early stopping hook into a run through this trait
//! without coupling the engine to a console or any output format.

use std::ops::ControlFlow;

use crate::{
    Result,
    induction::{InductionReport, PassSummary},
};

/// Observer trait for monitoring rule induction
///
/// # Event Sequence
///
/// 1. `on_run_start(universe_size, initial_pairs)` - Once, after the policy
///    passed its integrity check
/// 2. `on_pass_end(summary)` - After each pass has been applied
/// 3. `on_run_end(report)` - Once, also after a cancelled run
///
/// Returning [`ControlFlow::Break`] from `on_pass_end` stops the run. A pass
/// is never interrupted midway, so every reported rule was accepted against a
/// complete pass.
///
/// # Examples
///
/// ```no_run
/// use std::ops::ControlFlow;
///
/// use ttt_rules::{induction::PassSummary, ports::InductionObserver};
///
/// /// Stop once the first cause size is exhausted
/// struct SingleCellOnly;
///
/// impl InductionObserver for SingleCellOnly {
///     fn on_pass_end(&mut self, summary: &PassSummary) -> ttt_rules::Result<ControlFlow<()>> {
///         if summary.cause_size == 1 && summary.accepted == 0 {
///             return Ok(ControlFlow::Break(()));
///         }
///         Ok(ControlFlow::Continue(()))
///     }
/// }
/// ```
pub trait InductionObserver: Send {
    /// Called once before the first pass.
    fn on_run_start(&mut self, _universe_size: usize, _initial_pairs: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each pass. Break to stop the run.
    fn on_pass_end(&mut self, _summary: &PassSummary) -> Result<ControlFlow<()>> {
        Ok(ControlFlow::Continue(()))
    }

    /// Called once with the final report.
    fn on_run_end(&mut self, _report: &InductionReport) -> Result<()> {
        Ok(())
    }
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl InductionObserver for NullObserver {}

/// Fans events out to several observers; stops when any of them breaks.
#[derive(Default)]
pub struct ObserverSet {
    observers: Vec<Box<dyn InductionObserver>>,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: impl InductionObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl InductionObserver for ObserverSet {
    fn on_run_start(&mut self, universe_size: usize, initial_pairs: usize) -> Result<()> {
        for observer in &mut self.observers {
            observer.on_run_start(universe_size, initial_pairs)?;
        }
        Ok(())
    }

    fn on_pass_end(&mut self, summary: &PassSummary) -> Result<ControlFlow<()>> {
        let mut flow = ControlFlow::Continue(());
        for observer in &mut self.observers {
            if observer.on_pass_end(summary)?.is_break() {
                flow = ControlFlow::Break(());
            }
        }
        Ok(flow)
    }

    fn on_run_end(&mut self, report: &InductionReport) -> Result<()> {
        for observer in &mut self.observers {
            observer.on_run_end(report)?;
        }
        Ok(())
    }
}
