//! Observer implementations for induction runs
//!
//! Observers allow progress display and pass logging without coupling the
//! induction engine to a terminal or an output format.

use std::{
    fs::File,
    io::{BufWriter, Write},
    ops::ControlFlow,
    path::Path,
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Result,
    induction::{InductionReport, PassSummary},
    ports::InductionObserver,
};

/// Spinner observer - Shows the current cause size, pass and pairs left
pub struct ProgressObserver {
    spinner: Option<ProgressBar>,
    initial_pairs: usize,
    rules: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            spinner: None,
            initial_pairs: 0,
            rules: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl InductionObserver for ProgressObserver {
    fn on_run_start(&mut self, _universe_size: usize, initial_pairs: usize) -> Result<()> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?,
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message(format!("inducing rules ({initial_pairs} pairs)"));
        self.initial_pairs = initial_pairs;
        self.spinner = Some(spinner);
        Ok(())
    }

    fn on_pass_end(&mut self, summary: &PassSummary) -> Result<ControlFlow<()>> {
        self.rules += summary.accepted;
        if let Some(spinner) = &self.spinner {
            spinner.set_message(format!(
                "k={} pass {}: {} rules, {}/{} pairs left",
                summary.cause_size,
                summary.pass,
                self.rules,
                summary.remaining_pairs,
                self.initial_pairs
            ));
        }
        Ok(ControlFlow::Continue(()))
    }

    fn on_run_end(&mut self, report: &InductionReport) -> Result<()> {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!(
                "{} rules, {:.1}% coverage",
                report.rules.len(),
                report.coverage() * 100.0
            ));
        }
        Ok(())
    }
}

/// JSONL observer - Writes one [`PassSummary`] per line
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl InductionObserver for JsonlObserver {
    fn on_pass_end(&mut self, summary: &PassSummary) -> Result<ControlFlow<()>> {
        serde_json::to_writer(&mut self.writer, summary)?;
        writeln!(self.writer)?;
        Ok(ControlFlow::Continue(()))
    }

    fn on_run_end(&mut self, _report: &InductionReport) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Stops the run once a pass count is reached
pub struct PassLimitObserver {
    limit: usize,
    seen: usize,
}

impl PassLimitObserver {
    pub fn new(limit: usize) -> Self {
        Self { limit, seen: 0 }
    }
}

impl InductionObserver for PassLimitObserver {
    fn on_pass_end(&mut self, _summary: &PassSummary) -> Result<ControlFlow<()>> {
        self.seen += 1;
        if self.seen >= self.limit {
            Ok(ControlFlow::Break(()))
        } else {
            Ok(ControlFlow::Continue(()))
        }
    }
}
