//! Shared configuration types for CLI commands

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    adapters::JsonRepository,
    induction::InductionConfig,
    ports::Repository,
    solver::SolverConfig,
};

/// Configuration of the `pipeline` command, loadable from a JSON file.
///
/// Every section and field is optional in the file; missing values take
/// their defaults. Command-line flags override file values.
///
/// ```json
/// {
///   "solver": { "symmetry": true },
///   "induction": { "max_cause_size": 2, "min_support": 3, "parallel": true },
///   "progress": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub solver: SolverConfig,
    pub induction: InductionConfig,
    /// Whether to show a progress spinner
    pub progress: bool,
}

impl PipelineConfig {
    /// Load from a JSON file and validate.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InputNotFound`] for a missing file, a
    /// serialization error for malformed JSON and
    /// [`crate::Error::InvalidConfiguration`] for out-of-range values.
    pub fn load(path: &Path) -> Result<Self> {
        let config: PipelineConfig = JsonRepository::new().load(path)?;
        config.induction.validate()?;
        Ok(config)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            induction: InductionConfig::default(),
            progress: true,
        }
    }
}
