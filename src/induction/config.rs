//! Configuration for rule induction runs.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Largest cause size that leaves room for a target cell
pub const MAX_CAUSE_LIMIT: usize = 8;

/// Configuration for a [`RuleInduction`](super::RuleInduction) run.
///
/// # Examples
///
/// ```
/// use ttt_rules::induction::InductionConfig;
///
/// let config = InductionConfig::default()
///     .with_max_cause_size(2)
///     .with_min_support(3)
///     .sequential();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InductionConfig {
    /// Largest number of cause cells tried
    pub max_cause_size: usize,
    /// Minimum number of evidence states for a rule
    pub min_support: usize,
    /// Evaluate combinations of a pass on the rayon thread pool
    pub parallel: bool,
}

impl InductionConfig {
    /// Set the largest cause size.
    pub fn with_max_cause_size(mut self, max_cause_size: usize) -> Self {
        self.max_cause_size = max_cause_size;
        self
    }

    /// Set the minimum evidence count.
    pub fn with_min_support(mut self, min_support: usize) -> Self {
        self.min_support = min_support;
        self
    }

    /// Evaluate every pass on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when `max_cause_size` is
    /// outside `1..=8` or `min_support` is zero.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_CAUSE_LIMIT).contains(&self.max_cause_size) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "max_cause_size must be between 1 and {MAX_CAUSE_LIMIT}, got {}",
                    self.max_cause_size
                ),
            });
        }
        if self.min_support == 0 {
            return Err(Error::InvalidConfiguration {
                message: "min_support must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for InductionConfig {
    fn default() -> Self {
        Self {
            max_cause_size: 3,
            min_support: 2,
            parallel: true,
        }
    }
}
