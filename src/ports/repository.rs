//! Repository port for policy and rule persistence.
//!
//! This module defines the trait boundary between the domain and the storage
//! formats used for solved policies and induction reports.

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Result,
    policy::{Policy, PolicyEntry},
};

/// Port for persisting and loading serializable artifacts such as
/// [`Policy`](crate::policy::Policy) tables and induction reports.
///
/// [`Repository::load_policy`] runs key and integrity validation on the
/// stored table and reports failures as typed errors.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use ttt_rules::{
///     adapters::JsonRepository,
///     policy::{MoveSet, Policy},
///     ports::Repository,
/// };
///
/// let repo = JsonRepository::new();
/// let policy: Policy<MoveSet> = repo.load_policy(Path::new("policy.json"))?;
/// repo.save(&policy, Path::new("copy.json"))?;
/// # Ok::<(), ttt_rules::Error>(())
/// ```
pub trait Repository {
    /// Save a value to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path cannot be created or written to
    /// - Serialization fails
    fn save<T: Serialize>(&self, value: &T, path: &Path) -> Result<()>;

    /// Load a value from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Nothing is stored at `path` ([`crate::Error::InputNotFound`])
    /// - The stored data is malformed or fails validation
    fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T>;

    /// Load a policy table keyed by board strings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Nothing is stored at `path` ([`crate::Error::InputNotFound`])
    /// - A key is malformed or names an impossible board
    ///   ([`crate::Error::InvalidState`])
    /// - An entry names an occupied cell ([`crate::Error::CorruptPolicy`])
    fn load_policy<T: DeserializeOwned + PolicyEntry>(&self, path: &Path) -> Result<Policy<T>> {
        Policy::from_keyed(self.load(path)?)
    }
}
