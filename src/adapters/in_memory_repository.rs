//! In-memory repository for testing.
//!
//! Stores MessagePack bytes keyed by path, enabling fast tests without any
//! file system I/O.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use serde::{Serialize, de::DeserializeOwned};

use crate::{Result, error::Error, ports::Repository};

/// In-memory repository.
///
/// All clones share the same underlying storage.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use ttt_rules::{
///     adapters::InMemoryRepository,
///     policy::{MoveSet, Policy},
///     ports::Repository,
///     tictactoe::BoardState,
/// };
///
/// let repo = InMemoryRepository::new();
/// let mut policy = Policy::new();
/// policy.insert(BoardState::parse("XX..O")?, MoveSet::single(2));
///
/// repo.save(&policy, Path::new("policy"))?;
/// let loaded: Policy<MoveSet> = repo.load_policy(Path::new("policy"))?;
/// assert_eq!(policy, loaded);
/// # Ok::<(), ttt_rules::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Clear all stored entries.
    pub fn clear(&self) {
        self.storage().clear();
    }

    /// Check if something is stored at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(&Self::key(path))
    }

    fn key(path: &Path) -> String {
        path.to_string_lossy().to_string()
    }

    // A panic while holding the lock cannot leave the map half-written
    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Repository for InMemoryRepository {
    fn save<T: Serialize>(&self, value: &T, path: &Path) -> Result<()> {
        let bytes = rmp_serde::to_vec_named(value).map_err(|e| Error::SerializationContext {
            operation: "serialize for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage().insert(Self::key(path), bytes);
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let storage = self.storage();
        let bytes = storage
            .get(&Self::key(path))
            .ok_or_else(|| Error::InputNotFound {
                path: path.to_path_buf(),
            })?;

        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize from in-memory storage".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        induction::{InductionReport, Rule},
        policy::{MoveSet, Policy},
        tictactoe::{BoardState, Cell, Player},
    };

    fn sample_policy() -> Policy<MoveSet> {
        let mut policy = Policy::new();
        policy.insert(BoardState::parse("XX..O....").unwrap(), MoveSet::single(2));
        policy
    }

    #[test]
    fn test_in_memory_save_and_load() {
        let repo = InMemoryRepository::new();
        let path = Path::new("policy");

        assert_eq!(repo.count(), 0);
        assert!(!repo.contains(path));

        repo.save(&sample_policy(), path).unwrap();
        assert_eq!(repo.count(), 1);
        assert!(repo.contains(path));

        let loaded: Policy<MoveSet> = repo.load(path).unwrap();
        assert_eq!(loaded, sample_policy());
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = InMemoryRepository::new();
        let result: Result<Policy<MoveSet>> = repo.load(Path::new("nonexistent"));
        assert!(matches!(result, Err(Error::InputNotFound { .. })));
    }

    #[test]
    fn test_load_policy_reports_typed_errors() {
        let repo = InMemoryRepository::new();
        let bad_key = Path::new("bad_key");
        let occupied = Path::new("occupied");
        repo.save(
            &std::collections::BTreeMap::from([("XXXX".to_string(), vec![5usize])]),
            bad_key,
        )
        .unwrap();
        repo.save(
            &std::collections::BTreeMap::from([("XX..O....".to_string(), vec![1usize])]),
            occupied,
        )
        .unwrap();

        assert!(matches!(
            repo.load_policy::<MoveSet>(bad_key),
            Err(Error::InvalidState { .. })
        ));
        assert!(matches!(
            repo.load_policy::<MoveSet>(occupied),
            Err(Error::CorruptPolicy { position: 1, .. })
        ));
    }

    #[test]
    fn test_clear_removes_all() {
        let repo = InMemoryRepository::new();
        repo.save(&sample_policy(), Path::new("p1")).unwrap();
        repo.save(&sample_policy(), Path::new("p2")).unwrap();
        assert_eq!(repo.count(), 2);

        repo.clear();
        assert_eq!(repo.count(), 0);
    }

    #[test]
    fn test_clone_shares_storage() {
        let repo1 = InMemoryRepository::new();
        let repo2 = repo1.clone();

        let report = InductionReport {
            rules: vec![Rule {
                cause_indices: vec![0, 1],
                cause_pattern: vec![Cell::X, Cell::X],
                turn: Player::O,
                target: 2,
                support: 3,
                pass: 1,
            }],
            passes: Vec::new(),
            universe_size: 3,
            initial_pairs: 3,
            unexplained: Vec::new(),
            cancelled: false,
        };
        repo1.save(&report, Path::new("report")).unwrap();

        let loaded: InductionReport = repo2.load(Path::new("report")).unwrap();
        assert_eq!(loaded, report);
        assert_eq!(repo2.count(), 1);
    }
}
