//! Board-keyed policy tables

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::moves::{MoveClassification, MoveSet};
use crate::tictactoe::BoardState;

/// Value stored per state in a [`Policy`].
pub trait PolicyEntry {
    /// Every cell the entry names as a move
    fn referenced_moves(&self) -> MoveSet;
}

impl PolicyEntry for MoveSet {
    fn referenced_moves(&self) -> MoveSet {
        *self
    }
}

impl PolicyEntry for MoveClassification {
    fn referenced_moves(&self) -> MoveSet {
        self.all()
    }
}

/// Mapping from board state to a per-state entry, ordered by board.
///
/// On disk the keys are nine-character cell strings (`"XX..O...."`); loading
/// normalizes short keys, rejects malformed or unreachable-looking boards and
/// entries that name occupied cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy<T> {
    entries: BTreeMap<BoardState, T>,
}

impl<T> Policy<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, state: BoardState, entry: T) -> Option<T> {
        self.entries.insert(state, entry)
    }

    pub fn get(&self, state: &BoardState) -> Option<&T> {
        self.entries.get(state)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in board order
    pub fn iter(&self) -> impl Iterator<Item = (&BoardState, &T)> {
        self.entries.iter()
    }

    pub fn states(&self) -> impl Iterator<Item = &BoardState> {
        self.entries.keys()
    }

    /// Apply `f` to every entry, keeping the keys.
    pub fn map<U>(&self, mut f: impl FnMut(&BoardState, &T) -> U) -> Policy<U> {
        Policy {
            entries: self
                .entries
                .iter()
                .map(|(state, entry)| (*state, f(state, entry)))
                .collect(),
        }
    }
}

impl<T: PolicyEntry> Policy<T> {
    /// Build a policy from raw string keys.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::InvalidState`] when a key does not parse or describes
    ///   a board that legal play cannot produce, or two keys normalize to the
    ///   same board
    /// - [`crate::Error::CorruptPolicy`] when an entry names an occupied cell
    pub fn from_keyed(raw: BTreeMap<String, T>) -> crate::Result<Self> {
        let mut entries = BTreeMap::new();
        for (key, entry) in raw {
            let state = BoardState::parse(&key).map_err(|e| crate::Error::InvalidState {
                key: key.clone(),
                reason: e.to_string(),
            })?;
            state.validate(&key)?;
            check_entry(&key, &state, &entry)?;
            if entries.insert(state, entry).is_some() {
                return Err(crate::Error::InvalidState {
                    key,
                    reason: "duplicate board after normalization".to_string(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Check that every entry only names empty cells of its board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::CorruptPolicy`] for the first offending entry.
    pub fn check_integrity(&self) -> crate::Result<()> {
        for (state, entry) in &self.entries {
            check_entry(&state.key(), state, entry)?;
        }
        Ok(())
    }
}

fn check_entry<T: PolicyEntry>(key: &str, state: &BoardState, entry: &T) -> crate::Result<()> {
    let empty = MoveSet::empty_cells(state);
    match entry.referenced_moves().iter().find(|&pos| !empty.contains(pos)) {
        Some(position) => Err(crate::Error::CorruptPolicy {
            key: key.to_string(),
            position,
        }),
        None => Ok(()),
    }
}

impl<T> Default for Policy<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(BoardState, T)> for Policy<T> {
    fn from_iter<I: IntoIterator<Item = (BoardState, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<T: Serialize> Serialize for Policy<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(state, entry)| (state.key(), entry)))
    }
}

impl<'de, T> Deserialize<'de> for Policy<T>
where
    T: Deserialize<'de> + PolicyEntry,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, T>::deserialize(deserializer)?;
        Policy::from_keyed(raw).map_err(serde::de::Error::custom)
    }
}
