//! Adapters implementing domain ports.
//!
//! Infrastructure implementations of the traits defined in the ports module,
//! plus selection of a file format from a path's extension.

pub mod in_memory_repository;
pub mod json_repository;
pub mod msgpack_repository;

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

pub use in_memory_repository::InMemoryRepository;
pub use json_repository::JsonRepository;
pub use msgpack_repository::MsgPackRepository;

use crate::{
    Result,
    policy::{Policy, PolicyEntry},
    ports::Repository,
};

/// On-disk format chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    MsgPack,
}

impl FileFormat {
    /// `.msgpack` and `.mpk` select MessagePack; anything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("msgpack" | "mpk") => FileFormat::MsgPack,
            _ => FileFormat::Json,
        }
    }
}

/// Save through the repository matching the path's extension.
///
/// # Errors
///
/// See [`Repository::save`].
pub fn save_file<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    match FileFormat::from_path(path) {
        FileFormat::Json => JsonRepository.save(value, path),
        FileFormat::MsgPack => MsgPackRepository.save(value, path),
    }
}

/// Load through the repository matching the path's extension.
///
/// # Errors
///
/// See [`Repository::load`].
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    match FileFormat::from_path(path) {
        FileFormat::Json => JsonRepository.load(path),
        FileFormat::MsgPack => MsgPackRepository.load(path),
    }
}

/// Load a policy table through the repository matching the path's extension.
///
/// # Errors
///
/// See [`Repository::load_policy`].
pub fn load_policy_file<T: DeserializeOwned + PolicyEntry>(path: &Path) -> Result<Policy<T>> {
    match FileFormat::from_path(path) {
        FileFormat::Json => JsonRepository.load_policy(path),
        FileFormat::MsgPack => MsgPackRepository.load_policy(path),
    }
}
