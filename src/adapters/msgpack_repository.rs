//! MessagePack implementation of the repository port.
//!
//! Uses rmp_serde for compact binary serialization.

use std::{fs::File, io::ErrorKind, path::Path};

use serde::{Serialize, de::DeserializeOwned};

use crate::{Result, error::Error, ports::Repository};

/// MessagePack-based repository.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use ttt_rules::{
///     adapters::MsgPackRepository,
///     policy::{MoveSet, Policy},
///     ports::Repository,
///     solver::{SolverConfig, solve},
///     tictactoe::BoardState,
/// };
///
/// let repo = MsgPackRepository;
/// let policy = solve(&BoardState::new(), &SolverConfig::default())?;
///
/// repo.save(&policy, Path::new("policy.msgpack"))?;
/// let loaded: Policy<MoveSet> = repo.load_policy(Path::new("policy.msgpack"))?;
/// # Ok::<(), ttt_rules::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl Repository for MsgPackRepository {
    fn save<T: Serialize>(&self, value: &T, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;

        // Maps keep their string keys so policies stay self-describing
        rmp_serde::encode::write_named(&mut file, value).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let file = File::open(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => Error::InputNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Io {
                operation: format!("open file {path:?}"),
                source,
            },
        })?;

        rmp_serde::decode::from_read(&file).map_err(|e| Error::SerializationContext {
            operation: format!("deserialize MessagePack from {path:?}"),
            message: e.to_string(),
        })
    }
}
