//! JSON implementation of the repository port.

use std::{
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::Path,
};

use serde::{Serialize, de::DeserializeOwned};

use crate::{Result, error::Error, ports::Repository};

/// Pretty-printed JSON repository, the default interchange format for
/// policy tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRepository;

impl JsonRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Repository for JsonRepository {
    fn save<T: Serialize>(&self, value: &T, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("write file {path:?}"),
            source,
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

        serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::SerializationContext {
            operation: format!("deserialize JSON from {path:?}"),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        policy::{MoveClassification, MoveSet, Policy},
        tictactoe::BoardState,
    };

    #[test]
    fn classified_policy_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("classified.json");

        let mut policy = Policy::new();
        policy.insert(
            BoardState::parse("XX..O....").unwrap(),
            MoveClassification {
                win: MoveSet::EMPTY,
                draw: MoveSet::single(2),
                lose: [3, 5, 6, 7, 8].into_iter().collect(),
            },
        );

        let repo = JsonRepository::new();
        repo.save(&policy, &path).unwrap();
        let loaded: Policy<MoveClassification> = repo.load_policy(&path).unwrap();
        assert_eq!(policy, loaded);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"XX..O....\""));
        assert!(text.contains("\"draw\""));
    }

    #[test]
    fn corrupt_policy_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrupt.json");
        std::fs::write(&path, r#"{"XX..O....": [0]}"#).unwrap();

        let result: Result<Policy<MoveSet>> = JsonRepository::new().load_policy(&path);
        assert!(matches!(
            result,
            Err(Error::CorruptPolicy { ref key, position: 0 }) if key == "XX..O...."
        ));
    }

    #[test]
    fn missing_file_is_input_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");
        assert!(matches!(
            JsonRepository::new().load::<Policy<MoveSet>>(&path),
            Err(Error::InputNotFound { .. })
        ));
    }
}
