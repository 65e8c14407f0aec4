//! CSV export of classified policies
//!
//! One row per state: the board key followed by the space-separated indices
//! of its winning, drawing and losing moves.

use std::{fs::File, io::Write, path::Path};

use serde::Serialize;

use crate::{
    Result,
    error::Error,
    policy::{MoveClassification, MoveSet, Policy},
};

/// A single row of the CSV export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyCsvRecord {
    pub board: String,
    pub win: String,
    pub draw: String,
    pub lose: String,
}

impl PolicyCsvRecord {
    fn new(board: String, classification: &MoveClassification) -> Self {
        Self {
            board,
            win: join_moves(classification.win),
            draw: join_moves(classification.draw),
            lose: join_moves(classification.lose),
        }
    }
}

fn join_moves(moves: MoveSet) -> String {
    moves
        .iter()
        .map(|pos| pos.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes `board,win,draw,lose` rows in board order
pub struct PolicyCsvExporter;

impl PolicyCsvExporter {
    pub fn records(policy: &Policy<MoveClassification>) -> Vec<PolicyCsvRecord> {
        policy
            .iter()
            .map(|(state, classification)| PolicyCsvRecord::new(state.key(), classification))
            .collect()
    }

    /// Write the policy to any writer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Csv`] if a row cannot be written.
    pub fn write<W: Write>(policy: &Policy<MoveClassification>, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        for record in Self::records(policy) {
            csv.serialize(record)?;
        }
        csv.flush().map_err(|source| Error::Io {
            operation: "flush CSV output".to_string(),
            source,
        })?;
        Ok(())
    }

    /// Write the policy to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn export(policy: &Policy<MoveClassification>, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        Self::write(policy, file)?;
        log::info!("exported {} states to {}", policy.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::BoardState;

    #[test]
    fn rows_list_space_separated_moves() {
        let mut policy = Policy::new();
        policy.insert(
            BoardState::parse("XX..O....").unwrap(),
            MoveClassification {
                win: MoveSet::EMPTY,
                draw: MoveSet::single(2),
                lose: [3, 5, 6, 7, 8].into_iter().collect(),
            },
        );

        let mut out = Vec::new();
        PolicyCsvExporter::write(&policy, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "board,win,draw,lose\nXX..O....,,2,3 5 6 7 8\n");
    }
}
