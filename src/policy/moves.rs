//! Compact move sets and outcome classifications

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::{BoardState, D4Transform, board::CELL_COUNT};

/// A set of board positions stored as a 9-bit mask.
///
/// Serialized as an ascending list of indices, e.g. `[0, 4, 8]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "Vec<usize>", try_from = "Vec<usize>")]
pub struct MoveSet(u16);

impl MoveSet {
    /// The empty set
    pub const EMPTY: MoveSet = MoveSet(0);

    /// Set of a single position
    pub fn single(pos: usize) -> Self {
        debug_assert!(pos < CELL_COUNT);
        MoveSet(1 << pos)
    }

    /// All empty cells of a board
    pub fn empty_cells(state: &BoardState) -> Self {
        state.empty_positions().into_iter().collect()
    }

    pub fn contains(self, pos: usize) -> bool {
        pos < CELL_COUNT && self.0 & (1 << pos) != 0
    }

    pub fn insert(&mut self, pos: usize) {
        debug_assert!(pos < CELL_COUNT);
        self.0 |= 1 << pos;
    }

    pub fn remove(&mut self, pos: usize) {
        self.0 &= !(1 << pos);
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_subset(self, other: MoveSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn union(self, other: MoveSet) -> MoveSet {
        MoveSet(self.0 | other.0)
    }

    /// Positions in ascending order
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..CELL_COUNT).filter(move |&pos| self.contains(pos))
    }

    /// Image of the set under a board symmetry
    pub fn transform(self, t: &D4Transform) -> MoveSet {
        self.iter().map(|pos| t.transform_position(pos)).collect()
    }
}

impl FromIterator<usize> for MoveSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = MoveSet::EMPTY;
        for pos in iter {
            set.insert(pos);
        }
        set
    }
}

impl From<MoveSet> for Vec<usize> {
    fn from(set: MoveSet) -> Self {
        set.iter().collect()
    }
}

impl TryFrom<Vec<usize>> for MoveSet {
    type Error = crate::Error;

    fn try_from(positions: Vec<usize>) -> Result<Self, Self::Error> {
        if let Some(&position) = positions.iter().find(|&&pos| pos >= CELL_COUNT) {
            return Err(crate::Error::InvalidPosition { position });
        }
        Ok(positions.into_iter().collect())
    }
}

impl fmt::Display for MoveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, pos) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{pos}")?;
        }
        write!(f, "}}")
    }
}

/// Outcome bucket of a move from the mover's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OutcomeCategory {
    Win,
    Draw,
    Lose,
}

impl OutcomeCategory {
    pub const ALL: [OutcomeCategory; 3] = [
        OutcomeCategory::Win,
        OutcomeCategory::Draw,
        OutcomeCategory::Lose,
    ];

    /// Bucket a minimax score taken from the mover's perspective
    pub fn from_score(score: i32) -> Self {
        match score.signum() {
            1 => OutcomeCategory::Win,
            0 => OutcomeCategory::Draw,
            _ => OutcomeCategory::Lose,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeCategory::Win => "Win",
            OutcomeCategory::Draw => "Draw",
            OutcomeCategory::Lose => "Lose",
        }
    }
}

impl fmt::Display for OutcomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Win/Draw/Lose partition of every legal move of a state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveClassification {
    pub win: MoveSet,
    pub draw: MoveSet,
    pub lose: MoveSet,
}

impl MoveClassification {
    /// Moves in one outcome bucket
    pub fn category(&self, category: OutcomeCategory) -> MoveSet {
        match category {
            OutcomeCategory::Win => self.win,
            OutcomeCategory::Draw => self.draw,
            OutcomeCategory::Lose => self.lose,
        }
    }

    /// Add a move to the bucket its score falls in
    pub fn record(&mut self, pos: usize, score: i32) {
        match OutcomeCategory::from_score(score) {
            OutcomeCategory::Win => self.win.insert(pos),
            OutcomeCategory::Draw => self.draw.insert(pos),
            OutcomeCategory::Lose => self.lose.insert(pos),
        }
    }

    /// Every classified move
    pub fn all(&self) -> MoveSet {
        self.win.union(self.draw).union(self.lose)
    }
}
