//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{lines::LineAnalyzer, symmetry::D4Transform};

/// Number of cells on the board
pub const CELL_COUNT: usize = 9;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// Marks are case-insensitive; `.` and space are blanks.
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }

    /// Base-3 digit used for compact board codes
    pub fn code(self) -> u32 {
        match self {
            Cell::Empty => 0,
            Cell::X => 1,
            Cell::O => 2,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A player in the game. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// Complete board state including cells and whose turn it is
///
/// `Copy` so that search code can pass immutable snapshots by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: [Cell; 9],
    pub to_move: Player,
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceCount {
    pub x: usize,
    pub o: usize,
    pub empty: usize,
}

/// Cached result of canonicalization for efficient repeated operations.
#[derive(Debug, Clone)]
pub struct CanonicalContext {
    /// The canonical board state
    pub state: BoardState,
    /// The transform that maps the original state to the canonical state
    pub transform: D4Transform,
    /// The string encoding of the canonical state
    pub encoding: String,
}

impl CanonicalContext {
    /// Map a move from original coordinates to canonical coordinates
    pub fn map_move_to_canonical(&self, original_move: usize) -> usize {
        self.transform.transform_position(original_move)
    }

    /// Map a move from canonical coordinates back to original coordinates
    pub fn map_canonical_to_original(&self, canonical_move: usize) -> usize {
        self.transform.apply_inverse_to_pos(canonical_move)
    }
}

impl BoardState {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        BoardState {
            cells: [Cell::Empty; 9],
            to_move: Player::X,
        }
    }

    /// Build a board from cells, deriving the player to move from the piece
    /// counts: the player with strictly fewer marks moves, X on a tie.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPieceCounts`] when the counts differ by
    /// more than one.
    pub fn from_cells(cells: [Cell; 9]) -> Result<Self, crate::Error> {
        let count = Self::count_pieces(&cells);
        let to_move = Self::determine_turn_from_counts(&count)?;
        Ok(BoardState { cells, to_move })
    }

    /// Parse a policy-table key: one character per cell.
    ///
    /// Keys shorter than nine characters are right-padded with blanks, so
    /// `"XX..O"` and `"XX..O...."` denote the same board.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The key is longer than nine characters
    /// - Any character is not a valid cell representation
    /// - The piece counts differ by more than one
    pub fn parse(key: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = key.chars().collect();
        if chars.len() > CELL_COUNT {
            return Err(crate::Error::InvalidBoardLength {
                expected: CELL_COUNT,
                got: chars.len(),
                context: key.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: key.to_string(),
            })?;
        }

        Self::from_cells(cells)
    }

    /// Count pieces on the board.
    pub fn count_pieces(cells: &[Cell; 9]) -> PieceCount {
        let mut count = PieceCount {
            x: 0,
            o: 0,
            empty: 0,
        };
        for cell in cells {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => count.empty += 1,
            }
        }
        count
    }

    fn determine_turn_from_counts(count: &PieceCount) -> Result<Player, crate::Error> {
        if count.x == count.o || count.x + 1 == count.o {
            Ok(Player::X)
        } else if count.x == count.o + 1 {
            Ok(Player::O)
        } else {
            Err(crate::Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            })
        }
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        let count = Self::count_pieces(&self.cells);
        count.x + count.o
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Get all empty positions in ascending order
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Positions holding the given player's marks
    pub fn positions_of(&self, player: Player) -> Vec<usize> {
        let target = player.to_cell();
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == target)
            .map(|(i, _)| i)
            .collect()
    }

    /// Make a move and return a new board state
    #[must_use = "make_move returns a new board state; the original is unchanged"]
    pub fn make_move(&self, pos: usize) -> Result<BoardState, crate::Error> {
        if pos >= CELL_COUNT {
            return Err(crate::Error::InvalidPosition { position: pos });
        }

        if !self.is_empty(pos) {
            return Err(crate::Error::InvalidMove { position: pos });
        }

        let mut new_state = *self;
        new_state.cells[pos] = self.to_move.to_cell();
        new_state.to_move = self.to_move.opponent();
        Ok(new_state)
    }

    /// Get legal moves in this position (empty cells when game not terminal)
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.empty_positions()
    }

    /// Check if a player has won
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.has_won(Player::X) || self.has_won(Player::O) || !self.cells.contains(&Cell::Empty)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::X) {
            Some(Player::X)
        } else if self.has_won(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// The nine-character cell string used as a policy-table key
    pub fn key(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }

    /// Key with the player to move appended, e.g. `XO......._X`
    pub fn encode(&self) -> String {
        format!("{}_{}", self.key(), self.to_move)
    }

    /// Compact integer code: base-3 cells followed by the turn bit
    pub fn code(&self) -> u32 {
        let cells = self
            .cells
            .iter()
            .fold(0u32, |acc, &cell| acc * 3 + cell.code());
        cells * 2
            + match self.to_move {
                Player::X => 0,
                Player::O => 1,
            }
    }

    /// Find the canonical form by searching through all D4 transforms.
    ///
    /// The canonical form is the lexicographically minimal encoding; ties keep
    /// the first transform in [`D4Transform::all`] order.
    pub fn canonical_context(&self) -> CanonicalContext {
        let mut best_state = *self;
        let mut best_transform = D4Transform::identity();
        let mut best_encoding = self.encode();

        for transform in D4Transform::all() {
            let transformed = self.transform(&transform);
            let encoding = transformed.encode();
            if encoding < best_encoding {
                best_encoding = encoding;
                best_state = transformed;
                best_transform = transform;
            }
        }

        CanonicalContext {
            state: best_state,
            transform: best_transform,
            encoding: best_encoding,
        }
    }

    /// Get the canonical (lexicographically minimal) form under D4 symmetry
    pub fn canonical(&self) -> Self {
        self.canonical_context().state
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1) % 3 == 0 && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
