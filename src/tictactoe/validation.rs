//! Board state validation logic

use super::{
    WINNING_LINES,
    board::{BoardState, Player},
};

impl BoardState {
    /// Check if the board state could arise from legal play.
    ///
    /// Piece counts must differ by at most one, the recorded turn must match
    /// the counts, at most one player may have a line, the winner must have
    /// moved last, and multiple winning lines must share a cell.
    pub fn is_valid(&self) -> bool {
        self.invalid_reason().is_none()
    }

    /// Validate the state, naming the offending key on failure.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidState`] describing the first violated rule.
    pub fn validate(&self, key: &str) -> Result<(), crate::Error> {
        match self.invalid_reason() {
            None => Ok(()),
            Some(reason) => Err(crate::Error::InvalidState {
                key: key.to_string(),
                reason,
            }),
        }
    }

    fn invalid_reason(&self) -> Option<String> {
        let count = Self::count_pieces(&self.cells);

        if count.x.abs_diff(count.o) > 1 {
            return Some(format!(
                "piece counts must differ by at most 1 (X={}, O={})",
                count.x, count.o
            ));
        }

        let turn_matches = match self.to_move {
            Player::X => count.x == count.o || count.o == count.x + 1,
            Player::O => count.x == count.o + 1,
        };
        if !turn_matches {
            return Some(format!(
                "piece counts (X={}, O={}) are inconsistent with {} to move",
                count.x, count.o, self.to_move
            ));
        }

        let x_wins = self.has_won(Player::X);
        let o_wins = self.has_won(Player::O);

        if x_wins && o_wins {
            return Some("both players cannot have winning lines".to_string());
        }

        for (wins, player) in [(x_wins, Player::X), (o_wins, Player::O)] {
            if !wins {
                continue;
            }
            if self.to_move != player.opponent() {
                return Some(format!("{player} won but did not move last"));
            }
            if !self.winning_lines_share_cell(player) {
                return Some(format!("{player} holds winning lines that share no cell"));
            }
        }

        None
    }

    /// Check if all winning lines for a player share at least one cell.
    /// Several lines can only be completed by a single move through a common cell.
    pub fn winning_lines_share_cell(&self, player: Player) -> bool {
        let cell = player.to_cell();
        let winning_lines: Vec<&[usize; 3]> = WINNING_LINES
            .iter()
            .filter(|line| line.iter().all(|&idx| self.cells[idx] == cell))
            .collect();

        if winning_lines.len() < 2 {
            return true;
        }

        (0..9).any(|pos| winning_lines.iter().all(|line| line.contains(&pos)))
    }
}
