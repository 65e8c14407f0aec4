//! Winning line analysis for Tic-Tac-Toe

use std::collections::BTreeSet;

use super::{Cell, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has won by having three in a row
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// Find all positions that would immediately win for the player
    pub fn winning_moves(cells: &[Cell; 9], player: Player) -> BTreeSet<usize> {
        WINNING_LINES
            .iter()
            .filter_map(|line| Self::winning_move_in_line(cells, player, line))
            .collect()
    }

    /// Empty cells where the player would create two or more distinct
    /// immediate winning threats at once
    pub fn fork_moves(cells: &[Cell; 9], player: Player) -> BTreeSet<usize> {
        (0..9)
            .filter(|&pos| cells[pos] == Cell::Empty)
            .filter(|&pos| {
                let mut next = *cells;
                next[pos] = player.to_cell();
                Self::winning_moves(&next, player).len() >= 2
            })
            .collect()
    }

    /// Lines passing through a position
    pub fn lines_through(pos: usize) -> impl Iterator<Item = &'static [usize; 3]> {
        WINNING_LINES.iter().filter(move |line| line.contains(&pos))
    }

    /// Number of lines containing both positions
    pub fn shared_line_count(a: usize, b: usize) -> usize {
        WINNING_LINES
            .iter()
            .filter(|line| line.contains(&a) && line.contains(&b))
            .count()
    }

    /// Lines that contain every one of the given positions
    pub fn lines_containing(positions: &[usize]) -> Vec<&'static [usize; 3]> {
        WINNING_LINES
            .iter()
            .filter(|line| positions.iter().all(|pos| line.contains(pos)))
            .collect()
    }

    /// Find the winning move position in a specific line, if one exists
    fn winning_move_in_line(cells: &[Cell; 9], player: Player, line: &[usize; 3]) -> Option<usize> {
        let target = player.to_cell();
        let mut count = 0;
        let mut empty_pos = None;

        for &idx in line {
            match cells[idx] {
                Cell::Empty => {
                    if empty_pos.is_some() {
                        return None;
                    }
                    empty_pos = Some(idx);
                }
                c if c == target => count += 1,
                _ => return None,
            }
        }

        if count == 2 { empty_pos } else { None }
    }
}
