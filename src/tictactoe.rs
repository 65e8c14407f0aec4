//! Tic-Tac-Toe board model

pub mod board;
pub mod lines;
pub mod reachable;
pub mod symmetry;
pub mod validation;

pub use board::{BoardState, CanonicalContext, Cell, Player};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use reachable::{collect_reachable_canonical_labels, reachable_states};
pub use symmetry::D4Transform;
