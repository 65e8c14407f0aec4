//! Exhaustive Tic-Tac-Toe policy solving and causal rule induction
//!
//! This crate provides:
//! - Tic-Tac-Toe board model with validation and D4 symmetry
//! - Exhaustive minimax solver producing optimal-move and Win/Draw/Lose policies
//! - Induction of minimal `(cause pattern, turn) -> move` rules from a policy
//! - Line-topology classification of causes against target moves
//! - JSON, MessagePack and CSV persistence, and the `ttt-rules` CLI

pub mod adapters;
pub mod cli;
pub mod error;
pub mod export;
pub mod induction;
pub mod pipeline;
pub mod policy;
pub mod ports;
pub mod solver;
pub mod tictactoe;
pub mod topology;

pub use error::{Error, Result};
pub use induction::{InductionConfig, InductionReport, Rule, RuleInduction, induce};
pub use policy::{MoveClassification, MoveSet, Policy};
pub use solver::{SolverConfig, solve, solve_classified};
pub use tictactoe::{BoardState, Cell, Player};
