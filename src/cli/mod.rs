//! CLI infrastructure for the rule induction toolkit
//!
//! This module provides the command-line interface for solving policies,
//! inducing rules from them and tallying their geometry.

pub mod commands;
pub mod config;
pub mod output;
