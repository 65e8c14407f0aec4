//! Subcommands of the `ttt-rules` binary

pub mod pipeline;
pub mod solve;
pub mod topology;

use anyhow::{Context, Result};

use crate::tictactoe::BoardState;

/// Parse the `--initial` board, defaulting to the empty board.
pub(crate) fn parse_initial(key: Option<&str>) -> Result<BoardState> {
    let Some(key) = key else {
        return Ok(BoardState::new());
    };
    let state = BoardState::parse(key).with_context(|| format!("invalid --initial board '{key}'"))?;
    state.validate(key)?;
    Ok(state)
}
