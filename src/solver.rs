//! Exhaustive minimax policy solver.
//!
//! Both solving modes walk every state reachable from the initial board and
//! evaluate it with one shared [`Evaluator`], so the optimal-set policy and
//! the Win/Draw/Lose policy agree by construction.

pub mod evaluator;

use serde::{Deserialize, Serialize};

pub use evaluator::{BASE, Evaluator, classify_moves, optimal_moves, terminal_score};

use crate::{
    Result,
    policy::{MoveClassification, MoveSet, Policy},
    tictactoe::{BoardState, reachable_states},
};

/// Solver settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Memoize on canonical boards under the eight board symmetries
    pub symmetry: bool,
}

/// Optimal-move sets for every non-terminal state reachable from `initial`.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidState`] if `initial` cannot arise from
/// legal play.
pub fn solve(initial: &BoardState, config: &SolverConfig) -> Result<Policy<MoveSet>> {
    solve_with(initial, config, optimal_moves)
}

/// Win/Draw/Lose classification of every legal move of every non-terminal
/// state reachable from `initial`.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidState`] if `initial` cannot arise from
/// legal play.
pub fn solve_classified(
    initial: &BoardState,
    config: &SolverConfig,
) -> Result<Policy<MoveClassification>> {
    solve_with(initial, config, classify_moves)
}

fn solve_with<T>(
    initial: &BoardState,
    config: &SolverConfig,
    entry: fn(&mut Evaluator, &BoardState) -> T,
) -> Result<Policy<T>> {
    initial.validate(&initial.key())?;

    let mut evaluator = Evaluator::new(config.symmetry);
    let policy: Policy<T> = reachable_states(*initial)
        .into_iter()
        .filter(|state| !state.is_terminal())
        .map(|state| (state, entry(&mut evaluator, &state)))
        .collect();

    log::info!(
        "solved {} states from {} (symmetry: {}, memo: {})",
        policy.len(),
        initial.key(),
        config.symmetry,
        evaluator.memo_len()
    );
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_policy_covers_non_terminal_states() {
        let policy = solve(&BoardState::new(), &SolverConfig::default()).unwrap();
        // 5478 reachable states, 958 of them terminal
        assert_eq!(policy.len(), 4520);
        assert!(policy.states().all(|state| !state.is_terminal()));
    }

    #[test]
    fn empty_board_every_cell_is_optimal() {
        let policy = solve(&BoardState::new(), &SolverConfig::default()).unwrap();
        let all: MoveSet = (0..9).collect();
        assert_eq!(policy.get(&BoardState::new()), Some(&all));
    }

    #[test]
    fn symmetry_reduction_yields_the_same_policy() {
        let plain = solve(&BoardState::new(), &SolverConfig { symmetry: false }).unwrap();
        let reduced = solve(&BoardState::new(), &SolverConfig { symmetry: true }).unwrap();
        assert_eq!(plain, reduced);
    }

    #[test]
    fn classified_and_optimal_modes_agree() {
        let config = SolverConfig::default();
        let optimal = solve(&BoardState::new(), &config).unwrap();
        let classified = solve_classified(&BoardState::new(), &config).unwrap();
        assert_eq!(optimal.len(), classified.len());

        for (state, moves) in optimal.iter() {
            let classification = classified.get(state).unwrap();
            assert_eq!(classification.all(), MoveSet::empty_cells(state));
            if !classification.win.is_empty() {
                assert!(moves.is_subset(classification.win));
            } else if !classification.draw.is_empty() {
                assert_eq!(*moves, classification.draw);
            } else {
                assert!(moves.is_empty());
            }
        }
    }

    #[test]
    fn solving_from_a_midgame_root() {
        let root = BoardState::parse("XX..O....").unwrap();
        let policy = solve(&root, &SolverConfig::default()).unwrap();
        assert_eq!(policy.get(&root), Some(&MoveSet::single(2)));
        assert!(policy.get(&BoardState::new()).is_none());
    }

    #[test]
    fn invalid_root_is_rejected() {
        let mut root = BoardState::new();
        root.to_move = crate::tictactoe::Player::O;
        assert!(matches!(
            solve(&root, &SolverConfig::default()),
            Err(crate::Error::InvalidState { .. })
        ));
    }
}
