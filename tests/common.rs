//! Common test utilities for the ttt-rules test suite.

use std::sync::OnceLock;

use rand::{Rng, SeedableRng, rngs::StdRng};
use ttt_rules::{
    policy::{MoveClassification, MoveSet, Policy},
    solver::{SolverConfig, solve, solve_classified},
    tictactoe::BoardState,
};

/// Optimal-move policy of the full game, solved once per test binary.
pub fn full_policy() -> &'static Policy<MoveSet> {
    static POLICY: OnceLock<Policy<MoveSet>> = OnceLock::new();
    POLICY.get_or_init(|| solve(&BoardState::new(), &SolverConfig::default()).unwrap())
}

/// Win/Draw/Lose policy of the full game, solved once per test binary.
#[allow(dead_code)]
pub fn full_classified_policy() -> &'static Policy<MoveClassification> {
    static POLICY: OnceLock<Policy<MoveClassification>> = OnceLock::new();
    POLICY.get_or_init(|| solve_classified(&BoardState::new(), &SolverConfig::default()).unwrap())
}

/// Non-terminal states visited by random games from the empty board.
#[allow(dead_code)]
pub fn random_playout_states(seed: u64, games: usize) -> Vec<BoardState> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut states = Vec::new();
    for _ in 0..games {
        let mut state = BoardState::new();
        while !state.is_terminal() {
            states.push(state);
            let moves = state.legal_moves();
            let pos = moves[rng.random_range(0..moves.len())];
            state = state.make_move(pos).unwrap();
        }
    }
    states
}

/// Build a move set from a list of positions.
#[allow(dead_code)]
pub fn moves(positions: &[usize]) -> MoveSet {
    positions.iter().copied().collect()
}
