//! Enumeration of the states reachable by legal play

use std::collections::{BTreeSet, HashSet, VecDeque};

use super::board::BoardState;

/// Every state reachable from `root` by legal play, terminal states included,
/// in breadth-first discovery order.
pub fn reachable_states(root: BoardState) -> Vec<BoardState> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    let mut states = Vec::new();

    visited.insert(root.code());
    queue.push_back(root);

    while let Some(state) = queue.pop_front() {
        states.push(state);

        for pos in state.legal_moves() {
            let Ok(next) = state.make_move(pos) else {
                continue;
            };
            if visited.insert(next.code()) {
                queue.push_back(next);
            }
        }
    }

    states
}

/// Collect canonical state labels reachable from the standard starting position
/// (empty board with X to move), under D4 symmetry reduction.
///
/// This corresponds to the classic 765-canonical-state enumeration.
pub fn collect_reachable_canonical_labels() -> Vec<String> {
    reachable_states(BoardState::new())
        .iter()
        .map(|state| state.canonical_context().encoding)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reachable_state_count_matches_expected() {
        let states = reachable_states(BoardState::new());
        assert_eq!(states.len(), 5478);
        assert!(states.iter().all(|s| s.is_valid()));
    }

    #[test]
    fn reachable_canonical_labels_match_expected() {
        assert_eq!(collect_reachable_canonical_labels().len(), 765);
    }

    #[test]
    fn terminal_root_has_no_successors() {
        let won = BoardState::parse("XXXOO....").unwrap();
        assert_eq!(reachable_states(won), vec![won]);
    }

    #[test]
    fn canonical_moves_map_back_to_legal_positions() {
        for state in reachable_states(BoardState::new()) {
            let ctx = state.canonical_context();
            let legal = state.legal_moves();
            for canonical_move in ctx.state.legal_moves() {
                let actual = ctx.map_canonical_to_original(canonical_move);
                assert!(legal.contains(&actual), "inverse mapped move not legal");
                assert_eq!(ctx.map_move_to_canonical(actual), canonical_move);
            }
        }
    }
}
