//! Property-based tests for apply/undo bookkeeping.
//!
//! - Undoing every applied move in reverse order restores the start state
//! - Position keys agree exactly when board and side to move agree
//! - A finished game exposes no legal moves

use mnk_core::{GameState, Grid, Mark};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

/// Board geometry: dimension 3-6 and a win length that fits.
fn arb_geometry() -> impl Strategy<Value = (usize, usize)> {
    (3usize..=6).prop_flat_map(|dim| (Just(dim), 3usize..=dim))
}

fn arb_first() -> impl Strategy<Value = Mark> {
    prop_oneof![Just(Mark::X), Just(Mark::O)]
}

/// Play up to `moves` random legal moves, returning the state reached.
fn random_playout(dim: usize, k: usize, first: Mark, seed: u64, moves: usize) -> GameState {
    let mut state = GameState::new(dim, k, first).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for _ in 0..moves {
        let legal = state.legal_moves();
        if legal.is_empty() {
            break;
        }
        let mv = legal[rng.gen_range(0..legal.len())];
        state.apply(mv).unwrap();
    }
    state
}

proptest! {
    #[test]
    fn prop_undo_restores_start(
        (dim, k) in arb_geometry(),
        first in arb_first(),
        seed in any::<u64>(),
        moves in 0usize..36,
    ) {
        let start = GameState::new(dim, k, first).unwrap();
        let mut state = random_playout(dim, k, first, seed, moves);

        let history: Vec<_> = state.history().to_vec();
        for mv in history.into_iter().rev() {
            state.undo(mv).unwrap();
        }

        prop_assert_eq!(state, start);
    }

    #[test]
    fn prop_identity_tracks_board_and_turn(
        (dim, k) in arb_geometry(),
        first in arb_first(),
        seed in any::<u64>(),
        moves in 0usize..36,
    ) {
        let state = random_playout(dim, k, first, seed, moves);

        // Rebuilding from the bare grid must give the same key.
        let rebuilt = GameState::from_grid(state.grid().clone(), k, state.turn()).unwrap();
        prop_assert_eq!(rebuilt.identity(), state.identity());
        prop_assert_eq!(rebuilt.winner(), state.winner());
        prop_assert_eq!(rebuilt.is_running(), state.is_running());

        let flipped = GameState::from_grid(state.grid().clone(), k, state.turn().opposite()).unwrap();
        prop_assert_ne!(flipped.identity(), state.identity());
    }

    #[test]
    fn prop_finished_games_have_no_moves(
        (dim, k) in arb_geometry(),
        first in arb_first(),
        seed in any::<u64>(),
    ) {
        let state = random_playout(dim, k, first, seed, dim * dim);
        prop_assert!(!state.is_running());
        prop_assert!(state.legal_moves().is_empty());
        if state.winner().is_none() {
            prop_assert!(state.grid().is_full());
        }
    }

    #[test]
    fn prop_winner_owns_a_line(
        (dim, k) in arb_geometry(),
        seed in any::<u64>(),
    ) {
        let state = random_playout(dim, k, Mark::X, seed, dim * dim);
        if let Some(winner) = state.winner() {
            let grid: &Grid = state.grid();
            prop_assert!(grid.winners(k).contains(&winner));
            let last = state.last_move().unwrap();
            prop_assert!(grid.test_coordinate_for_win(last, winner, k));
        }
    }
}
