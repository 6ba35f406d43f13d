//! Property-based tests for the MCTS engine.
//!
//! These tests verify:
//! - The caller's state is unchanged after a search
//! - The chosen move is legal
//! - The same seed gives the same search
//! - A bigger simulation budget never lowers the chosen move's visit count
//! - Root statistics add up

use mnk_core::{GameState, Mark};
use mnk_mcts::{Mcts, MctsConfig};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

/// Generate a random seed for MCTS
fn arb_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Generate a random number of simulations (10-200 for fast tests)
fn arb_simulations() -> impl Strategy<Value = u32> {
    10u32..200
}

/// Board geometry: 3x3 tic-tac-toe or 4x4/5x5 with shorter win lengths.
fn arb_geometry() -> impl Strategy<Value = (usize, usize)> {
    prop_oneof![Just((3, 3)), Just((4, 3)), Just((5, 4))]
}

/// Running position reached by random play, or `None` if the game ended.
fn arb_position() -> impl Strategy<Value = Option<GameState>> {
    (arb_geometry(), arb_seed(), 0usize..10).prop_map(|((dim, k), seed, moves)| {
        let mut state = GameState::new(dim, k, Mark::X).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..moves {
            let legal = state.legal_moves();
            if legal.is_empty() {
                break;
            }
            state.apply(legal[rng.gen_range(0..legal.len())]).unwrap();
        }
        state.is_running().then_some(state)
    })
}

fn create_mcts(seed: u64, simulations: u32) -> Mcts<ChaCha8Rng> {
    Mcts::with_random_rollouts(
        MctsConfig::with_simulations(simulations),
        ChaCha8Rng::seed_from_u64(seed),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Board, turn, running flag, winner and history survive any number of searches.
    #[test]
    fn prop_search_restores_state(
        seed in arb_seed(),
        simulations in arb_simulations(),
        state in arb_position()
    ) {
        let Some(mut state) = state else { return Ok(()); };
        let before = state.clone();

        let mut mcts = create_mcts(seed, simulations);
        mcts.search(&mut state).unwrap();
        mcts.search(&mut state).unwrap();

        prop_assert_eq!(&state, &before);
        prop_assert_eq!(state.identity(), before.identity());
    }

    /// The returned move is one of the input state's legal moves.
    #[test]
    fn prop_move_is_legal(
        seed in arb_seed(),
        simulations in arb_simulations(),
        state in arb_position()
    ) {
        let Some(mut state) = state else { return Ok(()); };
        let legal = state.legal_moves();

        let result = create_mcts(seed, simulations).search(&mut state).unwrap();

        prop_assert!(
            legal.contains(&result.best_move),
            "Move {} is not legal in\n{}",
            result.best_move,
            state
        );
    }

    /// Same seed, same search.
    #[test]
    fn prop_deterministic(
        seed in arb_seed(),
        simulations in arb_simulations(),
        state in arb_position()
    ) {
        let Some(mut state) = state else { return Ok(()); };

        let result1 = create_mcts(seed, simulations).search(&mut state).unwrap();
        let result2 = create_mcts(seed, simulations).search(&mut state).unwrap();

        prop_assert_eq!(result1.best_move, result2.best_move);
        prop_assert_eq!(result1.visit_counts, result2.visit_counts);
        prop_assert_eq!(result1.table_size, result2.table_size);
    }

    /// With a fixed seed, more simulations never lower the visit count of the chosen move.
    #[test]
    fn prop_visit_monotonicity(
        seed in arb_seed(),
        small in 10u32..100,
        extra in 0u32..200,
        state in arb_position()
    ) {
        let Some(mut state) = state else { return Ok(()); };

        let smaller = create_mcts(seed, small).search(&mut state).unwrap();
        let larger = create_mcts(seed, small + extra).search(&mut state).unwrap();

        prop_assert!(
            larger.visits(larger.best_move) >= smaller.visits(smaller.best_move),
            "{} sims chose {} with {} visits, {} sims chose {} with {} visits",
            small,
            smaller.best_move,
            smaller.visits(smaller.best_move),
            small + extra,
            larger.best_move,
            larger.visits(larger.best_move)
        );
    }

    /// Every simulation is counted once at the root and once in one root child.
    #[test]
    fn prop_root_accounting(
        seed in arb_seed(),
        simulations in arb_simulations(),
        state in arb_position()
    ) {
        let Some(mut state) = state else { return Ok(()); };

        let result = create_mcts(seed, simulations).search(&mut state).unwrap();
        let child_visits: u32 = result.visit_counts.iter().map(|(_, s)| s.visits).sum();
        let child_wins: u32 = result.visit_counts.iter().map(|(_, s)| s.wins).sum();
        let child_losses: u32 = result.visit_counts.iter().map(|(_, s)| s.losses).sum();

        prop_assert_eq!(result.root.visits, simulations);
        prop_assert_eq!(child_visits, simulations);
        prop_assert_eq!(child_wins, result.root.wins);
        prop_assert_eq!(child_losses, result.root.losses);
        prop_assert!(result.root.wins + result.root.losses <= result.root.visits);
    }
}
