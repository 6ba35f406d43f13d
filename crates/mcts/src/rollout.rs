//! Rollout policies for the simulation phase.
//!
//! A rollout plays the game out from the frontier to a finished position.
//! Moves are applied to the shared state and pushed onto the search path so
//! that backpropagation can undo them.

use mnk_core::{GameState, Mark, Move, Result};
use rand::Rng;

/// Chooses moves during rollouts.
pub trait RolloutPolicy {
    /// Pick one of `moves` (never empty) for the side to move in `state`.
    fn select(&mut self, state: &GameState, moves: &[Move]) -> Move;
}

/// Uniformly random rollouts.
pub struct RandomRollout<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomRollout<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RolloutPolicy for RandomRollout<R> {
    fn select(&mut self, _state: &GameState, moves: &[Move]) -> Move {
        moves[self.rng.gen_range(0..moves.len())]
    }
}

/// Play `state` to the end with `policy`, appending every move to `path`.
///
/// Returns the winner, or `None` for a draw. On error the moves applied so
/// far are still on `path` for the caller to unwind.
pub fn rollout<P: RolloutPolicy + ?Sized>(
    policy: &mut P,
    state: &mut GameState,
    path: &mut Vec<Move>,
) -> Result<Option<Mark>> {
    while state.is_running() {
        let moves = state.legal_moves();
        let mv = policy.select(state, &moves);
        state.apply(mv)?;
        path.push(mv);
    }
    Ok(state.winner())
}
