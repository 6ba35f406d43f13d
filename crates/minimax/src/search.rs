//! Alpha-beta minimax over the shared game state.
//!
//! The search never clones the position. Every child is visited with
//! `apply`, evaluated, then reverted with `undo` before the next sibling, so
//! the caller's state is unchanged when the search returns (including on
//! error).
//!
//! X is always the maximizing player. Root children are each searched with a
//! full `(-inf, +inf)` window and ties go to the later move (`>=` for X,
//! `<=` for O), which makes the choice identical with and without cutoffs.

use crate::config::{MinimaxConfig, ResolvedSearch};
use crate::heuristic::Heuristic;
use crate::pruning::prune_moves;
use mnk_core::{GameState, Mark, MnkError, Move, Player, Result};
use tracing::debug;

/// Result of an alpha-beta search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// Chosen move.
    pub best_move: Move,

    /// Minimax value of `best_move`, from X's point of view.
    pub value: f64,

    /// Positions visited, root children included.
    pub nodes: u64,

    /// Plies searched.
    pub plies: u32,

    /// Evaluation used at the horizon.
    pub heuristic: Heuristic,
}

/// Per-search counters and settings shared down the recursion.
struct Context {
    heuristic: Heuristic,
    stride: usize,
    alpha_beta: bool,
    nodes: u64,
}

/// Minimax player with optional alpha-beta cutoffs.
pub struct AlphaBeta {
    config: MinimaxConfig,
}

impl AlphaBeta {
    pub fn new(config: MinimaxConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }

    /// Search `state` and return the best move with its value.
    ///
    /// # Errors
    /// `NoLegalMoves` if the game is over, `InvalidConfig`/`Unsupported`
    /// from the configuration, or any error raised while applying moves.
    pub fn search(&self, state: &mut GameState) -> Result<SearchResult> {
        if !state.is_running() {
            return Err(MnkError::NoLegalMoves);
        }
        let ResolvedSearch { plies, heuristic } = self.config.resolve(state)?;

        let maximizing = state.turn() == Mark::X;
        let mut ctx = Context {
            heuristic,
            stride: self.config.stride,
            alpha_beta: self.config.alpha_beta,
            nodes: 0,
        };

        let mut best: Option<(Move, f64)> = None;
        for mv in prune_moves(state, ctx.stride) {
            state.apply(mv)?;
            let value = alphabeta(
                state,
                plies - 1,
                f64::NEG_INFINITY,
                f64::INFINITY,
                !maximizing,
                &mut ctx,
            );
            state.undo(mv)?;
            let value = value?;

            let better = match best {
                None => true,
                Some((_, best_value)) if maximizing => value >= best_value,
                Some((_, best_value)) => value <= best_value,
            };
            if better {
                best = Some((mv, value));
            }
        }

        let (best_move, value) = best.ok_or(MnkError::NoLegalMoves)?;
        debug!(
            best = %best_move,
            value,
            nodes = ctx.nodes,
            plies,
            ?heuristic,
            "alpha-beta search finished"
        );

        Ok(SearchResult {
            best_move,
            value,
            nodes: ctx.nodes,
            plies,
            heuristic,
        })
    }
}

/// Value of the position `state` is in, `remaining` plies above the horizon.
fn alphabeta(
    state: &mut GameState,
    remaining: u32,
    mut alpha: f64,
    mut beta: f64,
    maximizing: bool,
    ctx: &mut Context,
) -> Result<f64> {
    ctx.nodes += 1;
    if remaining == 0 || !state.is_running() {
        return Ok(ctx.heuristic.evaluate(state));
    }

    let mut value = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };

    for mv in prune_moves(state, ctx.stride) {
        state.apply(mv)?;
        let child = alphabeta(state, remaining - 1, alpha, beta, !maximizing, ctx);
        state.undo(mv)?;
        let child = child?;

        if maximizing {
            value = value.max(child);
            alpha = alpha.max(value);
        } else {
            value = value.min(child);
            beta = beta.min(value);
        }
        if ctx.alpha_beta && alpha >= beta {
            break;
        }
    }

    Ok(value)
}

impl Player for AlphaBeta {
    fn name(&self) -> &str {
        "alphabeta"
    }

    fn get_move(&mut self, state: &mut GameState) -> Result<Move> {
        self.search(state).map(|result| result.best_move)
    }
}
