//! Static evaluation of positions at the search horizon.
//!
//! Scores are always from X's point of view: X maximizes, O minimizes.
//!
//! The feature evaluator looks at candidate cells near existing marks and
//! counts, for each player, how many of them would
//!
//! - complete a winning line (`k` in a row),
//! - make a near-win (`k - 1`),
//! - improve a line (`k - 2`).
//!
//! The tiers never overlap: a won game outranks an immediate win for the
//! side to move, which outranks the opponent's immediate win, which outranks
//! any near-win score, which outranks any improving score.

use crate::pruning::prune_moves;
use mnk_core::{GameState, Mark, Move};

/// Score of a won game.
pub const MAX_REWARD: f64 = 100.0;

/// Pruning radius for the candidate cells the feature evaluator inspects.
pub const FEATURE_STRIDE: usize = 3;

const OWN_WIN: f64 = 0.9 * MAX_REWARD;
const OPPONENT_WIN: f64 = 0.8 * MAX_REWARD;
const MULTIPLE_WINS_BONUS: f64 = 0.01;
const NEAR_WIN_WEIGHT: f64 = 0.025 * MAX_REWARD;
const NEAR_WIN_CAP: f64 = 0.7 * MAX_REWARD;
const IMPROVING_WEIGHT: f64 = 0.001 * MAX_REWARD;
const IMPROVING_CAP: f64 = 0.1 * MAX_REWARD;

/// Which evaluation to apply at the depth cutoff.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heuristic {
    /// Only finished games score; everything else is 0.
    Terminal,
    /// Threat counting around existing marks.
    Features,
}

impl Heuristic {
    /// `Terminal` for 3x3 (searched to the end anyway), `Features` otherwise.
    pub fn for_dimension(dimension: usize) -> Self {
        if dimension <= 3 {
            Heuristic::Terminal
        } else {
            Heuristic::Features
        }
    }

    pub fn evaluate(self, state: &GameState) -> f64 {
        if let Some(score) = terminal_score(state) {
            return score;
        }
        match self {
            Heuristic::Terminal => 0.0,
            Heuristic::Features => feature_score(state),
        }
    }
}

/// `+MAX_REWARD` / `-MAX_REWARD` / `0` for finished games, `None` while running.
pub fn terminal_score(state: &GameState) -> Option<f64> {
    if state.is_running() {
        return None;
    }
    Some(state.winner().map_or(0.0, |winner| sign(winner) * MAX_REWARD))
}

/// Threat counts for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Features {
    pub wins: usize,
    pub near_wins: usize,
    pub improving: usize,
}

impl Features {
    /// Count threats for `mark` over `candidates`, treating each as if `mark` played it.
    pub fn count(state: &GameState, candidates: &[Move], mark: Mark) -> Self {
        let grid = state.grid();
        let k = state.end_condition_length();
        let near = k.saturating_sub(1).max(1);
        let improving = k.saturating_sub(2).max(1);

        let mut features = Features::default();
        for &mv in candidates {
            if grid.test_coordinate_for_win(mv, mark, k) {
                features.wins += 1;
            }
            if grid.test_coordinate_for_win(mv, mark, near) {
                features.near_wins += 1;
            }
            if grid.test_coordinate_for_win(mv, mark, improving) {
                features.improving += 1;
            }
        }
        features
    }
}

/// Feature score of a running game.
pub fn feature_score(state: &GameState) -> f64 {
    let candidates = prune_moves(state, FEATURE_STRIDE);
    let mover = state.turn();
    let other = mover.opposite();
    let own = Features::count(state, &candidates, mover);
    let theirs = Features::count(state, &candidates, other);

    if own.wins > 0 {
        return sign(mover) * (OWN_WIN + bonus(own.wins));
    }
    if theirs.wins > 0 {
        return sign(other) * (OPPONENT_WIN + bonus(theirs.wins));
    }

    let (own_score, their_score) = if own.near_wins > 0 || theirs.near_wins > 0 {
        (
            (4.0 * own.near_wins as f64 * NEAR_WIN_WEIGHT).min(NEAR_WIN_CAP),
            (theirs.near_wins as f64 * NEAR_WIN_WEIGHT).min(NEAR_WIN_CAP),
        )
    } else {
        (
            (2.0 * own.improving as f64 * IMPROVING_WEIGHT).min(IMPROVING_CAP),
            (theirs.improving as f64 * IMPROVING_WEIGHT).min(IMPROVING_CAP),
        )
    };

    sign(mover) * (own_score - their_score)
}

#[inline]
fn sign(mark: Mark) -> f64 {
    match mark {
        Mark::X => 1.0,
        Mark::O => -1.0,
    }
}

#[inline]
fn bonus(wins: usize) -> f64 {
    if wins > 1 {
        MULTIPLE_WINS_BONUS
    } else {
        0.0
    }
}
