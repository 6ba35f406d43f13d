//! Minimax configuration parameters.

use crate::heuristic::Heuristic;
use crate::pruning::DEFAULT_STRIDE;
use mnk_core::{GameState, MnkError, Result};

/// Exhaustive search is refused when more cells than this are free.
pub const MAX_EXHAUSTIVE_CELLS: usize = 10;

/// Plies searched on boards larger than 3x3 when the depth is `Auto`.
pub const DEFAULT_PLIES: u32 = 2;

/// How deep the search goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchDepth {
    /// `Full` on 3x3 boards, [`DEFAULT_PLIES`] elsewhere.
    Auto,
    /// Search until every line of play ends.
    Full,
    /// Fixed number of plies, counting the root move.
    Plies(u32),
}

/// Alpha-beta configuration parameters.
#[derive(Clone, Debug)]
pub struct MinimaxConfig {
    /// Search depth.
    pub depth: SearchDepth,

    /// Evaluation at the horizon. `None` picks by board size.
    pub heuristic: Option<Heuristic>,

    /// Proximity pruning radius applied at every level.
    pub stride: usize,

    /// Cut off siblings once `alpha >= beta`. Disabling gives plain minimax.
    pub alpha_beta: bool,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            depth: SearchDepth::Auto,
            heuristic: None,
            stride: DEFAULT_STRIDE,
            alpha_beta: true,
        }
    }
}

/// Depth and heuristic resolved for one particular position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedSearch {
    pub plies: u32,
    pub heuristic: Heuristic,
}

impl MinimaxConfig {
    /// Create a config searching a fixed number of plies.
    pub fn with_plies(plies: u32) -> Self {
        Self {
            depth: SearchDepth::Plies(plies),
            ..Default::default()
        }
    }

    /// Create a config searching to the end of the game.
    pub fn full() -> Self {
        Self {
            depth: SearchDepth::Full,
            ..Default::default()
        }
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    /// Same search without alpha-beta cutoffs.
    pub fn without_pruning(mut self) -> Self {
        self.alpha_beta = false;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.depth == SearchDepth::Plies(0) {
            return Err(MnkError::InvalidConfig(
                "minimax needs at least one ply".to_string(),
            ));
        }
        Ok(())
    }

    /// Fix the ply count and heuristic for `state`.
    ///
    /// # Errors
    /// `Unsupported` when `Full` is requested with more than
    /// [`MAX_EXHAUSTIVE_CELLS`] free cells.
    pub fn resolve(&self, state: &GameState) -> Result<ResolvedSearch> {
        self.validate()?;
        let dimension = state.dimension();
        let free = state.grid().free_count();

        let plies = match (self.depth, dimension <= 3) {
            (SearchDepth::Plies(n), _) => n,
            (SearchDepth::Auto, false) => DEFAULT_PLIES,
            (SearchDepth::Full, _) | (SearchDepth::Auto, true) => {
                if free > MAX_EXHAUSTIVE_CELLS {
                    return Err(MnkError::Unsupported(format!(
                        "full-depth search with {free} free cells (limit {MAX_EXHAUSTIVE_CELLS})"
                    )));
                }
                free as u32
            }
        };

        Ok(ResolvedSearch {
            plies,
            heuristic: self
                .heuristic
                .unwrap_or_else(|| Heuristic::for_dimension(dimension)),
        })
    }
}
