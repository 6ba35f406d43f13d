//! Alpha-beta minimax for m,n,k games.
//!
//! This crate provides a deterministic adversarial search that explores the
//! game tree in place on a shared [`mnk_core::GameState`], restricted to
//! moves near existing marks.
//!
//! # Features
//!
//! - **Move/undo search**: no position is ever cloned during search
//! - **Proximity pruning**: candidate moves within a radius of occupied cells
//! - **Two heuristics**: terminal-only for 3x3, threat counting for larger boards
//! - **Depth policy**: exhaustive on small boards, a fixed horizon elsewhere
//!
//! # Example
//!
//! ```
//! use mnk_core::{GameState, Player};
//! use mnk_minimax::{AlphaBeta, MinimaxConfig};
//!
//! let mut state = GameState::tic_tac_toe();
//! let mut bot = AlphaBeta::new(MinimaxConfig::default());
//!
//! let mv = bot.get_move(&mut state).unwrap();
//! assert_eq!(state.legal_moves().len(), 9);
//! println!("Best move: {}", mv);
//! ```

pub mod config;
pub mod heuristic;
pub mod pruning;
pub mod search;

pub use config::{MinimaxConfig, SearchDepth};
pub use heuristic::{Heuristic, MAX_REWARD};
pub use pruning::{prune_moves, DEFAULT_STRIDE};
pub use search::{AlphaBeta, SearchResult};
