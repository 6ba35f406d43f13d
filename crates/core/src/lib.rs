//! m,n,k core - board, game state and player abstractions
//!
//! This crate provides the mutable [`GameState`] that the search engines
//! explore with in-place `apply`/`undo`, together with the value types they
//! exchange.
//!
//! # Types
//!
//! - [`Grid`] - Square board with line-based win detection
//! - [`GameState`] - Board plus side to move, result and move history
//! - [`Move`] - `(row, col)` cell coordinate
//! - [`PositionKey`] - Canonical position identity (board + side to move)
//! - [`Player`] - Trait for anything that picks moves
//!
//! # Example
//!
//! ```
//! use mnk_core::{GameState, Mark, Move};
//!
//! let mut state = GameState::new(3, 3, Mark::X).unwrap();
//! state.apply(Move::new(1, 1)).unwrap();
//! assert_eq!(state.turn(), Mark::O);
//! state.undo(Move::new(1, 1)).unwrap();
//! assert_eq!(state.legal_moves().len(), 9);
//! ```

mod error;
mod grid;
mod player;
mod state;
mod types;

pub use error::{MnkError, Result};
pub use grid::Grid;
pub use player::Player;
pub use state::GameState;
pub use types::{Mark, Move, PositionKey};
