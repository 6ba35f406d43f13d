//! Monte Carlo Tree Search for m,n,k games.
//!
//! This crate provides an MCTS player that searches in place on a shared
//! [`mnk_core::GameState`], keeping its statistics in a table keyed by
//! position identity instead of an explicit tree.
//!
//! # Features
//!
//! - **UCB1 Selection**: `(wins - losses) / visits + c * sqrt(ln N / n)`
//! - **Random Rollouts**: pluggable through [`RolloutPolicy`]
//! - **Move/undo playouts**: the search path is undone after every simulation
//! - **Budgets**: simulation count, wall-clock time, or both
//!
//! # Example
//!
//! ```
//! use mnk_core::GameState;
//! use mnk_mcts::{Mcts, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut state = GameState::tic_tac_toe();
//!
//! let config = MctsConfig::with_simulations(200);
//! let rng = ChaCha8Rng::seed_from_u64(42);
//! let mut mcts = Mcts::with_random_rollouts(config, rng);
//!
//! let result = mcts.search(&mut state).unwrap();
//! println!("Best move: {}", result.best_move);
//! println!("Positions explored: {}", result.table_size);
//! ```

pub mod config;
pub mod rollout;
pub mod search;
mod stats;
mod table;

pub use config::MctsConfig;
pub use rollout::{RandomRollout, RolloutPolicy};
pub use search::{Mcts, Playout, SearchResult};
pub use stats::Stats;
pub use table::StatsTable;
