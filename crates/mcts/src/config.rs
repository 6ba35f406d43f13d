//! MCTS configuration parameters.
//!
//! A search stops at whichever budget runs out first. At least one of the
//! simulation budget and the time budget must be set.

use mnk_core::{MnkError, Result};
use std::time::Duration;

/// MCTS configuration parameters.
#[derive(Clone, Debug)]
pub struct MctsConfig {
    /// Maximum number of simulations per search.
    pub max_simulations: Option<u32>,

    /// Wall-clock budget per search, checked once per simulation.
    pub time_budget: Option<Duration>,

    /// UCB1 exploration constant `c`.
    pub exploration: f64,

    /// Negate the `(wins - losses) / visits` term where the root player's
    /// opponent is choosing. Off by default: every node is scored from the
    /// root player's side.
    pub adversarial_selection: bool,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            max_simulations: Some(1000),
            time_budget: None,
            exploration: std::f64::consts::SQRT_2,
            adversarial_selection: false,
        }
    }
}

impl MctsConfig {
    /// Create a config limited only by simulation count.
    pub fn with_simulations(max_simulations: u32) -> Self {
        Self {
            max_simulations: Some(max_simulations),
            ..Default::default()
        }
    }

    /// Create a config limited only by wall-clock time.
    pub fn with_time_limit(millis: u64) -> Self {
        Self {
            max_simulations: None,
            time_budget: Some(Duration::from_millis(millis)),
            ..Default::default()
        }
    }

    /// Add (or replace) a simulation budget.
    pub fn simulations(mut self, max_simulations: u32) -> Self {
        self.max_simulations = Some(max_simulations);
        self
    }

    /// Add (or replace) a time budget.
    pub fn time_limit(mut self, millis: u64) -> Self {
        self.time_budget = Some(Duration::from_millis(millis));
        self
    }

    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    pub fn with_adversarial_selection(mut self, adversarial: bool) -> Self {
        self.adversarial_selection = adversarial;
        self
    }

    /// Reject configurations that cannot run a search.
    pub fn validate(&self) -> Result<()> {
        if self.max_simulations.is_none() && self.time_budget.is_none() {
            return Err(MnkError::InvalidConfig(
                "MCTS needs a simulation budget, a time budget, or both".to_string(),
            ));
        }
        if self.max_simulations == Some(0) {
            return Err(MnkError::InvalidConfig(
                "simulation budget must be positive".to_string(),
            ));
        }
        if self.time_budget == Some(Duration::ZERO) {
            return Err(MnkError::InvalidConfig(
                "time budget must be positive".to_string(),
            ));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(MnkError::InvalidConfig(format!(
                "exploration constant must be a non-negative number, got {}",
                self.exploration
            )));
        }
        Ok(())
    }
}
