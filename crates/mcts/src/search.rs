//! Monte Carlo Tree Search implementation.
//!
//! Each simulation runs four phases against the caller's state:
//!
//! 1. **Select**: while every child of the current position already has an
//!    entry in the table, descend to the child with the highest UCB1 score.
//! 2. **Expand**: apply a random child without an entry and create it.
//! 3. **Rollout**: play random moves until the game ends.
//! 4. **Backpropagate**: walk the path backwards, counting the result for
//!    each position and undoing its move, until the root is restored.
//!
//! All statistics are counted for the player to move at the root. The table
//! lives for one search only.

use crate::config::MctsConfig;
use crate::rollout::{rollout, RandomRollout, RolloutPolicy};
use crate::stats::Stats;
use crate::table::StatsTable;
use mnk_core::{GameState, Mark, MnkError, Move, Player, Result};
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Result of an MCTS search.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Root child with the most visits (first in row-major order on ties).
    pub best_move: Move,

    /// Statistics of each root child, in row-major order.
    pub visit_counts: Vec<(Move, Stats)>,

    /// Statistics of the root position.
    pub root: Stats,

    /// Simulations completed.
    pub simulations: u32,

    /// Distinct positions in the table when the search stopped.
    pub table_size: usize,

    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}

impl SearchResult {
    /// Visits recorded for the root child reached by `mv`.
    pub fn visits(&self, mv: Move) -> u32 {
        self.visit_counts
            .iter()
            .find(|(m, _)| *m == mv)
            .map_or(0, |(_, stats)| stats.visits)
    }
}

/// One finished simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playout {
    /// Moves applied from the root, in order. All have been undone.
    pub path: Vec<Move>,

    /// Winner of the playout, `None` for a draw.
    pub winner: Option<Mark>,
}

/// Monte Carlo Tree Search with UCB1 selection.
///
/// Generic over:
/// - `R`: random number generator used for expansion
/// - `P`: rollout policy
pub struct Mcts<R: Rng, P: RolloutPolicy = RandomRollout<R>> {
    config: MctsConfig,
    rollout: P,
    rng: R,
}

impl<R: Rng + Clone> Mcts<R, RandomRollout<R>> {
    /// MCTS with uniformly random rollouts.
    pub fn with_random_rollouts(config: MctsConfig, rng: R) -> Self {
        Self::new(config, RandomRollout::new(rng.clone()), rng)
    }
}

impl<R: Rng, P: RolloutPolicy> Mcts<R, P> {
    pub fn new(config: MctsConfig, rollout: P, rng: R) -> Self {
        Self {
            config,
            rollout,
            rng,
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Run simulations from `state` until the budget is spent.
    ///
    /// `state` is mutated during the search and restored before returning.
    ///
    /// # Errors
    /// `InvalidConfig` before any work if the configuration is unusable,
    /// `NoLegalMoves` if the game is over.
    pub fn search(&mut self, state: &mut GameState) -> Result<SearchResult> {
        self.config.validate()?;
        if !state.is_running() {
            return Err(MnkError::NoLegalMoves);
        }

        let root_player = state.turn();
        let root_key = state.identity().clone();
        let mut table = StatsTable::new();
        table.ensure(&root_key);

        let start = Instant::now();
        let mut simulations = 0u32;
        while !self.budget_exhausted(simulations, start) {
            let playout = self.simulate(state, &mut table, root_player)?;
            debug_assert_eq!(
                state.identity(),
                &root_key,
                "BUG: playout did not restore the root position"
            );
            trace!(
                depth = playout.path.len(),
                winner = ?playout.winner,
                "simulation finished"
            );
            simulations += 1;
        }

        let (best_move, visit_counts) = best_child(state, &table)?;
        let root = table.get(&root_key).copied().unwrap_or_default();
        let result = SearchResult {
            best_move,
            visit_counts,
            root,
            simulations,
            table_size: table.len(),
            elapsed: start.elapsed(),
        };

        debug!(
            best = %result.best_move,
            simulations = result.simulations,
            table_size = result.table_size,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "mcts search finished"
        );
        Ok(result)
    }

    /// Run one select/expand/rollout/backpropagate iteration.
    ///
    /// Results are counted in `table` for `root_player`. The state is back
    /// at its starting position afterwards, also when an error is returned.
    pub fn simulate(
        &mut self,
        state: &mut GameState,
        table: &mut StatsTable,
        root_player: Mark,
    ) -> Result<Playout> {
        let mut path = Vec::new();
        let winner = match self.descend(state, table, root_player, &mut path) {
            Ok(winner) => winner,
            Err(err) => {
                unwind(state, &path);
                return Err(err);
            }
        };

        backpropagate(state, table, &path, winner, root_player)?;
        Ok(Playout { path, winner })
    }

    /// Select, expand and roll out, leaving every applied move on `path`.
    fn descend(
        &mut self,
        state: &mut GameState,
        table: &mut StatsTable,
        root_player: Mark,
        path: &mut Vec<Move>,
    ) -> Result<Option<Mark>> {
        while state.is_running() {
            let children = child_stats(state, table)?;

            let unexpanded: Vec<Move> = children
                .iter()
                .filter(|(_, stats)| stats.is_none())
                .map(|(mv, _)| *mv)
                .collect();
            if !unexpanded.is_empty() {
                let mv = unexpanded[self.rng.gen_range(0..unexpanded.len())];
                state.apply(mv)?;
                path.push(mv);
                table.ensure(state.identity());
                break;
            }

            let mv = self.select_child(state, table, &children, root_player)?;
            state.apply(mv)?;
            path.push(mv);
        }

        rollout(&mut self.rollout, state, path)
    }

    /// Child with the highest UCB1 score; the first one wins ties.
    fn select_child(
        &self,
        state: &GameState,
        table: &StatsTable,
        children: &[(Move, Option<Stats>)],
        root_player: Mark,
    ) -> Result<Move> {
        let parent_visits = table.get(state.identity()).map_or(0, |s| s.visits);
        let perspective = if !self.config.adversarial_selection || state.turn() == root_player {
            1.0
        } else {
            -1.0
        };

        let mut best: Option<(Move, f64)> = None;
        for &(mv, stats) in children {
            let score = stats.unwrap_or_default().ucb1(
                parent_visits,
                self.config.exploration,
                perspective,
            );
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }
        best.map(|(mv, _)| mv).ok_or(MnkError::NoLegalMoves)
    }

    fn budget_exhausted(&self, simulations: u32, start: Instant) -> bool {
        self.config
            .max_simulations
            .is_some_and(|max| simulations >= max)
            || self
                .config
                .time_budget
                .is_some_and(|limit| start.elapsed() >= limit)
    }
}

/// Table entry (if any) for each child of the current position.
fn child_stats(state: &mut GameState, table: &StatsTable) -> Result<Vec<(Move, Option<Stats>)>> {
    let moves = state.legal_moves();
    let mut children = Vec::with_capacity(moves.len());
    for mv in moves {
        state.apply(mv)?;
        let stats = table.get(state.identity()).copied();
        state.undo(mv)?;
        children.push((mv, stats));
    }
    Ok(children)
}

/// Count `winner` for every position on `path` and undo it, deepest first.
fn backpropagate(
    state: &mut GameState,
    table: &mut StatsTable,
    path: &[Move],
    winner: Option<Mark>,
    root_player: Mark,
) -> Result<()> {
    for &mv in path.iter().rev() {
        table.record(state.identity(), winner, root_player);
        state.undo(mv)?;
    }
    table.record(state.identity(), winner, root_player);
    Ok(())
}

/// Undo `path` after a failed simulation.
fn unwind(state: &mut GameState, path: &[Move]) {
    for &mv in path.iter().rev() {
        if let Err(err) = state.undo(mv) {
            warn!(%mv, %err, "failed to unwind search path");
            return;
        }
    }
}

/// Root child with the most visits, plus every child's statistics.
fn best_child(state: &mut GameState, table: &StatsTable) -> Result<(Move, Vec<(Move, Stats)>)> {
    let visit_counts: Vec<(Move, Stats)> = child_stats(state, table)?
        .into_iter()
        .map(|(mv, stats)| (mv, stats.unwrap_or_default()))
        .collect();

    let mut best: Option<(Move, u32)> = None;
    for &(mv, stats) in &visit_counts {
        if best.map_or(true, |(_, visits)| stats.visits > visits) {
            best = Some((mv, stats.visits));
        }
    }

    let (best_move, _) = best.ok_or(MnkError::NoLegalMoves)?;
    Ok((best_move, visit_counts))
}

impl<R: Rng, P: RolloutPolicy> Player for Mcts<R, P> {
    fn name(&self) -> &str {
        "mcts"
    }

    fn get_move(&mut self, state: &mut GameState) -> Result<Move> {
        self.search(state).map(|result| result.best_move)
    }
}
