//! Game loop and parallel bot-vs-bot series.

use crate::display;
use crate::players::{build_player, EngineArgs, PlayerKind};
use anyhow::{Context, Result};
use mnk_core::{GameState, Mark, Player};
use rayon::prelude::*;
use std::fmt;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Play `state` to the end, asking `x` and `o` for moves in turn.
///
/// With `out` set, the board and a turn banner are printed before every
/// move and the result at the end.
pub fn play_game(
    state: &mut GameState,
    x: &mut dyn Player,
    o: &mut dyn Player,
    mut out: Option<&mut dyn Write>,
) -> Result<Option<Mark>> {
    while state.is_running() {
        if let Some(out) = out.as_deref_mut() {
            writeln!(out, "\n{}", display::turn_banner(state))?;
            display::render_board(state, out)?;
        }

        let mark = state.turn();
        let player: &mut dyn Player = match mark {
            Mark::X => &mut *x,
            Mark::O => &mut *o,
        };

        let start = Instant::now();
        let mv = player
            .get_move(state)
            .with_context(|| format!("{} ({}) failed to choose a move", player.name(), mark))?;
        info!(
            player = player.name(),
            %mark,
            %mv,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "move chosen"
        );

        state
            .apply(mv)
            .with_context(|| format!("{} ({}) chose an illegal move {}", player.name(), mark, mv))?;
    }

    if let Some(out) = out.as_deref_mut() {
        writeln!(out)?;
        display::render_board(state, out)?;
        if let Some(line) = display::outcome_line(state) {
            writeln!(out, "{line}")?;
        }
    }

    Ok(state.winner())
}

/// Parameters of an arena run.
#[derive(Clone, Debug)]
pub struct ArenaSettings {
    pub dimension: usize,
    pub win_length: usize,
    pub first: Mark,
    pub x_player: PlayerKind,
    pub o_player: PlayerKind,
    pub games: usize,
    pub seed: u64,
}

/// Tally of an arena run.
#[derive(Clone, Debug)]
pub struct ArenaSummary {
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub elapsed: Duration,
}

impl ArenaSummary {
    pub fn games(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }
}

impl fmt::Display for ArenaSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Outcomes: X wins: {}, O wins: {}, Draws: {} ({} games)",
            self.x_wins,
            self.o_wins,
            self.draws,
            self.games()
        )
    }
}

/// Play `settings.games` independent games in parallel.
pub fn run_arena(settings: &ArenaSettings, engine: &EngineArgs) -> Result<ArenaSummary> {
    let start = Instant::now();

    let outcomes: Vec<Option<Mark>> = (0..settings.games)
        .into_par_iter()
        .map(|i| {
            let game_seed = settings.seed.wrapping_add(i as u64 * 1000);
            let mut state =
                GameState::new(settings.dimension, settings.win_length, settings.first)?;
            let mut x = build_player(settings.x_player, engine, game_seed)?;
            let mut o = build_player(settings.o_player, engine, game_seed.wrapping_add(500))?;

            let winner = play_game(&mut state, &mut x, &mut o, None)
                .with_context(|| format!("Arena game {i} failed"))?;
            debug!(
                game = i,
                winner = ?winner,
                moves = state.turn_count(),
                "arena game finished"
            );
            Ok(winner)
        })
        .collect::<Result<_>>()?;

    Ok(ArenaSummary {
        x_wins: outcomes.iter().filter(|w| **w == Some(Mark::X)).count(),
        o_wins: outcomes.iter().filter(|w| **w == Some(Mark::O)).count(),
        draws: outcomes.iter().filter(|w| w.is_none()).count(),
        elapsed: start.elapsed(),
    })
}
