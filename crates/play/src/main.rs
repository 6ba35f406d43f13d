//! Play m,n,k games against search bots, or pit bots against each other.
//!
//! `play` runs one game on the terminal with any mix of human and bot
//! players. `arena` runs a batch of bot-only games in parallel and reports
//! the tally.

mod arena;
mod display;
mod players;

use anyhow::{bail, Context, Result};
use arena::{play_game, run_arena, ArenaSettings};
use clap::{Parser, Subcommand};
use mnk_core::{GameState, Mark};
use players::{build_player, EngineArgs, PlayerKind};
use std::io;

/// m,n,k game driver with alpha-beta and MCTS bots.
#[derive(Parser)]
#[command(name = "mnk-play")]
#[command(about = "Play N-in-a-row games against alpha-beta and MCTS bots")]
struct Cli {
    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Board geometry shared by both commands.
#[derive(clap::Args, Clone, Debug)]
struct BoardArgs {
    /// Board dimension (the board is dim x dim).
    #[arg(short, long, default_value = "3")]
    dim: usize,

    /// Marks in a row needed to win.
    #[arg(long, default_value = "3")]
    score: usize,

    /// Player who moves first.
    #[arg(short, long, default_value = "X")]
    turn: Mark,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game on the terminal.
    Play {
        #[command(flatten)]
        board: BoardArgs,

        /// Who plays X.
        #[arg(short = 'x', long = "x-player", value_enum, default_value = "human")]
        x_player: PlayerKind,

        /// Who plays O.
        #[arg(short = 'o', long = "o-player", value_enum, default_value = "alphabeta")]
        o_player: PlayerKind,

        #[command(flatten)]
        engine: EngineArgs,

        /// Random seed for the bots.
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Run bot-vs-bot games in parallel and report the results.
    Arena {
        #[command(flatten)]
        board: BoardArgs,

        /// Who plays X.
        #[arg(short = 'x', long = "x-player", value_enum, default_value = "mcts")]
        x_player: PlayerKind,

        /// Who plays O.
        #[arg(short = 'o', long = "o-player", value_enum, default_value = "alphabeta")]
        o_player: PlayerKind,

        /// Number of games to play.
        #[arg(short, long, default_value = "20")]
        games: usize,

        #[command(flatten)]
        engine: EngineArgs,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

/// Initialize tracing with `RUST_LOG`, falling back to `level`.
fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn new_game(board: &BoardArgs) -> Result<GameState> {
    GameState::new(board.dim, board.score, board.turn).with_context(|| {
        format!(
            "Cannot create a {0}x{0} board with win length {1}",
            board.dim, board.score
        )
    })
}

/// Run the play command.
fn cmd_play(
    board: BoardArgs,
    x_player: PlayerKind,
    o_player: PlayerKind,
    engine: EngineArgs,
    seed: u64,
) -> Result<()> {
    let mut state = new_game(&board)?;
    let mut x = build_player(x_player, &engine, seed).context("Failed to set up X")?;
    let mut o = build_player(o_player, &engine, seed.wrapping_add(1000))
        .context("Failed to set up O")?;

    println!(
        "{0}x{0} board, {1} in a row wins. X: {2}, O: {3}.",
        board.dim,
        board.score,
        x.name(),
        o.name()
    );

    play_game(&mut state, &mut x, &mut o, Some(&mut io::stdout()))?;
    Ok(())
}

/// Run the arena command.
fn cmd_arena(
    board: BoardArgs,
    x_player: PlayerKind,
    o_player: PlayerKind,
    games: usize,
    engine: EngineArgs,
    seed: u64,
) -> Result<()> {
    if x_player == PlayerKind::Human || o_player == PlayerKind::Human {
        bail!("The arena only runs bots; use `play` for human games");
    }
    // Fail on bad settings before spawning any game.
    new_game(&board)?;
    build_player(x_player, &engine, seed)?;

    println!(
        "Playing {} games on {}x{} (k = {}): X = {:?} vs O = {:?}",
        games, board.dim, board.dim, board.score, x_player, o_player
    );

    let settings = ArenaSettings {
        dimension: board.dim,
        win_length: board.score,
        first: board.turn,
        x_player,
        o_player,
        games,
        seed,
    };
    let summary = run_arena(&settings, &engine)?;

    println!("\nCompleted in {:.2}s", summary.elapsed.as_secs_f64());
    println!("{summary}");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Play {
            board,
            x_player,
            o_player,
            engine,
            seed,
        } => cmd_play(board, x_player, o_player, engine, seed),
        Commands::Arena {
            board,
            x_player,
            o_player,
            games,
            engine,
            seed,
        } => cmd_arena(board, x_player, o_player, games, engine, seed),
    }
}
