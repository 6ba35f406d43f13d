//! Player construction for the command line.
//!
//! Bots come from the engine crates. The human player reads coordinates from
//! a line-oriented reader and the random player is a baseline for arenas.

use clap::{Args, ValueEnum};
use mnk_core::{GameState, MnkError, Move, Player, Result};
use mnk_mcts::{Mcts, MctsConfig, RandomRollout};
use mnk_minimax::{AlphaBeta, Heuristic, MinimaxConfig, SearchDepth, DEFAULT_STRIDE};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

/// Who controls a side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    Human,
    Alphabeta,
    Mcts,
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum HeuristicArg {
    /// Score finished games only.
    Simple,
    /// Count threats around existing marks.
    Features,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Simple => Heuristic::Terminal,
            HeuristicArg::Features => Heuristic::Features,
        }
    }
}

/// Engine settings shared by both sides.
#[derive(Args, Clone, Debug)]
pub struct EngineArgs {
    /// Alpha-beta search depth in plies (default: exhaustive on 3x3, 2 otherwise).
    #[arg(long, conflicts_with = "full")]
    pub depth: Option<u32>,

    /// Search alpha-beta to the end of the game.
    #[arg(long)]
    pub full: bool,

    /// Alpha-beta horizon evaluation (default: by board size).
    #[arg(long, value_enum)]
    pub heuristic: Option<HeuristicArg>,

    /// Proximity pruning radius for alpha-beta.
    #[arg(long, default_value_t = DEFAULT_STRIDE)]
    pub stride: usize,

    /// Disable alpha-beta cutoffs (plain minimax).
    #[arg(long)]
    pub no_cutoffs: bool,

    /// MCTS simulations per move.
    #[arg(short, long)]
    pub simulations: Option<u32>,

    /// MCTS time budget per move in milliseconds.
    #[arg(long)]
    pub time_ms: Option<u64>,

    /// MCTS exploration constant.
    #[arg(long, default_value_t = std::f64::consts::SQRT_2)]
    pub exploration: f64,

    /// Score MCTS opponent nodes from the opponent's side.
    #[arg(long)]
    pub adversarial: bool,
}

impl Default for EngineArgs {
    fn default() -> Self {
        Self {
            depth: None,
            full: false,
            heuristic: None,
            stride: DEFAULT_STRIDE,
            no_cutoffs: false,
            simulations: None,
            time_ms: None,
            exploration: std::f64::consts::SQRT_2,
            adversarial: false,
        }
    }
}

impl EngineArgs {
    pub fn minimax_config(&self) -> Result<MinimaxConfig> {
        let depth = match (self.full, self.depth) {
            (true, _) => SearchDepth::Full,
            (false, Some(plies)) => SearchDepth::Plies(plies),
            (false, None) => SearchDepth::Auto,
        };
        let config = MinimaxConfig {
            depth,
            heuristic: self.heuristic.map(Heuristic::from),
            stride: self.stride,
            alpha_beta: !self.no_cutoffs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Simulation and time budgets as given; 1000 simulations if neither is.
    pub fn mcts_config(&self) -> Result<MctsConfig> {
        let mut config = MctsConfig::default()
            .with_exploration(self.exploration)
            .with_adversarial_selection(self.adversarial);
        if self.simulations.is_some() || self.time_ms.is_some() {
            config.max_simulations = self.simulations;
            config.time_budget = None;
            if let Some(millis) = self.time_ms {
                config = config.time_limit(millis);
            }
        }
        config.validate()?;
        Ok(config)
    }
}

/// Build a player of `kind`. Bots draw randomness from `seed`.
pub fn build_player(
    kind: PlayerKind,
    engine: &EngineArgs,
    seed: u64,
) -> Result<Box<dyn Player + Send>> {
    Ok(match kind {
        PlayerKind::Human => Box::new(HumanPlayer::stdio()),
        PlayerKind::Random => Box::new(RandomPlayer::new(ChaCha8Rng::seed_from_u64(seed))),
        PlayerKind::Alphabeta => Box::new(AlphaBeta::new(engine.minimax_config()?)),
        PlayerKind::Mcts => Box::new(Mcts::new(
            engine.mcts_config()?,
            RandomRollout::new(ChaCha8Rng::seed_from_u64(seed.wrapping_add(1))),
            ChaCha8Rng::seed_from_u64(seed),
        )),
    })
}

/// Picks uniformly among legal moves.
pub struct RandomPlayer<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomPlayer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Player for RandomPlayer<R> {
    fn name(&self) -> &str {
        "random"
    }

    fn get_move(&mut self, state: &mut GameState) -> Result<Move> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(MnkError::NoLegalMoves);
        }
        Ok(moves[self.rng.gen_range(0..moves.len())])
    }
}

/// Reads `row col` lines, re-prompting until a legal move is entered.
pub struct HumanPlayer<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl HumanPlayer<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

/// Parse `row col`, `row,col` or `(row, col)`.
pub fn parse_move(line: &str) -> Option<Move> {
    let cleaned: String = line
        .chars()
        .map(|c| if matches!(c, '(' | ')' | ',') { ' ' } else { c })
        .collect();
    let mut parts = cleaned.split_whitespace().map(str::parse::<usize>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(row)), Some(Ok(col)), None) => Some(Move::new(row, col)),
        _ => None,
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        "human"
    }

    fn get_move(&mut self, state: &mut GameState) -> Result<Move> {
        if !state.is_running() {
            return Err(MnkError::NoLegalMoves);
        }
        loop {
            write!(self.output, "Enter move for {} as 'row col': ", state.turn())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(MnkError::Io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before a move was entered",
                )));
            }

            match parse_move(&line) {
                Some(mv) if state.is_legal(mv) => return Ok(mv),
                Some(mv) => writeln!(self.output, "{mv} is not a free cell on this board.")?,
                None => writeln!(self.output, "Could not read '{}'.", line.trim())?,
            }
        }
    }
}
