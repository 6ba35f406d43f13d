//! Plain-text rendering of games for the terminal.

use mnk_core::GameState;
use std::io::{self, Write};

/// `Move #n. It's X's turn.`
pub fn turn_banner(state: &GameState) -> String {
    format!(
        "Move #{}. It's {}'s turn.",
        state.turn_count() + 1,
        state.turn()
    )
}

/// `X wins!`, `Draw!`, or `None` while the game is running.
pub fn outcome_line(state: &GameState) -> Option<String> {
    if state.is_running() {
        return None;
    }
    Some(match state.winner() {
        Some(mark) => format!("{mark} wins!"),
        None => "Draw!".to_string(),
    })
}

/// Board with row and column indices, so humans can type coordinates.
pub fn render_board<W: Write + ?Sized>(state: &GameState, out: &mut W) -> io::Result<()> {
    let grid = state.grid();
    let dim = grid.dimension();
    let width = (dim.saturating_sub(1)).to_string().len();

    write!(out, "{:width$}", "")?;
    for col in 0..dim {
        write!(out, " {col:>width$}")?;
    }
    writeln!(out)?;

    for row in 0..dim {
        write!(out, "{row:>width$}")?;
        for col in 0..dim {
            let cell = grid
                .get((row, col).into())
                .map_or_else(|| "-".to_string(), |mark| mark.to_string());
            write!(out, " {cell:>width$}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
