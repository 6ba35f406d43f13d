//! Mutable game state with exact move/undo.
//!
//! Search engines never copy a [`GameState`]. They borrow it mutably, apply a
//! move, recurse, and undo the same move on the way back. `undo` therefore
//! has to be the exact inverse of `apply`: marks, side to move, running
//! flag, winner, history and position key all return to their prior values.

use crate::grid::Grid;
use crate::types::{Mark, Move, PositionKey};
use crate::{MnkError, Result};
use std::fmt;

/// Position of an m,n,k game on a square board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    grid: Grid,
    end_condition_length: usize,
    turn: Mark,
    running: bool,
    winner: Option<Mark>,
    history: Vec<Move>,
    key: PositionKey,
}

impl GameState {
    /// Empty board of `dimension x dimension` where `end_condition_length`
    /// marks in a row win and `first` moves first.
    ///
    /// # Errors
    /// Returns `MnkError::InvalidConfig` unless `1 <= end_condition_length <= dimension`.
    pub fn new(dimension: usize, end_condition_length: usize, first: Mark) -> Result<Self> {
        let grid = Grid::new(dimension)?;
        Self::from_grid(grid, end_condition_length, first)
    }

    /// Standard 3x3 tic-tac-toe with X to move.
    pub fn tic_tac_toe() -> Self {
        Self::new(3, 3, Mark::X).expect("BUG: 3x3 with win length 3 is always valid")
    }

    /// Wrap an existing board. Winner and running flag are derived from the
    /// marks; move history starts empty, so moves on the given board cannot
    /// be undone.
    pub fn from_grid(grid: Grid, end_condition_length: usize, turn: Mark) -> Result<Self> {
        if end_condition_length == 0 || end_condition_length > grid.dimension() {
            return Err(MnkError::InvalidConfig(format!(
                "win length {} must be between 1 and the board dimension {}",
                end_condition_length,
                grid.dimension()
            )));
        }

        let winners = grid.winners(end_condition_length);
        if winners.len() > 1 {
            return Err(MnkError::InvalidBoard(
                "both players have a winning line".to_string(),
            ));
        }
        let winner = winners.first().copied();
        let running = winner.is_none() && !grid.is_full();

        let mut key = PositionKey::empty(grid.len(), turn);
        for (mv, mark) in grid.cells() {
            key.set_cell(grid.index(mv), mark);
        }

        Ok(Self {
            grid,
            end_condition_length,
            turn,
            running,
            winner,
            history: Vec::new(),
            key,
        })
    }

    /// Empty cells in row-major order; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.running {
            self.grid.free_cells()
        } else {
            Vec::new()
        }
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.running && self.grid.is_free(mv)
    }

    /// Place the side to move's mark at `mv` and pass the turn.
    ///
    /// # Errors
    /// `GameOver`, `OutOfBounds` or `Occupied`; the state is unchanged on error.
    pub fn apply(&mut self, mv: Move) -> Result<()> {
        if !self.running {
            return Err(MnkError::GameOver);
        }
        let mark = self.turn;
        self.grid.place_mark(mv, mark)?;
        self.key.set_cell(self.grid.index(mv), Some(mark));

        if self
            .grid
            .test_coordinate_for_win(mv, mark, self.end_condition_length)
        {
            self.winner = Some(mark);
            self.running = false;
        } else if self.grid.is_full() {
            self.running = false;
        }

        self.turn = mark.opposite();
        self.key.set_turn(self.turn);
        self.history.push(mv);
        Ok(())
    }

    /// Revert the most recent [`GameState::apply`], which must have been `mv`.
    ///
    /// # Errors
    /// `UndoMismatch` if `mv` is not the last applied move.
    pub fn undo(&mut self, mv: Move) -> Result<()> {
        match self.history.last() {
            Some(&last) if last == mv => {}
            last => {
                return Err(MnkError::UndoMismatch {
                    requested: mv,
                    last: last.map_or_else(|| "none".to_string(), |m| m.to_string()),
                })
            }
        }

        let mark = self.grid.clear_cell(mv)?.ok_or_else(|| {
            MnkError::InvalidBoard(format!("history names {mv} but the cell is empty"))
        })?;
        self.history.pop();
        self.key.set_cell(self.grid.index(mv), None);
        self.turn = mark;
        self.key.set_turn(mark);
        self.running = true;
        self.winner = None;
        Ok(())
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    /// Finished with no winner.
    pub fn is_draw(&self) -> bool {
        !self.running && self.winner.is_none()
    }

    /// Side to move.
    #[inline]
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Canonical key for the current board and side to move.
    #[inline]
    pub fn identity(&self) -> &PositionKey {
        &self.key
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.grid.dimension()
    }

    /// Marks in a row needed to win.
    #[inline]
    pub fn end_condition_length(&self) -> usize {
        self.end_condition_length
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Moves applied since construction, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// Marks currently on the board.
    pub fn turn_count(&self) -> usize {
        self.grid.len() - self.grid.free_count()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}
