//! Value types shared by the board, the game state and the search engines.
//!
//! - [`Mark`]: the two players, X and O
//! - [`Move`]: a `(row, col)` cell coordinate
//! - [`PositionKey`]: canonical identity of a position (board + side to move)

use crate::{MnkError, Result};
use std::fmt;
use std::str::FromStr;

/// A player's mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Both marks, X first.
    pub const ALL: [Mark; 2] = [Mark::X, Mark::O];

    /// The other player's mark.
    #[inline]
    pub const fn opposite(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// 2-bit cell code used by [`PositionKey`]; 0 is reserved for empty.
    #[inline]
    pub(crate) const fn code(self) -> u8 {
        match self {
            Mark::X => 1,
            Mark::O => 2,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

impl FromStr for Mark {
    type Err = MnkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "X" | "x" => Ok(Mark::X),
            "O" | "o" => Ok(Mark::O),
            other => Err(MnkError::InvalidConfig(format!(
                "unknown mark '{other}', expected X or O"
            ))),
        }
    }
}

/// A board cell, addressed as `(row, col)`.
///
/// Ordering is row-major, which is the canonical move enumeration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Squared Euclidean distance to another cell.
    #[inline]
    pub fn distance_squared(self, other: Move) -> usize {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr * dr + dc * dc
    }
}

impl From<(usize, usize)> for Move {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Canonical identity of a position.
///
/// Cells are packed four to a byte (2 bits each: empty, X, O) in row-major
/// order, followed by one byte for the side to move. Two positions have equal
/// keys exactly when their boards and turns are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey(Box<[u8]>);

impl PositionKey {
    pub(crate) fn empty(cells: usize, turn: Mark) -> Self {
        let mut bytes = vec![0u8; cells.div_ceil(4) + 1];
        if let Some(last) = bytes.last_mut() {
            *last = turn.code();
        }
        Self(bytes.into_boxed_slice())
    }

    pub(crate) fn set_cell(&mut self, index: usize, mark: Option<Mark>) {
        let code = mark.map_or(0, Mark::code);
        let shift = (index % 4) * 2;
        let byte = &mut self.0[index / 4];
        *byte = (*byte & !(0b11 << shift)) | (code << shift);
    }

    pub(crate) fn set_turn(&mut self, turn: Mark) {
        if let Some(last) = self.0.last_mut() {
            *last = turn.code();
        }
    }

    /// Raw packed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
