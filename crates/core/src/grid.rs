//! Square board of optional marks and line-based win detection.

use crate::types::{Mark, Move};
use crate::{MnkError, Result};
use std::fmt;

/// Line directions checked for a win: horizontal, vertical, both diagonals.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A `dimension x dimension` board stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    dimension: usize,
    cells: Vec<Option<Mark>>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// # Errors
    /// Returns `MnkError::InvalidBoard` for a zero dimension.
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(MnkError::InvalidBoard(
                "dimension must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            dimension,
            cells: vec![None; dimension * dimension],
        })
    }

    /// Build a grid from rows of `X`, `O` and `-` (or `.`) characters.
    ///
    /// Whitespace inside a row is ignored, so `"X O -"` and `"XO-"` are equal.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let mut grid = Grid::new(rows.len())?;
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != grid.dimension {
                return Err(MnkError::InvalidBoard(format!(
                    "row {row} has {} cells, expected {}",
                    symbols.len(),
                    grid.dimension
                )));
            }
            for (col, symbol) in symbols.into_iter().enumerate() {
                let mark = match symbol {
                    'X' | 'x' => Some(Mark::X),
                    'O' | 'o' => Some(Mark::O),
                    '-' | '.' => None,
                    other => {
                        return Err(MnkError::InvalidBoard(format!(
                            "unexpected symbol '{other}' at ({row}, {col})"
                        )))
                    }
                };
                grid.cells[row * grid.dimension + col] = mark;
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of cells on the board.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    #[inline]
    pub fn is_valid(&self, mv: Move) -> bool {
        mv.row < self.dimension && mv.col < self.dimension
    }

    /// Row-major cell index. Caller must check [`Grid::is_valid`].
    #[inline]
    pub fn index(&self, mv: Move) -> usize {
        mv.row * self.dimension + mv.col
    }

    /// Mark at `mv`, or `None` for an empty or out-of-bounds cell.
    #[inline]
    pub fn get(&self, mv: Move) -> Option<Mark> {
        if self.is_valid(mv) {
            self.cells[self.index(mv)]
        } else {
            None
        }
    }

    #[inline]
    pub fn is_free(&self, mv: Move) -> bool {
        self.is_valid(mv) && self.cells[self.index(mv)].is_none()
    }

    /// Place `mark` on an empty in-bounds cell.
    pub fn place_mark(&mut self, mv: Move, mark: Mark) -> Result<()> {
        if !self.is_valid(mv) {
            return Err(MnkError::OutOfBounds {
                mv,
                dimension: self.dimension,
            });
        }
        let index = self.index(mv);
        if self.cells[index].is_some() {
            return Err(MnkError::Occupied(mv));
        }
        self.cells[index] = Some(mark);
        Ok(())
    }

    /// Clear a cell, returning the mark that was there.
    pub fn clear_cell(&mut self, mv: Move) -> Result<Option<Mark>> {
        if !self.is_valid(mv) {
            return Err(MnkError::OutOfBounds {
                mv,
                dimension: self.dimension,
            });
        }
        let index = self.index(mv);
        Ok(self.cells[index].take())
    }

    /// Empty cells in row-major order.
    pub fn free_cells(&self) -> Vec<Move> {
        self.cells()
            .filter(|(_, mark)| mark.is_none())
            .map(|(mv, _)| mv)
            .collect()
    }

    /// Occupied cells in row-major order.
    pub fn occupied_cells(&self) -> Vec<Move> {
        self.cells()
            .filter(|(_, mark)| mark.is_some())
            .map(|(mv, _)| mv)
            .collect()
    }

    pub fn free_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Iterate over `(coordinate, contents)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Move, Option<Mark>)> + '_ {
        let dimension = self.dimension;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, mark)| (Move::new(i / dimension, i % dimension), *mark))
    }

    /// Would `mark` at `mv` complete a line of at least `length`?
    ///
    /// An empty `mv` is treated as holding `mark`, so this doubles as a
    /// look-ahead for candidate moves. Returns false if `mv` is out of
    /// bounds or already holds the other mark.
    pub fn test_coordinate_for_win(&self, mv: Move, mark: Mark, length: usize) -> bool {
        if !self.is_valid(mv) {
            return false;
        }
        match self.get(mv) {
            Some(existing) if existing != mark => return false,
            _ => {}
        }
        DIRECTIONS.iter().any(|&(dr, dc)| {
            1 + self.run_length(mv, mark, dr, dc) + self.run_length(mv, mark, -dr, -dc) >= length
        })
    }

    /// Consecutive `mark`s starting one step from `from` in direction `(dr, dc)`.
    fn run_length(&self, from: Move, mark: Mark, dr: isize, dc: isize) -> usize {
        let mut count = 0;
        let mut row = from.row as isize + dr;
        let mut col = from.col as isize + dc;
        let dim = self.dimension as isize;
        while row >= 0 && row < dim && col >= 0 && col < dim {
            if self.cells[row as usize * self.dimension + col as usize] != Some(mark) {
                break;
            }
            count += 1;
            row += dr;
            col += dc;
        }
        count
    }

    /// Marks that own a complete line of `length` anywhere on the board.
    pub fn winners(&self, length: usize) -> Vec<Mark> {
        Mark::ALL
            .into_iter()
            .filter(|&mark| {
                self.cells()
                    .any(|(mv, m)| m == Some(mark) && self.test_coordinate_for_win(mv, mark, length))
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.dimension {
            for col in 0..self.dimension {
                if col > 0 {
                    write!(f, " ")?;
                }
                match self.cells[row * self.dimension + col] {
                    Some(mark) => write!(f, "{mark}")?,
                    None => write!(f, "-")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// X at (0,0),(0,1),(1,0),(2,1),(0,2); O at (1,1),(1,2),(2,0),(2,2).
    fn small_grid() -> Grid {
        Grid::from_rows(&["X X X", "X O O", "O X O"]).unwrap()
    }

    #[test]
    fn test_win_on_small_grid() {
        let grid = small_grid();
        assert!(grid.test_coordinate_for_win(Move::new(0, 2), Mark::X, 3));
        assert!(!grid.test_coordinate_for_win(Move::new(0, 2), Mark::O, 3));
    }

    #[test]
    fn test_win_on_big_grid_diagonal() {
        let mut grid = Grid::new(10).unwrap();
        for i in 2..=7 {
            grid.place_mark(Move::new(i, i), Mark::X).unwrap();
        }
        assert!(grid.test_coordinate_for_win(Move::new(2, 2), Mark::X, 5));
        assert!(grid.test_coordinate_for_win(Move::new(7, 7), Mark::X, 5));
        assert!(!grid.test_coordinate_for_win(Move::new(2, 2), Mark::O, 5));
    }

    #[test]
    fn test_lookahead_on_empty_cell() {
        let grid = Grid::from_rows(&["X X -", "- O -", "- - O"]).unwrap();
        assert!(grid.test_coordinate_for_win(Move::new(0, 2), Mark::X, 3));
        assert!(!grid.test_coordinate_for_win(Move::new(0, 0), Mark::O, 3));
        assert!(!grid.test_coordinate_for_win(Move::new(0, 2), Mark::O, 3));
    }

    #[test]
    fn test_anti_diagonal() {
        let grid = Grid::from_rows(&["- - O", "- O -", "- - -"]).unwrap();
        assert!(grid.test_coordinate_for_win(Move::new(2, 0), Mark::O, 3));
        assert!(!grid.test_coordinate_for_win(Move::new(2, 2), Mark::O, 3));
    }

    #[test]
    fn test_out_of_bounds_is_never_a_win() {
        let grid = small_grid();
        assert!(!grid.test_coordinate_for_win(Move::new(3, 0), Mark::X, 1));
    }

    #[test]
    fn test_place_and_clear() {
        let mut grid = Grid::new(3).unwrap();
        grid.place_mark(Move::new(1, 1), Mark::X).unwrap();
        assert!(matches!(
            grid.place_mark(Move::new(1, 1), Mark::O),
            Err(MnkError::Occupied(_))
        ));
        assert!(matches!(
            grid.place_mark(Move::new(3, 1), Mark::O),
            Err(MnkError::OutOfBounds { .. })
        ));
        assert_eq!(grid.clear_cell(Move::new(1, 1)).unwrap(), Some(Mark::X));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_free_cells_row_major() {
        let grid = Grid::from_rows(&["X -", "- O"]).unwrap();
        assert_eq!(grid.free_cells(), vec![Move::new(0, 1), Move::new(1, 0)]);
        assert_eq!(grid.occupied_cells(), vec![Move::new(0, 0), Move::new(1, 1)]);
        assert_eq!(grid.free_count(), 2);
    }

    #[test]
    fn test_winners() {
        assert_eq!(small_grid().winners(3), vec![Mark::X]);
        assert!(Grid::new(3).unwrap().winners(3).is_empty());
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(Grid::from_rows(&["X X", "O"]).is_err());
        assert!(Grid::from_rows(&["X Z", "- -"]).is_err());
        assert!(Grid::from_rows(&[]).is_err());
    }

    #[test]
    fn test_display() {
        let grid = Grid::from_rows(&["X -", "- O"]).unwrap();
        assert_eq!(grid.to_string(), "X -\n- O\n");
    }
}
