//! Proximity pruning of candidate moves.

use mnk_core::{GameState, Move};

/// Default pruning radius used by the search.
pub const DEFAULT_STRIDE: usize = 2;

/// Legal moves strictly closer than `stride` (Euclidean) to an occupied cell.
///
/// Results are in row-major order. On an empty board this returns only the
/// centre cell. If `stride` is so small that nothing qualifies, every legal
/// move is returned instead.
pub fn prune_moves(state: &GameState, stride: usize) -> Vec<Move> {
    let legal = state.legal_moves();
    if legal.is_empty() {
        return legal;
    }

    let grid = state.grid();
    let occupied = grid.occupied_cells();
    if occupied.is_empty() {
        let centre = grid.dimension() / 2;
        return vec![Move::new(centre, centre)];
    }

    let limit = stride * stride;
    let near: Vec<Move> = legal
        .iter()
        .copied()
        .filter(|mv| occupied.iter().any(|&o| mv.distance_squared(o) < limit))
        .collect();

    if near.is_empty() {
        legal
    } else {
        near
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnk_core::{Grid, Mark};

    #[test]
    fn test_empty_board_gives_one_move() {
        for dim in 1..=9 {
            let state = GameState::new(dim, 1, Mark::X).unwrap();
            for stride in 0..5 {
                let moves = prune_moves(&state, stride);
                assert_eq!(moves.len(), 1, "dim {dim} stride {stride}");
                assert!(state.legal_moves().contains(&moves[0]));
            }
        }
    }

    #[test]
    fn test_stride_two_keeps_ring() {
        let grid = Grid::from_rows(&[
            "- - - - -",
            "- - - - -",
            "- - X - -",
            "- - - - -",
            "- - - - -",
        ])
        .unwrap();
        let state = GameState::from_grid(grid, 4, Mark::O).unwrap();
        let moves = prune_moves(&state, 2);
        // distance^2 < 4: the 8 neighbours plus nothing further
        assert_eq!(moves.len(), 8);
        assert!(moves.contains(&Move::new(1, 1)));
        assert!(!moves.contains(&Move::new(0, 2)));
        assert!(moves.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_stride_three_reaches_further() {
        let mut state = GameState::new(7, 4, Mark::X).unwrap();
        state.apply(Move::new(3, 3)).unwrap();
        let moves = prune_moves(&state, 3);
        // distance^2 < 9 is the 5x5 block around the mark
        assert_eq!(moves.len(), 24);
        assert!(moves.contains(&Move::new(1, 1)));
        assert!(!moves.contains(&Move::new(0, 3)));
    }

    #[test]
    fn test_zero_stride_falls_back_to_all_legal() {
        let grid = Grid::from_rows(&["X - -", "- - -", "- - -"]).unwrap();
        let state = GameState::from_grid(grid, 3, Mark::O).unwrap();
        assert_eq!(prune_moves(&state, 0), state.legal_moves());
    }

    #[test]
    fn test_finished_game_has_no_candidates() {
        let grid = Grid::from_rows(&["X X X", "O O -", "- - -"]).unwrap();
        let state = GameState::from_grid(grid, 3, Mark::O).unwrap();
        assert!(prune_moves(&state, 2).is_empty());
    }
}
