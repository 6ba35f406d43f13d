//! Alpha-beta benchmarks.
//!
//! Run with: `cargo bench -p mnk-minimax`
//!
//! These benchmarks measure:
//! - Exhaustive 3x3 search with and without cutoffs
//! - Fixed-horizon feature search on larger boards

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mnk_core::{GameState, Mark, Move};
use mnk_minimax::{AlphaBeta, MinimaxConfig};

/// Position after playing `moves` from an empty board.
fn position(dim: usize, k: usize, moves: &[(usize, usize)]) -> GameState {
    let mut state = GameState::new(dim, k, Mark::X).unwrap();
    for &(row, col) in moves {
        state.apply(Move::new(row, col)).unwrap();
    }
    state
}

// =============================================================================
// Exhaustive 3x3 Search
// =============================================================================

fn bench_tictactoe(c: &mut Criterion) {
    let mut group = c.benchmark_group("alphabeta_tictactoe");

    for (label, config) in [
        ("alphabeta", MinimaxConfig::full()),
        ("plain", MinimaxConfig::full().without_pruning()),
    ] {
        group.bench_function(BenchmarkId::new(label, "after_centre"), |b| {
            let mut state = position(3, 3, &[(1, 1)]);
            let engine = AlphaBeta::new(config.clone());
            b.iter(|| black_box(engine.search(&mut state).unwrap()));
        });
    }

    group.finish();
}

// =============================================================================
// Feature Search on Larger Boards
// =============================================================================

fn bench_large_boards(c: &mut Criterion) {
    let mut group = c.benchmark_group("alphabeta_features");
    let opening = [(4, 4), (4, 5), (5, 4), (3, 3), (5, 5), (6, 6)];

    for plies in [1u32, 2, 3] {
        group.bench_with_input(BenchmarkId::new("10x10_k5", plies), &plies, |b, &plies| {
            let mut state = position(10, 5, &opening);
            let engine = AlphaBeta::new(MinimaxConfig::with_plies(plies));
            b.iter(|| black_box(engine.search(&mut state).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tictactoe, bench_large_boards);
criterion_main!(benches);
