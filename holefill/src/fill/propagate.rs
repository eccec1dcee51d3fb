use std::collections::VecDeque;

use crate::boundary::{find_holes, neighbors8};
use crate::grid::{Grid, is_hole_value};

/// Fills holes from the boundary inward with the plain mean of already
/// filled 8-neighbors.
///
/// The queue is seeded with holes touching a valid pixel, in row-major
/// order, and processed FIFO. Pixels may be queued several times; the
/// pending check at pop time makes each transition happen once. Results
/// depend on that order since new values feed later neighbors.
///
/// Holes with no path to a valid pixel keep their sentinel.
pub fn fill_propagate(grid: &mut Grid) {
    let holes = find_holes(grid);
    if holes.is_empty() {
        return;
    }

    let mut pending = vec![false; grid.len()];
    for &h in &holes {
        pending[grid.index_of(h)] = true;
    }

    let is_filled = |grid: &Grid, pending: &[bool], idx: usize| {
        !pending[idx] && !is_hole_value(grid.pixels()[idx])
    };

    let mut queue: VecDeque<_> = holes
        .iter()
        .copied()
        .filter(|&h| neighbors8(grid, h).any(|n| is_filled(grid, &pending, grid.index_of(n))))
        .collect();
    tracing::trace!(holes = holes.len(), seeds = queue.len(), "Propagation fill");

    while let Some(u) = queue.pop_front() {
        let idx = grid.index_of(u);
        if !pending[idx] {
            continue;
        }

        let (sum, count) = neighbors8(grid, u)
            .map(|n| grid.index_of(n))
            .filter(|&n| is_filled(grid, &pending, n))
            .fold((0.0f64, 0usize), |(sum, count), n| {
                (sum + grid.pixels()[n] as f64, count + 1)
            });
        if count == 0 {
            continue;
        }

        grid.pixels_mut()[idx] = (sum / count as f64) as f32;
        pending[idx] = false;

        queue.extend(neighbors8(grid, u).filter(|&n| pending[grid.index_of(n)]));
    }
}
