use super::{WeightedSum, write_back};
use crate::boundary::find_holes;
use crate::grid::Grid;
use crate::weight::WeightFn;

/// Fills each hole from the valid pixels inside a `window_size` square
/// centered on it.
///
/// Offsets run from `-window_size / 2` to `window_size - window_size / 2 - 1`,
/// so an even size leans toward negative offsets. Any valid sample in the
/// window counts, not only boundary-adjacent ones. A hole with no valid
/// sample in its window is set to `0.0`.
pub fn fill_windowed<W: WeightFn + ?Sized>(grid: &mut Grid, weight: &W, window_size: usize) {
    let holes = find_holes(grid);
    if holes.is_empty() {
        return;
    }
    tracing::trace!(holes = holes.len(), window_size, "Windowed fill");

    let half = (window_size / 2) as i32;
    let end = window_size as i32 - half;

    let values: Vec<f32> = holes
        .iter()
        .map(|&u| {
            let mut sum = WeightedSum::default();
            for dy in -half..end {
                for dx in -half..end {
                    let v = u.offset(dx, dy);
                    if grid.is_valid(v) {
                        sum.add(weight.weight(u, v), grid.value_at(v));
                    }
                }
            }
            sum.average()
        })
        .collect();

    write_back(grid, &holes, &values);
}
