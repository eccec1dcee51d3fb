use super::{WeightedSum, write_back};
use crate::boundary::{Connectivity, Detection, detect};
use crate::coord::Coord;
use crate::grid::Grid;
use crate::weight::WeightFn;

/// Fills each hole with the weighted average of all boundary pixels.
///
/// Cost is O(holes * boundary). Every hole sees the same boundary values.
pub fn fill_global<W: WeightFn + ?Sized>(grid: &mut Grid, weight: &W) {
    let Detection { holes, boundary } = detect(grid, Connectivity::Eight);
    if holes.is_empty() {
        return;
    }
    tracing::trace!(holes = holes.len(), boundary = boundary.len(), "Global fill");

    let samples: Vec<(Coord, f32)> = boundary.iter().map(|&b| (b, grid.value_at(b))).collect();

    let values: Vec<f32> = holes
        .iter()
        .map(|&u| {
            let mut sum = WeightedSum::default();
            for &(v, value) in &samples {
                sum.add(weight.weight(u, v), value);
            }
            sum.average()
        })
        .collect();

    write_back(grid, &holes, &values);
}
