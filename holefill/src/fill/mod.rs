//! Hole filling strategies.
//!
//! Four interchangeable algorithms over the same [`Grid`]:
//!
//! - [`fill_global`]: weighted average over every boundary pixel
//! - [`fill_windowed`]: weighted average over valid pixels in a square window
//! - [`fill_propagate`]: unweighted boundary-inward averaging
//! - [`fill_spatial`]: weighted average over a k-d tree query result
//!
//! The weighted strategies read every sample from the input as it was when
//! the call started, so filled values never feed later holes. When a hole
//! pixel gets no usable weight it is set to `0.0`.
//!
//! Propagation is different: freshly filled pixels are used for their
//! neighbors, and pixels with no reachable valid neighbor keep the sentinel.
//! Callers that care can check [`Grid::hole_count`] afterwards.

mod global;
mod propagate;
mod spatial;
mod windowed;


use std::time::Instant;

use common::float_ext::FloatExt;

pub use global::fill_global;
pub use propagate::fill_propagate;
pub use spatial::fill_spatial;
pub use windowed::fill_windowed;

use crate::config::FillMethod;
use crate::coord::Coord;
use crate::grid::Grid;
use crate::weight::WeightFn;

/// Runs the selected strategy on `grid` in place.
///
/// Panics if `method` carries invalid parameters.
pub fn fill<W: WeightFn + ?Sized>(grid: &mut Grid, method: &FillMethod, weight: &W) {
    method.validate();

    let start = Instant::now();
    let holes = grid.hole_count();
    if holes == 0 {
        tracing::debug!("No holes to fill");
        return;
    }

    match *method {
        FillMethod::Global => fill_global(grid, weight),
        FillMethod::Windowed { window_size } => fill_windowed(grid, weight, window_size),
        FillMethod::Propagate => fill_propagate(grid),
        FillMethod::Spatial(query) => fill_spatial(grid, weight, query),
    }

    let remaining = grid.hole_count();
    tracing::debug!(
        method = method.name(),
        width = grid.width(),
        height = grid.height(),
        holes,
        remaining,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Hole fill finished"
    );
    if remaining > 0 {
        tracing::warn!(
            "{} of {} hole pixels are unreachable and keep the sentinel",
            remaining,
            holes
        );
    }
}

/// Running `Σ w·v` and `Σ w`, accumulated in f64.
#[derive(Debug, Clone, Copy, Default)]
struct WeightedSum {
    num: f64,
    den: f64,
}

impl WeightedSum {
    #[inline]
    fn add(&mut self, weight: f32, value: f32) {
        self.num += weight as f64 * value as f64;
        self.den += weight as f64;
    }

    /// Weighted mean, or `0.0` when the weights sum to (nearly) nothing.
    #[inline]
    fn average(&self) -> f32 {
        if self.den.is_near_zero() {
            0.0
        } else {
            (self.num / self.den) as f32
        }
    }
}

/// Writes results computed against the input snapshot.
fn write_back(grid: &mut Grid, holes: &[Coord], values: &[f32]) {
    debug_assert_eq!(holes.len(), values.len());
    for (&hole, &value) in holes.iter().zip(values) {
        grid.set(hole, value);
    }
}
