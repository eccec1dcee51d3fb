//! Hole extent used to size radius queries.

use crate::coord::Coord;

/// Default padding applied to the farthest hole-to-centroid distance.
pub const DEFAULT_RADIUS_MARGIN: f32 = 1.5;

/// Smallest automatic radius. Covers the diagonal neighbors (distance √2)
/// of a hole pixel but not pixels two steps away.
pub const MIN_SEARCH_RADIUS: f32 = 1.5;

/// Centroid and extent of a set of hole pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoleGeometry {
    pub centroid: (f32, f32),
    /// Largest Euclidean distance from the centroid to any hole pixel.
    pub max_distance: f32,
}

impl HoleGeometry {
    /// Returns `None` for an empty hole list.
    pub fn from_holes(holes: &[Coord]) -> Option<Self> {
        if holes.is_empty() {
            return None;
        }

        let count = holes.len() as f64;
        let (sum_x, sum_y) = holes.iter().fold((0.0f64, 0.0f64), |(sx, sy), c| {
            (sx + c.x as f64, sy + c.y as f64)
        });
        let cx = (sum_x / count) as f32;
        let cy = (sum_y / count) as f32;

        let max_distance = holes
            .iter()
            .map(|c| {
                let dx = c.x as f32 - cx;
                let dy = c.y as f32 - cy;
                (dx * dx + dy * dy).sqrt()
            })
            .fold(0.0f32, f32::max);

        Some(Self {
            centroid: (cx, cy),
            max_distance,
        })
    }

    /// `margin * max_distance`, never below [`MIN_SEARCH_RADIUS`].
    ///
    /// A heuristic: for non-convex or multi-component holes the query may
    /// miss boundary pixels a full scan would have used.
    pub fn search_radius(&self, margin: f32) -> f32 {
        (self.max_distance * margin).max(MIN_SEARCH_RADIUS)
    }
}
