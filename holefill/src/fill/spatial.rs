use super::{WeightedSum, write_back};
use crate::boundary::{Connectivity, Detection, detect};
use crate::config::SpatialQuery;
use crate::geometry::HoleGeometry;
use crate::grid::Grid;
use crate::spatial::{KdTree, Neighbor};
use crate::weight::WeightFn;

/// Query after the automatic radius has been resolved.
#[derive(Debug, Clone, Copy)]
enum Resolved {
    Radius(f32),
    Nearest(usize),
}

/// Fills each hole with the weighted average of the boundary pixels a k-d
/// tree query returns for it.
///
/// With [`SpatialQuery::AutoRadius`] the radius comes from
/// [`HoleGeometry::search_radius`], computed once over all holes.
pub fn fill_spatial<W: WeightFn + ?Sized>(grid: &mut Grid, weight: &W, query: SpatialQuery) {
    let Detection { holes, boundary } = detect(grid, Connectivity::Eight);
    if holes.is_empty() {
        return;
    }

    let resolved = match query {
        SpatialQuery::Radius(radius) => Resolved::Radius(radius),
        SpatialQuery::Nearest(k) => Resolved::Nearest(k),
        SpatialQuery::AutoRadius { margin } => {
            let radius = HoleGeometry::from_holes(&holes)
                .map_or(0.0, |geometry| geometry.search_radius(margin));
            Resolved::Radius(radius)
        }
    };
    tracing::trace!(
        holes = holes.len(),
        boundary = boundary.len(),
        query = ?resolved,
        "Spatial fill"
    );

    let Some(tree) = KdTree::build(&boundary) else {
        write_back(grid, &holes, &vec![0.0; holes.len()]);
        return;
    };
    let samples: Vec<f32> = boundary.iter().map(|&b| grid.value_at(b)).collect();

    let mut candidates: Vec<Neighbor> = Vec::new();
    let values: Vec<f32> = holes
        .iter()
        .map(|&u| {
            match resolved {
                Resolved::Radius(radius) => tree.radius_search_into(u, radius, &mut candidates),
                Resolved::Nearest(k) => candidates = tree.k_nearest(u, k),
            }

            let mut sum = WeightedSum::default();
            for n in &candidates {
                sum.add(weight.weight(u, tree.point(n.index)), samples[n.index]);
            }
            sum.average()
        })
        .collect();

    write_back(grid, &holes, &values);
}
