//! Hole and boundary discovery.
//!
//! Holes are found by a row-major scan; the boundary is every in-bounds,
//! non-hole pixel one connectivity step away from some hole. Both lists are
//! rebuilt on every fill call.


use hashbrown::HashSet;

use crate::coord::Coord;
use crate::grid::Grid;

const AXIS_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Pixel adjacency used for boundary discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// Horizontal and vertical neighbors only.
    Four,
    /// Includes the diagonals.
    Eight,
}

impl Connectivity {
    /// Neighbor offsets, axis-aligned ones first.
    #[inline]
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Connectivity::Four => &AXIS_OFFSETS,
            Connectivity::Eight => &NEIGHBOR_OFFSETS,
        }
    }
}

/// In-bounds 8-neighbors of `c`, edge pixels get a truncated set.
pub(crate) fn neighbors8(grid: &Grid, c: Coord) -> impl Iterator<Item = Coord> + '_ {
    Connectivity::Eight
        .offsets()
        .iter()
        .map(move |&(dx, dy)| c.offset(dx, dy))
        .filter(move |&n| grid.contains(n))
}

/// Result of a detection pass.
#[derive(Debug, Clone, Default)]
pub struct Detection {
    /// Hole coordinates in row-major scan order.
    pub holes: Vec<Coord>,
    /// Boundary coordinates in discovery order, no duplicates.
    pub boundary: Vec<Coord>,
}

/// Every sample with a negative value, in row-major order.
pub fn find_holes(grid: &Grid) -> Vec<Coord> {
    grid.pixels()
        .iter()
        .enumerate()
        .filter(|&(_, &v)| crate::grid::is_hole_value(v))
        .map(|(idx, _)| grid.coord_of(idx))
        .collect()
}

/// Valid pixels adjacent to at least one of `holes`.
///
/// Each boundary pixel appears once no matter how many holes it touches.
/// Returns an empty list when there are no holes or no valid neighbors.
pub fn find_boundary(grid: &Grid, holes: &[Coord], connectivity: Connectivity) -> Vec<Coord> {
    let mut boundary = Vec::new();
    let mut seen: HashSet<Coord> = HashSet::new();

    for &hole in holes {
        for &(dx, dy) in connectivity.offsets() {
            let neighbor = hole.offset(dx, dy);
            if grid.is_valid(neighbor) && seen.insert(neighbor) {
                boundary.push(neighbor);
            }
        }
    }

    boundary
}

/// Runs hole and boundary discovery together.
pub fn detect(grid: &Grid, connectivity: Connectivity) -> Detection {
    let holes = find_holes(grid);
    let boundary = find_boundary(grid, &holes, connectivity);
    Detection { holes, boundary }
}
