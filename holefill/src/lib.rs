//! Holefill - fills unknown regions of a single-channel linear image.
//!
//! A [`Grid`] holds linear intensities in row-major order, with negative
//! samples marking holes. One of four strategies replaces the holes in
//! place by interpolating from the surrounding valid pixels:
//!
//! - [`FillMethod::Global`] - weighted average of the whole hole boundary
//! - [`FillMethod::Windowed`] - weighted average over a square window
//! - [`FillMethod::Propagate`] - unweighted boundary-inward averaging
//! - [`FillMethod::Spatial`] - weighted average over a k-d tree query
//!
//! # Quick Start
//!
//! ```rust
//! use holefill::{Coord, FillMethod, Grid, HOLE, InversePowerWeight, fill};
//!
//! let mut grid = Grid::new_filled(5, 5, 0.5);
//! grid.set(Coord::new(2, 2), HOLE);
//!
//! fill(&mut grid, &FillMethod::Global, &InversePowerWeight::default());
//! assert_eq!(grid.value_at(Coord::new(2, 2)), 0.5);
//! ```

pub mod boundary;
pub mod color;
pub mod config;
pub mod coord;
pub mod fill;
pub mod geometry;
pub mod grid;
pub mod io;
pub mod spatial;
pub mod weight;

// ============================================================================
// Core types
// ============================================================================

pub use coord::Coord;
pub use grid::{Grid, HOLE};

// ============================================================================
// Detection
// ============================================================================

pub use boundary::{Connectivity, Detection, detect, find_boundary, find_holes};
pub use geometry::{DEFAULT_RADIUS_MARGIN, HoleGeometry};

// ============================================================================
// Filling
// ============================================================================

pub use config::{FillMethod, InvalidConfigError, SpatialQuery};
pub use fill::{fill, fill_global, fill_propagate, fill_spatial, fill_windowed};
pub use weight::{InversePowerWeight, WeightFn, WindowScaledWeight};

// ============================================================================
// Image I/O
// ============================================================================

pub use io::{ImageIoError, load_masked, save_luma_png};
