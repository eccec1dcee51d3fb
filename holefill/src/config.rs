//! Strategy selection and its parameters.

use std::str::FromStr;

use crate::geometry::DEFAULT_RADIUS_MARGIN;

/// How the spatial-index strategy picks candidate boundary pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpatialQuery {
    /// Fixed search radius in pixels.
    Radius(f32),
    /// Radius derived from the hole extent, padded by `margin`.
    AutoRadius { margin: f32 },
    /// The `k` nearest boundary pixels.
    Nearest(usize),
}

impl Default for SpatialQuery {
    fn default() -> Self {
        SpatialQuery::AutoRadius {
            margin: DEFAULT_RADIUS_MARGIN,
        }
    }
}

/// Parameters a fill strategy cannot run with.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InvalidConfigError {
    #[error("Window size must be positive, got {0}")]
    WindowSize(usize),
    #[error("Search radius must be positive, got {0}")]
    Radius(f32),
    #[error("Radius margin must be positive, got {0}")]
    Margin(f32),
    #[error("Nearest neighbor count must be positive, got {0}")]
    NearestCount(usize),
}

impl SpatialQuery {
    pub fn check(&self) -> Result<(), InvalidConfigError> {
        match *self {
            SpatialQuery::Radius(radius) if !(radius > 0.0 && radius.is_finite()) => {
                Err(InvalidConfigError::Radius(radius))
            }
            SpatialQuery::AutoRadius { margin } if !(margin > 0.0 && margin.is_finite()) => {
                Err(InvalidConfigError::Margin(margin))
            }
            SpatialQuery::Nearest(0) => Err(InvalidConfigError::NearestCount(0)),
            _ => Ok(()),
        }
    }

    pub fn validate(&self) {
        if let Err(e) = self.check() {
            panic!("{}", e);
        }
    }
}

/// Hole filling strategy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FillMethod {
    /// Weighted average over every boundary pixel. O(holes * boundary).
    Global,
    /// Weighted average over valid pixels in a square window per hole pixel.
    Windowed { window_size: usize },
    /// Boundary-inward averaging of filled 8-neighbors, no weights. O(holes).
    #[default]
    Propagate,
    /// Weighted average over boundary pixels returned by a k-d tree query.
    Spatial(SpatialQuery),
}

impl FillMethod {
    pub fn name(&self) -> &'static str {
        match self {
            FillMethod::Global => "global",
            FillMethod::Windowed { .. } => "windowed",
            FillMethod::Propagate => "propagate",
            FillMethod::Spatial(_) => "spatial",
        }
    }

    pub fn check(&self) -> Result<(), InvalidConfigError> {
        match *self {
            FillMethod::Windowed { window_size: 0 } => Err(InvalidConfigError::WindowSize(0)),
            FillMethod::Spatial(query) => query.check(),
            _ => Ok(()),
        }
    }

    /// Panicking form of [`FillMethod::check`].
    pub fn validate(&self) {
        if let Err(e) = self.check() {
            panic!("{}", e);
        }
    }
}

/// Default window used when a method name is parsed without parameters.
pub const DEFAULT_WINDOW_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown fill method '{0}', expected one of: global, windowed, propagate, spatial")]
pub struct UnknownMethodError(pub String);

impl FromStr for FillMethod {
    type Err = UnknownMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "global" | "exact" => Ok(FillMethod::Global),
            "windowed" | "window" => Ok(FillMethod::Windowed {
                window_size: DEFAULT_WINDOW_SIZE,
            }),
            "propagate" | "bfs" => Ok(FillMethod::Propagate),
            "spatial" | "kdtree" => Ok(FillMethod::Spatial(SpatialQuery::default())),
            _ => Err(UnknownMethodError(s.to_string())),
        }
    }
}
