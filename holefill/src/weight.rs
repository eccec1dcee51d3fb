//! Weight kernels.
//!
//! The fill strategies only see [`WeightFn`]; which kernel to use is the
//! caller's decision. Any closure `Fn(Coord, Coord) -> f32` qualifies.
//! Weights must be finite and non-negative, nothing checks this.

use crate::coord::Coord;

/// Scores how much boundary pixel `v` should contribute to hole pixel `u`.
pub trait WeightFn {
    fn weight(&self, u: Coord, v: Coord) -> f32;
}

impl<F> WeightFn for F
where
    F: Fn(Coord, Coord) -> f32,
{
    #[inline]
    fn weight(&self, u: Coord, v: Coord) -> f32 {
        self(u, v)
    }
}

/// `1 / (d² + epsilon)^zeta` over the Euclidean distance `d`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InversePowerWeight {
    /// Keeps the kernel finite at zero distance.
    pub epsilon: f32,
    pub zeta: f32,
}

impl Default for InversePowerWeight {
    fn default() -> Self {
        Self {
            epsilon: 0.01,
            zeta: 3.0,
        }
    }
}

impl WeightFn for InversePowerWeight {
    #[inline]
    fn weight(&self, u: Coord, v: Coord) -> f32 {
        1.0 / (u.distance_squared(v) + self.epsilon).powf(self.zeta)
    }
}

/// Inverse power kernel with distance measured in window sizes.
///
/// Pairs with the windowed strategy so the falloff tracks the window instead
/// of absolute pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowScaledWeight {
    pub window_size: usize,
    pub epsilon: f32,
    pub zeta: f32,
}

impl WindowScaledWeight {
    pub fn new(window_size: usize) -> Self {
        let InversePowerWeight { epsilon, zeta } = InversePowerWeight::default();
        Self {
            window_size,
            epsilon,
            zeta,
        }
    }
}

impl WeightFn for WindowScaledWeight {
    #[inline]
    fn weight(&self, u: Coord, v: Coord) -> f32 {
        let window = self.window_size as f32;
        let scaled = u.distance_squared(v) / (window * window);
        1.0 / (scaled + self.epsilon).powf(self.zeta)
    }
}
