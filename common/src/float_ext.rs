pub trait FloatExt: Sized {
    fn approximately_eq(self, other: Self) -> bool;

    fn approximately_eq_eps(self, other: Self, eps: Self) -> bool;

    /// True when the value is too close to zero to divide by safely.
    fn is_near_zero(self) -> bool;
}

impl FloatExt for f32 {
    fn approximately_eq(self, other: Self) -> bool {
        self.approximately_eq_eps(other, crate::EPSILON as f32)
    }

    fn approximately_eq_eps(self, other: Self, eps: Self) -> bool {
        (self - other).abs() < eps
    }

    fn is_near_zero(self) -> bool {
        self.abs() <= f32::EPSILON
    }
}

impl FloatExt for f64 {
    fn approximately_eq(self, other: Self) -> bool {
        self.approximately_eq_eps(other, crate::EPSILON)
    }

    fn approximately_eq_eps(self, other: Self, eps: Self) -> bool {
        (self - other).abs() < eps
    }

    // Weighted sums are accumulated in f64 but the fallback threshold
    // stays at single precision epsilon.
    fn is_near_zero(self) -> bool {
        self.abs() <= f32::EPSILON as f64
    }
}
