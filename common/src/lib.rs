pub mod float_ext;
pub mod log_setup;

pub const EPSILON: f64 = 1e-6;
