//! sRGB transfer curve and luma.

/// Rec.601 luma weights applied to linear channels.
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Linear luminance of an 8-bit sRGB pixel, in `[0, 1]`.
#[inline]
pub fn rgb_to_luma_linear([r, g, b]: [u8; 3]) -> f32 {
    let [wr, wg, wb] = LUMA_WEIGHTS;
    wr * srgb_to_linear(r as f32 / 255.0)
        + wg * srgb_to_linear(g as f32 / 255.0)
        + wb * srgb_to_linear(b as f32 / 255.0)
}

/// Linear value to an 8-bit sRGB sample. Negative input maps to black.
#[inline]
pub fn linear_to_srgb_u8(value: f32) -> u8 {
    let srgb = linear_to_srgb(value.max(0.0)).clamp(0.0, 1.0);
    (srgb * 255.0) as u8
}
