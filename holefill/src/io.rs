//! PNG in, PNG out.
//!
//! The image is reduced to linear luma, the mask marks holes where its
//! linear gray level is below one half. Output is written as 8-bit sRGB gray.

use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat, RgbImage};
use thiserror::Error;

use crate::color::{linear_to_srgb_u8, rgb_to_luma_linear, srgb_to_linear};
use crate::grid::{Grid, HOLE};

/// Mask gray level below which a pixel becomes a hole.
pub const MASK_THRESHOLD: f32 = 0.5;

#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("Failed to load image '{path}': {source}")]
    Load {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image '{path}': {source}")]
    Save {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Mask is {mask_width}x{mask_height} but image is {width}x{height}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        mask_width: u32,
        mask_height: u32,
    },
}

/// Loads `image_path` as linear luma and carves out the holes given by
/// `mask_path`.
pub fn load_masked(image_path: &Path, mask_path: &Path) -> Result<Grid, ImageIoError> {
    let open = |path: &Path| {
        image::open(path).map_err(|source| ImageIoError::Load {
            path: path.to_path_buf(),
            source,
        })
    };

    let image = open(image_path)?.to_rgb8();
    let mask = open(mask_path)?.to_luma8();
    tracing::debug!(
        image = %image_path.display(),
        mask = %mask_path.display(),
        width = image.width(),
        height = image.height(),
        "Loaded image and mask"
    );

    masked_grid(&image, &mask)
}

/// Combines an RGB image and a gray mask into a grid with holes.
pub fn masked_grid(image: &RgbImage, mask: &GrayImage) -> Result<Grid, ImageIoError> {
    if image.dimensions() != mask.dimensions() {
        return Err(ImageIoError::DimensionMismatch {
            width: image.width(),
            height: image.height(),
            mask_width: mask.width(),
            mask_height: mask.height(),
        });
    }

    let pixels = image
        .pixels()
        .zip(mask.pixels())
        .map(|(rgb, m)| {
            let mask_level = srgb_to_linear(m.0[0] as f32 / 255.0);
            if mask_level < MASK_THRESHOLD {
                HOLE
            } else {
                rgb_to_luma_linear(rgb.0)
            }
        })
        .collect();

    Ok(Grid::new(
        image.width() as usize,
        image.height() as usize,
        pixels,
    ))
}

/// Converts a grid to 8-bit sRGB gray. Leftover holes become black.
pub fn to_gray_image(grid: &Grid) -> GrayImage {
    let bytes: Vec<u8> = grid.pixels().iter().map(|&v| linear_to_srgb_u8(v)).collect();
    GrayImage::from_raw(grid.width() as u32, grid.height() as u32, bytes)
        .expect("grid length always matches its dimensions")
}

pub fn save_luma_png(grid: &Grid, path: &Path) -> Result<(), ImageIoError> {
    to_gray_image(grid)
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| ImageIoError::Save {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), "Saved output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coord;
    use image::{Luma, Rgb};

    #[test]
    fn dark_mask_pixels_become_holes() {
        let image = RgbImage::from_pixel(3, 2, Rgb([255, 255, 255]));
        let mut mask = GrayImage::from_pixel(3, 2, Luma([255]));
        mask.put_pixel(1, 0, Luma([0]));
        mask.put_pixel(2, 1, Luma([100]));

        let grid = masked_grid(&image, &mask).unwrap();
        assert_eq!(grid.hole_count(), 2);
        assert!(grid.is_hole(Coord::new(1, 0)));
        assert!(grid.is_hole(Coord::new(2, 1)));
        assert!((grid.get(0, 0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn mask_threshold_is_applied_in_linear_space() {
        let image = RgbImage::from_pixel(2, 1, Rgb([10, 10, 10]));
        let mut mask = GrayImage::new(2, 1);
        // sRGB 0.7 is about 0.45 linear, sRGB 0.8 is about 0.6.
        mask.put_pixel(0, 0, Luma([179]));
        mask.put_pixel(1, 0, Luma([204]));

        let grid = masked_grid(&image, &mask).unwrap();
        assert!(grid.is_hole(Coord::new(0, 0)));
        assert!(!grid.is_hole(Coord::new(1, 0)));
    }

    #[test]
    fn mismatched_mask_is_rejected() {
        let image = RgbImage::new(4, 4);
        let mask = GrayImage::new(4, 3);
        let err = masked_grid(&image, &mask).unwrap_err();
        assert!(matches!(
            err,
            ImageIoError::DimensionMismatch {
                mask_height: 3,
                ..
            }
        ));
    }

    #[test]
    fn holes_are_written_as_black() {
        let grid = Grid::new(3, 1, vec![HOLE, 0.0, 1.5]);
        let gray = to_gray_image(&grid);
        assert_eq!(gray.as_raw(), &vec![0, 0, 255]);
    }

    #[test]
    fn png_round_trip_through_disk() {
        let dir = std::env::temp_dir().join(format!("holefill_io_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let image_path = dir.join("image.png");
        let mask_path = dir.join("mask.png");
        let out_path = dir.join("out.png");

        RgbImage::from_pixel(4, 4, Rgb([200, 200, 200]))
            .save(&image_path)
            .unwrap();
        let mut mask = GrayImage::from_pixel(4, 4, Luma([255]));
        mask.put_pixel(2, 2, Luma([0]));
        mask.save(&mask_path).unwrap();

        let mut grid = load_masked(&image_path, &mask_path).unwrap();
        assert_eq!(grid.hole_count(), 1);

        crate::fill::fill_propagate(&mut grid);
        save_luma_png(&grid, &out_path).unwrap();

        let out = image::open(&out_path).unwrap().to_luma8();
        assert_eq!(out.dimensions(), (4, 4));
        let center = out.get_pixel(2, 2).0[0];
        let corner = out.get_pixel(0, 0).0[0];
        assert!(center.abs_diff(corner) <= 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_masked(Path::new("/nonexistent/a.png"), Path::new("/nonexistent/b.png"))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/a.png"));
    }
}
