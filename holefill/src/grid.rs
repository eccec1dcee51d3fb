//! Row-major single-channel image with a negative hole sentinel.

use std::ops::{Index, IndexMut};

use crate::coord::Coord;

/// Canonical sentinel written by collaborators for unknown pixels.
///
/// Any strictly negative value marks a hole, this is just the one we produce.
pub const HOLE: f32 = -1.0;

#[inline]
pub fn is_hole_value(value: f32) -> bool {
    value < 0.0
}

/// Flat `width * height` buffer of linear intensities.
///
/// Fill strategies take `&mut Grid` and replace hole samples in place; the
/// caller gets the storage back with [`Grid::into_vec`].
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pixels: Vec<f32>,
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize, pixels: Vec<f32>) -> Self {
        assert_eq!(
            pixels.len(),
            width * height,
            "pixels length must equal width * height"
        );
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn new_filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            pixels: vec![value; width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[y * self.width + x]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut f32 {
        debug_assert!(x < self.width && y < self.height);
        &mut self.pixels[y * self.width + x]
    }

    /// Flat index of an in-bounds coordinate.
    #[inline]
    pub fn index_of(&self, c: Coord) -> usize {
        debug_assert!(self.contains(c));
        c.y as usize * self.width + c.x as usize
    }

    #[inline]
    pub fn coord_of(&self, idx: usize) -> Coord {
        Coord::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as usize) < self.width && (c.y as usize) < self.height
    }

    #[inline]
    pub fn value_at(&self, c: Coord) -> f32 {
        self.pixels[self.index_of(c)]
    }

    #[inline]
    pub fn set(&mut self, c: Coord, value: f32) {
        let idx = self.index_of(c);
        self.pixels[idx] = value;
    }

    #[inline]
    pub fn is_hole(&self, c: Coord) -> bool {
        is_hole_value(self.value_at(c))
    }

    /// In-bounds and holding a non-negative sample.
    #[inline]
    pub fn is_valid(&self, c: Coord) -> bool {
        self.contains(c) && !self.is_hole(c)
    }

    /// Number of sentinel samples still present.
    pub fn hole_count(&self) -> usize {
        self.pixels.iter().filter(|&&v| is_hole_value(v)).count()
    }

    pub fn has_holes(&self) -> bool {
        self.pixels.iter().any(|&v| is_hole_value(v))
    }

    #[inline]
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [f32] {
        &mut self.pixels
    }

    #[inline]
    pub fn into_vec(self) -> Vec<f32> {
        self.pixels
    }
}

impl Index<Coord> for Grid {
    type Output = f32;

    #[inline]
    fn index(&self, c: Coord) -> &Self::Output {
        &self.pixels[self.index_of(c)]
    }
}

impl IndexMut<Coord> for Grid {
    #[inline]
    fn index_mut(&mut self, c: Coord) -> &mut Self::Output {
        let idx = self.index_of(c);
        &mut self.pixels[idx]
    }
}

impl From<Grid> for Vec<f32> {
    #[inline]
    fn from(grid: Grid) -> Self {
        grid.pixels
    }
}
