use crate::{GrayImageView, GridError};
use serde::{Deserialize, Serialize};

/// Intensities at or below this value are treated as stroke pixels.
pub const DEFAULT_FOREGROUND_THRESHOLD: u8 = 128;

const DIRS4: [(i64, i64); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const DIRS_DIAGONAL: [(i64, i64); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Integer pixel position in grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PixelPos {
    pub x: usize,
    pub y: usize,
}

impl PixelPos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Flattened identity `y * width + x`.
    #[inline]
    pub fn index(self, width: usize) -> usize {
        self.y * width + self.x
    }

    #[inline]
    pub fn from_index(index: usize, width: usize) -> Self {
        Self {
            x: index % width,
            y: index / width,
        }
    }

    pub fn to_point(self) -> nalgebra::Point2<f64> {
        nalgebra::Point2::new(self.x as f64, self.y as f64)
    }
}

/// Binary glyph grid.
///
/// The grid owns a foreground flag for every cell, stored row-major. Dimensions never change after construction. Search
/// scratch (distances, predecessors) is kept by the algorithms themselves in
/// flat arrays keyed by [`PixelPos::index`], so sharing a `&Grid` across
/// concurrent queries is safe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    foreground: Vec<bool>,
}

impl Grid {
    /// Threshold a grayscale view: a pixel is foreground if its intensity is
    /// `<= threshold`.
    pub fn from_gray(view: &GrayImageView<'_>, threshold: u8) -> Result<Self, GridError> {
        view.validate()?;
        let foreground = view.data.iter().map(|&v| v <= threshold).collect();
        Ok(Self {
            width: view.width,
            height: view.height,
            foreground,
        })
    }

    /// Build a grid straight from a row-major foreground mask.
    pub fn from_mask(width: usize, height: usize, mask: Vec<bool>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }
        let expected = width * height;
        if mask.len() != expected {
            return Err(GridError::BufferSizeMismatch {
                expected,
                got: mask.len(),
            });
        }
        Ok(Self {
            width,
            height,
            foreground: mask,
        })
    }

    /// Parse an ASCII picture, `#` marks foreground. Rows must have equal length.
    pub fn from_ascii(rows: &[&str]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut mask = Vec::with_capacity(width * height);
        for row in rows {
            mask.extend(row.chars().map(|c| c == '#'));
        }
        Self::from_mask(width, height, mask)
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
        self.foreground.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.foreground.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    #[inline]
    pub fn is_foreground(&self, x: usize, y: usize) -> bool {
        self.foreground[y * self.width + x]
    }

    #[inline]
    pub fn is_foreground_at(&self, index: usize) -> bool {
        self.foreground[index]
    }

    /// Signed lookup; anything outside the grid is background.
    #[inline]
    pub fn is_foreground_signed(&self, x: i64, y: i64) -> bool {
        self.in_bounds(x, y) && self.foreground[y as usize * self.width + x as usize]
    }

    pub fn mask(&self) -> &[bool] {
        &self.foreground
    }

    pub fn foreground_count(&self) -> usize {
        self.foreground.iter().filter(|&&fg| fg).count()
    }

    /// Foreground pixels in raster order.
    pub fn foreground_points(&self) -> Vec<PixelPos> {
        self.foreground
            .iter()
            .enumerate()
            .filter(|(_, &fg)| fg)
            .map(|(i, _)| PixelPos::from_index(i, self.width))
            .collect()
    }

    /// Foreground 4-neighbors of `p`, bounded by the grid extent.
    pub fn neighbors4(&self, p: PixelPos) -> impl Iterator<Item = PixelPos> + '_ {
        self.foreground_neighbors(p, &DIRS4)
    }

    /// Foreground diagonal neighbors of `p`, bounded by the grid extent.
    pub fn neighbors_diagonal(&self, p: PixelPos) -> impl Iterator<Item = PixelPos> + '_ {
        self.foreground_neighbors(p, &DIRS_DIAGONAL)
    }

    fn foreground_neighbors<'a>(
        &'a self,
        p: PixelPos,
        dirs: &'a [(i64, i64)],
    ) -> impl Iterator<Item = PixelPos> + 'a {
        dirs.iter().filter_map(move |&(dx, dy)| {
            let nx = p.x as i64 + dx;
            let ny = p.y as i64 + dy;
            if self.is_foreground_signed(nx, ny) {
                Some(PixelPos::new(nx as usize, ny as usize))
            } else {
                None
            }
        })
    }

    /// Independent copy with fresh backing storage.
    pub fn deep_clone(&self) -> Self {
        self.clone()
    }
}
