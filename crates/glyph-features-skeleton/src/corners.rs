use glyph_features_core::{Grid, PixelPos};
use serde::{Deserialize, Serialize};

/// Which image corner a skeleton endpoint was anchored to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CornerCode {
    #[default]
    Unknown = 0,
    NorthWest = 1,
    SouthWest = 2,
    NorthEast = 3,
    SouthEast = 4,
}

impl CornerCode {
    /// Numeric code used in feature vectors.
    pub fn value(self) -> f64 {
        self as u8 as f64
    }
}

/// Foreground pixels nearest to each of the four image corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CornerPoints {
    pub top_left: PixelPos,
    pub top_right: PixelPos,
    pub bottom_left: PixelPos,
    pub bottom_right: PixelPos,
}

impl CornerPoints {
    /// The six unordered corner pairs in query order.
    pub fn pairs(&self) -> [(PixelPos, PixelPos); 6] {
        [
            (self.top_left, self.top_right),
            (self.top_left, self.bottom_left),
            (self.top_left, self.bottom_right),
            (self.top_right, self.bottom_left),
            (self.top_right, self.bottom_right),
            (self.bottom_left, self.bottom_right),
        ]
    }

    /// Corner code of `p`. When several corners coincide the first match in
    /// NW, NE, SW, SE order wins.
    pub fn classify(&self, p: PixelPos) -> CornerCode {
        if p == self.top_left {
            CornerCode::NorthWest
        } else if p == self.top_right {
            CornerCode::NorthEast
        } else if p == self.bottom_left {
            CornerCode::SouthWest
        } else if p == self.bottom_right {
            CornerCode::SouthEast
        } else {
            CornerCode::Unknown
        }
    }
}

/// Nearest foreground pixel to each corner by Euclidean distance, with ties
/// going to the first pixel in raster order. `None` without foreground.
pub fn find_corner_points(grid: &Grid) -> Option<CornerPoints> {
    let w = grid.width() as f64 - 1.0;
    let h = grid.height() as f64 - 1.0;
    let anchors = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)];

    let mut best: [Option<(f64, PixelPos)>; 4] = [None; 4];
    for p in grid.foreground_points() {
        let (x, y) = (p.x as f64, p.y as f64);
        for (slot, &(ax, ay)) in best.iter_mut().zip(anchors.iter()) {
            let d = ((x - ax).powi(2) + (y - ay).powi(2)).sqrt();
            if slot.is_none_or(|(bd, _)| d < bd) {
                *slot = Some((d, p));
            }
        }
    }

    match best {
        [Some((_, tl)), Some((_, tr)), Some((_, bl)), Some((_, br))] => Some(CornerPoints {
            top_left: tl,
            top_right: tr,
            bottom_left: bl,
            bottom_right: br,
        }),
        _ => None,
    }
}
