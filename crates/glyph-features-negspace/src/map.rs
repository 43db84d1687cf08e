use glyph_features_core::{GrayImage, Grid, GridError};
use serde::{Deserialize, Serialize};

/// Per-pixel classification of a negative-space map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpaceClass {
    Foreground,
    /// Negative space surrounded by stroke or other negative space.
    Interior,
    /// Negative space on the edge towards untouched background.
    Border,
    Background,
}

impl SpaceClass {
    /// Debug rendering intensity.
    pub fn gray_level(self) -> u8 {
        match self {
            SpaceClass::Foreground => 50,
            SpaceClass::Interior => 150,
            SpaceClass::Border => 220,
            SpaceClass::Background => 255,
        }
    }
}

/// Classified negative space of one glyph, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct NegativeSpaceMap {
    width: usize,
    height: usize,
    classes: Vec<SpaceClass>,
    values: Vec<f64>,
}

const DIRS4: [(i64, i64); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

impl NegativeSpaceMap {
    /// Classify accumulated ray weights against the source glyph.
    pub(crate) fn classify(grid: &Grid, values: Vec<f64>) -> Self {
        let (width, height) = (grid.width(), grid.height());
        let hit = |x: i64, y: i64| values[y as usize * width + x as usize] > 0.0;

        let mut classes: Vec<SpaceClass> = (0..grid.len())
            .map(|i| {
                let (x, y) = ((i % width) as i64, (i / width) as i64);
                if values[i] > 0.0 {
                    let open = DIRS4.iter().any(|&(dx, dy)| {
                        let (nx, ny) = (x + dx, y + dy);
                        !grid.in_bounds(nx, ny)
                            || (!grid.is_foreground(nx as usize, ny as usize) && !hit(nx, ny))
                    });
                    if open {
                        SpaceClass::Border
                    } else {
                        SpaceClass::Interior
                    }
                } else if grid.is_foreground_at(i) {
                    SpaceClass::Foreground
                } else {
                    SpaceClass::Background
                }
            })
            .collect();

        // Border pixels must sit against interior space.
        let stray: Vec<usize> = (0..classes.len())
            .filter(|&i| classes[i] == SpaceClass::Border)
            .filter(|&i| {
                let (x, y) = ((i % width) as i64, (i / width) as i64);
                !DIRS4.iter().any(|&(dx, dy)| {
                    let (nx, ny) = (x + dx, y + dy);
                    grid.in_bounds(nx, ny)
                        && classes[ny as usize * width + nx as usize] == SpaceClass::Interior
                })
            })
            .collect();
        for i in stray {
            classes[i] = SpaceClass::Background;
        }

        Self {
            width,
            height,
            classes,
            values,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn class(&self, x: usize, y: usize) -> SpaceClass {
        self.classes[y * self.width + x]
    }

    /// Accumulated ray weight at `(x, y)`.
    pub fn value(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.width + x]
    }

    pub fn count(&self, class: SpaceClass) -> usize {
        self.classes.iter().filter(|&&c| c == class).count()
    }

    /// Grid whose foreground is every pixel of `class`.
    pub fn mask(&self, class: SpaceClass) -> Result<Grid, GridError> {
        let mask = self.classes.iter().map(|&c| c == class).collect();
        Grid::from_mask(self.width, self.height, mask)
    }

    /// The stroke pixels as a grid, for skeleton search.
    pub fn foreground_grid(&self) -> Result<Grid, GridError> {
        self.mask(SpaceClass::Foreground)
    }

    pub fn to_gray(&self) -> GrayImage {
        GrayImage {
            width: self.width,
            height: self.height,
            data: self.classes.iter().map(|c| c.gray_level()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_pixels_are_border_only_next_to_interior() {
        let grid = Grid::from_ascii(&["#...#", "#...#", "#####"]).unwrap();
        #[rustfmt::skip]
        let values = vec![
            0.0, 1.0, 1.0, 1.0, 0.0,
            0.0, 1.0, 1.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0,
        ];
        let map = NegativeSpaceMap::classify(&grid, values);
        assert_eq!(map.class(2, 0), SpaceClass::Border);
        assert_eq!(map.class(2, 1), SpaceClass::Interior);
        assert_eq!(map.class(0, 2), SpaceClass::Foreground);
        assert_eq!(map.count(SpaceClass::Interior), 3);
        assert_eq!(map.count(SpaceClass::Border), 3);
    }

    #[test]
    fn isolated_border_falls_back_to_background() {
        let grid = Grid::from_ascii(&["#.#", "..."]).unwrap();
        let values = vec![0.0, 2.0, 0.0, 0.0, 0.0, 0.0];
        let map = NegativeSpaceMap::classify(&grid, values);
        assert_eq!(map.class(1, 0), SpaceClass::Background);
        assert_eq!(map.value(1, 0), 2.0);
        assert_eq!(map.count(SpaceClass::Border), 0);
    }

    #[test]
    fn gray_rendering_and_masks() {
        let grid = Grid::from_ascii(&["#.", ".."]).unwrap();
        let map = NegativeSpaceMap::classify(&grid, vec![0.0; 4]);
        assert_eq!(map.to_gray().data, vec![50, 255, 255, 255]);
        let fg = map.foreground_grid().unwrap();
        assert_eq!(fg.foreground_count(), 1);
        assert_eq!(map.mask(SpaceClass::Interior).unwrap().foreground_count(), 0);
    }
}
