//! Two-pass connected-component labeling on the flattened index space.
//!
//! Pass 1 scans in raster order and unions each foreground pixel with its
//! left and top neighbors (4-connectivity). Pass 2 resolves every pixel to
//! its root row by row in parallel and the rows are merged in order, so the
//! output does not depend on scheduling.

use crate::{Grid, PixelPos, UnionFind};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Axis-aligned box, half-open: covers `x..x + width`, `y..y + height`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl BoundingBox {
    pub fn from_pixel(p: PixelPos) -> Self {
        Self {
            x: p.x,
            y: p.y,
            width: 1,
            height: 1,
        }
    }

    #[inline]
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Grow to cover `p`.
    pub fn include(&mut self, p: PixelPos) {
        let right = self.right().max(p.x + 1);
        let bottom = self.bottom().max(p.y + 1);
        self.x = self.x.min(p.x);
        self.y = self.y.min(p.y);
        self.width = right - self.x;
        self.height = bottom - self.y;
    }

    /// True when `inner` lies entirely inside `self` (edges may touch).
    pub fn contains(&self, inner: &BoundingBox) -> bool {
        inner.x >= self.x
            && inner.y >= self.y
            && inner.right() <= self.right()
            && inner.bottom() <= self.bottom()
    }
}

/// One labeled connected component.
#[derive(Clone, Debug, PartialEq)]
pub struct Component {
    /// Union-find root (flattened index of one member pixel).
    pub id: usize,
    pub bbox: BoundingBox,
    /// Member pixels in raster order.
    pub pixels: Vec<PixelPos>,
    pub active: bool,
}

impl Component {
    pub fn area(&self) -> usize {
        self.pixels.len()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LabelParams {
    /// Drop components whose bounding box sits inside another kept box.
    pub suppress_nested: bool,
}

impl Default for LabelParams {
    fn default() -> Self {
        Self {
            suppress_nested: true,
        }
    }
}

/// Label the 4-connected foreground components of `grid`.
///
/// Components come back ordered by root index. With
/// [`LabelParams::suppress_nested`] set, boxes are visited by descending
/// area, then by `(y, x)` origin, then by id; a box inside any box already
/// kept is removed. Of two identical boxes the first in that order survives.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(grid, params), fields(width = grid.width(), height = grid.height()))
)]
pub fn label_components(grid: &Grid, params: &LabelParams) -> Vec<Component> {
    let width = grid.width();
    let height = grid.height();
    let mut uf = UnionFind::new(grid.len());

    for y in 0..height {
        for x in 0..width {
            if !grid.is_foreground(x, y) {
                continue;
            }
            let idx = y * width + x;
            if x > 0 && grid.is_foreground(x - 1, y) {
                uf.union(idx, idx - 1);
            }
            if y > 0 && grid.is_foreground(x, y - 1) {
                uf.union(idx, idx - width);
            }
        }
    }
    uf.flatten();

    let rows: Vec<Vec<(usize, PixelPos)>> = (0..height)
        .into_par_iter()
        .map(|y| {
            (0..width)
                .filter(|&x| grid.is_foreground(x, y))
                .map(|x| (uf.root(y * width + x), PixelPos::new(x, y)))
                .collect()
        })
        .collect();

    let mut by_root: BTreeMap<usize, Component> = BTreeMap::new();
    for (root, p) in rows.into_iter().flatten() {
        by_root
            .entry(root)
            .and_modify(|c| {
                c.bbox.include(p);
                c.pixels.push(p);
            })
            .or_insert_with(|| Component {
                id: root,
                bbox: BoundingBox::from_pixel(p),
                pixels: vec![p],
                active: true,
            });
    }

    let mut components: Vec<Component> = by_root.into_values().collect();
    if params.suppress_nested {
        suppress_nested(&mut components);
    }
    log::debug!("labeled {} components", components.len());
    components
}

fn suppress_nested(components: &mut Vec<Component>) {
    let mut order: Vec<usize> = (0..components.len()).collect();
    order.sort_by(|&a, &b| {
        let (ca, cb) = (&components[a], &components[b]);
        cb.bbox
            .area()
            .cmp(&ca.bbox.area())
            .then((ca.bbox.y, ca.bbox.x).cmp(&(cb.bbox.y, cb.bbox.x)))
            .then(ca.id.cmp(&cb.id))
    });

    let mut kept: Vec<usize> = Vec::with_capacity(order.len());
    for i in order {
        let inner = components[i].bbox;
        if kept.iter().any(|&k| components[k].bbox.contains(&inner)) {
            components[i].active = false;
        } else {
            kept.push(i);
        }
    }

    let before = components.len();
    components.retain(|c| c.active);
    if components.len() != before {
        log::debug!("suppressed {} nested components", before - components.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_has_no_components() {
        let grid = Grid::from_mask(5, 5, vec![false; 25]).unwrap();
        assert!(label_components(&grid, &LabelParams::default()).is_empty());
    }

    #[test]
    fn two_far_blocks_are_two_components() {
        let grid = Grid::from_ascii(&[
            "##......",
            "##......",
            "........",
            "........",
            "......##",
            "......##",
        ])
        .unwrap();
        let comps = label_components(&grid, &LabelParams::default());
        assert_eq!(comps.len(), 2);
        assert_eq!(
            comps[0].bbox,
            BoundingBox {
                x: 0,
                y: 0,
                width: 2,
                height: 2
            }
        );
        assert_eq!(
            comps[1].bbox,
            BoundingBox {
                x: 6,
                y: 4,
                width: 2,
                height: 2
            }
        );
        assert!(comps.iter().all(|c| c.area() == 4 && c.active));
    }

    #[test]
    fn diagonal_touch_is_not_connected() {
        let grid = Grid::from_ascii(&["#.", ".#"]).unwrap();
        let params = LabelParams {
            suppress_nested: false,
        };
        assert_eq!(label_components(&grid, &params).len(), 2);
    }

    #[test]
    fn u_shape_merges_through_bottom_row() {
        // Left and right arms get different provisional labels until the
        // bottom row joins them.
        let grid = Grid::from_ascii(&["#..#", "#..#", "####"]).unwrap();
        let comps = label_components(&grid, &LabelParams::default());
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].area(), 8);
    }

    #[test]
    fn nested_component_is_suppressed() {
        let grid = Grid::from_ascii(&[
            "#####", //
            "#...#", //
            "#.#.#", //
            "#...#", //
            "#####",
        ])
        .unwrap();
        let kept = label_components(&grid, &LabelParams::default());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].area(), 16);

        let all = label_components(
            &grid,
            &LabelParams {
                suppress_nested: false,
            },
        );
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn bbox_contains_is_inclusive_of_edges() {
        let outer = BoundingBox {
            x: 0,
            y: 0,
            width: 4,
            height: 4,
        };
        let inner = BoundingBox {
            x: 2,
            y: 2,
            width: 2,
            height: 2,
        };
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.contains(&outer));
    }
}
