//! Dijkstra over the foreground pixel graph.
//!
//! Every foreground pixel is a node. 4-neighbors are joined with weight 1
//! and diagonal neighbors with weight √2. Background pixels have no edges.

use glyph_features_core::{Grid, PixelPos};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

/// Per-query search state in flat arrays keyed by pixel index.
///
/// The grid itself is never written to, so one `&Grid` can serve any number
/// of concurrent queries as long as each owns its scratch.
#[derive(Clone, Debug, Default)]
pub struct PathScratch {
    dist: Vec<f64>,
    prev: Vec<Option<usize>>,
    visited: Vec<bool>,
}

impl PathScratch {
    pub fn new(len: usize) -> Self {
        let mut scratch = Self::default();
        scratch.reset(len);
        scratch
    }

    fn reset(&mut self, len: usize) {
        self.dist.clear();
        self.dist.resize(len, f64::INFINITY);
        self.prev.clear();
        self.prev.resize(len, None);
        self.visited.clear();
        self.visited.resize(len, false);
    }
}

/// Reconstructed path ordered source to target, with its total edge cost.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPath {
    pub points: Vec<PixelPos>,
    pub cost: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct QueueEntry {
    cost: f64,
    index: usize,
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    // Min-heap on cost; equal costs pop the lower index first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest foreground path from `source` to `target`.
///
/// Returns `None` when either endpoint is outside the grid or background,
/// or when `target` is not reachable from `source`.
pub fn shortest_path(grid: &Grid, source: PixelPos, target: PixelPos) -> Option<ShortestPath> {
    let mut scratch = PathScratch::new(grid.len());
    shortest_path_with(grid, source, target, &mut scratch)
}

/// [`shortest_path`] reusing caller-owned scratch buffers.
pub fn shortest_path_with(
    grid: &Grid,
    source: PixelPos,
    target: PixelPos,
    scratch: &mut PathScratch,
) -> Option<ShortestPath> {
    let valid = |p: PixelPos| p.x < grid.width() && p.y < grid.height() && grid.is_foreground(p.x, p.y);
    if !valid(source) || !valid(target) {
        return None;
    }

    let width = grid.width();
    let src = source.index(width);
    let dst = target.index(width);
    scratch.reset(grid.len());
    scratch.dist[src] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(QueueEntry {
        cost: 0.0,
        index: src,
    });

    while let Some(QueueEntry { cost, index }) = heap.pop() {
        // Stale entries stay in the heap until popped.
        if scratch.visited[index] {
            continue;
        }
        scratch.visited[index] = true;
        if index == dst {
            break;
        }

        let p = PixelPos::from_index(index, width);
        let edges = grid
            .neighbors4(p)
            .map(|n| (n, 1.0))
            .chain(grid.neighbors_diagonal(p).map(|n| (n, DIAGONAL_COST)));
        for (n, weight) in edges {
            let ni = n.index(width);
            if scratch.visited[ni] {
                continue;
            }
            let candidate = cost + weight;
            if candidate < scratch.dist[ni] {
                scratch.dist[ni] = candidate;
                scratch.prev[ni] = Some(index);
                heap.push(QueueEntry {
                    cost: candidate,
                    index: ni,
                });
            }
        }
    }

    if !scratch.visited[dst] {
        return None;
    }

    let mut points = vec![target];
    let mut cur = dst;
    while let Some(prev) = scratch.prev[cur] {
        points.push(PixelPos::from_index(prev, width));
        cur = prev;
    }
    points.reverse();

    Some(ShortestPath {
        points,
        cost: scratch.dist[dst],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glyph_features_core::polyline_length;

    fn diagonal() -> Grid {
        Grid::from_ascii(&["#....", ".#...", "..#..", "...#.", "....#"]).unwrap()
    }

    #[test]
    fn diagonal_line_costs_four_root_two() {
        let path = shortest_path(&diagonal(), PixelPos::new(0, 0), PixelPos::new(4, 4)).unwrap();
        assert_abs_diff_eq!(path.cost, 4.0 * std::f64::consts::SQRT_2, epsilon = 1e-12);
        assert_eq!(path.points.len(), 5);
        assert_eq!(path.points.first(), Some(&PixelPos::new(0, 0)));
        assert_eq!(path.points.last(), Some(&PixelPos::new(4, 4)));
    }

    #[test]
    fn cost_matches_polyline_and_grows_with_distance() {
        let grid = Grid::from_ascii(&["#####", "....#", "#####"]).unwrap();
        let start = PixelPos::new(0, 0);
        let mut last = 0.0;
        for target in [PixelPos::new(2, 0), PixelPos::new(4, 1), PixelPos::new(2, 2), PixelPos::new(0, 2)] {
            let path = shortest_path(&grid, start, target).unwrap();
            assert_abs_diff_eq!(path.cost, polyline_length(&path.points), epsilon = 1e-12);
            assert!(path.cost >= last);
            last = path.cost;
        }
    }

    #[test]
    fn every_pixel_of_a_blob_is_reachable() {
        // One 8-connected blob: a ring with a diagonal-only spur.
        let grid = Grid::from_ascii(&[
            ".####.", //
            "#....#", //
            "#....#", //
            "#....#", //
            ".####.", //
            ".....#",
        ])
        .unwrap();
        let points = grid.foreground_points();
        let mut scratch = PathScratch::new(grid.len());
        for &source in &[points[0], points[points.len() - 1]] {
            let unreached: Vec<PixelPos> = points
                .iter()
                .copied()
                .filter(|&t| shortest_path_with(&grid, source, t, &mut scratch).is_none())
                .collect();
            assert!(unreached.is_empty(), "from {source:?}: {unreached:?}");
        }
    }

    #[test]
    fn cost_never_decreases_along_a_path() {
        let grid = Grid::from_ascii(&[
            "#####.", //
            "....#.", //
            ".####.", //
            ".#....", //
            ".#####",
        ])
        .unwrap();
        let path = shortest_path(&grid, PixelPos::new(0, 0), PixelPos::new(5, 4)).unwrap();
        let prefix: Vec<f64> = (0..path.points.len())
            .map(|k| polyline_length(&path.points[..=k]))
            .collect();
        assert!(prefix.windows(2).all(|w| w[1] >= w[0]));
        assert_abs_diff_eq!(prefix[prefix.len() - 1], path.cost, epsilon = 1e-12);
    }

    #[test]
    fn unreachable_or_background_targets_give_none() {
        let grid = Grid::from_ascii(&["##...", ".....", "...##"]).unwrap();
        assert!(shortest_path(&grid, PixelPos::new(0, 0), PixelPos::new(4, 2)).is_none());
        assert!(shortest_path(&grid, PixelPos::new(0, 0), PixelPos::new(2, 1)).is_none());
        assert!(shortest_path(&grid, PixelPos::new(0, 0), PixelPos::new(9, 9)).is_none());
    }

    #[test]
    fn source_equals_target() {
        let path = shortest_path(&diagonal(), PixelPos::new(2, 2), PixelPos::new(2, 2)).unwrap();
        assert_eq!(path.points, vec![PixelPos::new(2, 2)]);
        assert_eq!(path.cost, 0.0);
    }

    #[test]
    fn scratch_can_be_reused_between_queries() {
        let grid = diagonal();
        let mut scratch = PathScratch::new(grid.len());
        let a = shortest_path_with(&grid, PixelPos::new(0, 0), PixelPos::new(4, 4), &mut scratch).unwrap();
        let b = shortest_path_with(&grid, PixelPos::new(4, 4), PixelPos::new(1, 1), &mut scratch).unwrap();
        assert_eq!(a.points.len(), 5);
        assert_eq!(b.points.len(), 4);
        assert_abs_diff_eq!(b.cost, 3.0 * std::f64::consts::SQRT_2, epsilon = 1e-12);
    }
}
