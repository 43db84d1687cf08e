//! Dominant stroke skeleton of a glyph.
//!
//! The four extreme corner pixels of the foreground are paired up, a
//! Dijkstra shortest path is computed for each of the six pairs, and the
//! longest of those paths is reduced to a few vertices by an angle-based
//! simplifier.
//!
//! ```no_run
//! use glyph_features_core::Grid;
//! use glyph_features_skeleton::{find_skeleton, SkeletonParams};
//!
//! let grid = Grid::from_ascii(&["#....", ".#...", "..#..", "...#.", "....#"]).unwrap();
//! if let Some(skeleton) = find_skeleton(&grid, &SkeletonParams::default()) {
//!     println!("{} vertices", skeleton.simplified.len());
//! }
//! ```

mod corners;
mod shortest_path;
mod simplify;
mod skeleton;

pub use corners::{find_corner_points, CornerCode, CornerPoints};
pub use shortest_path::{shortest_path, shortest_path_with, PathScratch, ShortestPath};
pub use simplify::{simplify_path, SimplifyParams};
pub use skeleton::{find_skeleton, Skeleton, SkeletonParams, SkeletonSummary};
