//! Core types and utilities for glyph shape-feature extraction.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! decode images or know anything about feature layouts; it owns the pixel
//! grid, the union-find labeler and a handful of polyline helpers that the
//! analysis crates share.

mod components;
mod error;
mod geom;
mod grid;
mod image;
mod logger;
mod union_find;

pub use components::{label_components, BoundingBox, Component, LabelParams};
pub use error::GridError;
pub use geom::{euclidean, polyline_length, vertex_angle_deg};
pub use grid::{Grid, PixelPos, DEFAULT_FOREGROUND_THRESHOLD};
pub use image::{GrayImage, GrayImageView};
pub use union_find::UnionFind;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
