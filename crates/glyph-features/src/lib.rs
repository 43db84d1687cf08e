//! High-level facade crate for the `glyph-features-*` workspace.
//!
//! This crate provides:
//! - re-exports of the per-stage analysis crates
//! - [`extract_features`], which runs every stage on one glyph and returns
//!   an [`OcrFeatures`] record
//! - the fixed-length vector layout and a min-max [`FeatureScaler`]
//!
//! ## Quickstart
//!
//! ```no_run
//! use glyph_features::{extract_features, FeatureLayout, FeatureParams, FeatureScaler};
//! use glyph_features::core::Grid;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let grid = Grid::from_ascii(&[
//!     ".......",
//!     ".#####.",
//!     ".#...#.",
//!     ".#####.",
//!     ".......",
//! ])?;
//! let params = FeatureParams::default();
//! let features = extract_features(&grid, &params)?;
//!
//! let layout = FeatureLayout::from_params(&params);
//! let mut scaler = FeatureScaler::new(layout);
//! scaler.update(&features);
//! let scaled = scaler.scale(&features)?;
//! assert_eq!(scaled.len(), layout.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `glyph_features::core`: grid, labeling, geometry, logger.
//! - `glyph_features::shape`: per-region metrics and principal axes.
//! - `glyph_features::skeleton`: corner-pair shortest paths and simplification.
//! - `glyph_features::sweep`: radial intersection sweep.
//! - `glyph_features::negspace`: synthetic negative space.
//! - `glyph_features::image` (feature `image`): adapters from `image::GrayImage`.

pub use glyph_features_core as core;
pub use glyph_features_negspace as negspace;
pub use glyph_features_shape as shape;
pub use glyph_features_skeleton as skeleton;
pub use glyph_features_sweep as sweep;

mod error;
mod extract;
mod features;
mod params;
mod scaler;

#[cfg(feature = "image")]
pub mod image;

pub use error::FeatureError;
pub use extract::{extract_features, extract_features_from_gray_u8, glyph_summary, GlyphSummary};
pub use features::{Channel, FeatureLayout, FeatureSlot, GlyphBox, OcrFeatures};
pub use params::FeatureParams;
pub use scaler::{Bounds, FeatureScaler, MinMaxTable, ScaleError};

/// Install a `tracing` subscriber and bridge `log` records into it.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let _ = tracing_log::LogTracer::init();
    glyph_features_core::init_tracing(json);
}
