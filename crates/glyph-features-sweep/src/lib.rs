//! Radial intersection sweep.
//!
//! For each sampled angle a family of parallel lines is cast through the
//! grid center. Each line counts how many strokes it crosses; the
//! per-line counts are consolidated into a short run sequence, and every
//! foreground pixel is tagged with the `(angle, run)` it contributed to so
//! the share of the glyph behind each run can be reported.

mod consolidate;
mod params;
mod sweep;
mod tags;

pub use consolidate::{consolidate, Consolidation};
pub use params::SweepParams;
pub use sweep::{cast_ray, radial_sweep, AngleRecord, RayHits, SweepResult};
pub use tags::{PixelTagMap, SweepTag};
