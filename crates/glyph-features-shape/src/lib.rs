//! Geometric descriptors of labeled glyph regions.
//!
//! Regions come from [`glyph_features_core::label_components`]; each one
//! above the mass noise floor is summarized as a [`SectionMetrics`].

mod metrics;
mod moments;
mod params;

pub use metrics::{analyze_sections, section_metrics, SectionMetrics};
pub use moments::{principal_axis, raw_moments, PrincipalAxis, RawMoments};
pub use params::ShapeParams;
