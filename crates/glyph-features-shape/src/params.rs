use glyph_features_core::LabelParams;
use serde::{Deserialize, Serialize};

/// Parameters for per-component shape analysis.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ShapeParams {
    /// Components at or below this share of the image area (percent) are
    /// treated as noise and skipped.
    pub min_relative_mass_pct: f64,
    #[serde(default)]
    pub label: LabelParams,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            min_relative_mass_pct: 0.5,
            label: LabelParams::default(),
        }
    }
}
