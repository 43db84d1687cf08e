use crate::FeatureError;
use glyph_features_core::DEFAULT_FOREGROUND_THRESHOLD;
use glyph_features_negspace::NegativeSpaceParams;
use glyph_features_shape::ShapeParams;
use glyph_features_skeleton::{SimplifyParams, SkeletonParams};
use glyph_features_sweep::SweepParams;
use serde::{Deserialize, Serialize};

/// Parameters for [`crate::extract_features`].
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct FeatureParams {
    /// Intensities at or below this are foreground (raw-buffer entry only).
    pub foreground_threshold: u8,
    pub shape: ShapeParams,
    pub simplify: SimplifyParams,
    pub sweep: SweepParams,
    pub negative_space: NegativeSpaceParams,
    /// Fixed length of every padded list in the feature vector.
    pub pad_len: usize,
    /// Interior and border negative-space blocks kept in the vector.
    pub max_sections: usize,
    /// Overrides the per-stage `parallel` flags.
    pub parallel: bool,
}

impl Default for FeatureParams {
    fn default() -> Self {
        Self {
            foreground_threshold: DEFAULT_FOREGROUND_THRESHOLD,
            shape: ShapeParams::default(),
            simplify: SimplifyParams::default(),
            sweep: SweepParams::default(),
            negative_space: NegativeSpaceParams::default(),
            pad_len: 15,
            max_sections: 4,
            parallel: true,
        }
    }
}

impl FeatureParams {
    pub fn validate(&self) -> Result<(), FeatureError> {
        let invalid = |msg: &str| Err(FeatureError::InvalidParams(msg.to_string()));
        if self.sweep.samples == 0 {
            return invalid("sweep.samples must be positive");
        }
        if self.sweep.step_deg == 0 {
            return invalid("sweep.step_deg must be non-zero");
        }
        if self.pad_len == 0 {
            return invalid("pad_len must be positive");
        }
        if !self.simplify.angle_tolerance_deg.is_finite() {
            return invalid("simplify.angle_tolerance_deg must be finite");
        }
        if !self.shape.min_relative_mass_pct.is_finite() {
            return invalid("shape.min_relative_mass_pct must be finite");
        }
        Ok(())
    }

    pub(crate) fn sweep_params(&self) -> SweepParams {
        SweepParams {
            parallel: self.parallel,
            ..self.sweep.clone()
        }
    }

    pub(crate) fn skeleton_params(&self) -> SkeletonParams {
        SkeletonParams {
            simplify: self.simplify.clone(),
            parallel: self.parallel,
        }
    }

    pub(crate) fn negative_space_params(&self) -> NegativeSpaceParams {
        NegativeSpaceParams {
            parallel: self.parallel,
            ..self.negative_space.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = FeatureParams::default();
        params.validate().unwrap();
        assert_eq!(params.sweep.samples, 120);
        assert_eq!(params.foreground_threshold, 128);
    }

    #[test]
    fn rejects_degenerate_values() {
        let mut params = FeatureParams::default();
        params.sweep.step_deg = 0;
        assert!(matches!(params.validate(), Err(FeatureError::InvalidParams(_))));

        let mut params = FeatureParams::default();
        params.simplify.angle_tolerance_deg = f64::NAN;
        assert!(params.validate().is_err());

        let params = FeatureParams {
            pad_len: 0,
            ..FeatureParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let params: FeatureParams =
            serde_json::from_str(r#"{ "pad_len": 10, "parallel": false }"#).unwrap();
        assert_eq!(params.pad_len, 10);
        assert!(!params.parallel);
        assert_eq!(params.max_sections, 4);
        assert!(!params.sweep_params().parallel);
    }
}
