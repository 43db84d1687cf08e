use crate::ScaleError;
use glyph_features_core::GridError;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum FeatureError {
    #[error("invalid grayscale image buffer length (expected {expected} bytes, got {got})")]
    InvalidGrayBuffer { expected: usize, got: usize },

    #[error("invalid grayscale image dimensions (width={width}, height={height})")]
    InvalidGrayDimensions { width: u32, height: u32 },

    #[error("invalid feature parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Scale(#[from] ScaleError),
}
