//! Adapters from `image::GrayImage`.

use crate::{extract_features, FeatureError, FeatureParams, OcrFeatures};
use glyph_features_core::{GrayImageView, Grid};

/// Borrow an `image::GrayImage` as a core view.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Threshold an `image::GrayImage`; intensities `<= threshold` are foreground.
pub fn grid_from_image(img: &::image::GrayImage, threshold: u8) -> Result<Grid, FeatureError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(FeatureError::InvalidGrayDimensions {
            width: img.width(),
            height: img.height(),
        });
    }
    Ok(Grid::from_gray(&gray_view(img), threshold)?)
}

pub fn extract_features_from_image(
    img: &::image::GrayImage,
    params: &FeatureParams,
) -> Result<OcrFeatures, FeatureError> {
    let grid = grid_from_image(img, params.foreground_threshold)?;
    extract_features(&grid, params)
}
