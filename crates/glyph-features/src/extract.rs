use crate::{FeatureError, FeatureParams, GlyphBox, OcrFeatures};
use glyph_features_core::{GrayImageView, Grid};
use glyph_features_negspace::{synthesize, SpaceClass};
use glyph_features_shape::{analyze_sections, principal_axis};
use glyph_features_skeleton::find_skeleton;
use glyph_features_sweep::radial_sweep;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Whole-glyph scalars: extent, center of mass and ink share.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlyphSummary {
    pub bounding_box: GlyphBox,
    /// `(max_x - min_x + 1) / (max_y - min_y + 1)`.
    pub aspect_ratio: f64,
    pub centroid_x: f64,
    pub centroid_y: f64,
    pub mass_pct: f64,
    pub foreground: usize,
}

/// Summarize the foreground of `grid`. A grid without foreground yields
/// all zeros.
pub fn glyph_summary(grid: &Grid) -> GlyphSummary {
    let (mut min_x, mut min_y) = (usize::MAX, usize::MAX);
    let (mut max_x, mut max_y) = (0, 0);
    let (mut sum_x, mut sum_y) = (0.0, 0.0);
    let mut count = 0usize;
    for p in grid.foreground_points() {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
        sum_x += p.x as f64;
        sum_y += p.y as f64;
        count += 1;
    }
    if count == 0 {
        return GlyphSummary::default();
    }

    let n = count as f64;
    GlyphSummary {
        bounding_box: GlyphBox {
            min_x,
            min_y,
            max_x,
            max_y,
            width: max_x - min_x,
            height: max_y - min_y,
        },
        aspect_ratio: (max_x - min_x + 1) as f64 / (max_y - min_y + 1) as f64,
        centroid_x: sum_x / n - grid.width() as f64 / 2.0,
        centroid_y: sum_y / n - grid.height() as f64 / 2.0,
        mass_pct: n / grid.len() as f64 * 100.0,
        foreground: count,
    }
}

/// Run every analysis stage on one glyph.
///
/// The radial sweep and the glyph's own sections use `grid` directly.
/// Negative space is synthesized from it and split into interior and
/// border masks for section analysis; the skeleton is searched on the
/// stroke pixels of that map.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(grid, params), fields(width = grid.width(), height = grid.height()))
)]
pub fn extract_features(grid: &Grid, params: &FeatureParams) -> Result<OcrFeatures, FeatureError> {
    params.validate()?;

    let summary = glyph_summary(grid);
    if summary.foreground == 0 {
        log::debug!("glyph has no foreground pixels");
    }
    let axis = principal_axis(&grid.foreground_points());
    let sweep = radial_sweep(grid, &params.sweep_params());
    let glyph_sections = analyze_sections(grid, &params.shape, None);

    let space = synthesize(grid, &params.negative_space_params());
    let border = space.mask(SpaceClass::Border)?;
    let interior = space.mask(SpaceClass::Interior)?;
    let negative_spaces = analyze_sections(&interior, &params.shape, Some(&border));
    let negative_space_borders = analyze_sections(&border, &params.shape, Some(&border));

    let strokes = space.foreground_grid()?;
    let skeleton = find_skeleton(&strokes, &params.skeleton_params())
        .map(|s| s.summarize(summary.bounding_box.diagonal()));

    log::debug!(
        "extracted: {} glyph sections, {} interior / {} border spaces, skeleton: {}",
        glyph_sections.len(),
        negative_spaces.len(),
        negative_space_borders.len(),
        skeleton.is_some()
    );

    Ok(OcrFeatures {
        bounding_box: summary.bounding_box,
        aspect_ratio: summary.aspect_ratio,
        centroid_x: summary.centroid_x,
        centroid_y: summary.centroid_y,
        mass_to_total_area: summary.mass_pct,
        principal_axis: axis,
        angles: sweep.angles,
        percentages: sweep.percentages,
        glyph_sections,
        negative_spaces,
        negative_space_borders,
        skeleton,
    })
}

/// Threshold a raw row-major grayscale buffer and run [`extract_features`].
pub fn extract_features_from_gray_u8(
    width: u32,
    height: u32,
    pixels: &[u8],
    params: &FeatureParams,
) -> Result<OcrFeatures, FeatureError> {
    if width == 0 || height == 0 {
        return Err(FeatureError::InvalidGrayDimensions { width, height });
    }
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        return Err(FeatureError::InvalidGrayBuffer {
            expected,
            got: pixels.len(),
        });
    }
    let view = GrayImageView {
        width: width as usize,
        height: height as usize,
        data: pixels,
    };
    let grid = Grid::from_gray(&view, params.foreground_threshold)?;
    extract_features(&grid, params)
}
