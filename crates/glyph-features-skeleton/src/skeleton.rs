use crate::{
    find_corner_points, shortest_path, simplify_path, CornerCode, CornerPoints, ShortestPath,
    SimplifyParams,
};
use glyph_features_core::{polyline_length, vertex_angle_deg, Grid, PixelPos};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SkeletonParams {
    #[serde(default)]
    pub simplify: SimplifyParams,
    /// Run the six corner-pair queries on the rayon pool.
    pub parallel: bool,
}

impl Default for SkeletonParams {
    fn default() -> Self {
        Self {
            simplify: SimplifyParams::default(),
            parallel: true,
        }
    }
}

/// The dominant stroke path of a glyph.
#[derive(Clone, Debug, PartialEq)]
pub struct Skeleton {
    pub corners: CornerPoints,
    /// Unsimplified pixel path of the selected corner pair.
    pub raw: Vec<PixelPos>,
    pub simplified: Vec<PixelPos>,
    pub start: CornerCode,
    pub end: CornerCode,
}

/// Scalar description of a [`Skeleton`] as it enters the feature vector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkeletonSummary {
    /// Simplified polyline length over the glyph bounding-box diagonal.
    pub length_ratio: f64,
    /// Line segments of the simplified path (vertices minus one).
    pub segment_count: usize,
    /// Turn angle in degrees at every interior simplified vertex.
    pub angle_changes: Vec<f64>,
    pub start: CornerCode,
    pub end: CornerCode,
}

impl Skeleton {
    pub fn length(&self) -> f64 {
        polyline_length(&self.simplified)
    }

    /// Summarize against the glyph bounding-box diagonal. A zero diagonal
    /// (single-pixel glyph) yields a zero length ratio.
    pub fn summarize(&self, bbox_diagonal: f64) -> SkeletonSummary {
        let length_ratio = if bbox_diagonal > 0.0 {
            self.length() / bbox_diagonal
        } else {
            0.0
        };
        let angle_changes = self
            .simplified
            .windows(3)
            .map(|w| vertex_angle_deg(w[0], w[1], w[2]))
            .collect();
        SkeletonSummary {
            length_ratio,
            segment_count: self.simplified.len().saturating_sub(1),
            angle_changes,
            start: self.start,
            end: self.end,
        }
    }
}

/// Find the longest of the six corner-pair shortest paths and simplify it.
///
/// Paths are compared by cumulative Euclidean length before simplification;
/// on a tie the earlier pair wins. Pairs whose endpoints are not connected
/// are skipped. Returns `None` for a grid without foreground.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(grid, params), fields(width = grid.width(), height = grid.height()))
)]
pub fn find_skeleton(grid: &Grid, params: &SkeletonParams) -> Option<Skeleton> {
    let corners = find_corner_points(grid)?;
    let pairs = corners.pairs();

    let query = |&(a, b): &(PixelPos, PixelPos)| shortest_path(grid, a, b);
    let paths: Vec<Option<ShortestPath>> = if params.parallel {
        pairs.par_iter().map(query).collect()
    } else {
        pairs.iter().map(query).collect()
    };

    let mut best: Option<(f64, Vec<PixelPos>)> = None;
    for path in paths.into_iter().flatten() {
        let length = polyline_length(&path.points);
        if best.as_ref().is_none_or(|(l, _)| length > *l) {
            best = Some((length, path.points));
        }
    }
    let Some((length, raw)) = best else {
        log::debug!("no corner pair is connected");
        return None;
    };

    let simplified = simplify_path(&raw, &params.simplify);
    let (start, end) = match (simplified.first(), simplified.last()) {
        (Some(&s), Some(&e)) => (corners.classify(s), corners.classify(e)),
        _ => (CornerCode::Unknown, CornerCode::Unknown),
    };
    log::debug!(
        "skeleton: {} raw points (length {:.2}), {} after simplification",
        raw.len(),
        length,
        simplified.len()
    );

    Some(Skeleton {
        corners,
        raw,
        simplified,
        start,
        end,
    })
}
