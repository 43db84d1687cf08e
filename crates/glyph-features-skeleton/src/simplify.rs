use glyph_features_core::{vertex_angle_deg, PixelPos};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SimplifyParams {
    /// A span is split at its sharpest interior vertex when that vertex
    /// turns by more than this many degrees.
    pub angle_tolerance_deg: f64,
}

impl Default for SimplifyParams {
    fn default() -> Self {
        Self {
            angle_tolerance_deg: 30.0,
        }
    }
}

/// Reduce a pixel path to the vertices where it turns.
///
/// For the span `[s, e]` the interior point `i` maximizing the turn angle
/// of `s -> i -> e` is found. If that angle exceeds the tolerance the span
/// is split at `i` and both halves are reduced again; otherwise only `s`
/// and `e` survive. Endpoints are always kept and no point is emitted
/// twice. Paths shorter than two points are returned unchanged.
pub fn simplify_path(points: &[PixelPos], params: &SimplifyParams) -> Vec<PixelPos> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut spans = vec![(0usize, last)];
    while let Some((start, end)) = spans.pop() {
        if end <= start + 1 {
            continue;
        }
        let mut max_angle = 0.0;
        let mut split = start;
        for i in start + 1..end {
            let angle = vertex_angle_deg(points[start], points[i], points[end]);
            if angle > max_angle {
                max_angle = angle;
                split = i;
            }
        }
        if max_angle > params.angle_tolerance_deg {
            keep[split] = true;
            spans.push((split, end));
            spans.push((start, split));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(&p, k)| k.then_some(p))
        .collect()
}
