use crate::{bounce_ray, AtomicF64, NegativeSpaceMap, NegativeSpaceParams};
use glyph_features_core::{Grid, PixelPos};
use rayon::prelude::*;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Bounce a ray between every unordered pair of foreground pixels and
/// classify the accumulated weights.
///
/// Cost is quadratic in the foreground pixel count. Accumulation is
/// commutative, so the map is identical with or without parallelism.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(grid, params), fields(width = grid.width(), height = grid.height()))
)]
pub fn synthesize(grid: &Grid, params: &NegativeSpaceParams) -> NegativeSpaceMap {
    let points = grid.foreground_points();
    let accumulator: Vec<AtomicF64> = (0..grid.len()).map(|_| AtomicF64::default()).collect();

    let from = |i: usize| -> usize {
        let a = points[i];
        points[i + 1..]
            .iter()
            .map(|&b| bounce_ray(grid, a, b, params.min_steps, &accumulator))
            .sum()
    };
    let credited: usize = if params.parallel {
        (0..points.len()).into_par_iter().map(from).sum()
    } else {
        (0..points.len()).map(from).sum()
    };

    let values: Vec<f64> = accumulator.into_iter().map(AtomicF64::into_inner).collect();
    let map = NegativeSpaceMap::classify(grid, values);
    log::debug!(
        "negative space: {} pairs, {} credits, {} interior / {} border pixels",
        pair_count(&points),
        credited,
        map.count(crate::SpaceClass::Interior),
        map.count(crate::SpaceClass::Border)
    );
    map
}

fn pair_count(points: &[PixelPos]) -> usize {
    points.len() * points.len().saturating_sub(1) / 2
}
