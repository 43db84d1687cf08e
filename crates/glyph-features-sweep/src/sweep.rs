use crate::{consolidate, PixelTagMap, SweepParams, SweepTag};
use glyph_features_core::{Grid, PixelPos};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Consolidated crossing counts for one sampled angle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AngleRecord {
    pub angle: i32,
    pub intersections: Vec<u32>,
}

/// Output of [`radial_sweep`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    pub angles: Vec<AngleRecord>,
    /// Per angle, the share of foreground pixels (percent) behind each run.
    pub percentages: BTreeMap<i32, Vec<f64>>,
}

/// What one cast line saw.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RayHits {
    /// Foreground to background transitions along the line.
    pub crossings: u32,
    /// Foreground pixels sampled, in walk order.
    pub pixels: Vec<PixelPos>,
}

struct Frame {
    cx: f64,
    cy: f64,
    max_r: i64,
}

impl Frame {
    fn new(grid: &Grid) -> Self {
        let cx = (grid.width() / 2) as f64;
        let cy = (grid.height() / 2) as f64;
        let max_r = (cx * cx + cy * cy).sqrt().ceil() as i64;
        Self { cx, cy, max_r }
    }
}

/// Walk the line at signed offset `r` from the center for direction
/// `angle_rad`, sampling `t` over `[-max_r, max_r]`.
///
/// Samples are rounded half to even; samples outside the grid are skipped
/// without resetting the stroke state. A stroke that runs into the grid
/// edge is not counted as a crossing.
pub fn cast_ray(grid: &Grid, angle_rad: f64, r: i64) -> RayHits {
    let frame = Frame::new(grid);
    cast_in_frame(grid, &frame, angle_rad.sin_cos(), r)
}

fn cast_in_frame(grid: &Grid, frame: &Frame, (sin, cos): (f64, f64), r: i64) -> RayHits {
    let mut hits = RayHits::default();
    let mut in_stroke = false;
    let rf = r as f64;
    for t in -frame.max_r..=frame.max_r {
        let tf = t as f64;
        let x = (frame.cx + (rf * cos - tf * sin)).round_ties_even() as i64;
        let y = (frame.cy + (rf * sin + tf * cos)).round_ties_even() as i64;
        if !grid.in_bounds(x, y) {
            continue;
        }
        let fg = grid.is_foreground(x as usize, y as usize);
        if fg {
            hits.pixels.push(PixelPos::new(x as usize, y as usize));
            in_stroke = true;
        } else if in_stroke {
            hits.crossings += 1;
            in_stroke = false;
        }
    }
    hits
}

struct AngleSweep {
    angle: i32,
    runs: Vec<u32>,
    tagged: Vec<(usize, Vec<PixelPos>)>,
}

fn sweep_angle(grid: &Grid, frame: &Frame, angle: i32, parallel: bool) -> AngleSweep {
    let sc = (angle as f64).to_radians().sin_cos();
    let cast = |r: i64| cast_in_frame(grid, frame, sc, r);
    let rays: Vec<RayHits> = if parallel {
        (-frame.max_r..frame.max_r).into_par_iter().map(cast).collect()
    } else {
        (-frame.max_r..frame.max_r).map(cast).collect()
    };

    let raw: Vec<u32> = rays.iter().map(|h| h.crossings).collect();
    let consolidation = consolidate(&raw);

    let tagged = consolidation
        .spans
        .iter()
        .map(|(run, span)| {
            let mut seen = HashSet::new();
            let pixels = rays[span.clone()]
                .iter()
                .flat_map(|h| h.pixels.iter().copied())
                .filter(|p| seen.insert(*p))
                .collect();
            (*run, pixels)
        })
        .collect();

    AngleSweep {
        angle,
        runs: consolidation.runs,
        tagged,
    }
}

/// Sweep every configured angle over `grid`.
///
/// The tag map is filled in angle order after all angles finish, so the
/// result does not depend on scheduling.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(grid, params), fields(width = grid.width(), height = grid.height()))
)]
pub fn radial_sweep(grid: &Grid, params: &SweepParams) -> SweepResult {
    let frame = Frame::new(grid);
    let angles: Vec<i32> = params.angles().collect();

    let sweeps: Vec<AngleSweep> = if params.parallel {
        angles
            .par_iter()
            .map(|&a| sweep_angle(grid, &frame, a, true))
            .collect()
    } else {
        angles
            .iter()
            .map(|&a| sweep_angle(grid, &frame, a, false))
            .collect()
    };

    let mut tags = PixelTagMap::new();
    for sweep in &sweeps {
        for (run, pixels) in &sweep.tagged {
            let tag = SweepTag {
                angle: sweep.angle,
                run: *run,
            };
            for &p in pixels {
                tags.upsert(p, tag);
            }
        }
    }
    let counts = tags.counts();
    let total = grid.foreground_count();

    let mut result = SweepResult::default();
    for sweep in sweeps {
        let shares = sweep
            .runs
            .iter()
            .enumerate()
            .map(|(run, &crossings)| {
                let tagged = counts
                    .get(&SweepTag {
                        angle: sweep.angle,
                        run,
                    })
                    .copied()
                    .unwrap_or(0);
                if crossings == 0 || total == 0 {
                    0.0
                } else {
                    tagged as f64 / total as f64 * 100.0
                }
            })
            .collect();
        result.percentages.insert(sweep.angle, shares);
        result.angles.push(AngleRecord {
            angle: sweep.angle,
            intersections: sweep.runs,
        });
    }

    log::debug!(
        "swept {} angles, max_r = {}, {} pixels tagged",
        result.angles.len(),
        frame.max_r,
        tags.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// 5x5 block centered in a 9x9 background.
    fn centered_square() -> Grid {
        let rows = [
            ".........",
            ".........",
            "..#####..",
            "..#####..",
            "..#####..",
            "..#####..",
            "..#####..",
            ".........",
            ".........",
        ];
        Grid::from_ascii(&rows).unwrap()
    }

    fn record(result: &SweepResult, angle: i32) -> &AngleRecord {
        result.angles.iter().find(|a| a.angle == angle).unwrap()
    }

    #[test]
    fn vertical_ray_crosses_block_once() {
        let grid = centered_square();
        let hits = cast_ray(&grid, 0.0, 0);
        assert_eq!(hits.crossings, 1);
        assert_eq!(hits.pixels.len(), 5);
        let miss = cast_ray(&grid, 0.0, -4);
        assert_eq!(miss.crossings, 0);
        assert!(miss.pixels.is_empty());
    }

    #[test]
    fn stroke_touching_edge_is_not_a_crossing() {
        let grid = Grid::from_ascii(&["###", "###", "###"]).unwrap();
        assert_eq!(cast_ray(&grid, 0.0, 0).crossings, 0);
    }

    #[test]
    fn square_is_symmetric_under_quarter_turn() {
        let result = radial_sweep(&centered_square(), &SweepParams::default());
        assert_eq!(result.angles.len(), 120);
        assert_eq!(result.percentages.len(), 120);

        let zero = record(&result, 0);
        let ninety = record(&result, 90);
        assert_eq!(zero.intersections, vec![0, 1, 0]);
        assert_eq!(zero.intersections, ninety.intersections);
        assert_eq!(zero.intersections, record(&result, -90).intersections);

        let shares = &result.percentages[&0];
        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0], 0.0);
        assert_abs_diff_eq!(shares[1], 100.0, epsilon = 1e-9);
        assert_eq!(shares[2], 0.0);
        assert_eq!(result.percentages[&90], *shares);
    }

    #[test]
    fn sequential_matches_parallel() {
        let grid = Grid::from_ascii(&[
            "..........",
            ".##....##.",
            ".##....##.",
            "..######..",
            "...####...",
            "..........",
        ])
        .unwrap();
        let par = radial_sweep(&grid, &SweepParams::default());
        let seq = radial_sweep(
            &grid,
            &SweepParams {
                parallel: false,
                ..SweepParams::default()
            },
        );
        assert_eq!(par, seq);
    }

    #[test]
    fn empty_grid_has_zero_shares() {
        let grid = Grid::from_mask(6, 6, vec![false; 36]).unwrap();
        let result = radial_sweep(&grid, &SweepParams::default());
        assert!(result
            .percentages
            .values()
            .all(|shares| shares.iter().all(|&s| s == 0.0)));
        assert!(result
            .angles
            .iter()
            .all(|a| a.intersections.iter().all(|&c| c == 0)));
    }
}
