use crate::moments::principal_axis;
use crate::ShapeParams;
use glyph_features_core::{label_components, Component, Grid, PixelPos};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

const DIRS4: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Descriptors of one retained region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionMetrics {
    /// `4π·area / perimeter²`.
    pub circularity: f64,
    /// Farthest over nearest boundary distance to the centroid.
    pub aspect_ratio: f64,
    /// Centroid mapped into `[-10, 10]` relative to the image width.
    pub centroid_x: f64,
    /// Centroid mapped into `[-10, 10]` relative to the image height.
    pub centroid_y: f64,
    /// Area as a percentage of the image area.
    pub relative_mass: f64,
    /// Farthest boundary distance as a percentage of the image diagonal.
    pub relative_max: f64,
    pub major_axis: f64,
    pub minor_axis: f64,
    /// Major axis orientation, radians.
    pub axis_angle: f64,
    /// No member pixel touches a border negative-space pixel.
    pub is_enclosed: bool,
}

/// Label `mask` and summarize every component above the mass noise floor.
///
/// `border` marks border negative-space pixels; a component touching one is
/// not enclosed. Without it every section reports `is_enclosed = true`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(mask, params, border), fields(width = mask.width(), height = mask.height()))
)]
pub fn analyze_sections(
    mask: &Grid,
    params: &ShapeParams,
    border: Option<&Grid>,
) -> Vec<SectionMetrics> {
    let components = label_components(mask, &params.label);
    let sections: Vec<SectionMetrics> = components
        .iter()
        .filter_map(|c| section_metrics(c, mask.width(), mask.height(), params, border))
        .collect();
    log::debug!(
        "{} of {} components above the {:.2}% mass floor",
        sections.len(),
        components.len(),
        params.min_relative_mass_pct
    );
    sections
}

/// Metrics for one component in an image of `width x height`, or `None`
/// when the component is below the noise floor.
pub fn section_metrics(
    component: &Component,
    width: usize,
    height: usize,
    params: &ShapeParams,
    border: Option<&Grid>,
) -> Option<SectionMetrics> {
    let area = component.area();
    if area == 0 {
        return None;
    }
    let relative_mass = area as f64 / (width * height) as f64 * 100.0;
    if relative_mass <= params.min_relative_mass_pct {
        return None;
    }

    let local = LocalMask::new(component);
    let boundary: Vec<PixelPos> = component
        .pixels
        .iter()
        .copied()
        .filter(|&p| local.is_boundary(p))
        .collect();
    let perimeter = boundary.len();
    let circularity = if perimeter == 0 {
        0.0
    } else {
        4.0 * std::f64::consts::PI * area as f64 / (perimeter * perimeter) as f64
    };

    let n = area as f64;
    let cx = component.pixels.iter().map(|p| p.x as f64).sum::<f64>() / n;
    let cy = component.pixels.iter().map(|p| p.y as f64).sum::<f64>() / n;

    let mut max_dist = 0.0f64;
    let mut min_dist = f64::MAX;
    for p in &boundary {
        let d = ((p.x as f64 - cx).powi(2) + (p.y as f64 - cy).powi(2)).sqrt();
        max_dist = max_dist.max(d);
        min_dist = min_dist.min(d);
    }
    let aspect_ratio = max_dist / min_dist.max(1.0);

    let diagonal = ((width * width + height * height) as f64).sqrt();
    let axis = principal_axis(&component.pixels);

    let is_enclosed = match border {
        Some(b) => !component.pixels.iter().any(|&p| touches(b, p)),
        None => true,
    };

    Some(SectionMetrics {
        circularity,
        aspect_ratio,
        centroid_x: map_coordinate(cx, width),
        centroid_y: map_coordinate(cy, height),
        relative_mass,
        relative_max: max_dist / diagonal * 100.0,
        major_axis: axis.major,
        minor_axis: axis.minor,
        axis_angle: axis.angle,
        is_enclosed,
    })
}

/// Map a coordinate into `[-10, 10]` relative to the image center.
fn map_coordinate(coord: f64, dimension: usize) -> f64 {
    let dim = dimension as f64;
    2.0 * (coord - dim / 2.0) / dim * 10.0
}

fn touches(marked: &Grid, p: PixelPos) -> bool {
    DIRS4
        .iter()
        .any(|&(dx, dy)| marked.is_foreground_signed(p.x as i64 + dx, p.y as i64 + dy))
}

/// Membership bitmap over the component's bounding box.
struct LocalMask {
    x0: usize,
    y0: usize,
    w: usize,
    h: usize,
    bits: Vec<bool>,
}

impl LocalMask {
    fn new(component: &Component) -> Self {
        let b = component.bbox;
        let mut bits = vec![false; b.width * b.height];
        for p in &component.pixels {
            bits[(p.y - b.y) * b.width + (p.x - b.x)] = true;
        }
        Self {
            x0: b.x,
            y0: b.y,
            w: b.width,
            h: b.height,
            bits,
        }
    }

    fn contains(&self, x: i64, y: i64) -> bool {
        let lx = x - self.x0 as i64;
        let ly = y - self.y0 as i64;
        if lx < 0 || ly < 0 || lx >= self.w as i64 || ly >= self.h as i64 {
            return false;
        }
        self.bits[ly as usize * self.w + lx as usize]
    }

    /// Missing at least one 4-neighbor inside the component.
    fn is_boundary(&self, p: PixelPos) -> bool {
        DIRS4
            .iter()
            .any(|&(dx, dy)| !self.contains(p.x as i64 + dx, p.y as i64 + dy))
    }
}
