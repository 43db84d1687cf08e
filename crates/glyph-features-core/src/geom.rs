use crate::PixelPos;
use nalgebra::Vector2;

#[inline]
pub fn euclidean(a: PixelPos, b: PixelPos) -> f64 {
    (b.to_point() - a.to_point()).norm()
}

/// Sum of segment lengths along a polyline.
pub fn polyline_length(points: &[PixelPos]) -> f64 {
    points.windows(2).map(|w| euclidean(w[0], w[1])).sum()
}

/// Turning angle at `b` between `a -> b` and `b -> c`, in degrees.
///
/// 0° means the three points are collinear and ordered, 180° a full
/// reversal. Degenerate (zero-length) legs count as straight.
pub fn vertex_angle_deg(a: PixelPos, b: PixelPos, c: PixelPos) -> f64 {
    let ab: Vector2<f64> = b.to_point() - a.to_point();
    let bc: Vector2<f64> = c.to_point() - b.to_point();
    let denom = ab.norm() * bc.norm();
    if denom <= f64::EPSILON {
        return 0.0;
    }
    let cos = (ab.dot(&bc) / denom).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}
