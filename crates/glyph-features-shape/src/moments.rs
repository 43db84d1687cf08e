use glyph_features_core::PixelPos;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Raw (non-central) image moments up to second order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawMoments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
    pub m20: f64,
    pub m02: f64,
    pub m11: f64,
}

impl RawMoments {
    pub fn centroid(&self) -> Option<Point2<f64>> {
        if self.m00 <= 0.0 {
            return None;
        }
        Some(Point2::new(self.m10 / self.m00, self.m01 / self.m00))
    }

    /// Population covariance `(cov_xx, cov_yy, cov_xy)` about the centroid.
    pub fn covariance(&self) -> Option<(f64, f64, f64)> {
        let c = self.centroid()?;
        let cov_xx = self.m20 / self.m00 - c.x * c.x;
        let cov_yy = self.m02 / self.m00 - c.y * c.y;
        let cov_xy = self.m11 / self.m00 - c.x * c.y;
        Some((cov_xx, cov_yy, cov_xy))
    }
}

pub fn raw_moments(points: &[PixelPos]) -> RawMoments {
    let mut m = RawMoments::default();
    for p in points {
        let x = p.x as f64;
        let y = p.y as f64;
        m.m00 += 1.0;
        m.m10 += x;
        m.m01 += y;
        m.m20 += x * x;
        m.m02 += y * y;
        m.m11 += x * y;
    }
    m
}

/// Major/minor axis lengths (square roots of the covariance eigenvalues)
/// and the orientation of the major axis in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrincipalAxis {
    pub major: f64,
    pub minor: f64,
    pub angle: f64,
}

/// Principal axis of a point set. Empty input yields all zeros.
pub fn principal_axis(points: &[PixelPos]) -> PrincipalAxis {
    let Some((cov_xx, cov_yy, cov_xy)) = raw_moments(points).covariance() else {
        return PrincipalAxis::default();
    };

    let angle = 0.5 * (2.0 * cov_xy).atan2(cov_xx - cov_yy);
    let mean = 0.5 * (cov_xx + cov_yy);
    let spread = 0.5 * (4.0 * cov_xy * cov_xy + (cov_xx - cov_yy).powi(2)).sqrt();
    // Rounding can push a zero eigenvalue slightly negative.
    let eig_major = (mean + spread).max(0.0);
    let eig_minor = (mean - spread).max(0.0);

    PrincipalAxis {
        major: eig_major.sqrt(),
        minor: eig_minor.sqrt(),
        angle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn empty_points_give_zero_axis() {
        assert_eq!(principal_axis(&[]), PrincipalAxis::default());
    }

    #[test]
    fn horizontal_bar_has_zero_angle() {
        let pts: Vec<_> = (0..9).map(|x| PixelPos::new(x, 3)).collect();
        let axis = principal_axis(&pts);
        assert_abs_diff_eq!(axis.angle, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(axis.minor, 0.0, epsilon = 1e-9);
        // Variance of 0..=8 is 60 / 9.
        assert_abs_diff_eq!(axis.major, (60.0f64 / 9.0).sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn vertical_bar_is_rotated_quarter_turn() {
        let pts: Vec<_> = (0..5).map(|y| PixelPos::new(2, y)).collect();
        let axis = principal_axis(&pts);
        assert_abs_diff_eq!(axis.angle.abs(), std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert!(axis.major > axis.minor);
    }

    #[test]
    fn diagonal_line_points_at_45_degrees() {
        let pts: Vec<_> = (0..6).map(|i| PixelPos::new(i, i)).collect();
        let axis = principal_axis(&pts);
        assert_abs_diff_eq!(axis.angle, std::f64::consts::FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn square_moments_center_on_middle() {
        let pts: Vec<_> = (0..3)
            .flat_map(|y| (0..3).map(move |x| PixelPos::new(x, y)))
            .collect();
        let m = raw_moments(&pts);
        assert_eq!(m.m00, 9.0);
        let c = m.centroid().unwrap();
        assert_abs_diff_eq!(c.x, 1.0);
        assert_abs_diff_eq!(c.y, 1.0);
    }
}
