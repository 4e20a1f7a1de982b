//! Planar geometry helpers shared by all phase analyzers.
//!
//! All functions take pixel-space points (y grows downwards) and return
//! degrees or pixels.

use crate::constants::EPSILON;
use nalgebra::{Point2, Vector2};

/// Inner angle ABC in degrees, the angle at vertex `b` between rays b→a and b→c
///
/// The cosine is clamped to [-1, 1]. A degenerate ray (coincident points)
/// yields 0.
#[must_use]
pub fn inner_angle(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    let ba: Vector2<f64> = a - b;
    let bc: Vector2<f64> = c - b;
    let norms = ba.norm() * bc.norm();
    if norms < EPSILON {
        log::debug!("Degenerate inner angle at ({:.1}, {:.1})", b.x, b.y);
        return 0.0;
    }
    let cos_angle = (ba.dot(&bc) / norms).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Acute angle between segment a→b and the horizontal, in degrees
///
/// Signs of dx and dy are discarded, so the result lies in [0, 90] whatever
/// way the athlete runs through the frame. 0 is horizontal, 90 is vertical.
#[must_use]
pub fn horizontal_angle(a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    let d = b - a;
    d.y.abs().atan2(d.x.abs()).to_degrees()
}

/// Euclidean distance between two points
#[must_use]
pub fn distance(a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    nalgebra::distance(a, b)
}

/// Midpoint of a segment
#[must_use]
pub fn midpoint(a: &Point2<f64>, b: &Point2<f64>) -> Point2<f64> {
    nalgebra::center(a, b)
}

/// Weighted blend `wa * a + wb * b` of two points
#[must_use]
pub fn weighted_point(a: &Point2<f64>, wa: f64, b: &Point2<f64>, wb: f64) -> Point2<f64> {
    Point2::from(a.coords * wa + b.coords * wb)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn test_inner_angle_right_angle() {
        let angle = inner_angle(&p(0.0, 10.0), &p(0.0, 0.0), &p(10.0, 0.0));
        assert!((angle - 90.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_inner_angle_straight_and_folded() {
        let straight = inner_angle(&p(-5.0, 0.0), &p(0.0, 0.0), &p(7.0, 0.0));
        assert!((straight - 180.0).abs() < TOLERANCE);

        let folded = inner_angle(&p(5.0, 0.0), &p(0.0, 0.0), &p(7.0, 0.0));
        assert!(folded.abs() < TOLERANCE);
    }

    #[test]
    fn test_inner_angle_is_symmetric() {
        let a = p(3.0, 8.0);
        let b = p(1.0, 1.0);
        let c = p(9.0, -2.0);
        assert!((inner_angle(&a, &b, &c) - inner_angle(&c, &b, &a)).abs() < TOLERANCE);
    }

    #[test]
    fn test_inner_angle_collinear_drift_stays_finite() {
        // Nearly collinear points can push the cosine slightly past -1
        let angle = inner_angle(&p(1e8, 1e-8), &p(0.0, 0.0), &p(-1e8, -1e-8));
        assert!(angle.is_finite());
        assert!((angle - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_inner_angle_degenerate() {
        assert_eq!(inner_angle(&p(1.0, 1.0), &p(1.0, 1.0), &p(5.0, 2.0)), 0.0);
    }

    #[test]
    fn test_horizontal_angle_range() {
        assert!(horizontal_angle(&p(0.0, 0.0), &p(10.0, 0.0)).abs() < TOLERANCE);
        assert!((horizontal_angle(&p(0.0, 0.0), &p(0.0, 10.0)) - 90.0).abs() < TOLERANCE);
        assert!((horizontal_angle(&p(0.0, 0.0), &p(10.0, 10.0)) - 45.0).abs() < TOLERANCE);
        assert_eq!(horizontal_angle(&p(2.0, 2.0), &p(2.0, 2.0)), 0.0);
    }

    #[test]
    fn test_horizontal_angle_ignores_direction() {
        let a = p(100.0, 100.0);
        let expected = horizontal_angle(&a, &p(130.0, 160.0));
        for b in [p(70.0, 160.0), p(130.0, 40.0), p(70.0, 40.0)] {
            assert!((horizontal_angle(&a, &b) - expected).abs() < TOLERANCE);
            assert!((horizontal_angle(&b, &a) - expected).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_distance_and_midpoint() {
        assert!((distance(&p(0.0, 0.0), &p(3.0, 4.0)) - 5.0).abs() < TOLERANCE);
        let m = midpoint(&p(0.0, 0.0), &p(4.0, -2.0));
        assert!((m.x - 2.0).abs() < TOLERANCE);
        assert!((m.y + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_weighted_point() {
        let w = weighted_point(&p(0.0, 0.0), 0.4, &p(10.0, 20.0), 0.6);
        assert!((w.x - 6.0).abs() < TOLERANCE);
        assert!((w.y - 12.0).abs() < TOLERANCE);
    }
}
