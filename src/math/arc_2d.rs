//! 2D circle math: circumcenter solving and sweep unwrapping.
//!
//! Angles are polar angles around the circle center, measured
//! counter-clockwise from the +X axis.
use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};

use super::{cross, Point2, Vector2, TOLERANCE};

/// Computes the center of the circle through three points.
///
/// Solves the 2x2 system formed by the perpendicular bisectors of
/// `(p1, p2)` and `(p2, p3)`, expressed relative to `p1`:
///
/// ```text
/// (p2 - p1) . c = |p2 - p1|^2 / 2
/// (p3 - p1) . c = |p3 - p1|^2 / 2
/// ```
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] if two of the points coincide or
/// the three points are collinear.
pub fn circumcenter(p1: &Point2, p2: &Point2, p3: &Point2) -> Result<Point2> {
    let b = p2 - p1;
    let c = p3 - p1;
    let d = p3 - p2;

    let (b_len, c_len) = (b.norm(), c.norm());
    if b_len < TOLERANCE || c_len < TOLERANCE || d.norm() < TOLERANCE {
        return Err(GeometryError::Degenerate("circle through coincident points".into()).into());
    }

    // det = |b| |c| sin(angle between b and c)
    let det = cross(&b, &c);
    if det.abs() <= TOLERANCE * b_len * c_len {
        return Err(GeometryError::Degenerate("circle through collinear points".into()).into());
    }

    let rhs_b = 0.5 * b.norm_squared();
    let rhs_c = 0.5 * c.norm_squared();
    let offset = Vector2::new(
        (rhs_b * c.y - rhs_c * b.y) / det,
        (b.x * rhs_c - c.x * rhs_b) / det,
    );

    Ok(p1 + offset)
}

/// Returns `true` when `p1 -> p2 -> p3` turns counter-clockwise.
///
/// For three distinct points on a circle this is also the rotation
/// direction of the arc that starts at `p1`, passes `p2` and ends at `p3`.
#[must_use]
pub fn is_ccw(p1: &Point2, p2: &Point2, p3: &Point2) -> bool {
    cross(&(p2 - p1), &(p3 - p2)) > 0.0
}

/// Unwraps the sweep from `start_angle` to `end_angle` in the given
/// rotation direction.
///
/// The result lies in `(0, 2pi]` for counter-clockwise and `[-2pi, 0)` for
/// clockwise rotation. Coinciding angles yield a full turn.
#[must_use]
pub fn unwrap_sweep(start_angle: f64, end_angle: f64, ccw: bool) -> f64 {
    let raw = end_angle - start_angle;
    if ccw {
        let sweep = raw.rem_euclid(TAU);
        if sweep <= 0.0 {
            TAU
        } else {
            sweep
        }
    } else {
        let sweep = -(-raw).rem_euclid(TAU);
        if sweep >= 0.0 {
            -TAU
        } else {
            sweep
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const TOL: f64 = 1e-10;

    #[test]
    fn right_triangle_center_is_hypotenuse_midpoint() {
        let c = circumcenter(
            &Point2::new(0.0, 0.0),
            &Point2::new(4.0, 0.0),
            &Point2::new(0.0, 2.0),
        )
        .unwrap();
        assert!((c - Point2::new(2.0, 1.0)).norm() < TOL, "c={c}");
    }

    #[test]
    fn center_of_points_on_offset_circle() {
        let center = Point2::new(10.0, -3.0);
        let on = |a: f64| center + Vector2::new(a.cos(), a.sin()) * 7.5;
        let c = circumcenter(&on(0.3), &on(2.0), &on(-1.7)).unwrap();
        assert!((c - center).norm() < 1e-9, "c={c}");
    }

    #[test]
    fn duplicate_points_are_rejected() {
        let r = circumcenter(
            &Point2::new(10.0, 10.0),
            &Point2::new(10.0, 10.0),
            &Point2::new(30.0, 10.0),
        );
        assert!(r.is_err());
        let r = circumcenter(
            &Point2::new(10.0, 10.0),
            &Point2::new(30.0, 10.0),
            &Point2::new(30.0, 10.0),
        );
        assert!(r.is_err());
    }

    #[test]
    fn collinear_points_are_rejected() {
        let r = circumcenter(
            &Point2::new(10.0, 10.0),
            &Point2::new(20.0, 10.0),
            &Point2::new(30.0, 10.0),
        );
        assert!(r.is_err());
    }

    #[test]
    fn orientation() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(1.0, 1.0);
        assert!(is_ccw(&a, &b, &c));
        assert!(!is_ccw(&c, &b, &a));
    }

    #[test]
    fn unwrap_ccw_sweep() {
        assert!((unwrap_sweep(0.0, FRAC_PI_2, true) - FRAC_PI_2).abs() < TOL);
        // From 3pi/4 to -3pi/4 counter-clockwise passes through pi.
        let s = unwrap_sweep(0.75 * PI, -0.75 * PI, true);
        assert!((s - FRAC_PI_2).abs() < TOL, "s={s}");
        assert!((unwrap_sweep(1.0, 1.0, true) - TAU).abs() < TOL);
    }

    #[test]
    fn unwrap_cw_sweep() {
        let s = unwrap_sweep(0.0, FRAC_PI_2, false);
        assert!((s + 1.5 * PI).abs() < TOL, "s={s}");
        let s = unwrap_sweep(-0.75 * PI, 0.75 * PI, false);
        assert!((s + FRAC_PI_2).abs() < TOL, "s={s}");
        assert!((unwrap_sweep(1.0, 1.0, false) + TAU).abs() < TOL);
    }
}
