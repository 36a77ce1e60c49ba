use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::math::arc_2d::{circumcenter, is_ccw, unwrap_sweep};
use crate::math::{angle_of, Point2, Vector2, TOLERANCE};

use super::{check_range, Curve, CurveDomain};

/// A circular arc in the plane.
///
/// The parameter is the polar angle around `center`:
/// `P(t) = center + radius * (cos t, sin t)` for `t` between `angle1`
/// and `angle2`. Angles are unwrapped, so `angle2 - angle1` is the signed
/// sweep; a negative sweep is a clockwise arc.
#[derive(Debug, Clone)]
pub struct CircleArc {
    center: Point2,
    radius: f64,
    angle1: f64,
    angle2: f64,
}

impl CircleArc {
    /// Creates a new arc.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the arc circle
    /// * `radius` - Radius (must be positive)
    /// * `angle1` - Start angle in radians
    /// * `angle2` - End angle in radians
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive or an angle is not
    /// finite.
    pub fn new(center: Point2, radius: f64, angle1: f64, angle2: f64) -> Result<Self> {
        if radius.is_nan() || radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        if !angle1.is_finite() || !angle2.is_finite() {
            return Err(GeometryError::Degenerate("arc angles must be finite".into()).into());
        }

        Ok(Self {
            center,
            radius,
            angle1,
            angle2,
        })
    }

    /// Fits the arc that starts at `p1`, passes through `p2` and ends at `p3`.
    ///
    /// Three points fix the circle but not which of its two arcs is meant.
    /// The sweep is unwrapped in the rotation direction of `p1 -> p2 -> p3`,
    /// so the returned arc always contains `p2`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if two points coincide or the
    /// points are collinear.
    pub fn three_points(p1: &Point2, p2: &Point2, p3: &Point2) -> Result<Self> {
        let center = circumcenter(p1, p2, p3)?;
        let radius = (p1 - center).norm();

        let angle1 = angle_of(&(p1 - center));
        let raw_angle2 = angle_of(&(p3 - center));
        let ccw = is_ccw(p1, p2, p3);
        let angle2 = angle1 + unwrap_sweep(angle1, raw_angle2, ccw);

        debug!(
            cx = center.x,
            cy = center.y,
            radius,
            angle1,
            angle2,
            "fitted circle arc through three points"
        );

        Self::new(center, radius, angle1, angle2)
    }

    /// Creates the arc around `center` from `start` to `end`.
    ///
    /// `ccw` selects the rotation direction. Coinciding `start` and `end`
    /// produce a full circle.
    ///
    /// # Errors
    ///
    /// Returns an error if either point coincides with the center or the
    /// points are not equidistant from it.
    pub fn from_center_points(
        center: Point2,
        start: &Point2,
        end: &Point2,
        ccw: bool,
    ) -> Result<Self> {
        let radius = (start - center).norm();
        let end_radius = (end - center).norm();
        if radius < TOLERANCE || end_radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc endpoint at center".into()).into());
        }
        if (radius - end_radius).abs() > 1e-9 * radius.max(1.0) {
            return Err(GeometryError::Degenerate(format!(
                "arc endpoints at different radii {radius} and {end_radius}"
            ))
            .into());
        }

        let angle1 = angle_of(&(start - center));
        let angle2 = angle1 + unwrap_sweep(angle1, angle_of(&(end - center)), ccw);
        Self::new(center, radius, angle1, angle2)
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Start angle.
    #[must_use]
    pub fn angle1(&self) -> f64 {
        self.angle1
    }

    /// End angle (unwrapped).
    #[must_use]
    pub fn angle2(&self) -> f64 {
        self.angle2
    }

    /// Signed sweep `angle2 - angle1`.
    #[must_use]
    pub fn adv_angle(&self) -> f64 {
        self.angle2 - self.angle1
    }

    /// Whether the arc runs counter-clockwise.
    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.adv_angle() >= 0.0
    }

    /// Polar angle at parameter `t`. The parameter is the angle itself.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn angle(&self, t: f64) -> f64 {
        t
    }
}

impl Curve for CircleArc {
    fn position(&self, t: f64) -> Result<Point2> {
        Ok(self.center + Vector2::new(t.cos(), t.sin()) * self.radius)
    }

    fn derivative(&self, t: f64) -> Result<Vector2> {
        Ok(Vector2::new(-t.sin(), t.cos()) * self.radius)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(self.angle1, self.angle2)
    }

    fn length(&self, t1: f64, t2: f64) -> Result<f64> {
        let domain = self.domain();
        let t1 = domain.check("t1", t1)?;
        let t2 = domain.check("t2", t2)?;
        Ok(self.radius * (t2 - t1) * domain.direction())
    }

    fn t_at_length(&self, length: f64) -> Result<f64> {
        let length = check_range("length", length, 0.0, self.total_length())?;
        let domain = self.domain();
        Ok(self.angle1 + domain.direction() * length / self.radius)
    }

    fn total_length(&self) -> f64 {
        self.radius * self.adv_angle().abs()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const EPS: f64 = 1e-9;

    fn round_trip(angle1: f64, angle2: f64) {
        let arc = CircleArc::new(Point2::new(10.0, 10.0), 10.0, angle1, angle2).unwrap();
        let p1 = arc.position(arc.domain().t_min).unwrap();
        let p2 = arc.position(0.5 * (angle1 + angle2)).unwrap();
        let p3 = arc.position(arc.domain().t_max).unwrap();

        let fit = CircleArc::three_points(&p1, &p2, &p3).unwrap();
        assert_abs_diff_eq!(fit.center().x, arc.center().x, epsilon = EPS);
        assert_abs_diff_eq!(fit.center().y, arc.center().y, epsilon = EPS);
        assert_abs_diff_eq!(fit.radius(), arc.radius(), epsilon = EPS);
        assert_abs_diff_eq!(fit.adv_angle(), arc.adv_angle(), epsilon = EPS);
        assert_abs_diff_eq!(fit.domain().t_min, arc.domain().t_min, epsilon = EPS);
        assert_abs_diff_eq!(fit.domain().t_max, arc.domain().t_max, epsilon = EPS);
    }

    #[test]
    fn three_points_round_trip() {
        let cases = [
            (3.0 * FRAC_PI_4, FRAC_PI_4),
            (FRAC_PI_4, 3.0 * FRAC_PI_4),
            (0.1, 0.2),
            (0.2, 0.1),
            (-FRAC_PI_2, 1.4 * PI),
            (FRAC_PI_2, -1.4 * PI),
            (-3.0 * FRAC_PI_4, 3.0 * FRAC_PI_4),
            (3.0 * FRAC_PI_4, -3.0 * FRAC_PI_4),
        ];
        for (angle1, angle2) in cases {
            round_trip(angle1, angle2);
        }
    }

    #[test]
    fn three_points_contains_middle_point() {
        // Upper half of the unit circle, traversed clockwise.
        let arc = CircleArc::three_points(
            &Point2::new(-1.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Point2::new(1.0, 0.0),
        )
        .unwrap();
        assert!(!arc.is_ccw());
        assert_abs_diff_eq!(arc.adv_angle(), -PI, epsilon = EPS);
        let mid = arc.position(arc.angle1() + 0.5 * arc.adv_angle()).unwrap();
        assert_abs_diff_eq!(mid.x, 0.0, epsilon = EPS);
        assert_abs_diff_eq!(mid.y, 1.0, epsilon = EPS);
    }

    #[test]
    fn three_points_degenerate() {
        let r = CircleArc::three_points(
            &Point2::new(10.0, 10.0),
            &Point2::new(10.0, 10.0),
            &Point2::new(30.0, 10.0),
        );
        assert!(r.is_err());
        let r = CircleArc::three_points(
            &Point2::new(10.0, 10.0),
            &Point2::new(20.0, 10.0),
            &Point2::new(30.0, 10.0),
        );
        assert!(r.is_err());
    }

    #[test]
    fn clockwise_length_is_positive() {
        let arc = CircleArc::new(Point2::origin(), 2.0, PI, 0.0).unwrap();
        assert_abs_diff_eq!(arc.total_length(), 2.0 * PI, epsilon = EPS);
        assert_abs_diff_eq!(arc.length(PI, FRAC_PI_2).unwrap(), PI, epsilon = EPS);

        let t = arc.t_at_length(PI).unwrap();
        assert_abs_diff_eq!(t, FRAC_PI_2, epsilon = EPS);
        let p = arc.position(t).unwrap();
        assert_abs_diff_eq!(p.y, 2.0, epsilon = EPS);
    }

    #[test]
    fn tangent_follows_travel_direction() {
        let ccw = CircleArc::new(Point2::origin(), 1.0, 0.0, FRAC_PI_2).unwrap();
        let t = ccw.tangent(0.0).unwrap();
        assert_abs_diff_eq!(t.y, 1.0, epsilon = EPS);

        let cw = CircleArc::new(Point2::origin(), 1.0, FRAC_PI_2, 0.0).unwrap();
        let t = cw.tangent(0.0).unwrap();
        assert_abs_diff_eq!(t.y, -1.0, epsilon = EPS);
    }

    #[test]
    fn from_center_points() {
        let arc = CircleArc::from_center_points(
            Point2::origin(),
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, 1.0),
            false,
        )
        .unwrap();
        assert_abs_diff_eq!(arc.adv_angle(), -1.5 * PI, epsilon = EPS);

        let r = CircleArc::from_center_points(
            Point2::origin(),
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, 2.0),
            true,
        );
        assert!(r.is_err());
    }

    #[test]
    fn invalid_radius() {
        assert!(CircleArc::new(Point2::origin(), 0.0, 0.0, 1.0).is_err());
        assert!(CircleArc::new(Point2::origin(), -1.0, 0.0, 1.0).is_err());
    }
}
