use crate::error::{GeometryError, Result};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{check_range, Curve, CurveDomain};

/// A straight segment between two points, parameterized by arc length.
///
/// The parametric form is: `P(t) = start + t * direction` for
/// `t` in `[0, length]`.
#[derive(Debug, Clone)]
pub struct Line {
    start: Point2,
    direction: Vector2,
    length: f64,
}

impl Line {
    /// Creates a new segment from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the two points coincide.
    pub fn new(start: Point2, end: Point2) -> Result<Self> {
        let offset = end - start;
        let length = offset.norm();
        if length < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            start,
            direction: offset / length,
            length,
        })
    }

    /// Returns the start point of the segment.
    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.start
    }

    /// Returns the unit direction vector of the segment.
    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }
}

impl Curve for Line {
    fn position(&self, t: f64) -> Result<Point2> {
        Ok(self.start + self.direction * t)
    }

    fn derivative(&self, _t: f64) -> Result<Vector2> {
        Ok(self.direction)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.length)
    }

    fn length(&self, t1: f64, t2: f64) -> Result<f64> {
        let domain = self.domain();
        Ok(domain.check("t2", t2)? - domain.check("t1", t1)?)
    }

    fn t_at_length(&self, length: f64) -> Result<f64> {
        check_range("length", length, 0.0, self.length)
    }

    fn total_length(&self) -> f64 {
        self.length
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn length_3_4_5() {
        let line = Line::new(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0)).unwrap();
        assert!((line.total_length() - 5.0).abs() < TOLERANCE);
        let end = line.end_point().unwrap();
        assert!((end - Point2::new(3.0, 4.0)).norm() < TOLERANCE);
    }

    #[test]
    fn parameter_is_arc_length() {
        let line = Line::new(Point2::new(1.0, 1.0), Point2::new(1.0, 11.0)).unwrap();
        let t = line.t_at_length(2.5).unwrap();
        assert!((line.length(0.0, t).unwrap() - 2.5).abs() < TOLERANCE);
        let p = line.position(t).unwrap();
        assert!((p - Point2::new(1.0, 3.5)).norm() < TOLERANCE);
    }

    #[test]
    fn tangent_is_direction() {
        let line = Line::new(Point2::new(0.0, 0.0), Point2::new(-2.0, 0.0)).unwrap();
        let t = line.tangent(0.7).unwrap();
        assert!((t - Vector2::new(-1.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn out_of_range_length_fails() {
        let line = Line::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)).unwrap();
        assert!(line.t_at_length(1.5).is_err());
        assert!(line.t_at_length(-0.1).is_err());
        assert!(line.length(0.0, 2.0).is_err());
    }

    #[test]
    fn zero_length_segment() {
        let r = Line::new(Point2::new(2.0, 2.0), Point2::new(2.0, 2.0));
        assert!(r.is_err());
    }
}
