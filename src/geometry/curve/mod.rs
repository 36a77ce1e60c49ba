mod any;
mod circle_arc;
pub mod clothoid;
mod composed;
mod line;

pub use any::AnyCurve;
pub use circle_arc::CircleArc;
pub use clothoid::{ClothoidArc, ClothoidFitParams};
pub use composed::{ComposedCurve, DEFAULT_JOIN_TOLERANCE};
pub use line::Line;

use crate::error::{GeometryError, Result};
use crate::math::{Point2, Vector2, TOLERANCE};

/// Parameter domain for a curve.
///
/// `t_min` is where the curve starts and `t_max` where it ends. For curves
/// traversed against their parameter (a clockwise circle arc) `t_min`
/// is greater than `t_max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Signed extent `t_max - t_min`.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.t_max - self.t_min
    }

    /// `1.0` if the parameter grows along the curve, `-1.0` otherwise.
    #[must_use]
    pub fn direction(&self) -> f64 {
        if self.span() < 0.0 {
            -1.0
        } else {
            1.0
        }
    }

    /// Lower and upper bound regardless of traversal direction.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.t_min.min(self.t_max), self.t_min.max(self.t_max))
    }

    /// Returns whether `t` lies within the domain, allowing [`TOLERANCE`].
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        let (lo, hi) = self.bounds();
        t >= lo - TOLERANCE && t <= hi + TOLERANCE
    }

    /// Validates `t` against the domain, snapping values within
    /// [`TOLERANCE`] of a bound onto it.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] if `t` lies outside.
    pub fn check(&self, parameter: &'static str, t: f64) -> Result<f64> {
        let (lo, hi) = self.bounds();
        check_range(parameter, t, lo, hi)
    }
}

/// Validates `value` against `[min, max]`, clamping values within
/// [`TOLERANCE`] of a bound.
pub(crate) fn check_range(parameter: &'static str, value: f64, min: f64, max: f64) -> Result<f64> {
    if value.is_nan() || value < min - TOLERANCE || value > max + TOLERANCE {
        return Err(GeometryError::ParameterOutOfRange {
            parameter,
            value,
            min,
            max,
        }
        .into());
    }
    Ok(value.clamp(min, max))
}

/// Trait for parametric curves in the plane.
///
/// Lengths are signed and measured in travel direction, from `t_min`
/// towards `t_max`.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 2D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range or evaluation fails.
    fn position(&self, t: f64) -> Result<Point2>;

    /// Derivative of the position with respect to the parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range.
    fn derivative(&self, t: f64) -> Result<Vector2>;

    /// Unit tangent at `t`, pointing in travel direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range or the derivative
    /// vanishes.
    fn tangent(&self, t: f64) -> Result<Vector2> {
        let d = self.derivative(t)?;
        let len = d.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(d * (self.domain().direction() / len))
    }

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Signed arc length from `t1` to `t2`.
    ///
    /// # Errors
    ///
    /// Returns an error if either parameter is out of range.
    fn length(&self, t1: f64, t2: f64) -> Result<f64>;

    /// Parameter at arc length `length` from the start of the curve.
    ///
    /// # Errors
    ///
    /// Returns an error if `length` is outside `[0, total_length]`.
    fn t_at_length(&self, length: f64) -> Result<f64>;

    /// Arc length from `t_min` to `t_max`.
    fn total_length(&self) -> f64;

    /// Position at `t_min`.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    fn start_point(&self) -> Result<Point2> {
        self.position(self.domain().t_min)
    }

    /// Position at `t_max`.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    fn end_point(&self) -> Result<Point2> {
        self.position(self.domain().t_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_domain() {
        let d = CurveDomain::new(2.0, -1.0);
        assert!((d.span() + 3.0).abs() < TOLERANCE);
        assert!((d.direction() + 1.0).abs() < TOLERANCE);
        assert_eq!(d.bounds(), (-1.0, 2.0));
        assert!(d.contains(0.0));
        assert!(!d.contains(2.5));
    }

    #[test]
    fn check_snaps_near_bounds() {
        let d = CurveDomain::new(0.0, 1.0);
        let t = d.check("t", 1.0 + 1e-12).ok();
        assert_eq!(t, Some(1.0));
        assert!(d.check("t", 1.1).is_err());
        assert!(d.check("t", f64::NAN).is_err());
    }
}
