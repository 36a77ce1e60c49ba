use crate::error::Result;
use crate::math::{Point2, Vector2};

use super::{CircleArc, ClothoidArc, ComposedCurve, Curve, CurveDomain, Line};

/// Any curve kind supported by the crate.
///
/// This is the element type of [`ComposedCurve`], so alignments can mix
/// lines, arcs, transitions and nested compositions.
#[derive(Debug, Clone)]
pub enum AnyCurve {
    Line(Line),
    CircleArc(CircleArc),
    Clothoid(ClothoidArc),
    Composed(ComposedCurve),
}

impl From<Line> for AnyCurve {
    fn from(curve: Line) -> Self {
        Self::Line(curve)
    }
}

impl From<CircleArc> for AnyCurve {
    fn from(curve: CircleArc) -> Self {
        Self::CircleArc(curve)
    }
}

impl From<ClothoidArc> for AnyCurve {
    fn from(curve: ClothoidArc) -> Self {
        Self::Clothoid(curve)
    }
}

impl From<ComposedCurve> for AnyCurve {
    fn from(curve: ComposedCurve) -> Self {
        Self::Composed(curve)
    }
}

impl AnyCurve {
    fn as_curve(&self) -> &dyn Curve {
        match self {
            Self::Line(c) => c,
            Self::CircleArc(c) => c,
            Self::Clothoid(c) => c,
            Self::Composed(c) => c,
        }
    }
}

impl Curve for AnyCurve {
    fn position(&self, t: f64) -> Result<Point2> {
        self.as_curve().position(t)
    }

    fn derivative(&self, t: f64) -> Result<Vector2> {
        self.as_curve().derivative(t)
    }

    fn tangent(&self, t: f64) -> Result<Vector2> {
        self.as_curve().tangent(t)
    }

    fn domain(&self) -> CurveDomain {
        self.as_curve().domain()
    }

    fn length(&self, t1: f64, t2: f64) -> Result<f64> {
        self.as_curve().length(t1, t2)
    }

    fn t_at_length(&self, length: f64) -> Result<f64> {
        self.as_curve().t_at_length(length)
    }

    fn total_length(&self) -> f64 {
        self.as_curve().total_length()
    }
}
