pub mod curve;

pub use curve::{
    AnyCurve, CircleArc, ClothoidArc, ClothoidFitParams, ComposedCurve, Curve, CurveDomain, Line,
};
