use crate::error::{Result, TessellationError};
use std::f64::consts::PI;

use crate::geometry::curve::{AnyCurve, Curve};

use super::{Polyline, TessellationParams};

/// Tessellates a curve into a polyline with vertices equally spaced in arc
/// length.
///
/// Composed curves are sampled segment by segment so every junction is a
/// vertex.
pub struct TessellateCurve<'a> {
    curve: &'a AnyCurve,
    params: TessellationParams,
}

impl<'a> TessellateCurve<'a> {
    /// Creates a new `TessellateCurve` operation.
    #[must_use]
    pub fn new(curve: &'a AnyCurve, params: TessellationParams) -> Self {
        Self { curve, params }
    }

    /// Executes the tessellation, returning a polyline.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or the curve cannot
    /// be evaluated.
    pub fn execute(&self) -> Result<Polyline> {
        self.validate()?;
        let mut polyline = Polyline::default();
        self.append(self.curve, &mut polyline)?;
        Ok(polyline)
    }

    fn validate(&self) -> Result<()> {
        let p = &self.params;
        if !p.tolerance.is_finite() || p.tolerance <= 0.0 {
            return Err(TessellationError::InvalidParameters(format!(
                "tolerance must be positive, got {}",
                p.tolerance
            ))
            .into());
        }
        if p.min_segments == 0 || p.max_segments < p.min_segments {
            return Err(TessellationError::InvalidParameters(format!(
                "segment bounds [{}, {}] are invalid",
                p.min_segments, p.max_segments
            ))
            .into());
        }
        Ok(())
    }

    fn append(&self, curve: &AnyCurve, polyline: &mut Polyline) -> Result<()> {
        if let AnyCurve::Composed(composed) = curve {
            for segment in composed.segments() {
                self.append(segment, polyline)?;
            }
            return Ok(());
        }

        let n = self.segment_count(curve);
        let total = curve.total_length();
        // Junction vertices are shared with the previous piece.
        let first = usize::from(!polyline.points.is_empty());
        for i in first..=n {
            #[allow(clippy::cast_precision_loss)]
            let length = total * i as f64 / n as f64;
            polyline.points.push(curve.position(curve.t_at_length(length)?)?);
        }
        Ok(())
    }

    fn segment_count(&self, curve: &AnyCurve) -> usize {
        let tolerance = self.params.tolerance;
        let count = match curve {
            AnyCurve::Line(_) => return 1,
            AnyCurve::CircleArc(arc) => {
                chords_for_turn(arc.radius(), arc.adv_angle().abs(), tolerance)
            }
            AnyCurve::Clothoid(spiral) => {
                chords_for_turn(spiral.min_radius(), spiral.turning(), tolerance)
            }
            AnyCurve::Composed(_) => 1,
        };
        count.clamp(self.params.min_segments, self.params.max_segments)
    }
}

/// Largest turn of a chord whose sagitta on a circle of `radius` stays
/// within `tolerance`.
///
/// `sagitta = r (1 - cos(theta / 2)) = 2 r sin^2(theta / 4)`.
fn max_chord_angle(radius: f64, tolerance: f64) -> f64 {
    let ratio = tolerance / (2.0 * radius);
    if ratio >= 1.0 {
        return 2.0 * PI;
    }
    4.0 * ratio.sqrt().asin()
}

/// Chords needed for `turning` radians of tangent rotation when the
/// curvature radius never drops below `radius`.
fn chords_for_turn(radius: f64, turning: f64, tolerance: f64) -> usize {
    if !(radius > 0.0 && turning > 0.0) {
        return 1;
    }
    let count = (turning / max_chord_angle(radius, tolerance)).ceil();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = count.min(f64::from(u32::MAX)) as usize;
    count.max(1)
}
