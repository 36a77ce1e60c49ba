use tracing::debug;

use crate::error::{CompositionError, GeometryError, Result};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{check_range, AnyCurve, Curve, CurveDomain};

/// Largest gap accepted between the end of one segment and the start of
/// the next.
pub const DEFAULT_JOIN_TOLERANCE: f64 = 1e-6;

/// A chain of curves joined end to start, parameterized by total arc
/// length over `[0, total_length]`.
///
/// `prefix[i]` is the arc length at which segment `i` starts, with a final
/// entry for the total length. A length that falls exactly on a junction
/// belongs to the following segment.
#[derive(Debug, Clone)]
pub struct ComposedCurve {
    segments: Vec<AnyCurve>,
    prefix: Vec<f64>,
}

impl ComposedCurve {
    /// Chains `segments` using [`DEFAULT_JOIN_TOLERANCE`].
    ///
    /// # Errors
    ///
    /// See [`ComposedCurve::with_tolerance`].
    pub fn new(segments: Vec<AnyCurve>) -> Result<Self> {
        Self::with_tolerance(segments, DEFAULT_JOIN_TOLERANCE)
    }

    /// Chains `segments`, requiring each to start within `join_tolerance`
    /// of where the previous one ends.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError::Empty`] for no segments,
    /// [`CompositionError::Discontinuity`] for a gap at a junction and
    /// [`GeometryError::Degenerate`] for a segment without length.
    pub fn with_tolerance(segments: Vec<AnyCurve>, join_tolerance: f64) -> Result<Self> {
        if segments.is_empty() {
            return Err(CompositionError::Empty.into());
        }

        let mut prefix = Vec::with_capacity(segments.len() + 1);
        prefix.push(0.0);
        let mut previous_end: Option<Point2> = None;
        let mut total = 0.0;

        for (index, segment) in segments.iter().enumerate() {
            let length = segment.total_length();
            if length.is_nan() || length < TOLERANCE {
                return Err(GeometryError::Degenerate(format!(
                    "segment {index} has no length"
                ))
                .into());
            }

            if let Some(end) = previous_end {
                let gap = (segment.start_point()? - end).norm();
                if gap > join_tolerance {
                    return Err(CompositionError::Discontinuity { index, gap }.into());
                }
            }
            previous_end = Some(segment.end_point()?);

            total += length;
            prefix.push(total);
        }

        debug!(segments = segments.len(), total_length = total, "composed curve");

        Ok(Self { segments, prefix })
    }

    /// The chained segments in travel order.
    #[must_use]
    pub fn segments(&self) -> &[AnyCurve] {
        &self.segments
    }

    /// Arc length at the start of each segment, followed by the total.
    #[must_use]
    pub fn prefix_lengths(&self) -> &[f64] {
        &self.prefix
    }

    /// Locates the segment owning global arc length `length` and the local
    /// parameter on it.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] if `length` is
    /// outside `[0, total_length]`.
    pub fn segment_at(&self, length: f64) -> Result<(usize, f64)> {
        let length = check_range("length", length, 0.0, self.total_length())?;
        let last = self.segments.len() - 1;
        let index = self
            .prefix
            .partition_point(|&start| start <= length)
            .saturating_sub(1)
            .min(last);

        let segment = &self.segments[index];
        let local = (length - self.prefix[index]).clamp(0.0, segment.total_length());
        Ok((index, segment.t_at_length(local)?))
    }
}

impl Curve for ComposedCurve {
    fn position(&self, t: f64) -> Result<Point2> {
        let (index, local) = self.segment_at(t)?;
        self.segments[index].position(local)
    }

    /// The parameter is arc length, so the derivative is the unit tangent.
    fn derivative(&self, t: f64) -> Result<Vector2> {
        let (index, local) = self.segment_at(t)?;
        self.segments[index].tangent(local)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.total_length())
    }

    fn length(&self, t1: f64, t2: f64) -> Result<f64> {
        let total = self.total_length();
        let t1 = check_range("t1", t1, 0.0, total)?;
        let t2 = check_range("t2", t2, 0.0, total)?;
        let (lo, hi, sign) = if t1 <= t2 {
            (t1, t2, 1.0)
        } else {
            (t2, t1, -1.0)
        };

        let mut sum = 0.0;
        for (index, segment) in self.segments.iter().enumerate() {
            let (start, end) = (self.prefix[index], self.prefix[index + 1]);
            if end <= lo || start >= hi {
                continue;
            }
            let segment_length = segment.total_length();
            let from = segment.t_at_length((lo - start).clamp(0.0, segment_length))?;
            let to = segment.t_at_length((hi - start).clamp(0.0, segment_length))?;
            sum += segment.length(from, to)?;
        }

        Ok(sign * sum)
    }

    fn t_at_length(&self, length: f64) -> Result<f64> {
        let (index, local) = self.segment_at(length)?;
        let segment = &self.segments[index];
        Ok(self.prefix[index] + segment.length(segment.domain().t_min, local)?)
    }

    fn total_length(&self) -> f64 {
        self.prefix[self.prefix.len() - 1]
    }
}
