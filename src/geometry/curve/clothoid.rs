//! Clothoid (Euler spiral) evaluation, tangent inversion and placed arcs.
//!
//! The canonical spiral of scale `a` starts at the origin heading along +X
//! and has curvature `l / a^2` at arc length `l`. Its tangent angle is
//!
//! ```text
//! theta(l) = sign * l^2 / (2 a^2)
//! ```
//!
//! where `sign` is `-1` on the mirrored (`invert_y`) branch, which bends
//! the opposite way. Both branches are odd in `l`: negative arc lengths
//! continue the spiral backwards through the inflection point at `l = 0`.
use std::f64::consts::PI;

use tracing::{debug, trace};

use crate::error::{GeometryError, Result};
use crate::math::fresnel::fresnel;
use crate::math::{angle_of, direction, Isometry2, Point2, Vector2, TOLERANCE};

use super::{check_range, Curve, CurveDomain};

fn branch_sign(invert_y: bool) -> f64 {
    if invert_y {
        -1.0
    } else {
        1.0
    }
}

/// Position on the canonical spiral at arc length `l`.
///
/// `a` must be positive.
#[must_use]
pub fn clotho(l: f64, invert_y: bool, a: f64) -> Point2 {
    let scale = a * PI.sqrt();
    let (c, s) = fresnel(l / scale);
    Point2::new(scale * c, branch_sign(invert_y) * scale * s)
}

/// Tangent angle of the canonical spiral at arc length `l`.
#[must_use]
pub fn tangent_angle(l: f64, invert_y: bool, a: f64) -> f64 {
    branch_sign(invert_y) * l * l / (2.0 * a * a)
}

/// Unit tangent of the canonical spiral at arc length `l`.
#[must_use]
pub fn d_clotho(l: f64, invert_y: bool, a: f64) -> Vector2 {
    direction(tangent_angle(l, invert_y, a))
}

/// Signed radius of curvature at arc length `l`.
///
/// Positive radii turn left. The inflection point `l = 0` has an infinite
/// radius.
#[must_use]
pub fn clotho_radius(l: f64, invert_y: bool, a: f64) -> f64 {
    if l == 0.0 {
        return f64::INFINITY;
    }
    branch_sign(invert_y) * a * a / l
}

/// Arc length at which the tangent has made one full turn.
///
/// Past this point the spiral winds tightly around its asymptotic point;
/// it bounds sampling and the scale search, not the mathematics.
#[must_use]
pub fn max_l(a: f64) -> f64 {
    2.0 * a * PI.sqrt()
}

/// Finds the nonnegative arc length whose tangent angle is `angle`.
///
/// The spiral heading grows as `l^2`, so the inversion is closed-form:
/// `l = a * sqrt(2 |angle|)`. The tangent at `-l` is the same.
///
/// # Errors
///
/// Returns [`GeometryError::NumericDomain`] if `a` is not positive, the
/// angle is not finite, or the angle has the wrong sign for the branch
/// (the regular branch only reaches `angle >= 0`, the mirrored one only
/// `angle <= 0`).
pub fn find_tangent_angle(invert_y: bool, a: f64, angle: f64) -> Result<f64> {
    if a.is_nan() || a < TOLERANCE {
        return Err(GeometryError::NumericDomain(format!("spiral scale {a} must be positive")).into());
    }
    if !angle.is_finite() {
        return Err(GeometryError::NumericDomain(format!("tangent angle {angle} is not finite")).into());
    }

    let theta = branch_sign(invert_y) * angle;
    if theta < -TOLERANCE {
        let branch = if invert_y { "mirrored" } else { "regular" };
        return Err(GeometryError::NumericDomain(format!(
            "tangent angle {angle} is not reachable on the {branch} branch"
        ))
        .into());
    }

    Ok(a * (2.0 * theta.max(0.0)).sqrt())
}

/// Finds the nonnegative arc length whose tangent is parallel to `target`.
///
/// The direction only matters modulo `pi`: the returned tangent may point
/// against `target`. The smallest such arc length on the branch is
/// returned; `-l` yields the same tangent.
///
/// # Errors
///
/// Returns [`GeometryError::NumericDomain`] if `target` is zero or not
/// finite, or `a` is not positive.
pub fn find_tangent(invert_y: bool, a: f64, target: &Vector2) -> Result<f64> {
    let len = target.norm();
    if !len.is_finite() || len < TOLERANCE {
        return Err(GeometryError::NumericDomain("target direction is degenerate".into()).into());
    }

    let sign = branch_sign(invert_y);
    let wrapped = (sign * angle_of(target)).rem_euclid(PI);
    find_tangent_angle(invert_y, a, sign * wrapped)
}

/// Numerical settings for clothoid reconstruction.
#[derive(Debug, Clone, Copy)]
pub struct ClothoidFitParams {
    /// Largest accepted difference between the endpoint distance and the
    /// chord of the recovered spiral.
    pub chord_tolerance: f64,
    /// Relative width at which the scale bisection stops.
    pub bisection_tolerance: f64,
    /// Number of samples scanned for the first scale reaching the chord.
    pub scan_steps: usize,
    /// Iteration cap for the scale bisection.
    pub max_iterations: usize,
}

impl Default for ClothoidFitParams {
    fn default() -> Self {
        Self {
            chord_tolerance: 1e-5,
            bisection_tolerance: f64::EPSILON,
            scan_steps: 256,
            max_iterations: 200,
        }
    }
}

/// A clothoid arc placed in the plane.
///
/// The arc covers the canonical spiral between arc lengths `l0` and `l1`,
/// mapped into world coordinates by a rigid `placement`. The parameter is
/// the canonical arc length, so the domain is `[l0, l1]`.
#[derive(Debug, Clone)]
pub struct ClothoidArc {
    a: f64,
    invert_y: bool,
    l0: f64,
    l1: f64,
    placement: Isometry2,
}

impl ClothoidArc {
    /// Creates an arc from its canonical description.
    ///
    /// # Errors
    ///
    /// Returns an error if `a` is not positive or `l1 <= l0`.
    pub fn from_parts(
        a: f64,
        invert_y: bool,
        l0: f64,
        l1: f64,
        placement: Isometry2,
    ) -> Result<Self> {
        if !a.is_finite() || a < TOLERANCE {
            return Err(GeometryError::Degenerate(format!("spiral scale {a} must be positive")).into());
        }
        if !l0.is_finite() || !l1.is_finite() || l1 - l0 < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "clothoid arc needs l0 < l1, got [{l0}, {l1}]"
            ))
            .into());
        }

        Ok(Self {
            a,
            invert_y,
            l0,
            l1,
            placement,
        })
    }

    /// Reconstructs the arc starting at arc length `l0` of its spiral.
    ///
    /// `r0`, `r1` are the signed curvature radii at `p0` and `p1` (positive
    /// turns left, infinite is the inflection point). The scale follows
    /// from `l0` and `r0` via `l = sign * a^2 / r`; with `l0 = 0` it is
    /// searched from the chord length instead, as in
    /// [`ClothoidArc::from_boundary`].
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the boundary data cannot
    /// belong to one spiral arc, and [`GeometryError::NumericDomain`] if the
    /// scale search fails.
    pub fn new(l0: f64, p0: Point2, p1: Point2, r0: f64, r1: f64) -> Result<Self> {
        Self::new_with(l0, p0, p1, r0, r1, &ClothoidFitParams::default())
    }

    /// [`ClothoidArc::new`] with explicit numerical settings.
    ///
    /// # Errors
    ///
    /// See [`ClothoidArc::new`].
    pub fn new_with(
        l0: f64,
        p0: Point2,
        p1: Point2,
        r0: f64,
        r1: f64,
        params: &ClothoidFitParams,
    ) -> Result<Self> {
        let k0 = r0.recip();
        let k1 = r1.recip();

        if l0.abs() < TOLERANCE {
            if k0.abs() > TOLERANCE {
                return Err(GeometryError::Degenerate(format!(
                    "arc starting at the inflection point has finite start radius {r0}"
                ))
                .into());
            }
            return Self::from_boundary_with(p0, p1, r0, r1, params);
        }
        if k0.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "infinite start radius requires l0 = 0, got {l0}"
            ))
            .into());
        }

        let a2 = (l0 / k0).abs();
        let sign = (l0 * k0).signum();
        let invert_y = sign < 0.0;
        let a = a2.sqrt();
        let l1 = sign * a2 * k1;
        if l1 - l0 < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "end radius {r1} lies before the start of the arc (l0 = {l0}, l1 = {l1})"
            ))
            .into());
        }

        let placement = place(a, invert_y, l0, l1, &p0, &p1, params.chord_tolerance)?;
        debug!(a, invert_y, l0, l1, "reconstructed clothoid arc from start offset");
        Self::from_parts(a, invert_y, l0, l1, placement)
    }

    /// Reconstructs the arc from boundary points and radii alone.
    ///
    /// The branch follows from the sign of the curvature change, and the
    /// scale `a` is one whose spiral chord between the two radii matches
    /// `|p1 - p0|`. Points and radii alone do not always fix the spiral:
    /// several scales can reproduce the same boundary data, and the
    /// smallest of them is returned.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if both radii are equal or the
    /// points coincide, and [`GeometryError::NumericDomain`] if no scale
    /// reproduces the chord.
    pub fn from_boundary(p0: Point2, p1: Point2, r0: f64, r1: f64) -> Result<Self> {
        Self::from_boundary_with(p0, p1, r0, r1, &ClothoidFitParams::default())
    }

    /// [`ClothoidArc::from_boundary`] with explicit numerical settings.
    ///
    /// # Errors
    ///
    /// See [`ClothoidArc::from_boundary`].
    pub fn from_boundary_with(
        p0: Point2,
        p1: Point2,
        r0: f64,
        r1: f64,
        params: &ClothoidFitParams,
    ) -> Result<Self> {
        let k0 = r0.recip();
        let k1 = r1.recip();
        let dk = k1 - k0;
        if !dk.is_finite() || dk.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "radii {r0} and {r1} describe no curvature change"
            ))
            .into());
        }
        let chord = (p1 - p0).norm();
        if chord < TOLERANCE {
            return Err(GeometryError::Degenerate("clothoid endpoints coincide".into()).into());
        }

        let sign = dk.signum();
        let invert_y = sign < 0.0;
        let a = solve_scale(chord, k0, k1, params)?;
        let a2 = a * a;
        let l0 = sign * a2 * k0;
        let l1 = sign * a2 * k1;

        let placement = place(a, invert_y, l0, l1, &p0, &p1, params.chord_tolerance)?;
        debug!(a, invert_y, l0, l1, "reconstructed clothoid arc from boundary");
        Self::from_parts(a, invert_y, l0, l1, placement)
    }

    /// Spiral scale.
    #[must_use]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Whether the arc lies on the mirrored branch.
    #[must_use]
    pub fn invert_y(&self) -> bool {
        self.invert_y
    }

    /// Start offset on the canonical spiral.
    #[must_use]
    pub fn l0(&self) -> f64 {
        self.l0
    }

    /// End offset on the canonical spiral.
    #[must_use]
    pub fn l1(&self) -> f64 {
        self.l1
    }

    /// Canonical-to-world transform.
    #[must_use]
    pub fn placement(&self) -> &Isometry2 {
        &self.placement
    }

    /// World position of the start.
    #[must_use]
    pub fn point0(&self) -> Point2 {
        self.placement * clotho(self.l0, self.invert_y, self.a)
    }

    /// World position of the end.
    #[must_use]
    pub fn point1(&self) -> Point2 {
        self.placement * clotho(self.l1, self.invert_y, self.a)
    }

    /// Signed curvature radius at parameter `t`.
    #[must_use]
    pub fn radius(&self, t: f64) -> f64 {
        clotho_radius(t, self.invert_y, self.a)
    }

    /// World heading at parameter `t`.
    #[must_use]
    pub fn heading(&self, t: f64) -> f64 {
        self.placement.rotation.angle() + tangent_angle(t, self.invert_y, self.a)
    }

    /// Smallest unsigned curvature radius along the arc, reached at the end
    /// farthest from the inflection point.
    #[must_use]
    pub fn min_radius(&self) -> f64 {
        self.a * self.a / self.l0.abs().max(self.l1.abs())
    }

    /// Total unsigned tangent rotation over the arc.
    ///
    /// An arc crossing the inflection point turns back on itself, so both
    /// halves add up.
    #[must_use]
    pub fn turning(&self) -> f64 {
        let (h0, h1) = (
            tangent_angle(self.l0, false, self.a),
            tangent_angle(self.l1, false, self.a),
        );
        if self.l0 * self.l1 < 0.0 {
            h0 + h1
        } else {
            (h1 - h0).abs()
        }
    }
}

impl Curve for ClothoidArc {
    fn position(&self, t: f64) -> Result<Point2> {
        Ok(self.placement * clotho(t, self.invert_y, self.a))
    }

    fn derivative(&self, t: f64) -> Result<Vector2> {
        Ok(self.placement * d_clotho(t, self.invert_y, self.a))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(self.l0, self.l1)
    }

    fn length(&self, t1: f64, t2: f64) -> Result<f64> {
        let domain = self.domain();
        Ok(domain.check("t2", t2)? - domain.check("t1", t1)?)
    }

    fn t_at_length(&self, length: f64) -> Result<f64> {
        Ok(self.l0 + check_range("length", length, 0.0, self.total_length())?)
    }

    fn total_length(&self) -> f64 {
        self.l1 - self.l0
    }
}

/// Rigid transform taking the canonical points at `l0`, `l1` onto `p0`, `p1`.
fn place(
    a: f64,
    invert_y: bool,
    l0: f64,
    l1: f64,
    p0: &Point2,
    p1: &Point2,
    tolerance: f64,
) -> Result<Isometry2> {
    let c0 = clotho(l0, invert_y, a);
    let c1 = clotho(l1, invert_y, a);
    let canonical = c1 - c0;
    let world = p1 - p0;

    let (canonical_len, world_len) = (canonical.norm(), world.norm());
    if (canonical_len - world_len).abs() > tolerance {
        return Err(GeometryError::Degenerate(format!(
            "endpoint distance {world_len} does not match the spiral chord {canonical_len}"
        ))
        .into());
    }

    let angle = angle_of(&world) - angle_of(&canonical);
    let rotation = Isometry2::new(Vector2::zeros(), angle);
    let translation = p0 - rotation * c0;
    Ok(Isometry2::new(translation, angle))
}

/// Chord length of the spiral arc between curvatures `k0` and `k1` at scale `a`.
fn chord_at_scale(a: f64, k0: f64, k1: f64) -> f64 {
    let sign = (k1 - k0).signum();
    let a2 = a * a;
    let invert_y = sign < 0.0;
    (clotho(sign * a2 * k1, invert_y, a) - clotho(sign * a2 * k0, invert_y, a)).norm()
}

/// Finds the smallest scale whose arc between curvatures `k0` and `k1` has
/// the given chord.
///
/// The arc length `a^2 |k1 - k0|` bounds the chord from above, so no root
/// lies below the scale where both are equal. Above it the chord is not
/// monotonic in `a`: the same points and radii can fit several spirals.
/// The range up to the scale where the arc reaches `max_l` is scanned for
/// the first sample whose chord is long enough, and the step before it is
/// bisected.
fn solve_scale(chord: f64, k0: f64, k1: f64, params: &ClothoidFitParams) -> Result<f64> {
    let no_scale = || {
        GeometryError::NumericDomain(format!(
            "no spiral scale reproduces chord {chord} between curvatures {k0} and {k1}"
        ))
    };

    let dk = (k1 - k0).abs();
    let k_max = k0.abs().max(k1.abs());
    let a_min = (chord / dk).sqrt();
    // a^2 k_max = max_l(a)
    let a_max = 2.0 * PI.sqrt() / k_max;
    if a_min > a_max {
        return Err(no_scale().into());
    }
    if chord_at_scale(a_min, k0, k1) >= chord {
        return Ok(a_min);
    }

    let steps = params.scan_steps.max(1);
    let mut lo = a_min;
    let mut hi = None;
    for i in 1..=steps {
        #[allow(clippy::cast_precision_loss)]
        let a = a_min + (a_max - a_min) * i as f64 / steps as f64;
        if chord_at_scale(a, k0, k1) >= chord {
            hi = Some(a);
            break;
        }
        lo = a;
    }
    let mut hi = hi.ok_or_else(no_scale)?;

    for _ in 0..params.max_iterations {
        if hi - lo <= params.bisection_tolerance * hi {
            break;
        }
        let mid = 0.5 * (lo + hi);
        if chord_at_scale(mid, k0, k1) < chord {
            lo = mid;
        } else {
            hi = mid;
        }
        trace!(lo, hi, "clothoid scale bisection");
    }

    Ok(0.5 * (lo + hi))
}
