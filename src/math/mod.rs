pub mod arc_2d;
pub mod fresnel;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Rigid 2D transform (rotation followed by translation).
pub type Isometry2 = nalgebra::Isometry2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns `true` if the two points are closer than [`TOLERANCE`].
#[must_use]
pub fn points_eq(a: &Point2, b: &Point2) -> bool {
    points_eq_with(a, b, TOLERANCE)
}

/// Returns `true` if the two points are closer than `tolerance`.
#[must_use]
pub fn points_eq_with(a: &Point2, b: &Point2, tolerance: f64) -> bool {
    (a - b).norm() <= tolerance
}

/// Z component of the 3D cross product of two planar vectors.
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Polar angle of `v` in `(-pi, pi]`.
#[must_use]
pub fn angle_of(v: &Vector2) -> f64 {
    v.y.atan2(v.x)
}

/// Unit vector pointing at `angle` radians.
#[must_use]
pub fn direction(angle: f64) -> Vector2 {
    Vector2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn points_eq_respects_tolerance() {
        let a = Point2::new(1.0, 1.0);
        let b = Point2::new(1.0, 1.0 + 1e-12);
        let c = Point2::new(1.0, 1.001);
        assert!(points_eq(&a, &b));
        assert!(!points_eq(&a, &c));
        assert!(points_eq_with(&a, &c, 0.01));
    }

    #[test]
    fn cross_sign_follows_orientation() {
        let x = Vector2::x();
        let y = Vector2::y();
        assert!((cross(&x, &y) - 1.0).abs() < TOLERANCE);
        assert!((cross(&y, &x) + 1.0).abs() < TOLERANCE);
        assert!(cross(&x, &(x * 3.0)).abs() < TOLERANCE);
    }

    #[test]
    fn direction_and_angle_agree() {
        let v = direction(FRAC_PI_2);
        assert!(v.x.abs() < TOLERANCE);
        assert!((v.y - 1.0).abs() < TOLERANCE);
        assert!((angle_of(&v) - FRAC_PI_2).abs() < TOLERANCE);
    }
}
