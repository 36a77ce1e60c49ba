//! Normalized Fresnel integrals.
//!
//! ```text
//! C(x) = integral_0^x cos(pi t^2 / 2) dt
//! S(x) = integral_0^x sin(pi t^2 / 2) dt
//! ```
//!
//! Small arguments use the power series; larger ones use the continued
//! fraction of the complementary error function, evaluated with the
//! modified Lentz method:
//!
//! ```text
//! C(x) + i S(x) = (1 + i)/2 * (1 - erfc(sqrt(pi)/2 * (1 - i) * x))
//! ```
use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::Complex;

/// Below this magnitude the power series converges without cancellation.
const SERIES_LIMIT: f64 = 1.5;

const MAX_ITERATIONS: usize = 100;

/// Relative accuracy goal for both expansions.
const EPS: f64 = 6.0e-16;

/// Stand-in for zero in the Lentz recurrence.
const FPMIN: f64 = 1.0e-300;

/// Evaluates the normalized Fresnel integrals, returning `(C(x), S(x))`.
///
/// Both integrals are odd in `x`.
#[must_use]
pub fn fresnel(x: f64) -> (f64, f64) {
    let ax = x.abs();
    let (c, s) = if ax <= SERIES_LIMIT {
        fresnel_series(ax)
    } else {
        fresnel_continued_fraction(ax)
    };

    if x < 0.0 {
        (-c, -s)
    } else {
        (c, s)
    }
}

/// Power series for `x >= 0`.
///
/// Term `k` is `x * (pi x^2 / 2)^k / (k! (2k + 1))`; even terms feed `C`,
/// odd terms feed `S`, and the sign flips every second term of each.
fn fresnel_series(x: f64) -> (f64, f64) {
    let fact = FRAC_PI_2 * x * x;
    let mut term = x;
    let mut c = x;
    let mut s = 0.0;

    for k in 1..MAX_ITERATIONS {
        #[allow(clippy::cast_precision_loss)]
        let kf = k as f64;
        term *= fact / kf;
        let contribution = term / (2.0 * kf + 1.0);
        let sign = if (k / 2) % 2 == 0 { 1.0 } else { -1.0 };
        if k % 2 == 0 {
            c += sign * contribution;
        } else {
            s += sign * contribution;
        }
        if contribution <= EPS * (c.abs() + s.abs()) {
            break;
        }
    }

    (c, s)
}

/// Continued fraction for `x > 0`, accurate once `x` is away from zero.
fn fresnel_continued_fraction(x: f64) -> (f64, f64) {
    let pix2 = PI * x * x;
    let one = Complex::new(1.0, 0.0);

    // 1 / (b0 + a1 / (b1 + a2 / (b2 + ...))) with b_k = 1 + 4k - i pi x^2
    // and a_k = -(2k - 1)(2k).
    let mut b = Complex::new(1.0, -pix2);
    let mut cc = Complex::new(1.0 / FPMIN, 0.0);
    let mut d = one / b;
    let mut h = d;
    let mut n = -1.0;

    for _ in 0..MAX_ITERATIONS {
        n += 2.0;
        let a = -n * (n + 1.0);
        b += Complex::new(4.0, 0.0);
        d = one / (d * a + b);
        cc = b + Complex::new(a, 0.0) / cc;
        let del = cc * d;
        h *= del;
        if (del.re - 1.0).abs() + del.im.abs() < EPS {
            break;
        }
    }

    h *= Complex::new(x, -x);
    let phase = Complex::new((0.5 * pix2).cos(), (0.5 * pix2).sin());
    let cs = Complex::new(0.5, 0.5) * (one - phase * h);

    (cs.re, cs.im)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zero() {
        let (c, s) = fresnel(0.0);
        assert_abs_diff_eq!(c, 0.0);
        assert_abs_diff_eq!(s, 0.0);
    }

    #[test]
    fn tabulated_values() {
        let (c, s) = fresnel(1.0);
        assert_abs_diff_eq!(c, 0.779_893_400_4, epsilon = 1e-9);
        assert_abs_diff_eq!(s, 0.438_259_147_4, epsilon = 1e-9);

        let (c, s) = fresnel(2.0);
        assert_abs_diff_eq!(c, 0.488_253_406_1, epsilon = 1e-9);
        assert_abs_diff_eq!(s, 0.343_415_678_4, epsilon = 1e-9);
    }

    #[test]
    fn odd_symmetry() {
        let (c, s) = fresnel(0.8);
        let (cn, sn) = fresnel(-0.8);
        assert_abs_diff_eq!(c, -cn);
        assert_abs_diff_eq!(s, -sn);
    }

    #[test]
    fn expansions_agree_at_the_switch_point() {
        let (c1, s1) = fresnel_series(SERIES_LIMIT);
        let (c2, s2) = fresnel_continued_fraction(SERIES_LIMIT);
        assert_abs_diff_eq!(c1, c2, epsilon = 1e-12);
        assert_abs_diff_eq!(s1, s2, epsilon = 1e-12);
    }

    #[test]
    fn derivative_matches_integrand() {
        let h = 1e-5;
        for &x in &[0.4, 1.2, 2.5, 4.0] {
            let (cp, sp) = fresnel(x + h);
            let (cm, sm) = fresnel(x - h);
            let arg = FRAC_PI_2 * x * x;
            assert_abs_diff_eq!((cp - cm) / (2.0 * h), arg.cos(), epsilon = 1e-6);
            assert_abs_diff_eq!((sp - sm) / (2.0 * h), arg.sin(), epsilon = 1e-6);
        }
    }

    #[test]
    fn tends_to_one_half() {
        let (c, s) = fresnel(200.0);
        assert_abs_diff_eq!(c, 0.5, epsilon = 1e-2);
        assert_abs_diff_eq!(s, 0.5, epsilon = 1e-2);
    }
}
