//! Grid-based root localization for equations the symbolic solver declines.
//!
//! The window is scanned on a uniform grid; every sign change between
//! neighbouring samples brackets a root, which bisection then refines.
//! Tangent roots without a sign change are invisible to this scheme, which is
//! acceptable because it only ever runs on derivatives.

use crate::symbolic::utils::linspace;
use itertools::Itertools;

const BISECTION_MAX_ITER: usize = 200;
/// A pole (1/x) shows the same sign change as a root; the value diverging
/// past the bracket values by this factor is the tell.
const POLE_REJECT_FACTOR: f64 = 1e3;

/// Bisection refinement on a bracketing interval.
///
/// Returns `None` when [a, b] does not bracket a root, when the function goes
/// non-finite inside the interval, or when the sign change turns out to be a
/// pole rather than a zero crossing.
pub fn bisection<F>(f: &F, mut a: f64, mut b: f64) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    let mut fa = f(a);
    let fb = f(b);
    if !fa.is_finite() || !fb.is_finite() || fa * fb > 0.0 {
        return None;
    }
    if fa == 0.0 {
        return Some(a);
    }
    if fb == 0.0 {
        return Some(b);
    }

    let bracket_scale = fa.abs().max(fb.abs());
    let accept = |mid: f64, fm: f64| {
        (fm.abs() <= POLE_REJECT_FACTOR * bracket_scale).then_some(mid)
    };

    for _ in 0..BISECTION_MAX_ITER {
        let mid = 0.5 * (a + b);
        let fm = f(mid);
        if !fm.is_finite() {
            return None;
        }
        if fm == 0.0 {
            return Some(mid);
        }
        if (b - a).abs() < f64::EPSILON * (1.0 + a.abs() + b.abs()) {
            return accept(mid, fm);
        }
        if fa * fm < 0.0 {
            b = mid;
        } else {
            a = mid;
            fa = fm;
        }
    }
    let mid = 0.5 * (a + b);
    accept(mid, f(mid))
}

/// All sign-change roots of `f` on [lower, upper], found on a grid of
/// `samples` points and refined by bisection. Sorted, with near-duplicates
/// merged. Grid cells where `f` is non-finite are skipped.
pub fn find_roots_in_window<F>(f: F, lower: f64, upper: f64, samples: usize) -> Vec<f64>
where
    F: Fn(f64) -> f64,
{
    let grid = linspace(lower, upper, samples.max(2));
    let mut roots = Vec::new();

    for (&a, &b) in grid.iter().tuple_windows() {
        let fa = f(a);
        let fb = f(b);
        if !fa.is_finite() || !fb.is_finite() {
            continue;
        }
        if fa == 0.0 {
            roots.push(a);
            continue;
        }
        if fa * fb < 0.0 {
            if let Some(root) = bisection(&f, a, b) {
                roots.push(root);
            }
        }
    }
    if f(upper) == 0.0 {
        roots.push(upper);
    }

    roots.sort_by(f64::total_cmp);
    let merge_eps = (upper - lower).abs() * 1e-9;
    roots.dedup_by(|a, b| (*a - *b).abs() <= merge_eps);
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_bisection_converges_on_cosine() {
        let root = bisection(&|x: f64| x.cos(), 1.0, 2.0).unwrap();
        assert_relative_eq!(root, PI / 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_bisection_rejects_non_bracketing_interval() {
        assert!(bisection(&|x: f64| x * x + 1.0, -1.0, 1.0).is_none());
    }

    #[test]
    fn test_finds_all_sine_roots_in_window() {
        let roots = find_roots_in_window(|x: f64| x.sin(), -7.0, 7.0, 2000);
        assert_eq!(roots.len(), 5);
        for (root, expected) in roots.iter().zip([-2.0 * PI, -PI, 0.0, PI, 2.0 * PI]) {
            assert_relative_eq!(*root, expected, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_cubic_roots() {
        let roots = find_roots_in_window(|x: f64| x * x * x - x, -5.0, 5.0, 2000);
        assert_eq!(roots.len(), 3);
        assert_relative_eq!(roots[0], -1.0, epsilon = 1e-8);
        assert_relative_eq!(roots[1], 0.0, epsilon = 1e-8);
        assert_relative_eq!(roots[2], 1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_skips_non_finite_region() {
        // ln(x) is NaN left of zero; the root at x = 1 must still be found
        let roots = find_roots_in_window(|x: f64| x.ln(), -1.0, 2.0, 2000);
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0], 1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_exact_zero_on_grid_endpoint() {
        let roots = find_roots_in_window(|x: f64| x, 0.0, 5.0, 100);
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pole_sign_change_is_not_a_root() {
        let roots = find_roots_in_window(|x: f64| 1.0 / x, -1.0, 1.0, 2000);
        assert!(roots.is_empty());
    }

    #[test]
    fn test_steep_root_survives_pole_rejection() {
        let roots = find_roots_in_window(|x: f64| 1e9 * (x - 0.3), 0.0, 1.0, 2000);
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0], 0.3, epsilon = 1e-8);
    }
}
