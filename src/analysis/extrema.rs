//! Critical and inflection point analysis.
//!
//! Both searches follow the same policy: solve the derivative equation in
//! closed form when the solver can, otherwise fall back to a sign-change scan
//! over the plot window. Classification only ever inspects the value of the
//! next derivative at the root; anything that fails to evaluate is folded
//! into the `Complex`/`Unknown` kinds instead of an error.

use crate::analysis::numeric_roots::find_roots_in_window;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_solve::SolveOutcome;
use num_complex::Complex64;
use strum_macros::Display;

/// Grid size for the numeric fallback search.
pub const FALLBACK_SAMPLES: usize = 2000;
/// Imaginary parts below this count as real.
const REAL_EPS: f64 = 1e-9;
/// Derivative values below this count as zero for classification.
const DERIVATIVE_ZERO_EPS: f64 = 1e-7;

/// Classification of a critical point by the second-derivative test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PointKind {
    #[strum(serialize = "min")]
    Min,
    #[strum(serialize = "max")]
    Max,
    #[strum(serialize = "saddle/inflection")]
    SaddleInflection,
    #[strum(serialize = "complex")]
    Complex,
    #[strum(serialize = "unknown")]
    Unknown,
}

/// A root of f'(x) = 0 together with its classification. The location is
/// complex because quadratic solves can produce non-real pairs.
#[derive(Debug, Clone)]
pub struct CriticalPoint {
    pub location: Complex64,
    pub kind: PointKind,
}

impl CriticalPoint {
    pub fn is_real(&self) -> bool {
        self.location.im.abs() <= REAL_EPS && self.location.re.is_finite()
    }
}

/// Second-derivative test for a single root of f'.
///
/// Non-real roots and NaN evaluations classify `Complex`; other non-finite
/// evaluations classify `Unknown`. This function never fails.
pub fn classify<F>(root: Complex64, second_derivative: &F) -> PointKind
where
    F: Fn(f64) -> f64 + ?Sized,
{
    if root.re.is_nan() || root.im.abs() > REAL_EPS {
        return PointKind::Complex;
    }
    if !root.re.is_finite() {
        return PointKind::Unknown;
    }
    let value = second_derivative(root.re);
    if value.is_nan() {
        return PointKind::Complex;
    }
    if !value.is_finite() {
        return PointKind::Unknown;
    }
    if value > DERIVATIVE_ZERO_EPS {
        PointKind::Min
    } else if value < -DERIVATIVE_ZERO_EPS {
        PointKind::Max
    } else {
        PointKind::SaddleInflection
    }
}

/// All critical points of `expr`, classified.
///
/// The closed-form path returns every root of f'; the fallback path is
/// limited to [lower, upper] by construction.
pub fn critical_points(expr: &Expr, var: &str, lower: f64, upper: f64) -> Vec<CriticalPoint> {
    let first = expr.diff(var).simplify();
    let second = expr.n_th_derivative1D(var, 2);
    let second_fn = second.lambdify1D();

    let roots: Vec<Complex64> = match first.solve_equation(var) {
        SolveOutcome::Roots(roots) => roots,
        SolveOutcome::Unsolvable(reason) => {
            log::info!("critical points of {}: {}, using grid search", expr, reason);
            let first_fn = first.lambdify1D();
            find_roots_in_window(|x| first_fn(x), lower, upper, FALLBACK_SAMPLES)
                .into_iter()
                .map(|x| Complex64::new(x, 0.0))
                .collect()
        }
    };

    roots
        .into_iter()
        .map(|root| CriticalPoint {
            location: root,
            kind: classify(root, second_fn.as_ref()),
        })
        .collect()
}

/// Real, confirmed inflection points of `expr`.
///
/// Candidates are roots of f''. A candidate survives when f''' there is
/// nonzero and finite, or when f'' changes sign across it; higher-order flat
/// points like x = 0 of x^4 are dropped.
pub fn inflection_points(expr: &Expr, var: &str, lower: f64, upper: f64) -> Vec<f64> {
    let second = expr.n_th_derivative1D(var, 2);
    let third = second.diff(var).simplify();
    let second_fn = second.lambdify1D();
    let third_fn = third.lambdify1D();

    let candidates: Vec<f64> = match second.solve_equation(var) {
        SolveOutcome::Roots(roots) => roots
            .into_iter()
            .filter(|r| r.im.abs() <= REAL_EPS && r.re.is_finite())
            .map(|r| r.re)
            .collect(),
        SolveOutcome::Unsolvable(reason) => {
            log::info!("inflection points of {}: {}, using grid search", expr, reason);
            find_roots_in_window(|x| second_fn(x), lower, upper, FALLBACK_SAMPLES)
        }
    };

    let h = ((upper - lower) / FALLBACK_SAMPLES as f64).abs().max(1e-6);
    candidates
        .into_iter()
        .filter(|&x| {
            let third_value = third_fn(x);
            if third_value.is_nan() {
                return false;
            }
            if third_value.is_finite() && third_value.abs() > DERIVATIVE_ZERO_EPS {
                return true;
            }
            let left = second_fn(x - h);
            let right = second_fn(x + h);
            left.is_finite() && right.is_finite() && left * right < 0.0
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parabola_minimum() {
        let f = Expr::parse_expression("x^2");
        let points = critical_points(&f, "x", -5.0, 5.0);
        assert_eq!(points.len(), 1);
        assert_relative_eq!(points[0].location.re, 0.0, epsilon = 1e-10);
        assert_eq!(points[0].kind, PointKind::Min);
    }

    #[test]
    fn test_inverted_parabola_maximum() {
        let f = Expr::parse_expression("-x^2");
        let points = critical_points(&f, "x", -5.0, 5.0);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].kind, PointKind::Max);
    }

    #[test]
    fn test_cubic_saddle() {
        let f = Expr::parse_expression("x^3");
        let points = critical_points(&f, "x", -5.0, 5.0);
        assert_eq!(points.len(), 1);
        assert_relative_eq!(points[0].location.re, 0.0, epsilon = 1e-10);
        assert_eq!(points[0].kind, PointKind::SaddleInflection);
    }

    #[test]
    fn test_cubic_with_two_extrema() {
        let f = Expr::parse_expression("x^3 - 3*x");
        let points = critical_points(&f, "x", -5.0, 5.0);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].kind, PointKind::Max); // x = -1
        assert_eq!(points[1].kind, PointKind::Min); // x = +1
    }

    #[test]
    fn test_fallback_finds_trig_extrema() {
        // f' = cos(x) is unsolvable in closed form here, so the grid takes over
        let f = Expr::parse_expression("sin(x)");
        let points = critical_points(&f, "x", -5.0, 5.0);
        let xs: Vec<f64> = points.iter().map(|p| p.location.re).collect();
        assert_eq!(points.len(), 4);
        let half_pi = std::f64::consts::FRAC_PI_2;
        for (x, expected) in xs.iter().zip([-3.0 * half_pi, -half_pi, half_pi, 3.0 * half_pi]) {
            assert_relative_eq!(*x, expected, epsilon = 1e-6);
        }
        let kinds: Vec<PointKind> = points.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![PointKind::Max, PointKind::Min, PointKind::Max, PointKind::Min]
        );
    }

    #[test]
    fn test_classify_imaginary_root_is_complex() {
        let kind = classify(Complex64::new(0.0, 1.0), &|_: f64| 2.0);
        assert_eq!(kind, PointKind::Complex);
    }

    #[test]
    fn test_classify_nan_evaluation_is_complex() {
        let kind = classify(Complex64::new(-1.0, 0.0), &|x: f64| x.sqrt());
        assert_eq!(kind, PointKind::Complex);
    }

    #[test]
    fn test_classify_unbounded_evaluation_is_unknown() {
        let kind = classify(Complex64::new(0.0, 0.0), &|_: f64| f64::INFINITY);
        assert_eq!(kind, PointKind::Unknown);
    }

    #[test]
    fn test_point_kind_labels() {
        assert_eq!(PointKind::Min.to_string(), "min");
        assert_eq!(PointKind::Max.to_string(), "max");
        assert_eq!(PointKind::SaddleInflection.to_string(), "saddle/inflection");
        assert_eq!(PointKind::Complex.to_string(), "complex");
        assert_eq!(PointKind::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_cubic_inflection_at_origin() {
        let f = Expr::parse_expression("x^3");
        let points = inflection_points(&f, "x", -5.0, 5.0);
        assert_eq!(points.len(), 1);
        assert_relative_eq!(points[0], 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_quartic_flat_point_is_not_an_inflection() {
        // f'' = 12x^2 touches zero at 0 without changing sign
        let f = Expr::parse_expression("x^4");
        assert!(inflection_points(&f, "x", -5.0, 5.0).is_empty());
    }

    #[test]
    fn test_quintic_inflection_survives_zero_third_derivative() {
        // f''' vanishes at 0 but f'' = 20x^3 still changes sign
        let f = Expr::parse_expression("x^5");
        let points = inflection_points(&f, "x", -5.0, 5.0);
        assert_eq!(points.len(), 1);
        assert_relative_eq!(points[0], 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_sine_inflections_via_fallback() {
        let f = Expr::parse_expression("sin(x)");
        let points = inflection_points(&f, "x", -4.0, 4.0);
        assert_eq!(points.len(), 3);
        assert_relative_eq!(points[0], -std::f64::consts::PI, epsilon = 1e-6);
        assert_relative_eq!(points[1], 0.0, epsilon = 1e-6);
        assert_relative_eq!(points[2], std::f64::consts::PI, epsilon = 1e-6);
    }

    #[test]
    fn test_quadratic_critical_point_with_complex_pair() {
        // f' of x^4/4 + x is x^3 + 1, a monomial shift: roots -1 and a complex pair
        let f = Expr::parse_expression("x^4/4 + x");
        let points = critical_points(&f, "x", -5.0, 5.0);
        let real: Vec<&CriticalPoint> = points.iter().filter(|p| p.is_real()).collect();
        let complex: Vec<&CriticalPoint> = points.iter().filter(|p| !p.is_real()).collect();
        assert_eq!(real.len(), 1);
        assert_relative_eq!(real[0].location.re, -1.0, epsilon = 1e-9);
        assert_eq!(real[0].kind, PointKind::Min);
        assert_eq!(complex.len(), 2);
        assert!(complex.iter().all(|p| p.kind == PointKind::Complex));
    }
}
