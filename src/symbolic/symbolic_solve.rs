//! Closed-form root finding for the equation classes that admit one.
//!
//! `solve_equation` extracts polynomial coefficients and solves linear,
//! quadratic and pure-monomial equations exactly, complex roots included.
//! Everything else (trig equations, mixed transcendentals, high-degree
//! polynomials) is reported as [`SolveOutcome::Unsolvable`] so the caller can
//! fall back to a sampling grid. An unsolvable equation is an expected
//! outcome, not an error.

use crate::symbolic::symbolic_engine::Expr;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Coefficients below this are treated as zero when trimming the polynomial.
const COEFF_EPS: f64 = 1e-12;
/// Roots closer than this collapse into one, e.g. the double root of (x+1)^2.
const ROOT_DEDUP_EPS: f64 = 1e-9;

/// Result of a closed-form solve attempt.
///
/// `Roots` may be empty (a nonzero constant has no roots) and may contain
/// non-real entries (x^2 + 1 = 0). `Unsolvable` carries the reason and tells
/// the caller to switch to numerical root finding.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    Roots(Vec<Complex64>),
    Unsolvable(String),
}

impl Expr {
    /// Coefficients of the expression as a polynomial in `var`, ascending by
    /// degree, or `None` when the expression is not polynomial in `var`.
    ///
    /// Subtrees free of `var` fold to a numeric constant, so sin(2)*x^2 is
    /// still a polynomial in x. A var-free subtree that fails to evaluate
    /// (e.g. it holds some other variable) disqualifies the whole expression.
    pub fn polynomial_coefficients(&self, var: &str) -> Option<Vec<f64>> {
        if !self.contains_variable(var) {
            let value = self.eval_expression(vec![], &[]);
            return value.is_finite().then(|| vec![value]);
        }
        match self {
            Expr::Var(name) if name == var => Some(vec![0.0, 1.0]),
            Expr::Add(lhs, rhs) => {
                let a = lhs.polynomial_coefficients(var)?;
                let b = rhs.polynomial_coefficients(var)?;
                Some(add_coefficients(&a, &b, 1.0))
            }
            Expr::Sub(lhs, rhs) => {
                let a = lhs.polynomial_coefficients(var)?;
                let b = rhs.polynomial_coefficients(var)?;
                Some(add_coefficients(&a, &b, -1.0))
            }
            Expr::Mul(lhs, rhs) => {
                let a = lhs.polynomial_coefficients(var)?;
                let b = rhs.polynomial_coefficients(var)?;
                Some(multiply_coefficients(&a, &b))
            }
            Expr::Div(lhs, rhs) => {
                if rhs.contains_variable(var) {
                    return None;
                }
                let denom = rhs.eval_expression(vec![], &[]);
                if !denom.is_finite() || denom == 0.0 {
                    return None;
                }
                let a = lhs.polynomial_coefficients(var)?;
                Some(a.iter().map(|c| c / denom).collect())
            }
            Expr::Pow(base, exp) => {
                let n = match exp.as_ref() {
                    Expr::Const(n) if *n >= 0.0 && n.fract() == 0.0 && *n <= 64.0 => *n as usize,
                    _ => return None,
                };
                let base_coeffs = base.polynomial_coefficients(var)?;
                let mut result = vec![1.0];
                for _ in 0..n {
                    result = multiply_coefficients(&result, &base_coeffs);
                }
                Some(result)
            }
            _ => None,
        }
    }

    /// Solves `self = 0` for `var` in closed form where possible.
    ///
    /// Handled classes after coefficient extraction: constants, linear,
    /// quadratic (complex pair for negative discriminant) and monomials
    /// c0 + cn*x^n. Roots come back sorted by real then imaginary part,
    /// with coincident roots merged.
    pub fn solve_equation(&self, var: &str) -> SolveOutcome {
        let Some(mut coeffs) = self.polynomial_coefficients(var) else {
            return SolveOutcome::Unsolvable(format!(
                "no closed form for roots of {} in {}",
                self, var
            ));
        };

        while coeffs.len() > 1 && coeffs.last().is_some_and(|c| c.abs() < COEFF_EPS) {
            coeffs.pop();
        }
        let degree = coeffs.len() - 1;

        let roots = match degree {
            0 => {
                if coeffs[0].abs() < COEFF_EPS {
                    // 0 = 0 holds everywhere, nothing to enumerate
                    return SolveOutcome::Unsolvable(
                        "equation is identically zero".to_string(),
                    );
                }
                Vec::new()
            }
            1 => vec![Complex64::new(-coeffs[0] / coeffs[1], 0.0)],
            2 => solve_quadratic(coeffs[0], coeffs[1], coeffs[2]),
            _ => {
                let is_monomial = coeffs[1..degree].iter().all(|c| c.abs() < COEFF_EPS);
                if !is_monomial {
                    return SolveOutcome::Unsolvable(format!(
                        "degree {} polynomial has no closed-form handler",
                        degree
                    ));
                }
                solve_monomial(coeffs[0], coeffs[degree], degree)
            }
        };

        SolveOutcome::Roots(sort_and_merge(roots))
    }
}

fn add_coefficients(a: &[f64], b: &[f64], sign: f64) -> Vec<f64> {
    let mut out = vec![0.0; a.len().max(b.len())];
    for (i, c) in a.iter().enumerate() {
        out[i] += c;
    }
    for (i, c) in b.iter().enumerate() {
        out[i] += sign * c;
    }
    out
}

fn multiply_coefficients(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            out[i + j] += ca * cb;
        }
    }
    out
}

fn solve_quadratic(c: f64, b: f64, a: f64) -> Vec<Complex64> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant >= 0.0 {
        let sqrt_d = discriminant.sqrt();
        vec![
            Complex64::new((-b - sqrt_d) / (2.0 * a), 0.0),
            Complex64::new((-b + sqrt_d) / (2.0 * a), 0.0),
        ]
    } else {
        let sqrt_d = (-discriminant).sqrt();
        vec![
            Complex64::new(-b / (2.0 * a), -sqrt_d / (2.0 * a)),
            Complex64::new(-b / (2.0 * a), sqrt_d / (2.0 * a)),
        ]
    }
}

/// All n complex roots of cn*x^n + c0 = 0 by De Moivre.
fn solve_monomial(c0: f64, cn: f64, n: usize) -> Vec<Complex64> {
    if c0.abs() < COEFF_EPS {
        return vec![Complex64::new(0.0, 0.0)];
    }
    let ratio = -c0 / cn;
    let magnitude = ratio.abs().powf(1.0 / n as f64);
    let base_angle = if ratio >= 0.0 { 0.0 } else { PI };
    (0..n)
        .map(|k| {
            Complex64::from_polar(magnitude, (base_angle + 2.0 * PI * k as f64) / n as f64)
        })
        .collect()
}

fn sort_and_merge(mut roots: Vec<Complex64>) -> Vec<Complex64> {
    roots.sort_by(|a, b| a.re.total_cmp(&b.re).then(a.im.total_cmp(&b.im)));
    roots.dedup_by(|a, b| (*a - *b).norm() < ROOT_DEDUP_EPS);
    roots
}
