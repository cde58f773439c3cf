//! Symbolic antiderivatives for the expression classes the report can handle,
//! plus numerical quadrature for everything else.
//!
//! The rule set covers polynomials, exponentials, (co)tangents and the inverse
//! trig functions, with linear inner arguments (a*x + b) handled throughout.
//! Anything outside that, e.g. sin(x^2), returns an error string which the
//! caller renders as "no closed form found" instead of aborting.

use crate::symbolic::symbolic_engine::Expr;
use gauss_quad::GaussLegendre;

impl Expr {
    /// Indefinite integral with respect to `var`, without the constant.
    pub fn integrate(&self, var: &str) -> Result<Expr, String> {
        match self {
            // ∫ c dx = c*x
            Expr::Const(c) => Ok(Expr::Const(*c) * Expr::Var(var.to_string())),

            // ∫ x dx = x^2/2, ∫ y dx = y*x for y ≠ x
            Expr::Var(name) => {
                if name == var {
                    Ok(Expr::Pow(
                        Box::new(Expr::Var(var.to_string())),
                        Box::new(Expr::Const(2.0)),
                    ) / Expr::Const(2.0))
                } else {
                    Ok(Expr::Var(name.clone()) * Expr::Var(var.to_string()))
                }
            }

            Expr::Add(lhs, rhs) => {
                let lhs_int = lhs.integrate(var)?;
                let rhs_int = rhs.integrate(var)?;
                Ok(lhs_int + rhs_int)
            }

            Expr::Sub(lhs, rhs) => {
                let lhs_int = lhs.integrate(var)?;
                let rhs_int = rhs.integrate(var)?;
                Ok(lhs_int - rhs_int)
            }

            Expr::Mul(lhs, rhs) => self.integrate_multiplication(lhs, rhs, var),
            Expr::Div(lhs, rhs) => self.integrate_division(lhs, rhs, var),
            Expr::Pow(base, exp) => self.integrate_power(base, exp, var),

            Expr::Exp(inner) => {
                if !inner.contains_variable(var) {
                    return Ok(self.clone() * Expr::Var(var.to_string()));
                }
                // ∫ e^(ax+b) dx = e^(ax+b)/a
                match linear_in(inner, var) {
                    Some(a) => Ok(Expr::Exp(inner.clone()) / Expr::Const(a)),
                    None => Err(format!("cannot integrate exp({})", inner)),
                }
            }

            Expr::Ln(inner) => {
                if !inner.contains_variable(var) {
                    return Ok(self.clone() * Expr::Var(var.to_string()));
                }
                // ∫ ln(x) dx = x*ln(x) - x, by parts
                if let Expr::Var(x) = inner.as_ref() {
                    if x == var {
                        let x_var = Expr::Var(var.to_string());
                        return Ok(x_var.clone() * Expr::Ln(Box::new(x_var.clone())) - x_var);
                    }
                }
                Err(format!("cannot integrate ln({})", inner))
            }

            Expr::sin(inner) => {
                if !inner.contains_variable(var) {
                    return Ok(self.clone() * Expr::Var(var.to_string()));
                }
                // ∫ sin(ax+b) dx = -cos(ax+b)/a
                match linear_in(inner, var) {
                    Some(a) => {
                        Ok(Expr::Const(-1.0) * Expr::cos(inner.clone()) / Expr::Const(a))
                    }
                    None => Err(format!("cannot integrate sin({})", inner)),
                }
            }

            Expr::cos(inner) => {
                if !inner.contains_variable(var) {
                    return Ok(self.clone() * Expr::Var(var.to_string()));
                }
                // ∫ cos(ax+b) dx = sin(ax+b)/a
                match linear_in(inner, var) {
                    Some(a) => Ok(Expr::sin(inner.clone()) / Expr::Const(a)),
                    None => Err(format!("cannot integrate cos({})", inner)),
                }
            }

            Expr::tg(inner) => {
                if !inner.contains_variable(var) {
                    return Ok(self.clone() * Expr::Var(var.to_string()));
                }
                // ∫ tg(ax+b) dx = -ln(cos(ax+b))/a
                match linear_in(inner, var) {
                    Some(a) => Ok(Expr::Const(-1.0)
                        * Expr::Ln(Box::new(Expr::cos(inner.clone())))
                        / Expr::Const(a)),
                    None => Err(format!("cannot integrate tg({})", inner)),
                }
            }

            Expr::ctg(inner) => {
                if !inner.contains_variable(var) {
                    return Ok(self.clone() * Expr::Var(var.to_string()));
                }
                // ∫ ctg(ax+b) dx = ln(sin(ax+b))/a
                match linear_in(inner, var) {
                    Some(a) => {
                        Ok(Expr::Ln(Box::new(Expr::sin(inner.clone()))) / Expr::Const(a))
                    }
                    None => Err(format!("cannot integrate ctg({})", inner)),
                }
            }

            Expr::arcsin(inner) => {
                self.integrate_inverse_trig(inner, var, |x_var| {
                    // ∫ arcsin(x) dx = x*arcsin(x) + sqrt(1 - x^2)
                    x_var.clone() * Expr::arcsin(x_var.clone().boxed())
                        + (Expr::Const(1.0) - x_var.clone() * x_var.clone()).sqrt()
                })
            }
            Expr::arccos(inner) => {
                self.integrate_inverse_trig(inner, var, |x_var| {
                    // ∫ arccos(x) dx = x*arccos(x) - sqrt(1 - x^2)
                    x_var.clone() * Expr::arccos(x_var.clone().boxed())
                        - (Expr::Const(1.0) - x_var.clone() * x_var.clone()).sqrt()
                })
            }
            Expr::arctg(inner) => {
                self.integrate_inverse_trig(inner, var, |x_var| {
                    // ∫ arctg(x) dx = x*arctg(x) - ln(1 + x^2)/2
                    x_var.clone() * Expr::arctg(x_var.clone().boxed())
                        - Expr::Ln(Box::new(
                            Expr::Const(1.0) + x_var.clone() * x_var.clone(),
                        )) / Expr::Const(2.0)
                })
            }
            Expr::arcctg(inner) => {
                self.integrate_inverse_trig(inner, var, |x_var| {
                    // ∫ arcctg(x) dx = x*arcctg(x) + ln(1 + x^2)/2
                    x_var.clone() * Expr::arcctg(x_var.clone().boxed())
                        + Expr::Ln(Box::new(
                            Expr::Const(1.0) + x_var.clone() * x_var.clone(),
                        )) / Expr::Const(2.0)
                })
            }
        }
    }

    fn integrate_inverse_trig(
        &self,
        inner: &Expr,
        var: &str,
        formula: impl Fn(&Expr) -> Expr,
    ) -> Result<Expr, String> {
        if !inner.contains_variable(var) {
            return Ok(self.clone() * Expr::Var(var.to_string()));
        }
        if let Expr::Var(x) = inner {
            if x == var {
                let x_var = Expr::Var(var.to_string());
                return Ok(formula(&x_var));
            }
        }
        Err(format!("cannot integrate {}", self))
    }

    fn integrate_multiplication(&self, lhs: &Expr, rhs: &Expr, var: &str) -> Result<Expr, String> {
        // constant factors come straight out
        if !lhs.contains_variable(var) {
            let rhs_int = rhs.integrate(var)?;
            return Ok(lhs.clone() * rhs_int);
        }
        if !rhs.contains_variable(var) {
            let lhs_int = lhs.integrate(var)?;
            return Ok(rhs.clone() * lhs_int);
        }

        // integration by parts for the two shapes that terminate
        if let Some(result) = power_times_exponential(lhs, rhs, var) {
            return Ok(result);
        }
        if let Some(result) = power_times_exponential(rhs, lhs, var) {
            return Ok(result);
        }
        if let Some(result) = power_times_logarithm(lhs, rhs, var) {
            return Ok(result);
        }
        if let Some(result) = power_times_logarithm(rhs, lhs, var) {
            return Ok(result);
        }

        Err(format!("cannot integrate product: {} * {}", lhs, rhs))
    }

    fn integrate_division(&self, lhs: &Expr, rhs: &Expr, var: &str) -> Result<Expr, String> {
        // ∫ f(x)/c dx = (1/c) ∫ f(x) dx
        if !rhs.contains_variable(var) {
            let lhs_int = lhs.integrate(var)?;
            return Ok(lhs_int / rhs.clone());
        }

        // ∫ f'(x)/f(x) dx = ln(f(x))
        if rhs.diff(var).simplify() == lhs.simplify() {
            return Ok(Expr::Ln(Box::new(rhs.clone())));
        }

        // ∫ c/(ax+b) dx = (c/a) ln(ax+b)
        if !lhs.contains_variable(var) {
            if let Some(a) = linear_in(rhs, var) {
                return Ok(lhs.clone() * Expr::Ln(Box::new(rhs.clone())) / Expr::Const(a));
            }
        }

        Err(format!("cannot integrate quotient: {} / {}", lhs, rhs))
    }

    fn integrate_power(&self, base: &Expr, exp: &Expr, var: &str) -> Result<Expr, String> {
        if !base.contains_variable(var) && !exp.contains_variable(var) {
            return Ok(self.clone() * Expr::Var(var.to_string()));
        }

        // ∫ u^n dx = u^(n+1)/(a*(n+1)) for linear u, and ∫ u^(-1) dx = ln(u)/a
        if let Expr::Const(n) = exp {
            if let Some(a) = linear_in(base, var) {
                if (*n - (-1.0)).abs() < f64::EPSILON {
                    return Ok(Expr::Ln(Box::new(base.clone())) / Expr::Const(a));
                }
                let new_exp = Expr::Const(n + 1.0);
                return Ok(Expr::Pow(Box::new(base.clone()), Box::new(new_exp))
                    / Expr::Const(a * (n + 1.0)));
            }
        }

        // ∫ c^x dx = c^x / ln(c)
        if let (Expr::Const(c), Expr::Var(x)) = (base, exp) {
            if x == var && *c > 0.0 && (*c - 1.0).abs() > f64::EPSILON {
                return Ok(Expr::Pow(
                    Box::new(Expr::Const(*c)),
                    Box::new(Expr::Var(var.to_string())),
                ) / Expr::Ln(Box::new(Expr::Const(*c))));
            }
        }

        Err(format!("cannot integrate power: ({})^({})", base, exp))
    }

    /// Definite integral via the symbolic antiderivative.
    ///
    /// Fails when no closed form is known; use [`Expr::quad`] in that case.
    pub fn definite_integrate(&self, var: &str, lower: f64, upper: f64) -> Result<f64, String> {
        let antiderivative = self.integrate(var)?;
        let at_upper = antiderivative.eval_expression(vec![var], &[upper]);
        let at_lower = antiderivative.eval_expression(vec![var], &[lower]);
        let value = at_upper - at_lower;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(format!(
                "antiderivative of {} is singular on [{}, {}]",
                self, lower, upper
            ))
        }
    }

    /// Gauss-Legendre quadrature over [lower, upper].
    pub fn quad(&self, lower: f64, upper: f64, degree: usize) -> Result<f64, String> {
        let f = self.lambdify1D();
        let rule = GaussLegendre::new(degree)
            .map_err(|e| format!("Gauss-Legendre init failed: {}", e))?;
        Ok(rule.integrate(lower, upper, |x| f(x)))
    }
}

/// Slope of `expr` when it is linear in `var` (a*x + b with a ≠ 0).
fn linear_in(expr: &Expr, var: &str) -> Option<f64> {
    match expr {
        Expr::Var(name) if name == var => Some(1.0),
        Expr::Mul(lhs, rhs) => match (lhs.as_ref(), rhs.as_ref()) {
            (Expr::Const(a), inner) | (inner, Expr::Const(a)) => {
                linear_in(inner, var).map(|slope| a * slope)
            }
            _ => None,
        },
        Expr::Add(lhs, rhs) | Expr::Sub(lhs, rhs) => {
            let sign = if matches!(expr, Expr::Sub(_, _)) { -1.0 } else { 1.0 };
            if !rhs.contains_variable(var) {
                linear_in(lhs, var)
            } else if !lhs.contains_variable(var) {
                linear_in(rhs, var).map(|slope| sign * slope)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// x^n * e^(ax+b) by repeated integration by parts, descending in n.
fn power_times_exponential(poly: &Expr, exp_part: &Expr, var: &str) -> Option<Expr> {
    let n = monomial_degree(poly, var)?;
    let inner = match exp_part {
        Expr::Exp(inner) => inner.as_ref(),
        _ => return None,
    };
    let a = linear_in(inner, var)?;

    fn by_parts(n: u32, a: f64, inner: &Expr, var: &str) -> Expr {
        let e_u = Expr::Exp(Box::new(inner.clone()));
        if n == 0 {
            return e_u / Expr::Const(a);
        }
        let x_n = Expr::Pow(
            Box::new(Expr::Var(var.to_string())),
            Box::new(Expr::Const(n as f64)),
        );
        x_n * e_u / Expr::Const(a)
            - Expr::Const(n as f64 / a) * by_parts(n - 1, a, inner, var)
    }

    Some(by_parts(n, a, inner, var))
}

/// x^n * ln(x): ∫ = x^(n+1)*ln(x)/(n+1) - x^(n+1)/(n+1)^2.
fn power_times_logarithm(poly: &Expr, ln_part: &Expr, var: &str) -> Option<Expr> {
    let n = monomial_degree(poly, var)?;
    match ln_part {
        Expr::Ln(inner) => match inner.as_ref() {
            Expr::Var(x) if x == var => {}
            _ => return None,
        },
        _ => return None,
    }

    let x_var = Expr::Var(var.to_string());
    let n_plus_1 = n as f64 + 1.0;
    let x_pow = Expr::Pow(Box::new(x_var.clone()), Box::new(Expr::Const(n_plus_1)));
    Some(
        x_pow.clone() * Expr::Ln(Box::new(x_var)) / Expr::Const(n_plus_1)
            - x_pow / Expr::Const(n_plus_1 * n_plus_1),
    )
}

/// Degree of `poly` when it is x or x^n with a non-negative integer n.
fn monomial_degree(poly: &Expr, var: &str) -> Option<u32> {
    match poly {
        Expr::Var(name) if name == var => Some(1),
        Expr::Pow(base, exp) => match (base.as_ref(), exp.as_ref()) {
            (Expr::Var(name), Expr::Const(n))
                if name == var && *n >= 0.0 && n.fract() == 0.0 =>
            {
                Some(*n as u32)
            }
            _ => None,
        },
        _ => None,
    }
}
