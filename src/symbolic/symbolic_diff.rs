//! Analytical differentiation and Taylor expansion.
//!
//! Implements the standard rules from calculus over the expression tree:
//! - Power rule: d/dx(x^n) = n*x^(n-1)
//! - Product rule: d/dx(f*g) = f'*g + f*g'
//! - Quotient rule: d/dx(f/g) = (f'*g - f*g')/g^2
//! - Chain rule: d/dx(f(g(x))) = f'(g(x))*g'(x)
//!
//! Powers dispatch on which side carries the variable: constant exponent uses
//! the power rule, constant base the exponential rule, and the general case
//! goes through b^e = exp(e*ln(b)).

use crate::symbolic::symbolic_engine::Expr;

impl Expr {
    /// DIFFERENTIATION

    /// Computes the analytical derivative with respect to a variable.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let f = Expr::parse_expression("x^2");
    /// let df_dx = f.diff("x"); // 2*x
    /// ```
    pub fn diff(&self, var: &str) -> Expr {
        match self {
            Expr::Var(name) => {
                if name == var {
                    Expr::Const(1.0)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => Expr::Add(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Sub(lhs, rhs) => Expr::Sub(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Mul(lhs, rhs) => Expr::Add(
                Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)))),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(Expr::Sub(
                    Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                    Box::new(Expr::Mul(Box::new(rhs.diff(var)), lhs.clone())),
                )),
                Box::new(Expr::Mul(rhs.clone(), rhs.clone())),
            ),
            Expr::Pow(base, exp) => {
                if !exp.contains_variable(var) {
                    Expr::Mul(
                        Box::new(Expr::Mul(
                            exp.clone(),
                            Box::new(Expr::Pow(
                                base.clone(),
                                Box::new(Expr::Sub(exp.clone(), Box::new(Expr::Const(1.0)))),
                            )),
                        )),
                        Box::new(base.diff(var)),
                    )
                } else if !base.contains_variable(var) {
                    Expr::Mul(
                        Box::new(Expr::Mul(
                            Box::new(Expr::Pow(base.clone(), exp.clone())),
                            Box::new(Expr::Ln(base.clone())),
                        )),
                        Box::new(exp.diff(var)),
                    )
                } else {
                    // both sides vary: d(b^e) = b^e * (e'*ln(b) + e*b'/b)
                    Expr::Mul(
                        Box::new(Expr::Pow(base.clone(), exp.clone())),
                        Box::new(Expr::Add(
                            Box::new(Expr::Mul(
                                Box::new(exp.diff(var)),
                                Box::new(Expr::Ln(base.clone())),
                            )),
                            Box::new(Expr::Div(
                                Box::new(Expr::Mul(exp.clone(), Box::new(base.diff(var)))),
                                base.clone(),
                            )),
                        )),
                    )
                }
            }
            Expr::Exp(expr) => {
                Expr::Mul(Box::new(Expr::Exp(expr.clone())), Box::new(expr.diff(var)))
            }
            Expr::Ln(expr) => Expr::Div(Box::new(expr.diff(var)), expr.clone()),
            Expr::sin(expr) => {
                Expr::Mul(Box::new(Expr::cos(expr.clone())), Box::new(expr.diff(var)))
            }
            Expr::cos(expr) => Expr::Mul(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(Expr::sin(expr.clone())),
                )),
                Box::new(expr.diff(var)),
            ),
            Expr::tg(expr) => Expr::Mul(
                Box::new(Expr::Div(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(
                        Box::new(Expr::cos(expr.clone())),
                        Box::new(Expr::Const(2.0)),
                    )),
                )),
                Box::new(expr.diff(var)),
            ),
            Expr::ctg(expr) => Expr::Mul(
                Box::new(Expr::Div(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(Expr::Pow(
                        Box::new(Expr::sin(expr.clone())),
                        Box::new(Expr::Const(2.0)),
                    )),
                )),
                Box::new(expr.diff(var)),
            ),
            Expr::arcsin(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Pow(
                    Box::new(Expr::Sub(
                        Box::new(Expr::Const(1.0)),
                        Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                    )),
                    Box::new(Expr::Const(0.5)),
                )),
            ),
            Expr::arccos(expr) => Expr::Div(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(expr.diff(var)),
                )),
                Box::new(Expr::Pow(
                    Box::new(Expr::Sub(
                        Box::new(Expr::Const(1.0)),
                        Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                    )),
                    Box::new(Expr::Const(0.5)),
                )),
            ),
            Expr::arctg(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Add(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                )),
            ),
            Expr::arcctg(expr) => Expr::Div(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(expr.diff(var)),
                )),
                Box::new(Expr::Add(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                )),
            ),
        }
    } // end of diff

    /// Computes the n-th derivative, simplifying after every step to keep the
    /// tree from blowing up.
    pub fn n_th_derivative1D(&self, var: &str, n: usize) -> Expr {
        let mut derivative = self.clone();
        for _ in 0..n {
            derivative = derivative.diff(var).simplify();
        }
        derivative
    }

    /// Taylor polynomial of the expression around x0 up to the given order.
    ///
    /// Reuses each derivative for the next term instead of differentiating
    /// from scratch at every order.
    pub fn taylor_series1D(&self, var_name: &str, x0: f64, order: usize) -> Expr {
        let x = Expr::Var(var_name.to_owned());
        let x0_sym = Expr::Const(x0);
        let fun_at_x0 = self.lambdify1D()(x0);
        let fun_at_x0_sym = Expr::Const(fun_at_x0);

        if order == 0 {
            return fun_at_x0_sym.simplify();
        }

        fn taylor_term(
            expr: &Expr,
            var_name: &str,
            x0: f64,
            n: usize,
            x: &Expr,
            x0_sym: &Expr,
        ) -> (Expr, Expr) {
            let dfun_dx = expr.diff(var_name).simplify();
            let dfun_dx_at_x0 = dfun_dx.lambdify1D()(x0);
            let factorial = (1..=n).product::<usize>() as f64;
            let coeff = Expr::Const(dfun_dx_at_x0 / factorial);
            (
                coeff
                    * (x.clone() - x0_sym.clone())
                        .pow(Expr::Const(n as f64))
                        .simplify(),
                dfun_dx,
            )
        }

        fn taylor_recursive(
            expr: &Expr,
            var_name: &str,
            x0: f64,
            current_order: usize,
            target_order: usize,
            x: &Expr,
            x0_sym: &Expr,
        ) -> Expr {
            if current_order > target_order {
                return Expr::Const(0.0);
            }
            let (term, derivative) = taylor_term(expr, var_name, x0, current_order, x, x0_sym);
            term + taylor_recursive(
                &derivative,
                var_name,
                x0,
                current_order + 1,
                target_order,
                x,
                x0_sym,
            )
        }

        let Taylor = fun_at_x0_sym + taylor_recursive(self, var_name, x0, 1, order, &x, &x0_sym);
        Taylor.simplify()
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::symbolic_engine::Expr;
    use approx::assert_relative_eq;

    #[test]
    fn test_diff_sin_is_cos() {
        let f = Expr::parse_expression("sin(x)");
        let df = f.diff("x").simplify();
        assert_eq!(df, Expr::cos(Expr::Var("x".to_string()).boxed()));
    }

    #[test]
    fn test_power_rule() {
        let f = Expr::parse_expression("x^3");
        let df = f.diff("x").lambdify1D();
        assert_relative_eq!(df(2.0), 12.0, epsilon = 1e-12);
        assert_relative_eq!(df(-1.0), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_power_rule_keeps_negative_base_finite() {
        // constant exponent must not route through ln(base)
        let f = Expr::parse_expression("x^2");
        let df = f.diff("x").lambdify1D();
        assert_relative_eq!(df(-3.0), -6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_product_rule() {
        let f = Expr::parse_expression("x*sin(x)");
        let df = f.diff("x").lambdify1D();
        let expected = |x: f64| x.sin() + x * x.cos();
        assert_relative_eq!(df(1.3), expected(1.3), epsilon = 1e-12);
    }

    #[test]
    fn test_quotient_rule() {
        let f = Expr::parse_expression("sin(x)/x");
        let df = f.diff("x").lambdify1D();
        let expected = |x: f64| (x * x.cos() - x.sin()) / (x * x);
        assert_relative_eq!(df(2.0), expected(2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_chain_rule() {
        let f = Expr::parse_expression("exp(-x^2)");
        let df = f.diff("x").lambdify1D();
        let expected = |x: f64| -2.0 * x * (-x * x).exp();
        assert_relative_eq!(df(0.7), expected(0.7), epsilon = 1e-12);
    }

    #[test]
    fn test_constant_base_exponential() {
        let f = Expr::parse_expression("2^x");
        let df = f.diff("x").lambdify1D();
        let expected = |x: f64| 2f64.powf(x) * 2f64.ln();
        assert_relative_eq!(df(1.5), expected(1.5), epsilon = 1e-12);
    }

    #[test]
    fn test_general_power_rule() {
        // x^x needs the exp(e*ln(b)) form
        let f = Expr::parse_expression("x^x");
        let df = f.diff("x").lambdify1D();
        let expected = |x: f64| x.powf(x) * (x.ln() + 1.0);
        assert_relative_eq!(df(1.5), expected(1.5), epsilon = 1e-10);
    }

    #[test]
    fn test_nth_derivative_of_sin() {
        let f = Expr::parse_expression("sin(x)");
        let d4 = f.n_th_derivative1D("x", 4).lambdify1D();
        assert_relative_eq!(d4(0.9), 0.9f64.sin(), epsilon = 1e-10);
    }

    #[test]
    fn test_taylor_series_of_exp() {
        let f = Expr::parse_expression("exp(x)");
        let taylor = f.taylor_series1D("x", 0.0, 3).lambdify1D();
        let expected = |x: f64| 1.0 + x + x * x / 2.0 + x * x * x / 6.0;
        assert_relative_eq!(taylor(0.3), expected(0.3), epsilon = 1e-12);
    }

    #[test]
    fn test_taylor_series_of_sin_has_odd_terms() {
        let f = Expr::parse_expression("sin(x)");
        let taylor = f.taylor_series1D("x", 0.0, 5).lambdify1D();
        let expected = |x: f64| x - x.powi(3) / 6.0 + x.powi(5) / 120.0;
        assert_relative_eq!(taylor(0.5), expected(0.5), epsilon = 1e-12);
    }

    #[test]
    fn test_taylor_series_around_nonzero_point() {
        // a parabola is its own second order expansion anywhere
        let f = Expr::parse_expression("x^2");
        let taylor = f.taylor_series1D("x", 1.0, 2).lambdify1D();
        for x in [-1.0, 0.0, 2.5] {
            assert_relative_eq!(taylor(x), x * x, epsilon = 1e-10);
        }
    }
}
