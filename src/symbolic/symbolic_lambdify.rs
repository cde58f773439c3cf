//! Turning expression trees into callable closures.
//!
//! Every plot mode needs thousands of evaluations of the same expression, so
//! the tree is compiled once into a nest of boxed closures and then called per
//! sample point. Closures are `Send + Sync` so sampling grids can be filled
//! with rayon. The complex variant mirrors the real one over `Complex64`.

use crate::symbolic::symbolic_engine::Expr;
use num_complex::Complex64;
use std::f64::consts::PI;

impl Expr {
    /// Converts a single-variable expression into an executable closure.
    ///
    /// Every `Var` node reads the closure argument, whatever its name, so the
    /// caller is responsible for inferring the plot variable first.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let f = Expr::parse_expression("x^2").lambdify1D();
    /// assert_eq!(f(3.0), 9.0);
    /// ```
    pub fn lambdify1D(&self) -> Box<dyn Fn(f64) -> f64 + Send + Sync> {
        match self {
            Expr::Var(_) => Box::new(|x| x),
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_| val)
            }
            Expr::Add(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) + rhs_fn(x))
            }
            Expr::Sub(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) - rhs_fn(x))
            }
            Expr::Mul(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) * rhs_fn(x))
            }
            Expr::Div(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) / rhs_fn(x))
            }
            Expr::Pow(base, exp) => {
                let base_fn = base.lambdify1D();
                let exp_fn = exp.lambdify1D();
                Box::new(move |x| base_fn(x).powf(exp_fn(x)))
            }
            Expr::Exp(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).exp())
            }
            Expr::Ln(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).ln())
            }
            Expr::sin(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).sin())
            }
            Expr::cos(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).cos())
            }
            Expr::tg(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).tan())
            }
            Expr::ctg(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| 1.0 / expr_fn(x).tan())
            }
            Expr::arcsin(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).asin())
            }
            Expr::arccos(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).acos())
            }
            Expr::arctg(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).atan())
            }
            Expr::arcctg(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| PI / 2.0 - expr_fn(x).atan())
            }
        }
    } // end of lambdify1D

    /// Two-variable closure for surfaces and implicit curves.
    ///
    /// Variables are bound by name; a `Var` matching neither name evaluates
    /// to NaN, which downstream sampling treats as a hole.
    pub fn lambdify2D(
        &self,
        x_name: &str,
        y_name: &str,
    ) -> Box<dyn Fn(f64, f64) -> f64 + Send + Sync> {
        match self {
            Expr::Var(name) => {
                if name == x_name {
                    Box::new(|x, _| x)
                } else if name == y_name {
                    Box::new(|_, y| y)
                } else {
                    Box::new(|_, _| f64::NAN)
                }
            }
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_, _| val)
            }
            Expr::Add(lhs, rhs) => {
                let lhs_fn = lhs.lambdify2D(x_name, y_name);
                let rhs_fn = rhs.lambdify2D(x_name, y_name);
                Box::new(move |x, y| lhs_fn(x, y) + rhs_fn(x, y))
            }
            Expr::Sub(lhs, rhs) => {
                let lhs_fn = lhs.lambdify2D(x_name, y_name);
                let rhs_fn = rhs.lambdify2D(x_name, y_name);
                Box::new(move |x, y| lhs_fn(x, y) - rhs_fn(x, y))
            }
            Expr::Mul(lhs, rhs) => {
                let lhs_fn = lhs.lambdify2D(x_name, y_name);
                let rhs_fn = rhs.lambdify2D(x_name, y_name);
                Box::new(move |x, y| lhs_fn(x, y) * rhs_fn(x, y))
            }
            Expr::Div(lhs, rhs) => {
                let lhs_fn = lhs.lambdify2D(x_name, y_name);
                let rhs_fn = rhs.lambdify2D(x_name, y_name);
                Box::new(move |x, y| lhs_fn(x, y) / rhs_fn(x, y))
            }
            Expr::Pow(base, exp) => {
                let base_fn = base.lambdify2D(x_name, y_name);
                let exp_fn = exp.lambdify2D(x_name, y_name);
                Box::new(move |x, y| base_fn(x, y).powf(exp_fn(x, y)))
            }
            Expr::Exp(expr) => {
                let expr_fn = expr.lambdify2D(x_name, y_name);
                Box::new(move |x, y| expr_fn(x, y).exp())
            }
            Expr::Ln(expr) => {
                let expr_fn = expr.lambdify2D(x_name, y_name);
                Box::new(move |x, y| expr_fn(x, y).ln())
            }
            Expr::sin(expr) => {
                let expr_fn = expr.lambdify2D(x_name, y_name);
                Box::new(move |x, y| expr_fn(x, y).sin())
            }
            Expr::cos(expr) => {
                let expr_fn = expr.lambdify2D(x_name, y_name);
                Box::new(move |x, y| expr_fn(x, y).cos())
            }
            Expr::tg(expr) => {
                let expr_fn = expr.lambdify2D(x_name, y_name);
                Box::new(move |x, y| expr_fn(x, y).tan())
            }
            Expr::ctg(expr) => {
                let expr_fn = expr.lambdify2D(x_name, y_name);
                Box::new(move |x, y| 1.0 / expr_fn(x, y).tan())
            }
            Expr::arcsin(expr) => {
                let expr_fn = expr.lambdify2D(x_name, y_name);
                Box::new(move |x, y| expr_fn(x, y).asin())
            }
            Expr::arccos(expr) => {
                let expr_fn = expr.lambdify2D(x_name, y_name);
                Box::new(move |x, y| expr_fn(x, y).acos())
            }
            Expr::arctg(expr) => {
                let expr_fn = expr.lambdify2D(x_name, y_name);
                Box::new(move |x, y| expr_fn(x, y).atan())
            }
            Expr::arcctg(expr) => {
                let expr_fn = expr.lambdify2D(x_name, y_name);
                Box::new(move |x, y| PI / 2.0 - expr_fn(x, y).atan())
            }
        }
    } // end of lambdify2D

    /// Single-variable closure over the complex plane.
    ///
    /// Same binding rule as `lambdify1D`. Powers go through `powc`, so
    /// branch cuts follow the principal value conventions of num-complex.
    pub fn lambdify1D_complex(&self) -> Box<dyn Fn(Complex64) -> Complex64 + Send + Sync> {
        match self {
            Expr::Var(_) => Box::new(|z| z),
            Expr::Const(val) => {
                let val = Complex64::new(*val, 0.0);
                Box::new(move |_| val)
            }
            Expr::Add(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D_complex();
                let rhs_fn = rhs.lambdify1D_complex();
                Box::new(move |z| lhs_fn(z) + rhs_fn(z))
            }
            Expr::Sub(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D_complex();
                let rhs_fn = rhs.lambdify1D_complex();
                Box::new(move |z| lhs_fn(z) - rhs_fn(z))
            }
            Expr::Mul(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D_complex();
                let rhs_fn = rhs.lambdify1D_complex();
                Box::new(move |z| lhs_fn(z) * rhs_fn(z))
            }
            Expr::Div(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D_complex();
                let rhs_fn = rhs.lambdify1D_complex();
                Box::new(move |z| lhs_fn(z) / rhs_fn(z))
            }
            Expr::Pow(base, exp) => {
                let base_fn = base.lambdify1D_complex();
                let exp_fn = exp.lambdify1D_complex();
                Box::new(move |z| base_fn(z).powc(exp_fn(z)))
            }
            Expr::Exp(expr) => {
                let expr_fn = expr.lambdify1D_complex();
                Box::new(move |z| expr_fn(z).exp())
            }
            Expr::Ln(expr) => {
                let expr_fn = expr.lambdify1D_complex();
                Box::new(move |z| expr_fn(z).ln())
            }
            Expr::sin(expr) => {
                let expr_fn = expr.lambdify1D_complex();
                Box::new(move |z| expr_fn(z).sin())
            }
            Expr::cos(expr) => {
                let expr_fn = expr.lambdify1D_complex();
                Box::new(move |z| expr_fn(z).cos())
            }
            Expr::tg(expr) => {
                let expr_fn = expr.lambdify1D_complex();
                Box::new(move |z| expr_fn(z).tan())
            }
            Expr::ctg(expr) => {
                let expr_fn = expr.lambdify1D_complex();
                Box::new(move |z| Complex64::new(1.0, 0.0) / expr_fn(z).tan())
            }
            Expr::arcsin(expr) => {
                let expr_fn = expr.lambdify1D_complex();
                Box::new(move |z| expr_fn(z).asin())
            }
            Expr::arccos(expr) => {
                let expr_fn = expr.lambdify1D_complex();
                Box::new(move |z| expr_fn(z).acos())
            }
            Expr::arctg(expr) => {
                let expr_fn = expr.lambdify1D_complex();
                Box::new(move |z| expr_fn(z).atan())
            }
            Expr::arcctg(expr) => {
                let expr_fn = expr.lambdify1D_complex();
                Box::new(move |z| Complex64::new(PI / 2.0, 0.0) - expr_fn(z).atan())
            }
        }
    } // end of lambdify1D_complex

    /// Evaluates without building closures, binding variables by position.
    /// A variable missing from `vars` evaluates to NaN.
    pub fn eval_expression(&self, vars: Vec<&str>, values: &[f64]) -> f64 {
        fn eval(expr: &Expr, vars: &[&str], values: &[f64]) -> f64 {
            match expr {
                Expr::Var(name) => vars
                    .iter()
                    .position(|v| v == name)
                    .map_or(f64::NAN, |i| values[i]),
                Expr::Const(val) => *val,
                Expr::Add(lhs, rhs) => eval(lhs, vars, values) + eval(rhs, vars, values),
                Expr::Sub(lhs, rhs) => eval(lhs, vars, values) - eval(rhs, vars, values),
                Expr::Mul(lhs, rhs) => eval(lhs, vars, values) * eval(rhs, vars, values),
                Expr::Div(lhs, rhs) => eval(lhs, vars, values) / eval(rhs, vars, values),
                Expr::Pow(base, exp) => {
                    eval(base, vars, values).powf(eval(exp, vars, values))
                }
                Expr::Exp(e) => eval(e, vars, values).exp(),
                Expr::Ln(e) => eval(e, vars, values).ln(),
                Expr::sin(e) => eval(e, vars, values).sin(),
                Expr::cos(e) => eval(e, vars, values).cos(),
                Expr::tg(e) => eval(e, vars, values).tan(),
                Expr::ctg(e) => 1.0 / eval(e, vars, values).tan(),
                Expr::arcsin(e) => eval(e, vars, values).asin(),
                Expr::arccos(e) => eval(e, vars, values).acos(),
                Expr::arctg(e) => eval(e, vars, values).atan(),
                Expr::arcctg(e) => PI / 2.0 - eval(e, vars, values).atan(),
            }
        }
        eval(self, &vars, values)
    }

    /// Evaluates a variable-free expression, e.g. range bounds like "2*pi".
    pub fn eval_const(&self) -> Result<f64, String> {
        let vars = self.extract_variables();
        if !vars.is_empty() {
            return Err(format!(
                "expected a constant expression, found variables {:?}",
                vars
            ));
        }
        Ok(self.eval_expression(vec![], &[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lambdify1d_single_variable() {
        let x = Expr::Var("x".to_string());
        let func = x.lambdify1D();
        assert_eq!(func(5.0), 5.0);
    }

    #[test]
    fn test_lambdify1d_constant() {
        let c = Expr::Const(42.0);
        let func = c.lambdify1D();
        assert_eq!(func(100.0), 42.0);
    }

    #[test]
    fn test_lambdify1d_polynomial() {
        let x = Expr::Var("x".to_string());
        let expr = x.clone() * x.clone() + x.clone() * Expr::Const(2.0) + Expr::Const(1.0); // x^2 + 2x + 1
        let func = expr.lambdify1D();
        assert_eq!(func(3.0), 16.0); // 9 + 6 + 1 = 16
    }

    #[test]
    fn test_lambdify1d_trigonometric() {
        let expr = Expr::parse_expression("sin(x)");
        let func = expr.lambdify1D();
        assert!((func(0.0) - 0.0).abs() < 1e-10);
        assert!((func(PI / 2.0) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_lambdify1d_cotangent() {
        let expr = Expr::parse_expression("ctg(x)");
        let func = expr.lambdify1D();
        assert!((func(PI / 4.0) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_lambdify1d_exponential() {
        let expr = Expr::parse_expression("exp(x)");
        let func = expr.lambdify1D();
        assert!((func(0.0) - 1.0).abs() < 1e-10);
        assert!((func(1.0) - std::f64::consts::E).abs() < 1e-10);
    }

    #[test]
    fn test_lambdify2d_binds_by_name() {
        let expr = Expr::parse_expression("x^2 + y^2");
        let func = expr.lambdify2D("x", "y");
        assert_eq!(func(3.0, 4.0), 25.0);
    }

    #[test]
    fn test_lambdify2d_unknown_variable_is_nan() {
        let expr = Expr::parse_expression("x + z");
        let func = expr.lambdify2D("x", "y");
        assert!(func(1.0, 2.0).is_nan());
    }

    #[test]
    fn test_complex_exp_of_i_pi() {
        let expr = Expr::parse_expression("exp(x)");
        let func = expr.lambdify1D_complex();
        let result = func(Complex64::new(0.0, PI));
        assert!((result.re + 1.0).abs() < 1e-10);
        assert!(result.im.abs() < 1e-10);
    }

    #[test]
    fn test_complex_square() {
        let expr = Expr::parse_expression("x^2");
        let func = expr.lambdify1D_complex();
        let result = func(Complex64::new(0.0, 1.0)); // i^2 = -1
        assert!((result.re + 1.0).abs() < 1e-9);
        assert!(result.im.abs() < 1e-9);
    }

    #[test]
    fn test_eval_expression_two_variables() {
        let expr = Expr::parse_expression("x*y + 1");
        let value = expr.eval_expression(vec!["x", "y"], &[2.0, 3.0]);
        assert_eq!(value, 7.0);
    }

    #[test]
    fn test_eval_const_folds_pi_products() {
        let expr = Expr::parse_expression("2*pi");
        assert!((expr.eval_const().unwrap() - 2.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_eval_const_rejects_variables() {
        let expr = Expr::parse_expression("2*x");
        assert!(expr.eval_const().is_err());
    }
}
