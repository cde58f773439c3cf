//! # Symbolic Engine Module
//!
//! Core symbolic expression type of the crate. An expression is an abstract
//! syntax tree of variables, constants, arithmetic operations and elementary
//! functions. Everything the tool computes about a function - derivatives,
//! integrals, Taylor polynomials, critical points - is a transformation of
//! this tree; everything it plots is an evaluation of it.
//!
//! Main features:
//! - `Symbols("x, y")` creates several variables at once, `symbols!` macro for ergonomics
//! - std::ops overloading so expressions compose as `x.clone() * x + Expr::Const(1.0)`
//! - `set_variable` / `contains_variable` / `extract_variables` for substitution and queries
//! - mathematical notation for trigonometry: `tg`, `ctg`, `arctg`, `arcctg`

#![allow(non_camel_case_types)]

use std::fmt;

/// Symbolic expression tree. Uses Box<Expr> for nested expressions, enabling
/// arbitrarily deep mathematical structures.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x", "t")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Exponential function: e^x
    Exp(Box<Expr>),
    /// Natural logarithm: ln(x)
    Ln(Box<Expr>),
    /// Sine function: sin(x)
    sin(Box<Expr>),
    /// Cosine function: cos(x)
    cos(Box<Expr>),
    /// Tangent function - mathematical notation 'tg'
    tg(Box<Expr>),
    /// Cotangent function - mathematical notation 'ctg'
    ctg(Box<Expr>),
    /// Arcsine function: arcsin(x)
    arcsin(Box<Expr>),
    /// Arccosine function: arccos(x)
    arccos(Box<Expr>),
    /// Arctangent function - mathematical notation 'arctg'
    arctg(Box<Expr>),
    /// Arccotangent function - mathematical notation 'arcctg'
    arcctg(Box<Expr>),
}

/// Pretty printing with parentheses for precedence; this is what the textual
/// report shows to the user.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Ln(expr) => write!(f, "ln({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tg(expr) => write!(f, "tg({})", expr),
            Expr::ctg(expr) => write!(f, "ctg({})", expr),
            Expr::arcsin(expr) => write!(f, "arcsin({})", expr),
            Expr::arccos(expr) => write!(f, "arccos({})", expr),
            Expr::arctg(expr) => write!(f, "arctg({})", expr),
            Expr::arcctg(expr) => write!(f, "arcctg({})", expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::AddAssign for Expr {
    fn add_assign(&mut self, rhs: Self) {
        *self = Expr::Add(Box::new(self.clone()), Box::new(rhs));
    }
}

impl std::ops::MulAssign for Expr {
    fn mul_assign(&mut self, rhs: Self) {
        *self = Expr::Mul(Box::new(self.clone()), Box::new(rhs));
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// BASIC FEATURES

    /// Creates multiple symbolic variables from a comma-separated string.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let vars = Expr::Symbols("x, y, z");
    /// assert_eq!(vars.len(), 3);
    /// ```
    pub fn Symbols(symbols: &str) -> Vec<Expr> {
        let symbols = symbols.to_string();
        let vec_trimmed: Vec<String> = symbols.split(',').map(|s| s.trim().to_string()).collect();
        let vector_of_symbolic_vars: Vec<Expr> = vec_trimmed
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| Expr::Var(s.to_string()))
            .collect();
        vector_of_symbolic_vars
    }

    /// Substitutes a variable with a constant value throughout the expression.
    pub fn set_variable(&self, var: &str, value: f64) -> Expr {
        match self {
            Expr::Var(name) if name == var => Expr::Const(value),
            Expr::Add(lhs, rhs) => Expr::Add(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Sub(lhs, rhs) => Expr::Sub(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Mul(lhs, rhs) => Expr::Mul(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Pow(base, exp) => Expr::Pow(
                Box::new(base.set_variable(var, value)),
                Box::new(exp.set_variable(var, value)),
            ),
            Expr::Exp(expr) => Expr::Exp(Box::new(expr.set_variable(var, value))),
            Expr::Ln(expr) => Expr::Ln(Box::new(expr.set_variable(var, value))),
            Expr::sin(expr) => Expr::sin(Box::new(expr.set_variable(var, value))),
            Expr::cos(expr) => Expr::cos(Box::new(expr.set_variable(var, value))),
            Expr::tg(expr) => Expr::tg(Box::new(expr.set_variable(var, value))),
            Expr::ctg(expr) => Expr::ctg(Box::new(expr.set_variable(var, value))),
            Expr::arcsin(expr) => Expr::arcsin(Box::new(expr.set_variable(var, value))),
            Expr::arccos(expr) => Expr::arccos(Box::new(expr.set_variable(var, value))),
            Expr::arctg(expr) => Expr::arctg(Box::new(expr.set_variable(var, value))),
            Expr::arcctg(expr) => Expr::arcctg(Box::new(expr.set_variable(var, value))),
            _ => self.clone(),
        }
    }

    /// Renames a variable throughout the expression.
    pub fn rename_variable(&self, old_var: &str, new_var: &str) -> Expr {
        match self {
            Expr::Var(name) if name == old_var => Expr::Var(new_var.to_string()),
            Expr::Add(lhs, rhs) => Expr::Add(
                Box::new(lhs.rename_variable(old_var, new_var)),
                Box::new(rhs.rename_variable(old_var, new_var)),
            ),
            Expr::Sub(lhs, rhs) => Expr::Sub(
                Box::new(lhs.rename_variable(old_var, new_var)),
                Box::new(rhs.rename_variable(old_var, new_var)),
            ),
            Expr::Mul(lhs, rhs) => Expr::Mul(
                Box::new(lhs.rename_variable(old_var, new_var)),
                Box::new(rhs.rename_variable(old_var, new_var)),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(lhs.rename_variable(old_var, new_var)),
                Box::new(rhs.rename_variable(old_var, new_var)),
            ),
            Expr::Pow(base, exp) => Expr::Pow(
                Box::new(base.rename_variable(old_var, new_var)),
                Box::new(exp.rename_variable(old_var, new_var)),
            ),
            Expr::Exp(expr) => Expr::Exp(Box::new(expr.rename_variable(old_var, new_var))),
            Expr::Ln(expr) => Expr::Ln(Box::new(expr.rename_variable(old_var, new_var))),
            Expr::sin(expr) => Expr::sin(Box::new(expr.rename_variable(old_var, new_var))),
            Expr::cos(expr) => Expr::cos(Box::new(expr.rename_variable(old_var, new_var))),
            Expr::tg(expr) => Expr::tg(Box::new(expr.rename_variable(old_var, new_var))),
            Expr::ctg(expr) => Expr::ctg(Box::new(expr.rename_variable(old_var, new_var))),
            Expr::arcsin(expr) => Expr::arcsin(Box::new(expr.rename_variable(old_var, new_var))),
            Expr::arccos(expr) => Expr::arccos(Box::new(expr.rename_variable(old_var, new_var))),
            Expr::arctg(expr) => Expr::arctg(Box::new(expr.rename_variable(old_var, new_var))),
            Expr::arcctg(expr) => Expr::arcctg(Box::new(expr.rename_variable(old_var, new_var))),
            _ => self.clone(),
        }
    }

    /// Checks whether the expression mentions the given variable anywhere.
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Const(_) => false,
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                lhs.contains_variable(var_name) || rhs.contains_variable(var_name)
            }
            Expr::Exp(expr)
            | Expr::Ln(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tg(expr)
            | Expr::ctg(expr)
            | Expr::arcsin(expr)
            | Expr::arccos(expr)
            | Expr::arctg(expr)
            | Expr::arcctg(expr) => expr.contains_variable(var_name),
        }
    }

    /// Collects all variable names of the expression, sorted and deduplicated.
    ///
    /// The tool uses this to infer the independent variable of a parsed
    /// expression when the user did not name one.
    pub fn extract_variables(&self) -> Vec<String> {
        fn walk(expr: &Expr, acc: &mut Vec<String>) {
            match expr {
                Expr::Var(name) => acc.push(name.clone()),
                Expr::Const(_) => {}
                Expr::Add(lhs, rhs)
                | Expr::Sub(lhs, rhs)
                | Expr::Mul(lhs, rhs)
                | Expr::Div(lhs, rhs)
                | Expr::Pow(lhs, rhs) => {
                    walk(lhs, acc);
                    walk(rhs, acc);
                }
                Expr::Exp(e)
                | Expr::Ln(e)
                | Expr::sin(e)
                | Expr::cos(e)
                | Expr::tg(e)
                | Expr::ctg(e)
                | Expr::arcsin(e)
                | Expr::arccos(e)
                | Expr::arctg(e)
                | Expr::arcctg(e) => walk(e, acc),
            }
        }
        let mut vars = Vec::new();
        walk(self, &mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    /// Shorthand for Box::new(self) used all over the tree constructors.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates exponential function e^(self).
    pub fn exp(mut self) -> Expr {
        self = Expr::Exp(self.boxed());
        self
    }

    /// Creates natural logarithm ln(self).
    pub fn ln(mut self) -> Expr {
        self = Expr::Ln(self.boxed());
        self
    }

    /// Creates power expression self^rhs.
    pub fn pow(mut self, rhs: Expr) -> Expr {
        self = Expr::Pow(self.boxed(), rhs.boxed());
        self
    }

    /// Creates square root as self^0.5.
    pub fn sqrt(mut self) -> Expr {
        self = Expr::Pow(self.boxed(), Expr::Const(0.5).boxed());
        self
    }

    /// Checks if expression is exactly the constant 0.0.
    pub fn is_zero(&self) -> bool {
        match self {
            Expr::Const(val) => val == &0.0,
            _ => false,
        }
    }
}

/// Convenient macro for creating multiple symbolic variables as local bindings.
///
/// # Usage
/// ```rust, ignore
/// symbols!(x, y);
/// let expr = x + y;
/// ```
#[macro_export]
macro_rules! symbols {
    ($($name:ident),*) => {
        $(
            let $name = Expr::Var(stringify!($name).to_string());
        )*
    };
}

#[cfg(test)]
mod tests {
    use super::Expr;

    #[test]
    fn test_operator_overloading() {
        symbols!(x, y);
        let expr = x.clone() * x + y;
        assert_eq!(
            expr,
            Expr::Mul(
                Expr::Var("x".to_string()).boxed(),
                Expr::Var("x".to_string()).boxed()
            ) + Expr::Var("y".to_string())
        );
    }

    #[test]
    fn test_compound_assignment() {
        symbols!(x);
        let mut acc = Expr::Const(1.0);
        acc += x.clone();
        acc *= x;
        assert_eq!(format!("{}", acc), "((1 + x) * x)");
    }

    #[test]
    fn test_symbols_and_zero_check() {
        let vars = Expr::Symbols("x, y, z");
        assert_eq!(vars.len(), 3);
        assert_eq!(vars[2], Expr::Var("z".to_string()));
        assert!(Expr::Const(0.0).is_zero());
        assert!(!vars[0].is_zero());
    }

    #[test]
    fn test_set_variable() {
        let expr = Expr::Var("x".to_string()).pow(Expr::Const(2.0)) + Expr::Var("c".to_string());
        let with_c = expr.set_variable("c", 3.0);
        assert!(!with_c.contains_variable("c"));
        assert!(with_c.contains_variable("x"));
    }

    #[test]
    fn test_rename_variable() {
        let expr = Expr::parse_expression("x^2 + sin(x)");
        let renamed = expr.rename_variable("x", "t");
        assert!(renamed.contains_variable("t"));
        assert!(!renamed.contains_variable("x"));
    }

    #[test]
    fn test_extract_variables() {
        let expr = Expr::parse_expression("sin(x)*exp(-t) + x");
        assert_eq!(expr.extract_variables(), vec!["t".to_string(), "x".to_string()]);
        let constant = Expr::Const(4.0);
        assert!(constant.extract_variables().is_empty());
    }

    #[test]
    fn test_display() {
        let expr = Expr::sin(Expr::Var("x".to_string()).boxed()) * Expr::Const(2.0);
        assert_eq!(format!("{}", expr), "(sin(x) * 2)");
    }

    #[test]
    fn test_neg_is_mul_by_minus_one() {
        let x = Expr::Var("x".to_string());
        assert_eq!(-x.clone(), Expr::Const(-1.0) * x);
    }

    #[test]
    fn test_sqrt_sugar() {
        let x = Expr::Var("x".to_string());
        assert_eq!(
            x.clone().sqrt(),
            Expr::Pow(x.boxed(), Expr::Const(0.5).boxed())
        );
    }
}
