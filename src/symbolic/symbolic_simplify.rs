//! Algebraic simplification.
//!
//! Two layers: `simplify_numbers` only folds constant arithmetic, `simplify_`
//! additionally applies identities (x + 0, x * 1, x^0, ...) and collects like
//! terms in polynomial sums (3x + 2x = 5x). The public `simplify` runs
//! `simplify_` to a fixed point, so trees produced by differentiation collapse
//! in one call.

use crate::symbolic::symbolic_engine::Expr;
use std::collections::{BTreeMap, HashMap};

impl Expr {
    /// Folds arithmetic between constants, leaving everything else untouched.
    pub fn simplify_numbers(&self) -> Expr {
        match self {
            Expr::Var(_) => self.clone(),
            Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => {
                match (lhs.simplify_numbers(), rhs.simplify_numbers()) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
                    (lhs, rhs) => Expr::Add(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Sub(lhs, rhs) => {
                match (lhs.simplify_numbers(), rhs.simplify_numbers()) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                    (lhs, rhs) => Expr::Sub(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Mul(lhs, rhs) => {
                match (lhs.simplify_numbers(), rhs.simplify_numbers()) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
                    (lhs, rhs) => Expr::Mul(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Div(lhs, rhs) => {
                match (lhs.simplify_numbers(), rhs.simplify_numbers()) {
                    (Expr::Const(a), Expr::Const(b)) if b != 0.0 => Expr::Const(a / b),
                    (lhs, rhs) => Expr::Div(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Pow(base, exp) => {
                match (base.simplify_numbers(), exp.simplify_numbers()) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a.powf(b)),
                    (base, exp) => Expr::Pow(Box::new(base), Box::new(exp)),
                }
            }
            Expr::Exp(expr) => Expr::Exp(Box::new(expr.simplify_numbers())),
            Expr::Ln(expr) => Expr::Ln(Box::new(expr.simplify_numbers())),
            Expr::sin(expr) => Expr::sin(Box::new(expr.simplify_numbers())),
            Expr::cos(expr) => Expr::cos(Box::new(expr.simplify_numbers())),
            Expr::tg(expr) => Expr::tg(Box::new(expr.simplify_numbers())),
            Expr::ctg(expr) => Expr::ctg(Box::new(expr.simplify_numbers())),
            Expr::arcsin(expr) => Expr::arcsin(Box::new(expr.simplify_numbers())),
            Expr::arccos(expr) => Expr::arccos(Box::new(expr.simplify_numbers())),
            Expr::arctg(expr) => Expr::arctg(Box::new(expr.simplify_numbers())),
            Expr::arcctg(expr) => Expr::arcctg(Box::new(expr.simplify_numbers())),
        }
    }

    /// One pass of identity-based simplification.
    ///
    /// Applies constant folding, additive/multiplicative identities, power
    /// rules (x^a * x^b = x^(a+b), (x^a)^b = x^(a*b)) and like-term
    /// collection on sums. Special values of transcendental functions fold
    /// only where exact (sin(0), cos(0), exp(0), ln(1), arccos(1)).
    pub fn simplify_(&self) -> Expr {
        match self {
            Expr::Var(_) => self.clone(),
            Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
                    (Expr::Const(0.0), _) => rhs,
                    (_, Expr::Const(0.0)) => lhs,
                    _ => {
                        let expr = Expr::Add(Box::new(lhs), Box::new(rhs));
                        Self::collect_like_terms(&expr).unwrap_or(expr)
                    }
                }
            }
            Expr::Sub(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                    (_, Expr::Const(0.0)) => lhs,
                    _ if lhs == rhs => Expr::Const(0.0),
                    _ => {
                        // a - b = a + (-1)*b, so term collection sees one sum
                        let neg_rhs =
                            Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(rhs)).simplify_();
                        let add_expr = Expr::Add(Box::new(lhs), Box::new(neg_rhs));
                        Self::collect_like_terms(&add_expr).unwrap_or(add_expr)
                    }
                }
            }
            Expr::Mul(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
                    (Expr::Const(0.0), _) | (_, Expr::Const(0.0)) => Expr::Const(0.0),
                    (Expr::Const(1.0), _) => rhs,
                    (_, Expr::Const(1.0)) => lhs,
                    (Expr::Pow(base1, exp1), Expr::Pow(base2, exp2)) if base1 == base2 => {
                        let new_exp = Expr::Add(exp1.clone(), exp2.clone()).simplify_();
                        Expr::Pow(base1.clone(), Box::new(new_exp))
                    }
                    (Expr::Var(v1), Expr::Pow(base, exp))
                    | (Expr::Pow(base, exp), Expr::Var(v1)) => {
                        if let Expr::Var(v2) = base.as_ref() {
                            if v1 == v2 {
                                let new_exp =
                                    Expr::Add(Box::new(Expr::Const(1.0)), exp.clone()).simplify_();
                                return Expr::Pow(
                                    Box::new(Expr::Var(v1.clone())),
                                    Box::new(new_exp),
                                );
                            }
                        }
                        Expr::Mul(Box::new(lhs), Box::new(rhs))
                    }
                    (Expr::Var(v1), Expr::Var(v2)) if v1 == v2 => {
                        Expr::Pow(Box::new(Expr::Var(v1.clone())), Box::new(Expr::Const(2.0)))
                    }
                    // pull constants out of nested products: (2 * x) * 3 = 6 * x
                    (Expr::Mul(inner_lhs, inner_rhs), Expr::Const(c)) => {
                        match (inner_lhs.as_ref(), inner_rhs.as_ref()) {
                            (Expr::Const(c1), _) => {
                                Expr::Mul(Box::new(Expr::Const(c1 * c)), inner_rhs.clone())
                                    .simplify_()
                            }
                            (_, Expr::Const(c1)) => {
                                Expr::Mul(Box::new(Expr::Const(c1 * c)), inner_lhs.clone())
                                    .simplify_()
                            }
                            _ => Expr::Mul(Box::new(lhs), Box::new(rhs)),
                        }
                    }
                    (Expr::Const(c), Expr::Mul(inner_lhs, inner_rhs)) => {
                        match (inner_lhs.as_ref(), inner_rhs.as_ref()) {
                            (Expr::Const(c1), _) => {
                                Expr::Mul(Box::new(Expr::Const(c * c1)), inner_rhs.clone())
                                    .simplify_()
                            }
                            (_, Expr::Const(c1)) => {
                                Expr::Mul(Box::new(Expr::Const(c * c1)), inner_lhs.clone())
                                    .simplify_()
                            }
                            _ => Expr::Mul(Box::new(lhs), Box::new(rhs)),
                        }
                    }
                    _ => Expr::Mul(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Div(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) if *b != 0.0 => Expr::Const(a / b),
                    (Expr::Const(0.0), _) => Expr::Const(0.0),
                    (_, Expr::Const(1.0)) => lhs,
                    _ if lhs == rhs => Expr::Const(1.0),
                    (Expr::Pow(base1, exp1), Expr::Pow(base2, exp2)) if base1 == base2 => {
                        let new_exp = Expr::Sub(exp1.clone(), exp2.clone()).simplify_();
                        match new_exp {
                            Expr::Const(0.0) => Expr::Const(1.0),
                            _ => Expr::Pow(base1.clone(), Box::new(new_exp)),
                        }
                    }
                    (Expr::Var(v1), Expr::Pow(base, exp)) => {
                        if let Expr::Var(v2) = base.as_ref() {
                            if v1 == v2 {
                                let new_exp =
                                    Expr::Sub(Box::new(Expr::Const(1.0)), exp.clone()).simplify_();
                                return match new_exp {
                                    Expr::Const(0.0) => Expr::Const(1.0),
                                    _ => Expr::Pow(
                                        Box::new(Expr::Var(v1.clone())),
                                        Box::new(new_exp),
                                    ),
                                };
                            }
                        }
                        Expr::Div(Box::new(lhs), Box::new(rhs))
                    }
                    (Expr::Pow(base, exp), Expr::Var(v2)) => {
                        if let Expr::Var(v1) = base.as_ref() {
                            if v1 == v2 {
                                let new_exp =
                                    Expr::Sub(exp.clone(), Box::new(Expr::Const(1.0))).simplify_();
                                return match new_exp {
                                    Expr::Const(0.0) => Expr::Const(1.0),
                                    _ => Expr::Pow(
                                        Box::new(Expr::Var(v1.clone())),
                                        Box::new(new_exp),
                                    ),
                                };
                            }
                        }
                        Expr::Div(Box::new(lhs), Box::new(rhs))
                    }
                    (Expr::Mul(inner_lhs, inner_rhs), Expr::Const(c)) if *c != 0.0 => {
                        match (inner_lhs.as_ref(), inner_rhs.as_ref()) {
                            (Expr::Const(c1), _) => {
                                Expr::Mul(Box::new(Expr::Const(c1 / c)), inner_rhs.clone())
                                    .simplify_()
                            }
                            (_, Expr::Const(c1)) => {
                                Expr::Mul(Box::new(Expr::Const(c1 / c)), inner_lhs.clone())
                                    .simplify_()
                            }
                            _ => Expr::Div(Box::new(lhs), Box::new(rhs)),
                        }
                    }
                    _ => Expr::Div(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Pow(base, exp) => {
                let base = base.simplify_();
                let exp = exp.simplify_();
                match (&base, &exp) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a.powf(*b)),
                    (_, Expr::Const(0.0)) => Expr::Const(1.0),
                    (_, Expr::Const(1.0)) => base,
                    (Expr::Const(0.0), _) => Expr::Const(0.0),
                    (Expr::Const(1.0), _) => Expr::Const(1.0),
                    (Expr::Pow(inner_base, inner_exp), _) => {
                        let new_exp = Expr::Mul(inner_exp.clone(), Box::new(exp)).simplify_();
                        Expr::Pow(inner_base.clone(), Box::new(new_exp))
                    }
                    _ => Expr::Pow(Box::new(base), Box::new(exp)),
                }
            }
            Expr::Exp(expr) => {
                let expr = expr.simplify_();
                match &expr {
                    Expr::Const(0.0) => Expr::Const(1.0),
                    _ => Expr::Exp(Box::new(expr)),
                }
            }
            Expr::Ln(expr) => {
                let expr = expr.simplify_();
                match &expr {
                    Expr::Const(1.0) => Expr::Const(0.0),
                    _ => Expr::Ln(Box::new(expr)),
                }
            }
            Expr::sin(expr) => {
                let expr = expr.simplify_();
                match &expr {
                    Expr::Const(0.0) => Expr::Const(0.0),
                    _ => Expr::sin(Box::new(expr)),
                }
            }
            Expr::cos(expr) => {
                let expr = expr.simplify_();
                match &expr {
                    Expr::Const(0.0) => Expr::Const(1.0),
                    _ => Expr::cos(Box::new(expr)),
                }
            }
            Expr::tg(expr) => {
                let expr = expr.simplify_();
                match &expr {
                    Expr::Const(0.0) => Expr::Const(0.0),
                    _ => Expr::tg(Box::new(expr)),
                }
            }
            Expr::ctg(expr) => Expr::ctg(Box::new(expr.simplify_())),
            Expr::arcsin(expr) => {
                let expr = expr.simplify_();
                match &expr {
                    Expr::Const(0.0) => Expr::Const(0.0),
                    _ => Expr::arcsin(Box::new(expr)),
                }
            }
            Expr::arccos(expr) => {
                let expr = expr.simplify_();
                match &expr {
                    Expr::Const(1.0) => Expr::Const(0.0),
                    _ => Expr::arccos(Box::new(expr)),
                }
            }
            Expr::arctg(expr) => {
                let expr = expr.simplify_();
                match &expr {
                    Expr::Const(0.0) => Expr::Const(0.0),
                    _ => Expr::arctg(Box::new(expr)),
                }
            }
            Expr::arcctg(expr) => Expr::arcctg(Box::new(expr.simplify_())),
        }
    }

    /// Collect like terms in a sum: 3x + 2x = 5x, (a + b) - (a + b) = 0.
    ///
    /// Returns `None` when the sum contains a non-polynomial term or when no
    /// two terms share a monomial, so the caller keeps the original tree.
    fn collect_like_terms(expr: &Expr) -> Option<Expr> {
        let mut terms = Vec::new();
        flatten_add(expr, &mut terms);
        if terms.len() < 2 {
            return None;
        }

        for term in &terms {
            let (_, coeff) = extract_monomial(term);
            if coeff == 0.0 && !matches!(term, Expr::Const(0.0)) {
                // something like sin(x) landed in the sum, leave it alone
                return None;
            }
        }

        let mut poly: HashMap<MonomialKey, f64> = HashMap::new();
        for t in &terms {
            let (mon, coeff) = extract_monomial(t);
            *poly.entry(mon).or_insert(0.0) += coeff;
        }
        if poly.len() == terms.len() {
            return None;
        }

        let mut result_terms = Vec::new();
        for (monomial, coeff) in poly {
            if coeff == 0.0 {
                continue;
            }
            result_terms.push(Self::build_monomial_term(&monomial, coeff));
        }

        if result_terms.is_empty() {
            Some(Expr::Const(0.0))
        } else {
            result_terms
                .into_iter()
                .reduce(|a, b| Expr::Add(Box::new(a), Box::new(b)))
        }
    }

    /// Rebuild `coeff * x^n * y^m * ...` from a collected monomial.
    fn build_monomial_term(monomial: &MonomialKey, coeff: f64) -> Expr {
        if monomial.0.is_empty() {
            return Expr::Const(coeff);
        }

        let mut factors = Vec::new();
        if coeff != 1.0 {
            factors.push(Expr::Const(coeff));
        }
        for (var, exp) in &monomial.0 {
            if *exp == 0 {
                continue;
            }
            let var_expr = Expr::Var(var.clone());
            if *exp == 1 {
                factors.push(var_expr);
            } else {
                factors.push(Expr::Pow(
                    Box::new(var_expr),
                    Box::new(Expr::Const(*exp as f64)),
                ));
            }
        }

        if factors.is_empty() {
            Expr::Const(1.0)
        } else {
            factors
                .into_iter()
                .reduce(|a, b| Expr::Mul(Box::new(a), Box::new(b)))
                .unwrap_or(Expr::Const(1.0))
        }
    }

    /// Simplifies the expression by iterating `simplify_` until it stops
    /// changing. Derivative trees usually settle in two or three passes; the
    /// cap guards against rule pairs that keep rewriting each other.
    pub fn simplify(&self) -> Expr {
        let mut current = self.simplify_();
        for _ in 0..8 {
            let next = current.simplify_();
            if next == current {
                break;
            }
            current = next;
        }
        current
    }
}

/// Variable part of a polynomial term, variable name mapped to its exponent.
/// BTreeMap keeps the key canonical so x*y and y*x collect together.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct MonomialKey(BTreeMap<String, i32>);

/// Flattens nested Add/Sub into a term list, pushing subtraction through as
/// multiplication by -1 and distributing -1 over inner sums so that
/// (a + b) - (a + b) cancels term by term.
fn flatten_add(expr: &Expr, out: &mut Vec<Expr>) {
    match expr {
        Expr::Add(a, b) => {
            flatten_add(a, out);
            flatten_add(b, out);
        }
        Expr::Sub(a, b) => {
            flatten_add(a, out);
            let neg_b = Expr::Mul(Box::new(Expr::Const(-1.0)), b.clone());
            flatten_add(&neg_b, out);
        }
        Expr::Mul(lhs, rhs) => {
            if let Expr::Const(-1.0) = lhs.as_ref() {
                match rhs.as_ref() {
                    Expr::Add(a, b) => {
                        let neg_a = Expr::Mul(Box::new(Expr::Const(-1.0)), a.clone());
                        let neg_b = Expr::Mul(Box::new(Expr::Const(-1.0)), b.clone());
                        flatten_add(&neg_a, out);
                        flatten_add(&neg_b, out);
                    }
                    _ => out.push(expr.clone()),
                }
            } else if let Expr::Const(-1.0) = rhs.as_ref() {
                match lhs.as_ref() {
                    Expr::Add(a, b) => {
                        let neg_a = Expr::Mul(Box::new(Expr::Const(-1.0)), a.clone());
                        let neg_b = Expr::Mul(Box::new(Expr::Const(-1.0)), b.clone());
                        flatten_add(&neg_a, out);
                        flatten_add(&neg_b, out);
                    }
                    _ => out.push(expr.clone()),
                }
            } else {
                out.push(expr.clone());
            }
        }
        _ => out.push(expr.clone()),
    }
}

fn flatten_mul(expr: &Expr, out: &mut Vec<Expr>) {
    match expr {
        Expr::Mul(a, b) => {
            flatten_mul(a, out);
            flatten_mul(b, out);
        }
        _ => out.push(expr.clone()),
    }
}

/// Splits a term into (monomial, coefficient). Non-polynomial terms report a
/// zero coefficient, which the caller treats as "do not touch this sum".
fn extract_monomial(expr: &Expr) -> (MonomialKey, f64) {
    match expr {
        Expr::Const(c) => (MonomialKey(BTreeMap::new()), *c),
        Expr::Var(v) => {
            let mut m = BTreeMap::new();
            m.insert(v.clone(), 1);
            (MonomialKey(m), 1.0)
        }
        Expr::Mul(lhs, rhs) => match (lhs.as_ref(), rhs.as_ref()) {
            (Expr::Const(-1.0), other) | (other, Expr::Const(-1.0)) => {
                let (mon, coeff) = extract_monomial(other);
                (mon, -coeff)
            }
            (Expr::Const(c), other) | (other, Expr::Const(c)) => {
                let (mon, coeff) = extract_monomial(other);
                (mon, c * coeff)
            }
            _ => {
                let mut factors = Vec::new();
                flatten_mul(expr, &mut factors);
                let mut coeff = 1.0;
                let mut map = BTreeMap::new();
                let mut has_non_poly = false;

                for f in factors {
                    match f {
                        Expr::Const(c) => coeff *= c,
                        Expr::Var(v) => *map.entry(v).or_insert(0) += 1,
                        Expr::Pow(base, exp) => match (*base, *exp) {
                            (Expr::Var(v), Expr::Const(n)) if n.fract() == 0.0 => {
                                *map.entry(v).or_insert(0) += n as i32;
                            }
                            _ => has_non_poly = true,
                        },
                        _ => has_non_poly = true,
                    }
                }

                if has_non_poly {
                    (MonomialKey(BTreeMap::new()), 0.0)
                } else {
                    (MonomialKey(map), coeff)
                }
            }
        },
        Expr::Pow(base, exp) => match (base.as_ref(), exp.as_ref()) {
            (Expr::Var(v), Expr::Const(n)) if n.fract() == 0.0 => {
                let mut m = BTreeMap::new();
                m.insert(v.clone(), *n as i32);
                (MonomialKey(m), 1.0)
            }
            _ => (MonomialKey(BTreeMap::new()), 0.0),
        },
        _ => (MonomialKey(BTreeMap::new()), 0.0),
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::symbolic_engine::Expr;

    fn var(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    #[test]
    fn test_constant_folding() {
        let expr = Expr::parse_expression("2 + 3*4");
        assert_eq!(expr.simplify(), Expr::Const(14.0));
    }

    #[test]
    fn test_additive_identity() {
        let expr = Expr::Add(Box::new(var("x")), Box::new(Expr::Const(0.0)));
        assert_eq!(expr.simplify(), var("x"));
    }

    #[test]
    fn test_multiplicative_identities() {
        let x = var("x");
        let one = Expr::Mul(Box::new(x.clone()), Box::new(Expr::Const(1.0)));
        let zero = Expr::Mul(Box::new(x.clone()), Box::new(Expr::Const(0.0)));
        assert_eq!(one.simplify(), x);
        assert_eq!(zero.simplify(), Expr::Const(0.0));
    }

    #[test]
    fn test_self_subtraction_cancels() {
        let expr = Expr::parse_expression("(x + 1) - (x + 1)");
        assert_eq!(expr.simplify(), Expr::Const(0.0));
    }

    #[test]
    fn test_like_terms_collect() {
        let expr = Expr::parse_expression("3*x + 2*x");
        let simplified = expr.simplify();
        let f = simplified.lambdify1D();
        assert_eq!(f(2.0), 10.0);
        // and the tree really collapsed to one term
        assert!(!matches!(simplified, Expr::Add(_, _)));
    }

    #[test]
    fn test_var_times_var_becomes_square() {
        let expr = Expr::Mul(Box::new(var("x")), Box::new(var("x")));
        assert_eq!(
            expr.simplify(),
            Expr::Pow(Box::new(var("x")), Box::new(Expr::Const(2.0)))
        );
    }

    #[test]
    fn test_power_of_power() {
        let expr = Expr::parse_expression("(x^2)^3");
        assert_eq!(
            expr.simplify(),
            Expr::Pow(Box::new(var("x")), Box::new(Expr::Const(6.0)))
        );
    }

    #[test]
    fn test_power_identities() {
        let one = Expr::parse_expression("x^0");
        let same = Expr::parse_expression("x^1");
        assert_eq!(one.simplify(), Expr::Const(1.0));
        assert_eq!(same.simplify(), var("x"));
    }

    #[test]
    fn test_special_values_fold() {
        assert_eq!(Expr::parse_expression("sin(0)").simplify(), Expr::Const(0.0));
        assert_eq!(Expr::parse_expression("cos(0)").simplify(), Expr::Const(1.0));
        assert_eq!(Expr::parse_expression("exp(0)").simplify(), Expr::Const(1.0));
        assert_eq!(Expr::parse_expression("ln(1)").simplify(), Expr::Const(0.0));
    }

    #[test]
    fn test_non_polynomial_sum_preserved() {
        let expr = Expr::parse_expression("sin(x) + cos(x)");
        let simplified = expr.simplify();
        assert_eq!(simplified, expr);
    }

    #[test]
    fn test_fractional_powers_not_collected() {
        // sqrt(x) is not a monomial, the sum must survive untouched
        let expr = Expr::parse_expression("sqrt(x) + sqrt(x)");
        let f = expr.simplify().lambdify1D();
        assert_eq!(f(4.0), 4.0);
    }

    #[test]
    fn test_negative_powers_collect() {
        let expr = Expr::parse_expression("x^(-2) + x^(-2)");
        let f = expr.simplify().lambdify1D();
        assert_eq!(f(2.0), 0.5);
    }

    #[test]
    fn test_derivative_of_square_collapses() {
        // d(x^2)/dx builds (2 * x^1) * 1, which should settle to 2*x
        let df = Expr::parse_expression("x^2").diff("x").simplify();
        assert_eq!(
            df,
            Expr::Mul(Box::new(Expr::Const(2.0)), Box::new(var("x")))
        );
    }

    #[test]
    fn test_fixpoint_handles_layered_identities() {
        let x = var("x");
        let expr = Expr::Sub(
            Box::new(Expr::Mul(
                Box::new(Expr::Add(Box::new(x.clone()), Box::new(Expr::Const(0.0)))),
                Box::new(Expr::Const(1.0)),
            )),
            Box::new(Expr::Const(0.0)),
        );
        assert_eq!(expr.simplify(), x);
    }

    #[test]
    fn test_simplify_numbers_leaves_variables() {
        let expr = Expr::parse_expression("x + 2*3");
        let folded = expr.simplify_numbers();
        assert_eq!(
            folded,
            Expr::Add(Box::new(var("x")), Box::new(Expr::Const(6.0)))
        );
    }
}
