//! Parser from strings like "sin(x)*exp(-x^2)" into the symbolic tree.
//!
//! Recursive descent over the operator hierarchy: the string is split at the
//! rightmost top-level `+`/`-` (outside brackets), then at the rightmost
//! `*`/`/`, then at the leftmost `^` (power is right-associative), and what
//! remains is an atom: a function call, a bracketed subexpression, a number,
//! a named constant or a variable. Python-style `**` powers are accepted,
//! `pi` and `e` fold to constants, and the usual aliases (`tan`, `cot`,
//! `asin`, ...) map onto the engine's function set.

use crate::symbolic::symbolic_engine::Expr;
use std::f64::consts::{E, PI};

impl Expr {
    /// Parses an expression string, panicking on malformed input.
    ///
    /// Convenience for demos and tests; the pipeline itself goes through
    /// [`parse_expression_func`] and reports errors instead.
    pub fn parse_expression(input: &str) -> Expr {
        match parse_expression_func(input) {
            Ok(expr) => expr,
            Err(msg) => panic!("failed to parse expression '{}': {}", input, msg),
        }
    }
}

/// Parses an expression string into a symbolic tree.
pub fn parse_expression_func(input: &str) -> Result<Expr, String> {
    let normalized = input.replace("**", "^");
    let cleaned: String = normalized.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Err("empty expression".to_string());
    }
    check_brackets(&cleaned)?;
    parse_sum(&cleaned)
}

fn check_brackets(s: &str) -> Result<(), String> {
    let mut depth: i32 = 0;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(format!("unbalanced brackets in '{}'", s));
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(format!("unbalanced brackets in '{}'", s));
    }
    Ok(())
}

/// Strips brackets wrapping the whole string: "((x+y))" -> "x+y".
fn strip_outer_brackets(s: &str) -> &str {
    let mut current = s;
    loop {
        let bytes = current.as_bytes();
        if bytes.len() < 2 || bytes[0] != b'(' || bytes[bytes.len() - 1] != b')' {
            return current;
        }
        let mut depth = 0;
        for (i, c) in current.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    // closed before the end: the outer brackets do not match each other
                    if depth == 0 && i != current.len() - 1 {
                        return current;
                    }
                }
                _ => {}
            }
        }
        current = &current[1..current.len() - 1];
        if current.is_empty() {
            return current;
        }
    }
}

/// True when the `+`/`-` at this position is a sign, not a binary operator.
fn is_unary_position(s: &str, idx: usize, prev: Option<char>) -> bool {
    if idx == 0 {
        return true;
    }
    match prev {
        Some(p) if matches!(p, '+' | '-' | '*' | '/' | '^' | '(') => true,
        // exponent of a float literal like 1e-3
        Some('e') | Some('E') => {
            let before: Vec<char> = s[..idx - 1].chars().collect();
            matches!(before.last(), Some(c) if c.is_ascii_digit() || *c == '.')
        }
        _ => false,
    }
}

fn rightmost_top_level_add_sub(s: &str) -> Option<usize> {
    let mut depth = 0;
    let mut found = None;
    let mut prev: Option<char> = None;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            '+' | '-' if depth == 0 => {
                if !is_unary_position(s, i, prev) {
                    found = Some(i);
                }
            }
            _ => {}
        }
        prev = Some(c);
    }
    found
}

fn rightmost_top_level_mul_div(s: &str) -> Option<usize> {
    let mut depth = 0;
    let mut found = None;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            '*' | '/' if depth == 0 && i != 0 => found = Some(i),
            _ => {}
        }
    }
    found
}

fn leftmost_top_level_caret(s: &str) -> Option<usize> {
    let mut depth = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            '^' if depth == 0 && i != 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn parse_sum(s: &str) -> Result<Expr, String> {
    let s = strip_outer_brackets(s);
    if s.is_empty() {
        return Err("empty subexpression".to_string());
    }
    if let Some(i) = rightmost_top_level_add_sub(s) {
        let op = s.as_bytes()[i] as char;
        let lhs = parse_sum(&s[..i])?;
        let rhs = parse_product(&s[i + 1..])?;
        return Ok(match op {
            '+' => lhs + rhs,
            _ => lhs - rhs,
        });
    }
    if let Some(rest) = s.strip_prefix('-') {
        return Ok(Expr::Const(-1.0) * parse_sum(rest)?);
    }
    if let Some(rest) = s.strip_prefix('+') {
        return parse_sum(rest);
    }
    parse_product(s)
}

fn parse_product(s: &str) -> Result<Expr, String> {
    let s = strip_outer_brackets(s);
    if s.is_empty() {
        return Err("empty subexpression".to_string());
    }
    if let Some(i) = rightmost_top_level_mul_div(s) {
        let op = s.as_bytes()[i] as char;
        let lhs = parse_product(&s[..i])?;
        // the right factor may carry a sign: x*-y
        let rhs = parse_sum(&s[i + 1..])?;
        return Ok(match op {
            '*' => lhs * rhs,
            _ => lhs / rhs,
        });
    }
    parse_power(s)
}

fn parse_power(s: &str) -> Result<Expr, String> {
    let s = strip_outer_brackets(s);
    if s.is_empty() {
        return Err("empty subexpression".to_string());
    }
    if let Some(i) = leftmost_top_level_caret(s) {
        let base = parse_atom(&s[..i])?;
        let exponent = parse_sum(&s[i + 1..])?;
        return Ok(base.pow(exponent));
    }
    parse_atom(s)
}

fn parse_atom(s: &str) -> Result<Expr, String> {
    if s.is_empty() {
        return Err("empty subexpression".to_string());
    }
    // a bracketed group may hide any expression, e.g. the base of (x+y)^2
    let stripped = strip_outer_brackets(s);
    if stripped.len() != s.len() {
        return parse_sum(stripped);
    }
    if let Some(rest) = s.strip_prefix('-') {
        return Ok(Expr::Const(-1.0) * parse_atom(rest)?);
    }
    // function call: a name directly followed by a bracketed argument that
    // runs to the end of the atom
    if let Some(open) = s.find('(') {
        if s.ends_with(')') && open > 0 {
            let name = &s[..open];
            if name.chars().all(|c| c.is_ascii_alphabetic()) && brackets_match(&s[open..]) {
                let inner = parse_sum(&s[open + 1..s.len() - 1])?;
                return function_from_name(name, inner);
            }
        }
    }
    if let Ok(value) = s.parse::<f64>() {
        return Ok(Expr::Const(value));
    }
    match s {
        "pi" | "Pi" | "PI" => return Ok(Expr::Const(PI)),
        "e" | "E" => return Ok(Expr::Const(E)),
        _ => {}
    }
    let mut chars = s.chars();
    let valid_var = match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    };
    if valid_var {
        return Ok(Expr::Var(s.to_string()));
    }
    Err(format!("unable to parse '{}'", s))
}

/// True when the first '(' of the slice is closed by its final char.
fn brackets_match(s: &str) -> bool {
    let mut depth = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return i == s.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

fn function_from_name(name: &str, inner: Expr) -> Result<Expr, String> {
    let boxed = inner.boxed();
    let expr = match name {
        "exp" => Expr::Exp(boxed),
        "ln" | "log" => Expr::Ln(boxed),
        "sqrt" => Expr::Pow(boxed, Expr::Const(0.5).boxed()),
        "sin" => Expr::sin(boxed),
        "cos" => Expr::cos(boxed),
        "tg" | "tan" => Expr::tg(boxed),
        "ctg" | "cot" => Expr::ctg(boxed),
        "arcsin" | "asin" => Expr::arcsin(boxed),
        "arccos" | "acos" => Expr::arccos(boxed),
        "arctg" | "arctan" | "atan" => Expr::arctg(boxed),
        "arcctg" | "arccot" | "acot" => Expr::arcctg(boxed),
        _ => return Err(format!("unknown function '{}'", name)),
    };
    Ok(expr)
}
