#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use funcviz::symbolic::symbolic_engine::Expr;
/// let input = "sin(x)*exp(-x^2)";
/// let parsed_expression = Expr::parse_expression(input);
/// println!(" parsed_expression {}", parsed_expression);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds the symbolic expression tree
/// 2) constructs expressions with operator overloading and helper constructors
/// 3) substitutes and queries variables
///# Example#
/// ```
/// use funcviz::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let f = x.clone() * x.clone() + Expr::Const(1.0);
/// println!("f = {}", f);
/// let f_at_2 = f.set_variable("x", 2.0);
/// println!("f(2) = {}", f_at_2);
/// ```
pub mod symbolic_engine;
/// analytical differentiation, n-th derivatives and Taylor expansion
///# Example#
/// ```
/// use funcviz::symbolic::symbolic_engine::Expr;
/// let f = Expr::parse_expression("sin(x)");
/// let df_dx = f.diff("x");
/// println!("df_dx = {}", df_dx);
/// let taylor = f.taylor_series1D("x", 0.0, 5);
/// println!("taylor = {}", taylor);
/// ```
pub mod symbolic_diff;
/// rule-based indefinite integration, definite integrals and Gauss-Legendre quadrature
pub mod symbolic_integration;
/// turns a symbolic expression into a Rust closure: 1D, 2D and complex-valued flavors
///# Example#
/// ```
/// use funcviz::symbolic::symbolic_engine::Expr;
/// let f = Expr::parse_expression("x+exp(x)");
/// let f_num = f.lambdify1D();
/// println!("f(1) = {}", f_num(1.0));
/// ```
pub mod symbolic_lambdify;
/// algebraic simplification: constant folding and identity rules
pub mod symbolic_simplify;
/// exact solving of polynomial equations with a sentinel for unsupported classes
pub mod symbolic_solve;
/// grid helpers (linspace)
pub mod utils;
