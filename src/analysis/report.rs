//! Textual per-expression report and the plot annotations derived from it.
//!
//! Everything here is program output (println), not logging; the tables go
//! through tabled the same way the solver statistics do.

use crate::analysis::extrema::{CriticalPoint, PointKind, critical_points, inflection_points};
use crate::plotting::plots::{Marker, MarkerShape};
use crate::symbolic::symbolic_engine::Expr;
use num_complex::Complex64;
use tabled::{builder::Builder, settings::Style};

const BANNER_WIDTH: usize = 70;
/// The report labels the Taylor block "order 6"; the polynomial itself keeps
/// terms through x^5.
const TAYLOR_ORDER: usize = 6;
const QUAD_DEGREE: usize = 64;

pub fn banner(title: &str) {
    let rule = "=".repeat(BANNER_WIDTH);
    println!("\n{}", rule);
    println!("{}", title);
    println!("{}", rule);
}

fn format_complex(z: Complex64) -> String {
    format!("{:.6}{:+.6}i", z.re, z.im)
}

fn critical_point_table(points: &[CriticalPoint], f: &dyn Fn(f64) -> f64) -> String {
    let mut builder = Builder::default();
    builder.push_record(["x", "f(x)", "kind"]);
    for point in points {
        if point.is_real() {
            let x = point.location.re;
            builder.push_record([
                format!("{:.6}", x),
                format!("{:.6}", f(x)),
                point.kind.to_string(),
            ]);
        } else {
            builder.push_record([
                format_complex(point.location),
                "-".to_string(),
                point.kind.to_string(),
            ]);
        }
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

fn inflection_table(xs: &[f64], f: &dyn Fn(f64) -> f64) -> String {
    let mut builder = Builder::default();
    builder.push_record(["x", "f(x)"]);
    for &x in xs {
        builder.push_record([format!("{:.6}", x), format!("{:.6}", f(x))]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

/// Prints the full symbolic/numeric summary of one expression to stdout.
pub fn print_report(expr: &Expr, var: &str, lower: f64, upper: f64) {
    banner(&format!("analysis of {}", expr));
    println!("f({}) = {}", var, expr);

    let derivative = expr.diff(var).simplify();
    println!("f'({}) = {}", var, derivative);

    match expr.integrate(var) {
        Ok(antiderivative) => {
            println!("indefinite integral: {} + C", antiderivative.simplify())
        }
        Err(e) => println!("unable to integrate: {}", e),
    }

    let f = expr.lambdify1D();
    if f(0.0).is_finite() {
        let taylor = expr.taylor_series1D(var, 0.0, TAYLOR_ORDER - 1);
        println!("Taylor series (order {}) around 0: {}", TAYLOR_ORDER, taylor);
    } else {
        println!("Taylor series around 0: undefined (f(0) is not finite)");
    }

    match expr
        .definite_integrate(var, lower, upper)
        .or_else(|_| expr.quad(lower, upper, QUAD_DEGREE))
    {
        Ok(value) => println!(
            "definite integral over [{}, {}]: {:.6}",
            lower, upper, value
        ),
        Err(e) => println!("definite integral over [{}, {}]: {}", lower, upper, e),
    }

    let criticals = critical_points(expr, var, lower, upper);
    if criticals.is_empty() {
        println!("no critical points found");
    } else {
        println!("critical points:");
        println!("{}", critical_point_table(&criticals, f.as_ref()));
    }

    let inflections = inflection_points(expr, var, lower, upper);
    if inflections.is_empty() {
        println!("no inflection points in [{}, {}]", lower, upper);
    } else {
        println!("inflection points:");
        println!("{}", inflection_table(&inflections, f.as_ref()));
    }
}

/// Builds the plot annotations: red circles on the extrema, green squares on
/// the inflection points. Points outside the window are dropped; a non-finite
/// ordinate pins the marker to the axis.
pub fn collect_markers(expr: &Expr, var: &str, lower: f64, upper: f64) -> Vec<Marker> {
    let f = expr.lambdify1D();
    let pin = |y: f64| if y.is_finite() { y } else { 0.0 };
    let mut markers = Vec::new();

    for point in critical_points(expr, var, lower, upper) {
        if !matches!(point.kind, PointKind::Min | PointKind::Max) {
            continue;
        }
        let x = point.location.re;
        if x < lower || x > upper {
            continue;
        }
        let y = pin(f(x));
        markers.push(Marker {
            x,
            y,
            label: format!("{} ({:.2}, {:.2})", point.kind, x, y),
            shape: MarkerShape::Circle,
        });
    }

    for x in inflection_points(expr, var, lower, upper) {
        if x < lower || x > upper {
            continue;
        }
        let y = pin(f(x));
        markers.push(Marker {
            x,
            y,
            label: format!("inflection ({:.2}, {:.2})", x, y),
            shape: MarkerShape::Square,
        });
    }
    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_markers_for_cubic_with_two_extrema() {
        let expr = Expr::parse_expression("x^3 - 3*x");
        let markers = collect_markers(&expr, "x", -5.0, 5.0);

        let circles: Vec<_> = markers
            .iter()
            .filter(|m| m.shape == MarkerShape::Circle)
            .collect();
        let squares: Vec<_> = markers
            .iter()
            .filter(|m| m.shape == MarkerShape::Square)
            .collect();
        assert_eq!(circles.len(), 2);
        assert_eq!(squares.len(), 1);

        let max = circles.iter().find(|m| m.label.starts_with("max")).unwrap();
        assert_relative_eq!(max.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(max.y, 2.0, epsilon = 1e-6);
        let min = circles.iter().find(|m| m.label.starts_with("min")).unwrap();
        assert_relative_eq!(min.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(min.y, -2.0, epsilon = 1e-6);
        assert_relative_eq!(squares[0].x, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_markers_outside_window_are_dropped() {
        let expr = Expr::parse_expression("(x - 10)^2");
        let markers = collect_markers(&expr, "x", -5.0, 5.0);
        assert!(markers.is_empty());
    }

    #[test]
    fn test_saddle_gets_no_circle() {
        let expr = Expr::parse_expression("x^3");
        let markers = collect_markers(&expr, "x", -5.0, 5.0);
        assert!(markers.iter().all(|m| m.shape == MarkerShape::Square));
        assert_eq!(markers.len(), 1);
    }

    #[test]
    fn test_format_complex() {
        assert_eq!(format_complex(Complex64::new(1.5, -2.0)), "1.500000-2.000000i");
        assert_eq!(format_complex(Complex64::new(0.0, 1.0)), "0.000000+1.000000i");
    }

    #[test]
    fn test_critical_point_table_lists_kinds() {
        let points = vec![
            CriticalPoint {
                location: Complex64::new(0.0, 0.0),
                kind: PointKind::Min,
            },
            CriticalPoint {
                location: Complex64::new(1.0, 2.0),
                kind: PointKind::Complex,
            },
        ];
        let table = critical_point_table(&points, &|x| x * x);
        assert!(table.contains("min"));
        assert!(table.contains("complex"));
        assert!(table.contains("1.000000+2.000000i"));
    }

    #[test]
    fn test_report_survives_awkward_expressions() {
        // not integrable in closed form, derivative not polynomial
        print_report(&Expr::parse_expression("sin(x^2)"), "x", -5.0, 5.0);
        // f(0) not finite, NaN over half the window
        print_report(&Expr::parse_expression("ln(x)"), "x", -5.0, 5.0);
    }
}
