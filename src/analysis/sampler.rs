//! Uniform sampling of expressions over plot windows.
//!
//! 1D curves come back as nalgebra vectors; the 2D grids used by the complex,
//! implicit and surface modes are filled row-parallel with rayon. Evaluation
//! failures stay in the data as NaN and the renderers treat them as gaps.

use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::linspace;
use nalgebra::DVector;
use num_complex::Complex64;
use rayon::prelude::*;

/// Samples `expr` at `points` evenly spaced positions in [lower, upper].
pub fn sample_function(
    expr: &Expr,
    lower: f64,
    upper: f64,
    points: usize,
) -> (DVector<f64>, DVector<f64>) {
    let f = expr.lambdify1D();
    let xs = linspace(lower, upper, points.max(2));
    let ys: Vec<f64> = xs.iter().map(|&x| f(x)).collect();
    (DVector::from_vec(xs), DVector::from_vec(ys))
}

/// Samples a parametric pair (x(t), y(t)) over [tmin, tmax].
pub fn sample_parametric(
    fx: &Expr,
    fy: &Expr,
    tmin: f64,
    tmax: f64,
    points: usize,
) -> (Vec<f64>, Vec<f64>) {
    let fx = fx.lambdify1D();
    let fy = fy.lambdify1D();
    let ts = linspace(tmin, tmax, points.max(2));
    let xs: Vec<f64> = ts.iter().map(|&t| fx(t)).collect();
    let ys: Vec<f64> = ts.iter().map(|&t| fy(t)).collect();
    (xs, ys)
}

/// Evaluates `expr` over a complex rectangle, row-major with `resolution`
/// rows (imaginary axis) and columns (real axis).
pub fn sample_complex_grid(
    expr: &Expr,
    re_min: f64,
    re_max: f64,
    im_min: f64,
    im_max: f64,
    resolution: usize,
) -> Vec<Vec<Complex64>> {
    let f = expr.lambdify1D_complex();
    let res = linspace(re_min, re_max, resolution.max(2));
    let ims = linspace(im_min, im_max, resolution.max(2));
    ims.par_iter()
        .map(|&im| {
            res.iter()
                .map(|&re| f(Complex64::new(re, im)))
                .collect()
        })
        .collect()
}

/// Evaluates a two-variable expression over [xmin, xmax] × [ymin, ymax],
/// row-major with rows along y.
pub fn sample_scalar_grid(
    expr: &Expr,
    x_name: &str,
    y_name: &str,
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
    resolution: usize,
) -> Vec<Vec<f64>> {
    let f = expr.lambdify2D(x_name, y_name);
    let xs = linspace(xmin, xmax, resolution.max(2));
    let ys = linspace(ymin, ymax, resolution.max(2));
    ys.par_iter()
        .map(|&y| xs.iter().map(|&x| f(x, y)).collect())
        .collect()
}
