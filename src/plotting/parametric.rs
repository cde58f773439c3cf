//! Parametric curves: (x(t), y(t)) in the plane and (x(t), y(t), z(t)) in
//! space. The 2D path reuses the line-plot renderer, the 3D path goes through
//! gnuplot.

use crate::analysis::sampler::sample_parametric;
use crate::plotting::plots::{Series, plot_single};
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::linspace;
use gnuplot::{AxesCommon, Caption, Color, Figure, RGBString};
use nalgebra::DVector;
use std::error::Error;

pub const PARAMETRIC_POINTS: usize = 1000;

/// Renders the planar curve (x(t), y(t)) for t in [tmin, tmax].
pub fn plot_parametric2d(
    fx: &Expr,
    fy: &Expr,
    tmin: f64,
    tmax: f64,
    title: &str,
    path: &str,
) -> Result<(), Box<dyn Error>> {
    let (xs, ys) = sample_parametric(fx, fy, tmin, tmax, PARAMETRIC_POINTS);
    let series = Series::new(
        DVector::from_vec(xs),
        DVector::from_vec(ys),
        format!("({}, {})", fx, fy),
    );
    plot_single(&series, title, path)
}

fn sample_curve3d(
    fx: &Expr,
    fy: &Expr,
    fz: &Expr,
    tmin: f64,
    tmax: f64,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let ts = linspace(tmin, tmax, PARAMETRIC_POINTS);
    let x_fn = fx.lambdify1D();
    let y_fn = fy.lambdify1D();
    let z_fn = fz.lambdify1D();
    let xs: Vec<f64> = ts.iter().map(|&t| x_fn(t)).collect();
    let ys: Vec<f64> = ts.iter().map(|&t| y_fn(t)).collect();
    let zs: Vec<f64> = ts.iter().map(|&t| z_fn(t)).collect();
    (xs, ys, zs)
}

/// Renders the space curve (x(t), y(t), z(t)) for t in [tmin, tmax].
pub fn plot_parametric3d(
    fx: &Expr,
    fy: &Expr,
    fz: &Expr,
    tmin: f64,
    tmax: f64,
    title: &str,
    path: &str,
) -> Result<(), Box<dyn Error>> {
    let (xs, ys, zs) = sample_curve3d(fx, fy, fz, tmin, tmax);

    let mut fg = Figure::new();
    fg.axes3d()
        .set_title(title, &[])
        .set_x_label("x", &[])
        .set_y_label("y", &[])
        .set_z_label("z", &[])
        .lines(&xs, &ys, &zs, &[Caption("r(t)"), Color(RGBString("blue"))]);
    fg.save_to_png(path, 800, 600)
        .map_err(|e| format!("gnuplot: {}", e))?;
    log::info!("saved plot to {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_helix_starts_on_the_x_axis() {
        let fx = Expr::parse_expression("cos(t)");
        let fy = Expr::parse_expression("sin(t)");
        let fz = Expr::parse_expression("t");
        let (xs, ys, zs) = sample_curve3d(&fx, &fy, &fz, 0.0, 12.0);
        assert_eq!(xs.len(), PARAMETRIC_POINTS);
        assert_relative_eq!(xs[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(ys[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(zs[0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_helix_keeps_unit_radius() {
        let fx = Expr::parse_expression("cos(t)");
        let fy = Expr::parse_expression("sin(t)");
        let fz = Expr::parse_expression("t");
        let (xs, ys, zs) = sample_curve3d(&fx, &fy, &fz, 0.0, 12.0);
        for ((x, y), z) in xs.iter().zip(&ys).zip(&zs) {
            assert_relative_eq!((x * x + y * y).sqrt(), 1.0, epsilon = 1e-9);
            assert!(z.is_finite());
        }
        assert_relative_eq!(*zs.last().unwrap(), 12.0, epsilon = 1e-9);
    }
}
