//! 3D surface rendering through gnuplot.
//!
//! The single-variable curve is extruded along the second axis: every row of
//! the height matrix carries the same f(x) value, matching the 2D analysis
//! exactly. Requires a gnuplot binary on PATH.

use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::linspace;
use gnuplot::{AxesCommon, Figure};
use std::error::Error;

pub const SURFACE_RESOLUTION: usize = 50;

/// Renders f(x) as a surface z(x, y) = f(x) over a square window.
pub fn plot_surface(
    expr: &Expr,
    title: &str,
    xmin: f64,
    xmax: f64,
    path: &str,
) -> Result<(), Box<dyn Error>> {
    let f = expr.lambdify1D();
    let xs = linspace(xmin, xmax, SURFACE_RESOLUTION);

    // row-major, x along rows: each row is one x value repeated across y
    let mut z = Vec::with_capacity(SURFACE_RESOLUTION * SURFACE_RESOLUTION);
    for &x in &xs {
        let value = f(x);
        for _ in 0..SURFACE_RESOLUTION {
            z.push(value);
        }
    }

    let mut fg = Figure::new();
    fg.axes3d()
        .set_title(title, &[])
        .set_x_label("x", &[])
        .set_y_label("y", &[])
        .set_z_label("z", &[])
        .surface(
            z.iter().copied(),
            SURFACE_RESOLUTION,
            SURFACE_RESOLUTION,
            Some((xmin, xmin, xmax, xmax)),
            &[],
        );
    fg.save_to_png(path, 800, 600)
        .map_err(|e| format!("gnuplot: {}", e))?;
    log::info!("saved plot to {}", path);
    Ok(())
}
