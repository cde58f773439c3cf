//! Heatmaps of a function over the complex plane.
//!
//! The window [xmin, xmax] × [ymin, ymax] is read as re × im. Magnitude mode
//! compresses |f(z)| through m/(1+m) so poles saturate instead of washing out
//! the palette; phase mode wraps arg(f(z)) once around the hue circle.
//! Cells where the function fails to evaluate render black.

use crate::analysis::sampler::sample_complex_grid;
use crate::symbolic::symbolic_engine::Expr;
use num_complex::Complex64;
use plotters::prelude::*;
use std::f64::consts::TAU;
use std::error::Error;
use strum_macros::{Display, EnumString};

pub const COMPLEX_RESOLUTION: usize = 300;
const HEATMAP_SIZE: (u32, u32) = (800, 800);

/// Which scalar field of f(z) the heatmap shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ComplexPlotMode {
    Magnitude,
    Phase,
}

fn cell_color(z: Complex64, mode: ComplexPlotMode) -> HSLColor {
    if !z.re.is_finite() || !z.im.is_finite() {
        return HSLColor(0.0, 0.0, 0.0);
    }
    match mode {
        ComplexPlotMode::Magnitude => {
            let m = z.norm();
            let t = m / (1.0 + m);
            HSLColor(0.66 * (1.0 - t), 0.9, 0.5)
        }
        ComplexPlotMode::Phase => {
            let hue = z.arg() / TAU + 0.5;
            HSLColor(hue, 0.9, 0.5)
        }
    }
}

/// Renders the magnitude or phase heatmap of `expr` over the window.
#[allow(clippy::too_many_arguments)]
pub fn plot_complex_map(
    expr: &Expr,
    mode: ComplexPlotMode,
    title: &str,
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
    path: &str,
) -> Result<(), Box<dyn Error>> {
    let grid = sample_complex_grid(expr, xmin, xmax, ymin, ymax, COMPLEX_RESOLUTION);

    let root = BitMapBackend::new(path, HEATMAP_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(xmin..xmax, ymin..ymax)?;
    chart.configure_mesh().disable_mesh().draw()?;

    let cell_w = (xmax - xmin) / (COMPLEX_RESOLUTION - 1) as f64;
    let cell_h = (ymax - ymin) / (COMPLEX_RESOLUTION - 1) as f64;
    chart.draw_series(grid.iter().enumerate().flat_map(|(i, row)| {
        row.iter().enumerate().map(move |(j, &z)| {
            let x0 = xmin + j as f64 * cell_w;
            let y0 = ymin + i as f64 * cell_h;
            Rectangle::new(
                [(x0, y0), (x0 + cell_w, y0 + cell_h)],
                cell_color(z, mode).filled(),
            )
        })
    }))?;

    root.present()?;
    log::info!("saved plot to {}", path);
    Ok(())
}
