//! Implicit curve rendering: the zero level set of f(x, y).
//!
//! Classic marching squares: every grid cell contributes line segments where
//! the sign of f flips along its edges, with the crossing position found by
//! linear interpolation. Cells touching a non-finite sample are skipped.

use crate::analysis::sampler::sample_scalar_grid;
use crate::symbolic::symbolic_engine::Expr;
use plotters::prelude::*;
use std::error::Error;

pub const IMPLICIT_RESOLUTION: usize = 400;
const HEATMAP_SIZE: (u32, u32) = (800, 800);

type Point = (f64, f64);
type Segment = (Point, Point);

fn edge_crossing(v0: f64, v1: f64, p0: Point, p1: Point) -> Option<Point> {
    // zeros count as positive so a contour through a grid node is not doubled
    let s0 = v0 < 0.0;
    let s1 = v1 < 0.0;
    if s0 == s1 {
        return None;
    }
    let t = v0 / (v0 - v1);
    Some((p0.0 + t * (p1.0 - p0.0), p0.1 + t * (p1.1 - p0.1)))
}

/// Extracts zero-level segments from a row-major grid (rows along y).
fn marching_squares(
    grid: &[Vec<f64>],
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
) -> Vec<Segment> {
    let rows = grid.len();
    let cols = grid[0].len();
    let dx = (xmax - xmin) / (cols - 1) as f64;
    let dy = (ymax - ymin) / (rows - 1) as f64;
    let mut segments = Vec::new();

    for i in 0..rows - 1 {
        for j in 0..cols - 1 {
            let v00 = grid[i][j];
            let v10 = grid[i][j + 1];
            let v01 = grid[i + 1][j];
            let v11 = grid[i + 1][j + 1];
            if ![v00, v10, v01, v11].iter().all(|v| v.is_finite()) {
                continue;
            }

            let x0 = xmin + j as f64 * dx;
            let y0 = ymin + i as f64 * dy;
            let p00 = (x0, y0);
            let p10 = (x0 + dx, y0);
            let p01 = (x0, y0 + dy);
            let p11 = (x0 + dx, y0 + dy);

            let mut crossings: Vec<Point> = Vec::with_capacity(4);
            for crossing in [
                edge_crossing(v00, v10, p00, p10),
                edge_crossing(v10, v11, p10, p11),
                edge_crossing(v11, v01, p11, p01),
                edge_crossing(v01, v00, p01, p00),
            ]
            .into_iter()
            .flatten()
            {
                crossings.push(crossing);
            }

            match crossings.len() {
                2 => segments.push((crossings[0], crossings[1])),
                4 => {
                    // saddle cell, pair the crossings in traversal order
                    segments.push((crossings[0], crossings[1]));
                    segments.push((crossings[2], crossings[3]));
                }
                _ => {}
            }
        }
    }
    segments
}

/// Renders the curve f(x, y) = 0 over the window.
pub fn plot_implicit(
    expr: &Expr,
    title: &str,
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
    path: &str,
) -> Result<(), Box<dyn Error>> {
    let grid = sample_scalar_grid(expr, "x", "y", xmin, xmax, ymin, ymax, IMPLICIT_RESOLUTION);
    let segments = marching_squares(&grid, xmin, xmax, ymin, ymax);
    if segments.is_empty() {
        log::warn!("no zero level set of the expression inside the window");
    }

    let root = BitMapBackend::new(path, HEATMAP_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(xmin..xmax, ymin..ymax)?;
    chart.configure_mesh().draw()?;

    chart.draw_series(
        segments
            .iter()
            .map(|&(p0, p1)| PathElement::new(vec![p0, p1], &BLUE)),
    )?;

    root.present()?;
    log::info!("saved plot to {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_edge_crossing_interpolates_linearly() {
        let crossing = edge_crossing(-1.0, 3.0, (0.0, 0.0), (1.0, 0.0)).unwrap();
        assert_relative_eq!(crossing.0, 0.25, epsilon = 1e-12);
        assert_relative_eq!(crossing.1, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_edge_without_sign_change_has_no_crossing() {
        assert!(edge_crossing(1.0, 2.0, (0.0, 0.0), (1.0, 0.0)).is_none());
        assert!(edge_crossing(-1.0, -2.0, (0.0, 0.0), (1.0, 0.0)).is_none());
    }

    #[test]
    fn test_unit_circle_segments_lie_on_the_circle() {
        let f = Expr::parse_expression("x^2 + y^2 - 1");
        let grid = sample_scalar_grid(&f, "x", "y", -2.0, 2.0, -2.0, 2.0, 200);
        let segments = marching_squares(&grid, -2.0, 2.0, -2.0, 2.0);
        assert!(!segments.is_empty());
        for (p0, p1) in segments {
            for (x, y) in [p0, p1] {
                assert_relative_eq!((x * x + y * y).sqrt(), 1.0, epsilon = 0.05);
            }
        }
    }

    #[test]
    fn test_empty_level_set_produces_no_segments() {
        let f = Expr::parse_expression("x^2 + y^2 + 1");
        let grid = sample_scalar_grid(&f, "x", "y", -2.0, 2.0, -2.0, 2.0, 100);
        assert!(marching_squares(&grid, -2.0, 2.0, -2.0, 2.0).is_empty());
    }

    #[test]
    fn test_line_level_set_matches_the_line() {
        // y = x renders as the diagonal
        let f = Expr::parse_expression("y - x");
        let grid = sample_scalar_grid(&f, "x", "y", -1.0, 1.0, -1.0, 1.0, 100);
        let segments = marching_squares(&grid, -1.0, 1.0, -1.0, 1.0);
        assert!(!segments.is_empty());
        for (p0, p1) in segments {
            assert_relative_eq!(p0.1, p0.0, epsilon = 0.05);
            assert_relative_eq!(p1.1, p1.0, epsilon = 0.05);
        }
    }
}
