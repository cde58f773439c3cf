//! 2D curve rendering with plotters.
//!
//! A `Series` is a sampled curve plus its annotation markers. Non-finite
//! samples split the curve into segments so poles and log branches render as
//! gaps instead of vertical artifacts.

use nalgebra::DVector;
use plotters::prelude::*;
use std::error::Error;

const LINE_PLOT_SIZE: (u32, u32) = (1200, 675);

/// Shape of an annotation marker. Circles mark extrema (drawn red), squares
/// mark inflection points (drawn green).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Square,
}

/// A labelled point drawn on top of a curve.
#[derive(Debug, Clone)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub shape: MarkerShape,
}

/// One sampled curve ready for rendering.
#[derive(Debug, Clone)]
pub struct Series {
    pub x: DVector<f64>,
    pub y: DVector<f64>,
    pub label: String,
    pub markers: Vec<Marker>,
}

impl Series {
    pub fn new(x: DVector<f64>, y: DVector<f64>, label: impl Into<String>) -> Self {
        Series {
            x,
            y,
            label: label.into(),
            markers: Vec::new(),
        }
    }
}

/// Splits a sampled curve into runs of finite points.
fn finite_segments(x: &DVector<f64>, y: &DVector<f64>) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for (&xv, &yv) in x.iter().zip(y.iter()) {
        if xv.is_finite() && yv.is_finite() {
            current.push((xv, yv));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Axis ranges covering every finite sample and marker, with a small pad.
fn padded_bounds(series: &[Series]) -> ((f64, f64), (f64, f64)) {
    let mut xmin = f64::INFINITY;
    let mut xmax = f64::NEG_INFINITY;
    let mut ymin = f64::INFINITY;
    let mut ymax = f64::NEG_INFINITY;

    for s in series {
        for (&xv, &yv) in s.x.iter().zip(s.y.iter()) {
            if xv.is_finite() && yv.is_finite() {
                xmin = xmin.min(xv);
                xmax = xmax.max(xv);
                ymin = ymin.min(yv);
                ymax = ymax.max(yv);
            }
        }
        for m in &s.markers {
            ymin = ymin.min(m.y);
            ymax = ymax.max(m.y);
        }
    }

    if !xmin.is_finite() || !xmax.is_finite() {
        (xmin, xmax) = (-1.0, 1.0);
    }
    if !ymin.is_finite() || !ymax.is_finite() {
        (ymin, ymax) = (-1.0, 1.0);
    }
    let x_pad = ((xmax - xmin).abs()).max(1e-6) * 0.05;
    let y_pad = ((ymax - ymin).abs()).max(1e-6) * 0.08;
    ((xmin - x_pad, xmax + x_pad), (ymin - y_pad, ymax + y_pad))
}

/// Renders one curve with its extrema/inflection markers.
pub fn plot_single(series: &Series, title: &str, path: &str) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, LINE_PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let ((xmin, xmax), (ymin, ymax)) = padded_bounds(std::slice::from_ref(series));

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(xmin..xmax, ymin..ymax)?;
    chart.configure_mesh().draw()?;

    for segment in finite_segments(&series.x, &series.y) {
        chart.draw_series(LineSeries::new(segment, &Palette99::pick(0)))?;
    }

    chart.draw_series(
        series
            .markers
            .iter()
            .filter(|m| m.shape == MarkerShape::Circle)
            .map(|m| {
                EmptyElement::at((m.x, m.y))
                    + Circle::new((0, 0), 5, RED.filled())
                    + Text::new(m.label.clone(), (8, -14), ("sans-serif", 14).into_font())
            }),
    )?;
    chart.draw_series(
        series
            .markers
            .iter()
            .filter(|m| m.shape == MarkerShape::Square)
            .map(|m| {
                EmptyElement::at((m.x, m.y))
                    + Rectangle::new([(-4, -4), (4, 4)], GREEN.filled())
                    + Text::new(m.label.clone(), (8, -14), ("sans-serif", 14).into_font())
            }),
    )?;

    root.present()?;
    log::info!("saved plot to {}", path);
    Ok(())
}

/// Renders several curves on shared axes with a legend.
pub fn plot_multi(series: &[Series], title: &str, path: &str) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, LINE_PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let ((xmin, xmax), (ymin, ymax)) = padded_bounds(series);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(xmin..xmax, ymin..ymax)?;
    chart.configure_mesh().draw()?;

    for (idx, s) in series.iter().enumerate() {
        let mut labelled = false;
        for segment in finite_segments(&s.x, &s.y) {
            let drawn = chart.draw_series(LineSeries::new(segment, &Palette99::pick(idx)))?;
            if !labelled {
                drawn.label(&s.label).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], &Palette99::pick(idx))
                });
                labelled = true;
            }
        }
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    log::info!("saved plot to {}", path);
    Ok(())
}
