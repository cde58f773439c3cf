#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
pub mod Utils;
pub mod analysis;
pub mod plotting;
pub mod symbolic;

use crate::Utils::cli::{CliOptions, HELP};
use crate::Utils::logger::{default_save_path, init_logging, save_series_to_csv};
use crate::analysis::report::{collect_markers, print_report};
use crate::analysis::sampler::sample_function;
use crate::plotting::complex_map::plot_complex_map;
use crate::plotting::implicit::plot_implicit;
use crate::plotting::parametric::{plot_parametric2d, plot_parametric3d};
use crate::plotting::plots::{Series, plot_multi, plot_single};
use crate::plotting::surface3d::plot_surface;
use crate::symbolic::parse_expr::parse_expression_func;
use std::env;
use std::error::Error;

fn main() {
    let opts = match CliOptions::parse_args(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("{}", msg);
            println!("{}", HELP);
            return;
        }
    };
    init_logging(opts.loglevel);

    if opts.help {
        println!("{}", HELP);
        return;
    }

    // mode precedence: complex, implicit, parametric, expression list, help.
    // Failures are reported and swallowed, the process exits 0 either way.
    if let Some(text) = opts.complex_expr.clone() {
        if let Err(e) = run_complex(&text, &opts) {
            log::warn!("complex plot failed: {}", e);
        }
        return;
    }
    if let Some(text) = opts.implicit_expr.clone() {
        if let Err(e) = run_implicit(&text, &opts) {
            log::warn!("implicit plot failed: {}", e);
        }
        return;
    }
    if let (Some(x_text), Some(y_text)) = (opts.parametric_x.clone(), opts.parametric_y.clone()) {
        if let Err(e) = run_parametric(&x_text, &y_text, &opts) {
            log::warn!("parametric plot failed: {}", e);
        }
        return;
    }
    if opts.parametric_x.is_some() != opts.parametric_y.is_some() {
        log::warn!("parametric mode needs both --parametric-x and --parametric-y");
    }
    if !opts.exprs.is_empty() {
        if let Err(e) = run_expressions(&opts) {
            log::warn!("analysis failed: {}", e);
        }
        return;
    }
    println!("{}", HELP);
}

fn save_path(opts: &CliOptions) -> String {
    opts.save
        .clone()
        .unwrap_or_else(|| default_save_path("funcviz"))
}

fn run_complex(text: &str, opts: &CliOptions) -> Result<(), Box<dyn Error>> {
    let expr = parse_expression_func(text)?;
    let title = format!("Complex: {} ({})", expr, opts.complex_mode);
    plot_complex_map(
        &expr,
        opts.complex_mode,
        &title,
        opts.xmin,
        opts.xmax,
        opts.ymin,
        opts.ymax,
        &save_path(opts),
    )
}

fn run_implicit(text: &str, opts: &CliOptions) -> Result<(), Box<dyn Error>> {
    let expr = parse_expression_func(text)?;
    let title = format!("Implicit: {} = 0", expr);
    plot_implicit(
        &expr,
        &title,
        opts.xmin,
        opts.xmax,
        opts.ymin,
        opts.ymax,
        &save_path(opts),
    )
}

fn run_parametric(x_text: &str, y_text: &str, opts: &CliOptions) -> Result<(), Box<dyn Error>> {
    let fx = parse_expression_func(x_text)?;
    let fy = parse_expression_func(y_text)?;
    let title = format!("Parametric curve (t in [{}, {}])", opts.tmin, opts.tmax);
    let path = save_path(opts);
    match &opts.parametric_z {
        Some(z_text) => {
            let fz = parse_expression_func(z_text)?;
            plot_parametric3d(&fx, &fy, &fz, opts.tmin, opts.tmax, &title, &path)
        }
        None => plot_parametric2d(&fx, &fy, opts.tmin, opts.tmax, &title, &path),
    }
}

fn run_expressions(opts: &CliOptions) -> Result<(), Box<dyn Error>> {
    let mut parsed = Vec::with_capacity(opts.exprs.len());
    for text in &opts.exprs {
        parsed.push(parse_expression_func(text)?);
    }
    let single = parsed.len() == 1;

    let mut all_series = Vec::new();
    for expr in &parsed {
        print_report(expr, "x", opts.xmin, opts.xmax);
        let (x, y) = sample_function(expr, opts.xmin, opts.xmax, opts.points);
        let mut series = Series::new(x, y, expr.to_string());
        if single {
            series.markers = collect_markers(expr, "x", opts.xmin, opts.xmax);
        }
        all_series.push(series);
    }

    if let Some(csv_path) = &opts.csv {
        save_series_to_csv(&all_series, csv_path)?;
    }

    let path = save_path(opts);
    if opts.surface3d {
        if single {
            let title = format!("3D: {}", parsed[0]);
            return plot_surface(&parsed[0], &title, opts.xmin, opts.xmax, &path);
        }
        log::warn!("--3d supports a single expression, rendering 2D instead");
    }
    if single {
        let title = all_series[0].label.clone();
        plot_single(&all_series[0], &title, &path)
    } else {
        plot_multi(&all_series, "Comparison", &path)
    }
}
