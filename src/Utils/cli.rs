//! Command line flags parsed into the typed `CliOptions` bundle.
//!
//! No framework, just a flag loop: every flag except the switches takes one
//! value, bounds accept either a float literal or a constant expression
//! ("2*pi"), and `--task` splices a task file into the bundle in place, so
//! flags given after it still win.

use crate::Utils::logger::LogLevelOpt;
use crate::Utils::task_parser::apply_task_file;
use crate::plotting::complex_map::ComplexPlotMode;
use crate::symbolic::parse_expr::parse_expression_func;

pub const HELP: &str = "\
funcviz - symbolic analysis and plotting of math expressions

USAGE:
    funcviz --expr \"<f(x)>[; <g(x)>; ...]\" [options]
    funcviz --complex \"<f(z)>\" [--complex-mode magnitude|phase]
    funcviz --implicit \"<f(x,y)>\"
    funcviz --parametric-x \"<x(t)>\" --parametric-y \"<y(t)>\" [--parametric-z \"<z(t)>\"]

OPTIONS:
    --expr <list>            semicolon-separated expressions over x
    --xmin, --xmax <value>   sampling window, default -5 / 5
    --ymin, --ymax <value>   vertical window for implicit/complex plots, default -5 / 5
    --points <n>             2D sampling points, default 600
    --save <path>            output image path, default funcviz_<timestamp>.png
    --3d                     render a single expression as a surface
    --complex <expr>         complex-domain heatmap of f(z)
    --complex-mode <mode>    magnitude (default) or phase
    --implicit <expr>        zero contour of f(x, y)
    --parametric-x <expr>    x(t) of a parametric curve
    --parametric-y <expr>    y(t) of a parametric curve
    --parametric-z <expr>    optional z(t), switches the curve to 3D
    --tmin, --tmax <value>   parameter range, float or expression, default 0 / 2*pi
    --csv <path>             export the sampled series as CSV
    --task <path>            read options from a task file (later flags override)
    --loglevel <level>       info (default), warn, error or none
    -h, --help               print this text

Bound values go through the expression parser when they are not plain floats,
so --tmax \"2*pi\" or --xmax \"exp(1)\" work.
";

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub exprs: Vec<String>,
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub points: usize,
    pub save: Option<String>,
    pub surface3d: bool,
    pub complex_expr: Option<String>,
    pub complex_mode: ComplexPlotMode,
    pub implicit_expr: Option<String>,
    pub parametric_x: Option<String>,
    pub parametric_y: Option<String>,
    pub parametric_z: Option<String>,
    pub tmin: f64,
    pub tmax: f64,
    pub csv: Option<String>,
    pub loglevel: LogLevelOpt,
    pub help: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        CliOptions {
            exprs: Vec::new(),
            xmin: -5.0,
            xmax: 5.0,
            ymin: -5.0,
            ymax: 5.0,
            points: 600,
            save: None,
            surface3d: false,
            complex_expr: None,
            complex_mode: ComplexPlotMode::Magnitude,
            implicit_expr: None,
            parametric_x: None,
            parametric_y: None,
            parametric_z: None,
            tmin: 0.0,
            tmax: std::f64::consts::TAU,
            csv: None,
            loglevel: LogLevelOpt::Info,
            help: false,
        }
    }
}

/// Accepts a float literal or any variable-free expression.
pub fn parse_float_or_expr(text: &str) -> Result<f64, String> {
    if let Ok(value) = text.trim().parse::<f64>() {
        return Ok(value);
    }
    parse_expression_func(text)?.eval_const()
}

pub fn split_expression_list(list: &str) -> Vec<String> {
    list.split(';')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

impl CliOptions {
    /// Parses the argument list (without the program name).
    pub fn parse_args<I>(args: I) -> Result<CliOptions, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut opts = CliOptions::default();
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            match flag.as_str() {
                "--3d" => {
                    opts.surface3d = true;
                    continue;
                }
                "-h" | "--help" => {
                    opts.help = true;
                    continue;
                }
                _ => {}
            }
            let value = args
                .next()
                .ok_or_else(|| format!("flag '{}' expects a value", flag))?;
            match flag.as_str() {
                "--expr" => opts.exprs = split_expression_list(&value),
                "--xmin" => opts.xmin = parse_float_or_expr(&value)?,
                "--xmax" => opts.xmax = parse_float_or_expr(&value)?,
                "--ymin" => opts.ymin = parse_float_or_expr(&value)?,
                "--ymax" => opts.ymax = parse_float_or_expr(&value)?,
                "--points" => {
                    opts.points = value
                        .parse()
                        .map_err(|_| format!("--points expects an integer, got '{}'", value))?
                }
                "--save" => opts.save = Some(value),
                "--complex" => opts.complex_expr = Some(value),
                "--complex-mode" => {
                    opts.complex_mode = value
                        .parse()
                        .map_err(|_| format!("unknown complex mode '{}'", value))?
                }
                "--implicit" => opts.implicit_expr = Some(value),
                "--parametric-x" => opts.parametric_x = Some(value),
                "--parametric-y" => opts.parametric_y = Some(value),
                "--parametric-z" => opts.parametric_z = Some(value),
                "--tmin" => opts.tmin = parse_float_or_expr(&value)?,
                "--tmax" => opts.tmax = parse_float_or_expr(&value)?,
                "--csv" => opts.csv = Some(value),
                "--task" => apply_task_file(&value, &mut opts)?,
                "--loglevel" => {
                    opts.loglevel = value
                        .parse()
                        .map_err(|_| format!("unknown log level '{}'", value))?
                }
                _ => return Err(format!("unknown flag '{}'", flag)),
            }
        }
        Ok(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let opts = CliOptions::parse_args(args(&[])).unwrap();
        assert!(opts.exprs.is_empty());
        assert_relative_eq!(opts.xmin, -5.0);
        assert_relative_eq!(opts.xmax, 5.0);
        assert_eq!(opts.points, 600);
        assert!(!opts.surface3d);
        assert_eq!(opts.complex_mode, ComplexPlotMode::Magnitude);
        assert_relative_eq!(opts.tmax, std::f64::consts::TAU);
        assert_eq!(opts.loglevel, LogLevelOpt::Info);
    }

    #[test]
    fn test_expression_list_splits_on_semicolons() {
        let opts =
            CliOptions::parse_args(args(&["--expr", "x^2; sin(x) ;; exp(x)"])).unwrap();
        assert_eq!(opts.exprs, vec!["x^2", "sin(x)", "exp(x)"]);
    }

    #[test]
    fn test_numeric_flags_and_switches() {
        let opts = CliOptions::parse_args(args(&[
            "--expr", "x^2", "--xmin", "-2", "--xmax", "2", "--points", "100", "--3d",
        ]))
        .unwrap();
        assert_relative_eq!(opts.xmin, -2.0);
        assert_relative_eq!(opts.xmax, 2.0);
        assert_eq!(opts.points, 100);
        assert!(opts.surface3d);
    }

    #[test]
    fn test_bounds_accept_constant_expressions() {
        let opts = CliOptions::parse_args(args(&["--tmax", "2*pi", "--xmax", "exp(1)"])).unwrap();
        assert_relative_eq!(opts.tmax, std::f64::consts::TAU, epsilon = 1e-12);
        assert_relative_eq!(opts.xmax, std::f64::consts::E, epsilon = 1e-12);
    }

    #[test]
    fn test_complex_mode_parses_via_strum() {
        let opts = CliOptions::parse_args(args(&["--complex-mode", "phase"])).unwrap();
        assert_eq!(opts.complex_mode, ComplexPlotMode::Phase);
        assert!(CliOptions::parse_args(args(&["--complex-mode", "argand"])).is_err());
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        let err = CliOptions::parse_args(args(&["--frobnicate", "1"])).unwrap_err();
        assert!(err.contains("--frobnicate"));
    }

    #[test]
    fn test_missing_value_is_an_error() {
        let err = CliOptions::parse_args(args(&["--xmin"])).unwrap_err();
        assert!(err.contains("expects a value"));
    }

    #[test]
    fn test_parse_float_or_expr() {
        assert_relative_eq!(parse_float_or_expr("3.5").unwrap(), 3.5);
        assert_relative_eq!(
            parse_float_or_expr("2*pi").unwrap(),
            std::f64::consts::TAU,
            epsilon = 1e-12
        );
        assert!(parse_float_or_expr("2*x").is_err());
    }
}
