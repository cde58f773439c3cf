//! Task files: the whole options bundle in a small `key: value` document
//! instead of a pile of flags. The document is a title word followed by one
//! pair per line, values running to the end of the line so expression lists
//! keep their semicolons:
//!
//! ```text
//! funcviz_task
//!   expr: x^3 - 3*x; sin(x)
//!   xmin: -5
//!   xmax: 5
//!   save: cubic.png
//! ```
//!
//! Comment lines starting with `//`, `#`, `%` or `;` are dropped before
//! parsing. Values are coerced per key exactly like the corresponding flag.

use crate::Utils::cli::{CliOptions, parse_float_or_expr, split_expression_list};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, recognize},
    multi::{many0, many1},
    sequence::{delimited, pair, separated_pair},
};
use std::fs;

/// Parses a bare word (the document title and the keys share the shape).
fn parse_word(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    parser.parse(input)
}

/// Parses the value part: everything up to the end of the line, trimmed.
fn parse_value_line(input: &str) -> IResult<&str, String> {
    let parser = take_while(|c: char| c != '\n' && c != '\r');
    let mut parser = map(parser, |s: &str| s.trim().to_string());
    parser.parse(input)
}

fn parse_pair_line(input: &str) -> IResult<&str, (String, String)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    let mut parser = separated_pair(parse_word, colon_separator, parse_value_line);
    parser.parse(input)
}

fn parse_task_document(input: &str) -> IResult<&str, (String, Vec<(String, String)>)> {
    let (input, _) = multispace0(input)?;
    let (input, title) = parse_word(input)?;
    let mut parser = many1(delimited(multispace0, parse_pair_line, multispace0));
    let (input, pairs) = parser.parse(input)?;
    Ok((input, (title, pairs)))
}

/// Filters out comment lines (starting with //, #, %, or ;) and blank lines.
fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
                && !trimmed.starts_with(';')
                && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

fn apply_pair(key: &str, value: &str, opts: &mut CliOptions) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("task key '{}' has an empty value", key));
    }
    match key {
        "expr" => opts.exprs = split_expression_list(value),
        "xmin" => opts.xmin = parse_float_or_expr(value)?,
        "xmax" => opts.xmax = parse_float_or_expr(value)?,
        "ymin" => opts.ymin = parse_float_or_expr(value)?,
        "ymax" => opts.ymax = parse_float_or_expr(value)?,
        "points" => {
            opts.points = value
                .parse()
                .map_err(|_| format!("task key 'points' expects an integer, got '{}'", value))?
        }
        "save" => opts.save = Some(value.to_string()),
        "surface3d" => {
            opts.surface3d = value
                .parse()
                .map_err(|_| format!("task key 'surface3d' expects true/false, got '{}'", value))?
        }
        "complex" => opts.complex_expr = Some(value.to_string()),
        "complex_mode" => {
            opts.complex_mode = value
                .parse()
                .map_err(|_| format!("unknown complex mode '{}'", value))?
        }
        "implicit" => opts.implicit_expr = Some(value.to_string()),
        "parametric_x" => opts.parametric_x = Some(value.to_string()),
        "parametric_y" => opts.parametric_y = Some(value.to_string()),
        "parametric_z" => opts.parametric_z = Some(value.to_string()),
        "tmin" => opts.tmin = parse_float_or_expr(value)?,
        "tmax" => opts.tmax = parse_float_or_expr(value)?,
        "csv" => opts.csv = Some(value.to_string()),
        "loglevel" => {
            opts.loglevel = value
                .parse()
                .map_err(|_| format!("unknown log level '{}'", value))?
        }
        _ => return Err(format!("unknown task key '{}'", key)),
    }
    Ok(())
}

/// Applies a task document (already in memory) on top of the options bundle.
pub fn apply_task_str(input: &str, opts: &mut CliOptions) -> Result<(), String> {
    let filtered = filter_comments(input);
    let (remaining, (title, pairs)) = parse_task_document(&filtered)
        .map_err(|e| format!("failed to parse task document: {:?}", e))?;
    if !remaining.trim().is_empty() {
        return Err(format!(
            "failed to parse entire task document, remaining: '{}'",
            remaining
        ));
    }
    log::info!("applying task '{}'", title);
    for (key, value) in pairs {
        apply_pair(&key, &value, opts)?;
    }
    Ok(())
}

/// Reads and applies a task file.
pub fn apply_task_file(path: &str, opts: &mut CliOptions) -> Result<(), String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("cannot read task file '{}': {}", path, e))?;
    apply_task_str(&content, opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_parse_word() {
        let (remaining, word) = parse_word("funcviz_task\n  expr: x^2").unwrap();
        assert_eq!(word, "funcviz_task");
        assert_eq!(remaining, "\n  expr: x^2");
    }

    #[test]
    fn test_parse_pair_line_keeps_semicolons() {
        let (remaining, (key, value)) = parse_pair_line("expr: x^2; sin(x)\nxmin: -5").unwrap();
        assert_eq!(key, "expr");
        assert_eq!(value, "x^2; sin(x)");
        assert_eq!(remaining, "\nxmin: -5");
    }

    #[test]
    fn test_filter_comments() {
        let input = "// comment\ntask\n# another\n  xmin: -1\n% third\n; fourth\n\n  xmax: 1";
        assert_eq!(filter_comments(input), "task\n  xmin: -1\n  xmax: 1");
    }

    #[test]
    fn test_apply_task_str() {
        let doc = "\
plot_task
  expr: x^3 - 3*x; sin(x)
  xmin: -2
  xmax: 2
  points: 300
  surface3d: true
  tmax: 2*pi
";
        let mut opts = CliOptions::default();
        apply_task_str(doc, &mut opts).unwrap();
        assert_eq!(opts.exprs, vec!["x^3 - 3*x", "sin(x)"]);
        assert_relative_eq!(opts.xmin, -2.0);
        assert_relative_eq!(opts.xmax, 2.0);
        assert_eq!(opts.points, 300);
        assert!(opts.surface3d);
        assert_relative_eq!(opts.tmax, std::f64::consts::TAU, epsilon = 1e-12);
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let doc = "task\n  frobnicate: 1\n";
        let mut opts = CliOptions::default();
        let err = apply_task_str(doc, &mut opts).unwrap_err();
        assert!(err.contains("frobnicate"));
    }

    #[test]
    fn test_missing_title_is_an_error() {
        let doc = "expr: x^2\n";
        let mut opts = CliOptions::default();
        assert!(apply_task_str(doc, &mut opts).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut opts = CliOptions::default();
        let err = apply_task_file("/no/such/task.txt", &mut opts).unwrap_err();
        assert!(err.contains("cannot read task file"));
    }

    #[test]
    fn test_flags_after_task_override_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("task.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "task").unwrap();
        writeln!(file, "  expr: x^2").unwrap();
        writeln!(file, "  xmax: 2").unwrap();
        drop(file);

        let args: Vec<String> = [
            "--task",
            path.to_str().unwrap(),
            "--xmax",
            "10",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let opts = CliOptions::parse_args(args).unwrap();
        assert_eq!(opts.exprs, vec!["x^2"]);
        assert_relative_eq!(opts.xmax, 10.0);
    }
}
