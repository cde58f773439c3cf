//! Logger setup plus file output: csv export of the sampled series and
//! timestamped default save paths.

use crate::plotting::plots::Series;
use chrono::Utc;
use csv::Writer;
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};
use std::fs::File;
use std::io;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum LogLevelOpt {
    Info,
    Warn,
    Error,
    None,
}

impl LogLevelOpt {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            LogLevelOpt::Info => LevelFilter::Info,
            LogLevelOpt::Warn => LevelFilter::Warn,
            LogLevelOpt::Error => LevelFilter::Error,
            LogLevelOpt::None => LevelFilter::Off,
        }
    }
}

pub fn init_logging(level: LogLevelOpt) {
    // Err here means a logger is already set, keep the existing one
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level.to_filter(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

/// Writes the sampled series as csv: an x column plus one column per series.
/// All series are expected to share the x grid.
pub fn save_series_to_csv(series: &[Series], filename: &str) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);

    let mut header = vec!["x".to_string()];
    header.extend(series.iter().map(|s| s.label.clone()));
    writer.write_record(&header)?;

    let rows = series.first().map_or(0, |s| s.x.len());
    for i in 0..rows {
        let mut row = vec![series[0].x[i].to_string()];
        row.extend(series.iter().map(|s| s.y[i].to_string()));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    log::info!("saved series to {}", filename);
    Ok(())
}

pub fn default_save_path(prefix: &str) -> String {
    let date_and_time = Utc::now().format("%Y-%m-%d_%H-%M-%S");
    format!("{}_{}.png", prefix, date_and_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_loglevel_parses_and_maps() {
        assert_eq!("warn".parse::<LogLevelOpt>().unwrap(), LogLevelOpt::Warn);
        assert_eq!("none".parse::<LogLevelOpt>().unwrap(), LogLevelOpt::None);
        assert!("verbose".parse::<LogLevelOpt>().is_err());
        assert_eq!(LogLevelOpt::None.to_filter(), LevelFilter::Off);
        assert_eq!(LogLevelOpt::Info.to_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_csv_export_shape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("series.csv");
        let x = DVector::from_vec(vec![0.0, 0.5, 1.0]);
        let series = vec![
            Series::new(x.clone(), DVector::from_vec(vec![0.0, 0.25, 1.0]), "x^2"),
            Series::new(x, DVector::from_vec(vec![1.0, 1.5, 2.0]), "x + 1"),
        ];

        save_series_to_csv(&series, path.to_str().unwrap()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "x,x^2,x + 1");
        assert_eq!(lines[1], "0,0,1");
        assert_eq!(lines[3], "1,1,2");
    }

    #[test]
    fn test_default_save_path_shape() {
        let path = default_save_path("funcviz");
        assert!(path.starts_with("funcviz_"));
        assert!(path.ends_with(".png"));
    }
}
