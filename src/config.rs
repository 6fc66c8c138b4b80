//! Layered runtime settings.
//!
//! Settings are resolved from built-in defaults, then an optional TOML file,
//! then `AQWATCH_*` environment variables. Command-line flags are applied on
//! top by the binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Name of the settings file looked up in the working directory when no
/// explicit path is given (`aqwatch.toml`).
const DEFAULT_CONFIG_NAME: &str = "aqwatch";

/// Theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Detect from the terminal background.
    #[default]
    Auto,
    Dark,
    Light,
}

/// Resolved dashboard settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// JSON snapshot file to watch. The built-in sample is used when unset.
    pub file: Option<PathBuf>,
    /// Seconds between source polls.
    pub refresh_secs: u64,
    pub theme: ThemeChoice,
    /// Log file. Logging is disabled when unset.
    pub log_file: Option<PathBuf>,
    /// Where the `e` key writes its report.
    pub export_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file: None,
            refresh_secs: 5,
            theme: ThemeChoice::Auto,
            log_file: None,
            export_path: PathBuf::from("aqi_export.json"),
        }
    }
}

impl Settings {
    /// Load settings from `path` (required to exist) or from `aqwatch.toml`
    /// in the working directory (optional), overlaid with the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let config = Config::builder()
            .set_default("refresh_secs", defaults.refresh_secs as i64)?
            .set_default("theme", "auto")?
            .set_default("export_path", defaults.export_path.to_string_lossy().into_owned())?
            .add_source(file)
            .add_source(Environment::with_prefix("AQWATCH"))
            .build()
            .context("failed to load settings")?;

        config.try_deserialize().context("invalid settings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
file = "readings.json"
refresh_secs = 30
theme = "light"
"#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.file, Some(PathBuf::from("readings.json")));
        assert_eq!(settings.refresh_secs, 30);
        assert_eq!(settings.theme, ThemeChoice::Light);
        assert_eq!(settings.export_path, PathBuf::from("aqi_export.json"));
        assert!(settings.log_file.is_none());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/aqwatch.toml"))).is_err());
    }

    #[test]
    fn test_invalid_theme_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, r#"theme = "sepia""#).unwrap();
        assert!(Settings::load(Some(file.path())).is_err());
    }
}
