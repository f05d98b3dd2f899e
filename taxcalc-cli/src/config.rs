//! Settings file for the `taxcalc` binary.
//!
//! ```toml
//! tax_year = 2026
//! data_dir = "/srv/taxcalc/data"
//! log_level = "info"
//! format = "json"
//! ```
//!
//! Every key is optional. Command-line flags take priority over the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::cli::{Cli, OutputFormat};

/// File read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "taxcalc.toml";

/// Log filter used when neither the flag, the file nor `RUST_LOG` set one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub tax_year: Option<i32>,
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub format: Option<OutputFormat>,
}

impl Settings {
    /// Reads `explicit` if given; otherwise [`DEFAULT_CONFIG_FILE`] in the
    /// working directory when present; otherwise defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] if an explicit file cannot be read, and
    /// [`ConfigError::Parse`] if a file is not valid settings TOML.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded settings file");
        Ok(settings)
    }
}

/// Effective options after layering flags over the settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub tax_year: Option<i32>,
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
    pub format: OutputFormat,
}

impl Options {
    pub fn resolve(
        cli: &Cli,
        settings: Settings,
    ) -> Self {
        Self {
            tax_year: cli.year.or(settings.tax_year),
            data_dir: cli.data_dir.clone().or(settings.data_dir),
            log_level: cli
                .log_level
                .clone()
                .or(settings.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            format: cli.format.or(settings.format).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, contents.as_bytes()).unwrap();
        file
    }

    // =========================================================================
    // settings file
    // =========================================================================

    #[test]
    fn reads_every_key() {
        let file = write_config(
            "tax_year = 2026\ndata_dir = \"rates\"\nlog_level = \"debug\"\nformat = \"json\"\n",
        );

        let settings = Settings::load(Some(file.path())).unwrap();

        assert_eq!(
            settings,
            Settings {
                tax_year: Some(2026),
                data_dir: Some(PathBuf::from("rates")),
                log_level: Some("debug".to_string()),
                format: Some(OutputFormat::Json),
            }
        );
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let file = write_config("");

        assert_eq!(Settings::load(Some(file.path())).unwrap(), Settings::default());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let file = write_config("year = 2026\n");

        assert!(matches!(
            Settings::load(Some(file.path())),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = Settings::load(Some(Path::new("/nonexistent/taxcalc.toml")));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    // =========================================================================
    // layering
    // =========================================================================

    #[test]
    fn flags_override_settings() {
        let cli = Cli::parse_from(["taxcalc", "years", "--year", "2025", "--format", "text"]);
        let settings = Settings {
            tax_year: Some(2026),
            data_dir: Some(PathBuf::from("rates")),
            log_level: Some("info".to_string()),
            format: Some(OutputFormat::Json),
        };

        let options = Options::resolve(&cli, settings);

        assert_eq!(options.tax_year, Some(2025));
        assert_eq!(options.format, OutputFormat::Text);
        assert_eq!(options.data_dir, Some(PathBuf::from("rates")));
        assert_eq!(options.log_level, "info");
    }

    #[test]
    fn defaults_apply_without_flags_or_settings() {
        let cli = Cli::parse_from(["taxcalc", "years"]);

        let options = Options::resolve(&cli, Settings::default());

        assert_eq!(
            options,
            Options {
                tax_year: None,
                data_dir: None,
                log_level: "warn".to_string(),
                format: OutputFormat::Text,
            }
        );
    }
}
