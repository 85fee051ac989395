//! User settings read from a TOML file

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    angle::{DEFAULT_DD_PRECISION, DEFAULT_SECONDS_PRECISION, MAX_PRECISION},
    history::DEFAULT_CAPACITY,
};

#[derive(Debug, Error)]
/// Failures of loading the settings
pub enum ConfigError {
    /// The file cannot be read
    #[error("Failed to read config file {path:?}: {source}")]
    FileRead {
        /// The config file
        path: PathBuf,
        /// The underlying error
        #[source]
        source: io::Error,
    },

    /// The file is not a valid TOML or has unknown keys
    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        /// The config file
        path: PathBuf,
        /// The underlying error
        #[source]
        source: toml::de::Error,
    },

    /// Some value is not acceptable
    #[error("Invalid setting `{key}`: {message}")]
    Invalid {
        /// The name of the setting
        key: &'static str,
        /// What is wrong
        message: String,
    },
}

/// Conversion settings.
///
/// Every key is optional in the file:
/// ```toml
/// dd_precision = 6
/// dms_seconds_precision = 3
/// history_capacity = 200
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Fraction digits of the decimal degrees output
    #[serde(default = "default_dd_precision")]
    pub dd_precision: usize,

    /// Fraction digits of the arc seconds in the DMS output
    #[serde(default = "default_dms_seconds_precision")]
    pub dms_seconds_precision: usize,

    /// How many conversions the history keeps
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_dd_precision() -> usize {
    DEFAULT_DD_PRECISION
}

fn default_dms_seconds_precision() -> usize {
    DEFAULT_SECONDS_PRECISION
}

fn default_history_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dd_precision: default_dd_precision(),
            dms_seconds_precision: default_dms_seconds_precision(),
            history_capacity: default_history_capacity(),
        }
    }
}

impl Settings {
    /// Parse and validate the TOML text
    ///
    /// # Errors
    /// Invalid TOML or invalid values.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load the settings from a TOML file
    ///
    /// # Errors
    /// The file cannot be read, parsed or has invalid values.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Load the settings from the file if given, use the defaults otherwise
    ///
    /// # Errors
    /// See [`from_file`](#method.from_file).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let settings = Self::from_file(path)?;
                debug!(?path, ?settings, "Loaded settings");
                Ok(settings)
            }
            None => Ok(Self::default()),
        }
    }

    /// Check the values are in the acceptable ranges
    ///
    /// # Errors
    /// A precision above [`MAX_PRECISION`] or the zero history capacity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_precision("dd_precision", self.dd_precision)?;
        check_precision("dms_seconds_precision", self.dms_seconds_precision)?;

        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid {
                key: "history_capacity",
                message: "should be positive".to_string(),
            });
        }

        Ok(())
    }
}

fn check_precision(key: &'static str, value: usize) -> Result<(), ConfigError> {
    if value > MAX_PRECISION {
        return Err(ConfigError::Invalid {
            key,
            message: format!("{value} is above the maximum of {MAX_PRECISION} digits"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Settings, ConfigError> {
        Settings::from_toml(content, Path::new("test.toml"))
    }

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.dd_precision, 6);
        assert_eq!(settings.dms_seconds_precision, 3);
        assert_eq!(settings.history_capacity, 200);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse("").unwrap(), Settings::default());
    }

    #[test]
    fn partial_file() {
        let settings = parse("dd_precision = 4").unwrap();
        assert_eq!(settings.dd_precision, 4);
        assert_eq!(settings.dms_seconds_precision, 3);
    }

    #[test]
    fn unknown_key() {
        assert!(matches!(
            parse("precision = 4"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn precision_too_big() {
        let err = parse("dms_seconds_precision = 16").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "dms_seconds_precision",
                ..
            }
        ));
        assert!(parse("dms_seconds_precision = 15").is_ok());
    }

    #[test]
    fn zero_capacity() {
        assert!(matches!(
            parse("history_capacity = 0"),
            Err(ConfigError::Invalid {
                key: "history_capacity",
                ..
            })
        ));
    }

    #[test]
    fn no_path_gives_defaults() {
        assert_eq!(Settings::load(None).unwrap(), Settings::default());
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Settings::load(Some(Path::new("/nonexistent/cordify.toml"))),
            Err(ConfigError::FileRead { .. })
        ));
    }

    #[test]
    fn from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cordify.toml");
        fs::write(&path, "dd_precision = 2\nhistory_capacity = 5\n").unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.dd_precision, 2);
        assert_eq!(settings.history_capacity, 5);
    }
}
