//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the
//! application configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{TrackerError, TrackerResult};

use super::types::AppConfig;

/// Loads and provides access to the application configuration.
///
/// # File Format
///
/// ```yaml
/// database:
///   path: ./timetracker.db
/// server:
///   bind: 0.0.0.0:8080
/// reporting:
///   hours_per_day: 8
/// log_level: debug
/// ```
///
/// Any section or key may be left out and falls back to its default.
///
/// # Example
///
/// ```no_run
/// use time_tracker::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./timetracker.yaml")?;
/// println!("Database: {}", loader.config().database.path.display());
/// # Ok::<(), time_tracker::error::TrackerError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the given YAML file.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if the file cannot be read
    /// - `ConfigParseError` if the file is not valid YAML for [`AppConfig`]
    /// - `InvalidDomainValue` if `hours_per_day` is more than 24
    pub fn load<P: AsRef<Path>>(path: P) -> TrackerResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| TrackerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content).map_err(|err| match err {
            TrackerError::ConfigParseError { message, .. } => TrackerError::ConfigParseError {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    /// Parses configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> TrackerResult<Self> {
        // serde_yaml reads an empty document as unit, not as an empty map.
        let config: AppConfig = if content.trim().is_empty() {
            AppConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| TrackerError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?
        };

        if config.reporting.hours_per_day > 24 {
            return Err(TrackerError::invalid_value(
                "reporting.hours_per_day",
                "cannot exceed 24",
            ));
        }

        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> AppConfig {
        self.config
    }
}
