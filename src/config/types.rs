//! Configuration types.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every field has a
//! default, so an empty file is a valid configuration.

use std::path::PathBuf;

use serde::Deserialize;

use crate::calculation::DEFAULT_HOURS_PER_DAY;

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path of the database file; `:memory:` for a throwaway database.
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("timetracker.db"),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Settings for target-hour reporting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// Target hours per business day.
    pub hours_per_day: u32,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            hours_per_day: DEFAULT_HOURS_PER_DAY,
        }
    }
}

/// The complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Database settings.
    pub database: DatabaseConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Reporting settings.
    pub reporting: ReportingConfig,
    /// Default log filter when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            server: ServerConfig::default(),
            reporting: ReportingConfig::default(),
            log_level: "info".to_string(),
        }
    }
}
