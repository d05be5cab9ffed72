//! Configuration loading for the time tracker.
//!
//! This module loads the application settings (database location, HTTP
//! bind address, daily target hours, log level) from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use time_tracker::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./timetracker.yaml").unwrap();
//! println!("Target hours per day: {}", config.config().reporting.hours_per_day);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, DatabaseConfig, ReportingConfig, ServerConfig};
