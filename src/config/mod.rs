//! Configuration module for monitor settings and YAML loading
//!
//! This module provides:
//! - Configuration types (`AppConfig`, `MonitorSettings`, `SourceConfig`)
//! - YAML loading functionality (`load_config`)
//! - Application constants with environment variable overrides
//! - Logging configuration (`init_logging`)

pub mod constants;
mod loader;
pub mod logging;
mod types;

// Re-export types
pub use types::{
    AppConfig, MonitorSettings, ReportSettings, SourceConfig, Venue, REQUIRED_SOURCE_COUNT,
};

// Re-export loader functions
pub use loader::{load_config, load_config_from_str};

// Re-export logging functions
pub use logging::init_logging;
