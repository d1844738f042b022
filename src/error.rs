//! Application-wide error types using thiserror
//!
//! Layer-specific errors (`SourceError`, `EvaluationError`, `MonitorError`)
//! are wrapped in `AppError` at the application boundary.

use crate::adapters::errors::SourceError;
use crate::core::evaluator::EvaluationError;
use crate::core::monitor::MonitorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("Monitor error: {0}")]
    Monitor(#[from] MonitorError),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_converts_to_app_error() {
        let source_err = SourceError::Timeout(250);
        let app_err: AppError = source_err.into();
        let msg = app_err.to_string();
        assert!(msg.contains("Source error"), "Got: {}", msg);
        assert!(msg.contains("250ms"), "Got: {}", msg);
    }

    #[test]
    fn test_serde_error_converts_to_app_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_err: AppError = serde_err.into();
        assert!(app_err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_io_error_converts_to_app_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let app_err: AppError = io_err.into();
        let msg = app_err.to_string();
        assert!(msg.contains("IO error"), "Got: {}", msg);
        assert!(msg.contains("file missing"), "Got: {}", msg);
    }

    #[test]
    fn test_config_error_display() {
        let err = AppError::Config("missing sources".into());
        assert_eq!(err.to_string(), "Configuration error: missing sources");
    }
}
