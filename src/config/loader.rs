//! Configuration loader for YAML files
//!
//! This module handles loading and validating configuration from YAML files.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::AppError;

use super::types::AppConfig;

/// Load configuration from a YAML file
///
/// This function:
/// 1. Checks if the file exists
/// 2. Parses the YAML content
/// 3. Validates the configuration rules
///
/// # Example
/// ```ignore
/// use std::path::Path;
/// use spot_arb_monitor::config::load_config;
///
/// let config = load_config(Path::new("config.yaml"))?;
/// ```
pub fn load_config(path: &Path) -> Result<AppConfig, AppError> {
    if !path.exists() {
        return Err(AppError::Config(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let config: AppConfig = serde_yaml::from_reader(reader).map_err(|e| {
        AppError::Config(format!(
            "YAML parse error in '{}': {}",
            path.display(),
            e
        ))
    })?;

    config.validate()?;

    Ok(config)
}

/// Load configuration from a YAML string (useful for testing)
pub fn load_config_from_str(yaml_content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = serde_yaml::from_str(yaml_content)
        .map_err(|e| AppError::Config(format!("YAML parse error: {}", e)))?;

    config.validate()?;

    Ok(config)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Venue;
    use rust_decimal::Decimal;
    use std::io::Write;
    use std::str::FromStr;
    use tempfile::NamedTempFile;

    const VALID_CONFIG_YAML: &str = r#"
monitor:
  poll_interval_ms: 30000
  fee_rate: 0.001
  profit_threshold_pct: 0.1
  source_timeout_ms: 5000
sources:
  - venue: binance
    symbol: BTC/USDT
  - venue: coinbase
    symbol: BTC-USD
report:
  series_path: series.json
"#;

    #[test]
    fn test_load_config_from_str_valid() {
        let config = load_config_from_str(VALID_CONFIG_YAML).unwrap();
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[0].venue, Venue::Binance);
        assert_eq!(config.sources[1].symbol, "BTC-USD");
        assert_eq!(config.monitor.fee_rate, Decimal::from_str("0.001").unwrap());
        assert_eq!(config.monitor.source_timeout_ms, 5000);
        assert_eq!(
            config.report.series_path.as_deref(),
            Some(Path::new("series.json"))
        );
    }

    #[test]
    fn test_monitor_and_report_sections_default() {
        let yaml = r#"
sources:
  - venue: binance
    symbol: ETHUSDT
  - venue: coinbase
    symbol: ETH-USD
"#;
        let config = load_config_from_str(yaml).unwrap();
        assert_eq!(config.monitor.poll_interval_ms, 30_000);
        assert!(config.report.series_path.is_none());
    }

    #[test]
    fn test_load_config_from_str_invalid_yaml() {
        let result = load_config_from_str("invalid: yaml: content: [");
        assert!(result.unwrap_err().to_string().contains("YAML parse error"));
    }

    #[test]
    fn test_unknown_venue_rejected() {
        let yaml = r#"
sources:
  - venue: kraken
    symbol: XBT/USD
  - venue: coinbase
    symbol: BTC-USD
"#;
        let result = load_config_from_str(yaml);
        assert!(result.unwrap_err().to_string().contains("YAML parse error"));
    }

    #[test]
    fn test_load_config_from_str_validation_failure() {
        let yaml = r#"
monitor:
  poll_interval_ms: 1000
  fee_rate: 1.5
  profit_threshold_pct: 0.1
sources:
  - venue: binance
    symbol: BTC/USDT
  - venue: coinbase
    symbol: BTC-USD
"#;
        let result = load_config_from_str(yaml);
        assert!(result.unwrap_err().to_string().contains("fee_rate"));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.yaml"));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Configuration file not found"));
    }

    #[test]
    fn test_load_config_from_file_valid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(VALID_CONFIG_YAML.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.sources[0].label(), "binance:BTC/USDT");
    }

    #[test]
    fn test_load_config_from_file_invalid_yaml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"invalid: [yaml: content").unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.unwrap_err().to_string().contains("YAML parse error"));
    }
}
