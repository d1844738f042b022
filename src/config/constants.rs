//! Application-wide constants and configuration defaults
//!
//! Endpoint URLs and timeouts live here so they can be overridden via
//! environment variables without touching the YAML file.

// =============================================================================
// Venue Endpoints
// =============================================================================

/// Binance spot REST base URL (default: `https://api.binance.com`)
///
/// Environment variable: `BINANCE_REST_URL`
pub fn binance_rest_url() -> String {
    std::env::var("BINANCE_REST_URL").unwrap_or_else(|_| "https://api.binance.com".to_string())
}

/// Coinbase Exchange REST base URL (default: `https://api.exchange.coinbase.com`)
///
/// Environment variable: `COINBASE_REST_URL`
pub fn coinbase_rest_url() -> String {
    std::env::var("COINBASE_REST_URL")
        .unwrap_or_else(|_| "https://api.exchange.coinbase.com".to_string())
}

// =============================================================================
// Fetch Configuration
// =============================================================================

/// Per-source fetch timeout in milliseconds (default: 10000ms)
///
/// Used when `monitor.source_timeout_ms` is absent from the YAML file.
///
/// Environment variable: `DEFAULT_SOURCE_TIMEOUT_MS`
pub fn default_source_timeout_ms() -> u64 {
    std::env::var("DEFAULT_SOURCE_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(10_000)
}

/// Path of the YAML configuration file (default: `config.yaml`)
///
/// Environment variable: `CONFIG_PATH`
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string())
}

/// Log all effective constants at startup
pub fn log_configuration() {
    tracing::info!(
        binance_rest_url = %binance_rest_url(),
        coinbase_rest_url = %coinbase_rest_url(),
        default_source_timeout_ms = default_source_timeout_ms(),
        config_path = %config_path(),
        "Effective constants"
    );
}
