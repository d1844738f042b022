//! Spot arbitrage monitor entry point
//!
//! 1. Loads configuration
//! 2. Builds the two quote sources
//! 3. Polls until Ctrl+C
//! 4. Prints the summary and optionally dumps the series as JSON

use std::path::Path;

use anyhow::Context;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use spot_arb_monitor::adapters::create_bindings;
use spot_arb_monitor::config::{self, constants};
use spot_arb_monitor::core::MonitorLoop;
use spot_arb_monitor::report::{ConsoleReporter, JsonSeriesWriter, ReportSink};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenvy::dotenv().ok();

    config::init_logging();
    constants::log_configuration();

    let config_path = constants::config_path();
    info!(path = %config_path, "Loading configuration");
    let config = config::load_config(Path::new(&config_path))
        .with_context(|| format!("Configuration failed ({})", config_path))?;

    for source in &config.sources {
        info!(source = %source.label(), "Source configured");
    }
    info!(
        poll_interval_ms = config.monitor.poll_interval_ms,
        fee_rate = %config.monitor.fee_rate,
        profit_threshold_pct = %config.monitor.profit_threshold_pct,
        source_timeout_ms = config.monitor.source_timeout_ms,
        "Monitor settings"
    );

    let monitor = MonitorLoop::new(create_bindings(&config), &config.monitor)?;

    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl+C received, stopping monitor");
                ctrl_c_token.cancel();
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for Ctrl+C");
            }
        }
    });

    let mut sinks: Vec<Box<dyn ReportSink>> =
        vec![Box::new(ConsoleReporter::stdout(config.monitor.profit_threshold_pct))];
    if let Some(path) = &config.report.series_path {
        sinks.push(Box::new(JsonSeriesWriter::new(
            path,
            config.monitor.profit_threshold_pct,
        )));
    }

    println!("Starting arbitrage monitoring... Press Ctrl+C to stop and summarize.");
    let report = monitor.run(cancel, &mut sinks).await;

    info!(
        ticks = report.ticks,
        skipped = report.skipped,
        observations = report.series.len(),
        "Monitor finished"
    );
    Ok(())
}
