use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::core::series::{Series, Summary};
use crate::error::{AppError, Result};
use crate::report::ReportSink;

/// File layout of the series dump
#[derive(Serialize)]
struct SeriesDump<'a> {
    summary: &'a Summary,
    profit_threshold_pct: Decimal,
    /// Observations strictly above `profit_threshold_pct`
    profitable_count: usize,
    observations: &'a Series,
}

/// Writes the summary and full series as pretty JSON to a file
///
/// The file is created (or truncated) when the run stops; this is the
/// hand-off point for external plotting.
#[derive(Debug, Clone)]
pub struct JsonSeriesWriter {
    path: PathBuf,
    threshold: Decimal,
}

impl JsonSeriesWriter {
    pub fn new(path: impl Into<PathBuf>, threshold: Decimal) -> Self {
        Self {
            path: path.into(),
            threshold,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for JsonSeriesWriter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn report(&mut self, summary: &Summary, series: &Series) -> Result<()> {
        let file = File::create(&self.path).map_err(|e| {
            AppError::Report(format!("Cannot create {}: {}", self.path.display(), e))
        })?;
        let dump = SeriesDump {
            summary,
            profit_threshold_pct: self.threshold,
            profitable_count: summary.count_above_threshold(self.threshold),
            observations: series,
        };
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, &dump)?;
        out.flush()?;

        info!(path = %self.path.display(), observations = series.len(), "Series written");
        Ok(())
    }
}
