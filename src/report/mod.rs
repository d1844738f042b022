//! Reporting sinks for a finished monitoring run
//!
//! A sink receives the final `Summary` and the exported `Series` once the
//! monitor reaches STOPPED. Sinks are independent: one failing sink does not
//! prevent the others from running.

mod console;
mod json;

use crate::core::series::{Series, Summary};
use crate::error::Result;

pub use console::ConsoleReporter;
pub use json::JsonSeriesWriter;

/// Consumer of a finished run
pub trait ReportSink: Send {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Hand over the final summary and the full series
    fn report(&mut self, summary: &Summary, series: &Series) -> Result<()>;
}
