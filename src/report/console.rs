use std::io::{self, Stdout, Write};

use rust_decimal::Decimal;

use crate::core::series::{Series, Summary};
use crate::error::Result;
use crate::report::ReportSink;

/// Prints the end-of-run statistics block
pub struct ConsoleReporter<W: Write + Send = Stdout> {
    out: W,
    threshold: Decimal,
}

impl ConsoleReporter<Stdout> {
    pub fn stdout(threshold: Decimal) -> Self {
        Self::new(io::stdout(), threshold)
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(out: W, threshold: Decimal) -> Self {
        Self { out, threshold }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_summary(&mut self, summary: &Summary) -> io::Result<()> {
        writeln!(self.out)?;
        if summary.count == 0 {
            writeln!(self.out, "No data collected.")?;
            return Ok(());
        }

        writeln!(self.out, "Summary Statistics:")?;
        writeln!(self.out, "Data points collected: {}", summary.count)?;
        writeln!(self.out, "Average potential profit: {:.4}%", summary.mean_profit_percent)?;
        writeln!(self.out, "Max potential profit: {:.4}%", summary.max_profit_percent)?;
        writeln!(
            self.out,
            "Profitable opportunities (>{}%): {}",
            self.threshold,
            summary.count_above_threshold(self.threshold)
        )?;

        writeln!(self.out, "Average bid/ask spread:")?;
        for source in summary.sources() {
            if let Some(spread) = summary.average_spread(source) {
                writeln!(self.out, "  {}: {:.4}", source, spread)?;
            }
        }
        Ok(())
    }
}

impl<W: Write + Send> ReportSink for ConsoleReporter<W> {
    fn name(&self) -> &'static str {
        "console"
    }

    fn report(&mut self, summary: &Summary, _series: &Series) -> Result<()> {
        self.write_summary(summary)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::test_utils::{dec, quote};
    use crate::adapters::types::SourceId;
    use crate::core::evaluator::{ArbitrageResult, Direction};
    use crate::core::series::{Observation, SeriesRecorder};
    use chrono::Utc;

    fn recorder_with(percents: &[&str]) -> SeriesRecorder {
        let mut recorder = SeriesRecorder::new();
        for pct in percents {
            let result = ArbitrageResult {
                profit_absolute: dec("0"),
                profit_percent: dec(pct),
                direction: Direction::AToB,
                buy_source: SourceId::from("a"),
                sell_source: SourceId::from("b"),
            };
            recorder.append(Observation::new(
                Utc::now(),
                quote("a", "100", "100.5"),
                quote("b", "101", "101.25"),
                result,
            ));
        }
        recorder
    }

    fn render(recorder: &SeriesRecorder) -> String {
        let mut reporter = ConsoleReporter::new(Vec::new(), dec("0.1"));
        reporter.report(&recorder.summarize(), &recorder.export()).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_prints_summary_block() {
        let output = render(&recorder_with(&["0.05", "0.2", "0.35"]));

        assert!(output.contains("Summary Statistics:"));
        assert!(output.contains("Data points collected: 3"));
        assert!(output.contains("Average potential profit: 0.2000%"));
        assert!(output.contains("Max potential profit: 0.3500%"));
        assert!(output.contains("Profitable opportunities (>0.1%): 2"));
        assert!(output.contains("  a: 0.5000"));
        assert!(output.contains("  b: 0.2500"));
    }

    #[test]
    fn test_empty_run_reports_no_data() {
        let output = render(&SeriesRecorder::new());
        assert!(output.contains("No data collected."));
        assert!(!output.contains("Summary Statistics:"));
    }
}
