use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use mini_algo::core::io::write_report;

use crate::runner::CoreReport;

/// Fixed-width summary table, one row per ticker, failures listed after
pub struct SummaryTable<'a>(pub &'a CoreReport);

impl fmt::Display for SummaryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(
            f,
            "{:<14} {:>13} {:>9} {:>8} {:>13} {:>9}",
            "ticker", "total_return", "win_rate", "sharpe", "max_drawdown", "n_trades"
        )?;
        for s in &report.summaries {
            writeln!(
                f,
                "{:<14} {:>13.4} {:>9.4} {:>8.3} {:>13.4} {:>9}",
                s.ticker, s.total_return, s.win_rate, s.sharpe, s.max_drawdown, s.n_trades
            )?;
        }

        if !report.failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Failed:")?;
            for failure in &report.failures {
                writeln!(f, "  {}: {}", failure.ticker, failure.error)?;
            }
        }
        Ok(())
    }
}

pub fn format_summary_table(report: &CoreReport) -> String {
    SummaryTable(report).to_string()
}

/// Write the report as pretty JSON
pub fn write_json_report<P: AsRef<Path>>(report: &CoreReport, path: P) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(report)?;
    write_report(path, json)
        .with_context(|| format!("failed to write report {}", path.display()))?;
    Ok(())
}
