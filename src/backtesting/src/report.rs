use std::fmt;
use std::path::Path;

use anyhow::Result;
use mini_algo::core::io::write_report;

use crate::BacktestResult;
use crate::metrics::summary_metrics;

/// Metrics and trade log of one backtest, rendered as plain text
pub struct TextReport<'a> {
    pub title: &'a str,
    pub result: &'a BacktestResult,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.len()))?;
        writeln!(f)?;
        writeln!(f, "Performance Metrics:")?;
        writeln!(f, "--------------------")?;

        // Sort keys for consistent output
        let metrics = summary_metrics(self.result);
        let mut keys: Vec<&String> = metrics.keys().collect();
        keys.sort();
        for key in keys {
            writeln!(f, "{}: {:.4}", key, metrics[key])?;
        }

        writeln!(f)?;
        writeln!(f, "Trades: {}", self.result.n_trades)?;
        if self.result.trades.is_empty() {
            return Ok(());
        }
        writeln!(
            f,
            "{:<12} {:>12} {:<12} {:>12} {:>10}",
            "Entry", "Entry Px", "Exit", "Exit Px", "Return"
        )?;
        for t in &self.result.trades {
            writeln!(
                f,
                "{:<12} {:>12.4} {:<12} {:>12.4} {:>9.2}%",
                t.entry_date.to_string(),
                t.entry_price,
                t.exit_date.to_string(),
                t.exit_price,
                t.gross_return * 100.0
            )?;
        }
        Ok(())
    }
}

/// Render metrics and the trade log as plain text
pub fn format_text_report(title: &str, result: &BacktestResult) -> String {
    TextReport { title, result }.to_string()
}

/// Generate a text report
pub fn generate_text_report<P: AsRef<Path>>(result: &BacktestResult, path: P) -> Result<()> {
    write_report(path, format_text_report("Backtest Report", result))?;
    Ok(())
}

/// Generate a JSON report
pub fn generate_json_report<P: AsRef<Path>>(result: &BacktestResult, path: P) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    write_report(path, json)?;
    Ok(())
}
