use std::path::Path;

use backtesting::report::generate_text_report;
use backtesting::{BacktestError, BacktestResult, backtest_long_only};
use mini_algo::DataError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use signals::{SignalError, generate_signals};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::data::BarProvider;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error(transparent)]
    Backtest(#[from] BacktestError),
}

/// Headline numbers for one ticker; curves and trades are left out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSummary {
    pub ticker: String,
    pub total_return: f64,
    pub win_rate: f64,
    pub sharpe: f64,
    pub max_drawdown: f64,
    pub n_trades: usize,
}

impl TickerSummary {
    pub fn new(ticker: &str, result: &BacktestResult) -> Self {
        TickerSummary {
            ticker: ticker.to_string(),
            total_return: result.total_return,
            win_rate: result.win_rate,
            sharpe: result.sharpe,
            max_drawdown: result.max_drawdown,
            n_trades: result.n_trades,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerFailure {
    pub ticker: String,
    pub error: String,
}

/// Outcome of a multi-ticker run, both lists sorted by ticker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoreReport {
    pub summaries: Vec<TickerSummary>,
    pub failures: Vec<TickerFailure>,
}

/// Fetch, signal and backtest a single ticker
pub fn run_ticker<P: BarProvider + ?Sized>(
    ticker: &str,
    config: &Config,
    provider: &P,
) -> Result<BacktestResult, RunError> {
    let bars = provider.fetch(ticker)?;
    debug!("{}: {} bars", ticker, bars.len());

    let signals = generate_signals(&bars, &config.signal_config())?;
    let result = backtest_long_only(&signals, config.fee_bp)?;
    Ok(result)
}

/// Backtest every configured ticker in parallel.
///
/// A ticker that fails is logged and recorded in `failures`; the others still
/// run. When `report_dir` is set each successful ticker also gets a text
/// report there.
pub fn run_core<P: BarProvider + ?Sized>(config: &Config, provider: &P) -> CoreReport {
    let outcomes: Vec<(String, Result<BacktestResult, RunError>)> = config
        .tickers
        .par_iter()
        .map(|ticker| (ticker.clone(), run_ticker(ticker, config, provider)))
        .collect();

    let mut report = CoreReport::default();
    for (ticker, outcome) in outcomes {
        match outcome {
            Ok(result) => {
                info!(
                    "{} | ret: {:.2}% | win: {:.1}% | sharpe: {:.2} | maxDD: {:.2}% | trades: {}",
                    ticker,
                    result.total_return * 100.0,
                    result.win_rate * 100.0,
                    result.sharpe,
                    result.max_drawdown * 100.0,
                    result.n_trades
                );
                if let Some(dir) = &config.report_dir {
                    write_ticker_report(dir, &ticker, &result);
                }
                report.summaries.push(TickerSummary::new(&ticker, &result));
            }
            Err(e) => {
                warn!("{}: skipped: {}", ticker, e);
                report.failures.push(TickerFailure {
                    ticker,
                    error: e.to_string(),
                });
            }
        }
    }

    report.summaries.sort_by(|a, b| a.ticker.cmp(&b.ticker));
    report.failures.sort_by(|a, b| a.ticker.cmp(&b.ticker));
    report
}

fn write_ticker_report(dir: &Path, ticker: &str, result: &BacktestResult) {
    let path = dir.join(format!("{ticker}.txt"));
    match generate_text_report(result, &path) {
        Ok(()) => debug!("{}: report written to {}", ticker, path.display()),
        Err(e) => warn!("{}: could not write {}: {}", ticker, path.display(), e),
    }
}
