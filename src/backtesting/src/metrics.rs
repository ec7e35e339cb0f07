use rustc_hash::FxHashMap;
use stats::{mean, running_max, sample_std_dev};

use crate::models::{BacktestResult, Trade};

/// Trading days per year used to annualize daily figures
pub const TRADING_DAYS: f64 = 252.0;

/// Annualized Sharpe ratio of daily returns.
///
/// `mean(r - rf) / std(r - rf) * sqrt(252)` with the sample (n-1) standard
/// deviation. Returns 0 when the deviation is exactly zero or undefined
/// (fewer than two returns).
pub fn sharpe_ratio(daily_returns: &[f64], risk_free_daily: f64) -> f64 {
    let excess: Vec<f64> = daily_returns.iter().map(|r| r - risk_free_daily).collect();
    let sd = sample_std_dev(&excess);
    if !sd.is_finite() || sd == 0.0 {
        return 0.0;
    }
    mean(&excess) / sd * TRADING_DAYS.sqrt()
}

/// Most negative `equity / running_peak - 1`; 0 for an empty curve.
pub fn max_drawdown(equity: &[f64]) -> f64 {
    running_max(equity)
        .iter()
        .zip(equity)
        .map(|(peak, e)| e / peak - 1.0)
        .fold(0.0, f64::min)
}

/// Fraction of trades with a strictly positive return; 0 without trades.
pub fn win_rate(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let wins = trades.iter().filter(|t| t.gross_return > 0.0).count();
    wins as f64 / trades.len() as f64
}

/// Named metrics for reporting
pub fn summary_metrics(result: &BacktestResult) -> FxHashMap<String, f64> {
    let mut metrics = FxHashMap::default();

    metrics.insert("Total Return".to_string(), result.total_return);
    metrics.insert("Win Rate".to_string(), result.win_rate);
    metrics.insert("Sharpe Ratio".to_string(), result.sharpe);
    metrics.insert("Max Drawdown".to_string(), result.max_drawdown);
    metrics.insert("Trades".to_string(), result.n_trades as f64);

    let n = result.daily_returns.len();
    if n > 0 {
        let mean_return = mean(&result.daily_returns);
        metrics.insert("Mean Daily Return".to_string(), mean_return);

        let volatility = sample_std_dev(&result.daily_returns);
        if volatility.is_finite() {
            metrics.insert("Daily Volatility".to_string(), volatility);
            metrics.insert(
                "Annualized Volatility".to_string(),
                volatility * TRADING_DAYS.sqrt(),
            );
        }

        let exposure = result
            .trades
            .iter()
            .map(|t| t.exit_index - t.entry_index)
            .sum::<usize>();
        metrics.insert("Exposure".to_string(), exposure as f64 / n as f64);
    }

    metrics
}
