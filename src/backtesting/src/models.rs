use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A completed long round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Bar where the position went 0 -> 1.
    pub entry_index: usize,
    /// Bar where the position went 1 -> 0.
    pub exit_index: usize,
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    /// Close on the entry bar.
    pub entry_price: f64,
    /// Close on the exit bar.
    pub exit_price: f64,
    /// `exit / entry - 1` less the round-trip fee (both sides).
    pub gross_return: f64,
}

/// Outcome of a long-only backtest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Final equity multiplier minus one.
    pub total_return: f64,
    /// Fraction of trades with a positive return; 0 without trades.
    pub win_rate: f64,
    /// Annualized Sharpe ratio of `daily_returns`.
    pub sharpe: f64,
    /// Most negative peak-to-trough decline of the equity curve, <= 0.
    pub max_drawdown: f64,
    pub n_trades: usize,
    /// Compounded equity per bar, relative to 1.0 before the first bar.
    pub equity_curve: Vec<f64>,
    /// Per-bar strategy return net of toggle-bar fees.
    pub daily_returns: Vec<f64>,
    /// Paired round trips; an open position at the end is not included.
    pub trades: Vec<Trade>,
}

impl BacktestResult {
    /// Neutral result for an empty bar series.
    pub fn empty() -> Self {
        BacktestResult {
            total_return: 0.0,
            win_rate: 0.0,
            sharpe: 0.0,
            max_drawdown: 0.0,
            n_trades: 0,
            equity_curve: Vec::new(),
            daily_returns: Vec::new(),
            trades: Vec::new(),
        }
    }
}
