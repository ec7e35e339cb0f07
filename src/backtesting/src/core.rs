use chrono::NaiveDate;
use mini_algo::core::io::pct_change;
use signals::SignalSeries;
use stats::cumulative_growth;

use crate::error::BacktestError;
use crate::metrics::{max_drawdown, sharpe_ratio, win_rate};
use crate::models::{BacktestResult, Trade};

/// Fee charged per trade side when none is configured: 5 bp = 0.05%.
pub const DEFAULT_FEE_BP: f64 = 5.0;

/// Backtest the long/flat position column of a signal table.
///
/// # Arguments
/// * `signals` - Signal table; `close` and `position` are consumed
/// * `fee_bp` - Fee per trade side in basis points (5.0 = 0.05%)
///
/// # Returns
/// BacktestResult with the equity curve, net daily returns, paired trades and
/// summary metrics.
pub fn backtest_long_only(
    signals: &SignalSeries,
    fee_bp: f64,
) -> Result<BacktestResult, BacktestError> {
    backtest_positions(&signals.dates, &signals.close, &signals.position, fee_bp)
}

/// Backtest raw columns.
///
/// A bar earns `close[i] / close[i-1] - 1` when `positions[i]` is 1. Bars
/// where the position toggles (entry or exit) are charged `fee_bp / 10000`
/// once; holding bars are not charged. Trade-level returns carry their own
/// round-trip fee of `2 * fee_bp / 10000`, independently of the per-bar fees
/// that drive the equity curve.
pub fn backtest_positions(
    dates: &[NaiveDate],
    closes: &[f64],
    positions: &[i32],
    fee_bp: f64,
) -> Result<BacktestResult, BacktestError> {
    if !fee_bp.is_finite() || fee_bp < 0.0 {
        return Err(BacktestError::InvalidFee(fee_bp));
    }
    if dates.len() != closes.len() || closes.len() != positions.len() {
        return Err(BacktestError::LengthMismatch {
            dates: dates.len(),
            closes: closes.len(),
            positions: positions.len(),
        });
    }
    if let Some((index, &value)) = positions.iter().enumerate().find(|(_, p)| !(0..=1).contains(*p)) {
        return Err(BacktestError::InvalidPosition { index, value });
    }
    if closes.is_empty() {
        return Ok(BacktestResult::empty());
    }

    let fee_rate = fee_bp / 10_000.0;
    let returns = pct_change(closes);

    let mut entries = Vec::new();
    let mut exits = Vec::new();
    let mut daily_returns = Vec::with_capacity(closes.len());

    for i in 0..closes.len() {
        let pos = positions[i];
        let pos_prev = if i == 0 { 0 } else { positions[i - 1] };
        let entry = pos == 1 && pos_prev == 0;
        let exit = pos == 0 && pos_prev == 1;
        if entry {
            entries.push(i);
        }
        if exit {
            exits.push(i);
        }

        let fee = if entry || exit { fee_rate } else { 0.0 };
        daily_returns.push(returns[i] * pos as f64 - fee);
    }

    let equity_curve = cumulative_growth(&daily_returns);

    let trades: Vec<Trade> = pair_trades(&entries, &exits)
        .into_iter()
        .map(|(entry_index, exit_index)| {
            let entry_price = closes[entry_index];
            let exit_price = closes[exit_index];
            Trade {
                entry_index,
                exit_index,
                entry_date: dates[entry_index],
                exit_date: dates[exit_index],
                entry_price,
                exit_price,
                gross_return: exit_price / entry_price - 1.0 - 2.0 * fee_rate,
            }
        })
        .collect();

    let total_return = equity_curve.last().map_or(0.0, |e| e - 1.0);

    Ok(BacktestResult {
        total_return,
        win_rate: win_rate(&trades),
        sharpe: sharpe_ratio(&daily_returns, 0.0),
        max_drawdown: max_drawdown(&equity_curve),
        n_trades: trades.len(),
        equity_curve,
        daily_returns,
        trades,
    })
}

/// Match entry bars with exit bars.
///
/// Each entry takes the earliest exit strictly after it that no earlier entry
/// has taken. Entries left without an exit (position still open at the end)
/// produce no pair.
pub fn pair_trades(entries: &[usize], exits: &[usize]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(entries.len().min(exits.len()));
    let mut e_ix = 0;
    for &t_in in entries {
        while e_ix < exits.len() && exits[e_ix] <= t_in {
            e_ix += 1;
        }
        if e_ix < exits.len() {
            pairs.push((t_in, exits[e_ix]));
            e_ix += 1;
        }
    }
    pairs
}
