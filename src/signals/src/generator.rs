use chrono::NaiveDate;
use indicators::{rsi, sma};
use mini_algo::BarSeries;
use serde::Serialize;

use crate::position::{raw_positions, shift_forward};
use crate::rules::evaluate_rules;
use crate::{SignalConfig, SignalError};

/// Column-oriented signal table, one row per input bar.
///
/// `position[i]` is the tradable position on bar `i`: the state decided at
/// the close of bar `i - 1`. The first bar is always flat.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignalSeries {
    pub dates: Vec<NaiveDate>,
    pub close: Vec<f64>,
    pub rsi: Vec<f64>,
    pub sma_fast: Vec<f64>,
    pub sma_slow: Vec<f64>,
    pub buy_rule: Vec<bool>,
    pub exit_rule: Vec<bool>,
    /// "Would enter today"; equal to `buy_rule`
    pub signal: Vec<bool>,
    pub position: Vec<i32>,
}

impl SignalSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Compute indicators, rule flags and the delayed position series.
///
/// # Arguments
/// * `bars` - Daily bars in date order
/// * `config` - RSI and SMA windows, validated before any computation
///
/// # Returns
/// A `SignalSeries` aligned with `bars`. An empty series yields an empty table.
pub fn generate_signals(
    bars: &BarSeries,
    config: &SignalConfig,
) -> Result<SignalSeries, SignalError> {
    config.validate()?;

    let close = bars.closes();
    let rsi = rsi(&close, config.rsi_window);
    let sma_fast = sma(&close, config.sma_fast_window);
    let sma_slow = sma(&close, config.sma_slow_window);

    let flags = evaluate_rules(&rsi, &sma_fast, &sma_slow);
    let position = shift_forward(&raw_positions(&flags.buy, &flags.exit));

    Ok(SignalSeries {
        dates: bars.dates(),
        close,
        rsi,
        sma_fast,
        sma_slow,
        signal: flags.buy.clone(),
        buy_rule: flags.buy,
        exit_rule: flags.exit,
        position,
    })
}
