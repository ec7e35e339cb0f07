use serde::{Deserialize, Serialize};

use crate::trend::ma::ema;

/// MACD (Moving Average Convergence Divergence) periods
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdConfig {
    /// Fast EMA period (typically 12)
    pub fast_period: usize,
    /// Slow EMA period (typically 26)
    pub slow_period: usize,
    /// Signal line EMA period (typically 9)
    pub signal_period: usize,
}

impl Default for MacdConfig {
    fn default() -> Self {
        MacdConfig {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// MACD output series, each aligned with the input.
#[derive(Debug, Clone)]
pub struct MacdOutput {
    /// MACD Line = Fast EMA - Slow EMA
    pub macd_line: Vec<f64>,
    /// Signal Line = EMA of MACD Line
    pub signal_line: Vec<f64>,
    /// Histogram = MACD Line - Signal Line
    pub histogram: Vec<f64>,
}

/// Computes the MACD indicator.
///
/// The MACD line is undefined until the slow EMA is, the signal line until
/// `signal_period` MACD values exist, and the histogram wherever either is
/// undefined.
pub fn macd(data: &[f64], config: MacdConfig) -> MacdOutput {
    let fast_ema = ema(data, config.fast_period);
    let slow_ema = ema(data, config.slow_period);

    // NaN on either side propagates
    let macd_line: Vec<f64> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(&fast, &slow)| fast - slow)
        .collect();

    let signal_line = ema(&macd_line, config.signal_period);

    let histogram: Vec<f64> = macd_line
        .iter()
        .zip(signal_line.iter())
        .map(|(&line, &signal)| line - signal)
        .collect();

    MacdOutput {
        macd_line,
        signal_line,
        histogram,
    }
}
