use serde::{Deserialize, Serialize};

use crate::SignalError;

/// Indicator windows for the RSI / SMA crossover rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// RSI lookback
    #[serde(default = "default_rsi_window")]
    pub rsi_window: usize,

    /// Fast SMA window
    #[serde(default = "default_sma_fast")]
    pub sma_fast_window: usize,

    /// Slow SMA window
    #[serde(default = "default_sma_slow")]
    pub sma_slow_window: usize,
}

fn default_rsi_window() -> usize {
    14
}

fn default_sma_fast() -> usize {
    20
}

fn default_sma_slow() -> usize {
    50
}

impl Default for SignalConfig {
    fn default() -> Self {
        SignalConfig {
            rsi_window: default_rsi_window(),
            sma_fast_window: default_sma_fast(),
            sma_slow_window: default_sma_slow(),
        }
    }
}

impl SignalConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), SignalError> {
        if self.rsi_window == 0 {
            return Err(SignalError::InvalidConfig(
                "rsi_window must be greater than 0".to_string(),
            ));
        }
        if self.sma_fast_window == 0 {
            return Err(SignalError::InvalidConfig(
                "sma_fast_window must be greater than 0".to_string(),
            ));
        }
        if self.sma_slow_window == 0 {
            return Err(SignalError::InvalidConfig(
                "sma_slow_window must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Bars needed before both rules can be evaluated on defined values
    pub fn warmup_bars(&self) -> usize {
        self.rsi_window
            .max(self.sma_fast_window.saturating_sub(1))
            .max(self.sma_slow_window.saturating_sub(1))
    }
}
