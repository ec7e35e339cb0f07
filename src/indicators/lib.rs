//! Trailing-window technical indicators.
//!
//! Every function returns a series of the same length as its input, index
//! aligned with it. Bars inside the warm-up window are `f64::NAN`.

pub mod oscillator;
pub mod trend;

pub use oscillator::rsi::rsi;
pub use trend::ma::{ema, sma};
pub use trend::macd::{MacdConfig, MacdOutput, macd};
