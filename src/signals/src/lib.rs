//! Turns a bar series into RSI / moving-average rule flags and a long/flat
//! position series that trades one bar after each decision.

pub mod config;
pub mod error;
pub mod generator;
pub mod position;
pub mod rules;

pub use config::SignalConfig;
pub use error::SignalError;
pub use generator::{SignalSeries, generate_signals};
pub use position::PositionState;
