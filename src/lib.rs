//! Shared market-data types and models for the signal/backtest workspace.

pub mod core;
pub mod models;

pub use crate::core::io::{Bar, BarSeries, DataError, read_bar_file};
