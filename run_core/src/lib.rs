//! Multi-ticker runner: configuration, bar providers, the per-ticker
//! signal/backtest pipeline, the direction classifier and summary reports.

pub mod config;
pub mod data;
pub mod ml;
pub mod report;
pub mod runner;

pub use config::{Args, Config, ConfigError};
pub use data::{BarProvider, CsvBarProvider, MemoryBarProvider};
pub use ml::{Evaluation, FeatureSet, MlError, make_features, run_ml, time_split_train_test};
pub use report::{SummaryTable, format_summary_table, write_json_report};
pub use runner::{CoreReport, RunError, TickerFailure, TickerSummary, run_core, run_ticker};
