pub mod core;
pub mod error;
pub mod metrics;
pub mod models;
pub mod report;

pub use crate::core::{DEFAULT_FEE_BP, backtest_long_only, backtest_positions, pair_trades};
pub use error::BacktestError;
pub use metrics::{max_drawdown, sharpe_ratio, summary_metrics, win_rate};
pub use models::{BacktestResult, Trade};
