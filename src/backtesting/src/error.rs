use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BacktestError {
    /// Fee must be a finite, non-negative number of basis points
    #[error("invalid fee: {0} basis points")]
    InvalidFee(f64),

    #[error("column lengths differ: {dates} dates, {closes} closes, {positions} positions")]
    LengthMismatch {
        dates: usize,
        closes: usize,
        positions: usize,
    },

    #[error("position {value} at bar {index} is not 0 or 1")]
    InvalidPosition { index: usize, value: i32 },
}
