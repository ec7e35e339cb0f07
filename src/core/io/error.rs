use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a bar series.
#[derive(Debug, Error)]
pub enum DataError {
    /// The market-history file could not be opened or read
    #[error("cannot read market history file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of the market-history file could not be parsed
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A bar violates a series invariant
    #[error("bar {index}: {message}")]
    Invalid { index: usize, message: String },

    /// No bars exist for the requested symbol/range
    #[error("no data for {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::Unavailable("TCS.NS".to_string());
        assert_eq!(err.to_string(), "no data for TCS.NS");

        let err = DataError::Parse {
            line: 3,
            message: "invalid close".to_string(),
        };
        assert_eq!(err.to_string(), "line 3: invalid close");
    }
}
