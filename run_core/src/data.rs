use std::path::PathBuf;

use mini_algo::{BarSeries, DataError, read_bar_file};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Source of daily bars for a ticker.
///
/// Implementations must be shareable across the runner's worker threads.
pub trait BarProvider: Sync {
    fn fetch(&self, ticker: &str) -> Result<BarSeries, DataError>;
}

/// Reads `<data_dir>/<TICKER>.csv` files
#[derive(Debug, Clone)]
pub struct CsvBarProvider {
    data_dir: PathBuf,
    max_bars: Option<usize>,
}

impl CsvBarProvider {
    pub fn new<P: Into<PathBuf>>(data_dir: P, max_bars: Option<usize>) -> Self {
        CsvBarProvider {
            data_dir: data_dir.into(),
            max_bars,
        }
    }

    pub fn path_for(&self, ticker: &str) -> PathBuf {
        self.data_dir.join(format!("{ticker}.csv"))
    }
}

impl BarProvider for CsvBarProvider {
    fn fetch(&self, ticker: &str) -> Result<BarSeries, DataError> {
        let path = self.path_for(ticker);
        if !path.is_file() {
            return Err(DataError::Unavailable(ticker.to_string()));
        }

        let series = read_bar_file(&path)?;
        debug!("{}: read {} bars from {}", ticker, series.len(), path.display());
        if series.is_empty() {
            return Err(DataError::Unavailable(ticker.to_string()));
        }

        Ok(match self.max_bars {
            Some(n) => series.tail(n),
            None => series,
        })
    }
}

/// Bars held in memory, keyed by ticker
#[derive(Debug, Clone, Default)]
pub struct MemoryBarProvider {
    series: FxHashMap<String, BarSeries>,
}

impl MemoryBarProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<S: Into<String>>(&mut self, ticker: S, bars: BarSeries) {
        self.series.insert(ticker.into(), bars);
    }
}

impl BarProvider for MemoryBarProvider {
    fn fetch(&self, ticker: &str) -> Result<BarSeries, DataError> {
        match self.series.get(ticker) {
            Some(bars) if !bars.is_empty() => Ok(bars.clone()),
            _ => Err(DataError::Unavailable(ticker.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_csv(dir: &std::path::Path, ticker: &str, rows: usize) {
        let mut text = String::from("Date,Open,High,Low,Close,Volume\n");
        for i in 0..rows {
            let c = 100.0 + i as f64;
            text.push_str(&format!("2024-01-{:02},{c},{c},{c},{c},1000\n", i + 1));
        }
        fs::write(dir.join(format!("{ticker}.csv")), text).unwrap();
    }

    #[test]
    fn test_csv_provider_reads_ticker_file() {
        let dir = tempdir().unwrap();
        write_csv(dir.path(), "TCS.NS", 10);

        let provider = CsvBarProvider::new(dir.path(), None);
        let bars = provider.fetch("TCS.NS").unwrap();
        assert_eq!(bars.len(), 10);
        assert_eq!(bars.closes()[9], 109.0);
    }

    #[test]
    fn test_csv_provider_keeps_most_recent() {
        let dir = tempdir().unwrap();
        write_csv(dir.path(), "AAA", 20);

        let provider = CsvBarProvider::new(dir.path(), Some(5));
        let bars = provider.fetch("AAA").unwrap();
        assert_eq!(bars.closes(), vec![115.0, 116.0, 117.0, 118.0, 119.0]);
    }

    #[test]
    fn test_missing_or_empty_is_unavailable() {
        let dir = tempdir().unwrap();
        write_csv(dir.path(), "EMPTY", 0);

        let provider = CsvBarProvider::new(dir.path(), None);
        assert!(matches!(
            provider.fetch("NOPE"),
            Err(DataError::Unavailable(t)) if t == "NOPE"
        ));
        assert!(matches!(
            provider.fetch("EMPTY"),
            Err(DataError::Unavailable(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("BAD.csv"), "Date,Open,High,Low,Close\nxx,1,1,1,1\n").unwrap();
        let provider = CsvBarProvider::new(dir.path(), None);
        assert!(matches!(provider.fetch("BAD"), Err(DataError::Parse { .. })));
    }

    #[test]
    fn test_memory_provider() {
        let mut provider = MemoryBarProvider::new();
        provider.insert("EMPTY", BarSeries::default());
        assert!(provider.fetch("EMPTY").is_err());
        assert!(provider.fetch("OTHER").is_err());
    }
}
