use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};
use signals::SignalConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Runner configuration.
///
/// Loaded from TOML; any field left out takes its default. Command-line
/// arguments override file values (see [`Config::resolve`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Tickers to backtest
    #[serde(default = "default_tickers")]
    pub tickers: Vec<String>,

    /// Directory holding one `<TICKER>.csv` bar file per ticker
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Keep only the most recent bars of each file
    #[serde(default)]
    pub max_bars: Option<usize>,

    #[serde(default = "default_rsi_window")]
    pub rsi_window: usize,

    #[serde(default = "default_sma_fast")]
    pub sma_fast: usize,

    #[serde(default = "default_sma_slow")]
    pub sma_slow: usize,

    /// Fee per trade side in basis points
    #[serde(default = "default_fee_bp")]
    pub fee_bp: f64,

    /// Ticker for the next-day direction classifier; skipped when unset
    #[serde(default)]
    pub ml_ticker: Option<String>,

    /// Fraction of samples held out (chronologically last) for testing
    #[serde(default = "default_ml_test_frac")]
    pub ml_test_frac: f64,

    #[serde(default = "default_ml_max_iter")]
    pub ml_max_iter: usize,

    /// JSON summary report
    #[serde(default)]
    pub report_path: Option<PathBuf>,

    /// Directory for per-ticker text reports
    #[serde(default)]
    pub report_dir: Option<PathBuf>,
}

fn default_tickers() -> Vec<String> {
    ["RELIANCE.NS", "TCS.NS", "HDFCBANK.NS"]
        .iter()
        .map(|t| t.to_string())
        .collect()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data/")
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

fn default_fee_bp() -> f64 {
    backtesting::DEFAULT_FEE_BP
}

fn default_ml_test_frac() -> f64 {
    0.25
}

fn default_ml_max_iter() -> usize {
    200
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tickers: default_tickers(),
            data_dir: default_data_dir(),
            max_bars: None,
            rsi_window: default_rsi_window(),
            sma_fast: default_sma_fast(),
            sma_slow: default_sma_slow(),
            fee_bp: default_fee_bp(),
            ml_ticker: None,
            ml_test_frac: default_ml_test_frac(),
            ml_max_iter: default_ml_max_iter(),
            report_path: None,
            report_dir: None,
        }
    }
}

/// Command-line arguments
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "run_core")]
#[command(about = "RSI / SMA long-only backtest over a list of tickers")]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Comma-separated tickers
    #[arg(long, value_delimiter = ',')]
    pub tickers: Option<Vec<String>>,

    /// Directory of <TICKER>.csv bar files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Keep only the most recent N bars
    #[arg(long)]
    pub max_bars: Option<usize>,

    #[arg(long)]
    pub rsi_window: Option<usize>,

    #[arg(long)]
    pub sma_fast: Option<usize>,

    #[arg(long)]
    pub sma_slow: Option<usize>,

    /// Fee per trade side in basis points
    #[arg(long)]
    pub fee_bp: Option<f64>,

    /// Run the direction classifier on this ticker
    #[arg(long)]
    pub ml_ticker: Option<String>,

    #[arg(long)]
    pub ml_test_frac: Option<f64>,

    #[arg(long)]
    pub ml_max_iter: Option<usize>,

    /// Write the JSON summary here
    #[arg(long)]
    pub report_path: Option<PathBuf>,

    /// Write one text report per ticker into this directory
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// File (or defaults), then command-line overrides, then validation
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        config.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(tickers) = &args.tickers {
            self.tickers = tickers.clone();
        }
        if let Some(dir) = &args.data_dir {
            self.data_dir = dir.clone();
        }
        if args.max_bars.is_some() {
            self.max_bars = args.max_bars;
        }
        if let Some(w) = args.rsi_window {
            self.rsi_window = w;
        }
        if let Some(w) = args.sma_fast {
            self.sma_fast = w;
        }
        if let Some(w) = args.sma_slow {
            self.sma_slow = w;
        }
        if let Some(fee) = args.fee_bp {
            self.fee_bp = fee;
        }
        if args.ml_ticker.is_some() {
            self.ml_ticker = args.ml_ticker.clone();
        }
        if let Some(frac) = args.ml_test_frac {
            self.ml_test_frac = frac;
        }
        if let Some(n) = args.ml_max_iter {
            self.ml_max_iter = n;
        }
        if args.report_path.is_some() {
            self.report_path = args.report_path.clone();
        }
        if args.report_dir.is_some() {
            self.report_dir = args.report_dir.clone();
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tickers.is_empty() {
            return Err(ConfigError::Invalid("tickers must not be empty".to_string()));
        }
        if let Some(t) = self.tickers.iter().find(|t| t.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("blank ticker {t:?}")));
        }
        self.signal_config()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if !self.fee_bp.is_finite() || self.fee_bp < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "fee_bp must be finite and non-negative, got {}",
                self.fee_bp
            )));
        }
        if self.max_bars == Some(0) {
            return Err(ConfigError::Invalid(
                "max_bars must be greater than 0".to_string(),
            ));
        }
        if !(self.ml_test_frac > 0.0 && self.ml_test_frac < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "ml_test_frac must be in (0, 1), got {}",
                self.ml_test_frac
            )));
        }
        if self.ml_max_iter == 0 {
            return Err(ConfigError::Invalid(
                "ml_max_iter must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn signal_config(&self) -> SignalConfig {
        SignalConfig {
            rsi_window: self.rsi_window,
            sma_fast_window: self.sma_fast,
            sma_slow_window: self.sma_slow,
        }
    }
}
