//! Next-day direction classifier on the same indicators the signals use.
//!
//! Features per bar: RSI(14), SMA(20), SMA(50), MACD line, MACD signal line
//! and the volume change. The label is 1 when the next close is higher.

use std::fmt;

use chrono::NaiveDate;
use indicators::{MacdConfig, macd, rsi, sma};
use mini_algo::core::io::pct_change;
use mini_algo::models::{LogisticParams, LogisticRegression, ModelError};
use mini_algo::{BarSeries, DataError};
use thiserror::Error;
use tracing::info;

use crate::data::BarProvider;

pub const FEATURE_NAMES: [&str; 6] = ["RSI", "SMA20", "SMA50", "MACD", "MACD_SIG", "VOL_CHG"];

/// Fewest labelled rows worth training on
pub const MIN_SAMPLES: usize = 60;

#[derive(Debug, Error)]
pub enum MlError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error("not enough samples for ML: {found} < {required}")]
    NotEnoughSamples { found: usize, required: usize },

    #[error("test fraction {0} leaves an empty train or test set")]
    EmptySplit(f64),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Row-major feature matrix with one label per row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    pub dates: Vec<NaiveDate>,
    pub data: Vec<f64>,
    pub labels: Vec<u8>,
}

impl FeatureSet {
    pub fn nvars(&self) -> usize {
        FEATURE_NAMES.len()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn row(&self, i: usize) -> &[f64] {
        let n = self.nvars();
        &self.data[i * n..(i + 1) * n]
    }

    fn slice(&self, start: usize, end: usize) -> FeatureSet {
        let n = self.nvars();
        FeatureSet {
            dates: self.dates[start..end].to_vec(),
            data: self.data[start * n..end * n].to_vec(),
            labels: self.labels[start..end].to_vec(),
        }
    }
}

/// Build features and next-day labels.
///
/// Rows where any indicator is still warming up are dropped, and so is the
/// final bar, which has no next close to label it.
pub fn make_features(bars: &BarSeries) -> FeatureSet {
    let close = bars.closes();
    let n = close.len();

    let rsi = rsi(&close, 14);
    let sma20 = sma(&close, 20);
    let sma50 = sma(&close, 50);
    let macd = macd(&close, MacdConfig::default());
    let vol_chg = pct_change(&bars.volumes());
    let dates = bars.dates();

    let mut features = FeatureSet::default();
    for i in 0..n.saturating_sub(1) {
        let row = [
            rsi[i],
            sma20[i],
            sma50[i],
            macd.macd_line[i],
            macd.signal_line[i],
            vol_chg[i],
        ];
        if row.iter().any(|v| !v.is_finite()) {
            continue;
        }
        features.dates.push(dates[i]);
        features.data.extend_from_slice(&row);
        features.labels.push(u8::from(close[i + 1] > close[i]));
    }
    features
}

/// Chronological split: the first `1 - test_frac` of rows train, the rest test
pub fn time_split_train_test(
    features: &FeatureSet,
    test_frac: f64,
) -> Result<(FeatureSet, FeatureSet), MlError> {
    let n = features.len();
    let cut = (n as f64 * (1.0 - test_frac)).floor() as usize;
    if !(test_frac > 0.0 && test_frac < 1.0) || cut == 0 || cut >= n {
        return Err(MlError::EmptySplit(test_frac));
    }
    Ok((features.slice(0, cut), features.slice(cut, n)))
}

pub fn train(features: &FeatureSet, max_iter: usize) -> Result<LogisticRegression, MlError> {
    let params = LogisticParams {
        max_iter,
        ..LogisticParams::default()
    };
    Ok(LogisticRegression::fit(
        &features.data,
        &features.labels,
        features.nvars(),
        &params,
    )?)
}

/// Precision / recall / F1 for one class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    pub label: u8,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub accuracy: f64,
    /// Class 0 then class 1
    pub classes: [ClassMetrics; 2],
}

/// Score predictions against true labels. Undefined ratios read 0.
pub fn classification_metrics(truth: &[u8], predicted: &[u8]) -> Evaluation {
    let total = truth.len();
    let correct = truth.iter().zip(predicted).filter(|(t, p)| t == p).count();
    let accuracy = if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64
    };

    let class = |label: u8| {
        let tp = truth
            .iter()
            .zip(predicted)
            .filter(|&(&t, &p)| t == label && p == label)
            .count();
        let predicted_n = predicted.iter().filter(|&&p| p == label).count();
        let support = truth.iter().filter(|&&t| t == label).count();

        let precision = ratio(tp, predicted_n);
        let recall = ratio(tp, support);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        ClassMetrics {
            label,
            precision,
            recall,
            f1,
            support,
        }
    };

    Evaluation {
        accuracy,
        classes: [class(0), class(1)],
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

pub fn evaluate(model: &LogisticRegression, test: &FeatureSet) -> Evaluation {
    let predicted = model.predict(&test.data);
    classification_metrics(&test.labels, &predicted)
}

impl Evaluation {
    pub fn support(&self) -> usize {
        self.classes.iter().map(|c| c.support).sum()
    }
}

impl fmt::Display for Evaluation {
    /// Classification report, three decimals
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>12} {:>9.3} {:>9.3} {:>9.3} {:>9}",
                c.label, c.precision, c.recall, c.f1, c.support
            )?;
        }
        writeln!(f)?;

        let total = self.support();
        writeln!(
            f,
            "{:>12} {:>9} {:>9} {:>9.3} {:>9}",
            "accuracy", "", "", self.accuracy, total
        )?;

        let macro_avg = |get: fn(&ClassMetrics) -> f64| {
            self.classes.iter().map(get).sum::<f64>() / self.classes.len() as f64
        };
        writeln!(
            f,
            "{:>12} {:>9.3} {:>9.3} {:>9.3} {:>9}",
            "macro avg",
            macro_avg(|c| c.precision),
            macro_avg(|c| c.recall),
            macro_avg(|c| c.f1),
            total
        )?;

        let weighted_avg = |get: fn(&ClassMetrics) -> f64| {
            if total == 0 {
                return 0.0;
            }
            self.classes
                .iter()
                .map(|c| get(c) * c.support as f64)
                .sum::<f64>()
                / total as f64
        };
        writeln!(
            f,
            "{:>12} {:>9.3} {:>9.3} {:>9.3} {:>9}",
            "weighted avg",
            weighted_avg(|c| c.precision),
            weighted_avg(|c| c.recall),
            weighted_avg(|c| c.f1),
            total
        )
    }
}

/// Fetch, featurize, split, train and score one ticker
pub fn run_ml<P: BarProvider + ?Sized>(
    ticker: &str,
    provider: &P,
    test_frac: f64,
    max_iter: usize,
) -> Result<Evaluation, MlError> {
    let bars = provider.fetch(ticker)?;
    let features = make_features(&bars);
    if features.len() < MIN_SAMPLES {
        return Err(MlError::NotEnoughSamples {
            found: features.len(),
            required: MIN_SAMPLES,
        });
    }

    let (train_set, test_set) = time_split_train_test(&features, test_frac)?;
    let model = train(&train_set, max_iter)?;
    let evaluation = evaluate(&model, &test_set);

    info!(
        "[ML] {} accuracy: {:.3} ({} train / {} test, {} iterations)\n{}",
        ticker,
        evaluation.accuracy,
        train_set.len(),
        test_set.len(),
        model.iterations,
        evaluation
    );
    Ok(evaluation)
}
