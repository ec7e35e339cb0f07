use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DataError;

/// One daily OHLCV record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Ordered, de-duplicated daily bars.
///
/// Dates are strictly increasing, prices are finite and positive, volume is
/// finite and non-negative. The series cannot be mutated once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Build a series from bars already in date order, validating every bar.
    pub fn new(bars: Vec<Bar>) -> Result<Self, DataError> {
        for (index, bar) in bars.iter().enumerate() {
            validate_bar(index, bar)?;
            if index > 0 && bar.date <= bars[index - 1].date {
                return Err(DataError::Invalid {
                    index,
                    message: format!(
                        "date {} does not follow {}",
                        bar.date,
                        bars[index - 1].date
                    ),
                });
            }
        }
        Ok(Self { bars })
    }

    /// Sort by date, then validate. Duplicate dates are still rejected.
    pub fn from_unsorted(mut bars: Vec<Bar>) -> Result<Self, DataError> {
        bars.sort_by_key(|b| b.date);
        Self::new(bars)
    }

    /// Get the number of bars
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// The most recent `n` bars (all of them if the series is shorter).
    pub fn tail(&self, n: usize) -> BarSeries {
        let start = self.bars.len().saturating_sub(n);
        BarSeries {
            bars: self.bars[start..].to_vec(),
        }
    }
}

fn validate_bar(index: usize, bar: &Bar) -> Result<(), DataError> {
    let prices = [bar.open, bar.high, bar.low, bar.close];
    if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
        return Err(DataError::Invalid {
            index,
            message: "non-positive or non-finite price".to_string(),
        });
    }
    if !bar.volume.is_finite() || bar.volume < 0.0 {
        return Err(DataError::Invalid {
            index,
            message: "negative or non-finite volume".to_string(),
        });
    }
    Ok(())
}

/// Column positions inside a bar file
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: Option<usize>,
}

impl Default for Columns {
    fn default() -> Self {
        Columns {
            date: 0,
            open: 1,
            high: 2,
            low: 3,
            close: 4,
            volume: Some(5),
        }
    }
}

impl Columns {
    fn from_header(fields: &[&str], line: usize) -> Result<Self, DataError> {
        let find = |name: &str| {
            fields
                .iter()
                .position(|f| f.trim().trim_matches('"').eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| DataError::Parse {
                line,
                message: format!("header has no {name} column"),
            })
        };
        Ok(Columns {
            date: require("date")?,
            open: require("open")?,
            high: require("high")?,
            low: require("low")?,
            close: require("close")?,
            volume: find("volume"),
        })
    }
}

/// Read a daily bar file.
///
/// Accepted layouts:
/// * comma-separated with a header naming `Date,Open,High,Low,Close[,Volume]`
///   in any order (extra columns are ignored),
/// * comma- or whitespace-separated without a header, fields in the order
///   date, open, high, low, close and an optional volume.
///
/// Dates may be `YYYY-MM-DD` or `YYYYMMDD`; a time-of-day suffix is ignored.
/// Bars are sorted by date before validation.
pub fn read_bar_file<P: AsRef<Path>>(filename: P) -> Result<BarSeries, DataError> {
    let path = filename.as_ref();
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let reader = BufReader::new(file);
    let mut columns: Option<Columns> = None;
    let mut bars = Vec::new();

    for (line_idx, line_result) in reader.lines().enumerate() {
        let line_num = line_idx + 1;
        let line = line_result.map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let fields: Vec<&str> = if trimmed.contains(',') {
            trimmed.split(',').map(str::trim).collect()
        } else {
            trimmed.split_whitespace().collect()
        };

        if columns.is_none() {
            let first = fields[0].trim_matches('"');
            if first.chars().next().is_some_and(|ch| ch.is_ascii_alphabetic()) {
                columns = Some(Columns::from_header(&fields, line_num)?);
                continue;
            }
            columns = Some(Columns::default());
        }

        bars.push(parse_bar(&fields, columns.unwrap_or_default(), line_num)?);
    }

    BarSeries::from_unsorted(bars)
}

fn parse_bar(fields: &[&str], cols: Columns, line: usize) -> Result<Bar, DataError> {
    let field = |idx: usize, name: &str| {
        fields
            .get(idx)
            .map(|s| s.trim_matches('"'))
            .ok_or_else(|| DataError::Parse {
                line,
                message: format!("missing {name}"),
            })
    };
    let number = |idx: usize, name: &str| -> Result<f64, DataError> {
        field(idx, name)?.parse::<f64>().map_err(|_| DataError::Parse {
            line,
            message: format!("invalid {name}"),
        })
    };

    let date = parse_date(field(cols.date, "date")?).ok_or_else(|| DataError::Parse {
        line,
        message: "invalid date".to_string(),
    })?;

    let volume = match cols.volume {
        Some(idx) if idx < fields.len() => number(idx, "volume")?,
        _ => 0.0,
    };

    Ok(Bar {
        date,
        open: number(cols.open, "open")?,
        high: number(cols.high, "high")?,
        low: number(cols.low, "low")?,
        close: number(cols.close, "close")?,
        volume,
    })
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.split([' ', 'T']).next().unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(day, "%Y%m%d"))
        .ok()
}
