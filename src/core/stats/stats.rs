//! Small descriptive-statistics helpers shared by the backtest metrics and the
//! direction classifier.

// ============================================================================
// Mean
// ============================================================================

/// Arithmetic mean. Returns NaN for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

// ============================================================================
// Variance / standard deviation (sample, n - 1 denominator)
// ============================================================================

/// Sample variance with an `n - 1` denominator. NaN when fewer than two values.
pub fn sample_variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(data);
    data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (n - 1) as f64
}

/// Sample standard deviation. NaN when fewer than two values.
pub fn sample_std_dev(data: &[f64]) -> f64 {
    sample_variance(data).sqrt()
}

/// Population standard deviation (`n` denominator). Zero for an empty slice.
pub fn population_std_dev(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    (data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / data.len() as f64).sqrt()
}

// ============================================================================
// Running aggregates
// ============================================================================

/// Running maximum: `out[i] = max(data[0..=i])`.
pub fn running_max(data: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(data.len());
    let mut peak = f64::NEG_INFINITY;
    for &x in data {
        if x > peak {
            peak = x;
        }
        out.push(peak);
    }
    out
}

/// Compounds simple returns: `out[i] = prod(1 + r[0..=i])`.
pub fn cumulative_growth(returns: &[f64]) -> Vec<f64> {
    let mut acc = 1.0;
    returns
        .iter()
        .map(|r| {
            acc *= 1.0 + r;
            acc
        })
        .collect()
}
