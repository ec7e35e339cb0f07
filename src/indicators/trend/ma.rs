/// Calculates the Simple Moving Average (SMA) of `data` over a trailing window.
///
/// # Arguments
///
/// * `data` - A slice of f64 values (typically closing prices).
/// * `window` - The number of bars averaged.
///
/// # Returns
///
/// A Vec<f64> the same length as `data`. The first `window - 1` values are NaN.
/// Every value is NaN when `window` is zero or longer than the series.
pub fn sma(data: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || window > data.len() {
        return vec![f64::NAN; data.len()];
    }

    let mut out = Vec::with_capacity(data.len());
    out.resize(window - 1, f64::NAN);

    let mut sum: f64 = data.iter().take(window).sum();
    out.push(sum / window as f64);

    for i in window..data.len() {
        sum = sum - data[i - window] + data[i];
        out.push(sum / window as f64);
    }

    out
}

/// Calculates the Exponential Moving Average (EMA).
///
/// The first defined value is the SMA of the first `period` bars; later values
/// use the multiplier `2 / (period + 1)`. NaN inputs are skipped at the head of
/// the series so an EMA of an indicator with its own warm-up lines up correctly.
pub fn ema(data: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; data.len()];
    if period == 0 {
        return out;
    }

    let start = match data.iter().position(|x| !x.is_nan()) {
        Some(idx) => idx,
        None => return out,
    };
    if start + period > data.len() {
        return out;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let seed_end = start + period - 1;
    let mut prev = data[start..=seed_end].iter().sum::<f64>() / period as f64;
    out[seed_end] = prev;

    for i in (seed_end + 1)..data.len() {
        prev = (data[i] - prev) * multiplier + prev;
        out[i] = prev;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let out = sma(&data, 3);

        assert_eq!(out.len(), 5);
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert!((out[2] - 2.0).abs() < 1e-10); // (1+2+3)/3
        assert!((out[3] - 3.0).abs() < 1e-10);
        assert!((out[4] - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_sma_edge_cases() {
        let data = vec![1.0, 2.0];
        let out = sma(&data, 3);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|x| x.is_nan()));

        let out = sma(&data, 0);
        assert!(out.iter().all(|x| x.is_nan()));

        assert!(sma(&[], 5).is_empty());

        let out = sma(&data, 1);
        assert_eq!(out, data);
    }

    #[test]
    fn test_ema_seeded_with_sma() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let out = ema(&data, 3);

        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert!((out[2] - 2.0).abs() < 1e-10);
        // multiplier 0.5: (4 - 2) * 0.5 + 2 = 3
        assert!((out[3] - 3.0).abs() < 1e-10);
        assert!((out[4] - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_ema_skips_leading_nan() {
        let data = vec![f64::NAN, f64::NAN, 2.0, 4.0, 6.0];
        let out = ema(&data, 2);
        assert!(out[2].is_nan());
        assert!((out[3] - 3.0).abs() < 1e-10);
        // multiplier 2/3: (6 - 3) * 2/3 + 3 = 5
        assert!((out[4] - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_ema_too_short() {
        let out = ema(&[1.0, 2.0], 5);
        assert!(out.iter().all(|x| x.is_nan()));
    }
}
