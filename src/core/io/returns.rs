/// Simple period-over-period change, aligned with the input.
///
/// `out[0]` is 0 (no prior value). A step from a zero value also reads 0
/// rather than an infinite change.
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }
    out.push(0.0);
    out.extend(values.windows(2).map(|w| {
        if w[0] == 0.0 {
            0.0
        } else {
            w[1] / w[0] - 1.0
        }
    }));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_change() {
        let prices = vec![100.0, 110.0, 105.0, 115.5];
        let returns = pct_change(&prices);

        assert_eq!(returns.len(), 4);
        assert_eq!(returns[0], 0.0);
        assert!((returns[1] - 0.1).abs() < 1e-10);
        assert!((returns[2] - (-0.045454545)).abs() < 1e-6);
        assert!((returns[3] - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_pct_change_zero_base() {
        let returns = pct_change(&[0.0, 50.0, 100.0]);
        assert_eq!(returns, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_pct_change_empty() {
        assert!(pct_change(&[]).is_empty());
        assert_eq!(pct_change(&[5.0]), vec![0.0]);
    }
}
