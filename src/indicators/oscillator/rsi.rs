/// Calculates the Relative Strength Index (RSI) with Wilder's smoothing.
///
/// # Arguments
///
/// * `data` - A slice of f64 values (prices).
/// * `period` - The lookback period for RSI (typically 14).
///
/// # Returns
///
/// A Vec<f64> containing RSI values in [0, 100]. The first `period` values are
/// NaN because `period` price changes are needed for the first average.
/// A window with gains but no losses reads 100; a window with no movement at
/// all reads 50.
pub fn rsi(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || period >= data.len() {
        return vec![f64::NAN; data.len()];
    }

    let mut rsi_values = vec![f64::NAN; data.len()];
    let mut gains = 0.0;
    let mut losses = 0.0;

    for i in 1..=period {
        let change = data[i] - data[i - 1];
        if change > 0.0 {
            gains += change;
        } else {
            losses -= change;
        }
    }

    let mut avg_gain = gains / period as f64;
    let mut avg_loss = losses / period as f64;
    rsi_values[period] = rsi_from_averages(avg_gain, avg_loss);

    for i in (period + 1)..data.len() {
        let change = data[i] - data[i - 1];
        let (gain, loss) = if change > 0.0 {
            (change, 0.0)
        } else {
            (0.0, -change)
        };

        avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;
        rsi_values[i] = rsi_from_averages(avg_gain, avg_loss);
    }

    rsi_values
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 { 50.0 } else { 100.0 }
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }
}
