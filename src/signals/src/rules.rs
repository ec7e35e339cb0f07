/// RSI level below which a pullback counts as oversold
pub const RSI_OVERSOLD: f64 = 30.0;

/// RSI level above which a long position is closed
pub const RSI_EXIT: f64 = 50.0;

/// Entry: oversold RSI inside an uptrend (fast SMA above slow SMA).
///
/// Any undefined (NaN) input makes the comparison false.
pub fn buy_rule(rsi: f64, sma_fast: f64, sma_slow: f64) -> bool {
    rsi < RSI_OVERSOLD && sma_fast > sma_slow
}

/// Exit: trend turned down or RSI recovered past the midline.
pub fn exit_rule(rsi: f64, sma_fast: f64, sma_slow: f64) -> bool {
    sma_fast < sma_slow || rsi > RSI_EXIT
}

/// Per-bar rule flags, each computed from that bar's indicator values only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleFlags {
    pub buy: Vec<bool>,
    pub exit: Vec<bool>,
}

pub fn evaluate_rules(rsi: &[f64], sma_fast: &[f64], sma_slow: &[f64]) -> RuleFlags {
    let n = rsi.len().min(sma_fast.len()).min(sma_slow.len());
    let mut flags = RuleFlags {
        buy: Vec::with_capacity(n),
        exit: Vec::with_capacity(n),
    };
    for i in 0..n {
        flags.buy.push(buy_rule(rsi[i], sma_fast[i], sma_slow[i]));
        flags.exit.push(exit_rule(rsi[i], sma_fast[i], sma_slow[i]));
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_rule() {
        assert!(buy_rule(25.0, 101.0, 100.0));
        assert!(!buy_rule(30.0, 101.0, 100.0));
        assert!(!buy_rule(25.0, 100.0, 100.0));
        assert!(!buy_rule(25.0, 99.0, 100.0));
    }

    #[test]
    fn test_exit_rule() {
        assert!(exit_rule(40.0, 99.0, 100.0));
        assert!(exit_rule(50.5, 101.0, 100.0));
        assert!(!exit_rule(50.0, 101.0, 100.0));
        assert!(!exit_rule(40.0, 100.0, 100.0));
    }

    #[test]
    fn test_undefined_values_never_trigger() {
        let nan = f64::NAN;
        assert!(!buy_rule(nan, 101.0, 100.0));
        assert!(!buy_rule(20.0, nan, 100.0));
        assert!(!exit_rule(nan, nan, nan));
        // a defined crossover still exits while RSI is warming up
        assert!(exit_rule(nan, 99.0, 100.0));
    }

    #[test]
    fn test_evaluate_rules_aligned() {
        let flags = evaluate_rules(
            &[f64::NAN, 20.0, 60.0],
            &[f64::NAN, 105.0, 105.0],
            &[f64::NAN, 100.0, 100.0],
        );
        assert_eq!(flags.buy, vec![false, true, false]);
        assert_eq!(flags.exit, vec![false, false, true]);
    }
}
