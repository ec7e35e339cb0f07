use chrono::{Days, NaiveDate};
use mini_algo::{Bar, BarSeries};
use proptest::prelude::*;
use signals::{SignalConfig, generate_signals};

fn series_from_closes(closes: &[f64]) -> BarSeries {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Bar {
            date: start + Days::new(i as u64),
            open: c,
            high: c,
            low: c,
            close: c,
            volume: 10_000.0,
        })
        .collect();
    BarSeries::new(bars).unwrap()
}

/// Random walk of daily moves within +/-8%, long enough to get past warm-up
fn price_path() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.08f64..0.08, 1..160).prop_map(|moves| {
        let mut price = 100.0;
        moves
            .into_iter()
            .map(|m| {
                price *= 1.0 + m;
                price
            })
            .collect()
    })
}

fn small_windows() -> SignalConfig {
    SignalConfig {
        rsi_window: 5,
        sma_fast_window: 4,
        sma_slow_window: 10,
    }
}

proptest! {
    #[test]
    fn position_flips_only_after_opposite_rule(closes in price_path()) {
        let s = generate_signals(&series_from_closes(&closes), &small_windows()).unwrap();

        prop_assert_eq!(s.position[0], 0);
        for i in 1..s.len() {
            prop_assert!(s.position[i] == 0 || s.position[i] == 1);
            if s.position[i] != s.position[i - 1] {
                if s.position[i] == 1 {
                    prop_assert!(s.buy_rule[i - 1]);
                } else {
                    prop_assert!(s.exit_rule[i - 1]);
                }
            }
        }
    }

    #[test]
    fn positions_do_not_look_ahead(closes in price_path(), cut in 1usize..160) {
        let cut = cut.min(closes.len());
        let config = small_windows();
        let full = generate_signals(&series_from_closes(&closes), &config).unwrap();
        let prefix = generate_signals(&series_from_closes(&closes[..cut]), &config).unwrap();

        prop_assert_eq!(&prefix.position[..], &full.position[..cut]);
        prop_assert_eq!(&prefix.buy_rule[..], &full.buy_rule[..cut]);
    }

    #[test]
    fn last_bar_does_not_move_its_own_position(closes in price_path(), shock in -0.5f64..0.5) {
        let config = small_windows();
        let mut shocked = closes.clone();
        if let Some(last) = shocked.last_mut() {
            *last *= 1.0 + shock;
        }
        let a = generate_signals(&series_from_closes(&closes), &config).unwrap();
        let b = generate_signals(&series_from_closes(&shocked), &config).unwrap();
        prop_assert_eq!(a.position, b.position);
    }

    #[test]
    fn generation_is_deterministic(closes in price_path()) {
        let bars = series_from_closes(&closes);
        let config = SignalConfig::default();
        let a = generate_signals(&bars, &config).unwrap();
        let b = generate_signals(&bars, &config).unwrap();
        prop_assert_eq!(a.position, b.position);
        prop_assert_eq!(a.buy_rule, b.buy_rule);
        prop_assert_eq!(a.exit_rule, b.exit_rule);
    }
}

#[test]
fn oversold_dip_in_uptrend_enters_next_bar() {
    // 60 bars rising by 1, then a 40 point drop at bar 60
    let mut closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    closes.push(119.0);
    closes.push(119.0);

    let s = generate_signals(&series_from_closes(&closes), &SignalConfig::default()).unwrap();

    assert!(s.rsi[60] < 30.0);
    assert!(s.sma_fast[60] > s.sma_slow[60]);
    assert_eq!(s.buy_rule.iter().position(|&b| b), Some(60));
    assert_eq!(s.position[60], 0);
    assert_eq!(s.position[61], 1);
}
