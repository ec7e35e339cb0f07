use backtesting::{backtest_positions, pair_trades};
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

fn dates(n: usize) -> Vec<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
    (0..n).map(|i| start + Days::new(i as u64)).collect()
}

/// Closes and a 0/1 position column of the same length
fn closes_and_positions() -> impl Strategy<Value = (Vec<f64>, Vec<i32>)> {
    prop::collection::vec((-0.1f64..0.1, 0i32..=1), 0..200).prop_map(|rows| {
        let mut price = 50.0;
        let (closes, positions): (Vec<f64>, Vec<i32>) = rows
            .into_iter()
            .map(|(m, p)| {
                price *= 1.0 + m;
                (price, p)
            })
            .unzip();
        (closes, positions)
    })
}

fn sorted_unique(max: usize) -> impl Strategy<Value = Vec<usize>> {
    prop::collection::btree_set(0..max, 0..20).prop_map(|s| s.into_iter().collect())
}

proptest! {
    #[test]
    fn pairs_are_ordered_and_disjoint(entries in sorted_unique(100), exits in sorted_unique(100)) {
        let pairs = pair_trades(&entries, &exits);
        prop_assert!(pairs.len() <= entries.len().min(exits.len()));
        for (i, &(e, x)) in pairs.iter().enumerate() {
            prop_assert!(x > e);
            prop_assert!(entries.contains(&e));
            prop_assert!(exits.contains(&x));
            if i > 0 {
                prop_assert!(pairs[i - 1].1 < x);
                prop_assert!(pairs[i - 1].0 < e);
            }
        }
    }

    #[test]
    fn equity_stays_positive((closes, positions) in closes_and_positions(), fee_bp in 0.0f64..50.0) {
        let result = backtest_positions(&dates(closes.len()), &closes, &positions, fee_bp).unwrap();

        prop_assert_eq!(result.equity_curve.len(), closes.len());
        prop_assert!(result.equity_curve.iter().all(|&e| e > 0.0));
        prop_assert!(result.max_drawdown <= 0.0 && result.max_drawdown > -1.0);
        prop_assert!((0.0..=1.0).contains(&result.win_rate));
        prop_assert_eq!(result.n_trades, result.trades.len());
        prop_assert!(result.sharpe.is_finite());
    }

    #[test]
    fn trades_match_position_toggles((closes, positions) in closes_and_positions()) {
        let result = backtest_positions(&dates(closes.len()), &closes, &positions, 5.0).unwrap();

        for t in &result.trades {
            prop_assert_eq!(positions[t.entry_index], 1);
            prop_assert!(t.entry_index == 0 || positions[t.entry_index - 1] == 0);
            prop_assert_eq!(positions[t.exit_index], 0);
            prop_assert_eq!(positions[t.exit_index - 1], 1);
            // held on every bar in between
            prop_assert!(positions[t.entry_index..t.exit_index].iter().all(|&p| p == 1));
        }
    }

    #[test]
    fn backtest_is_idempotent((closes, positions) in closes_and_positions()) {
        let d = dates(closes.len());
        let a = backtest_positions(&d, &closes, &positions, 5.0).unwrap();
        let b = backtest_positions(&d, &closes, &positions, 5.0).unwrap();
        prop_assert_eq!(a, b);
    }
}
