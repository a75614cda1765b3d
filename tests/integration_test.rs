//! End-to-end simulation tests against the library API.
//!
//! Covers the worked scenarios, the error paths and the engine invariants
//! (property tests via proptest).

mod common;

use approx::assert_relative_eq;
use common::*;
use proptest::prelude::*;
use ratiotrader::domain::error::RatioError;
use ratiotrader::domain::holdings::Holdings;
use ratiotrader::domain::simulator::{SimulationParams, TradeSignal, simulate, simulate_gsr};
use ratiotrader::domain::summary::SimulationSummary;
use ratiotrader::domain::valuation::{self, Prices};
use ratiotrader::ports::ratio_port::RatioSource;

mod scenarios {
    use super::*;

    #[test]
    fn between_then_high_threshold() {
        let (gold, silver, txs, snaps) =
            simulate_gsr(10.0, 800.0, 90.0, 50.0, 10.0, &[80.0, 90.0]).unwrap();

        assert_eq!(gold, 9.0);
        assert_eq!(silver, 890.0);
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].signal, TradeSignal::HighRatio);
        assert_eq!(txs[0].sold_quantity, 1.0);
        assert_eq!(txs[0].bought_quantity, 90.0);

        assert_eq!(snaps.len(), 2);
        assert_eq!(
            (snaps[0].ratio, snaps[0].gold, snaps[0].silver, snaps[0].total),
            (80.0, 10.0, 800.0, 810.0)
        );
    }

    #[test]
    fn single_low_ratio_step() {
        let result = simulate(default_holdings(), &default_params(), &[45.0]).unwrap();
        let tx = &result.transactions[0];

        assert_eq!(tx.signal, TradeSignal::LowRatio);
        assert_eq!(tx.sold_quantity, 800.0 * 10.0 / 100.0);
        assert_eq!(tx.bought_quantity, 80.0 / 45.0);
        assert_eq!(result.final_holdings.gold, 10.0 + 80.0 / 45.0);
        assert_eq!(result.final_holdings.silver, 720.0);
    }

    #[test]
    fn default_sequence_full_run() {
        let source = ratiotrader::adapters::sequence_adapter::SequenceAdapter::default();
        let ratios = source.load_ratios().unwrap();
        let result = simulate(default_holdings(), &default_params(), &ratios).unwrap();
        let summary = SimulationSummary::compute(&result);

        // 90, 95, 100, 90 trade high; 50, 45 trade low
        assert_eq!(summary.high_ratio_trades, 4);
        assert_eq!(summary.low_ratio_trades, 2);
        assert_eq!(result.snapshots.len(), 12);

        let steps: Vec<usize> = result.transactions.iter().map(|t| t.step).collect();
        assert_eq!(steps, vec![2, 3, 4, 5, 9, 10]);

        // gold after four high trades: 10 * 0.9^4
        assert_relative_eq!(result.snapshots[6].gold, 10.0 * 0.9_f64.powi(4), epsilon = 1e-9);
    }

    #[test]
    fn each_snapshot_precedes_its_trade() {
        let result = simulate(default_holdings(), &default_params(), &[95.0, 95.0]).unwrap();
        assert_eq!(result.snapshots[0].gold, 10.0);
        assert_eq!(result.snapshots[1].gold, 9.0);
        assert_relative_eq!(result.final_holdings.gold, 8.1, epsilon = 1e-12);
    }

    #[test]
    fn valuation_of_final_holdings() {
        let result = simulate(default_holdings(), &default_params(), &[80.0, 90.0]).unwrap();
        let prices = Prices::new(2000.0, 25.0).unwrap();
        assert_relative_eq!(
            valuation::value(&result.final_holdings, &prices),
            9.0 * 2000.0 + 890.0 * 25.0
        );
    }

    #[test]
    fn mock_source_feeds_simulator() {
        let source = MockRatioSource::new(vec![100.0, 40.0]);
        let ratios = source.load_ratios().unwrap();
        let result = simulate(default_holdings(), &default_params(), &ratios).unwrap();
        assert_eq!(result.transactions.len(), 2);
        assert_eq!(result.transactions[1].signal, TradeSignal::LowRatio);
    }

    #[test]
    fn failing_source_surfaces_before_simulation() {
        let source = MockRatioSource::failing("bad row");
        assert!(matches!(
            source.load_ratios(),
            Err(RatioError::MalformedInput { .. })
        ));
    }
}

mod error_paths {
    use super::*;

    #[test]
    fn zero_ratio_reports_step_and_value() {
        let err = simulate(default_holdings(), &default_params(), &[80.0, 95.0, 0.0]).unwrap_err();
        match err {
            RatioError::InvalidRatio { step, ratio } => {
                assert_eq!(step, 2);
                assert_eq!(ratio, 0.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn infinite_ratio_rejected() {
        let err = simulate(default_holdings(), &default_params(), &[f64::INFINITY]).unwrap_err();
        assert!(matches!(err, RatioError::InvalidRatio { step: 0, .. }));
    }

    #[test]
    fn trade_percent_over_hundred_rejected() {
        let params = SimulationParams::new(90.0, 50.0, 120.0);
        let err = simulate(default_holdings(), &params, &[95.0]).unwrap_err();
        assert!(matches!(err, RatioError::InvalidTradePercent { value } if value == 120.0));
    }

    #[test]
    fn zero_trade_percent_is_valid() {
        let params = SimulationParams::new(90.0, 50.0, 0.0);
        let result = simulate(default_holdings(), &params, &[95.0, 45.0]).unwrap();
        assert_eq!(result.final_holdings, default_holdings());
    }
}

proptest! {
    #[test]
    fn holdings_stay_non_negative(
        gold in 0.0f64..1e6,
        silver in 0.0f64..1e6,
        pct in 0.0f64..=100.0,
        low in 10.0f64..100.0,
        high in 10.0f64..150.0,
        ratios in prop::collection::vec(1.0f64..200.0, 0..50),
    ) {
        let params = SimulationParams::new(high, low, pct);
        let result = simulate(Holdings::new(gold, silver), &params, &ratios).unwrap();
        for s in &result.snapshots {
            prop_assert!(s.gold >= 0.0 && s.silver >= 0.0);
        }
        prop_assert!(result.final_holdings.gold >= 0.0);
        prop_assert!(result.final_holdings.silver >= 0.0);
    }

    #[test]
    fn snapshots_correspond_to_ratios(
        ratios in prop::collection::vec(1.0f64..200.0, 0..50),
    ) {
        let result = simulate(default_holdings(), &default_params(), &ratios).unwrap();
        prop_assert_eq!(result.snapshots.len(), ratios.len());
        for (i, s) in result.snapshots.iter().enumerate() {
            prop_assert_eq!(s.step, i);
            prop_assert_eq!(s.ratio, ratios[i]);
            prop_assert_eq!(s.total, s.gold + s.silver);
        }
    }

    #[test]
    fn overlapping_thresholds_always_trade_high(
        high in 10.0f64..50.0,
        width in 0.0f64..50.0,
        t in 0.0f64..=1.0,
    ) {
        let low = high + width;
        let ratio = high + t * width;
        let params = SimulationParams::new(high, low, 10.0);
        let result = simulate(default_holdings(), &params, &[ratio]).unwrap();
        prop_assert_eq!(result.transactions.len(), 1);
        prop_assert_eq!(result.transactions[0].signal, TradeSignal::HighRatio);
    }

    #[test]
    fn ratios_between_thresholds_change_nothing(
        ratios in prop::collection::vec(50.0001f64..89.9999, 0..50),
    ) {
        let result = simulate(default_holdings(), &default_params(), &ratios).unwrap();
        prop_assert_eq!(result.final_holdings, default_holdings());
        prop_assert!(result.transactions.is_empty());
    }

    #[test]
    fn identical_inputs_identical_outputs(
        ratios in prop::collection::vec(1.0f64..200.0, 0..30),
    ) {
        let a = simulate(default_holdings(), &default_params(), &ratios).unwrap();
        let b = simulate(default_holdings(), &default_params(), &ratios).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn swap_quantities_follow_ratio(
        ratio in 1.0f64..200.0,
    ) {
        let result = simulate(default_holdings(), &default_params(), &[ratio]).unwrap();
        if let Some(tx) = result.transactions.first() {
            match tx.signal {
                TradeSignal::HighRatio => prop_assert_eq!(tx.bought_quantity, tx.sold_quantity * ratio),
                TradeSignal::LowRatio => prop_assert_eq!(tx.bought_quantity, tx.sold_quantity / ratio),
            }
        }
    }
}

#[test]
fn empty_sequence_is_identity() {
    let (gold, silver, txs, snaps) = simulate_gsr(3.5, 7.25, 90.0, 50.0, 10.0, &[]).unwrap();
    assert_eq!((gold, silver), (3.5, 7.25));
    assert!(txs.is_empty());
    assert!(snaps.is_empty());
}
