//! 분석 엔진 속성 테스트
//!
//! 꼬리 비율 합, 이상치 임계값 단조성, 분류 결정성 검증

use kline_analytics::{
    normalize_row, CandlePatternClassifier, OutlierDetector, OutlierMethod, RenkoBuilder,
};
use kline_core::{PricePoint, RawKline};
use proptest::prelude::*;

/// (open, high, low, close): low ≤ open/close ≤ high, high > low
fn ohlc() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (1.0f64..10_000.0, 0.01f64..500.0, 0.0f64..=1.0, 0.0f64..=1.0).prop_map(
        |(low, range, open_frac, close_frac)| {
            let high = low + range;
            (low + range * open_frac, high, low, low + range * close_frac)
        },
    )
}

fn raw((open, high, low, close): (f64, f64, f64, f64)) -> RawKline {
    RawKline::from_values(1_700_000_000_000, open, high, low, close, 1.0, 1_700_000_059_999)
}

proptest! {
    #[test]
    fn wick_and_body_percentages_sum_to_hundred(bar in ohlc()) {
        let candle = normalize_row(&raw(bar), 0, "BTCUSDT", "1m").unwrap();
        let range = candle.range();
        prop_assume!(range > 0.0);

        let body_pct = candle.body() / range * 100.0;
        let total = candle.geometry.upper_wick_pct + candle.geometry.lower_wick_pct + body_pct;
        // 꼬리 비율은 각각 소수점 둘째 자리로 반올림됨
        prop_assert!((total - 100.0).abs() <= 0.011, "total = {}", total);
    }

    #[test]
    fn classification_is_deterministic(bar in ohlc()) {
        let candle = normalize_row(&raw(bar), 0, "BTCUSDT", "1m").unwrap();
        let classifier = CandlePatternClassifier::default();
        prop_assert_eq!(classifier.classify_single(&candle), classifier.classify_single(&candle));
    }

    #[test]
    fn zscore_is_idempotent(values in prop::collection::vec(-1.0e6f64..1.0e6, 0..64)) {
        let detector = OutlierDetector::new(2.0);
        let first = detector.detect(&values, OutlierMethod::ZScore);
        let second = detector.detect(&values, OutlierMethod::ZScore);
        prop_assert_eq!(first.flags.len(), values.len());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn raising_threshold_never_adds_flags(
        values in prop::collection::vec(-1.0e6f64..1.0e6, 0..64),
        low in 0.0f64..5.0,
        extra in 0.0f64..5.0,
    ) {
        for method in [OutlierMethod::ZScore, OutlierMethod::Iqr] {
            let loose = OutlierDetector::new(low).detect(&values, method);
            let strict = OutlierDetector::new(low + extra).detect(&values, method);
            for (strict_flag, loose_flag) in strict.flags.iter().zip(&loose.flags) {
                prop_assert!(!strict_flag || *loose_flag);
            }
        }
    }

    #[test]
    fn renko_bricks_are_contiguous(
        prices in prop::collection::vec(1.0f64..1_000.0, 2..64),
        size in 1.0f64..50.0,
    ) {
        let points: Vec<PricePoint> = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PricePoint::new(i as i64, p))
            .collect();
        let chart = RenkoBuilder::new(Some(size)).build(&points).unwrap();

        for (i, brick) in chart.bricks.iter().enumerate() {
            prop_assert_eq!(brick.index, i);
            prop_assert!(((brick.close - brick.open).abs() - size).abs() < 1e-6);
        }
        for pair in chart.bricks.windows(2) {
            prop_assert_eq!(pair[0].close, pair[1].open);
            prop_assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }
}
