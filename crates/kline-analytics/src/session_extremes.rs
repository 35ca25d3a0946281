//! 세션 고가/저가 타이밍 분석.
//!
//! 세션의 첫 캔들부터 고가/저가를 추적하여 어느 쪽이 먼저 형성되었는지와
//! 각각의 형성 시각(세션 시작 기준 경과 분)을 계산합니다.

use kline_core::{Candle, EnrichedCandle, PatternedCandle, SessionExtremes};

const MILLIS_PER_MINUTE: i64 = 60_000;

/// 세션 하나를 분석합니다. 빈 세션은 `None`.
///
/// 고가는 `>=`, 저가는 `<=`로 갱신하므로 같은 값이 다시 나오면 더 늦은
/// 캔들의 `close_time`이 기록됩니다.
pub fn analyze_session(session: &[Candle]) -> Option<SessionExtremes> {
    let first = session.first()?;

    let mut high_price = first.high();
    let mut low_price = first.low();
    let mut high_time: Option<i64> = None;
    let mut low_time: Option<i64> = None;

    for candle in session {
        if candle.high() >= high_price {
            high_price = candle.high();
            high_time = Some(candle.close_time());
        }
        if candle.low() <= low_price {
            low_price = candle.low();
            low_time = Some(candle.close_time());
        }
    }

    let is_crossed = high_time.is_some() && low_time.is_some();
    let is_high_formed_first = match (high_time, low_time) {
        (Some(_), None) => true,
        (Some(high), Some(low)) => high < low,
        _ => false,
    };

    let start = first.close_time();
    let offset = |time: Option<i64>| time.map_or(0, |t| (t - start) / MILLIS_PER_MINUTE);

    Some(SessionExtremes {
        is_crossed,
        is_high_formed_first,
        high_time: offset(high_time),
        low_time: offset(low_time),
    })
}

/// `session_size`개씩 끊어 세션 주석을 붙입니다.
///
/// 같은 세션에 속한 캔들은 모두 그 세션의 결과를 받습니다. 마지막 세션은
/// 더 짧을 수 있습니다.
pub fn annotate_sessions(candles: Vec<PatternedCandle>, session_size: usize) -> Vec<EnrichedCandle> {
    let size = session_size.max(1);
    let sessions: Vec<SessionExtremes> = candles
        .chunks(size)
        .map(|chunk| {
            let session: Vec<Candle> = chunk.iter().map(|p| p.candle.clone()).collect();
            analyze_session(&session).unwrap_or_default()
        })
        .collect();

    candles
        .into_iter()
        .enumerate()
        .map(|(index, patterned)| patterned.with_session(sessions[index / size]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::test_candle_at as candle;
    use kline_core::PatternAnnotations;

    #[test]
    fn test_single_candle_session() {
        let session = [candle(0, 100.0, 105.0, 95.0, 102.0)];
        let result = analyze_session(&session).unwrap();

        assert!(result.is_crossed);
        assert!(!result.is_high_formed_first);
        assert_eq!(result.high_time, 0);
        assert_eq!(result.low_time, 0);
    }

    #[test]
    fn test_high_before_low() {
        let session = [
            candle(0, 100.0, 105.0, 99.0, 101.0),
            candle(1, 101.0, 110.0, 100.0, 102.0),
            candle(2, 102.0, 103.0, 90.0, 91.0),
        ];
        let result = analyze_session(&session).unwrap();

        assert!(result.is_crossed);
        assert!(result.is_high_formed_first);
        assert_eq!(result.high_time, 1);
        assert_eq!(result.low_time, 2);
    }

    #[test]
    fn test_low_before_high() {
        let session = [
            candle(0, 100.0, 101.0, 90.0, 95.0),
            candle(1, 95.0, 99.0, 94.0, 98.0),
            candle(2, 98.0, 120.0, 97.0, 119.0),
        ];
        let result = analyze_session(&session).unwrap();

        assert!(!result.is_high_formed_first);
        assert_eq!(result.high_time, 2);
        assert_eq!(result.low_time, 0);
    }

    #[test]
    fn test_equal_high_takes_later_candle() {
        let session = [
            candle(0, 100.0, 110.0, 99.0, 101.0),
            candle(1, 101.0, 110.0, 100.0, 102.0),
        ];
        let result = analyze_session(&session).unwrap();
        assert_eq!(result.high_time, 1);
        assert_eq!(result.low_time, 0);
    }

    #[test]
    fn test_empty_session() {
        assert!(analyze_session(&[]).is_none());
    }

    #[test]
    fn test_annotate_sessions_chunks() {
        let candles: Vec<PatternedCandle> = (0..5)
            .map(|i| {
                PatternedCandle::new(
                    candle(i, 100.0, 101.0 + i as f64, 99.0, 100.5),
                    PatternAnnotations::default(),
                )
            })
            .collect();

        let enriched = annotate_sessions(candles, 2);
        assert_eq!(enriched.len(), 5);
        // 세션 [0,1]: 고가는 1분, 저가는 두 캔들 모두 99이므로 1분
        assert_eq!(enriched[0].session.high_time, 1);
        assert_eq!(enriched[1].session, enriched[0].session);
        // 마지막 세션은 캔들 하나
        assert_eq!(enriched[4].session.high_time, 0);
    }
}
