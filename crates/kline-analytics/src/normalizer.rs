//! 원시 OHLCV 행 정규화.
//!
//! 위치 기반 7필드 행을 [`Candle`]로 변환하면서 기하 정보를 한 번 계산합니다.
//! 고가와 저가가 같은 캔들은 꼬리 비율을 0.0으로 기록합니다.

use chrono::{DateTime, Utc};
use kline_core::{Candle, CandleBase, CandleGeometry, RawKline, RowPolicy};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::indicators::trend::round2;

/// 원시 행 하나를 정규화합니다.
///
/// `index`는 오류 보고용 배치 내 위치입니다.
pub fn normalize_row(
    raw: &RawKline,
    index: usize,
    symbol: &str,
    interval: &str,
) -> AnalyticsResult<Candle> {
    if raw.len() < RawKline::FIELD_COUNT {
        return Err(malformed(
            index,
            format!("필드 {}개 필요, {}개 제공", RawKline::FIELD_COUNT, raw.len()),
        ));
    }

    let open_time = time_field(raw, RawKline::OPEN_TIME, "open_time", index)?;
    let close_time = time_field(raw, RawKline::CLOSE_TIME, "close_time", index)?;
    if close_time <= open_time {
        return Err(malformed(
            index,
            format!("close_time {} <= open_time {}", close_time, open_time),
        ));
    }

    let base = CandleBase {
        symbol: symbol.to_string(),
        interval: interval.to_string(),
        open_time,
        close_time,
        open: price_field(raw, RawKline::OPEN, "open", index)?,
        high: price_field(raw, RawKline::HIGH, "high", index)?,
        low: price_field(raw, RawKline::LOW, "low", index)?,
        close: price_field(raw, RawKline::CLOSE, "close", index)?,
        volume: price_field(raw, RawKline::VOLUME, "volume", index)?,
    };

    let geometry = derive_geometry(&base)
        .ok_or_else(|| malformed(index, format!("open_time 범위 초과: {}", open_time)))?;

    Ok(Candle::new(base, geometry))
}

/// 배치 정규화.
///
/// `RowPolicy::Skip`이면 잘못된 행을 경고와 함께 건너뛰고,
/// `RowPolicy::Abort`이면 첫 오류를 그대로 반환합니다.
pub fn normalize_batch(
    rows: &[RawKline],
    symbol: &str,
    interval: &str,
    policy: RowPolicy,
) -> AnalyticsResult<Vec<Candle>> {
    let mut candles = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;

    for (index, raw) in rows.iter().enumerate() {
        match normalize_row(raw, index, symbol, interval) {
            Ok(candle) => candles.push(candle),
            Err(e) if policy == RowPolicy::Skip => {
                warn!(error = %e, "잘못된 행 건너뜀");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    debug!(
        symbol,
        interval,
        rows = rows.len(),
        candles = candles.len(),
        skipped,
        "원시 행 정규화 완료"
    );

    Ok(candles)
}

/// 입력값에서 기하 정보를 계산합니다.
///
/// `open_time`이 UTC 시각으로 표현 불가능하면 `None`.
pub fn derive_geometry(base: &CandleBase) -> Option<CandleGeometry> {
    let date = DateTime::<Utc>::from_timestamp_millis(base.open_time)?;

    let body_top = base.open.max(base.close);
    let body_bottom = base.open.min(base.close);
    let range = base.range();

    let (upper_wick_pct, lower_wick_pct) = if range == 0.0 {
        debug!(open_time = base.open_time, "고가와 저가가 같은 캔들, 꼬리 비율 0.0");
        (0.0, 0.0)
    } else {
        (
            round2((base.high - body_top) / range * 100.0),
            round2((body_bottom - base.low) / range * 100.0),
        )
    };

    Some(CandleGeometry {
        is_bullish: base.close > base.open,
        body_top,
        body_bottom,
        upper_wick_pct,
        lower_wick_pct,
        date,
    })
}

fn malformed(index: usize, reason: String) -> AnalyticsError {
    AnalyticsError::MalformedRow { index, reason }
}

fn price_field(raw: &RawKline, position: usize, name: &str, index: usize) -> AnalyticsResult<f64> {
    let value = match raw.field(position) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(malformed(
            index,
            format!("{} 필드가 숫자가 아님: {:?}", name, raw.field(position)),
        )),
    }
}

fn time_field(raw: &RawKline, position: usize, name: &str, index: usize) -> AnalyticsResult<i64> {
    let value = match raw.field(position) {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    value.ok_or_else(|| {
        malformed(
            index,
            format!("{} 필드가 정수가 아님: {:?}", name, raw.field(position)),
        )
    })
}

/// 단위 테스트용 1분봉 캔들.
#[cfg(test)]
pub(crate) fn test_candle(open: f64, high: f64, low: f64, close: f64) -> Candle {
    test_candle_at(0, open, high, low, close)
}

/// 단위 테스트용 1분봉 캔들 (`minute`번째 분).
#[cfg(test)]
pub(crate) fn test_candle_at(minute: i64, open: f64, high: f64, low: f64, close: f64) -> Candle {
    let open_time = 1_700_000_000_000 + minute * 60_000;
    let raw = RawKline::from_values(open_time, open, high, low, close, 1.0, open_time + 59_999);
    normalize_row(&raw, 0, "BTCUSDT", "1m").unwrap()
}
