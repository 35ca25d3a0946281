//! 캔들 데이터 타입.
//!
//! 캔들 레코드는 값으로 쌓아 올리는 불변 계층으로 구성됩니다:
//! - `RawKline` - 제공자가 반환한 위치 기반 원시 행
//! - `CandleBase` - 정규화된 OHLCV 입력값
//! - `CandleGeometry` - 몸통/꼬리 기하 정보
//! - `PatternAnnotations` - 패턴 분류와 이동평균
//! - `SessionExtremes` - 세션 고가/저가 타이밍
//! - `CandleRecord` - 저장소로 넘기는 평면 레코드

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::pattern::{pattern_label, CandlePatternType};
use crate::error::CoreError;

/// 위치 기반 원시 OHLCV 행.
///
/// `[open_time, open, high, low, close, volume, close_time, ...]` 순서이며,
/// 가격은 숫자 또는 숫자 문자열일 수 있습니다. 7번째 이후 필드는 무시됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawKline(pub Vec<Value>);

impl RawKline {
    /// 정규화에 필요한 최소 필드 수.
    pub const FIELD_COUNT: usize = 7;

    pub const OPEN_TIME: usize = 0;
    pub const OPEN: usize = 1;
    pub const HIGH: usize = 2;
    pub const LOW: usize = 3;
    pub const CLOSE: usize = 4;
    pub const VOLUME: usize = 5;
    pub const CLOSE_TIME: usize = 6;

    /// 값 목록으로 원시 행을 생성합니다.
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// 숫자 필드로 원시 행을 생성합니다.
    pub fn from_values(
        open_time: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        close_time: i64,
    ) -> Self {
        Self(vec![
            Value::from(open_time),
            Value::from(open),
            Value::from(high),
            Value::from(low),
            Value::from(close),
            Value::from(volume),
            Value::from(close_time),
        ])
    }

    /// 위치의 필드를 반환합니다.
    pub fn field(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// 필드 수.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 시작 시간 (정수 또는 정수 문자열일 때만).
    pub fn open_time(&self) -> Option<i64> {
        match self.field(Self::OPEN_TIME)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

/// 정규화된 캔들 입력값.
///
/// OHLC 순서 불변식(low ≤ open/close ≤ high)은 가정할 뿐 재검증하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleBase {
    /// 거래 심볼
    pub symbol: String,
    /// 간격 (불투명 문자열)
    pub interval: String,
    /// 시작 시간 (epoch ms)
    pub open_time: i64,
    /// 종료 시간 (epoch ms)
    pub close_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl CandleBase {
    /// 고가 - 저가.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// 가격 컬럼 값을 반환합니다.
    pub fn price(&self, column: PriceColumn) -> f64 {
        match column {
            PriceColumn::Open => self.open,
            PriceColumn::High => self.high,
            PriceColumn::Low => self.low,
            PriceColumn::Close => self.close,
        }
    }
}

/// 정규화 시 한 번 계산되는 기하 정보.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    /// 종가 > 시가
    pub is_bullish: bool,
    /// max(open, close)
    pub body_top: f64,
    /// min(open, close)
    pub body_bottom: f64,
    /// 윗꼬리 비율 (%)
    pub upper_wick_pct: f64,
    /// 아랫꼬리 비율 (%)
    pub lower_wick_pct: f64,
    /// open_time의 UTC 시각
    pub date: DateTime<Utc>,
}

/// 정규화된 캔들 (입력값 + 기하 정보).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub base: CandleBase,
    pub geometry: CandleGeometry,
}

impl Candle {
    pub fn new(base: CandleBase, geometry: CandleGeometry) -> Self {
        Self { base, geometry }
    }

    pub fn open(&self) -> f64 {
        self.base.open
    }

    pub fn high(&self) -> f64 {
        self.base.high
    }

    pub fn low(&self) -> f64 {
        self.base.low
    }

    pub fn close(&self) -> f64 {
        self.base.close
    }

    pub fn open_time(&self) -> i64 {
        self.base.open_time
    }

    pub fn close_time(&self) -> i64 {
        self.base.close_time
    }

    /// 몸통 크기 |close - open|.
    pub fn body(&self) -> f64 {
        (self.base.close - self.base.open).abs()
    }

    /// 고가 - 저가.
    pub fn range(&self) -> f64 {
        self.base.range()
    }

    /// 윗꼬리 길이.
    pub fn upper_shadow(&self) -> f64 {
        self.base.high - self.geometry.body_top
    }

    /// 아랫꼬리 길이.
    pub fn lower_shadow(&self) -> f64 {
        self.geometry.body_bottom - self.base.low
    }

    /// 양봉 여부 (종가 > 시가).
    pub fn is_bullish(&self) -> bool {
        self.base.close > self.base.open
    }

    /// 음봉 여부 (시가 > 종가).
    pub fn is_bearish(&self) -> bool {
        self.base.open > self.base.close
    }

    /// 고가와 저가가 같은 캔들.
    pub fn is_degenerate(&self) -> bool {
        self.range() == 0.0
    }

    pub fn price(&self, column: PriceColumn) -> f64 {
        self.base.price(column)
    }
}

/// 시퀀스 보강 단계에서 기록되는 패턴 주석.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternAnnotations {
    /// 단일 캔들 패턴
    pub candle_type: Option<CandlePatternType>,
    /// 이 캔들에서 끝나는 2캔들 패턴
    pub type_two: Option<CandlePatternType>,
    /// 이 캔들에서 끝나는 3캔들(또는 5캔들/갭) 패턴
    pub type_three: Option<CandlePatternType>,
    /// 후행 단순 이동평균
    pub moving_average: f64,
}

/// 세션 고가/저가 타이밍.
///
/// 시간은 세션 첫 캔들의 `close_time` 기준 경과 분입니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionExtremes {
    /// 고가와 저가가 모두 기록되었는지
    pub is_crossed: bool,
    /// 고가가 저가보다 먼저 형성되었는지
    pub is_high_formed_first: bool,
    pub high_time: i64,
    pub low_time: i64,
}

/// 패턴 주석까지 붙은 캔들.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternedCandle {
    pub candle: Candle,
    pub patterns: PatternAnnotations,
}

impl PatternedCandle {
    pub fn new(candle: Candle, patterns: PatternAnnotations) -> Self {
        Self { candle, patterns }
    }

    /// 세션 주석을 붙여 최종 레코드 계층을 완성합니다.
    pub fn with_session(self, session: SessionExtremes) -> EnrichedCandle {
        EnrichedCandle {
            candle: self.candle,
            patterns: self.patterns,
            session,
        }
    }
}

/// 모든 계층이 채워진 캔들.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedCandle {
    pub candle: Candle,
    pub patterns: PatternAnnotations,
    pub session: SessionExtremes,
}

impl EnrichedCandle {
    /// 저장용 평면 레코드로 변환합니다.
    pub fn to_record(&self) -> CandleRecord {
        let base = &self.candle.base;
        let geometry = &self.candle.geometry;
        CandleRecord {
            symbol: base.symbol.clone(),
            interval: base.interval.clone(),
            open_time: base.open_time,
            close_time: base.close_time,
            open: base.open,
            high: base.high,
            low: base.low,
            close: base.close,
            volume: base.volume,
            is_bullish: geometry.is_bullish,
            body_top: geometry.body_top,
            body_bottom: geometry.body_bottom,
            upper_wick_pct: geometry.upper_wick_pct,
            lower_wick_pct: geometry.lower_wick_pct,
            date: geometry.date,
            candle_type: self.patterns.candle_type,
            type_two: self.patterns.type_two,
            type_three: self.patterns.type_three,
            moving_average: self.patterns.moving_average,
            is_crossed: self.session.is_crossed,
            is_high_formed_first: self.session.is_high_formed_first,
            high_time: self.session.high_time,
            low_time: self.session.low_time,
        }
    }
}

/// 저장소로 넘기는 평면 레코드.
///
/// 패턴 필드는 라벨 문자열로 직렬화되고, 패턴이 없으면 `"-"`입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleRecord {
    pub symbol: String,
    pub interval: String,
    pub open_time: i64,
    pub close_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub is_bullish: bool,
    pub body_top: f64,
    pub body_bottom: f64,
    pub upper_wick_pct: f64,
    pub lower_wick_pct: f64,
    pub date: DateTime<Utc>,
    #[serde(rename = "type", with = "pattern_label")]
    pub candle_type: Option<CandlePatternType>,
    #[serde(with = "pattern_label")]
    pub type_two: Option<CandlePatternType>,
    #[serde(with = "pattern_label")]
    pub type_three: Option<CandlePatternType>,
    pub moving_average: f64,
    pub is_crossed: bool,
    pub is_high_formed_first: bool,
    pub high_time: i64,
    pub low_time: i64,
}

impl CandleRecord {
    pub fn price(&self, column: PriceColumn) -> f64 {
        match column {
            PriceColumn::Open => self.open,
            PriceColumn::High => self.high,
            PriceColumn::Low => self.low,
            PriceColumn::Close => self.close,
        }
    }
}

/// 이상치 탐지와 렌코에 사용하는 가격 컬럼.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceColumn {
    Open,
    High,
    Low,
    #[default]
    Close,
}

impl fmt::Display for PriceColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PriceColumn::Open => "open",
            PriceColumn::High => "high",
            PriceColumn::Low => "low",
            PriceColumn::Close => "close",
        };
        f.write_str(name)
    }
}

impl FromStr for PriceColumn {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(PriceColumn::Open),
            "high" => Ok(PriceColumn::High),
            "low" => Ok(PriceColumn::Low),
            "close" => Ok(PriceColumn::Close),
            _ => Err(CoreError::InvalidInput(format!("Unknown price column: {}", s))),
        }
    }
}
