//! 캔들 간격.
//!
//! 분석 엔진은 간격을 불투명한 문자열로 다루지만, 시세 제공자는 조회 범위와
//! 페이지 수를 계산하기 위해 실제 길이가 필요합니다. 문자열 표기는 거래소
//! 표기(`1m`, `4h`, `1M` ...)를 그대로 사용합니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// 캔들 간격.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Timeframe {
    Min1,
    Min3,
    Min5,
    Min15,
    Min30,
    Hour1,
    Hour2,
    Hour4,
    Hour6,
    Hour8,
    Hour12,
    Day1,
    Day3,
    Week1,
    /// 길이는 30일로 근사
    Month1,
}

impl Timeframe {
    /// 지원하는 모든 간격 (짧은 순).
    pub const ALL: [Timeframe; 15] = [
        Self::Min1,
        Self::Min3,
        Self::Min5,
        Self::Min15,
        Self::Min30,
        Self::Hour1,
        Self::Hour2,
        Self::Hour4,
        Self::Hour6,
        Self::Hour8,
        Self::Hour12,
        Self::Day1,
        Self::Day3,
        Self::Week1,
        Self::Month1,
    ];

    /// 거래소 간격 표기.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Min1 => "1m",
            Self::Min3 => "3m",
            Self::Min5 => "5m",
            Self::Min15 => "15m",
            Self::Min30 => "30m",
            Self::Hour1 => "1h",
            Self::Hour2 => "2h",
            Self::Hour4 => "4h",
            Self::Hour6 => "6h",
            Self::Hour8 => "8h",
            Self::Hour12 => "12h",
            Self::Day1 => "1d",
            Self::Day3 => "3d",
            Self::Week1 => "1w",
            Self::Month1 => "1M",
        }
    }

    /// 캔들 하나의 길이 (ms).
    pub fn as_millis(&self) -> i64 {
        match self {
            Self::Min1 => MINUTE_MS,
            Self::Min3 => 3 * MINUTE_MS,
            Self::Min5 => 5 * MINUTE_MS,
            Self::Min15 => 15 * MINUTE_MS,
            Self::Min30 => 30 * MINUTE_MS,
            Self::Hour1 => HOUR_MS,
            Self::Hour2 => 2 * HOUR_MS,
            Self::Hour4 => 4 * HOUR_MS,
            Self::Hour6 => 6 * HOUR_MS,
            Self::Hour8 => 8 * HOUR_MS,
            Self::Hour12 => 12 * HOUR_MS,
            Self::Day1 => DAY_MS,
            Self::Day3 => 3 * DAY_MS,
            Self::Week1 => 7 * DAY_MS,
            Self::Month1 => 30 * DAY_MS,
        }
    }

    /// `[start_ms, end_ms]` 구간에 시작하는 캔들 수의 추정치.
    pub fn candles_between(&self, start_ms: i64, end_ms: i64) -> u64 {
        if end_ms < start_ms {
            return 0;
        }
        let span = (end_ms - start_ms) / self.as_millis() + 1;
        u64::try_from(span).unwrap_or(0)
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    /// 대소문자를 구분합니다 (`1m`은 1분, `1M`은 1개월).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| format!("Invalid timeframe: {}", s))
    }
}

impl TryFrom<String> for Timeframe {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timeframe> for String {
    fn from(tf: Timeframe) -> Self {
        tf.as_str().to_string()
    }
}
