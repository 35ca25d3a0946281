//! 캔들 패턴 라벨.
//!
//! 라벨 문자열은 저장소와 화면에 그대로 노출되므로 철자를 바꾸면 안 됩니다.
//! 패턴이 없는 경우는 `Option::None`으로 표현하고, 평면 레코드에서는
//! [`NO_PATTERN_LABEL`]로 직렬화합니다.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 패턴이 없을 때 레코드에 기록되는 라벨.
pub const NO_PATTERN_LABEL: &str = "-";

/// 캔들 패턴 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandlePatternType {
    WhiteMarubozu,
    InvertedHammer,
    HangingMan,
    BlackMarubozu,
    ShootingStar,
    Doji,
    SpinningTop,
    HighWave,

    PiercingPattern,
    BullishEngulfing,
    BullishHarami,
    TweezerBottom,
    OnNeck,
    BullishCounterattack,
    DarkCloudCover,
    BearishEngulfing,
    BearishHarami,
    TweezerTop,
    BearishCounterattack,

    RisingWindow,
    FallingWindow,

    MorningStar,
    ThreeWhiteSoldiers,
    ThreeOutsideUp,
    EveningStar,
    ThreeBlackCrows,
    ThreeOutsideDown,
    ThreeInsideUp,
    ThreeInsideDown,
    UpsideTasukiGap,
    DownsideTasukiGap,

    FallingThreeMethods,
    RisingThreeMethods,
    /// 예약된 패턴. 판정 조건이 정의되지 않아 항상 감지되지 않습니다.
    MatHold,
}

impl CandlePatternType {
    /// 모든 패턴 (선언 순서).
    pub const ALL: [CandlePatternType; 34] = [
        Self::WhiteMarubozu,
        Self::InvertedHammer,
        Self::HangingMan,
        Self::BlackMarubozu,
        Self::ShootingStar,
        Self::Doji,
        Self::SpinningTop,
        Self::HighWave,
        Self::PiercingPattern,
        Self::BullishEngulfing,
        Self::BullishHarami,
        Self::TweezerBottom,
        Self::OnNeck,
        Self::BullishCounterattack,
        Self::DarkCloudCover,
        Self::BearishEngulfing,
        Self::BearishHarami,
        Self::TweezerTop,
        Self::BearishCounterattack,
        Self::RisingWindow,
        Self::FallingWindow,
        Self::MorningStar,
        Self::ThreeWhiteSoldiers,
        Self::ThreeOutsideUp,
        Self::EveningStar,
        Self::ThreeBlackCrows,
        Self::ThreeOutsideDown,
        Self::ThreeInsideUp,
        Self::ThreeInsideDown,
        Self::UpsideTasukiGap,
        Self::DownsideTasukiGap,
        Self::FallingThreeMethods,
        Self::RisingThreeMethods,
        Self::MatHold,
    ];

    /// 표시용 라벨.
    pub fn label(&self) -> &'static str {
        match self {
            Self::WhiteMarubozu => "White Marubozu",
            Self::InvertedHammer => "Inverted Hammer",
            Self::HangingMan => "Hanging Man",
            Self::BlackMarubozu => "Black Marubozu",
            Self::ShootingStar => "Shooting Star",
            Self::Doji => "Doji",
            Self::SpinningTop => "Spinning Top",
            Self::HighWave => "High Wave",
            Self::PiercingPattern => "Piercing Pattern",
            Self::BullishEngulfing => "Bullish Engulfing",
            Self::BullishHarami => "Bullish Harami",
            Self::TweezerBottom => "Tweezer Bottom",
            Self::OnNeck => "On-Neck",
            Self::BullishCounterattack => "Bullish Counterattack",
            Self::DarkCloudCover => "Dark Cloud Cover",
            Self::BearishEngulfing => "Bearish Engulfing",
            Self::BearishHarami => "Bearish Harami",
            Self::TweezerTop => "Tweezer Top",
            Self::BearishCounterattack => "Bearish Counterattack",
            Self::RisingWindow => "Rising Window",
            Self::FallingWindow => "Falling Window",
            Self::MorningStar => "Morning Star",
            Self::ThreeWhiteSoldiers => "Three White Soldiers",
            Self::ThreeOutsideUp => "Three Outside Up",
            Self::EveningStar => "Evening Star",
            Self::ThreeBlackCrows => "Three Black Crows",
            Self::ThreeOutsideDown => "Three Outside Down",
            Self::ThreeInsideUp => "Three Inside Up",
            Self::ThreeInsideDown => "Three Inside Down",
            Self::UpsideTasukiGap => "Upside Tasuki Gap",
            Self::DownsideTasukiGap => "Downside Tasuki Gap",
            Self::FallingThreeMethods => "Falling Three Methods",
            Self::RisingThreeMethods => "Rising Three Methods",
            Self::MatHold => "Mat Hold",
        }
    }
}

impl fmt::Display for CandlePatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CandlePatternType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.label() == s)
            .ok_or_else(|| format!("Unknown candle pattern: {}", s))
    }
}

impl Serialize for CandlePatternType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for CandlePatternType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// `Option<CandlePatternType>`을 라벨 문자열로 직렬화하는 serde 모듈.
///
/// `None` ↔ `"-"`.
pub mod pattern_label {
    use super::*;

    pub fn serialize<S>(value: &Option<CandlePatternType>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(pattern) => serializer.serialize_str(pattern.label()),
            None => serializer.serialize_str(NO_PATTERN_LABEL),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<CandlePatternType>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() || raw == NO_PATTERN_LABEL {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(serde::de::Error::custom)
    }
}
