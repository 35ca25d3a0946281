//! 캔들 패턴 분류기.
//!
//! 1/2/3/5캔들 윈도우에 대한 기하 조건을 검사하여 패턴 라벨을 반환합니다.
//!
//! ## 규칙 테이블
//! 각 패턴 계열은 `(조건, 라벨)` 쌍의 순서 있는 테이블이며, 처음으로 일치하는
//! 라벨을 반환합니다. 테이블 순서가 곧 우선순위입니다.
//!
//! - **단일**: White Marubozu → Inverted Hammer → Hanging Man → Black Marubozu
//!   → Shooting Star → Doji → Spinning Top → High Wave
//! - **2캔들**: Piercing Pattern → ... → Bearish Counterattack
//! - **3캔들**: 반전 테이블 → 지속 테이블 (Three Inside Up/Down, Tasuki Gap)
//! - **5캔들**: Falling/Rising Three Methods, Mat Hold
//! - **갭**: Rising/Falling Window
//!
//! ## 비율 기준 (고가-저가 범위 대비)
//! - 망치/별 계열: 꼬리 ≥ 몸통 × 2, 몸통 ≤ 30%
//! - 도지: 몸통 ≤ 10%
//! - 팽이형: 몸통 20% ~ 50%
//! - 하이 웨이브: 몸통 ≤ 10%, 양 꼬리 합 ≥ 70%

use kline_core::{AnalysisConfig, Candle, CandlePatternType, TweezerMatch};
use serde::{Deserialize, Serialize};

/// 패턴 판정 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternParams {
    /// 트위저 고가/저가 일치 판정 방식.
    pub tweezer_match: TweezerMatch,
    /// 근사 일치 허용 오차 (첫 캔들 범위 대비, 기본: 0.02).
    pub tolerance: f64,
}

impl Default for PatternParams {
    fn default() -> Self {
        Self {
            tweezer_match: TweezerMatch::Exact,
            tolerance: 0.02,
        }
    }
}

impl From<&AnalysisConfig> for PatternParams {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            tweezer_match: config.tweezer_match,
            tolerance: config.near_equal_tolerance,
        }
    }
}

/// 패턴 규칙: 조건 함수와 라벨.
pub struct PatternRule<W: ?Sized> {
    pub predicate: fn(&W, &PatternParams) -> bool,
    pub pattern: CandlePatternType,
}

impl<W: ?Sized> PatternRule<W> {
    const fn new(predicate: fn(&W, &PatternParams) -> bool, pattern: CandlePatternType) -> Self {
        Self { predicate, pattern }
    }
}

/// 단일 캔들 규칙 (우선순위 순).
pub static SINGLE_RULES: [PatternRule<Candle>; 8] = [
    PatternRule::new(is_white_marubozu, CandlePatternType::WhiteMarubozu),
    PatternRule::new(is_inverted_hammer, CandlePatternType::InvertedHammer),
    PatternRule::new(is_hanging_man, CandlePatternType::HangingMan),
    PatternRule::new(is_black_marubozu, CandlePatternType::BlackMarubozu),
    PatternRule::new(is_shooting_star, CandlePatternType::ShootingStar),
    PatternRule::new(is_doji, CandlePatternType::Doji),
    PatternRule::new(is_spinning_top, CandlePatternType::SpinningTop),
    PatternRule::new(is_high_wave, CandlePatternType::HighWave),
];

/// 2캔들 규칙 (우선순위 순).
pub static DOUBLE_RULES: [PatternRule<[Candle; 2]>; 11] = [
    PatternRule::new(is_piercing_pattern, CandlePatternType::PiercingPattern),
    PatternRule::new(is_bullish_engulfing, CandlePatternType::BullishEngulfing),
    PatternRule::new(is_bullish_harami, CandlePatternType::BullishHarami),
    PatternRule::new(is_tweezer_bottom, CandlePatternType::TweezerBottom),
    PatternRule::new(is_on_neck, CandlePatternType::OnNeck),
    PatternRule::new(is_bullish_counterattack, CandlePatternType::BullishCounterattack),
    PatternRule::new(is_dark_cloud_cover, CandlePatternType::DarkCloudCover),
    PatternRule::new(is_bearish_engulfing, CandlePatternType::BearishEngulfing),
    PatternRule::new(is_bearish_harami, CandlePatternType::BearishHarami),
    PatternRule::new(is_tweezer_top, CandlePatternType::TweezerTop),
    PatternRule::new(is_bearish_counterattack, CandlePatternType::BearishCounterattack),
];

/// 2캔들 갭 규칙.
pub static GAP_RULES: [PatternRule<[Candle; 2]>; 2] = [
    PatternRule::new(is_rising_window, CandlePatternType::RisingWindow),
    PatternRule::new(is_falling_window, CandlePatternType::FallingWindow),
];

/// 3캔들 반전 규칙 (우선순위 순).
pub static TRIPLE_RULES: [PatternRule<[Candle; 3]>; 6] = [
    PatternRule::new(is_morning_star, CandlePatternType::MorningStar),
    PatternRule::new(is_three_white_soldiers, CandlePatternType::ThreeWhiteSoldiers),
    PatternRule::new(is_three_outside_up, CandlePatternType::ThreeOutsideUp),
    PatternRule::new(is_evening_star, CandlePatternType::EveningStar),
    PatternRule::new(is_three_black_crows, CandlePatternType::ThreeBlackCrows),
    PatternRule::new(is_three_outside_down, CandlePatternType::ThreeOutsideDown),
];

/// 3캔들 지속 규칙. 반전 규칙이 모두 실패했을 때만 평가합니다.
pub static TRIPLE_CONTINUATION_RULES: [PatternRule<[Candle; 3]>; 4] = [
    PatternRule::new(is_three_inside_up, CandlePatternType::ThreeInsideUp),
    PatternRule::new(is_three_inside_down, CandlePatternType::ThreeInsideDown),
    PatternRule::new(is_upside_tasuki_gap, CandlePatternType::UpsideTasukiGap),
    PatternRule::new(is_downside_tasuki_gap, CandlePatternType::DownsideTasukiGap),
];

/// 5캔들 규칙 (우선순위 순).
pub static QUINTUPLE_RULES: [PatternRule<[Candle; 5]>; 3] = [
    PatternRule::new(is_falling_three_methods, CandlePatternType::FallingThreeMethods),
    PatternRule::new(is_rising_three_methods, CandlePatternType::RisingThreeMethods),
    PatternRule::new(is_mat_hold, CandlePatternType::MatHold),
];

fn first_match<W: ?Sized>(
    rules: &[PatternRule<W>],
    window: &W,
    params: &PatternParams,
) -> Option<CandlePatternType> {
    rules
        .iter()
        .find(|rule| (rule.predicate)(window, params))
        .map(|rule| rule.pattern)
}

/// 캔들 패턴 분류기.
///
/// 상태가 없으므로 여러 스레드에서 공유해도 됩니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandlePatternClassifier {
    params: PatternParams,
}

impl CandlePatternClassifier {
    /// 새로운 분류기 생성.
    pub fn new(params: PatternParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PatternParams {
        &self.params
    }

    /// 단일 캔들 분류.
    pub fn classify_single(&self, candle: &Candle) -> Option<CandlePatternType> {
        first_match(&SINGLE_RULES, candle, &self.params)
    }

    /// 2캔들 분류 (마지막 캔들이 현재 캔들).
    pub fn classify_two(&self, window: &[Candle; 2]) -> Option<CandlePatternType> {
        first_match(&DOUBLE_RULES, window, &self.params)
    }

    /// 3캔들 분류. 반전 테이블이 실패하면 지속 테이블을 평가합니다.
    pub fn classify_three(&self, window: &[Candle; 3]) -> Option<CandlePatternType> {
        first_match(&TRIPLE_RULES, window, &self.params)
            .or_else(|| first_match(&TRIPLE_CONTINUATION_RULES, window, &self.params))
    }

    /// 5캔들 분류.
    pub fn classify_five(&self, window: &[Candle; 5]) -> Option<CandlePatternType> {
        first_match(&QUINTUPLE_RULES, window, &self.params)
    }

    /// 2캔들 갭 분류.
    pub fn classify_gap(&self, window: &[Candle; 2]) -> Option<CandlePatternType> {
        first_match(&GAP_RULES, window, &self.params)
    }
}

// ==================== 공통 헬퍼 ====================

/// `|a - b| <= tolerance × reference_range`
fn near_equal(a: f64, b: f64, reference_range: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance * reference_range
}

fn tweezer_equal(a: f64, b: f64, reference_range: f64, params: &PatternParams) -> bool {
    match params.tweezer_match {
        TweezerMatch::Exact => a == b,
        TweezerMatch::Tolerant => near_equal(a, b, reference_range, params.tolerance),
    }
}

// ==================== 단일 캔들 ====================

fn is_white_marubozu(c: &Candle, _: &PatternParams) -> bool {
    c.open() == c.low() && c.close() == c.high()
}

fn is_inverted_hammer(c: &Candle, _: &PatternParams) -> bool {
    c.upper_shadow() >= 2.0 * c.body() && c.body() <= c.range() * 0.3
}

fn is_hanging_man(c: &Candle, _: &PatternParams) -> bool {
    c.lower_shadow() >= 2.0 * c.body() && c.body() <= c.range() * 0.3
}

fn is_black_marubozu(c: &Candle, _: &PatternParams) -> bool {
    c.open() == c.high() && c.close() == c.low()
}

// Inverted Hammer와 같은 기하 조건이므로 우선순위상 도달하지 않습니다.
fn is_shooting_star(c: &Candle, params: &PatternParams) -> bool {
    is_inverted_hammer(c, params)
}

fn is_doji(c: &Candle, _: &PatternParams) -> bool {
    c.body() <= c.range() * 0.1
}

fn is_spinning_top(c: &Candle, _: &PatternParams) -> bool {
    let range = c.range();
    c.body() >= range * 0.2 && c.body() <= range * 0.5
}

fn is_high_wave(c: &Candle, _: &PatternParams) -> bool {
    let range = c.range();
    c.body() <= range * 0.1 && c.upper_shadow() + c.lower_shadow() >= range * 0.7
}

// ==================== 2캔들 ====================

fn is_piercing_pattern([first, second]: &[Candle; 2], _: &PatternParams) -> bool {
    first.close() < first.open()
        && second.open() < first.close()
        && second.close() > first.open()
        && second.close() >= first.low() + first.range() / 2.0
}

fn bullish_engulfing(first: &Candle, second: &Candle) -> bool {
    first.close() < first.open() && second.open() < first.close() && second.close() > first.open()
}

fn is_bullish_engulfing([first, second]: &[Candle; 2], _: &PatternParams) -> bool {
    bullish_engulfing(first, second)
}

fn bullish_harami(first: &Candle, second: &Candle) -> bool {
    first.close() < first.open() && second.open() > first.close() && second.close() < first.open()
}

fn is_bullish_harami([first, second]: &[Candle; 2], _: &PatternParams) -> bool {
    bullish_harami(first, second)
}

fn is_tweezer_bottom([first, second]: &[Candle; 2], params: &PatternParams) -> bool {
    tweezer_equal(first.low(), second.low(), first.range(), params)
        && first.is_bearish()
        && second.is_bullish()
}

fn is_on_neck([first, second]: &[Candle; 2], params: &PatternParams) -> bool {
    first.is_bearish()
        && second.is_bullish()
        && near_equal(second.close(), first.low(), first.range(), params.tolerance)
}

fn is_bullish_counterattack([first, second]: &[Candle; 2], params: &PatternParams) -> bool {
    first.close() < first.open()
        && second.close() > second.open()
        && near_equal(second.close(), first.close(), first.range(), params.tolerance)
}

fn is_dark_cloud_cover([first, second]: &[Candle; 2], _: &PatternParams) -> bool {
    first.close() > first.open()
        && second.open() > first.close()
        && second.close() < first.open()
        && second.close() < first.close() - first.range() / 2.0
}

fn bearish_engulfing(first: &Candle, second: &Candle) -> bool {
    first.close() > first.open()
        && second.open() > second.close()
        && second.open() > first.close()
        && second.close() < first.open()
}

fn is_bearish_engulfing([first, second]: &[Candle; 2], _: &PatternParams) -> bool {
    bearish_engulfing(first, second)
}

fn bearish_harami(first: &Candle, second: &Candle) -> bool {
    first.close() > first.open() && second.open() < first.close() && second.close() > first.open()
}

fn is_bearish_harami([first, second]: &[Candle; 2], _: &PatternParams) -> bool {
    bearish_harami(first, second)
}

fn is_tweezer_top([first, second]: &[Candle; 2], params: &PatternParams) -> bool {
    tweezer_equal(first.high(), second.high(), first.range(), params)
        && first.is_bullish()
        && second.is_bearish()
}

fn is_bearish_counterattack([first, second]: &[Candle; 2], params: &PatternParams) -> bool {
    first.close() > first.open()
        && second.close() < second.open()
        && near_equal(second.close(), first.close(), first.range(), params.tolerance)
}

// ==================== 갭 ====================

fn is_rising_window([first, second]: &[Candle; 2], _: &PatternParams) -> bool {
    second.low() > first.high()
}

fn is_falling_window([first, second]: &[Candle; 2], _: &PatternParams) -> bool {
    second.high() < first.low()
}

// ==================== 3캔들 ====================

fn is_morning_star([first, second, third]: &[Candle; 3], _: &PatternParams) -> bool {
    first.close() < first.open()
        && second.body() < (first.open() - first.close()) / 3.0
        && third.close() > third.open()
        && third.close() > first.open()
}

fn is_evening_star([first, second, third]: &[Candle; 3], _: &PatternParams) -> bool {
    first.close() > first.open()
        && second.body() < (first.close() - first.open()) / 3.0
        && third.close() < third.open()
        && third.close() < first.open()
}

// 인접한 두 쌍 (c0, c1), (c1, c2)에 대해 앞 캔들이 양봉이고 앞 캔들의 시가가
// 뒤 캔들의 종가보다 높은지 검사합니다. 세 번째 캔들의 방향은 보지 않습니다.
fn is_three_white_soldiers(window: &[Candle; 3], _: &PatternParams) -> bool {
    window
        .windows(2)
        .all(|pair| pair[0].close() > pair[0].open() && pair[0].open() > pair[1].close())
}

fn is_three_black_crows(window: &[Candle; 3], _: &PatternParams) -> bool {
    window
        .windows(2)
        .all(|pair| pair[0].close() < pair[0].open() && pair[0].open() < pair[1].close())
}

// 장악형을 (second, first) 순서로 검사하므로 first가 음봉이면서 동시에
// 양봉이어야 하는 모순이 생겨 항상 거짓입니다.
fn is_three_outside_up([first, second, third]: &[Candle; 3], _: &PatternParams) -> bool {
    first.is_bearish() && bullish_engulfing(second, first) && third.close() > second.close()
}

fn is_three_outside_down([first, second, third]: &[Candle; 3], _: &PatternParams) -> bool {
    first.is_bullish() && bearish_engulfing(second, first) && third.close() < second.close()
}

fn is_three_inside_up([first, second, third]: &[Candle; 3], _: &PatternParams) -> bool {
    bullish_harami(first, second) && third.close() > first.high()
}

fn is_three_inside_down([first, second, third]: &[Candle; 3], _: &PatternParams) -> bool {
    bearish_harami(first, second) && third.close() < first.low()
}

fn is_upside_tasuki_gap([first, second, third]: &[Candle; 3], _: &PatternParams) -> bool {
    first.close() > first.open()
        && second.open() > first.close()
        && second.close() > second.open()
        && third.open() < third.close()
        && third.open() < second.close()
        && third.close() < second.open()
}

fn is_downside_tasuki_gap([first, second, third]: &[Candle; 3], _: &PatternParams) -> bool {
    first.close() < first.open()
        && second.open() < first.close()
        && second.close() < second.open()
        && third.open() > third.close()
        && third.open() > second.close()
        && third.close() > second.open()
}

// ==================== 5캔들 ====================

fn is_falling_three_methods(window: &[Candle; 5], _: &PatternParams) -> bool {
    let [first, middle @ .., fifth] = window;
    first.is_bearish()
        && fifth.is_bearish()
        && middle.iter().all(Candle::is_bullish)
        && fifth.close() < first.open()
}

fn is_rising_three_methods(window: &[Candle; 5], _: &PatternParams) -> bool {
    let [first, middle @ .., fifth] = window;
    first.is_bullish()
        && fifth.is_bullish()
        && middle.iter().all(Candle::is_bearish)
        && fifth.close() > first.open()
}

// 판정 기준이 정해지지 않은 예약 패턴.
fn is_mat_hold(_: &[Candle; 5], _: &PatternParams) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::test_candle as candle;

    fn classifier() -> CandlePatternClassifier {
        CandlePatternClassifier::default()
    }

    #[test]
    fn test_single_white_marubozu() {
        let c = candle(100.0, 110.0, 100.0, 110.0);
        assert_eq!(classifier().classify_single(&c), Some(CandlePatternType::WhiteMarubozu));
    }

    #[test]
    fn test_single_black_marubozu() {
        let c = candle(110.0, 110.0, 100.0, 100.0);
        assert_eq!(classifier().classify_single(&c), Some(CandlePatternType::BlackMarubozu));
    }

    #[test]
    fn test_single_inverted_hammer_shadows_shooting_star() {
        // 긴 윗꼬리: Inverted Hammer가 먼저 매칭되어 Shooting Star는 나오지 않음
        let c = candle(100.0, 110.0, 99.5, 101.0);
        assert_eq!(classifier().classify_single(&c), Some(CandlePatternType::InvertedHammer));
    }

    #[test]
    fn test_single_hanging_man() {
        let c = candle(109.0, 110.0, 100.0, 110.0 - 0.5);
        assert_eq!(classifier().classify_single(&c), Some(CandlePatternType::HangingMan));
    }

    #[test]
    fn test_doji_geometry_is_claimed_by_hammer_family() {
        // 몸통 0.5, 범위 10: 도지/하이 웨이브 조건도 만족하지만 윗꼬리가 길어 Inverted Hammer가 우선
        let params = PatternParams::default();
        let c = candle(100.0, 105.0, 95.0, 100.5);
        assert!(is_doji(&c, &params));
        assert!(is_high_wave(&c, &params));
        assert_eq!(classifier().classify_single(&c), Some(CandlePatternType::InvertedHammer));
    }

    #[test]
    fn test_single_spinning_top() {
        // 범위 10, 몸통 3, 윗꼬리 4, 아랫꼬리 3
        let c = candle(100.0, 107.0, 97.0, 103.0);
        assert_eq!(classifier().classify_single(&c), Some(CandlePatternType::SpinningTop));
    }

    #[test]
    fn test_single_none() {
        // 범위 10, 몸통 8
        let c = candle(101.0, 110.0, 100.0, 109.0);
        assert_eq!(classifier().classify_single(&c), None);
    }

    #[test]
    fn test_two_piercing_before_engulfing() {
        let window = [candle(100.0, 100.0, 95.0, 96.0), candle(95.0, 102.0, 94.0, 101.0)];
        assert_eq!(classifier().classify_two(&window), Some(CandlePatternType::PiercingPattern));

        // 중간값(107.5)에 못 미치는 장악형
        let window = [candle(100.0, 120.0, 95.0, 96.0), candle(94.0, 104.0, 93.0, 102.0)];
        assert_eq!(classifier().classify_two(&window), Some(CandlePatternType::BullishEngulfing));
    }

    #[test]
    fn test_two_bullish_harami() {
        let window = [candle(100.0, 110.0, 90.0, 96.0), candle(97.0, 102.0, 96.5, 99.0)];
        assert_eq!(classifier().classify_two(&window), Some(CandlePatternType::BullishHarami));
    }

    #[test]
    fn test_two_dark_cloud_before_engulfing() {
        let window = [candle(95.0, 101.0, 94.0, 100.0), candle(102.0, 103.0, 93.0, 94.0)];
        assert_eq!(classifier().classify_two(&window), Some(CandlePatternType::DarkCloudCover));

        let window = [candle(95.0, 120.0, 90.0, 100.0), candle(102.0, 104.0, 93.0, 94.0)];
        assert_eq!(classifier().classify_two(&window), Some(CandlePatternType::BearishEngulfing));
    }

    #[test]
    fn test_two_tweezer_exact_and_tolerant() {
        let window = [candle(105.0, 106.0, 100.0, 101.0), candle(100.5, 104.0, 100.05, 101.8)];
        assert_eq!(classifier().classify_two(&window), None);

        let tolerant = CandlePatternClassifier::new(PatternParams {
            tweezer_match: TweezerMatch::Tolerant,
            tolerance: 0.02,
        });
        assert_eq!(tolerant.classify_two(&window), Some(CandlePatternType::TweezerBottom));
    }

    #[test]
    fn test_two_on_neck() {
        // 음봉 후 양봉, 종가가 첫 캔들 저가와 근사 일치
        let window = [candle(110.0, 111.0, 100.0, 101.0), candle(98.0, 101.0, 97.0, 100.1)];
        assert_eq!(classifier().classify_two(&window), Some(CandlePatternType::OnNeck));
    }

    #[test]
    fn test_gap_family() {
        let window = [candle(100.0, 105.0, 99.0, 104.0), candle(106.0, 108.0, 105.5, 107.0)];
        assert_eq!(classifier().classify_gap(&window), Some(CandlePatternType::RisingWindow));

        let window = [candle(104.0, 105.0, 99.0, 100.0), candle(97.0, 98.0, 95.0, 96.0)];
        assert_eq!(classifier().classify_gap(&window), Some(CandlePatternType::FallingWindow));
    }

    #[test]
    fn test_three_morning_and_evening_star() {
        let window = [
            candle(110.0, 111.0, 99.0, 100.0),
            candle(99.0, 100.0, 97.0, 99.5),
            candle(101.0, 113.0, 100.0, 112.0),
        ];
        assert_eq!(classifier().classify_three(&window), Some(CandlePatternType::MorningStar));

        let window = [
            candle(100.0, 111.0, 99.0, 110.0),
            candle(111.0, 113.0, 110.0, 111.5),
            candle(109.0, 110.0, 97.0, 98.0),
        ];
        assert_eq!(classifier().classify_three(&window), Some(CandlePatternType::EveningStar));
    }

    #[test]
    fn test_three_continuation_fallback() {
        // 하락 후 내부 양봉, 세 번째 종가가 첫 고가 돌파
        let window = [
            candle(110.0, 111.0, 100.0, 101.0),
            candle(102.0, 108.0, 101.5, 107.0),
            candle(107.0, 115.0, 106.0, 114.0),
        ];
        assert_eq!(classifier().classify_three(&window), Some(CandlePatternType::ThreeInsideUp));
    }

    #[test]
    fn test_three_outside_never_matches() {
        let window = [
            candle(105.0, 106.0, 99.0, 100.0),
            candle(99.0, 108.0, 98.0, 107.0),
            candle(107.0, 110.0, 106.0, 109.0),
        ];
        let result = classifier().classify_three(&window);
        assert_ne!(result, Some(CandlePatternType::ThreeOutsideUp));
        assert_ne!(result, Some(CandlePatternType::ThreeOutsideDown));
    }

    #[test]
    fn test_five_falling_three_methods() {
        let window = [
            candle(120.0, 121.0, 109.0, 110.0),
            candle(111.0, 113.0, 110.0, 112.0),
            candle(112.0, 114.0, 111.0, 113.0),
            candle(113.0, 115.0, 112.0, 114.0),
            candle(114.0, 115.0, 104.0, 105.0),
        ];
        assert_eq!(
            classifier().classify_five(&window),
            Some(CandlePatternType::FallingThreeMethods)
        );
    }

    #[test]
    fn test_mat_hold_is_reserved() {
        let c = candle(100.0, 101.0, 99.0, 100.5);
        assert!(!is_mat_hold(
            &[c.clone(), c.clone(), c.clone(), c.clone(), c],
            &PatternParams::default()
        ));
    }

    #[test]
    fn test_rule_table_order() {
        let labels: Vec<_> = SINGLE_RULES.iter().map(|r| r.pattern.label()).collect();
        assert_eq!(
            labels,
            vec![
                "White Marubozu",
                "Inverted Hammer",
                "Hanging Man",
                "Black Marubozu",
                "Shooting Star",
                "Doji",
                "Spinning Top",
                "High Wave"
            ]
        );
        assert_eq!(DOUBLE_RULES[0].pattern, CandlePatternType::PiercingPattern);
        assert_eq!(DOUBLE_RULES[10].pattern, CandlePatternType::BearishCounterattack);
        assert_eq!(TRIPLE_RULES[0].pattern, CandlePatternType::MorningStar);
        assert_eq!(QUINTUPLE_RULES[2].pattern, CandlePatternType::MatHold);
    }
}
