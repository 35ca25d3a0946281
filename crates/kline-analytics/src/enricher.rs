//! 시퀀스 보강.
//!
//! 정렬된 캔들 시퀀스를 한 번 순회하며 현재(가장 최근) 캔들에 패턴 주석을
//! 기록합니다. 윈도우는 소유한 시퀀스의 인덱스 슬라이스이므로 과거 캔들을
//! 다시 쓰는 일이 없습니다.
//!
//! - 인덱스 `i ≥ 1`: 최근 2캔들 → `type_two`
//! - 인덱스 `i ≥ 2`: 최근 3캔들 → `type_three`
//! - 5캔들 모드에서 `i ≥ 4`이고 3캔들 결과가 없으면: 5캔들 → 갭(최근 2캔들) 순으로 `type_three`
//! - 모든 인덱스: 단일 캔들 → `type`, 후행 이동평균 → `moving_average`

use kline_core::{AnalysisConfig, Candle, CandlePatternType, PatternAnnotations, PatternedCandle};
use tracing::debug;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::indicators::candle_patterns::{CandlePatternClassifier, PatternParams};
use crate::indicators::trend::{trailing_sma, SmaParams};

/// open_time 오름차순(엄격)을 확인합니다.
pub fn check_ordering(candles: &[Candle]) -> AnalyticsResult<()> {
    for (index, pair) in candles.windows(2).enumerate() {
        let previous = pair[0].open_time();
        let current = pair[1].open_time();
        if current <= previous {
            return Err(AnalyticsError::UnorderedSequence {
                index: index + 1,
                previous,
                current,
            });
        }
    }
    Ok(())
}

/// `end`에서 끝나는 길이 `N` 윈도우.
fn window_ending_at<const N: usize>(candles: &[Candle], end: usize) -> Option<&[Candle; N]> {
    if end + 1 < N {
        return None;
    }
    candles[end + 1 - N..=end].try_into().ok()
}

/// 패턴 및 이동평균 보강기.
#[derive(Debug, Clone)]
pub struct SequenceEnricher {
    classifier: CandlePatternClassifier,
    moving_average: SmaParams,
    five_candle_patterns: bool,
}

impl Default for SequenceEnricher {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl SequenceEnricher {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            classifier: CandlePatternClassifier::new(PatternParams::from(config)),
            moving_average: SmaParams {
                period: config.moving_average_period,
            },
            five_candle_patterns: config.five_candle_patterns,
        }
    }

    /// 한 위치의 패턴 주석을 계산합니다 (이동평균 제외).
    fn annotate(&self, candles: &[Candle], index: usize) -> PatternAnnotations {
        let classifier = &self.classifier;

        let type_two = window_ending_at::<2>(candles, index).and_then(|w| classifier.classify_two(w));

        let mut type_three =
            window_ending_at::<3>(candles, index).and_then(|w| classifier.classify_three(w));
        if type_three.is_none() && self.five_candle_patterns {
            if let Some(five) = window_ending_at::<5>(candles, index) {
                type_three = classifier.classify_five(five).or_else(|| {
                    window_ending_at::<2>(candles, index).and_then(|w| classifier.classify_gap(w))
                });
            }
        }

        PatternAnnotations {
            candle_type: classifier.classify_single(&candles[index]),
            type_two,
            type_three,
            moving_average: 0.0,
        }
    }

    /// 시퀀스를 보강합니다.
    ///
    /// 순서가 어긋나면 재정렬하지 않고 `UnorderedSequence`를 반환합니다.
    pub fn enrich(&self, candles: Vec<Candle>) -> AnalyticsResult<Vec<PatternedCandle>> {
        check_ordering(&candles)?;

        let closes: Vec<f64> = candles.iter().map(Candle::close).collect();
        let averages = trailing_sma(&closes, self.moving_average)?;

        let annotations: Vec<PatternAnnotations> = (0..candles.len())
            .zip(averages)
            .map(|(index, moving_average)| PatternAnnotations {
                moving_average,
                ..self.annotate(&candles, index)
            })
            .collect();

        let tagged = |pick: fn(&PatternAnnotations) -> Option<CandlePatternType>| {
            annotations.iter().filter_map(pick).count()
        };
        debug!(
            candles = candles.len(),
            single = tagged(|a| a.candle_type),
            two = tagged(|a| a.type_two),
            three = tagged(|a| a.type_three),
            "패턴 보강 완료"
        );

        Ok(candles
            .into_iter()
            .zip(annotations)
            .map(|(candle, patterns)| PatternedCandle::new(candle, patterns))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::test_candle_at as candle;

    #[test]
    fn test_moving_average_column() {
        let candles: Vec<Candle> = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0]
            .iter()
            .enumerate()
            .map(|(i, &c)| candle(i as i64, c, c + 1.0, c - 1.0, c))
            .collect();

        let enriched = SequenceEnricher::default().enrich(candles).unwrap();
        let averages: Vec<f64> = enriched.iter().map(|e| e.patterns.moving_average).collect();
        assert_eq!(averages, vec![0.0, 0.0, 0.0, 0.0, 30.0, 40.0]);
    }

    #[test]
    fn test_writes_only_to_current_candle() {
        // 피어싱 패턴은 두 번째 캔들에만 기록
        let candles = vec![
            candle(0, 100.0, 100.0, 95.0, 96.0),
            candle(1, 95.0, 102.0, 94.0, 101.0),
        ];
        let enriched = SequenceEnricher::default().enrich(candles).unwrap();

        assert_eq!(enriched[0].patterns.type_two, None);
        assert_eq!(enriched[1].patterns.type_two, Some(CandlePatternType::PiercingPattern));
        assert!(enriched.iter().all(|e| e.patterns.type_three.is_none()));
    }

    #[test]
    fn test_three_window_starts_at_third_candle() {
        let candles = vec![
            candle(0, 110.0, 111.0, 99.0, 100.0),
            candle(1, 99.0, 100.0, 97.0, 99.5),
            candle(2, 101.0, 113.0, 100.0, 112.0),
        ];
        let enriched = SequenceEnricher::default().enrich(candles).unwrap();
        assert_eq!(enriched[2].patterns.type_three, Some(CandlePatternType::MorningStar));
        assert_eq!(enriched[1].patterns.type_three, None);
    }

    #[test]
    fn test_five_candle_mode() {
        let candles = vec![
            candle(0, 120.0, 121.0, 109.0, 110.0),
            candle(1, 111.0, 113.0, 110.0, 112.0),
            candle(2, 112.0, 114.0, 111.0, 113.0),
            candle(3, 113.0, 115.0, 112.0, 114.0),
            candle(4, 114.0, 115.0, 104.0, 105.0),
        ];

        let default = SequenceEnricher::default().enrich(candles.clone()).unwrap();
        assert_ne!(default[4].patterns.type_three, Some(CandlePatternType::FallingThreeMethods));

        let config = AnalysisConfig {
            five_candle_patterns: true,
            ..AnalysisConfig::default()
        };
        let extended = SequenceEnricher::new(&config).enrich(candles).unwrap();
        assert_eq!(
            extended[4].patterns.type_three,
            Some(CandlePatternType::FallingThreeMethods)
        );
    }

    #[test]
    fn test_unordered_sequence_rejected() {
        let candles = vec![
            candle(1, 100.0, 101.0, 99.0, 100.5),
            candle(0, 100.0, 101.0, 99.0, 100.5),
        ];
        let err = SequenceEnricher::default().enrich(candles).unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::UnorderedSequence { index: 1, .. }
        ));
    }

    #[test]
    fn test_empty_sequence() {
        let enriched = SequenceEnricher::default().enrich(Vec::new()).unwrap();
        assert!(enriched.is_empty());
    }
}
