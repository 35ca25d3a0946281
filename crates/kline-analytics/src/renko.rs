//! 렌코 벽돌 집계.
//!
//! 시간 축을 제거하고 고정 크기 가격 이동마다 벽돌을 하나씩 쌓습니다.
//!
//! ## 벽돌 크기 자동 산출
//! 1. 종가 1차 차분의 절대값에서 20/30/40/50 백분위수를 구함
//! 2. `평균 종가 × 0.001` 미만인 값은 버림
//! 3. 남은 값의 중앙값, 모두 버려졌으면 그 하한의 10배
//!
//! 포인트가 2개 미만이면 크기를 정할 수 없어 벽돌을 만들지 않습니다.
//!
//! ## 집계 한도
//! 벽돌 크기가 가격에 비해 너무 작아 기준가에 더해도 값이 변하지 않거나,
//! 벽돌 수가 포인트당 [`MAX_BRICKS_PER_POINT`]개를 넘으면 `InvalidParameter`.

use kline_core::{Brick, BrickDirection, PricePoint, RenkoChart};
use tracing::{debug, warn};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::indicators::statistics::{mean, median, quantile};

const BRICK_PERCENTILES: [f64; 4] = [0.2, 0.3, 0.4, 0.5];
const MIN_SIZE_RATIO: f64 = 0.001;
const FALLBACK_MULTIPLIER: f64 = 10.0;

/// 입력 포인트 하나당 허용되는 최대 벽돌 수.
pub const MAX_BRICKS_PER_POINT: usize = 10_000;

/// 종가 시퀀스로부터 벽돌 크기를 산출합니다.
///
/// 산출할 수 없으면 (빈 입력, 단일 포인트) `None`.
pub fn auto_brick_size(closes: &[f64]) -> Option<f64> {
    if closes.len() < 2 {
        // 단일 포인트의 표본표준편차는 정의되지 않음 (pandas: NaN)
        return None;
    }

    let changes: Vec<f64> = closes.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
    let min_size = mean(closes)? * MIN_SIZE_RATIO;

    let candidates: Vec<f64> = BRICK_PERCENTILES
        .iter()
        .filter_map(|&p| quantile(&changes, p))
        .filter(|&size| size >= min_size)
        .collect();

    if candidates.is_empty() {
        Some(min_size * FALLBACK_MULTIPLIER)
    } else {
        median(&candidates)
    }
}

/// 렌코 집계기.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenkoBuilder {
    brick_size: Option<f64>,
}

impl RenkoBuilder {
    /// `brick_size`가 `None`이면 자동 산출합니다.
    pub fn new(brick_size: Option<f64>) -> Self {
        Self { brick_size }
    }

    /// 포인트 시퀀스를 벽돌로 집계합니다.
    ///
    /// 타임스탬프가 오름차순이 아니면 `UnorderedSequence`를 반환합니다.
    /// 벽돌 크기가 양수가 아니거나 가격 대비 너무 작으면 `InvalidParameter`.
    pub fn build(&self, points: &[PricePoint]) -> AnalyticsResult<RenkoChart> {
        check_points(points)?;

        let size = match self.brick_size {
            Some(size) => size,
            None => {
                let closes: Vec<f64> = points.iter().map(|p| p.price).collect();
                match auto_brick_size(&closes) {
                    Some(size) => size,
                    None => {
                        warn!(points = points.len(), "포인트 부족, 벽돌 없음");
                        return Ok(RenkoChart::default());
                    }
                }
            }
        };

        if !size.is_finite() || size <= 0.0 {
            return Err(AnalyticsError::InvalidParameter(format!(
                "벽돌 크기는 양수여야 합니다: {}",
                size
            )));
        }

        let chart = RenkoChart {
            brick_size: size,
            bricks: aggregate(points, size)?,
        };

        debug!(
            brick_size = size,
            points = points.len(),
            bricks = chart.len(),
            up = chart.up_count(),
            down = chart.down_count(),
            "렌코 집계 완료"
        );
        Ok(chart)
    }
}

fn check_points(points: &[PricePoint]) -> AnalyticsResult<()> {
    if let Some((index, point)) = points.iter().enumerate().find(|(_, p)| !p.price.is_finite()) {
        return Err(AnalyticsError::InvalidParameter(format!(
            "#{} 가격이 유한하지 않음: {}",
            index, point.price
        )));
    }
    for (index, pair) in points.windows(2).enumerate() {
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(AnalyticsError::UnorderedSequence {
                index: index + 1,
                previous: pair[0].timestamp,
                current: pair[1].timestamp,
            });
        }
    }
    Ok(())
}

fn aggregate(points: &[PricePoint], size: f64) -> AnalyticsResult<Vec<Brick>> {
    let Some(first) = points.first() else {
        return Ok(Vec::new());
    };

    let max_bricks = points.len().saturating_mul(MAX_BRICKS_PER_POINT);
    let mut bricks = Vec::new();
    let mut reference = first.price;

    for (source_index, point) in points.iter().enumerate().skip(1) {
        let steps = ((point.price - reference).abs() / size).floor();
        if steps < 1.0 {
            continue;
        }
        if bricks.len() as f64 + steps > max_bricks as f64 {
            return Err(AnalyticsError::InvalidParameter(format!(
                "벽돌 크기 {}가 너무 작음: #{}에서 벽돌 {}개 초과",
                size, source_index, max_bricks
            )));
        }

        while (point.price - reference).abs() >= size {
            let (direction, next) = if point.price > reference {
                (BrickDirection::Up, reference + size)
            } else {
                (BrickDirection::Down, reference - size)
            };
            if next == reference {
                return Err(AnalyticsError::InvalidParameter(format!(
                    "벽돌 크기 {}가 가격 {}의 정밀도보다 작음",
                    size, reference
                )));
            }
            bricks.push(Brick {
                open: reference,
                close: next,
                direction,
                index: 0,
                source_index,
                timestamp: point.timestamp,
            });
            reference = next;
        }
    }

    for (index, brick) in bricks.iter_mut().enumerate() {
        brick.index = index;
    }
    Ok(bricks)
}
