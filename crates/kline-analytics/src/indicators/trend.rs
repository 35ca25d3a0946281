//! 추세 지표.
//!
//! 캔들 보강 단계가 사용하는 후행 단순 이동평균을 제공합니다.

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// SMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self { period: 5 }
    }
}

/// 소수점 둘째 자리 반올림.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 후행 단순 이동평균.
///
/// 인덱스 `period - 1` 미만은 `0.0`, 이후는 최근 `period`개 종가의 평균을
/// 소수점 둘째 자리로 반올림한 값입니다. 입력 길이가 기간보다 짧아도
/// 오류가 아니며 모두 `0.0`이 됩니다.
pub fn trailing_sma(prices: &[f64], params: SmaParams) -> AnalyticsResult<Vec<f64>> {
    let period = params.period;
    if period == 0 {
        return Err(AnalyticsError::InvalidParameter(
            "기간은 0보다 커야 합니다".to_string(),
        ));
    }

    let mut result = Vec::with_capacity(prices.len());

    for i in 0..prices.len() {
        if i + 1 < period {
            result.push(0.0);
        } else {
            let sum: f64 = prices[i + 1 - period..=i].iter().sum();
            result.push(round2(sum / period as f64));
        }
    }

    Ok(result)
}
