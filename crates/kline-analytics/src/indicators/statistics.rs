//! 기술 통계 헬퍼.
//!
//! 이상치 탐지와 렌코 벽돌 크기 산출이 공유하는 순수 함수들입니다.
//! 빈 입력에는 `None`을 반환합니다.

/// 산술 평균.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// 모표준편차 (분모 n).
pub fn population_std(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// 선형 보간 분위수. `q`는 [0, 1].
///
/// 위치 `(n - 1) * q` 양쪽의 정렬된 값 사이를 보간합니다.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let position = (sorted.len() - 1) as f64 * q;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// 중앙값.
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}
