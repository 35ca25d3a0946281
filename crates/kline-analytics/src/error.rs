//! 분석 엔진 에러 타입.

use thiserror::Error;

/// 분석 단계 오류.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// 원시 행의 숫자 필드가 없거나 잘못됨
    #[error("잘못된 원시 행 #{index}: {reason}")]
    MalformedRow { index: usize, reason: String },

    /// open_time 오름차순 위반
    #[error("정렬되지 않은 시퀀스: #{index} open_time {current} <= 이전 {previous}")]
    UnorderedSequence {
        index: usize,
        previous: i64,
        current: i64,
    },

    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),
}

/// 분석 결과 타입.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
