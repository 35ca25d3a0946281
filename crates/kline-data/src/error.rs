//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 네트워크 오류 (연결 실패, 타임아웃)
    #[error("Network error: {0}")]
    Network(String),

    /// 요청 한도 초과
    #[error("Rate limited")]
    RateLimited,

    /// 거래소 API 오류 응답
    #[error("API error {code}: {message}")]
    Api { code: i32, message: String },

    /// 응답 파싱 오류
    #[error("Parse error: {0}")]
    Parse(String),

    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(String),

    /// 직렬화/역직렬화 오류
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// 잘못된 요청 또는 데이터
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 대상을 찾을 수 없음
    #[error("Not found: {0}")]
    NotFound(String),
}

impl DataError {
    /// 재시도하면 성공할 수 있는 오류인지 여부.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DataError::Network(_) | DataError::RateLimited)
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DataError::Parse(err.to_string())
        } else {
            DataError::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => DataError::NotFound(err.to_string()),
            _ => DataError::Io(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Serialization(err.to_string())
    }
}

pub type DataResult<T> = std::result::Result<T, DataError>;
