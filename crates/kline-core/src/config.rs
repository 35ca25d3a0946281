//! 설정 관리.
//!
//! 기본값 → TOML 파일(선택) → `KLINE__*` 환경 변수 순서로 설정을 병합합니다.
//! 모든 섹션은 `#[serde(default)]`이므로 파일에는 바꾸고 싶은 값만 적으면 됩니다.
//!
//! ```toml
//! [analysis]
//! moving_average_period = 7
//! tweezer_match = "tolerant"
//!
//! [outlier]
//! method = "iqr"
//! threshold = 1.5
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::PriceColumn;
use crate::error::{CoreError, CoreResult};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 캔들 분석 파이프라인 설정
    pub analysis: AnalysisConfig,
    /// 이상치 탐지 설정
    pub outlier: OutlierConfig,
    /// 렌코 설정
    pub renko: RenkoConfig,
    /// 시세 제공자 설정
    pub provider: ProviderConfig,
    /// 저장소 설정
    pub storage: StorageConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 트위저 패턴의 고가/저가 일치 판정 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TweezerMatch {
    /// 부동소수점 완전 일치
    #[default]
    Exact,
    /// 첫 캔들 범위 대비 허용 오차 내 일치
    Tolerant,
}

/// 잘못된 원시 행을 만났을 때의 배치 정책.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// 해당 행만 건너뜀
    Skip,
    /// 배치 전체 중단
    #[default]
    Abort,
}

/// 캔들 분석 파이프라인 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// 이동평균 기간
    pub moving_average_period: usize,
    /// 트위저 판정 방식
    pub tweezer_match: TweezerMatch,
    /// 근사 일치 허용 오차 (첫 캔들 고가-저가 범위 대비 비율)
    pub near_equal_tolerance: f64,
    /// 세션당 캔들 수
    pub session_size: usize,
    /// 5캔들 패턴 및 갭 패턴 평가 여부
    pub five_candle_patterns: bool,
    /// 잘못된 행 처리 정책
    pub row_policy: RowPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            moving_average_period: 5,
            tweezer_match: TweezerMatch::Exact,
            near_equal_tolerance: 0.02,
            session_size: 1,
            five_candle_patterns: false,
            row_policy: RowPolicy::Abort,
        }
    }
}

/// 이상치 탐지 설정.
///
/// `method`는 문자열로 유지합니다. 알 수 없는 값은 로딩 단계에서 거부하지 않고
/// 탐지 시점에 경고와 함께 "플래그 없음"으로 처리됩니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutlierConfig {
    /// 탐지 방법 (zscore, iqr)
    pub method: String,
    /// 임계값
    pub threshold: f64,
    /// 대상 가격 컬럼
    pub column: String,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            method: "zscore".to_string(),
            threshold: 3.0,
            column: "close".to_string(),
        }
    }
}

/// 렌코 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RenkoConfig {
    /// 벽돌 크기 (없으면 자동 산출)
    pub brick_size: Option<f64>,
}

/// 시세 제공자 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// REST API 기본 URL
    pub base_url: String,
    /// 페이지당 최대 캔들 수
    pub page_limit: u32,
    /// 페이지 요청 간 딜레이 (밀리초)
    pub request_delay_ms: u64,
    /// 요청 한도 초과 시 최대 재시도 횟수
    pub max_retries: u32,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.binance.com".to_string(),
            page_limit: 1000,
            request_delay_ms: 250,
            max_retries: 3,
            timeout_secs: 30,
        }
    }
}

/// 저장소 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// 데이터 디렉토리
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("KLINE")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 값 범위를 검증합니다.
    pub fn validate(&self) -> CoreResult<()> {
        if self.analysis.moving_average_period == 0 {
            return Err(CoreError::Config(
                "analysis.moving_average_period는 0보다 커야 합니다".to_string(),
            ));
        }
        if self.analysis.session_size == 0 {
            return Err(CoreError::Config(
                "analysis.session_size는 0보다 커야 합니다".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.analysis.near_equal_tolerance) {
            return Err(CoreError::Config(format!(
                "analysis.near_equal_tolerance 범위 오류: {}",
                self.analysis.near_equal_tolerance
            )));
        }
        if !self.outlier.threshold.is_finite() || self.outlier.threshold < 0.0 {
            return Err(CoreError::Config(format!(
                "outlier.threshold 범위 오류: {}",
                self.outlier.threshold
            )));
        }
        self.outlier.column.parse::<PriceColumn>()?;
        if let Some(size) = self.renko.brick_size {
            if !size.is_finite() || size <= 0.0 {
                return Err(CoreError::Config(format!(
                    "renko.brick_size는 양수여야 합니다: {}",
                    size
                )));
            }
        }
        if self.provider.page_limit == 0 || self.provider.page_limit > 1000 {
            return Err(CoreError::Config(format!(
                "provider.page_limit는 1~1000 이어야 합니다: {}",
                self.provider.page_limit
            )));
        }
        Ok(())
    }
}
