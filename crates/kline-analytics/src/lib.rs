//! 캔들스틱 분석 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 원시 OHLCV 행 정규화
//! - 캔들 패턴 분류 (1/2/3/5캔들)
//! - 시퀀스 보강 (패턴 주석, 이동평균)
//! - 세션 고가/저가 타이밍 분석
//! - 이상치 탐지 (Z-Score, IQR)
//! - 렌코 벽돌 집계
//!
//! 모든 구성 요소는 동기식 배치 변환이며 I/O를 수행하지 않습니다.
//!
//! # Re-exports
//!
//! - [`pipeline`]: 정규화부터 세션 분석까지 한 번에 실행하는 `CandlePipeline`
//! - [`outlier`]: `OutlierDetector`, `OutlierReport`
//! - [`renko`]: `RenkoBuilder`, `auto_brick_size`

pub mod enricher;
pub mod error;
pub mod indicators;
pub mod normalizer;
pub mod outlier;
pub mod pipeline;
pub mod renko;
pub mod session_extremes;

pub use enricher::{check_ordering, SequenceEnricher};
pub use error::{AnalyticsError, AnalyticsResult};
pub use indicators::{CandlePatternClassifier, PatternParams};
pub use normalizer::{derive_geometry, normalize_batch, normalize_row};
pub use outlier::{OutlierDetector, OutlierMethod, OutlierReport};
pub use pipeline::CandlePipeline;
pub use renko::{auto_brick_size, RenkoBuilder};
pub use session_extremes::{analyze_session, annotate_sessions};
