//! 지표 모듈.
//!
//! 캔들 분석 파이프라인이 사용하는 순수 계산 함수를 제공합니다.
//!
//! # 구성
//!
//! - **candle_patterns**: 1/2/3/5캔들 패턴 규칙 테이블과 분류기
//! - **trend**: 후행 단순 이동평균 (SMA)
//! - **statistics**: 평균, 표준편차, 선형 보간 분위수
//!
//! # 사용 예시
//!
//! ```ignore
//! use kline_analytics::indicators::{CandlePatternClassifier, PatternParams};
//!
//! let classifier = CandlePatternClassifier::new(PatternParams::default());
//! let label = classifier.classify_single(&candle);
//! ```

pub mod candle_patterns;
pub mod statistics;
pub mod trend;

pub use candle_patterns::{CandlePatternClassifier, PatternParams, PatternRule};
pub use trend::{round2, trailing_sma, SmaParams};
