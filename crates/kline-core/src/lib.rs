//! # Kline Core
//!
//! 캔들스틱 분석 시스템의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 분석 엔진과 주변 협력자가 공유하는 기본 타입을 제공합니다:
//! - 원시 OHLCV 행과 계층형 캔들 레코드
//! - 캔들 패턴 라벨
//! - 렌코 벽돌 타입
//! - 타임프레임 정의
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use crate::config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
