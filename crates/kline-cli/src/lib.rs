//! CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 거래소 캔들 수집 및 분석 결과 저장
//! - 패턴/이상치/렌코 조회 및 출력

pub mod commands;
pub mod output;
