//! 캔들 분석 도메인 모델.

mod market_data;
mod pattern;
mod renko;

pub use market_data::*;
pub use pattern::*;
pub use renko::*;
