//! 캔들 데이터 수집 및 저장.
//!
//! 이 crate는 다음을 제공합니다:
//! - 거래소 REST API에서 원시 캔들 행을 가져오는 Provider
//! - 보강된 캔들 레코드를 교체 방식으로 저장하는 저장소

pub mod error;
pub mod provider;
pub mod storage;

pub use error::{DataError, DataResult};
pub use provider::{BinanceKlineProvider, KlineProvider, KlineRequest};
pub use storage::{CandleStore, JsonFileStore, MemoryCandleStore};
