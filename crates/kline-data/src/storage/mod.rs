//! 보강된 캔들 레코드 저장소.
//!
//! 저장은 교체 방식입니다: 새 배치를 쓰기 전에 컬렉션 전체를 비우며,
//! 실행 간 이력은 남기지 않습니다.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryCandleStore;

use async_trait::async_trait;
use kline_core::CandleRecord;

use crate::error::DataResult;

/// 캔들 레코드 저장소 trait.
#[async_trait]
pub trait CandleStore: Send + Sync {
    /// 컬렉션을 비우고 `records`로 교체합니다. 저장된 레코드 수를 반환합니다.
    async fn replace_all(&self, records: &[CandleRecord]) -> DataResult<usize>;

    /// 심볼의 레코드를 `open_time` 오름차순으로 읽습니다.
    async fn load_history(&self, symbol: &str) -> DataResult<Vec<CandleRecord>>;
}

/// 심볼로 거르고 `open_time` 순으로 정렬합니다.
pub(crate) fn select_symbol(records: &[CandleRecord], symbol: &str) -> Vec<CandleRecord> {
    let mut selected: Vec<CandleRecord> = records
        .iter()
        .filter(|r| r.symbol.eq_ignore_ascii_case(symbol))
        .cloned()
        .collect();
    selected.sort_by_key(|r| r.open_time);
    selected
}
