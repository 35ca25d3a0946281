//! 메모리 저장소.

use async_trait::async_trait;
use kline_core::CandleRecord;
use tokio::sync::RwLock;
use tracing::debug;

use super::{select_symbol, CandleStore};
use crate::error::DataResult;

/// 프로세스 메모리에 레코드를 보관하는 저장소.
#[derive(Debug, Default)]
pub struct MemoryCandleStore {
    records: RwLock<Vec<CandleRecord>>,
}

impl MemoryCandleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 전체 레코드 수.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl CandleStore for MemoryCandleStore {
    async fn replace_all(&self, records: &[CandleRecord]) -> DataResult<usize> {
        let mut guard = self.records.write().await;
        guard.clear();
        guard.extend_from_slice(records);
        debug!(count = records.len(), "메모리 저장소 교체");
        Ok(records.len())
    }

    async fn load_history(&self, symbol: &str) -> DataResult<Vec<CandleRecord>> {
        let guard = self.records.read().await;
        Ok(select_symbol(&guard, symbol))
    }
}
