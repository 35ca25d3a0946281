//! JSON 파일 저장소.
//!
//! 컬렉션 하나가 `data_dir/<collection>.json` 파일 하나이며, 내용은 레코드의
//! pretty JSON 배열입니다. 쓰기는 임시 파일에 기록한 뒤 이름을 바꿉니다.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use kline_core::CandleRecord;
use tracing::{debug, info};

use super::{select_symbol, CandleStore};
use crate::error::{DataError, DataResult};

/// 기본 컬렉션 이름.
pub const DEFAULT_COLLECTION: &str = "candles";

/// JSON 파일 저장소.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    collection: String,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// 컬렉션 파일 경로.
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.collection))
    }

    fn temp_path(&self) -> PathBuf {
        self.data_dir.join(format!(".{}.json.tmp", self.collection))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[async_trait]
impl CandleStore for JsonFileStore {
    async fn replace_all(&self, records: &[CandleRecord]) -> DataResult<usize> {
        tokio::fs::create_dir_all(&self.data_dir).await?;

        let body = serde_json::to_vec_pretty(records)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, body).await?;
        tokio::fs::rename(&temp, self.path()).await?;

        info!(
            path = %self.path().display(),
            count = records.len(),
            "캔들 컬렉션 교체"
        );
        Ok(records.len())
    }

    async fn load_history(&self, symbol: &str) -> DataResult<Vec<CandleRecord>> {
        let path = self.path();
        let body = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                DataError::NotFound(format!("collection file {}", path.display()))
            }
            _ => DataError::from(e),
        })?;

        let records: Vec<CandleRecord> = serde_json::from_slice(&body)?;
        let selected = select_symbol(&records, symbol);
        debug!(symbol, total = records.len(), selected = selected.len(), "캔들 이력 로드");
        Ok(selected)
    }
}
