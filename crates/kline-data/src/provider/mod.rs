//! 캔들 데이터 Provider 모듈.
//!
//! 심볼/간격/기간 단위로 원시 캔들 행을 가져옵니다. 행은 시작 시간
//! 오름차순이며 빈 결과는 "데이터 없음"으로 취급합니다.
//!
//! - `BinanceKlineProvider`: Binance REST `/api/v3/klines` (페이지 분할, 요청 한도 처리)

mod binance;

pub use binance::BinanceKlineProvider;

use async_trait::async_trait;
use kline_core::{RawKline, Timeframe};

use crate::error::{DataError, DataResult};

/// 캔들 조회 요청.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KlineRequest {
    pub symbol: String,
    pub interval: Timeframe,
    /// 조회 시작 (포함, Unix ms)
    pub start_time_ms: i64,
    /// 조회 종료 (포함, Unix ms)
    pub end_time_ms: i64,
}

impl KlineRequest {
    pub fn new(
        symbol: impl Into<String>,
        interval: Timeframe,
        start_time_ms: i64,
        end_time_ms: i64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            interval,
            start_time_ms,
            end_time_ms,
        }
    }

    /// 심볼이 비어 있거나 기간이 뒤집힌 요청을 거부합니다.
    pub fn validate(&self) -> DataResult<()> {
        if self.symbol.trim().is_empty() {
            return Err(DataError::InvalidData("symbol is empty".to_string()));
        }
        if self.end_time_ms < self.start_time_ms {
            return Err(DataError::InvalidData(format!(
                "end_time_ms({}) < start_time_ms({})",
                self.end_time_ms, self.start_time_ms
            )));
        }
        Ok(())
    }
}

/// 캔들 데이터 Provider trait.
#[async_trait]
pub trait KlineProvider: Send + Sync {
    /// Provider 이름.
    fn name(&self) -> &str;

    /// 요청 기간의 원시 캔들 행 조회.
    async fn fetch_klines(&self, request: &KlineRequest) -> DataResult<Vec<RawKline>>;
}
