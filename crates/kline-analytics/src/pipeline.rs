//! 캔들 분석 파이프라인.
//!
//! 정규화 → 정렬 확인 → 패턴/이동평균 보강 → 세션 분석 순서로 실행합니다.
//! 배치 전체가 성공하거나 오류 하나를 반환하며, 부분 결과는 없습니다.

use kline_core::{AnalysisConfig, EnrichedCandle, RawKline};
use tracing::{info, instrument};

use crate::enricher::SequenceEnricher;
use crate::error::AnalyticsResult;
use crate::normalizer::normalize_batch;
use crate::session_extremes::annotate_sessions;

/// 캔들 분석 파이프라인.
#[derive(Debug, Clone)]
pub struct CandlePipeline {
    config: AnalysisConfig,
    enricher: SequenceEnricher,
}

impl Default for CandlePipeline {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl CandlePipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        let enricher = SequenceEnricher::new(&config);
        Self { config, enricher }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// 원시 행 배치를 보강된 캔들 시퀀스로 변환합니다.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub fn run(
        &self,
        symbol: &str,
        interval: &str,
        rows: &[RawKline],
    ) -> AnalyticsResult<Vec<EnrichedCandle>> {
        let candles = normalize_batch(rows, symbol, interval, self.config.row_policy)?;
        let patterned = self.enricher.enrich(candles)?;
        let enriched = annotate_sessions(patterned, self.config.session_size);

        info!(candles = enriched.len(), "캔들 분석 완료");
        Ok(enriched)
    }
}
