//! 거래소 캔들 수집 명령어.
//!
//! 기간의 원시 캔들을 가져와 분석 파이프라인을 실행하고, 결과 레코드로
//! 저장소 컬렉션을 교체합니다.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use kline_analytics::CandlePipeline;
use kline_core::{kline_span, CandleRecord, Timeframe};
use kline_data::{CandleStore, KlineProvider, KlineRequest};
use std::time::Duration;
use tracing::{info, Instrument};

/// 수집 설정.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub symbol: String,
    pub interval: Timeframe,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl FetchConfig {
    /// 날짜 범위를 UTC 기준 요청으로 변환합니다. 종료일은 하루 전체를 포함합니다.
    pub fn to_request(&self) -> Result<KlineRequest> {
        if self.start_date > self.end_date {
            anyhow::bail!("Start date must be before end date");
        }

        let midnight = |date: NaiveDate| {
            date.and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp_millis())
                .context("Invalid date")
        };
        let start = midnight(self.start_date)?;
        let end = midnight(self.end_date.succ_opt().context("End date out of range")?)?;

        Ok(KlineRequest::new(
            self.symbol.to_uppercase(),
            self.interval,
            start,
            end - 1,
        ))
    }
}

/// 날짜 문자열 파싱 (YYYY-MM-DD).
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format: {}. Expected YYYY-MM-DD", s))
}

/// 수집 → 분석 → 저장을 실행하고 저장된 레코드 수를 반환합니다.
pub async fn fetch_and_store(
    provider: &dyn KlineProvider,
    store: &dyn CandleStore,
    pipeline: &CandlePipeline,
    request: &KlineRequest,
) -> Result<usize> {
    let span = kline_span!("fetch", request.symbol, request.interval);

    async {
        let rows = provider
            .fetch_klines(request)
            .await
            .with_context(|| format!("Failed to fetch klines from {}", provider.name()))?;

        let interval = request.interval.to_string();
        let enriched = pipeline
            .run(&request.symbol, &interval, &rows)
            .context("Candle analysis failed")?;

        let records: Vec<CandleRecord> = enriched.iter().map(|e| e.to_record()).collect();
        let stored = store
            .replace_all(&records)
            .await
            .context("Failed to store candle records")?;

        info!(rows = rows.len(), stored, "수집 완료");
        Ok::<_, anyhow::Error>(stored)
    }
    .instrument(span)
    .await
}

/// 스피너를 표시하며 수집을 실행합니다.
pub async fn run_fetch(
    config: &FetchConfig,
    provider: &dyn KlineProvider,
    store: &dyn CandleStore,
    pipeline: &CandlePipeline,
) -> Result<usize> {
    let request = config.to_request()?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message(format!(
        "Fetching {} {} from {}...",
        request.symbol,
        request.interval,
        provider.name()
    ));

    let result = fetch_and_store(provider, store, pipeline, &request).await;
    match &result {
        Ok(count) => pb.finish_with_message(format!("Stored {} candles", count)),
        Err(_) => pb.abandon_with_message("Fetch failed"),
    }
    result
}
