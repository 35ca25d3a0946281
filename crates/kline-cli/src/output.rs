//! 출력 형식 및 공통 포맷 도우미.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use kline_core::{CandlePatternType, NO_PATTERN_LABEL};
use serde::Serialize;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!(
                "Invalid format: {}. Use: table, csv, json",
                s
            )),
        }
    }
}

/// JSON 형식 출력.
pub fn format_json<T: Serialize + ?Sized>(rows: &T) -> Result<String> {
    serde_json::to_string_pretty(rows).context("Failed to serialize to JSON")
}

/// CSV 이스케이프 (콤마나 따옴표 포함 시 따옴표로 감싸기).
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// 패턴 라벨, 없으면 `-`.
pub fn label(pattern: Option<CandlePatternType>) -> &'static str {
    pattern.map_or(NO_PATTERN_LABEL, |p| p.label())
}

pub fn format_time(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

/// epoch ms를 표시용 시각으로 변환. 범위를 벗어나면 원래 숫자.
pub fn format_millis(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(format_time)
        .unwrap_or_else(|| millis.to_string())
}
