//! 패턴 컬럼 조회 명령어.

use anyhow::Result;
use kline_core::CandleRecord;
use serde::Serialize;

use crate::output::{escape_csv, format_json, format_time, label, OutputFormat};

/// 패턴 출력 행.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternRow {
    pub date: String,
    #[serde(rename = "type")]
    pub candle_type: &'static str,
    pub type_two: &'static str,
    pub type_three: &'static str,
    pub upper_wick_pct: f64,
    pub lower_wick_pct: f64,
    pub moving_average: f64,
    pub is_bullish: bool,
}

impl From<&CandleRecord> for PatternRow {
    fn from(record: &CandleRecord) -> Self {
        Self {
            date: format_time(record.date),
            candle_type: label(record.candle_type),
            type_two: label(record.type_two),
            type_three: label(record.type_three),
            upper_wick_pct: record.upper_wick_pct,
            lower_wick_pct: record.lower_wick_pct,
            moving_average: record.moving_average,
            is_bullish: record.is_bullish,
        }
    }
}

/// 최근 `limit`개 레코드를 행으로 변환합니다 (0 = 전체).
pub fn pattern_rows(records: &[CandleRecord], limit: usize) -> Vec<PatternRow> {
    let skip = if limit == 0 {
        0
    } else {
        records.len().saturating_sub(limit)
    };
    records[skip..].iter().map(PatternRow::from).collect()
}

pub fn render_patterns(rows: &[PatternRow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(format_table(rows)),
        OutputFormat::Csv => Ok(format_csv(rows)),
        OutputFormat::Json => format_json(rows),
    }
}

fn format_table(rows: &[PatternRow]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<17} {:<20} {:<24} {:<28} {:>8} {:>8} {:>12} {:<7}\n",
        "DATE", "TYPE", "TYPE_TWO", "TYPE_THREE", "UPPER%", "LOWER%", "MA", "BULLISH"
    ));
    output.push_str(&"-".repeat(131));
    output.push('\n');

    for row in rows {
        output.push_str(&format!(
            "{:<17} {:<20} {:<24} {:<28} {:>8.2} {:>8.2} {:>12.2} {:<7}\n",
            row.date,
            row.candle_type,
            row.type_two,
            row.type_three,
            row.upper_wick_pct,
            row.lower_wick_pct,
            row.moving_average,
            if row.is_bullish { "✓" } else { "✗" }
        ));
    }

    output.push('\n');
    output.push_str(&format!("Total: {} candles", rows.len()));
    output
}

fn format_csv(rows: &[PatternRow]) -> String {
    let mut output = String::new();
    output.push_str(
        "date,type,type_two,type_three,upper_wick_pct,lower_wick_pct,moving_average,is_bullish\n",
    );

    for row in rows {
        output.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            row.date,
            escape_csv(row.candle_type),
            escape_csv(row.type_two),
            escape_csv(row.type_three),
            row.upper_wick_pct,
            row.lower_wick_pct,
            row.moving_average,
            row.is_bullish
        ));
    }

    output
}
