//! 이상치 조회 명령어.

use anyhow::Result;
use kline_analytics::{OutlierDetector, OutlierReport};
use kline_core::{CandleRecord, PriceColumn};
use serde::Serialize;

use crate::output::{format_json, format_time, OutputFormat};

/// 이상치 조회 설정.
#[derive(Debug, Clone)]
pub struct OutliersConfig {
    pub method: String,
    pub threshold: f64,
    pub column: PriceColumn,
}

/// 표시된 행.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlaggedRow {
    pub index: usize,
    pub date: String,
    pub value: f64,
}

/// 레코드의 선택 컬럼에 대해 탐지를 실행합니다.
pub fn detect_outliers(records: &[CandleRecord], config: &OutliersConfig) -> OutlierReport {
    let values: Vec<f64> = records.iter().map(|r| r.price(config.column)).collect();
    OutlierDetector::new(config.threshold).detect_by_name(&values, &config.method)
}

pub fn flagged_rows(
    records: &[CandleRecord],
    report: &OutlierReport,
    column: PriceColumn,
) -> Vec<FlaggedRow> {
    report
        .flagged_indices()
        .into_iter()
        .filter_map(|index| {
            records.get(index).map(|r| FlaggedRow {
                index,
                date: format_time(r.date),
                value: r.price(column),
            })
        })
        .collect()
}

pub fn render_outliers(
    records: &[CandleRecord],
    report: &OutlierReport,
    config: &OutliersConfig,
    format: OutputFormat,
) -> Result<String> {
    let rows = flagged_rows(records, report, config.column);

    match format {
        OutputFormat::Json => format_json(&serde_json::json!({
            "column": config.column.to_string(),
            "method": report.method.map(|m| m.to_string()),
            "threshold": config.threshold,
            "warning": report.warning,
            "lower_bound": report.lower_bound,
            "upper_bound": report.upper_bound,
            "rows": records.len(),
            "flagged": rows,
        })),
        OutputFormat::Csv => {
            let mut output = format!("index,date,{}\n", config.column);
            for row in &rows {
                output.push_str(&format!("{},{},{}\n", row.index, row.date, row.value));
            }
            Ok(output)
        }
        OutputFormat::Table => {
            let mut output = String::new();
            if let Some(warning) = &report.warning {
                output.push_str(&format!("⚠ {}\n\n", warning));
            }
            if let (Some(lower), Some(upper)) = (report.lower_bound, report.upper_bound) {
                output.push_str(&format!("Normal range: [{:.4}, {:.4}]\n\n", lower, upper));
            }

            output.push_str(&format!(
                "{:>6} {:<17} {:>14}\n",
                "INDEX",
                "DATE",
                config.column.to_string().to_uppercase()
            ));
            output.push_str(&"-".repeat(39));
            output.push('\n');
            for row in &rows {
                output.push_str(&format!(
                    "{:>6} {:<17} {:>14.4}\n",
                    row.index, row.date, row.value
                ));
            }

            output.push('\n');
            output.push_str(&format!("Flagged: {} / {} rows", rows.len(), records.len()));
            Ok(output)
        }
    }
}
