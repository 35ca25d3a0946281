//! 렌코 벽돌 조회 명령어.

use anyhow::{Context, Result};
use kline_analytics::RenkoBuilder;
use kline_core::{CandleRecord, PricePoint, RenkoChart};

use crate::output::{format_json, format_millis, OutputFormat};

/// 저장된 레코드의 종가로 벽돌을 쌓습니다.
///
/// 타임스탬프는 캔들 종료 시각입니다.
pub fn build_chart(records: &[CandleRecord], brick_size: Option<f64>) -> Result<RenkoChart> {
    let points: Vec<PricePoint> = records
        .iter()
        .map(|r| PricePoint::new(r.close_time, r.close))
        .collect();

    RenkoBuilder::new(brick_size)
        .build(&points)
        .context("Renko aggregation failed")
}

pub fn render_renko(chart: &RenkoChart, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => format_json(&serde_json::json!({
            "brick_size": chart.brick_size,
            "total": chart.len(),
            "up": chart.up_count(),
            "down": chart.down_count(),
            "bricks": chart.bricks,
        })),
        OutputFormat::Csv => {
            let mut output = String::from("index,time,direction,open,close\n");
            for brick in &chart.bricks {
                output.push_str(&format!(
                    "{},{},{},{},{}\n",
                    brick.index,
                    format_millis(brick.timestamp),
                    brick.direction,
                    brick.open,
                    brick.close
                ));
            }
            Ok(output)
        }
        OutputFormat::Table => {
            let mut output = format!("Brick size: {:.4}\n\n", chart.brick_size);
            output.push_str(&format!(
                "{:>6} {:<17} {:<5} {:>14} {:>14}\n",
                "INDEX", "TIME", "DIR", "OPEN", "CLOSE"
            ));
            output.push_str(&"-".repeat(60));
            output.push('\n');

            for brick in &chart.bricks {
                output.push_str(&format!(
                    "{:>6} {:<17} {:<5} {:>14.4} {:>14.4}\n",
                    brick.index,
                    format_millis(brick.timestamp),
                    brick.direction,
                    brick.open,
                    brick.close
                ));
            }

            output.push('\n');
            output.push_str(&format!(
                "Total: {} bricks (up {}, down {})",
                chart.len(),
                chart.up_count(),
                chart.down_count()
            ));
            Ok(output)
        }
    }
}
