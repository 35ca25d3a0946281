//! 캔들스틱 분석 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # BTCUSDT 1시간봉 수집 및 분석
//! kline fetch -s BTCUSDT -i 1h -f 2025-01-01 -t 2025-01-31
//!
//! # 최근 20개 캔들의 패턴
//! kline patterns -s BTCUSDT --limit 20
//!
//! # 종가 이상치 (IQR)
//! kline outliers -s BTCUSDT --method iqr --threshold 1.5
//!
//! # 렌코 벽돌 (크기 지정)
//! kline renko -s BTCUSDT --brick-size 50
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kline_analytics::CandlePipeline;
use kline_core::{init_logging, AppConfig, CandleRecord, LogConfig, PriceColumn, Timeframe};
use kline_data::{BinanceKlineProvider, CandleStore, DataError, JsonFileStore};
use tracing::{info, warn};

use kline_cli::commands::fetch::{parse_date, run_fetch, FetchConfig};
use kline_cli::commands::outliers::{detect_outliers, render_outliers, OutliersConfig};
use kline_cli::commands::patterns::{pattern_rows, render_patterns};
use kline_cli::commands::renko::{build_chart, render_renko};
use kline_cli::output::OutputFormat;

#[derive(Parser)]
#[command(name = "kline")]
#[command(about = "Candlestick pattern, outlier and Renko analysis", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 거래소 캔들 수집, 분석 후 저장 (기존 컬렉션 교체)
    Fetch {
        /// 심볼 (예: BTCUSDT)
        #[arg(short, long)]
        symbol: String,

        /// 캔들 간격 (1m, 5m, 1h, 4h, 1d ...)
        #[arg(short, long, default_value = "1h")]
        interval: String,

        /// 시작 날짜 (YYYY-MM-DD)
        #[arg(short = 'f', long)]
        from: String,

        /// 종료 날짜 (YYYY-MM-DD, 포함)
        #[arg(short, long)]
        to: String,
    },

    /// 저장된 캔들의 패턴 컬럼 출력
    Patterns {
        #[arg(short, long)]
        symbol: String,

        /// 최근 N개만 출력 (0 = 전체)
        #[arg(long, default_value = "0")]
        limit: usize,

        /// 출력 형식 (table, csv, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// 가격 컬럼의 이상치 출력
    Outliers {
        #[arg(short, long)]
        symbol: String,

        /// 탐지 방법 (zscore, iqr; 기본: 설정 파일)
        #[arg(long)]
        method: Option<String>,

        /// 임계값 (기본: 설정 파일)
        #[arg(long)]
        threshold: Option<f64>,

        /// 가격 컬럼 (open, high, low, close; 기본: 설정 파일)
        #[arg(long)]
        column: Option<String>,

        /// 출력 형식 (table, csv, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// 종가 기준 렌코 벽돌 출력
    Renko {
        #[arg(short, long)]
        symbol: String,

        /// 벽돌 크기 (생략 시 설정 파일, 그것도 없으면 자동 산출)
        #[arg(long)]
        brick_size: Option<f64>,

        /// 출력 형식 (table, csv, json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

/// 저장된 이력을 읽습니다. 컬렉션이 없으면 수집 안내와 함께 실패합니다.
async fn load_records(store: &JsonFileStore, symbol: &str) -> Result<Vec<CandleRecord>> {
    match store.load_history(symbol).await {
        Ok(records) => {
            if records.is_empty() {
                warn!(symbol, "저장된 캔들 없음");
            }
            Ok(records)
        }
        Err(DataError::NotFound(what)) => Err(anyhow::anyhow!(
            "No stored candles ({}). Run `kline fetch -s {}` first",
            what,
            symbol
        )),
        Err(e) => Err(e).context("Failed to load candle history"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let app = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load configuration: {}", cli.config))?;
    init_logging(LogConfig::from(&app.logging)).context("Failed to initialise logging")?;

    let store = JsonFileStore::new(&app.storage.data_dir);

    match cli.command {
        Commands::Fetch {
            symbol,
            interval,
            from,
            to,
        } => {
            let interval: Timeframe = interval.parse().map_err(anyhow::Error::msg)?;
            let config = FetchConfig {
                symbol,
                interval,
                start_date: parse_date(&from)?,
                end_date: parse_date(&to)?,
            };

            let provider = BinanceKlineProvider::new(app.provider.clone())?;
            let pipeline = CandlePipeline::new(app.analysis.clone());

            let count = run_fetch(&config, &provider, &store, &pipeline).await?;
            info!(count, path = %store.path().display(), "저장 완료");
            println!("\n캔들 분석 완료: {} 캔들", count);
            println!("저장 위치: {}", store.path().display());
        }

        Commands::Patterns {
            symbol,
            limit,
            format,
        } => {
            let format = OutputFormat::parse(&format)?;
            let records = load_records(&store, &symbol).await?;
            let rows = pattern_rows(&records, limit);
            println!("{}", render_patterns(&rows, format)?);
        }

        Commands::Outliers {
            symbol,
            method,
            threshold,
            column,
            format,
        } => {
            let format = OutputFormat::parse(&format)?;
            let column: PriceColumn = column
                .unwrap_or_else(|| app.outlier.column.clone())
                .parse()?;
            let config = OutliersConfig {
                method: method.unwrap_or_else(|| app.outlier.method.clone()),
                threshold: threshold.unwrap_or(app.outlier.threshold),
                column,
            };

            let records = load_records(&store, &symbol).await?;
            let report = detect_outliers(&records, &config);
            println!("{}", render_outliers(&records, &report, &config, format)?);
        }

        Commands::Renko {
            symbol,
            brick_size,
            format,
        } => {
            let format = OutputFormat::parse(&format)?;
            let records = load_records(&store, &symbol).await?;
            let chart = build_chart(&records, brick_size.or(app.renko.brick_size))?;
            println!("{}", render_renko(&chart, format)?);
        }
    }

    Ok(())
}
