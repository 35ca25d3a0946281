//! 저장소 교체/조회 통합 테스트.

use chrono::{TimeZone, Utc};
use kline_core::{CandlePatternType, CandleRecord};
use kline_data::{CandleStore, DataError, JsonFileStore, MemoryCandleStore};

fn record(symbol: &str, minute: i64, close: f64) -> CandleRecord {
    let open_time = 1_700_000_000_000 + minute * 60_000;
    CandleRecord {
        symbol: symbol.to_string(),
        interval: "1m".to_string(),
        open_time,
        close_time: open_time + 59_999,
        open: 100.0,
        high: 110.0,
        low: 90.0,
        close,
        volume: 1.0,
        is_bullish: close > 100.0,
        body_top: close.max(100.0),
        body_bottom: close.min(100.0),
        upper_wick_pct: 25.0,
        lower_wick_pct: 25.0,
        date: Utc
            .timestamp_millis_opt(open_time + 59_999)
            .single()
            .unwrap_or_default(),
        candle_type: Some(CandlePatternType::SpinningTop),
        type_two: None,
        type_three: None,
        moving_average: 0.0,
        is_crossed: true,
        is_high_formed_first: false,
        high_time: 0,
        low_time: 0,
    }
}

#[tokio::test]
async fn test_json_store_replaces_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());

    let first = vec![record("BTCUSDT", 0, 105.0), record("BTCUSDT", 1, 106.0)];
    assert_eq!(store.replace_all(&first).await.unwrap(), 2);

    let second = vec![record("BTCUSDT", 5, 95.0)];
    store.replace_all(&second).await.unwrap();

    let loaded = store.load_history("BTCUSDT").await.unwrap();
    assert_eq!(loaded, second);
}

#[tokio::test]
async fn test_json_store_orders_and_filters() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("nested")).with_collection("klines");

    let records = vec![
        record("BTCUSDT", 2, 103.0),
        record("ETHUSDT", 0, 101.0),
        record("BTCUSDT", 0, 101.0),
    ];
    store.replace_all(&records).await.unwrap();
    assert!(store.path().ends_with("klines.json"));

    let loaded = store.load_history("btcusdt").await.unwrap();
    let minutes: Vec<i64> = loaded
        .iter()
        .map(|r| (r.open_time - 1_700_000_000_000) / 60_000)
        .collect();
    assert_eq!(minutes, vec![0, 2]);
}

#[tokio::test]
async fn test_json_store_writes_flat_records() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    store.replace_all(&[record("BTCUSDT", 0, 105.0)]).await.unwrap();

    let body = std::fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    let row = &value[0];
    assert_eq!(row["type"], "Spinning Top");
    assert_eq!(row["type_two"], "-");
    assert_eq!(row["is_high_formed_first"], false);
}

#[tokio::test]
async fn test_json_store_missing_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    let result = store.load_history("BTCUSDT").await;
    assert!(matches!(result, Err(DataError::NotFound(_))));
}

#[tokio::test]
async fn test_memory_store_replace_semantics() {
    let store = MemoryCandleStore::new();
    store
        .replace_all(&[record("BTCUSDT", 1, 102.0), record("BTCUSDT", 0, 101.0)])
        .await
        .unwrap();
    assert_eq!(store.len().await, 2);

    let loaded = store.load_history("BTCUSDT").await.unwrap();
    assert_eq!(loaded[0].open_time, 1_700_000_000_000);

    store.replace_all(&[]).await.unwrap();
    assert!(store.is_empty().await);
    assert!(store.load_history("BTCUSDT").await.unwrap().is_empty());
}
