//! Binance REST 캔들 Provider.
//!
//! `GET /api/v3/klines`를 페이지 단위로 반복 호출합니다. 각 페이지는 직전
//! 페이지 마지막 행의 `open_time + 1`부터 시작하며, 페이지가 `page_limit`보다
//! 짧거나 종료 시간을 넘으면 멈춥니다. 페이지 사이에는 `request_delay_ms`만큼
//! 대기합니다.

use std::time::Duration;

use async_trait::async_trait;
use kline_core::{ProviderConfig, RawKline};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, error, instrument, warn};

use super::{KlineProvider, KlineRequest};
use crate::error::{DataError, DataResult};

const KLINES_ENDPOINT: &str = "/api/v3/klines";

#[derive(Debug, Deserialize)]
struct BinanceError {
    code: i32,
    msg: String,
}

/// Binance 캔들 Provider.
pub struct BinanceKlineProvider {
    config: ProviderConfig,
    client: Client,
}

impl BinanceKlineProvider {
    /// 새 Provider 생성.
    ///
    /// # Errors
    /// HTTP 클라이언트 생성에 실패하면 `DataError::Network`를 반환합니다.
    pub fn new(config: ProviderConfig) -> DataResult<Self> {
        if config.page_limit == 0 {
            return Err(DataError::InvalidData("page_limit must be > 0".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DataError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn build_query(params: &[(&str, String)]) -> String {
        params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// 공개 API 요청 (인증 불필요).
    async fn public_get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> DataResult<T> {
        let base = self.config.base_url.trim_end_matches('/');
        let full_url = format!("{}{}?{}", base, endpoint, Self::build_query(params));

        debug!("GET {}", full_url);

        let response = self.client.get(&full_url).send().await?;
        Self::handle_response(response).await
    }

    /// API 응답 처리.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> DataResult<T> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| {
                error!("Failed to parse response: {} - Body: {}", e, body);
                DataError::Parse(e.to_string())
            });
        }

        // 418은 한도 초과 후 IP 차단
        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::IM_A_TEAPOT {
            return Err(DataError::RateLimited);
        }

        match serde_json::from_str::<BinanceError>(&body) {
            Ok(err) => Err(Self::map_error_code(err.code, &err.msg)),
            Err(_) => Err(DataError::Api {
                code: i32::from(status.as_u16()),
                message: body,
            }),
        }
    }

    /// Binance 에러 코드를 DataError로 매핑.
    fn map_error_code(code: i32, msg: &str) -> DataError {
        match code {
            -1003 => DataError::RateLimited,
            -1001 => DataError::Network(msg.to_string()),
            -1121 => DataError::NotFound(msg.to_string()),
            -1100 | -1102 | -1120 | -1130 => DataError::InvalidData(msg.to_string()),
            _ => DataError::Api {
                code,
                message: msg.to_string(),
            },
        }
    }

    /// 한 페이지를 조회합니다. 재시도 가능한 오류는 선형 백오프로 재시도합니다.
    async fn fetch_page(&self, request: &KlineRequest, start_time: i64) -> DataResult<Vec<RawKline>> {
        let params = [
            ("symbol", request.symbol.to_uppercase()),
            ("interval", request.interval.as_str().to_string()),
            ("startTime", start_time.to_string()),
            ("endTime", request.end_time_ms.to_string()),
            ("limit", self.config.page_limit.to_string()),
        ];

        let mut attempt = 0;
        loop {
            match self.public_get::<Vec<RawKline>>(KLINES_ENDPOINT, &params).await {
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let backoff = self.config.request_delay_ms * u64::from(attempt);
                    warn!(
                        symbol = %request.symbol,
                        attempt,
                        backoff_ms = backoff,
                        error = %e,
                        "요청 실패, 재시도 대기"
                    );
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                }
                result => return result,
            }
        }
    }
}

/// 행의 시작 시간. 필드가 부족하거나 시작 시간이 정수가 아니면 파싱 오류.
fn row_open_time(row: &RawKline) -> DataResult<i64> {
    if row.len() < RawKline::FIELD_COUNT {
        return Err(DataError::Parse(format!(
            "kline row has {} fields, expected at least {}",
            row.len(),
            RawKline::FIELD_COUNT
        )));
    }
    row.open_time()
        .ok_or_else(|| DataError::Parse("kline row without integer open_time".to_string()))
}

#[async_trait]
impl KlineProvider for BinanceKlineProvider {
    fn name(&self) -> &str {
        "Binance"
    }

    #[instrument(skip(self, request), fields(symbol = %request.symbol, interval = %request.interval))]
    async fn fetch_klines(&self, request: &KlineRequest) -> DataResult<Vec<RawKline>> {
        request.validate()?;

        let page_limit = self.config.page_limit as usize;
        let mut rows: Vec<RawKline> = Vec::new();
        let mut start_time = request.start_time_ms;

        let expected = request
            .interval
            .candles_between(request.start_time_ms, request.end_time_ms);
        debug!(expected, page_limit, "캔들 조회 시작");

        loop {
            let page = self.fetch_page(request, start_time).await?;
            let count = page.len();

            let Some(last) = page.last() else {
                break;
            };
            let last_open = row_open_time(last)?;
            for row in &page {
                row_open_time(row)?;
            }

            debug!(start_time, count, last_open, "캔들 페이지 수신");
            rows.extend(page);

            if count < page_limit || last_open >= request.end_time_ms || last_open < start_time {
                break;
            }

            start_time = last_open + 1;
            tokio::time::sleep(Duration::from_millis(self.config.request_delay_ms)).await;
        }

        debug!(total = rows.len(), "캔들 조회 완료");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kline_core::Timeframe;
    use mockito::Matcher;

    fn provider(base_url: String, page_limit: u32, max_retries: u32) -> BinanceKlineProvider {
        BinanceKlineProvider::new(ProviderConfig {
            base_url,
            page_limit,
            request_delay_ms: 0,
            max_retries,
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn exchange_row(open_time: i64) -> serde_json::Value {
        serde_json::json!([
            open_time,
            "100.0",
            "110.0",
            "95.0",
            "105.0",
            "12.5",
            open_time + 59_999,
            "1312.5",
            42,
            "6.0",
            "630.0",
            "0"
        ])
    }

    fn request(start: i64, end: i64) -> KlineRequest {
        KlineRequest::new("btcusdt", Timeframe::Min1, start, end)
    }

    #[tokio::test]
    async fn test_paginates_from_last_open_time() {
        let mut server = mockito::Server::new_async().await;

        let first = server
            .mock("GET", KLINES_ENDPOINT)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("symbol".into(), "BTCUSDT".into()),
                Matcher::UrlEncoded("interval".into(), "1m".into()),
                Matcher::UrlEncoded("startTime".into(), "0".into()),
                Matcher::UrlEncoded("limit".into(), "2".into()),
            ]))
            .with_status(200)
            .with_body(serde_json::json!([exchange_row(0), exchange_row(60_000)]).to_string())
            .expect(1)
            .create_async()
            .await;

        let second = server
            .mock("GET", KLINES_ENDPOINT)
            .match_query(Matcher::UrlEncoded("startTime".into(), "60001".into()))
            .with_status(200)
            .with_body(serde_json::json!([exchange_row(120_000)]).to_string())
            .expect(1)
            .create_async()
            .await;

        let rows = provider(server.url(), 2, 0)
            .fetch_klines(&request(0, 600_000))
            .await
            .unwrap();

        first.assert_async().await;
        second.assert_async().await;
        let times: Vec<i64> = rows.iter().filter_map(RawKline::open_time).collect();
        assert_eq!(times, vec![0, 60_000, 120_000]);
        assert_eq!(rows[0].len(), 12);
    }

    #[tokio::test]
    async fn test_stops_at_end_time() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", KLINES_ENDPOINT)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(serde_json::json!([exchange_row(0), exchange_row(60_000)]).to_string())
            .expect(1)
            .create_async()
            .await;

        let rows = provider(server.url(), 2, 0)
            .fetch_klines(&request(0, 60_000))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_result_is_ok() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", KLINES_ENDPOINT)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let rows = provider(server.url(), 1000, 0)
            .fetch_klines(&request(0, 60_000))
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_rate_limit_retried_then_surfaced() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", KLINES_ENDPOINT)
            .match_query(Matcher::Any)
            .with_status(429)
            .with_body(r#"{"code":-1003,"msg":"Too many requests."}"#)
            .expect(3)
            .create_async()
            .await;

        let result = provider(server.url(), 1000, 2)
            .fetch_klines(&request(0, 60_000))
            .await;

        mock.assert_async().await;
        assert!(matches!(result, Err(DataError::RateLimited)));
    }

    #[tokio::test]
    async fn test_error_code_mapping() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", KLINES_ENDPOINT)
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"code":-1121,"msg":"Invalid symbol."}"#)
            .expect(1)
            .create_async()
            .await;

        let result = provider(server.url(), 1000, 3)
            .fetch_klines(&request(0, 60_000))
            .await;

        mock.assert_async().await;
        assert!(matches!(result, Err(DataError::NotFound(msg)) if msg == "Invalid symbol."));
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", KLINES_ENDPOINT)
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("Service Unavailable")
            .create_async()
            .await;

        let result = provider(server.url(), 1000, 0)
            .fetch_klines(&request(0, 60_000))
            .await;
        assert!(matches!(result, Err(DataError::Api { code: 503, .. })));
    }

    #[tokio::test]
    async fn test_short_row_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", KLINES_ENDPOINT)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[[0, \"1.0\", \"2.0\"]]")
            .create_async()
            .await;

        let result = provider(server.url(), 1000, 0)
            .fetch_klines(&request(0, 60_000))
            .await;
        assert!(matches!(result, Err(DataError::Parse(_))));
    }

    #[test]
    fn test_zero_page_limit_rejected() {
        let config = ProviderConfig {
            page_limit: 0,
            ..ProviderConfig::default()
        };
        assert!(matches!(
            BinanceKlineProvider::new(config),
            Err(DataError::InvalidData(_))
        ));
    }
}
