//! CryptoCompare data provider.
//!
//! Fetches OHLCV candles from the public `histominute` / `histohour` /
//! `histoday` endpoints. Retries connection failures, timeouts, rate limits
//! and server errors with exponential backoff.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};
use trendmark_core::domain::Candle;

use crate::provider::{DataError, DataProvider, HistoRequest};

const BASE_URL: &str = "https://min-api.cryptocompare.com/data/histo";

/// Histo endpoint response.
///
/// `Data` is an array on success but an empty object on error payloads, so it
/// is only typed once `Response` has been checked.
#[derive(Debug, Deserialize)]
struct HistoResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Message", default)]
    message: String,
    #[serde(rename = "Data", default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct HistoPoint {
    time: i64,
    low: f64,
    high: f64,
    open: f64,
    close: f64,
    volumefrom: f64,
    volumeto: f64,
}

/// Parse a histo response body into candles, oldest first.
///
/// `"Response": "Error"` payloads become `DataError::Rejected` carrying the
/// provider's message.
pub fn parse_histo_response(body: &str) -> Result<Vec<Candle>, DataError> {
    let resp: HistoResponse = serde_json::from_str(body)
        .map_err(|e| DataError::ResponseFormatChanged(format!("invalid histo payload: {e}")))?;

    if resp.response == "Error" {
        return Err(DataError::Rejected(resp.message));
    }

    let points: Vec<HistoPoint> = if resp.data.is_null() {
        Vec::new()
    } else {
        serde_json::from_value(resp.data)
            .map_err(|e| DataError::ResponseFormatChanged(format!("invalid histo data: {e}")))?
    };

    let mut candles = points
        .into_iter()
        .map(|p| {
            let datetime = chrono::DateTime::from_timestamp(p.time, 0)
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {}", p.time))
                })?;
            Ok(Candle {
                datetime,
                low: p.low,
                high: p.high,
                open: p.open,
                close: p.close,
                volume_from: p.volumefrom,
                volume_to: p.volumeto,
            })
        })
        .collect::<Result<Vec<_>, DataError>>()?;

    candles.sort_by_key(|c| c.datetime);
    Ok(candles)
}

pub struct CryptoCompareProvider {
    client: reqwest::blocking::Client,
    max_retries: u32,
    base_delay: Duration,
}

impl CryptoCompareProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("trendmark/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }

    /// Histo endpoint URL for a request.
    pub fn histo_url(request: &HistoRequest) -> String {
        format!(
            "{BASE_URL}{}?fsym={}&tsym={}&limit={}&aggregate=1&e={}",
            request.interval,
            request.from_symbol,
            request.to_symbol,
            request.limit,
            request.exchange
        )
    }

    fn fetch_with_retry(&self, request: &HistoRequest) -> Result<Vec<Candle>, DataError> {
        let url = Self::histo_url(request);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                warn!(attempt, delay_ms = delay.as_millis() as u64, "retrying histo request");
                std::thread::sleep(delay);
            }

            debug!(%url, attempt, "requesting histo data");
            match self.client.get(&url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(DataError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if status.is_server_error() {
                        last_error = Some(DataError::Other(format!(
                            "HTTP {status} for {}",
                            request.pair()
                        )));
                        continue;
                    }

                    if !status.is_success() {
                        return Err(DataError::Other(format!("HTTP {status} for {}", request.pair())));
                    }

                    let body = resp.text().map_err(|e| {
                        DataError::ResponseFormatChanged(format!(
                            "failed to read response for {}: {e}",
                            request.pair()
                        ))
                    })?;
                    return parse_histo_response(&body);
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(DataError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}

impl Default for CryptoCompareProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DataProvider for CryptoCompareProvider {
    fn name(&self) -> &str {
        "cryptocompare"
    }

    fn fetch(&self, request: &HistoRequest) -> Result<Vec<Candle>, DataError> {
        info!(
            interval = %request.interval,
            pair = %request.pair(),
            "downloading trading data"
        );
        let candles = self.fetch_with_retry(request)?;
        if candles.is_empty() {
            return Err(DataError::NoData {
                pair: request.pair(),
            });
        }
        Ok(candles)
    }
}
