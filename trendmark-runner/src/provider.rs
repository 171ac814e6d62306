//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over candle sources so the CLI can swap
//! implementations and tests can run without the network.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use trendmark_core::domain::Candle;

/// Structured error types for download and tabular I/O.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("provider rejected request: {0}")]
    Rejected(String),

    #[error("no datapoints returned for {pair}")]
    NoData { pair: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("column '{column}' not found in {table}")]
    MissingColumn { column: String, table: String },

    #[error("row {row}, column '{column}': cannot parse '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("data error: {0}")]
    Other(String),
}

/// Candle granularity supported by the histo endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Minute,
    Hour,
    Day,
}

impl Interval {
    pub fn as_str(self) -> &'static str {
        match self {
            Interval::Minute => "minute",
            Interval::Hour => "hour",
            Interval::Day => "day",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minute" => Ok(Interval::Minute),
            "hour" => Ok(Interval::Hour),
            "day" => Ok(Interval::Day),
            other => Err(format!(
                "unsupported interval '{other}', expected one of: minute, hour, day"
            )),
        }
    }
}

/// One download: a currency pair on an exchange at a given granularity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoRequest {
    pub from_symbol: String,
    pub to_symbol: String,
    pub exchange: String,
    pub interval: Interval,
    /// Maximum datapoints requested.
    pub limit: u32,
}

impl Default for HistoRequest {
    fn default() -> Self {
        Self {
            from_symbol: "BTC".into(),
            to_symbol: "USD".into(),
            exchange: "Bitstamp".into(),
            interval: Interval::Day,
            limit: 2000,
        }
    }
}

impl HistoRequest {
    /// e.g. `BTC/USD@Bitstamp`
    pub fn pair(&self) -> String {
        format!("{}/{}@{}", self.from_symbol, self.to_symbol, self.exchange)
    }
}

/// Trait for candle providers.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the candle history described by `request`, oldest first.
    fn fetch(&self, request: &HistoRequest) -> Result<Vec<Candle>, DataError>;
}

/// `{from}_{to}_{exchange}_{interval}_{YYYY-MM-DD}.csv`
pub fn dataset_filename(request: &HistoRequest, download_date: NaiveDate) -> String {
    format!(
        "{}_{}_{}_{}_{}.csv",
        request.from_symbol,
        request.to_symbol,
        request.exchange,
        request.interval,
        download_date.format("%Y-%m-%d")
    )
}

/// Drop candles whose numeric fields are all zero.
///
/// Providers pad the start of a history with such rows for periods before the
/// pair was listed on the exchange.
pub fn filter_empty_datapoints(candles: Vec<Candle>) -> Vec<Candle> {
    let before = candles.len();
    let kept: Vec<Candle> = candles.into_iter().filter(|c| !c.is_empty()).collect();
    info!(filtered = before - kept.len(), kept = kept.len(), "filtering empty datapoints");
    kept
}
