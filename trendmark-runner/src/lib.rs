//! TrendMark Runner — data download, tabular I/O, enrichment, labeling runs.
//!
//! This crate builds on `trendmark-core` to provide:
//! - Labeling configuration loaded from TOML
//! - CryptoCompare candle download with retry and empty-datapoint filtering
//! - Delimited-text readers and writers for candle, enriched and label files
//! - Indicator enrichment of candle histories
//! - The labeling pipeline and its JSON run manifest

pub mod config;
pub mod cryptocompare;
pub mod download;
pub mod enrich;
pub mod manifest;
pub mod pipeline;
pub mod provider;
pub mod table;

pub use config::{ConfigError, InputConfig, LabelConfig, OutputConfig};
pub use cryptocompare::{parse_histo_response, CryptoCompareProvider};
pub use download::{download_to_file, DownloadSummary};
pub use enrich::{default_indicators, enrich, enrich_with, EnrichedTable};
pub use manifest::{dataset_hash, manifest_json, manifest_path, read_manifest, LabelManifest};
pub use pipeline::{
    label_candles, label_file, run_labeling, LabelCounts, LabelReport, LabeledRow, LabeledSeries,
    PipelineError,
};
pub use provider::{
    dataset_filename, filter_empty_datapoints, DataError, DataProvider, HistoRequest, Interval,
};
pub use table::{read_candles, read_column, write_candles, write_enriched, write_labels, Table};
