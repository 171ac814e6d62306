//! Labeling pipeline — wires tabular input, the core engine and the outputs.
//!
//! Entry points:
//! - `run_labeling()`: pure; validated input in, labeled rows out.
//! - `label_file()`: config-driven; reads the enriched file, writes labels and manifest.
//! - `label_candles()`: enriches raw candles in memory, then labels them.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use trendmark_core::domain::{Candle, LabelInput, NamedSeries, TrendLabel};
use trendmark_core::labeling::{classify_trends, normalize, trading_signals};
use trendmark_core::LabelError;

use crate::config::{
    delimiter_byte, ConfigError, LabelConfig, OutputConfig, DEFAULT_AVERAGE_COLUMN,
    DEFAULT_INDICATOR_COLUMNS,
};
use crate::enrich::enrich;
use crate::manifest::{manifest_json, manifest_path, write_manifest_json, LabelManifest};
use crate::provider::DataError;
use crate::table::{read_input_columns, write_labels};

/// Errors from a labeling run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("labeling error: {0}")]
    Label(#[from] LabelError),
    #[error("manifest error: {0}")]
    Manifest(String),
}

/// One output row.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRow {
    /// 1-based sequence number.
    pub n: usize,
    pub close: f64,
    /// Normalized average followed by the normalized indicators.
    pub normalized: Vec<f64>,
    pub trend: TrendLabel,
    pub signal: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub up: usize,
    pub down: usize,
    pub no: usize,
}

impl LabelCounts {
    pub fn total(&self) -> usize {
        self.up + self.down + self.no
    }
}

/// Labeled rows in index order, with the names of the normalized columns.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSeries {
    columns: Vec<String>,
    rows: Vec<LabeledRow>,
}

impl LabeledSeries {
    /// Names of the normalized columns, average first.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[LabeledRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `n`, `close`, the normalized columns, `trend`, `signal`.
    pub fn header(&self) -> Vec<String> {
        let mut header = Vec::with_capacity(self.columns.len() + 4);
        header.push("n".to_string());
        header.push("close".to_string());
        header.extend(self.columns.iter().cloned());
        header.push("trend".to_string());
        header.push("signal".to_string());
        header
    }

    pub fn counts(&self) -> LabelCounts {
        self.rows.iter().fold(LabelCounts::default(), |mut acc, row| {
            match row.trend {
                TrendLabel::Up => acc.up += 1,
                TrendLabel::Down => acc.down += 1,
                TrendLabel::Flat => acc.no += 1,
            }
            acc
        })
    }
}

/// Label every index of a validated input.
///
/// The average and each indicator are normalized independently (in parallel);
/// only close and the average feed the classifier and the signal.
pub fn run_labeling(input: &LabelInput) -> Result<LabeledSeries, LabelError> {
    let close = input.close();
    let labels = classify_trends(close, &input.average().values)?;
    let signals = trading_signals(close, &labels)?;

    let sources: Vec<&NamedSeries> = std::iter::once(input.average())
        .chain(input.indicators())
        .collect();
    let normalized: Vec<Vec<f64>> = sources.par_iter().map(|s| normalize(&s.values)).collect();

    let rows = (0..input.len())
        .map(|i| LabeledRow {
            n: i + 1,
            close: close[i],
            normalized: normalized.iter().map(|column| column[i]).collect(),
            trend: labels[i],
            signal: signals[i],
        })
        .collect();

    Ok(LabeledSeries {
        columns: sources.iter().map(|s| s.name.clone()).collect(),
        rows,
    })
}

/// Summary of a labeling run that wrote files.
#[derive(Debug, Clone)]
pub struct LabelReport {
    pub output: PathBuf,
    pub manifest: Option<PathBuf>,
    pub rows: usize,
    pub counts: LabelCounts,
    pub dataset_hash: String,
}

/// Read the configured input file, label it, and write the outputs.
pub fn label_file(config: &LabelConfig) -> Result<LabelReport, PipelineError> {
    config.validate()?;
    let columns = read_input_columns(&config.input, config.input_delimiter()?)?;
    let input = LabelInput::new(columns.close, columns.average, columns.indicators)?;
    write_outputs(&config.input.path, &input, &config.output)
}

/// Enrich raw candles in memory and label them with the default columns.
pub fn label_candles(
    candles: Vec<Candle>,
    source: &Path,
    output: &OutputConfig,
) -> Result<LabelReport, PipelineError> {
    let table = enrich(candles);
    let indicators: Vec<String> = DEFAULT_INDICATOR_COLUMNS.iter().map(|c| c.to_string()).collect();
    let input = table.to_label_input(DEFAULT_AVERAGE_COLUMN, &indicators)?;
    write_outputs(source, &input, output)
}

fn write_outputs(
    source: &Path,
    input: &LabelInput,
    output: &OutputConfig,
) -> Result<LabelReport, PipelineError> {
    let delimiter = delimiter_byte(&output.delimiter)?;
    let series = run_labeling(input)?;
    let counts = series.counts();
    info!(
        rows = series.len(),
        up = counts.up,
        down = counts.down,
        no = counts.no,
        "labeled series"
    );

    let manifest = LabelManifest::new(source, &output.path, input, &series);
    let dataset_hash = manifest.dataset_hash.clone();
    let manifest_body = if output.write_manifest {
        Some(manifest_json(&manifest)?)
    } else {
        None
    };

    write_labels(&output.path, delimiter, &series)?;

    // A label file is never left behind without its manifest.
    let manifest_file = match manifest_body {
        Some(json) => {
            let path = manifest_path(&output.path);
            if let Err(e) = write_manifest_json(&path, &json) {
                warn!(output = %output.path.display(), "manifest write failed, removing label file");
                let _ = std::fs::remove_file(&output.path);
                return Err(e);
            }
            Some(path)
        }
        None => None,
    };

    Ok(LabelReport {
        output: output.path.clone(),
        manifest: manifest_file,
        rows: series.len(),
        counts,
        dataset_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(close: Vec<f64>, average: Vec<f64>, indicators: Vec<NamedSeries>) -> LabelInput {
        LabelInput::new(close, NamedSeries::new("close_15_sma", average), indicators).unwrap()
    }

    #[test]
    fn flat_series_labels_no_and_zero_signal() {
        let series = run_labeling(&input(vec![10.0; 6], vec![10.0; 6], vec![])).unwrap();
        assert_eq!(series.len(), 6);
        for (i, row) in series.rows().iter().enumerate() {
            assert_eq!(row.n, i + 1);
            assert_eq!(row.trend, TrendLabel::Flat);
            assert_eq!(row.signal, 0.0);
            assert_eq!(row.normalized, vec![0.0]);
        }
        assert_eq!(series.counts(), LabelCounts { up: 0, down: 0, no: 6 });
    }

    #[test]
    fn header_lists_columns_in_order() {
        let series = run_labeling(&input(
            vec![1.0; 5],
            vec![1.0; 5],
            vec![
                NamedSeries::new("macd", vec![0.0; 5]),
                NamedSeries::new("rsi_14", vec![50.0; 5]),
            ],
        ))
        .unwrap();
        assert_eq!(
            series.header(),
            vec!["n", "close", "close_15_sma", "macd", "rsi_14", "trend", "signal"]
        );
        assert_eq!(series.columns(), &["close_15_sma", "macd", "rsi_14"]);
    }

    #[test]
    fn indicators_are_normalized_independently() {
        let rsi = vec![30.0, 70.0, 50.0, 40.0, 60.0];
        let series = run_labeling(&input(
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![NamedSeries::new("rsi_14", rsi.clone())],
        ))
        .unwrap();
        let expected = normalize(&rsi);
        for (row, exp) in series.rows().iter().zip(&expected) {
            assert_eq!(row.normalized[1], *exp);
        }
        // Window [30, 70, 50] → 0, window [70, 50, 40] → 1
        assert_eq!(series.rows()[0].normalized[1], 0.0);
        assert_eq!(series.rows()[1].normalized[1], 1.0);
    }

    #[test]
    fn up_rows_carry_high_signal() {
        let average: Vec<f64> = (0..10).map(|i| 10.0 + i as f64).collect();
        let close: Vec<f64> = average.iter().map(|a| a + 0.5).collect();
        let series = run_labeling(&input(close, average, vec![])).unwrap();
        assert_eq!(series.counts().up, 10);
        assert!(series.rows().iter().all(|r| r.signal >= 0.5));
    }

    #[test]
    fn label_counts_total() {
        let counts = LabelCounts { up: 2, down: 3, no: 4 };
        assert_eq!(counts.total(), 9);
    }
}
