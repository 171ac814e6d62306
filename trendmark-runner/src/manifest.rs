//! Run manifest export (JSON).
//!
//! Written next to the label file as `<output>.manifest.json`. The dataset
//! hash covers every input column, so two runs over identical data share it.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trendmark_core::domain::LabelInput;

use crate::pipeline::{LabelCounts, LabeledSeries, PipelineError};
use crate::provider::DataError;

/// Current schema version for persisted manifests.
pub const MANIFEST_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelManifest {
    pub schema_version: u32,
    pub input: String,
    pub output: String,
    pub row_count: usize,
    /// Normalized columns, average first.
    pub columns: Vec<String>,
    pub counts: LabelCounts,
    pub dataset_hash: String,
    pub created_at: DateTime<Utc>,
}

impl LabelManifest {
    pub fn new(
        input_path: &Path,
        output_path: &Path,
        input: &LabelInput,
        series: &LabeledSeries,
    ) -> Self {
        Self {
            schema_version: MANIFEST_SCHEMA_VERSION,
            input: input_path.display().to_string(),
            output: output_path.display().to_string(),
            row_count: series.len(),
            columns: series.columns().to_vec(),
            counts: series.counts(),
            dataset_hash: dataset_hash(input),
            created_at: Utc::now(),
        }
    }
}

/// BLAKE3 over close, the average and every indicator column, in input order.
pub fn dataset_hash(input: &LabelInput) -> String {
    let mut hasher = blake3::Hasher::new();

    hasher.update(b"close");
    for v in input.close() {
        hasher.update(&v.to_le_bytes());
    }
    for series in std::iter::once(input.average()).chain(input.indicators()) {
        hasher.update(series.name.as_bytes());
        for v in &series.values {
            hasher.update(&v.to_le_bytes());
        }
    }

    hasher.finalize().to_hex().to_string()
}

/// `labels.csv` → `labels.csv.manifest.json`
pub fn manifest_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_os_string();
    name.push(".manifest.json");
    PathBuf::from(name)
}

/// Serialize a manifest to pretty JSON.
pub fn manifest_json(manifest: &LabelManifest) -> Result<String, PipelineError> {
    serde_json::to_string_pretty(manifest)
        .map_err(|e| PipelineError::Manifest(format!("failed to serialize manifest: {e}")))
}

pub(crate) fn write_manifest_json(path: &Path, json: &str) -> Result<(), PipelineError> {
    std::fs::write(path, json).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Load a manifest, rejecting unknown schema versions.
pub fn read_manifest(path: &Path) -> Result<LabelManifest, PipelineError> {
    let json = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest: LabelManifest = serde_json::from_str(&json)
        .map_err(|e| PipelineError::Manifest(format!("failed to parse manifest: {e}")))?;
    if manifest.schema_version > MANIFEST_SCHEMA_VERSION {
        return Err(PipelineError::Manifest(format!(
            "unsupported schema version {} (max supported: {})",
            manifest.schema_version, MANIFEST_SCHEMA_VERSION
        )));
    }
    Ok(manifest)
}
