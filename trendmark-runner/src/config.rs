//! Serializable labeling configuration.
//!
//! Loaded from TOML; every field has a default so a config file only needs
//! to name what differs:
//!
//! ```toml
//! [input]
//! path = "trends.csv"
//! average_column = "close_15_sma"
//!
//! [output]
//! path = "labels.csv"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Columns normalized for reporting, in output order.
pub const DEFAULT_INDICATOR_COLUMNS: [&str; 12] = [
    "macd", "rsi_14", "wr_14", "kdjk3", "kdjd3", "kdjj3", "kdjk14", "kdjd14", "kdjj14", "trix",
    "adx", "cci",
];

/// Moving-average column the classifier reads.
pub const DEFAULT_AVERAGE_COLUMN: &str = "close_15_sma";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Where labeling reads its columns from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub path: PathBuf,
    pub delimiter: String,
    pub close_column: String,
    pub average_column: String,
    pub indicator_columns: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("trends.csv"),
            delimiter: ";".into(),
            close_column: "close".into(),
            average_column: DEFAULT_AVERAGE_COLUMN.into(),
            indicator_columns: DEFAULT_INDICATOR_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Where labeled rows are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub delimiter: String,
    /// Write `<path>.manifest.json` next to the label file.
    pub write_manifest: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("labels.csv"),
            delimiter: ";".into(),
            write_manifest: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
}

impl LabelConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let input = &self.input;
        delimiter_byte(&input.delimiter)?;
        delimiter_byte(&self.output.delimiter)?;

        if input.close_column.trim().is_empty() || input.average_column.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "close_column and average_column must be non-empty".into(),
            ));
        }
        if input.close_column == input.average_column {
            return Err(ConfigError::Invalid(format!(
                "close_column and average_column are both '{}'",
                input.close_column
            )));
        }
        for column in &input.indicator_columns {
            if column.trim().is_empty() {
                return Err(ConfigError::Invalid("indicator column names must be non-empty".into()));
            }
            if *column == input.close_column || *column == input.average_column {
                return Err(ConfigError::Invalid(format!(
                    "indicator column '{column}' duplicates the close or average column"
                )));
            }
        }
        Ok(())
    }

    pub fn input_delimiter(&self) -> Result<u8, ConfigError> {
        delimiter_byte(&self.input.delimiter)
    }

    pub fn output_delimiter(&self) -> Result<u8, ConfigError> {
        delimiter_byte(&self.output.delimiter)
    }
}

/// A delimiter must be exactly one ASCII character.
pub fn delimiter_byte(delimiter: &str) -> Result<u8, ConfigError> {
    match delimiter.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(ConfigError::Invalid(format!(
            "delimiter must be a single ASCII character, got '{delimiter}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_enriched_table() {
        let config = LabelConfig::default();
        assert_eq!(config.input.close_column, "close");
        assert_eq!(config.input.average_column, "close_15_sma");
        assert_eq!(config.input.indicator_columns.len(), 12);
        assert_eq!(config.input.indicator_columns[0], "macd");
        assert_eq!(config.input_delimiter().unwrap(), b';');
        assert!(config.output.write_manifest);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(LabelConfig::from_toml("").unwrap(), LabelConfig::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = LabelConfig::from_toml(
            r#"
[input]
path = "BTC_USD_Bitstamp_day_2018-10-25.csv"
indicator_columns = ["rsi_14"]

[output]
delimiter = ","
write_manifest = false
"#,
        )
        .unwrap();
        assert_eq!(config.input.path, PathBuf::from("BTC_USD_Bitstamp_day_2018-10-25.csv"));
        assert_eq!(config.input.indicator_columns, vec!["rsi_14".to_string()]);
        assert_eq!(config.input.average_column, "close_15_sma");
        assert_eq!(config.output_delimiter().unwrap(), b',');
        assert!(!config.output.write_manifest);
    }

    #[test]
    fn rejects_multi_char_delimiter() {
        let err = LabelConfig::from_toml("[input]\ndelimiter = \";;\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_indicator_shadowing_average() {
        let err = LabelConfig::from_toml("[input]\nindicator_columns = [\"close_15_sma\"]\n")
            .unwrap_err();
        assert!(err.to_string().contains("close_15_sma"));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            LabelConfig::from_toml("[input\npath = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = LabelConfig::from_file(Path::new("/nonexistent/label.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
