//! Delimited-text I/O for candle, enriched and label files.
//!
//! All files carry a header row. Missing numeric values (indicator warmup)
//! are written as empty fields and read back as NaN.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::info;
use trendmark_core::domain::{Candle, NamedSeries};

use crate::config::InputConfig;
use crate::enrich::EnrichedTable;
use crate::pipeline::LabeledSeries;
use crate::provider::DataError;

/// Candle timestamps, UTC.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const CANDLE_HEADER: [&str; 7] = [
    "datetime",
    "low",
    "high",
    "open",
    "close",
    "volumefrom",
    "volumeto",
];

/// On-disk candle row.
#[derive(Debug, Deserialize)]
struct CandleRecord {
    datetime: String,
    low: f64,
    high: f64,
    open: f64,
    close: f64,
    volumefrom: f64,
    volumeto: f64,
}

fn candle_fields(c: &Candle) -> Vec<String> {
    vec![
        c.datetime.format(DATETIME_FORMAT).to_string(),
        format_value(c.low),
        format_value(c.high),
        format_value(c.open),
        format_value(c.close),
        format_value(c.volume_from),
        format_value(c.volume_to),
    ]
}

impl CandleRecord {
    fn into_candle(self, row: usize) -> Result<Candle, DataError> {
        let datetime = NaiveDateTime::parse_from_str(&self.datetime, DATETIME_FORMAT).map_err(|_| {
            DataError::InvalidValue {
                row,
                column: "datetime".into(),
                value: self.datetime.clone(),
            }
        })?;
        Ok(Candle {
            datetime,
            low: self.low,
            high: self.high,
            open: self.open,
            close: self.close,
            volume_from: self.volumefrom,
            volume_to: self.volumeto,
        })
    }
}

fn open(path: &Path) -> Result<File, DataError> {
    File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn create(path: &Path) -> Result<File, DataError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| DataError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    File::create(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn reader(path: &Path, delimiter: u8) -> Result<csv::Reader<File>, DataError> {
    Ok(csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(open(path)?))
}

fn writer(path: &Path, delimiter: u8) -> Result<csv::Writer<File>, DataError> {
    Ok(csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(create(path)?))
}

/// Empty for NaN, shortest round-trip representation otherwise.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

/// Inverse of `format_value`; also accepts `nan` spellings.
pub fn parse_value(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    raw.parse().ok()
}

/// Read a candle file and sort it by datetime.
pub fn read_candles(path: &Path, delimiter: u8) -> Result<Vec<Candle>, DataError> {
    info!(path = %path.display(), "reading candles");
    let mut rdr = reader(path, delimiter)?;
    let mut candles = rdr
        .deserialize::<CandleRecord>()
        .enumerate()
        .map(|(i, record)| record?.into_candle(i + 1))
        .collect::<Result<Vec<_>, DataError>>()?;
    candles.sort_by_key(|c| c.datetime);
    info!(rows = candles.len(), "read candles");
    Ok(candles)
}

pub fn write_candles(path: &Path, delimiter: u8, candles: &[Candle]) -> Result<(), DataError> {
    let mut wtr = writer(path, delimiter)?;
    wtr.write_record(CANDLE_HEADER)?;
    for candle in candles {
        wtr.write_record(candle_fields(candle))?;
    }
    wtr.flush().map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = candles.len(), "saved candles");
    Ok(())
}

/// Candle columns followed by every computed indicator column.
pub fn write_enriched(path: &Path, delimiter: u8, table: &EnrichedTable) -> Result<(), DataError> {
    let mut wtr = writer(path, delimiter)?;

    let header: Vec<&str> = CANDLE_HEADER
        .iter()
        .copied()
        .chain(table.columns().iter().map(|c| c.name.as_str()))
        .collect();
    wtr.write_record(&header)?;

    for (i, candle) in table.candles().iter().enumerate() {
        let mut record = candle_fields(candle);
        record.extend(table.columns().iter().map(|c| format_value(c.values[i])));
        wtr.write_record(&record)?;
    }
    wtr.flush().map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = table.len(), "saved enriched table");
    Ok(())
}

/// Label file: `n;close;<average>;<indicators…>;trend;signal`, `n` 1-based.
pub fn write_labels(path: &Path, delimiter: u8, series: &LabeledSeries) -> Result<(), DataError> {
    let mut wtr = writer(path, delimiter)?;
    wtr.write_record(series.header())?;

    for row in series.rows() {
        let mut record = Vec::with_capacity(row.normalized.len() + 4);
        record.push(row.n.to_string());
        record.push(format_value(row.close));
        record.extend(row.normalized.iter().map(|&v| format_value(v)));
        record.push(row.trend.as_token().to_string());
        record.push(format_value(row.signal));
        wtr.write_record(&record)?;
    }
    wtr.flush().map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = series.len(), "saved labels");
    Ok(())
}

/// A delimited file held as raw strings, with columns looked up by header name.
#[derive(Debug, Clone)]
pub struct Table {
    source: String,
    headers: Vec<String>,
    rows: Vec<csv::StringRecord>,
}

impl Table {
    pub fn read(path: &Path, delimiter: u8) -> Result<Self, DataError> {
        let mut rdr = reader(path, delimiter)?;
        let headers = rdr.headers()?.iter().map(str::to_string).collect();
        let rows = rdr.records().collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            source: path.display().to_string(),
            headers,
            rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn index_of(&self, name: &str) -> Result<usize, DataError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataError::MissingColumn {
                column: name.to_string(),
                table: self.source.clone(),
            })
    }

    /// Raw values of one column.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, DataError> {
        let idx = self.index_of(name)?;
        Ok(self.rows.iter().map(|r| r.get(idx).unwrap_or("")).collect())
    }

    /// One column parsed as floats (empty fields become NaN).
    pub fn numeric_column(&self, name: &str) -> Result<NamedSeries, DataError> {
        let values = self
            .column(name)?
            .into_iter()
            .enumerate()
            .map(|(i, raw)| {
                parse_value(raw).ok_or_else(|| DataError::InvalidValue {
                    row: i + 1,
                    column: name.to_string(),
                    value: raw.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(NamedSeries::new(name, values))
    }
}

/// Read a single named column from a delimited file.
pub fn read_column(path: &Path, delimiter: u8, name: &str) -> Result<Vec<String>, DataError> {
    let table = Table::read(path, delimiter)?;
    Ok(table.column(name)?.into_iter().map(str::to_string).collect())
}

/// Columns the labeling run needs, looked up once by name.
pub struct InputColumns {
    pub close: Vec<f64>,
    pub average: NamedSeries,
    pub indicators: Vec<NamedSeries>,
}

pub fn read_input_columns(config: &InputConfig, delimiter: u8) -> Result<InputColumns, DataError> {
    info!(path = %config.path.display(), "reading label input");
    let table = Table::read(&config.path, delimiter)?;
    let close = table.numeric_column(&config.close_column)?.values;
    let average = table.numeric_column(&config.average_column)?;
    let indicators = config
        .indicator_columns
        .iter()
        .map(|name| table.numeric_column(name))
        .collect::<Result<Vec<_>, _>>()?;
    info!(rows = table.len(), indicators = indicators.len(), "read label input");
    Ok(InputColumns {
        close,
        average,
        indicators,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn candle(day: u32, close: f64) -> Candle {
        Candle {
            datetime: NaiveDate::from_ymd_opt(2018, 10, day)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            low: close - 10.0,
            high: close + 10.0,
            open: close - 1.0,
            close,
            volume_from: 1234.5,
            volume_to: 1234.5 * close,
        }
    }

    #[test]
    fn value_formatting() {
        assert_eq!(format_value(f64::NAN), "");
        assert_eq!(format_value(0.5), "0.5");
        assert_eq!(format_value(6480.0), "6480");
        assert!(parse_value("").unwrap().is_nan());
        assert!(parse_value("NaN").unwrap().is_nan());
        assert_eq!(parse_value(" 1.25 "), Some(1.25));
        assert_eq!(parse_value("abc"), None);
    }

    #[test]
    fn candle_file_round_trip_sorts_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("BTC_USD_Bitstamp_day_2018-10-25.csv");
        let candles = vec![candle(3, 6500.0), candle(1, 6400.0), candle(2, 6450.25)];
        write_candles(&path, b';', &candles).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("datetime;low;high;open;close;volumefrom;volumeto\n"));
        assert!(text.contains("2018-10-03 00:00:00;6490;6510;6499;6500;1234.5;"));

        let read = read_candles(&path, b';').unwrap();
        assert_eq!(read.len(), 3);
        assert_eq!(read[0], candle(1, 6400.0));
        assert_eq!(read[1], candle(2, 6450.25));
        assert_eq!(read[2], candle(3, 6500.0));
    }

    #[test]
    fn bad_datetime_is_reported_with_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(
            &path,
            "datetime;low;high;open;close;volumefrom;volumeto\n\
             2018-10-01 00:00:00;1;2;1;2;1;2\n\
             yesterday;1;2;1;2;1;2\n",
        )
        .unwrap();
        match read_candles(&path, b';') {
            Err(DataError::InvalidValue { row, column, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(column, "datetime");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_candles(Path::new("/nonexistent/candles.csv"), b';').unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn read_column_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candles.csv");
        write_candles(&path, b';', &[candle(1, 100.0), candle(2, 200.0)]).unwrap();

        assert_eq!(read_column(&path, b';', "low").unwrap(), vec!["90", "190"]);
        let err = read_column(&path, b';', "adj_close").unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { ref column, .. } if column == "adj_close"));
    }

    #[test]
    fn numeric_column_reads_empty_as_nan() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trends.csv");
        std::fs::write(&path, "close;trix\n1;\n2;0.5\n").unwrap();
        let table = Table::read(&path, b';').unwrap();
        let trix = table.numeric_column("trix").unwrap();
        assert!(trix.values[0].is_nan());
        assert_eq!(trix.values[1], 0.5);
        assert_eq!(table.headers(), &["close".to_string(), "trix".to_string()]);
    }

    #[test]
    fn input_columns_follow_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trends.csv");
        std::fs::write(&path, "close,avg,rsi_14\n1,1,50\n2,1.5,60\n").unwrap();
        let config = InputConfig {
            path,
            delimiter: ",".into(),
            close_column: "close".into(),
            average_column: "avg".into(),
            indicator_columns: vec!["rsi_14".into()],
        };
        let columns = read_input_columns(&config, b',').unwrap();
        assert_eq!(columns.close, vec![1.0, 2.0]);
        assert_eq!(columns.average.name, "avg");
        assert_eq!(columns.indicators[0].values, vec![50.0, 60.0]);
    }
}
