//! Download orchestrator: fetch → filter empty datapoints → dated candle file.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::provider::{
    dataset_filename, filter_empty_datapoints, DataError, DataProvider, HistoRequest,
};
use crate::table::write_candles;

/// Outcome of a single download.
#[derive(Debug, Clone)]
pub struct DownloadSummary {
    pub path: PathBuf,
    pub fetched: usize,
    pub filtered: usize,
    pub saved: usize,
}

/// Fetch a candle history and save it as `output_dir/<dataset filename>`.
pub fn download_to_file(
    provider: &dyn DataProvider,
    request: &HistoRequest,
    output_dir: &Path,
    download_date: NaiveDate,
    delimiter: u8,
) -> Result<DownloadSummary, DataError> {
    let candles = provider.fetch(request)?;
    let fetched = candles.len();
    let candles = filter_empty_datapoints(candles);
    if candles.is_empty() {
        return Err(DataError::NoData {
            pair: request.pair(),
        });
    }

    let path = output_dir.join(dataset_filename(request, download_date));
    info!(provider = provider.name(), path = %path.display(), "saving data");
    write_candles(&path, delimiter, &candles)?;

    Ok(DownloadSummary {
        path,
        fetched,
        filtered: fetched - candles.len(),
        saved: candles.len(),
    })
}
