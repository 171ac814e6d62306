//! Indicator enrichment.
//!
//! All indicator columns are computed once over the sorted candle history,
//! in parallel across indicators. Column order is fixed by
//! `default_indicators()` and is the order the enriched file is written in.

use rayon::prelude::*;
use tracing::info;
use trendmark_core::domain::{Candle, LabelInput, NamedSeries};
use trendmark_core::indicators::{
    closes, Adx, Cci, Indicator, Kdj, Macd, Rsi, Sma, Trix, WilliamsR,
};

use crate::pipeline::PipelineError;
use crate::provider::DataError;

/// The reporting indicators followed by the 15-period close SMA.
pub fn default_indicators() -> Vec<Box<dyn Indicator>> {
    let [kdjk3, kdjd3, kdjj3] = Kdj::lines(3);
    let [kdjk14, kdjd14, kdjj14] = Kdj::lines(14);
    vec![
        Box::new(Macd::default()),
        Box::new(Rsi::new(14)),
        Box::new(WilliamsR::new(14)),
        Box::new(kdjk3),
        Box::new(kdjd3),
        Box::new(kdjj3),
        Box::new(kdjk14),
        Box::new(kdjd14),
        Box::new(kdjj14),
        Box::new(Trix::default()),
        Box::new(Adx::default()),
        Box::new(Cci::default()),
        Box::new(Sma::new(15)),
    ]
}

/// Candles plus computed indicator columns, index-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTable {
    candles: Vec<Candle>,
    columns: Vec<NamedSeries>,
}

impl EnrichedTable {
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn columns(&self) -> &[NamedSeries] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&NamedSeries> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Select the close, the moving average and the reporting columns.
    pub fn to_label_input(
        &self,
        average_column: &str,
        indicator_columns: &[String],
    ) -> Result<LabelInput, PipelineError> {
        let lookup = |name: &str| {
            self.column(name).cloned().ok_or_else(|| DataError::MissingColumn {
                column: name.to_string(),
                table: "enriched table".into(),
            })
        };

        let average = lookup(average_column)?;
        let indicators = indicator_columns
            .iter()
            .map(|name| lookup(name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LabelInput::new(closes(&self.candles), average, indicators)?)
    }
}

/// Sort candles by time and compute the default indicator columns.
pub fn enrich(candles: Vec<Candle>) -> EnrichedTable {
    enrich_with(candles, &default_indicators())
}

/// Sort candles by time and compute the given indicator columns.
pub fn enrich_with(mut candles: Vec<Candle>, indicators: &[Box<dyn Indicator>]) -> EnrichedTable {
    candles.sort_by_key(|c| c.datetime);

    let columns: Vec<NamedSeries> = indicators
        .par_iter()
        .map(|indicator| {
            let series = indicator.compute(&candles);
            debug_assert_eq!(
                series.len(),
                candles.len(),
                "indicator '{}' produced {} values for {} candles",
                indicator.name(),
                series.len(),
                candles.len()
            );
            NamedSeries::new(indicator.name(), series)
        })
        .collect();

    info!(rows = candles.len(), columns = columns.len(), "computed indicator columns");
    EnrichedTable { candles, columns }
}
