//! Domain types for TrendMark

pub mod candle;
pub mod label;
pub mod series;

pub use candle::Candle;
pub use label::TrendLabel;
pub use series::{LabelInput, NamedSeries};
