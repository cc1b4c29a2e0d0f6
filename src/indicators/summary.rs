use serde::Serialize;

use crate::models::RawPriceRecord;

/// Period statistics shown next to the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub trading_days: usize,
    pub period_high: Option<f64>,
    pub period_low: Option<f64>,
}

pub fn summarize(series: &[RawPriceRecord]) -> SeriesSummary {
    let period_high = series.iter().map(|r| r.high).reduce(f64::max);
    let period_low = series.iter().map(|r| r.low).reduce(f64::min);

    SeriesSummary {
        trading_days: series.len(),
        period_high,
        period_low,
    }
}
