//! Per-row indicator computation.

use crate::models::{DerivedRecord, Fixed2, RawPriceRecord};

use super::window::{mean, prior_window, trailing_window};

/// Moving average periods computed for every row.
pub const MA_PERIODS: [usize; 6] = [3, 5, 10, 20, 50, 120];

/// Number of older days averaged as the volume ratio's reference.
pub const VOLUME_RATIO_LOOKBACK: usize = 5;

/// Derive one analytics row per input day, preserving order and length.
///
/// `series` must be newest-first. Indicators that lack history or would divide
/// by zero come out as `None`.
pub fn compute(series: &[RawPriceRecord]) -> Vec<DerivedRecord> {
    series
        .iter()
        .enumerate()
        .map(|(index, record)| derive_row(series, index, record))
        .collect()
}

fn derive_row(series: &[RawPriceRecord], index: usize, record: &RawPriceRecord) -> DerivedRecord {
    let ma = |period| moving_average(series, index, period);

    DerivedRecord {
        ts_code: record.ts_code.clone(),
        date: record.trade_date,
        open: record.open,
        close: record.close,
        high: record.high,
        low: record.low,
        price_range: price_range(record),
        amplitude: amplitude(record),
        ma3: ma(3),
        ma5: ma(5),
        ma10: ma(10),
        ma20: ma(20),
        ma50: ma(50),
        ma120: ma(120),
        volume: record.volume,
        volume_ratio: volume_ratio(series, index),
        turnover_rate: record.turnover_rate,
        change_percent: change_percent(series, index),
        pct_chg: record.pct_chg.and_then(Fixed2::from_f64),
    }
}

/// `high - low`. `None` only when the difference is too large to represent.
pub fn price_range(record: &RawPriceRecord) -> Option<Fixed2> {
    Fixed2::from_f64(record.high - record.low)
}

/// Intraday body, `close - open`.
pub fn amplitude(record: &RawPriceRecord) -> Option<Fixed2> {
    Fixed2::from_f64(record.close - record.open)
}

/// Mean close over the `period` days ending on `index`, current day included.
pub fn moving_average(series: &[RawPriceRecord], index: usize, period: usize) -> Option<Fixed2> {
    let window = trailing_window(series, index, period)?;
    let avg = mean(window.iter().map(|r| r.close))?;
    Fixed2::from_f64(avg)
}

/// Current volume over the mean volume of the five preceding days.
pub fn volume_ratio(series: &[RawPriceRecord], index: usize) -> Option<Fixed2> {
    let current = series.get(index)?;
    let reference = prior_window(series, index, VOLUME_RATIO_LOOKBACK)?;
    let avg = mean(reference.iter().map(|r| r.volume))?;
    if avg == 0.0 {
        return None;
    }
    Fixed2::from_f64(current.volume / avg)
}

/// Percentage change of `open` against the next older day's `open`.
pub fn change_percent(series: &[RawPriceRecord], index: usize) -> Option<Fixed2> {
    let current = series.get(index)?;
    let previous = prior_window(series, index, 1)?.first()?;
    if previous.open == 0.0 {
        return None;
    }
    Fixed2::from_f64((current.open - previous.open) / previous.open * 100.0)
}
