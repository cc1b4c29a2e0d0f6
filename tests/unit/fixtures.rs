//! Series builders shared by the unit tests.

#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use quotegrid::models::RawPriceRecord;

/// The newest day of every fixture series.
pub fn latest_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 28).expect("valid date")
}

/// Newest-first bars with `open == close == price` and constant volume.
pub fn bars(prices: &[f64]) -> Vec<RawPriceRecord> {
    let volumes = vec![1000.0; prices.len()];
    bars_with_volume(prices, &volumes)
}

pub fn bars_with_volume(prices: &[f64], volumes: &[f64]) -> Vec<RawPriceRecord> {
    prices
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&price, &volume))| {
            RawPriceRecord::new(
                latest_day() - Duration::days(i as i64),
                price,
                price + 1.0,
                price - 1.0,
                price,
                volume,
            )
        })
        .collect()
}
