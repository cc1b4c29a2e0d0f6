//! Decoding of the provider's positional rows into named records.
//!
//! The provider answers with `{code, msg, data: {fields, items}}` where each
//! item is an array whose positions are named by `fields`. A [`FieldMap`] is
//! resolved once per response and then applied to every row.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::warn;

use crate::error::{QuoteGridError, Result};
use crate::models::price::TRADE_DATE_FORMAT;
use crate::models::RawPriceRecord;

/// Column order of the `daily` API when a response does not name its fields.
pub const DAILY_FIELDS: [&str; 11] = [
    "ts_code",
    "trade_date",
    "open",
    "high",
    "low",
    "close",
    "pre_close",
    "change",
    "pct_chg",
    "vol",
    "amount",
];

static NULL: Value = Value::Null;

/// Positions of the named fields inside a provider row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    trade_date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
    ts_code: Option<usize>,
    pct_chg: Option<usize>,
    turnover_rate: Option<usize>,
}

impl FieldMap {
    /// Map for the documented `daily` column order.
    pub fn canonical() -> Self {
        Self {
            ts_code: Some(0),
            trade_date: 1,
            open: 2,
            high: 3,
            low: 4,
            close: 5,
            pct_chg: Some(8),
            volume: 9,
            turnover_rate: None,
        }
    }

    /// Resolve positions from a `fields` header.
    ///
    /// Fails when a field the engine depends on is missing.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let position = |name: &str| names.iter().position(|n| n.as_ref() == name);
        let required = |name: &str| {
            position(name).ok_or_else(|| {
                QuoteGridError::Decode(format!("response fields do not include '{}'", name))
            })
        };

        Ok(Self {
            trade_date: required("trade_date")?,
            open: required("open")?,
            high: required("high")?,
            low: required("low")?,
            close: required("close")?,
            volume: required("vol")?,
            ts_code: position("ts_code"),
            pct_chg: position("pct_chg"),
            turnover_rate: position("turnover_rate"),
        })
    }

    /// Decode one provider row. `row_index` only feeds error messages.
    pub fn decode_row(&self, row_index: usize, row: &[Value]) -> Result<RawPriceRecord> {
        let cell = |position: usize| row.get(position).unwrap_or(&NULL);
        let number = |position: usize, field: &str| {
            required_number(cell(position)).ok_or_else(|| bad_cell(row_index, field, cell(position)))
        };
        let optional = |position: Option<usize>, field: &str| match position.map(cell) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => required_number(value)
                .map(Some)
                .ok_or_else(|| bad_cell(row_index, field, value)),
        };

        let trade_date = parse_trade_date(cell(self.trade_date))
            .ok_or_else(|| bad_cell(row_index, "trade_date", cell(self.trade_date)))?;

        Ok(RawPriceRecord {
            ts_code: self
                .ts_code
                .map(cell)
                .and_then(Value::as_str)
                .map(str::to_string),
            trade_date,
            open: number(self.open, "open")?,
            high: number(self.high, "high")?,
            low: number(self.low, "low")?,
            close: number(self.close, "close")?,
            pct_chg: optional(self.pct_chg, "pct_chg")?,
            volume: number(self.volume, "vol")?,
            turnover_rate: optional(self.turnover_rate, "turnover_rate")?,
        })
    }
}

/// Decode a full provider envelope into a newest-first series.
///
/// A non-zero `code` or a missing `data.items` is an upstream error; the
/// provider's `msg` is carried along when present.
pub fn decode_daily(response: &Value) -> Result<Vec<RawPriceRecord>> {
    let code = response.get("code").and_then(Value::as_i64).unwrap_or(0);
    if code != 0 {
        let msg = response
            .get("msg")
            .and_then(Value::as_str)
            .unwrap_or("no message");
        return Err(QuoteGridError::Upstream(format!("provider code {}: {}", code, msg)));
    }

    let data = response
        .get("data")
        .filter(|d| !d.is_null())
        .ok_or_else(|| QuoteGridError::Upstream("response carries no data".to_string()))?;
    let items = data
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| QuoteGridError::Upstream("response carries no data.items".to_string()))?;

    let fields = match data.get("fields").and_then(Value::as_array) {
        Some(names) => {
            let names = names
                .iter()
                .enumerate()
                .map(|(position, name)| {
                    name.as_str().ok_or_else(|| {
                        QuoteGridError::Decode(format!(
                            "field name at position {} is not a string: {}",
                            position, name
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            FieldMap::from_names(&names)?
        }
        None => FieldMap::canonical(),
    };

    let records = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let row = item.as_array().ok_or_else(|| {
                QuoteGridError::Decode(format!("row {} is not an array", index))
            })?;
            fields.decode_row(index, row)
        })
        .collect::<Result<Vec<_>>>()?;

    if records
        .windows(2)
        .any(|pair| pair[0].trade_date <= pair[1].trade_date)
    {
        warn!(rows = records.len(), "Provider rows are not strictly newest-first");
    }

    Ok(records)
}

fn required_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

fn parse_trade_date(value: &Value) -> Option<NaiveDate> {
    let raw = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.as_u64()?.to_string(),
        _ => return None,
    };
    NaiveDate::parse_from_str(&raw, TRADE_DATE_FORMAT).ok()
}

fn bad_cell(row_index: usize, field: &str, value: &Value) -> QuoteGridError {
    QuoteGridError::Decode(format!(
        "row {} has an invalid '{}' value: {}",
        row_index, field, value
    ))
}
