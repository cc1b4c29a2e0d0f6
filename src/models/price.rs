use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fixed::Fixed2;

/// Wire format of a trade date (`20240105`).
pub const TRADE_DATE_FORMAT: &str = "%Y%m%d";

/// One trading day as delivered by the provider.
///
/// Series of these are ordered newest-first: index 0 is the latest day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPriceRecord {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ts_code: Option<String>,
    #[serde(with = "trade_date")]
    pub trade_date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Provider-reported percentage change against the previous close.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pct_chg: Option<f64>,
    pub volume: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub turnover_rate: Option<f64>,
}

impl RawPriceRecord {
    pub fn new(
        trade_date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            ts_code: None,
            trade_date,
            open,
            high,
            low,
            close,
            pct_chg: None,
            volume,
            turnover_rate: None,
        }
    }

    pub fn with_ts_code(mut self, ts_code: impl Into<String>) -> Self {
        self.ts_code = Some(ts_code.into());
        self
    }

    pub fn with_pct_chg(mut self, pct_chg: f64) -> Self {
        self.pct_chg = Some(pct_chg);
        self
    }

    pub fn with_turnover_rate(mut self, turnover_rate: f64) -> Self {
        self.turnover_rate = Some(turnover_rate);
        self
    }
}

/// One analytics row derived from a [`RawPriceRecord`].
///
/// `None` marks an indicator that could not be computed at this position
/// (not enough history, or a zero divisor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    pub ts_code: Option<String>,
    #[serde(with = "trade_date")]
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub price_range: Option<Fixed2>,
    pub amplitude: Option<Fixed2>,
    pub ma3: Option<Fixed2>,
    pub ma5: Option<Fixed2>,
    pub ma10: Option<Fixed2>,
    pub ma20: Option<Fixed2>,
    pub ma50: Option<Fixed2>,
    pub ma120: Option<Fixed2>,
    pub volume: f64,
    pub volume_ratio: Option<Fixed2>,
    pub turnover_rate: Option<f64>,
    pub change_percent: Option<Fixed2>,
    pub pct_chg: Option<Fixed2>,
}

impl DerivedRecord {
    /// Moving average for one of the computed periods.
    pub fn moving_average(&self, period: usize) -> Option<Fixed2> {
        match period {
            3 => self.ma3,
            5 => self.ma5,
            10 => self.ma10,
            20 => self.ma20,
            50 => self.ma50,
            120 => self.ma120,
            _ => None,
        }
    }
}

/// Serde adapter for `YYYYMMDD` dates.
pub mod trade_date {
    use super::TRADE_DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(TRADE_DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, TRADE_DATE_FORMAT).map_err(de::Error::custom)
    }
}
