use crate::error::{QuoteGridError, Result};
use crate::models::{DerivedRecord, Fixed2};

use super::table::{Cell, SignClass, PLACEHOLDER};

/// A displayable field of a [`DerivedRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    TsCode,
    Date,
    Open,
    Close,
    High,
    Low,
    PriceRange,
    Amplitude,
    Ma3,
    Ma5,
    Ma10,
    Ma20,
    Ma50,
    Ma120,
    Volume,
    VolumeRatio,
    TurnoverRate,
    ChangePercent,
    PctChg,
}

impl Column {
    pub const ALL: [Column; 19] = [
        Column::TsCode,
        Column::Date,
        Column::Open,
        Column::Close,
        Column::High,
        Column::Low,
        Column::PriceRange,
        Column::Amplitude,
        Column::Ma3,
        Column::Ma5,
        Column::Ma10,
        Column::Ma20,
        Column::Ma50,
        Column::Ma120,
        Column::Volume,
        Column::VolumeRatio,
        Column::TurnoverRate,
        Column::ChangePercent,
        Column::PctChg,
    ];

    /// Stable identifier used on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Column::TsCode => "ts_code",
            Column::Date => "date",
            Column::Open => "open",
            Column::Close => "close",
            Column::High => "high",
            Column::Low => "low",
            Column::PriceRange => "price_range",
            Column::Amplitude => "amplitude",
            Column::Ma3 => "ma3",
            Column::Ma5 => "ma5",
            Column::Ma10 => "ma10",
            Column::Ma20 => "ma20",
            Column::Ma50 => "ma50",
            Column::Ma120 => "ma120",
            Column::Volume => "volume",
            Column::VolumeRatio => "volume_ratio",
            Column::TurnoverRate => "turnover_rate",
            Column::ChangePercent => "change_percent",
            Column::PctChg => "pct_chg",
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            Column::TsCode => "Code",
            Column::Date => "Date",
            Column::Open => "Open",
            Column::Close => "Close",
            Column::High => "High",
            Column::Low => "Low",
            Column::PriceRange => "Range",
            Column::Amplitude => "Body",
            Column::Ma3 => "MA3",
            Column::Ma5 => "MA5",
            Column::Ma10 => "MA10",
            Column::Ma20 => "MA20",
            Column::Ma50 => "MA50",
            Column::Ma120 => "MA120",
            Column::Volume => "Volume",
            Column::VolumeRatio => "Vol Ratio",
            Column::TurnoverRate => "Turnover",
            Column::ChangePercent => "Change",
            Column::PctChg => "Pct Chg",
        }
    }

    pub fn from_key(key: &str) -> Option<Column> {
        let key = key.trim();
        Column::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(key))
    }

    /// Render this column's value for one record.
    pub fn cell(self, record: &DerivedRecord) -> Cell {
        match self {
            Column::TsCode => Cell::plain(record.ts_code.as_deref().unwrap_or(PLACEHOLDER)),
            Column::Date => Cell::plain(record.date.format("%Y%m%d").to_string()),
            Column::Open => Cell::plain(record.open.to_string()),
            Column::Close => Cell::plain(record.close.to_string()),
            Column::High => Cell::plain(record.high.to_string()),
            Column::Low => Cell::plain(record.low.to_string()),
            Column::PriceRange => optional(record.price_range),
            Column::Amplitude => optional(record.amplitude),
            Column::Ma3 => optional(record.ma3),
            Column::Ma5 => optional(record.ma5),
            Column::Ma10 => optional(record.ma10),
            Column::Ma20 => optional(record.ma20),
            Column::Ma50 => optional(record.ma50),
            Column::Ma120 => optional(record.ma120),
            Column::Volume => Cell::plain(record.volume.to_string()),
            Column::VolumeRatio => optional(record.volume_ratio),
            Column::TurnoverRate => match record.turnover_rate {
                Some(rate) => Cell::plain(rate.to_string()),
                None => Cell::plain(PLACEHOLDER),
            },
            Column::ChangePercent => match record.change_percent {
                Some(change) => Cell {
                    text: format!("{}%", change),
                    class: Some(SignClass::of(change)),
                },
                None => Cell::plain(PLACEHOLDER),
            },
            Column::PctChg => match record.pct_chg {
                Some(pct) => Cell {
                    text: pct.to_string(),
                    class: Some(SignClass::of(pct)),
                },
                None => Cell::plain(PLACEHOLDER),
            },
        }
    }
}

fn optional(value: Option<Fixed2>) -> Cell {
    match value {
        Some(v) => Cell::plain(v.to_string()),
        None => Cell::plain(PLACEHOLDER),
    }
}

/// The columns a table shows, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    columns: Vec<Column>,
}

impl ColumnSet {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Parse a comma-separated list of column keys, e.g. `date,close,ma5`.
    pub fn parse(list: &str) -> Result<Self> {
        let columns = list
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| {
                Column::from_key(key).ok_or_else(|| {
                    QuoteGridError::Validation(format!("unknown column '{}'", key))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if columns.is_empty() {
            return Err(QuoteGridError::Validation(
                "at least one column must be selected".to_string(),
            ));
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn position(&self, column: Column) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }
}

impl Default for ColumnSet {
    fn default() -> Self {
        Self::new(Column::ALL.to_vec())
    }
}
