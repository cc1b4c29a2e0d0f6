use crate::error::{QuoteGridError, Result};
use crate::models::{DerivedRecord, Fixed2};

use super::collate::compare_cells;
use super::column::{Column, ColumnSet};

/// Shown in place of an indicator that has no value.
pub const PLACEHOLDER: &str = "-";

/// Visual tag for the change column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignClass {
    NonNegative,
    Negative,
}

impl SignClass {
    pub fn of(value: Fixed2) -> Self {
        if value.is_negative() {
            SignClass::Negative
        } else {
            SignClass::NonNegative
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            SignClass::NonNegative => "positive",
            SignClass::Negative => "negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub class: Option<SignClass>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// A rendered grid: one row per derived record, in the record order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: ColumnSet,
    rows: Vec<Row>,
}

impl Table {
    pub fn from_records(records: &[DerivedRecord], columns: &ColumnSet) -> Self {
        let rows = records
            .iter()
            .map(|record| Row {
                cells: columns.columns().iter().map(|c| c.cell(record)).collect(),
            })
            .collect();

        Self {
            columns: columns.clone(),
            rows,
        }
    }

    pub fn columns(&self) -> &[Column] {
        self.columns.columns()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell lookup by row index and column; `None` if the column is hidden.
    pub fn cell(&self, row: usize, column: Column) -> Option<&Cell> {
        let position = self.columns.position(column)?;
        self.rows.get(row)?.cells.get(position)
    }

    /// Reorder all rows ascending by the rendered text of `column`.
    ///
    /// Returns `false` when the column is not displayed. Rows with equal keys
    /// keep no particular relative order.
    pub fn sort_by(&mut self, column: Column) -> bool {
        self.sort(column, SortOrder::Ascending)
    }

    pub fn sort(&mut self, column: Column, order: SortOrder) -> bool {
        let Some(position) = self.columns.position(column) else {
            return false;
        };

        self.rows.sort_unstable_by(|a, b| {
            let ordering = compare_cells(&a.cells[position].text, &b.cells[position].text);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
        true
    }

    /// Sort by a column key such as `ma5` or `change_percent`.
    pub fn sort_by_key(&mut self, key: &str, order: SortOrder) -> Result<()> {
        let column = Column::from_key(key)
            .ok_or_else(|| QuoteGridError::Validation(format!("unknown column '{}'", key)))?;
        if self.sort(column, order) {
            Ok(())
        } else {
            Err(QuoteGridError::Validation(format!(
                "column '{}' is not displayed",
                column.key()
            )))
        }
    }

    /// Plain-text grid with a header line and right-aligned cells.
    pub fn to_text(&self) -> String {
        let columns = self.columns();
        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.rows
                    .iter()
                    .map(|row| row.cells[i].text.chars().count())
                    .chain(std::iter::once(column.header().chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let format_line = |texts: Vec<&str>| {
            texts
                .iter()
                .zip(&widths)
                .map(|(text, width)| format!("{:>width$}", text, width = *width))
                .collect::<Vec<_>>()
                .join("  ")
        };

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(format_line(columns.iter().map(|c| c.header()).collect()));
        for row in &self.rows {
            lines.push(format_line(row.cells.iter().map(|c| c.text.as_str()).collect()));
        }
        lines.join("\n")
    }
}

