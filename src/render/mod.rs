//! Table rendering and client-side sorting of derived rows.

pub mod collate;
pub mod column;
pub mod table;

pub use collate::compare_cells;
pub use column::{Column, ColumnSet};
pub use table::{Cell, Row, SignClass, SortOrder, Table, PLACEHOLDER};
