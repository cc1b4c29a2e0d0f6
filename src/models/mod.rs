//! Shared data models spanning ingestion, computation and rendering.

pub mod fixed;
pub mod price;
pub mod query;

pub use fixed::Fixed2;
pub use price::{DerivedRecord, RawPriceRecord};
pub use query::{QueryParams, QueryRequest, RelayRequest, DAILY_API};
