//! Daily stock quote analytics: Tushare relay gateway, indicator engine and
//! sortable table rendering.

pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod render;
pub mod services;
pub mod session;

pub use error::{QuoteGridError, Result};
pub use indicators::compute;
pub use models::{DerivedRecord, Fixed2, RawPriceRecord};
