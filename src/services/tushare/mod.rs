//! Tushare Pro integration: HTTP clients and the positional-row decoder.

pub mod client;
pub mod decode;

pub use client::{GatewayClient, TushareClient};
pub use decode::{decode_daily, FieldMap, DAILY_FIELDS};
