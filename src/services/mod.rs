//! Data sources: the upstream provider and the relay gateway in front of it.

pub mod market_data;
pub mod tushare;

pub use market_data::DailyQuoteSource;
pub use tushare::{decode_daily, FieldMap, GatewayClient, TushareClient};
