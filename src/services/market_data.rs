//! Market data source interface.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::models::QueryRequest;

/// Anything that answers a daily-bars query with the provider's JSON envelope.
///
/// The envelope is returned undecoded; callers run it through
/// [`decode_daily`](crate::services::tushare::decode_daily).
#[async_trait]
pub trait DailyQuoteSource: Send + Sync {
    async fn query(&self, request: &QueryRequest) -> Result<Value>;
}
