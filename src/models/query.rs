use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::price::TRADE_DATE_FORMAT;

/// Provider API serving daily bars.
pub const DAILY_API: &str = "daily";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub ts_code: String,
    pub start_date: String,
    pub end_date: String,
}

/// Body the client posts to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub api_name: String,
    pub params: QueryParams,
}

impl QueryRequest {
    pub fn daily(ts_code: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            api_name: DAILY_API.to_string(),
            params: QueryParams {
                ts_code: ts_code.into(),
                start_date: start.format(TRADE_DATE_FORMAT).to_string(),
                end_date: end.format(TRADE_DATE_FORMAT).to_string(),
            },
        }
    }
}

/// Whatever the gateway received, kept structurally opaque.
///
/// The gateway forwards `api_name` and `params` untouched; absent keys stay
/// absent in the upstream body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelayRequest {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub api_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub params: Option<Value>,
}

/// Body the gateway posts upstream: the relayed request plus the credential.
#[derive(Debug, Serialize)]
pub struct UpstreamRequest<'a> {
    pub token: &'a str,
    #[serde(flatten)]
    pub request: &'a RelayRequest,
}
