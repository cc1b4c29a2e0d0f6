//! Query session: validates user input, runs one query at a time and holds
//! the snapshot currently on display.
//!
//! A failed query leaves the previous snapshot in place. The loading flag is
//! cleared on every exit path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{Months, NaiveDate};
use thiserror::Error;
use tracing::{info, warn};

use crate::error::{QuoteGridError, Result};
use crate::indicators::{compute, summarize, SeriesSummary};
use crate::models::price::TRADE_DATE_FORMAT;
use crate::models::{DerivedRecord, QueryRequest};
use crate::render::{ColumnSet, Table};
use crate::services::{decode_daily, DailyQuoteSource};

pub const VALIDATION_MESSAGE: &str = "Please fill in the symbol, start date and end date";
pub const FAILURE_MESSAGE: &str = "Failed to fetch data, please try again later";

/// Raw form input. Dates accept `YYYY-MM-DD` or `YYYYMMDD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryInput {
    pub symbol: String,
    pub start_date: String,
    pub end_date: String,
}

impl QueryInput {
    pub fn new(
        symbol: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    /// The default form: one month back from `today` through `today`.
    pub fn last_month(symbol: impl Into<String>, today: NaiveDate) -> Self {
        let start = today.checked_sub_months(Months::new(1)).unwrap_or(today);
        Self::new(
            symbol,
            start.format("%Y-%m-%d").to_string(),
            today.format("%Y-%m-%d").to_string(),
        )
    }

    /// Turn the input into a gateway request without touching the network.
    pub fn validate(&self) -> Result<QueryRequest> {
        let symbol = self.symbol.trim();
        if symbol.is_empty() || self.start_date.trim().is_empty() || self.end_date.trim().is_empty()
        {
            return Err(QuoteGridError::Validation(
                "symbol, start date and end date are all required".to_string(),
            ));
        }

        let start = parse_query_date(&self.start_date)?;
        let end = parse_query_date(&self.end_date)?;
        if start > end {
            return Err(QuoteGridError::Validation(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }

        Ok(QueryRequest::daily(symbol, start, end))
    }
}

/// Parse `YYYY-MM-DD` or `YYYYMMDD`.
pub fn parse_query_date(raw: &str) -> Result<NaiveDate> {
    let compact: String = raw.trim().chars().filter(|c| *c != '-').collect();
    NaiveDate::parse_from_str(&compact, TRADE_DATE_FORMAT)
        .map_err(|_| QuoteGridError::Validation(format!("invalid date '{}'", raw.trim())))
}

/// The result of one successful query.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub request: QueryRequest,
    pub records: Vec<DerivedRecord>,
    pub summary: SeriesSummary,
}

impl Snapshot {
    pub fn table(&self, columns: &ColumnSet) -> Table {
        Table::from_records(&self.records, columns)
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    /// Rejected before any network call.
    #[error("invalid input: {0}")]
    Validation(#[source] QuoteGridError),

    /// The gateway call, provider envelope or decoding failed.
    #[error("query failed: {0}")]
    Query(#[source] QuoteGridError),
}

impl SessionError {
    /// The single notification shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            SessionError::Validation(_) => VALIDATION_MESSAGE,
            SessionError::Query(_) => FAILURE_MESSAGE,
        }
    }
}

/// Shared view of a session's loading state, readable while a query runs.
#[derive(Debug, Clone, Default)]
pub struct LoadingState(Arc<AtomicBool>);

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn enter(&self) -> LoadingGuard {
        self.0.store(true, Ordering::Release);
        LoadingGuard(self.0.clone())
    }
}

/// Clears the loading flag when dropped, including when the query future is
/// abandoned mid-flight.
struct LoadingGuard(Arc<AtomicBool>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct QuerySession<S> {
    source: S,
    current: Option<Arc<Snapshot>>,
    loading: LoadingState,
}

impl<S: DailyQuoteSource> QuerySession<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: None,
            loading: LoadingState::default(),
        }
    }

    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// A handle other tasks can poll while `submit` holds the session.
    pub fn loading_state(&self) -> LoadingState {
        self.loading.clone()
    }

    /// Run one query and, on success, replace the displayed snapshot.
    pub async fn submit(
        &mut self,
        input: &QueryInput,
    ) -> std::result::Result<Arc<Snapshot>, SessionError> {
        let request = input.validate().map_err(|e| {
            warn!(error = %e, "Query rejected");
            SessionError::Validation(e)
        })?;

        let outcome = {
            let _loading = self.loading.enter();
            self.fetch(&request).await
        };

        match outcome {
            Ok(snapshot) => {
                info!(
                    ts_code = %snapshot.request.params.ts_code,
                    rows = snapshot.records.len(),
                    "Query completed"
                );
                let snapshot = Arc::new(snapshot);
                self.current = Some(snapshot.clone());
                Ok(snapshot)
            }
            Err(e) => {
                warn!(error = %e, ts_code = %request.params.ts_code, "Query failed");
                Err(SessionError::Query(e))
            }
        }
    }

    async fn fetch(&self, request: &QueryRequest) -> Result<Snapshot> {
        let response = self.source.query(request).await?;
        let series = decode_daily(&response)?;

        Ok(Snapshot {
            request: request.clone(),
            records: compute(&series),
            summary: summarize(&series),
        })
    }
}
