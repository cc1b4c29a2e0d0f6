//! quotegrid command-line client
//!
//! Queries the relay gateway for one symbol and date range, computes the
//! indicators and prints them as a sortable table.

use chrono::Local;
use clap::{App, Arg};
use dotenvy::dotenv;
use quotegrid::logging;
use quotegrid::render::{ColumnSet, SortOrder};
use quotegrid::services::GatewayClient;
use quotegrid::session::{QueryInput, QuerySession};
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    logging::init_logging();

    let gateway_default = quotegrid::config::get_gateway_url();
    let matches = App::new("quotegrid")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Daily quote indicators for one symbol")
        .arg(
            Arg::with_name("symbol")
                .short('s')
                .long("symbol")
                .value_name("TS_CODE")
                .help("Symbol to query, e.g. 000001.SZ")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("start")
                .long("start")
                .value_name("DATE")
                .help("Start date (YYYY-MM-DD or YYYYMMDD), defaults to one month ago")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("end")
                .long("end")
                .value_name("DATE")
                .help("End date (YYYY-MM-DD or YYYYMMDD), defaults to today")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("gateway")
                .long("gateway")
                .value_name("URL")
                .help("Gateway endpoint")
                .takes_value(true)
                .default_value(&gateway_default),
        )
        .arg(
            Arg::with_name("columns")
                .short('c')
                .long("columns")
                .value_name("KEYS")
                .help("Comma-separated column keys to display")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("sort")
                .long("sort")
                .value_name("COLUMN")
                .help("Column key to sort by")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("desc")
                .long("desc")
                .help("Sort descending")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .help("Print derived records as JSON instead of a table")
                .takes_value(false),
        )
        .get_matches();

    let symbol = matches.value_of("symbol").unwrap_or_default();
    let defaults = QueryInput::last_month(symbol, Local::now().date_naive());
    let input = QueryInput::new(
        symbol,
        matches.value_of("start").unwrap_or(&defaults.start_date),
        matches.value_of("end").unwrap_or(&defaults.end_date),
    );

    let columns = match matches.value_of("columns") {
        Some(list) => match ColumnSet::parse(list) {
            Ok(columns) => columns,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => ColumnSet::default(),
    };

    let gateway = matches.value_of("gateway").unwrap_or(&gateway_default);
    let mut session = QuerySession::new(GatewayClient::new(gateway));

    let snapshot = match session.submit(&input).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(error = %e, "Query failed");
            eprintln!("{}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    if matches.is_present("json") {
        match serde_json::to_string_pretty(&snapshot.records) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    let mut table = snapshot.table(&columns);
    if let Some(key) = matches.value_of("sort") {
        let order = if matches.is_present("desc") {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        if let Err(e) = table.sort_by_key(key, order) {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    }

    println!("{}", table.to_text());
    println!();
    let summary = &snapshot.summary;
    println!("Trading days: {}", summary.trading_days);
    if let (Some(high), Some(low)) = (summary.period_high, summary.period_low) {
        println!("Period high:  {}", high);
        println!("Period low:   {}", low);
    }

    ExitCode::SUCCESS
}
