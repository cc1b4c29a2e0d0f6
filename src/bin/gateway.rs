//! quotegrid relay gateway
//!
//! Forwards `{api_name, params}` to the data provider with the server-held
//! token and relays the JSON answer with permissive CORS headers.
//! Holds no state between requests and can be horizontally scaled.

use dotenvy::dotenv;
use quotegrid::config::GatewayConfig;
use quotegrid::core::http::start_server;
use quotegrid::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = GatewayConfig::from_env().map_err(|e| {
        error!(error = %e, "Gateway configuration incomplete");
        e
    })?;

    let env = quotegrid::config::get_environment();
    info!("Starting quotegrid gateway");
    info!(environment = %env, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down gateway...");
        }
        result = start_server(config) => {
            if let Err(e) = result {
                error!(error = %e, "HTTP server error");
                return Err(e);
            }
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
