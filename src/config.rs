//! Environment-backed configuration.
//!
//! Every setting is read from the process environment. Binaries call
//! `dotenvy::dotenv()` first so a local `.env` file is honoured.

use std::env;

use crate::error::{QuoteGridError, Result};

pub const DEFAULT_TUSHARE_API_URL: &str = "https://api.tushare.pro";
pub const DEFAULT_GATEWAY_PORT: u16 = 8787;
pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8787/";

/// Deployment environment name (`APP_ENV`), defaults to `development`.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "development".to_string())
}

pub fn get_tushare_api_url() -> String {
    env::var("TUSHARE_API_URL").unwrap_or_else(|_| DEFAULT_TUSHARE_API_URL.to_string())
}

/// The provider credential. It only ever lives on the gateway side.
pub fn get_tushare_token() -> Result<String> {
    match env::var("TUSHARE_TOKEN") {
        Ok(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(QuoteGridError::Config(
            "TUSHARE_TOKEN must be set for the gateway".to_string(),
        )),
    }
}

pub fn get_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_GATEWAY_PORT)
}

pub fn get_gateway_url() -> String {
    env::var("QUOTEGRID_GATEWAY_URL").unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string())
}

/// Settings the relay gateway needs at startup.
#[derive(Clone)]
pub struct GatewayConfig {
    pub port: u16,
    pub upstream_url: String,
    pub token: String,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: get_port(),
            upstream_url: get_tushare_api_url(),
            token: get_tushare_token()?,
        })
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("port", &self.port)
            .field("upstream_url", &self.upstream_url)
            .field("token", &"<redacted>")
            .finish()
    }
}
