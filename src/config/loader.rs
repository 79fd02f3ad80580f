//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::AppConfig;
use crate::common::errors::{BridgeError, Result};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with BRIDGE_)
/// 2. Configuration file (TOML format)
/// 3. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    // Add config file if it exists
    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    // Add environment variables with BRIDGE_ prefix, e.g. BRIDGE_SERIAL__PORT
    builder = builder.add_source(
        Environment::with_prefix("BRIDGE")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| BridgeError::Configuration(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| BridgeError::Configuration(e.to_string()))
}

/// Load configuration from environment variables only
pub fn load_from_env() -> Result<AppConfig> {
    // Try to load from .env file
    dotenvy::dotenv().ok();

    let mut config = AppConfig::default();

    config.serial.port = std::env::var("BRIDGE_SERIAL_PORT").ok();
    if let Ok(baud) = std::env::var("BRIDGE_BAUD_RATE") {
        config.serial.baud_rate = baud
            .parse()
            .map_err(|e| BridgeError::Configuration(format!("Invalid baud rate: {}", e)))?;
    }
    if let Ok(ticker) = std::env::var("BRIDGE_TICKER") {
        config.market.ticker = ticker;
    }
    if let Ok(url) = std::env::var("BRIDGE_QUOTE_URL") {
        config.market.quote_url = url;
    }
    if let Ok(interval) = std::env::var("BRIDGE_POLL_INTERVAL_MS") {
        config.session.poll_interval_ms = interval
            .parse()
            .map_err(|e| BridgeError::Configuration(format!("Invalid poll interval: {}", e)))?;
    }
    if let Ok(log_file) = std::env::var("BRIDGE_LOG_FILE") {
        config.session.log_file = log_file;
    }

    Ok(config)
}
