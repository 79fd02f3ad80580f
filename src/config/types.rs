//! Configuration types

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Serial link to the decision device
    #[serde(default)]
    pub serial: SerialConfig,
    /// Market-data feed configuration
    #[serde(default)]
    pub market: MarketConfig,
    /// Polling loop and logging settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Packet dump toggles
    #[serde(default)]
    pub display: DisplayOptions,
}

/// Serial link configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Serial port device path; `None` runs in simulation mode (no device)
    #[serde(default)]
    pub port: Option<String>,
    /// Baud rate
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    /// Delay after opening the port, giving the device time to settle
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
    /// Pause between writing a frame and reading the reply
    #[serde(default = "default_response_delay")]
    pub response_delay_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: default_baud_rate(),
            settle_delay_ms: default_settle_delay(),
            response_delay_ms: default_response_delay(),
        }
    }
}

fn default_baud_rate() -> u32 {
    115_200
}

fn default_settle_delay() -> u64 {
    2000
}

fn default_response_delay() -> u64 {
    100
}

/// Market-data feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Base URL of the quote API
    #[serde(default = "default_quote_url")]
    pub quote_url: String,
    /// Ticker symbol to poll
    #[serde(default = "default_ticker")]
    pub ticker: String,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            quote_url: default_quote_url(),
            ticker: default_ticker(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_quote_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}

fn default_ticker() -> String {
    "AAPL".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

/// Polling loop and logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Interval between poll cycles in milliseconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    /// CSV packet log destination
    #[serde(default = "default_log_file")]
    pub log_file: String,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            log_file: default_log_file(),
            log_level: default_log_level(),
        }
    }
}

fn default_poll_interval() -> u64 {
    1500
}

fn default_log_file() -> String {
    "packets.csv".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Per-cycle packet dump toggles, each independent
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DisplayOptions {
    /// Print each encoded frame as spaced hex
    #[serde(default)]
    pub print_hex: bool,
    /// Print each encoded frame as spaced binary
    #[serde(default)]
    pub print_binary: bool,
    /// Print each encoded frame as a SystemVerilog testbench stimulus
    #[serde(default)]
    pub print_testbench: bool,
}
