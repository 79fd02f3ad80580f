//! Error types for the application

use thiserror::Error;

/// Result type alias using our BridgeError
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Main error type for bridge operations
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Ticker symbol cannot be encoded into the 4-byte ASCII packet field
    #[error("ticker '{0}' is not ASCII-encodable")]
    TickerEncoding(String),

    /// Position does not fit the signed 16-bit packet field
    #[error("position {0} is outside the signed 16-bit range (-32768..=32767)")]
    PositionRange(i32),

    /// Serial port errors
    #[error("Serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),

    /// File and stream I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Invalid API response
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}
