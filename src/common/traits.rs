//! Trait definitions for the session's external collaborators

use async_trait::async_trait;

use super::errors::Result;
use super::types::Quote;

/// Trait for market-data sources (Yahoo-style quote endpoints, fixtures, etc.)
///
/// This is the pull side of the bridge: the session asks for one quote per
/// poll cycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the current quote for a ticker
    ///
    /// Returns `Ok(None)` when no valid quote is available this cycle (a
    /// normal outcome for a live feed), `Err` on transport or parse failure.
    async fn get_quote(&self, ticker: &str) -> Result<Option<Quote>>;
}

/// Trait for the byte-oriented duplex channel to the decision device
///
/// The session only needs frame writes and a bounded, non-blocking read; the
/// serial details stay behind this seam.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceTransport: Send + Sync {
    /// Write one complete frame to the device
    async fn write_frame(&mut self, frame: &[u8]) -> Result<()>;

    /// Read whatever reply bytes are available, up to `max_len`
    ///
    /// Returns an empty vector when nothing arrives within the transport's
    /// short read window; never blocks indefinitely.
    async fn read_available(&mut self, max_len: usize) -> Result<Vec<u8>>;

    /// Gracefully close the channel
    async fn close(&mut self) -> Result<()>;
}
