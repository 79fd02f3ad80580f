//! Common test utilities and fixtures

use async_trait::async_trait;
use fpga_trade_bridge::common::errors::Result;
use fpga_trade_bridge::common::traits::{DeviceTransport, QuoteSource};
use fpga_trade_bridge::common::types::Quote;
use fpga_trade_bridge::protocol::{INBOUND_MARKER, INBOUND_PACKET_LEN};
use rust_decimal_macros::dec;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Create a sample quote for testing
pub fn sample_quote() -> Quote {
    Quote::new("AAPL", dec!(150.25), dec!(150.10))
}

/// Build an inbound device frame with the given fields
pub fn inbound_frame(
    ticker: &[u8; 4],
    action: u8,
    quantity: u16,
    order_type: u8,
    limit_cents: u32,
    timestamp: u32,
) -> Vec<u8> {
    let mut frame = vec![0u8; INBOUND_PACKET_LEN];
    frame[0] = INBOUND_MARKER;
    frame[1..5].copy_from_slice(ticker);
    frame[5] = action;
    frame[6..8].copy_from_slice(&quantity.to_be_bytes());
    frame[8] = order_type;
    frame[9..12].copy_from_slice(&limit_cents.to_be_bytes()[1..]);
    frame[12..16].copy_from_slice(&timestamp.to_be_bytes());
    frame
}

/// Quote source that always returns the same quote (or none)
pub struct FixedQuoteSource {
    quote: Option<Quote>,
}

impl FixedQuoteSource {
    pub fn new(quote: Option<Quote>) -> Self {
        Self { quote }
    }
}

#[async_trait]
impl QuoteSource for FixedQuoteSource {
    async fn get_quote(&self, _ticker: &str) -> Result<Option<Quote>> {
        Ok(self.quote.clone())
    }
}

/// Shared handles into a [`ScriptedTransport`] after the session takes
/// ownership of it
#[derive(Clone, Default)]
pub struct TransportProbe {
    pub written: Arc<Mutex<Vec<Vec<u8>>>>,
    pub closed: Arc<Mutex<bool>>,
}

/// Device transport scripted with canned replies
///
/// Records every written frame and pops one reply per read; an exhausted
/// script reads as an empty reply, like a silent device.
pub struct ScriptedTransport {
    probe: TransportProbe,
    replies: VecDeque<Vec<u8>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Vec<u8>>) -> (Self, TransportProbe) {
        let probe = TransportProbe::default();
        let transport = Self {
            probe: probe.clone(),
            replies: replies.into(),
        };
        (transport, probe)
    }
}

#[async_trait]
impl DeviceTransport for ScriptedTransport {
    async fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.probe.written.lock().unwrap().push(frame.to_vec());
        Ok(())
    }

    async fn read_available(&mut self, max_len: usize) -> Result<Vec<u8>> {
        let mut reply = self.replies.pop_front().unwrap_or_default();
        reply.truncate(max_len);
        Ok(reply)
    }

    async fn close(&mut self) -> Result<()> {
        *self.probe.closed.lock().unwrap() = true;
        Ok(())
    }
}
