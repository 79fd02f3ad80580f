//! FPGA Trade Bridge Library
//!
//! Bridges a live market-data feed to a hardware trading-decision engine
//! over a serial link: quotes are encoded into fixed-layout binary frames,
//! transmitted to the device, and its binary replies are decoded into trade
//! decisions that drive a position counter.

pub mod common;
pub mod config;
pub mod logging;
pub mod market;
pub mod protocol;
pub mod session;
pub mod transport;

// Re-export commonly used types
pub use common::errors::{BridgeError, Result};
pub use common::traits::{DeviceTransport, QuoteSource};
pub use common::types::{OrderType, Quote, TradeAction, TradeDecision};
pub use config::types::AppConfig;
pub use logging::{PacketLogger, PacketRecord, CSV_HEADER};
pub use market::client::QuoteRestClient;
pub use protocol::{
    decode_trade_decision, encode_market_data, format_packet_binary, format_packet_hex,
    format_packet_testbench, xor_checksum, INBOUND_MARKER, INBOUND_PACKET_LEN,
    OUTBOUND_MARKER, OUTBOUND_PACKET_LEN,
};
pub use session::{CycleOutcome, TradingSession};
pub use transport::serial::SerialTransport;
