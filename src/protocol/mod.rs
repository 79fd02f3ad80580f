//! Protocol module - the binary packet contract with the decision device

pub mod codec;
pub mod format;

pub use codec::{
    decode_trade_decision, encode_market_data, xor_checksum, INBOUND_MARKER,
    INBOUND_PACKET_LEN, OUTBOUND_MARKER, OUTBOUND_PACKET_LEN,
};
pub use format::{format_packet_binary, format_packet_hex, format_packet_testbench};
