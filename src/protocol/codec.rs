//! Binary packet codec for the device link
//!
//! Pure encode/decode functions with no I/O and no mutable state. The two
//! fixed layouts here are the wire contract with an existing FPGA decoder,
//! so every field offset and width must stay byte-for-byte stable.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::common::errors::{BridgeError, Result};
use crate::common::types::{OrderType, TradeAction, TradeDecision};

/// Length of an outbound (host → device) market-data frame
pub const OUTBOUND_PACKET_LEN: usize = 18;
/// Length of an inbound (device → host) trade-decision frame
pub const INBOUND_PACKET_LEN: usize = 16;
/// Start marker of an outbound frame
pub const OUTBOUND_MARKER: u8 = 0xAA;
/// Start marker of an inbound frame
pub const INBOUND_MARKER: u8 = 0xBB;

/// XOR checksum over a byte slice
///
/// The outbound frame carries this over its 16 payload bytes; by XOR
/// construction any single-bit flip in the payload changes the result.
pub fn xor_checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, b| acc ^ b)
}

/// Convert a dollar price to a 24-bit cents field.
///
/// Cents are truncated toward zero and masked to 24 bits: prices at or above
/// $167,772.15 silently wrap. The wrap is a known limit of the wire format
/// and is kept for compatibility with the device's decoder. The reduction
/// happens in the decimal domain so arbitrarily large cent values keep
/// their low 24 bits rather than saturating on the narrowing conversion.
fn price_to_cents(price: Decimal) -> u32 {
    let cents = (price * Decimal::ONE_HUNDRED).trunc();
    let wrapped = cents % Decimal::from(1u32 << 24);
    // |wrapped| < 2^24, so the conversion cannot fail
    (wrapped.to_i64().unwrap_or(0) & 0xFF_FFFF) as u32
}

/// Encode one market-data frame to send to the device.
///
/// Layout (all multi-byte integers big-endian):
///
/// | offset | size | field |
/// |--------|------|-------|
/// | 0      | 1    | start marker `0xAA` |
/// | 1      | 4    | ticker, ASCII, space-padded |
/// | 5      | 4    | unix timestamp |
/// | 9      | 3    | ask price in cents |
/// | 12     | 3    | bid price in cents |
/// | 15     | 2    | position, signed 16-bit |
/// | 17     | 1    | XOR checksum of bytes 1..=16 |
///
/// The ticker is truncated to its first 4 bytes and right-padded with ASCII
/// spaces; a non-ASCII ticker fails with [`BridgeError::TickerEncoding`]. A
/// position outside the signed 16-bit range fails with
/// [`BridgeError::PositionRange`] instead of truncating. The timestamp is
/// masked to 32 bits (wraps past 2106).
pub fn encode_market_data(
    ticker: &str,
    ask: Decimal,
    bid: Decimal,
    position: i32,
    timestamp: u64,
) -> Result<[u8; OUTBOUND_PACKET_LEN]> {
    if !ticker.is_ascii() {
        return Err(BridgeError::TickerEncoding(ticker.to_string()));
    }
    let position =
        i16::try_from(position).map_err(|_| BridgeError::PositionRange(position))?;

    let ask_cents = price_to_cents(ask);
    let bid_cents = price_to_cents(bid);
    let unix_time = (timestamp & 0xFFFF_FFFF) as u32;

    let mut ticker_field = [b' '; 4];
    for (dst, src) in ticker_field.iter_mut().zip(ticker.bytes()) {
        *dst = src;
    }

    let mut packet = [0u8; OUTBOUND_PACKET_LEN];
    packet[0] = OUTBOUND_MARKER;
    packet[1..5].copy_from_slice(&ticker_field);
    packet[5..9].copy_from_slice(&unix_time.to_be_bytes());
    packet[9..12].copy_from_slice(&ask_cents.to_be_bytes()[1..]);
    packet[12..15].copy_from_slice(&bid_cents.to_be_bytes()[1..]);
    packet[15..17].copy_from_slice(&position.to_be_bytes());
    packet[17] = xor_checksum(&packet[1..17]);

    Ok(packet)
}

/// Decode a trade-decision frame received from the device.
///
/// Layout:
///
/// | offset | size | field |
/// |--------|------|-------|
/// | 0      | 1    | start marker `0xBB` |
/// | 1      | 4    | ticker, ASCII, space-padded |
/// | 5      | 1    | action code (0=HOLD, 1=BUY, 2=SELL) |
/// | 6      | 2    | quantity, unsigned 16-bit |
/// | 8      | 1    | order-type code (0=MARKET, 1=LIMIT) |
/// | 9      | 3    | limit price in cents |
/// | 12     | 4    | unix timestamp |
///
/// Returns `None` for frames shorter than 16 bytes or with the wrong start
/// marker; both are routine outcomes of polling a live link, not errors.
/// There is no inbound checksum, so no integrity check happens beyond the
/// marker byte: a corrupted frame with an intact marker decodes into garbage
/// fields. Unrecognized action and order-type codes map to `Unknown` and
/// `Market`. Inputs longer than 16 bytes decode from their first 16 bytes.
pub fn decode_trade_decision(response: &[u8]) -> Option<TradeDecision> {
    if response.len() < INBOUND_PACKET_LEN {
        return None;
    }
    if response[0] != INBOUND_MARKER {
        return None;
    }

    let ticker = String::from_utf8_lossy(&response[1..5]).trim().to_string();
    let action = TradeAction::from_code(response[5]);
    let quantity = u16::from_be_bytes([response[6], response[7]]);
    let order_type = OrderType::from_code(response[8]);
    let limit_cents = u32::from_be_bytes([0, response[9], response[10], response[11]]);
    let timestamp = u32::from_be_bytes([
        response[12],
        response[13],
        response[14],
        response[15],
    ]);

    Some(TradeDecision {
        ticker,
        action,
        quantity,
        order_type,
        limit_price: Decimal::new(i64::from(limit_cents), 2),
        timestamp,
    })
}
