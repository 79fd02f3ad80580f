//! Unified types shared between the codec, the session, and the collaborator seams

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point-in-time bid/ask price pair for a ticker
///
/// Produced once per poll cycle by a [`QuoteSource`](super::traits::QuoteSource)
/// and consumed immediately by the encoder; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Ticker symbol (1-4 ASCII characters)
    pub ticker: String,
    /// Best ask price
    pub ask: Decimal,
    /// Best bid price
    pub bid: Decimal,
}

impl Quote {
    /// Create a new quote
    pub fn new(ticker: impl Into<String>, ask: Decimal, bid: Decimal) -> Self {
        Self {
            ticker: ticker.into(),
            ask,
            bid,
        }
    }
}

/// Trade action instructed by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    Hold,
    Buy,
    Sell,
    Unknown,
}

impl TradeAction {
    /// Map a wire action code to an action.
    ///
    /// Unrecognized codes map to `Unknown` rather than failing; the inbound
    /// frame carries no checksum, so decode must stay total.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => TradeAction::Hold,
            1 => TradeAction::Buy,
            2 => TradeAction::Sell,
            _ => TradeAction::Unknown,
        }
    }
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeAction::Hold => write!(f, "HOLD"),
            TradeAction::Buy => write!(f, "BUY"),
            TradeAction::Sell => write!(f, "SELL"),
            TradeAction::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Order type instructed by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Market,
    Limit,
}

impl OrderType {
    /// Map a wire order-type code to an order type.
    ///
    /// Unrecognized codes default to `Market`.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => OrderType::Limit,
            _ => OrderType::Market,
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderType::Market => write!(f, "MARKET"),
            OrderType::Limit => write!(f, "LIMIT"),
        }
    }
}

/// Decoded trade instruction from an inbound device frame
///
/// Constructed only by a successful decode; consumed immediately by the
/// session to mutate the position counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeDecision {
    /// Ticker symbol, trimmed of the packet field's space padding
    pub ticker: String,
    /// HOLD/BUY/SELL instruction
    pub action: TradeAction,
    /// Number of shares to trade
    pub quantity: u16,
    /// MARKET or LIMIT execution
    pub order_type: OrderType,
    /// Limit price in dollars (meaningful when `order_type` is LIMIT)
    pub limit_price: Decimal,
    /// Unix timestamp stamped by the device
    pub timestamp: u32,
}
