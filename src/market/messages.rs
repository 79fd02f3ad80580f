//! Response models for the quote endpoint

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level quote API response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteEnvelope {
    #[serde(rename = "quoteResponse")]
    pub quote_response: QuoteBody,
}

/// Body of the quote response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteBody {
    /// One document per requested symbol
    #[serde(default)]
    pub result: Vec<QuoteDocument>,
    /// Error payload, populated instead of results on failure
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// A single quoted symbol
///
/// Bid and ask are optional: the endpoint omits them outside market hours,
/// which the client treats as "no valid quote this cycle".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDocument {
    pub symbol: String,
    #[serde(default)]
    pub bid: Option<Decimal>,
    #[serde(default)]
    pub ask: Option<Decimal>,
    #[serde(default)]
    pub bid_size: Option<Decimal>,
    #[serde(default)]
    pub ask_size: Option<Decimal>,
    #[serde(default)]
    pub regular_market_price: Option<Decimal>,
}
