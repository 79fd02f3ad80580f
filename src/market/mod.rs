//! Market module - quote client for the live data feed

pub mod client;
pub mod messages;

pub use client::QuoteRestClient;
