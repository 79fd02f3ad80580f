//! Trading session - owns the position counter and runs the poll cycle
//!
//! One cycle is: poll a quote, encode it with the current position, log it,
//! transmit to the device, wait briefly for the reply, decode, apply. The
//! session never runs two cycles at once; a cycle that cannot obtain a quote
//! or a decodable reply ends early without touching the position.

use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::common::errors::Result;
use crate::common::traits::{DeviceTransport, QuoteSource};
use crate::common::types::{OrderType, TradeAction, TradeDecision};
use crate::config::DisplayOptions;
use crate::logging::{PacketLogger, PacketRecord};
use crate::protocol::{
    decode_trade_decision, encode_market_data, format_packet_binary, format_packet_hex,
    format_packet_testbench, INBOUND_PACKET_LEN,
};

/// How a single poll cycle ended
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// The feed had no valid quote; nothing was logged or sent
    NoQuote,
    /// Quote encoded and logged, but no transport is connected
    Offline,
    /// Frame sent, but the device reply was missing or undecodable
    NoDecision,
    /// Frame sent and the device's decision was applied
    Decision(TradeDecision),
}

/// Owns the position counter, the collaborator seams, and the packet log
pub struct TradingSession {
    ticker: String,
    position: i32,
    quotes: Box<dyn QuoteSource>,
    /// `None` means simulation mode: encode and log, but skip the device
    transport: Option<Box<dyn DeviceTransport>>,
    logger: PacketLogger,
    display: DisplayOptions,
    response_delay: Duration,
    poll_interval: Duration,
}

impl TradingSession {
    /// Create a session starting flat (position 0)
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ticker: impl Into<String>,
        quotes: Box<dyn QuoteSource>,
        transport: Option<Box<dyn DeviceTransport>>,
        logger: PacketLogger,
        display: DisplayOptions,
        response_delay: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            position: 0,
            quotes,
            transport,
            logger,
            display,
            response_delay,
            poll_interval,
        }
    }

    /// Current signed share count
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Apply a decoded device decision to the position counter
    ///
    /// BUY adds the quantity, SELL subtracts it; HOLD and UNKNOWN leave the
    /// position unchanged. There is no bound on the counter: it can go
    /// arbitrarily negative, representing a short.
    pub fn apply_decision(&mut self, decision: &TradeDecision) {
        match decision.action {
            TradeAction::Buy => self.position += i32::from(decision.quantity),
            TradeAction::Sell => self.position -= i32::from(decision.quantity),
            TradeAction::Hold | TradeAction::Unknown => return,
        }

        if decision.order_type == OrderType::Limit {
            info!(
                action = %decision.action,
                ticker = %decision.ticker,
                quantity = decision.quantity,
                order_type = %decision.order_type,
                limit_price = %format!("${:.2}", decision.limit_price),
                position = self.position,
                "Trade executed"
            );
        } else {
            info!(
                action = %decision.action,
                ticker = %decision.ticker,
                quantity = decision.quantity,
                order_type = %decision.order_type,
                position = self.position,
                "Trade executed"
            );
        }
    }

    /// Run one poll→encode→transmit→decode→apply cycle
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome> {
        let Some(quote) = self.quotes.get_quote(&self.ticker).await? else {
            warn!(ticker = %self.ticker, "No valid market data available, skipping");
            return Ok(CycleOutcome::NoQuote);
        };

        let unix_time = chrono::Utc::now().timestamp() as u64;
        let packet =
            encode_market_data(&self.ticker, quote.ask, quote.bid, self.position, unix_time)?;

        self.logger
            .append(&PacketRecord::now(&quote, self.position, unix_time, &packet))?;

        info!(
            ticker = %quote.ticker,
            ask = %format!("${:.2}", quote.ask),
            bid = %format!("${:.2}", quote.bid),
            position = self.position,
            "Quote"
        );
        if self.display.print_binary {
            info!("{}", format_packet_binary(&packet));
        }
        if self.display.print_hex {
            info!("{}", format_packet_hex(&packet));
        }
        if self.display.print_testbench {
            info!("{}", format_packet_testbench(&packet));
        }

        let Some(transport) = self.transport.as_mut() else {
            return Ok(CycleOutcome::Offline);
        };

        transport.write_frame(&packet).await?;
        tokio::time::sleep(self.response_delay).await;

        let response = transport.read_available(INBOUND_PACKET_LEN).await?;
        match decode_trade_decision(&response) {
            Some(decision) => {
                info!("Device response: {}", format_packet_hex(&response));
                if decision.order_type == OrderType::Limit {
                    info!(
                        "Decision: {} {} @ {} ${:.2}",
                        decision.action, decision.quantity, decision.order_type,
                        decision.limit_price
                    );
                } else {
                    info!(
                        "Decision: {} {} @ {}",
                        decision.action, decision.quantity, decision.order_type
                    );
                }
                self.apply_decision(&decision);
                Ok(CycleOutcome::Decision(decision))
            }
            None => {
                debug!(reply_len = response.len(), "No decodable device reply");
                Ok(CycleOutcome::NoDecision)
            }
        }
    }

    /// Run the fixed-interval polling loop until Ctrl+C
    pub async fn run(&mut self) -> Result<()> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
        })
        .await
    }

    /// Run the polling loop until `stop` completes
    ///
    /// The stop future is armed once, before the first cycle, so a signal
    /// delivered while a cycle is mid-flight still ends the loop on the next
    /// select. Cycle errors are reported and absorbed; the next scheduled
    /// cycle is the only retry. On every exit the session flushes the packet
    /// log and closes the transport.
    pub async fn run_until(&mut self, stop: impl Future<Output = ()>) -> Result<()> {
        info!(
            ticker = %self.ticker,
            position = self.position,
            interval = ?self.poll_interval,
            "Starting trading loop (press Ctrl+C to stop)"
        );

        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(stop);

        loop {
            tokio::select! {
                _ = &mut stop => {
                    info!("Received shutdown signal");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.run_cycle().await {
                        error!(error = %e, "Cycle failed");
                    }
                }
            }
        }

        self.shutdown().await
    }

    /// Flush the packet log and close the transport
    async fn shutdown(&mut self) -> Result<()> {
        info!(
            position = self.position,
            log_file = %self.logger.path().display(),
            "Final position"
        );
        self.logger.flush()?;
        if let Some(transport) = self.transport.as_mut() {
            transport.close().await?;
        }
        Ok(())
    }
}
