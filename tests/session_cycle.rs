//! Integration tests for the trading session
//!
//! Drive full poll cycles against scripted collaborators and check the
//! position counter, the written frames, and the CSV packet log.

mod common;

use common::{inbound_frame, sample_quote, FixedQuoteSource, ScriptedTransport};
use fpga_trade_bridge::common::types::{OrderType, TradeAction};
use fpga_trade_bridge::config::DisplayOptions;
use fpga_trade_bridge::logging::{PacketLogger, CSV_HEADER};
use fpga_trade_bridge::protocol::{xor_checksum, OUTBOUND_MARKER, OUTBOUND_PACKET_LEN};
use fpga_trade_bridge::session::{CycleOutcome, TradingSession};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use std::time::Duration;
use tempfile::TempDir;

fn build_session(
    quote: Option<fpga_trade_bridge::common::types::Quote>,
    transport: Option<ScriptedTransport>,
    dir: &TempDir,
) -> TradingSession {
    TradingSession::new(
        "AAPL",
        Box::new(FixedQuoteSource::new(quote)),
        transport.map(|t| Box::new(t) as _),
        PacketLogger::create(dir.path().join("packets.csv")).unwrap(),
        DisplayOptions::default(),
        Duration::ZERO,
        Duration::from_millis(10),
    )
}

fn read_log(dir: &TempDir) -> String {
    std::fs::read_to_string(dir.path().join("packets.csv")).unwrap()
}

#[tokio::test]
async fn buy_then_sell_cycles_move_the_position() {
    let dir = TempDir::new().unwrap();
    let (transport, probe) = ScriptedTransport::new(vec![
        inbound_frame(b"AAPL", 1, 10, 1, 10_000, 1_700_000_000),
        inbound_frame(b"AAPL", 2, 4, 0, 0, 1_700_000_002),
    ]);
    let mut session = build_session(Some(sample_quote()), Some(transport), &dir);

    let first = session.run_cycle().await.unwrap();
    match first {
        CycleOutcome::Decision(decision) => {
            assert_eq!(decision.action, TradeAction::Buy);
            assert_eq!(decision.quantity, 10);
            assert_eq!(decision.order_type, OrderType::Limit);
            assert_eq!(decision.limit_price, dec!(100.00));
        }
        other => panic!("expected a buy decision, got {:?}", other),
    }
    assert_eq!(session.position(), 10);

    let second = session.run_cycle().await.unwrap();
    assert!(matches!(second, CycleOutcome::Decision(_)));
    assert_eq!(session.position(), 6);

    // both outbound frames were written, well-formed, and carry the position
    // the session held at encode time
    let written = probe.written.lock().unwrap();
    assert_eq!(written.len(), 2);
    for frame in written.iter() {
        assert_eq!(frame.len(), OUTBOUND_PACKET_LEN);
        assert_eq!(frame[0], OUTBOUND_MARKER);
        assert_eq!(frame[17], xor_checksum(&frame[1..17]));
    }
    assert_eq!(&written[0][15..17], &[0x00, 0x00]);
    assert_eq!(&written[1][15..17], &10i16.to_be_bytes());
}

#[tokio::test]
async fn silent_device_leaves_position_untouched() {
    let dir = TempDir::new().unwrap();
    let (transport, probe) = ScriptedTransport::new(vec![]);
    let mut session = build_session(Some(sample_quote()), Some(transport), &dir);

    let outcome = session.run_cycle().await.unwrap();
    assert_eq!(outcome, CycleOutcome::NoDecision);
    assert_eq!(session.position(), 0);
    assert_eq!(probe.written.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn corrupt_marker_reply_is_skipped() {
    let dir = TempDir::new().unwrap();
    let mut reply = inbound_frame(b"AAPL", 1, 10, 0, 0, 0);
    reply[0] = 0xAA;
    let (transport, _probe) = ScriptedTransport::new(vec![reply]);
    let mut session = build_session(Some(sample_quote()), Some(transport), &dir);

    let outcome = session.run_cycle().await.unwrap();
    assert_eq!(outcome, CycleOutcome::NoDecision);
    assert_eq!(session.position(), 0);
}

#[tokio::test]
async fn offline_session_logs_quotes_without_a_device() {
    let dir = TempDir::new().unwrap();
    let mut session = build_session(Some(sample_quote()), None, &dir);

    assert_eq!(session.run_cycle().await.unwrap(), CycleOutcome::Offline);
    assert_eq!(session.run_cycle().await.unwrap(), CycleOutcome::Offline);

    let log = read_log(&dir);
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines.len(), 3);
    for row in &lines[1..] {
        assert!(row.contains(",AAPL,$150.25,$150.10,0,"), "row: {}", row);
        // hex column: 18 spaced byte pairs starting with the outbound marker
        let hex = row.rsplit(',').next().unwrap();
        assert!(hex.starts_with("aa "));
        assert_eq!(hex.split(' ').count(), OUTBOUND_PACKET_LEN);
    }
}

#[tokio::test]
async fn quoteless_cycle_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let (transport, probe) = ScriptedTransport::new(vec![]);
    let mut session = build_session(None, Some(transport), &dir);

    let outcome = session.run_cycle().await.unwrap();
    assert_eq!(outcome, CycleOutcome::NoQuote);
    assert!(probe.written.lock().unwrap().is_empty());
    assert_eq!(read_log(&dir).lines().count(), 1);
}

#[tokio::test]
async fn stop_signal_flushes_log_and_closes_transport() {
    let dir = TempDir::new().unwrap();
    let (transport, probe) =
        ScriptedTransport::new(vec![inbound_frame(b"AAPL", 1, 10, 0, 0, 0)]);
    let mut session = build_session(Some(sample_quote()), Some(transport), &dir);

    // the first interval tick fires immediately, so at least one full cycle
    // runs before the stop future ends the loop
    session
        .run_until(tokio::time::sleep(Duration::from_millis(50)))
        .await
        .unwrap();

    assert!(*probe.closed.lock().unwrap(), "transport was not closed");
    assert!(!probe.written.lock().unwrap().is_empty());
    assert_eq!(session.position(), 10);

    let log = read_log(&dir);
    assert!(log.lines().count() >= 2, "log rows not flushed: {:?}", log);
    assert_eq!(log.lines().next(), Some(CSV_HEADER));
}

#[tokio::test]
async fn hold_and_unknown_decisions_do_not_trade() {
    let dir = TempDir::new().unwrap();
    let (transport, _probe) = ScriptedTransport::new(vec![
        inbound_frame(b"AAPL", 0, 500, 0, 0, 0),
        inbound_frame(b"AAPL", 9, 500, 0, 0, 0),
    ]);
    let mut session = build_session(Some(sample_quote()), Some(transport), &dir);

    for _ in 0..2 {
        let outcome = session.run_cycle().await.unwrap();
        assert!(matches!(outcome, CycleOutcome::Decision(_)));
    }
    assert_eq!(session.position(), 0);
}
