//! FPGA Trade Bridge - Main Entry Point
//!
//! Polls live bid/ask quotes, streams them to a hardware decision engine
//! over a serial link, and applies the device's trade decisions to a
//! position counter.

use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use fpga_trade_bridge::common::traits::DeviceTransport;
use fpga_trade_bridge::config::load_config;
use fpga_trade_bridge::logging::PacketLogger;
use fpga_trade_bridge::market::QuoteRestClient;
use fpga_trade_bridge::session::TradingSession;
use fpga_trade_bridge::transport::SerialTransport;

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Ticker symbol to poll (overrides config)
    #[arg(long)]
    ticker: Option<String>,

    /// Serial port device path (overrides config)
    #[arg(long)]
    port: Option<String>,

    /// Poll interval in milliseconds (overrides config)
    #[arg(long)]
    interval_ms: Option<u64>,

    /// CSV packet log destination (overrides config)
    #[arg(long)]
    log_file: Option<String>,

    /// Print each encoded frame as spaced hex
    #[arg(long)]
    print_hex: bool,

    /// Print each encoded frame as spaced binary
    #[arg(long)]
    print_binary: bool,

    /// Print each encoded frame as a SystemVerilog testbench stimulus
    #[arg(long)]
    print_testbench: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting FPGA trade bridge");
    info!("Configuration file: {}", args.config);

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let mut config = load_config(Some(&args.config))?;

    // Apply CLI overrides
    if let Some(ticker) = args.ticker {
        config.market.ticker = ticker;
    }
    if let Some(port) = args.port {
        config.serial.port = Some(port);
    }
    if let Some(interval) = args.interval_ms {
        config.session.poll_interval_ms = interval;
    }
    if let Some(log_file) = args.log_file {
        config.session.log_file = log_file;
    }
    config.display.print_hex |= args.print_hex;
    config.display.print_binary |= args.print_binary;
    config.display.print_testbench |= args.print_testbench;

    // Open the serial link; a missing or failing port means simulation mode,
    // never a startup abort
    let transport: Option<Box<dyn DeviceTransport>> = match config.serial.port.as_deref() {
        Some(port) => {
            let settle = Duration::from_millis(config.serial.settle_delay_ms);
            match SerialTransport::connect(port, config.serial.baud_rate, settle).await {
                Ok(serial) => Some(Box::new(serial)),
                Err(e) => {
                    warn!(error = %e, "Serial connection failed, running in simulation mode");
                    None
                }
            }
        }
        None => {
            warn!("No serial port configured, running in simulation mode");
            None
        }
    };

    let quotes = QuoteRestClient::with_timeout(
        &config.market.quote_url,
        Duration::from_secs(config.market.request_timeout_seconds),
    )?;

    let logger = PacketLogger::create(&config.session.log_file)?;
    info!("Logging packets to {}", config.session.log_file);

    let mut session = TradingSession::new(
        config.market.ticker.clone(),
        Box::new(quotes),
        transport,
        logger,
        config.display,
        Duration::from_millis(config.serial.response_delay_ms),
        Duration::from_millis(config.session.poll_interval_ms),
    );

    session.run().await?;

    Ok(())
}
