//! Packet log - append-only CSV record of every encoded frame

use chrono::Local;
use rust_decimal::Decimal;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::common::errors::Result;
use crate::common::types::Quote;
use crate::protocol::format_packet_hex;

/// Fixed CSV header row
pub const CSV_HEADER: &str = "Timestamp,Ticker,Ask,Bid,Position,Unix Time,Hex Packet";

/// One CSV row: the cycle's quote, position, and encoded frame
#[derive(Debug, Clone, PartialEq)]
pub struct PacketRecord {
    /// Local wall-clock time the row was created
    pub logged_at: String,
    pub ticker: String,
    pub ask: Decimal,
    pub bid: Decimal,
    pub position: i32,
    pub unix_time: u64,
    /// Encoded frame as spaced lowercase hex
    pub hex_packet: String,
}

impl PacketRecord {
    /// Build a record for the current wall-clock time
    pub fn now(quote: &Quote, position: i32, unix_time: u64, packet: &[u8]) -> Self {
        Self {
            logged_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            ticker: quote.ticker.clone(),
            ask: quote.ask,
            bid: quote.bid,
            position,
            unix_time,
            hex_packet: format_packet_hex(packet),
        }
    }

    /// Render the record as one CSV line (no trailing newline)
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},${:.2},${:.2},{},{},{}",
            self.logged_at,
            self.ticker,
            self.ask,
            self.bid,
            self.position,
            self.unix_time,
            self.hex_packet
        )
    }
}

/// Append-only CSV sink for packet records
///
/// Every row is flushed as it is written so an interrupt never loses logged
/// cycles.
pub struct PacketLogger {
    path: PathBuf,
    file: File,
}

impl PacketLogger {
    /// Create the log file and write the header row
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        writeln!(file, "{}", CSV_HEADER)?;
        file.flush()?;

        Ok(Self { path, file })
    }

    /// Append one record
    pub fn append(&mut self, record: &PacketRecord) -> Result<()> {
        writeln!(self.file, "{}", record.to_csv_line())?;
        self.file.flush()?;
        Ok(())
    }

    /// Flush pending rows (the shutdown path calls this)
    pub fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[test]
    fn test_logger_writes_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("packets.csv");

        let mut logger = PacketLogger::create(&path).unwrap();
        let quote = Quote::new("AAPL", dec!(150.25), dec!(150.10));
        let record = PacketRecord::now(&quote, -3, 1_700_000_000, &[0xAA, 0x41]);
        logger.append(&record).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));

        let row = lines.next().unwrap();
        assert!(row.ends_with(",AAPL,$150.25,$150.10,-3,1700000000,aa 41"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_line_formats_currency_with_two_decimals() {
        let quote = Quote::new("F", dec!(12.5), dec!(12));
        let record = PacketRecord::now(&quote, 0, 0, &[0x00]);
        let line = record.to_csv_line();
        assert!(line.contains(",$12.50,$12.00,"));
    }
}
