//! Serial implementation of the device transport

use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::{debug, info};

use crate::common::errors::Result;
use crate::common::traits::DeviceTransport;

/// Default window for the bounded reply read
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Serial link to the decision device
pub struct SerialTransport {
    port: SerialStream,
    read_timeout: Duration,
}

impl SerialTransport {
    /// Open the serial port and wait for the device to settle
    ///
    /// The settle delay gives the device time to come up after the port
    /// asserts DTR; the original hardware needs about 2 seconds.
    pub async fn connect(path: &str, baud_rate: u32, settle_delay: Duration) -> Result<Self> {
        let mut port = tokio_serial::new(path, baud_rate).open_native_async()?;
        #[cfg(unix)]
        port.set_exclusive(false)?;

        info!("Connected to device on {} at {} baud", path, baud_rate);
        tokio::time::sleep(settle_delay).await;

        Ok(Self {
            port,
            read_timeout: DEFAULT_READ_TIMEOUT,
        })
    }

    /// Override the bounded read window
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }
}

#[async_trait]
impl DeviceTransport for SerialTransport {
    async fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.port.write_all(frame).await?;
        self.port.flush().await?;
        Ok(())
    }

    async fn read_available(&mut self, max_len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; max_len];
        match tokio::time::timeout(self.read_timeout, self.port.read(&mut buf)).await {
            Ok(Ok(n)) => {
                buf.truncate(n);
                Ok(buf)
            }
            Ok(Err(e)) => Err(e.into()),
            // nothing arrived inside the window
            Err(_) => {
                debug!("No reply within {:?}", self.read_timeout);
                Ok(Vec::new())
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.port.shutdown().await?;
        info!("Serial connection closed");
        Ok(())
    }
}
