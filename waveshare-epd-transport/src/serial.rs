//! Serial transport
//!
//! The module talks 8N1 at 115200 baud after power-up.

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use tokio::io::AsyncWriteExt;
use tokio_serial::{DataBits, Parity, SerialPort, SerialPortBuilderExt, SerialStream, StopBits};
use tracing::{debug, trace, warn};

use waveshare_epd_core::constants::DEFAULT_BAUD_RATE;

use crate::{
    error::*,
    io::{close_stream, read_with_deadline},
    Transport,
};

/// Serial transport for the e-Paper module
pub struct SerialTransport {
    path: String,
    baud_rate: u32,
    stream: Option<SerialStream>,
}

impl SerialTransport {
    /// Create new serial transport at the power-on baud rate
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            stream: None,
        }
    }
    
    /// Set baud rate used when opening the port
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Get configured baud rate
    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    /// Switch the host side to a new baud rate
    ///
    /// Call this after the module acknowledged a baud rate change. If the
    /// port is closed the rate is used on the next connect.
    pub fn set_baud_rate(&mut self, baud_rate: u32) -> Result<()> {
        if let Some(stream) = self.stream.as_mut() {
            stream.set_baud_rate(baud_rate)?;
        }

        debug!("Baud rate of {} set to {}", self.path, baud_rate);

        self.baud_rate = baud_rate;
        Ok(())
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn connect(&mut self) -> Result<()> {
        if self.is_connected() {
            return Err(Error::AlreadyConnected);
        }
        
        debug!("Opening {} at {} baud...", self.path, self.baud_rate);
        
        let stream = tokio_serial::new(&self.path, self.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .open_native_async()?;
        
        debug!("Opened {}", self.path);
        
        self.stream = Some(stream);
        Ok(())
    }
    
    async fn disconnect(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            debug!("Closing {}...", self.path);
            
            close_stream(&mut stream).await?;
        }
        
        Ok(())
    }
    
    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }
    
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;
        
        trace!("Sending {} bytes: {:02X?}", data.len(), &data[..data.len().min(32)]);
        
        stream.write_all(data).await?;
        stream.flush().await?;
        
        Ok(())
    }
    
    async fn receive(&mut self, max_size: usize, timeout: Duration) -> Result<BytesMut> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;
        
        read_with_deadline(stream, max_size, timeout).await
    }
    
    fn remote_addr(&self) -> String {
        format!("{}@{}", self.path, self.baud_rate)
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        if self.is_connected() {
            warn!("Serial transport dropped while still open");
        }
    }
}
