//! Transport layer for the e-Paper UART module
//!
//! Provides serial communication with the module.

pub mod error;
pub mod serial;

mod io;

pub use error::{Error, Result};
pub use serial::SerialTransport;

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;

/// Transport trait for different communication methods
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open the channel
    async fn connect(&mut self) -> Result<()>;
    
    /// Close the channel
    async fn disconnect(&mut self) -> Result<()>;
    
    /// Check if connected
    fn is_connected(&self) -> bool;
    
    /// Send raw bytes
    async fn send(&mut self, data: &[u8]) -> Result<()>;
    
    /// Receive up to `max_size` bytes
    ///
    /// Returns whatever arrived before `timeout` elapsed or the buffer
    /// filled. An empty buffer means nothing arrived in time, which is not an
    /// error.
    async fn receive(&mut self, max_size: usize, timeout: Duration) -> Result<BytesMut>;
    
    /// Get a description of the remote end
    fn remote_addr(&self) -> String;
}
