//! Device session
//!
//! A [`Session`] owns one transport and, optionally, the reset and wake-up
//! lines. It does not track device state: handshaking, sleep and readiness
//! are the caller's business.

use std::time::Duration;

use bytes::{Bytes, BytesMut};
use tracing::{debug, info, trace};

use waveshare_epd_core::{
    constants::{DEFAULT_READ_SIZE, DEFAULT_READ_TIMEOUT},
    frame, Command,
};
use waveshare_epd_transport::Transport;

use crate::error::{Error, Result};
use crate::pins::{PinController, PinLine};

/// Size of the module's "OK" reply
const ACK_SIZE: usize = 2;

/// Session with an e-Paper module
///
/// # Examples
///
/// ```no_run
/// use waveshare_epd::{Command, SerialTransport, Session};
///
/// #[tokio::main]
/// async fn main() -> waveshare_epd::Result<()> {
///     let mut paper = Session::new(SerialTransport::new("/dev/ttyAMA0"));
///     paper.connect().await?;
///
///     let reply = paper.handshake().await?;
///     println!("Handshake: {:?}", reply);
///
///     paper.send(&Command::display_text(10, 10, "Hello, World")?).await?;
///     paper.trigger_refresh().await?;
///
///     paper.close().await?;
///     Ok(())
/// }
/// ```
pub struct Session {
    transport: Box<dyn Transport>,
    pins: Option<Box<dyn PinController>>,
    auto_refresh: bool,
    read_size: usize,
    read_timeout: Duration,
}

impl Session {
    /// Create a session over `transport`
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::from_boxed(Box::new(transport))
    }

    /// Create a session over an already boxed transport
    pub fn from_boxed(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            pins: None,
            auto_refresh: false,
            read_size: DEFAULT_READ_SIZE,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    /// Refresh the display after every sent command
    pub fn with_auto_refresh(mut self, auto_refresh: bool) -> Self {
        self.auto_refresh = auto_refresh;
        self
    }

    /// Attach the reset and wake-up lines
    pub fn with_pins(mut self, pins: impl PinController + 'static) -> Self {
        self.pins = Some(Box::new(pins));
        self
    }

    /// Set the size used by [`Session::read_default`]
    pub fn with_read_size(mut self, size: usize) -> Self {
        self.read_size = size;
        self
    }

    /// Set the timeout used by [`Session::read_default`] and friends
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Check if auto refresh is on
    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    /// Turn auto refresh on or off
    pub fn set_auto_refresh(&mut self, auto_refresh: bool) {
        self.auto_refresh = auto_refresh;
    }

    /// Check if the transport is open
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Open the transport
    pub async fn connect(&mut self) -> Result<()> {
        info!("Connecting to {}...", self.transport.remote_addr());

        self.transport.connect().await?;

        info!("Connected to {}", self.transport.remote_addr());
        Ok(())
    }

    /// Close the transport
    pub async fn close(&mut self) -> Result<()> {
        if !self.transport.is_connected() {
            return Ok(());
        }

        info!("Closing {}...", self.transport.remote_addr());

        self.transport.disconnect().await?;
        Ok(())
    }

    /// Send a command
    ///
    /// Does not wait for a reply. With auto refresh on, a refresh frame
    /// follows every command.
    ///
    /// # Errors
    ///
    /// Argument and encoding errors are reported before anything is written.
    /// Transport failures are passed through unchanged.
    pub async fn send(&mut self, command: &Command) -> Result<()> {
        let data = command.encode()?;
        let refresh = if self.auto_refresh {
            Some(Command::RefreshAndUpdate.encode()?)
        } else {
            None
        };

        debug!("Sending {}", command);
        self.write(&data).await?;

        if let Some(refresh) = refresh {
            debug!("Auto refresh");
            self.write(&refresh).await?;
        }

        Ok(())
    }

    /// Read up to `size` bytes, waiting at most `timeout`
    ///
    /// Partial reads are normal. An empty result means the module sent
    /// nothing in time.
    pub async fn read(&mut self, size: usize, timeout: Duration) -> Result<Bytes> {
        let buf = self.transport.receive(size, timeout).await?;

        trace!("Read {} bytes: {}", buf.len(), frame::describe(&buf));

        Ok(buf.freeze())
    }

    /// Read with the configured size and timeout
    pub async fn read_default(&mut self) -> Result<Bytes> {
        self.read(self.read_size, self.read_timeout).await
    }

    /// Refresh the display with the current frame buffer
    pub async fn trigger_refresh(&mut self) -> Result<()> {
        debug!("Refreshing display");
        let data = Command::RefreshAndUpdate.encode()?;
        self.write(&data).await
    }

    /// Refresh the display (same as [`Session::trigger_refresh`])
    pub async fn update(&mut self) -> Result<()> {
        self.trigger_refresh().await
    }

    /// Put the module to sleep
    ///
    /// It ignores all commands until [`Session::wake`] is called.
    pub async fn sleep(&mut self) -> Result<()> {
        debug!("Entering sleep mode");
        let data = Command::SleepMode.encode()?;
        self.write(&data).await
    }

    /// Send a handshake and return the raw reply
    ///
    /// A ready module answers "OK"; an empty reply means it did not answer
    /// within the configured timeout.
    pub async fn handshake(&mut self) -> Result<Bytes> {
        self.send(&Command::Handshake).await?;
        self.read(ACK_SIZE, self.read_timeout).await
    }

    /// Read until the module has nothing more to say
    ///
    /// Returns everything drained. Each read waits up to the configured
    /// timeout, so this returns one timeout after the last byte arrived.
    pub async fn wait_until_idle(&mut self) -> Result<Bytes> {
        let mut drained = BytesMut::new();

        loop {
            let chunk = self.read_default().await?;
            if chunk.is_empty() {
                break;
            }
            drained.extend_from_slice(&chunk);
        }

        debug!("Module idle after {} bytes", drained.len());

        Ok(drained.freeze())
    }

    /// Pulse the reset line
    pub fn reset(&mut self) -> Result<()> {
        debug!("Pulsing reset line");
        self.pulse(PinLine::Reset)
    }

    /// Pulse the wake-up line
    ///
    /// Only meaningful after [`Session::sleep`].
    pub fn wake(&mut self) -> Result<()> {
        debug!("Pulsing wake line");
        self.pulse(PinLine::Wake)
    }

    fn pulse(&mut self, line: PinLine) -> Result<()> {
        let pins = self.pins.as_mut().ok_or(Error::NoPinController(line))?;
        pins.pulse(line)
    }

    async fn write(&mut self, data: &[u8]) -> Result<()> {
        trace!("Writing frame: {}", frame::describe(data));
        self.transport.send(data).await?;
        Ok(())
    }
}
