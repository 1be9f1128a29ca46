//! # waveshare-epd
//!
//! Rust implementation of the Waveshare 4.3inch e-Paper UART module protocol.
//!
//! ## Features
//!
//! - Byte-exact frame encoding with XOR checksum
//! - Closed command catalog with argument validation
//! - Async/await API using Tokio over a serial port
//! - Reset and wake-up pulses through embedded-hal pins
//!
//! ## Quick Start
//!
//! ```no_run
//! use waveshare_epd::{Command, SerialTransport, Session};
//!
//! #[tokio::main]
//! async fn main() -> waveshare_epd::Result<()> {
//!     let mut paper = Session::new(SerialTransport::new("/dev/ttyAMA0"));
//!     paper.connect().await?;
//!     
//!     paper.handshake().await?;
//!     paper.send(&Command::set_pallet(None, None)?).await?;
//!     paper.send(&Command::display_text(10, 10, "Hello, World")?).await?;
//!     paper.trigger_refresh().await?;
//!     
//!     paper.close().await?;
//!     
//!     Ok(())
//! }
//! ```
//!
//! Text is sent as raw bytes and must already be in the module's character
//! set (GB2312, of which ASCII is a subset).

pub mod error;
pub mod pins;
pub mod session;

// Re-exports
pub use error::{Error, Result};
pub use pins::{GpioPins, PinController, PinLine};
pub use session::Session;

// Re-export protocol and transport types
pub use waveshare_epd_core::{
    frame, Color, Command, FontSize, Frame, Opcode, Palette, Point, Rotation, StorageMode,
};
pub use waveshare_epd_transport::{SerialTransport, Transport};
