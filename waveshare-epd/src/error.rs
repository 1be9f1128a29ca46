//! High-level error types

use crate::pins::PinLine;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] waveshare_epd_core::Error),
    
    #[error("Transport error: {0}")]
    Transport(#[from] waveshare_epd_transport::Error),
    
    #[error("Failed to drive {line} line: {reason}")]
    Pin {
        line: PinLine,
        reason: String,
    },
    
    #[error("No pin controller configured for {0} line")]
    NoPinController(PinLine),
}

impl Error {
    /// Check if the caller supplied an invalid argument
    pub fn is_argument_error(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_argument_error())
    }

    /// Check if a payload did not fit one frame
    pub fn is_encoding_error(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_encoding_error())
    }

    /// Check if the underlying channel failed
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
