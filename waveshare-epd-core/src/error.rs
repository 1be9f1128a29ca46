//! Error types for waveshare-epd-core



/// Result type alias for frame and command operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Caller supplied an out-of-range or invalid argument
    #[error("Invalid argument `{field}` = {value}: {reason}")]
    InvalidArgument {
        field: &'static str,
        value: i64,
        reason: &'static str,
    },

    /// Payload would overflow the 16-bit length field
    #[error("Payload too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge {
        size: usize,
        max: usize,
    },

    /// Unknown opcode byte
    #[error("Unknown opcode: 0x{0:02X}")]
    UnknownOpcode(u8),
}

impl Error {
    /// Shorthand for building an argument error
    pub(crate) fn argument(field: &'static str, value: i64, reason: &'static str) -> Self {
        Self::InvalidArgument { field, value, reason }
    }

    /// Check if this is an argument validation failure
    pub fn is_argument_error(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::UnknownOpcode(_))
    }

    /// Check if this is an encoding failure
    pub fn is_encoding_error(&self) -> bool {
        matches!(self, Self::PayloadTooLarge { .. })
    }

    /// Name of the offending field, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument { field, .. } => Some(field),
            _ => None,
        }
    }
}
