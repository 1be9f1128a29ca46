//! Protocol constants

use std::time::Duration;

/// Frame header byte
pub const FRAME_HEADER: u8 = 0xA5;

/// Frame footer (fixed 4-byte trailer before the checksum)
pub const FRAME_FOOTER: [u8; 4] = [0xCC, 0x33, 0xC3, 0x3C];

/// Header field size
pub const HEADER_SIZE: usize = 1;

/// Length field size (big-endian u16)
pub const LENGTH_FIELD_SIZE: usize = 2;

/// Opcode field size
pub const OPCODE_SIZE: usize = 1;

/// Footer size
pub const FOOTER_SIZE: usize = FRAME_FOOTER.len();

/// Checksum field size
pub const CHECKSUM_SIZE: usize = 1;

/// Bytes every frame carries regardless of payload
pub const FRAME_OVERHEAD: usize =
    HEADER_SIZE + LENGTH_FIELD_SIZE + OPCODE_SIZE + FOOTER_SIZE + CHECKSUM_SIZE;

/// Largest frame the length field can describe
pub const MAX_FRAME_SIZE: usize = u16::MAX as usize;

/// Largest payload that still fits the length field
pub const MAX_PAYLOAD_SIZE: usize = MAX_FRAME_SIZE - FRAME_OVERHEAD;

/// Power-on baud rate of the module
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default number of bytes requested per read
pub const DEFAULT_READ_SIZE: usize = 100;

/// Default read timeout
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);
