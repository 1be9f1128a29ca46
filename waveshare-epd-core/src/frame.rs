//! Frame structure and encoding

use byteorder::{BigEndian, ByteOrder};
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use tracing::trace;

use crate::{
    checksum,
    constants::{FRAME_FOOTER, FRAME_HEADER, FRAME_OVERHEAD, HEADER_SIZE, LENGTH_FIELD_SIZE, MAX_PAYLOAD_SIZE},
    error::{Error, Result},
    opcode::Opcode,
};

/// Encode a raw opcode and payload into a complete frame
///
/// # Frame Structure
///
/// ```text
/// ┌────────┬────────┬────────┬─────────┬─────────────┬──────────┐
/// │ Header │ Length │ Opcode │ Payload │   Footer    │ Checksum │
/// │  0xA5  │ 2 (BE) │ 1 byte │ N bytes │ CC 33 C3 3C │  1 byte  │
/// └────────┴────────┴────────┴─────────┴─────────────┴──────────┘
/// ```
///
/// The length field holds the size of the whole frame, header and checksum
/// included. The checksum is the XOR of every byte before it.
///
/// # Errors
///
/// Returns [`Error::PayloadTooLarge`] if the frame would not fit the 16-bit
/// length field.
///
/// # Examples
///
/// ```
/// use waveshare_epd_core::frame;
///
/// let bytes = frame::encode(0x00, &[]).unwrap();
/// assert_eq!(frame::describe(&bytes), "A5 00 09 00 CC 33 C3 3C AC");
/// ```
pub fn encode(opcode: u8, payload: &[u8]) -> Result<BytesMut> {
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(Error::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD_SIZE,
        });
    }

    let total_size = FRAME_OVERHEAD + payload.len();
    let mut buf = BytesMut::with_capacity(total_size);

    buf.put_u8(FRAME_HEADER);
    buf.put_u16(total_size as u16);
    buf.put_u8(opcode);
    buf.put_slice(payload);
    buf.put_slice(&FRAME_FOOTER);

    let checksum = checksum::calculate(&buf);
    buf.put_u8(checksum);

    trace!(opcode = format!("0x{:02X}", opcode), frame = %describe(&buf), "Encoded frame");

    Ok(buf)
}

/// Render bytes as space-separated uppercase hex pairs
///
/// ```
/// use waveshare_epd_core::frame::describe;
///
/// assert_eq!(describe(&[0xA5, 0x00, 0x0d]), "A5 00 0D");
/// ```
pub fn describe(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| hex::encode_upper([*b]))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Read the length field of an encoded frame
///
/// Returns `None` if the buffer is too short to hold one.
pub fn declared_length(frame: &[u8]) -> Option<u16> {
    let start = HEADER_SIZE;
    let end = start + LENGTH_FIELD_SIZE;
    frame.get(start..end).map(BigEndian::read_u16)
}

/// One request frame
///
/// # Examples
///
/// ```
/// use waveshare_epd_core::{Frame, Opcode};
///
/// let frame = Frame::new(Opcode::RefreshAndUpdate);
/// let encoded = frame.encode().unwrap();
/// assert_eq!(encoded.len(), 9);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    /// Operation code
    pub opcode: Opcode,

    /// Operation-specific argument bytes
    pub payload: Bytes,
}

impl Frame {
    /// Create a frame with empty payload
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            payload: Bytes::new(),
        }
    }

    /// Create a frame with payload
    pub fn with_payload(opcode: Opcode, payload: impl Into<Bytes>) -> Self {
        Self {
            opcode,
            payload: payload.into(),
        }
    }

    /// Encode frame to bytes
    ///
    /// See [`encode`] for the layout.
    pub fn encode(&self) -> Result<BytesMut> {
        encode(self.opcode.into(), &self.payload)
    }

    /// Get total encoded size
    pub fn size(&self) -> usize {
        FRAME_OVERHEAD + self.payload.len()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("opcode", &self.opcode)
            .field("payload", &describe(&self.payload))
            .field("size", &self.size())
            .finish()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame[{}](len={})", self.opcode, self.payload.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_frame_empty() {
        let frame = Frame::new(Opcode::Handshake);
        let encoded = frame.encode().unwrap();

        assert_eq!(encoded.len(), FRAME_OVERHEAD);
        assert_eq!(describe(&encoded), "A5 00 09 00 CC 33 C3 3C AC");
    }

    #[test]
    fn test_frame_with_payload() {
        let frame = Frame::with_payload(Opcode::SetBaudrate, vec![0x00, 0x00, 0x25, 0x80]);
        let encoded = frame.encode().unwrap();

        assert_eq!(frame.size(), encoded.len());
        assert_eq!(describe(&encoded), "A5 00 0D 01 00 00 25 80 CC 33 C3 3C 0C");
    }

    #[test]
    fn test_frame_layout() {
        let encoded = encode(0x30, &[1, 2, 3]).unwrap();

        assert_eq!(encoded[0], FRAME_HEADER);
        assert_eq!(declared_length(&encoded), Some(12));
        assert_eq!(encoded[3], 0x30);
        assert_eq!(&encoded[4..7], &[1, 2, 3]);
        assert_eq!(&encoded[7..11], &FRAME_FOOTER);
        assert!(checksum::verify(&encoded));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let a = encode(0x0A, &[]).unwrap();
        let b = encode(0x0A, &[]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_max_payload_accepted() {
        let payload = vec![0x11; MAX_PAYLOAD_SIZE];
        let encoded = encode(0x30, &payload).unwrap();

        assert_eq!(encoded.len(), u16::MAX as usize);
        assert_eq!(declared_length(&encoded), Some(u16::MAX));
    }

    #[test]
    fn test_payload_too_large() {
        let payload = vec![0x11; MAX_PAYLOAD_SIZE + 1];
        let err = encode(0x30, &payload).unwrap_err();

        assert_eq!(
            err,
            Error::PayloadTooLarge {
                size: MAX_PAYLOAD_SIZE + 1,
                max: MAX_PAYLOAD_SIZE,
            }
        );
        assert!(err.is_encoding_error());
    }

    #[test]
    fn test_describe_is_case_normalizable() {
        let encoded = encode(0x0C, &[]).unwrap();
        let rendered = describe(&encoded);

        assert_eq!(rendered, rendered.to_uppercase());
        assert_eq!(rendered.to_lowercase(), "a5 00 09 0c cc 33 c3 3c a0");
    }

    #[test]
    fn test_describe_empty() {
        assert_eq!(describe(&[]), "");
    }

    #[test]
    fn test_declared_length_short_buffer() {
        assert_eq!(declared_length(&[0xA5, 0x00]), None);
    }

    #[test]
    fn test_frame_display() {
        let frame = Frame::with_payload(Opcode::SetPallet, vec![0x00, 0x03]);
        assert_eq!(frame.to_string(), "Frame[SET_PALLET(0x10)](len=2)");
    }

    proptest! {
        #[test]
        fn checksum_is_xor_of_preceding_bytes(
            opcode in any::<u8>(),
            payload in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let encoded = encode(opcode, &payload).unwrap();
            let (last, body) = encoded.split_last().unwrap();
            prop_assert_eq!(checksum::calculate(body), *last);
        }

        #[test]
        fn length_field_matches_frame_size(len in 0usize..60_000) {
            let payload = vec![0x5A; len];
            let encoded = encode(0x30, &payload).unwrap();

            prop_assert_eq!(encoded.len(), FRAME_OVERHEAD + len);
            prop_assert_eq!(declared_length(&encoded), Some((FRAME_OVERHEAD + len) as u16));
        }
    }
}
