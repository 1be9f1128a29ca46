//! Frame checksum
//!
//! The module expects the last byte of every frame to be the XOR of all
//! bytes from the header through the footer.

use tracing::trace;

/// Calculate the XOR checksum of `data`
///
/// # Examples
///
/// ```
/// use waveshare_epd_core::checksum;
///
/// let checksum = checksum::calculate(&[0xA5, 0x00, 0x09, 0x00, 0xCC, 0x33, 0xC3, 0x3C]);
/// assert_eq!(checksum, 0xAC);
/// ```
pub fn calculate(data: &[u8]) -> u8 {
    let checksum = data.iter().fold(0u8, |acc, byte| acc ^ byte);

    trace!(
        len = data.len(),
        checksum = format!("0x{:02X}", checksum),
        "Calculated checksum"
    );

    checksum
}

/// Verify that the last byte of `frame` is the checksum of the rest
///
/// Returns `false` for an empty buffer.
pub fn verify(frame: &[u8]) -> bool {
    match frame.split_last() {
        Some((last, body)) => calculate(body) == *last,
        None => false,
    }
}
