//! Command catalog
//!
//! Every operation the module understands is a variant of [`Command`]. A
//! command knows its opcode and how its arguments map to payload bytes; the
//! framing itself lives in [`crate::frame`].

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

use crate::{
    error::{Error, Result},
    frame::{self, Frame},
    opcode::Opcode,
    params::{FontSize, Palette, Rotation, StorageMode},
};

/// A point on the panel, in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Build a point from unchecked coordinates
    pub fn checked(x: i64, y: i64) -> Result<Self> {
        Ok(Self {
            x: to_u16("x", x)?,
            y: to_u16("y", y)?,
        })
    }

    fn put(self, buf: &mut BytesMut) {
        buf.put_u16(self.x);
        buf.put_u16(self.y);
    }
}

/// Device operations
///
/// Variants can be built directly from typed values, or through the checked
/// constructors which validate raw integers and report the offending field.
///
/// # Examples
///
/// ```
/// use waveshare_epd_core::{frame, Command};
///
/// let command = Command::set_baudrate(9600).unwrap();
/// let bytes = command.encode().unwrap();
/// assert_eq!(frame::describe(&bytes), "A5 00 0D 01 00 00 25 80 CC 33 C3 3C 0C");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Returns "OK" once the module is ready
    Handshake,
    SetBaudrate { rate: u32 },
    ReadBaudrate,
    ReadStorageMode,
    SetStorageMode { mode: StorageMode },
    /// Only a rising edge on the wake-up line leaves sleep mode
    SleepMode,
    RefreshAndUpdate,
    ReadRotation,
    SetRotation { rotation: Rotation },
    /// Copy font libraries from the TF card into NandFlash
    ImportFontLibrary,
    /// Copy images from the TF card into NandFlash
    ImportImage,
    SetPallet { palette: Palette },
    GetPallet,
    SetEnFontSize { size: FontSize },
    SetZhFontSize { size: FontSize },
    DrawCircle { center: Point, radius: u16 },
    FillCircle { center: Point, radius: u16 },
    DrawTriangle { points: [Point; 3] },
    FillTriangle { points: [Point; 3] },
    ClearScreen,
    /// Text must already be in the module's character set (GB2312)
    DisplayText { origin: Point, text: Bytes },
    /// Filename of a bitmap stored on the module
    DisplayImage { origin: Point, filename: Bytes },
}

impl Command {
    /// Set the serial baud rate
    ///
    /// The module answers at the new rate, so the host must switch too.
    pub fn set_baudrate(rate: i64) -> Result<Self> {
        let rate = u32::try_from(rate)
            .map_err(|_| Error::argument("rate", rate, "must fit in 32 bits"))?;
        Ok(Self::SetBaudrate { rate })
    }

    /// Select the storage area from its raw value (0 internal, 1 external)
    pub fn set_storage_mode(mode: Option<u8>) -> Result<Self> {
        let mode = mode.map(StorageMode::try_from).transpose()?.unwrap_or_default();
        Ok(Self::SetStorageMode { mode })
    }

    /// Set the display direction from its raw value
    pub fn set_rotation(rotation: Option<u8>) -> Result<Self> {
        let rotation = rotation.map(Rotation::try_from).transpose()?.unwrap_or_default();
        Ok(Self::SetRotation { rotation })
    }

    /// Set foreground and background colors from raw values
    ///
    /// Omitted colors default to black on white.
    pub fn set_pallet(foreground: Option<u8>, background: Option<u8>) -> Result<Self> {
        Ok(Self::SetPallet {
            palette: Palette::from_raw(foreground, background)?,
        })
    }

    /// Set the English font size from its raw value (1, 2 or 3)
    pub fn set_en_font_size(size: Option<u8>) -> Result<Self> {
        Ok(Self::SetEnFontSize {
            size: font_size(size)?,
        })
    }

    /// Set the Chinese font size from its raw value (1, 2 or 3)
    pub fn set_zh_font_size(size: Option<u8>) -> Result<Self> {
        Ok(Self::SetZhFontSize {
            size: font_size(size)?,
        })
    }

    pub fn draw_circle(x: i64, y: i64, radius: i64) -> Result<Self> {
        Ok(Self::DrawCircle {
            center: Point::checked(x, y)?,
            radius: to_u16("radius", radius)?,
        })
    }

    pub fn fill_circle(x: i64, y: i64, radius: i64) -> Result<Self> {
        Ok(Self::FillCircle {
            center: Point::checked(x, y)?,
            radius: to_u16("radius", radius)?,
        })
    }

    pub fn draw_triangle(x0: i64, y0: i64, x1: i64, y1: i64, x2: i64, y2: i64) -> Result<Self> {
        Ok(Self::DrawTriangle {
            points: triangle([x0, y0, x1, y1, x2, y2])?,
        })
    }

    pub fn fill_triangle(x0: i64, y0: i64, x1: i64, y1: i64, x2: i64, y2: i64) -> Result<Self> {
        Ok(Self::FillTriangle {
            points: triangle([x0, y0, x1, y1, x2, y2])?,
        })
    }

    /// Display pre-encoded text at a position
    ///
    /// No check is made against the panel extent.
    pub fn display_text(x: i64, y: i64, text: impl Into<Bytes>) -> Result<Self> {
        let text = text.into();
        reject_nul("text", &text)?;
        Ok(Self::DisplayText {
            origin: Point::checked(x, y)?,
            text,
        })
    }

    /// Display a stored bitmap at a position
    pub fn display_image(x: i64, y: i64, filename: impl Into<Bytes>) -> Result<Self> {
        let filename = filename.into();
        if filename.is_empty() {
            return Err(Error::argument("filename", 0, "must not be empty"));
        }
        reject_nul("filename", &filename)?;
        Ok(Self::DisplayImage {
            origin: Point::checked(x, y)?,
            filename,
        })
    }

    /// Get the opcode of this operation
    pub fn opcode(&self) -> Opcode {
        match self {
            Self::Handshake => Opcode::Handshake,
            Self::SetBaudrate { .. } => Opcode::SetBaudrate,
            Self::ReadBaudrate => Opcode::ReadBaudrate,
            Self::ReadStorageMode => Opcode::ReadStorageMode,
            Self::SetStorageMode { .. } => Opcode::SetStorageMode,
            Self::SleepMode => Opcode::SleepMode,
            Self::RefreshAndUpdate => Opcode::RefreshAndUpdate,
            Self::ReadRotation => Opcode::ReadRotation,
            Self::SetRotation { .. } => Opcode::SetRotation,
            Self::ImportFontLibrary => Opcode::ImportFontLibrary,
            Self::ImportImage => Opcode::ImportImage,
            Self::SetPallet { .. } => Opcode::SetPallet,
            Self::GetPallet => Opcode::GetPallet,
            Self::SetEnFontSize { .. } => Opcode::SetEnFontSize,
            Self::SetZhFontSize { .. } => Opcode::SetZhFontSize,
            Self::DrawCircle { .. } => Opcode::DrawCircle,
            Self::FillCircle { .. } => Opcode::FillCircle,
            Self::DrawTriangle { .. } => Opcode::DrawTriangle,
            Self::FillTriangle { .. } => Opcode::FillTriangle,
            Self::ClearScreen => Opcode::ClearScreen,
            Self::DisplayText { .. } => Opcode::DisplayText,
            Self::DisplayImage { .. } => Opcode::DisplayImage,
        }
    }

    /// Build the payload bytes for this operation
    pub fn payload(&self) -> Bytes {
        let mut buf = BytesMut::new();

        match self {
            Self::Handshake
            | Self::ReadBaudrate
            | Self::ReadStorageMode
            | Self::SleepMode
            | Self::RefreshAndUpdate
            | Self::ReadRotation
            | Self::ImportFontLibrary
            | Self::ImportImage
            | Self::GetPallet
            | Self::ClearScreen => {}
            Self::SetBaudrate { rate } => buf.put_u32(*rate),
            Self::SetStorageMode { mode } => buf.put_u8(*mode as u8),
            Self::SetRotation { rotation } => buf.put_u8(*rotation as u8),
            Self::SetPallet { palette } => {
                buf.put_u8(palette.foreground as u8);
                buf.put_u8(palette.background as u8);
            }
            Self::SetEnFontSize { size } | Self::SetZhFontSize { size } => buf.put_u8(*size as u8),
            Self::DrawCircle { center, radius } | Self::FillCircle { center, radius } => {
                center.put(&mut buf);
                buf.put_u16(*radius);
            }
            Self::DrawTriangle { points } | Self::FillTriangle { points } => {
                for point in points {
                    point.put(&mut buf);
                }
            }
            Self::DisplayText { origin, text: bytes }
            | Self::DisplayImage { origin, filename: bytes } => {
                origin.put(&mut buf);
                buf.put_slice(bytes);
                buf.put_u8(0);
            }
        }

        buf.freeze()
    }

    /// Convert into a frame ready for encoding
    pub fn to_frame(&self) -> Frame {
        Frame::with_payload(self.opcode(), self.payload())
    }

    /// Encode to wire bytes
    ///
    /// # Errors
    ///
    /// Returns [`Error::PayloadTooLarge`] if text or filename are too long for
    /// one frame.
    pub fn encode(&self) -> Result<BytesMut> {
        frame::encode(self.opcode().into(), &self.payload())
    }

    /// Get operation name
    pub fn name(&self) -> &'static str {
        self.opcode().name()
    }
}

impl From<&Command> for Frame {
    fn from(command: &Command) -> Self {
        command.to_frame()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetBaudrate { rate } => write!(f, "{}({})", self.name(), rate),
            Self::SetPallet { palette } => write!(f, "{}({})", self.name(), palette),
            Self::SetEnFontSize { size } | Self::SetZhFontSize { size } => {
                write!(f, "{}({}px)", self.name(), size.pixels())
            }
            Self::DisplayText { origin, text } => {
                write!(f, "{}({}, {}, {} bytes)", self.name(), origin.x, origin.y, text.len())
            }
            _ => f.write_str(self.name()),
        }
    }
}

fn to_u16(field: &'static str, value: i64) -> Result<u16> {
    u16::try_from(value).map_err(|_| Error::argument(field, value, "must be in 0..=65535"))
}

fn font_size(raw: Option<u8>) -> Result<FontSize> {
    Ok(raw.map(FontSize::try_from).transpose()?.unwrap_or_default())
}

fn triangle(coords: [i64; 6]) -> Result<[Point; 3]> {
    const FIELDS: [&str; 6] = ["x0", "y0", "x1", "y1", "x2", "y2"];

    let mut values = [0u16; 6];
    for ((slot, value), field) in values.iter_mut().zip(coords).zip(FIELDS) {
        *slot = to_u16(field, value)?;
    }

    Ok([
        Point::new(values[0], values[1]),
        Point::new(values[2], values[3]),
        Point::new(values[4], values[5]),
    ])
}

// A zero byte terminates the string on the device.
fn reject_nul(field: &'static str, bytes: &[u8]) -> Result<()> {
    match bytes.iter().position(|b| *b == 0) {
        Some(index) => Err(Error::argument(field, index as i64, "contains a zero byte at this index")),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{checksum, frame::describe, params::Color};
    use pretty_assertions::assert_eq;

    fn hex(command: &Command) -> String {
        describe(&command.encode().unwrap())
    }

    #[test]
    fn test_zero_argument_frames() {
        let cases = [
            (Command::Handshake, "A5 00 09 00 CC 33 C3 3C AC"),
            (Command::ReadBaudrate, "A5 00 09 02 CC 33 C3 3C AE"),
            (Command::ReadStorageMode, "A5 00 09 06 CC 33 C3 3C AA"),
            (Command::SleepMode, "A5 00 09 08 CC 33 C3 3C A4"),
            (Command::RefreshAndUpdate, "A5 00 09 0A CC 33 C3 3C A6"),
            (Command::ReadRotation, "A5 00 09 0C CC 33 C3 3C A0"),
            (Command::ImportFontLibrary, "A5 00 09 0E CC 33 C3 3C A2"),
            (Command::ImportImage, "A5 00 09 0F CC 33 C3 3C A3"),
            (Command::GetPallet, "A5 00 09 11 CC 33 C3 3C BD"),
            (Command::ClearScreen, "A5 00 09 2E CC 33 C3 3C 82"),
        ];

        for (command, expected) in cases {
            assert_eq!(hex(&command), expected, "{}", command);
        }
    }

    #[test]
    fn test_set_baudrate() {
        let command = Command::set_baudrate(9600).unwrap();
        assert_eq!(hex(&command), "A5 00 0D 01 00 00 25 80 CC 33 C3 3C 0C");
    }

    #[test]
    fn test_set_baudrate_out_of_range() {
        assert_eq!(Command::set_baudrate(-1).unwrap_err().field(), Some("rate"));
        assert!(Command::set_baudrate(u32::MAX as i64 + 1).is_err());
        assert!(Command::set_baudrate(u32::MAX as i64).is_ok());
    }

    #[test]
    fn test_display_text() {
        // "你好World" in GB2312
        let text = vec![0xC4, 0xE3, 0xBA, 0xC3, b'W', b'o', b'r', b'l', b'd'];
        let command = Command::display_text(10, 10, text).unwrap();

        assert_eq!(
            hex(&command),
            "A5 00 17 30 00 0A 00 0A C4 E3 BA C3 57 6F 72 6C 64 00 CC 33 C3 3C 9E"
        );
    }

    #[test]
    fn test_display_text_rejects_embedded_nul() {
        let err = Command::display_text(0, 0, &b"ab\0cd"[..]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidArgument {
                field: "text",
                value: 2,
                reason: "contains a zero byte at this index",
            }
        );
    }

    #[test]
    fn test_display_text_coordinates() {
        assert_eq!(Command::display_text(-1, 0, "a").unwrap_err().field(), Some("x"));
        assert_eq!(Command::display_text(0, 70_000, "a").unwrap_err().field(), Some("y"));

        // No check against the panel extent
        assert!(Command::display_text(65_535, 65_535, "a").is_ok());
    }

    #[test]
    fn test_display_image() {
        let command = Command::display_image(0, 0, "PIC.BMP").unwrap();
        assert_eq!(
            hex(&command),
            "A5 00 15 70 00 00 00 00 50 49 43 2E 42 4D 50 00 CC 33 C3 3C EB"
        );

        let command = Command::display_image(0, 0, "PIC7.BMP").unwrap();
        assert_eq!(
            hex(&command),
            "A5 00 16 70 00 00 00 00 50 49 43 37 2E 42 4D 50 00 CC 33 C3 3C DF"
        );
    }

    #[test]
    fn test_display_image_empty_filename() {
        let err = Command::display_image(0, 0, "").unwrap_err();
        assert_eq!(err.field(), Some("filename"));
    }

    #[test]
    fn test_triangles() {
        let draw = Command::draw_triangle(0x0A, 0x0A, 0x20, 0x80, 0x80, 0xFF).unwrap();
        assert_eq!(
            hex(&draw),
            "A5 00 15 28 00 0A 00 0A 00 20 00 80 00 80 00 FF CC 33 C3 3C 47"
        );

        let fill = Command::fill_triangle(0x0A, 0x0A, 0x20, 0x80, 0x80, 0xFF).unwrap();
        assert_eq!(
            hex(&fill),
            "A5 00 15 29 00 0A 00 0A 00 20 00 80 00 80 00 FF CC 33 C3 3C 46"
        );
    }

    #[test]
    fn test_triangle_names_field() {
        let err = Command::draw_triangle(0, 0, 0, 0, 0x1_0000, 0).unwrap_err();
        assert_eq!(err.field(), Some("x2"));
    }

    #[test]
    fn test_circles() {
        let draw = Command::draw_circle(100, 100, 50).unwrap();
        assert_eq!(hex(&draw), "A5 00 0F 26 00 64 00 64 00 32 CC 33 C3 3C BE");

        let fill = Command::fill_circle(100, 100, 50).unwrap();
        assert_eq!(hex(&fill), "A5 00 0F 27 00 64 00 64 00 32 CC 33 C3 3C BF");
    }

    #[test]
    fn test_draw_circle_demo_frame() {
        let draw = Command::draw_circle(0xFF, 0xFF, 0x80).unwrap();
        assert_eq!(hex(&draw), "A5 00 0F 26 00 FF 00 FF 00 80 CC 33 C3 3C 0C");
    }

    #[test]
    fn test_circle_radius_over_16_bits() {
        let err = Command::draw_circle(0, 0, 65_536).unwrap_err();
        assert!(err.is_argument_error());
        assert_eq!(err.field(), Some("radius"));
    }

    #[test]
    fn test_varying_argument_changes_only_its_bytes() {
        let a = Command::draw_circle(100, 100, 50).unwrap().encode().unwrap();
        let b = Command::draw_circle(100, 100, 51).unwrap().encode().unwrap();

        assert_eq!(a.len(), b.len());
        let differing: Vec<usize> = (0..a.len()).filter(|i| a[*i] != b[*i]).collect();
        // Low radius byte and checksum
        assert_eq!(differing, vec![9, a.len() - 1]);
        assert!(checksum::verify(&a));
        assert!(checksum::verify(&b));
    }

    #[test]
    fn test_set_pallet() {
        assert_eq!(
            hex(&Command::set_pallet(None, None).unwrap()),
            "A5 00 0B 10 00 03 CC 33 C3 3C BD"
        );
        assert_eq!(
            hex(&Command::set_pallet(Some(1), None).unwrap()),
            "A5 00 0B 10 01 03 CC 33 C3 3C BC"
        );
        assert_eq!(
            Command::set_pallet(Some(0), Some(3)).unwrap(),
            Command::SetPallet {
                palette: Palette::new(Color::Black, Color::White)
            }
        );
    }

    #[test]
    fn test_set_pallet_invalid_color() {
        let err = Command::set_pallet(Some(4), None).unwrap_err();
        assert!(err.is_argument_error());
        assert_eq!(err.field(), Some("foreground"));
    }

    #[test]
    fn test_font_sizes() {
        assert_eq!(
            hex(&Command::set_en_font_size(Some(3)).unwrap()),
            "A5 00 0A 1E 03 CC 33 C3 3C B2"
        );
        assert_eq!(
            hex(&Command::set_zh_font_size(None).unwrap()),
            "A5 00 0A 1F 01 CC 33 C3 3C B1"
        );
        assert!(Command::set_en_font_size(Some(4)).is_err());
        assert!(Command::set_zh_font_size(Some(0)).is_err());
    }

    #[test]
    fn test_storage_and_rotation() {
        assert_eq!(
            hex(&Command::set_storage_mode(Some(1)).unwrap()),
            "A5 00 0A 07 01 CC 33 C3 3C A9"
        );
        assert_eq!(
            Command::set_storage_mode(None).unwrap(),
            Command::SetStorageMode {
                mode: StorageMode::Internal
            }
        );
        assert_eq!(
            hex(&Command::set_rotation(None).unwrap()),
            "A5 00 0A 0D 00 CC 33 C3 3C A2"
        );
        assert_eq!(
            hex(&Command::set_rotation(Some(1)).unwrap()),
            "A5 00 0A 0D 01 CC 33 C3 3C A3"
        );
        assert_eq!(
            hex(&Command::set_rotation(Some(2)).unwrap()),
            "A5 00 0A 0D 02 CC 33 C3 3C A0"
        );
        assert_eq!(
            hex(&Command::set_storage_mode(Some(0)).unwrap()),
            "A5 00 0A 07 00 CC 33 C3 3C A8"
        );
        assert_eq!(Command::set_rotation(Some(5)).unwrap_err().field(), Some("rotation"));
    }

    #[test]
    fn test_text_too_large_for_frame() {
        let command = Command::DisplayText {
            origin: Point::default(),
            text: Bytes::from(vec![b'a'; 65_526]),
        };

        assert!(command.encode().unwrap_err().is_encoding_error());
    }

    #[test]
    fn test_command_to_frame() {
        let frame = Frame::from(&Command::set_baudrate(115_200).unwrap());
        assert_eq!(frame.opcode, Opcode::SetBaudrate);
        assert_eq!(frame.payload.as_ref(), &[0x00, 0x01, 0xC2, 0x00]);
    }

    #[test]
    fn test_command_display() {
        assert_eq!(Command::Handshake.to_string(), "HANDSHAKE");
        assert_eq!(
            Command::set_en_font_size(Some(2)).unwrap().to_string(),
            "SET_EN_FONT_SIZE(48px)"
        );
    }
}
