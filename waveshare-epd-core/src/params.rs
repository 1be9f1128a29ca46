//! Enumerated command arguments
//!
//! Each type is restricted to the literal values the module accepts; raw
//! bytes are converted with `TryFrom<u8>`, which reports the offending field.

use std::fmt;

use crate::error::{Error, Result};

/// Storage area for font libraries and images
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StorageMode {
    /// Internal NandFlash
    #[default]
    Internal = 0,

    /// External MicroSD (TF) card
    External = 1,
}

impl TryFrom<u8> for StorageMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Internal),
            1 => Ok(Self::External),
            _ => Err(Error::argument("storage_mode", value.into(), "expected 0 or 1")),
        }
    }
}

/// Display direction
///
/// Only a 180° flip is supported. Which of the two flip values the module
/// honours depends on its firmware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rotation {
    #[default]
    Normal = 0,
    Flipped = 1,
    FlippedAlt = 2,
}

impl TryFrom<u8> for Rotation {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Normal),
            1 => Ok(Self::Flipped),
            2 => Ok(Self::FlippedAlt),
            _ => Err(Error::argument("rotation", value.into(), "expected 0, 1 or 2")),
        }
    }
}

/// One of the four gray levels of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    DarkGray = 1,
    LightGray = 2,
    White = 3,
}

impl Color {
    fn parse(field: &'static str, value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Black),
            1 => Ok(Self::DarkGray),
            2 => Ok(Self::LightGray),
            3 => Ok(Self::White),
            _ => Err(Error::argument(field, value.into(), "expected a color in 0..=3")),
        }
    }
}

impl TryFrom<u8> for Color {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::parse("color", value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Black => "black",
            Self::DarkGray => "dark gray",
            Self::LightGray => "light gray",
            Self::White => "white",
        };
        f.write_str(name)
    }
}

/// Foreground and background colors used for drawing
///
/// The foreground is used for text and shapes, the background when the screen
/// is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Palette {
    pub foreground: Color,
    pub background: Color,
}

impl Palette {
    pub fn new(foreground: Color, background: Color) -> Self {
        Self {
            foreground,
            background,
        }
    }

    /// Build a palette from raw color bytes
    ///
    /// `None` selects the default for that slot.
    pub fn from_raw(foreground: Option<u8>, background: Option<u8>) -> Result<Self> {
        let default = Self::default();
        Ok(Self {
            foreground: foreground
                .map(|v| Color::parse("foreground", v))
                .transpose()?
                .unwrap_or(default.foreground),
            background: background
                .map(|v| Color::parse("background", v))
                .transpose()?
                .unwrap_or(default.background),
        })
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(Color::Black, Color::White)
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.foreground, self.background)
    }
}

/// Font dot-matrix size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FontSize {
    #[default]
    Px32 = 1,
    Px48 = 2,
    Px64 = 3,
}

impl FontSize {
    /// Glyph height in pixels
    pub fn pixels(self) -> u16 {
        match self {
            Self::Px32 => 32,
            Self::Px48 => 48,
            Self::Px64 => 64,
        }
    }
}

impl TryFrom<u8> for FontSize {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Px32),
            2 => Ok(Self::Px48),
            3 => Ok(Self::Px64),
            _ => Err(Error::argument("font_size", value.into(), "expected 1, 2 or 3")),
        }
    }
}
