//! Operation codes understood by the e-Paper UART module

use std::fmt;

use crate::error::{Error, Result};

/// Operation codes
///
/// One byte per device operation, as listed in the module's serial command
/// table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    // System control
    Handshake = 0x00,
    SetBaudrate = 0x01,
    ReadBaudrate = 0x02,
    ReadStorageMode = 0x06,
    SetStorageMode = 0x07,
    SleepMode = 0x08,
    RefreshAndUpdate = 0x0A,
    ReadRotation = 0x0C,
    SetRotation = 0x0D,
    ImportFontLibrary = 0x0E,
    ImportImage = 0x0F,

    // Display parameters
    SetPallet = 0x10,
    GetPallet = 0x11,
    SetEnFontSize = 0x1E,
    SetZhFontSize = 0x1F,

    // Basic drawings
    DrawCircle = 0x26,
    FillCircle = 0x27,
    DrawTriangle = 0x28,
    FillTriangle = 0x29,
    ClearScreen = 0x2E,

    // Text and images
    DisplayText = 0x30,
    DisplayImage = 0x70,
}

impl Opcode {
    /// Every opcode, in wire order
    pub const ALL: [Opcode; 22] = [
        Self::Handshake,
        Self::SetBaudrate,
        Self::ReadBaudrate,
        Self::ReadStorageMode,
        Self::SetStorageMode,
        Self::SleepMode,
        Self::RefreshAndUpdate,
        Self::ReadRotation,
        Self::SetRotation,
        Self::ImportFontLibrary,
        Self::ImportImage,
        Self::SetPallet,
        Self::GetPallet,
        Self::SetEnFontSize,
        Self::SetZhFontSize,
        Self::DrawCircle,
        Self::FillCircle,
        Self::DrawTriangle,
        Self::FillTriangle,
        Self::ClearScreen,
        Self::DisplayText,
        Self::DisplayImage,
    ];

    /// Get opcode name
    pub fn name(self) -> &'static str {
        match self {
            Self::Handshake => "HANDSHAKE",
            Self::SetBaudrate => "SET_BAUDRATE",
            Self::ReadBaudrate => "READ_BAUDRATE",
            Self::ReadStorageMode => "READ_STORAGE_MODE",
            Self::SetStorageMode => "SET_STORAGE_MODE",
            Self::SleepMode => "SLEEP_MODE",
            Self::RefreshAndUpdate => "REFRESH_AND_UPDATE",
            Self::ReadRotation => "READ_ROTATION",
            Self::SetRotation => "SET_ROTATION",
            Self::ImportFontLibrary => "IMPORT_FONT_LIBRARY",
            Self::ImportImage => "IMPORT_IMAGE",
            Self::SetPallet => "SET_PALLET",
            Self::GetPallet => "GET_PALLET",
            Self::SetEnFontSize => "SET_EN_FONT_SIZE",
            Self::SetZhFontSize => "SET_ZH_FONT_SIZE",
            Self::DrawCircle => "DRAW_CIRCLE",
            Self::FillCircle => "FILL_CIRCLE",
            Self::DrawTriangle => "DRAW_TRIANGLE",
            Self::FillTriangle => "FILL_TRIANGLE",
            Self::ClearScreen => "CLEAR_SCREEN",
            Self::DisplayText => "DISPLAY_TEXT",
            Self::DisplayImage => "DISPLAY_IMAGE",
        }
    }
}

impl From<Opcode> for u8 {
    fn from(op: Opcode) -> u8 {
        op as u8
    }
}

impl TryFrom<u8> for Opcode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|op| *op as u8 == value)
            .ok_or(Error::UnknownOpcode(value))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), *self as u8)
    }
}
