//! # waveshare-epd-core
//!
//! Core protocol implementation for the Waveshare 4.3inch e-Paper UART module.
//!
//! This crate provides the low-level protocol primitives:
//! - Frame structure and encoding
//! - Checksum calculation
//! - Command catalog and argument validation
//! - Protocol constants
//!
//! Everything here is pure: no I/O and no shared state.

pub mod checksum;
pub mod command;
pub mod constants;
pub mod error;
pub mod frame;
pub mod opcode;
pub mod params;

pub use command::{Command, Point};
pub use error::{Error, Result};
pub use frame::Frame;
pub use opcode::Opcode;
pub use params::{Color, FontSize, Palette, Rotation, StorageMode};
