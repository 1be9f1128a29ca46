//! Reset and wake-up lines
//!
//! The module has two control inputs besides the UART: a reset line and a
//! wake-up line whose rising edge leaves sleep mode. Both are driven by a
//! short high-then-low pulse.

use std::fmt;

use embedded_hal::digital::{Error as _, OutputPin};

use crate::error::{Error, Result};

/// Logical control line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinLine {
    Reset,
    Wake,
}

impl fmt::Display for PinLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reset => f.write_str("reset"),
            Self::Wake => f.write_str("wake"),
        }
    }
}

/// Capability to drive the control lines
pub trait PinController: Send {
    fn set_high(&mut self, line: PinLine) -> Result<()>;

    fn set_low(&mut self, line: PinLine) -> Result<()>;

    /// Drive `line` high, then low
    fn pulse(&mut self, line: PinLine) -> Result<()> {
        self.set_high(line)?;
        self.set_low(line)
    }
}

/// [`PinController`] over two embedded-hal output pins
///
/// # Examples
///
/// ```
/// use embedded_hal_mock::eh1::digital::{Mock, State, Transaction};
/// use waveshare_epd::{GpioPins, PinController, PinLine};
///
/// let reset = Mock::new(&[Transaction::set(State::High), Transaction::set(State::Low)]);
/// let wake = Mock::new(&[]);
///
/// let mut pins = GpioPins::new(reset, wake);
/// pins.pulse(PinLine::Reset).unwrap();
///
/// let (mut reset, mut wake) = pins.release();
/// reset.done();
/// wake.done();
/// ```
pub struct GpioPins<RST, WAKE> {
    reset: RST,
    wake: WAKE,
}

impl<RST, WAKE> GpioPins<RST, WAKE>
where
    RST: OutputPin,
    WAKE: OutputPin,
{
    pub fn new(reset: RST, wake: WAKE) -> Self {
        Self { reset, wake }
    }

    /// Give the pins back
    pub fn release(self) -> (RST, WAKE) {
        (self.reset, self.wake)
    }
}

fn pin_error<E: embedded_hal::digital::Error>(line: PinLine, error: E) -> Error {
    Error::Pin {
        line,
        reason: format!("{:?}", error.kind()),
    }
}

impl<RST, WAKE> PinController for GpioPins<RST, WAKE>
where
    RST: OutputPin + Send,
    WAKE: OutputPin + Send,
{
    fn set_high(&mut self, line: PinLine) -> Result<()> {
        match line {
            PinLine::Reset => self.reset.set_high().map_err(|e| pin_error(line, e)),
            PinLine::Wake => self.wake.set_high().map_err(|e| pin_error(line, e)),
        }
    }

    fn set_low(&mut self, line: PinLine) -> Result<()> {
        match line {
            PinLine::Reset => self.reset.set_low().map_err(|e| pin_error(line, e)),
            PinLine::Wake => self.wake.set_low().map_err(|e| pin_error(line, e)),
        }
    }
}
