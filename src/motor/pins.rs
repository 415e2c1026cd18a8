//! Placeholder pin for drivers wired without an enable line.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

/// An output pin that is not connected. Writes are discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnablePin;

impl ErrorType for NoEnablePin {
    type Error = Infallible;
}

impl OutputPin for NoEnablePin {
    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
