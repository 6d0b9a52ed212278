//! GPIO helpers
//!
//! Pins are plain [`embedded_hal::digital::OutputPin`] implementors. This
//! module only adds the placeholder used when a panel has no reset line.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

/// Output pin that does nothing. Stands in for an absent reset GPIO.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoResetPin;

impl ErrorType for NoResetPin {
    type Error = Infallible;
}

impl OutputPin for NoResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
