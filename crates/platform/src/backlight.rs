//! Backlight abstraction
//!
//! A panel may have a backlight described alongside it. The driver looks it
//! up once at attach time through [`BacklightLookup`]; afterwards it switches
//! it with the display and exposes it to the host for brightness queries.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;

/// Full-scale brightness level.
pub const MAX_BRIGHTNESS: u8 = 255;

/// Backlight control interface
pub trait Backlight {
    /// Error type
    type Error: core::fmt::Debug;

    /// Turn the backlight on at the current brightness.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Turn the backlight off.
    fn disable(&mut self) -> Result<(), Self::Error>;

    /// Whether the backlight is currently on.
    fn is_enabled(&self) -> bool;

    /// Current brightness, 0 when off.
    fn brightness(&self) -> u8 {
        if self.is_enabled() {
            MAX_BRIGHTNESS
        } else {
            0
        }
    }

    /// Set brightness. On/off backlights treat any non-zero level as on.
    fn set_brightness(&mut self, level: u8) -> Result<(), Self::Error> {
        if level == 0 {
            self.disable()
        } else {
            self.enable()
        }
    }
}

/// Why a backlight lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BacklightError {
    /// Backlight device exists but is not ready yet
    Deferred,
    /// Backlight is described but cannot be acquired
    Unavailable,
}

#[cfg(feature = "std")]
impl std::error::Error for BacklightError {}

impl core::fmt::Display for BacklightError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Deferred => write!(f, "Backlight not ready, retry later"),
            Self::Unavailable => write!(f, "Backlight unavailable"),
        }
    }
}

/// Source of the backlight bound to a panel.
///
/// `Ok(None)` means no backlight is described for the device, which is not
/// an error. `Err` aborts the attach.
pub trait BacklightLookup {
    /// Backlight handed to the panel
    type Backlight: Backlight;

    /// Acquire the backlight. Called once per attach.
    fn lookup(&mut self) -> Result<Option<Self::Backlight>, BacklightError>;
}

impl<B: Backlight> BacklightLookup for Option<B> {
    type Backlight = B;

    fn lookup(&mut self) -> Result<Option<B>, BacklightError> {
        Ok(self.take())
    }
}

impl<B: Backlight> BacklightLookup for Result<Option<B>, BacklightError> {
    type Backlight = B;

    fn lookup(&mut self) -> Result<Option<B>, BacklightError> {
        core::mem::replace(self, Ok(None))
    }
}

/// Placeholder backlight for panels without one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoBacklight;

impl Backlight for NoBacklight {
    type Error = Infallible;

    fn enable(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Lookup that reports "no backlight described".
pub const NO_BACKLIGHT: Option<NoBacklight> = None;

/// On/off backlight driven by a GPIO enable line (active high).
pub struct GpioBacklight<P> {
    pin: P,
    enabled: bool,
}

impl<P: OutputPin> GpioBacklight<P> {
    /// Wrap an enable pin. The backlight starts out considered off.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            enabled: false,
        }
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> Backlight for GpioBacklight<P> {
    type Error = P::Error;

    fn enable(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high()?;
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()?;
        self.enabled = false;
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
