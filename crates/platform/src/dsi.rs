//! DSI transport abstraction
//!
//! The panel driver talks to its panel through a host-side DSI peripheral it
//! does not own. This module defines the primitives it needs from that
//! peripheral: link configuration, attach/detach, and raw DCS writes. The
//! standard DCS commands are provided on top of [`DsiDevice::dcs_write_buffer`].

use panel_specs::{ModeFlags, PixelFormat};

/// MIPI Display Command Set opcodes used by the panel lifecycle.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DcsCommand {
    /// Soft reset (no parameters), panel needs a settle delay afterwards.
    SoftReset = 0x01,
    /// Enter sleep mode (no parameters).
    EnterSleepMode = 0x10,
    /// Exit sleep mode (no parameters), panel needs a settle delay afterwards.
    ExitSleepMode = 0x11,
    /// Stop showing frame memory (no parameters).
    SetDisplayOff = 0x28,
    /// Show frame memory (no parameters).
    SetDisplayOn = 0x29,
    /// Disable the tearing-effect output (no parameters).
    SetTearOff = 0x34,
    /// Enable the tearing-effect output (one [`TearMode`] parameter).
    SetTearOn = 0x35,
}

impl DcsCommand {
    /// Opcode byte as sent on the wire.
    pub const fn opcode(self) -> u8 {
        self as u8
    }
}

/// Tearing-effect signal mode, parameter of [`DcsCommand::SetTearOn`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TearMode {
    /// Signal on vertical blanking only
    VBlank = 0,
    /// Signal on both vertical and horizontal blanking
    VHBlank = 1,
}

/// Host-side DSI peripheral serving one panel.
///
/// Implemented for `&mut T` so a panel can work through a borrowed transport.
pub trait DsiDevice {
    /// Error type
    type Error: core::fmt::Debug;

    /// Configure the number of data lanes.
    fn set_lanes(&mut self, lanes: u8) -> Result<(), Self::Error>;

    /// Configure the pixel format on the link.
    fn set_pixel_format(&mut self, format: PixelFormat) -> Result<(), Self::Error>;

    /// Configure video/command mode, burst and low-power flags.
    fn set_mode_flags(&mut self, flags: ModeFlags) -> Result<(), Self::Error>;

    /// Bring up the link with the current configuration.
    fn attach(&mut self) -> Result<(), Self::Error>;

    /// Release the link.
    fn detach(&mut self) -> Result<(), Self::Error>;

    /// Send one DCS buffer verbatim (opcode followed by parameters).
    fn dcs_write_buffer(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Send a parameterless DCS command.
    fn dcs_command(&mut self, cmd: DcsCommand) -> Result<(), Self::Error> {
        self.dcs_write_buffer(&[cmd.opcode()])
    }

    /// Soft-reset the panel controller.
    fn soft_reset(&mut self) -> Result<(), Self::Error> {
        self.dcs_command(DcsCommand::SoftReset)
    }

    /// Put the panel into sleep mode.
    fn enter_sleep_mode(&mut self) -> Result<(), Self::Error> {
        self.dcs_command(DcsCommand::EnterSleepMode)
    }

    /// Wake the panel from sleep mode.
    fn exit_sleep_mode(&mut self) -> Result<(), Self::Error> {
        self.dcs_command(DcsCommand::ExitSleepMode)
    }

    /// Start showing frames.
    fn set_display_on(&mut self) -> Result<(), Self::Error> {
        self.dcs_command(DcsCommand::SetDisplayOn)
    }

    /// Stop showing frames.
    fn set_display_off(&mut self) -> Result<(), Self::Error> {
        self.dcs_command(DcsCommand::SetDisplayOff)
    }

    /// Enable the tearing-effect signal in the given mode.
    fn set_tear_on(&mut self, mode: TearMode) -> Result<(), Self::Error> {
        self.dcs_write_buffer(&[DcsCommand::SetTearOn.opcode(), mode as u8])
    }

    /// Disable the tearing-effect signal.
    fn set_tear_off(&mut self) -> Result<(), Self::Error> {
        self.dcs_command(DcsCommand::SetTearOff)
    }
}

impl<T: DsiDevice + ?Sized> DsiDevice for &mut T {
    type Error = T::Error;

    fn set_lanes(&mut self, lanes: u8) -> Result<(), Self::Error> {
        T::set_lanes(self, lanes)
    }

    fn set_pixel_format(&mut self, format: PixelFormat) -> Result<(), Self::Error> {
        T::set_pixel_format(self, format)
    }

    fn set_mode_flags(&mut self, flags: ModeFlags) -> Result<(), Self::Error> {
        T::set_mode_flags(self, flags)
    }

    fn attach(&mut self) -> Result<(), Self::Error> {
        T::attach(self)
    }

    fn detach(&mut self) -> Result<(), Self::Error> {
        T::detach(self)
    }

    fn dcs_write_buffer(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::dcs_write_buffer(self, data)
    }

    fn dcs_command(&mut self, cmd: DcsCommand) -> Result<(), Self::Error> {
        T::dcs_command(self, cmd)
    }

    fn soft_reset(&mut self) -> Result<(), Self::Error> {
        T::soft_reset(self)
    }

    fn enter_sleep_mode(&mut self) -> Result<(), Self::Error> {
        T::enter_sleep_mode(self)
    }

    fn exit_sleep_mode(&mut self) -> Result<(), Self::Error> {
        T::exit_sleep_mode(self)
    }

    fn set_display_on(&mut self) -> Result<(), Self::Error> {
        T::set_display_on(self)
    }

    fn set_display_off(&mut self) -> Result<(), Self::Error> {
        T::set_display_off(self)
    }

    fn set_tear_on(&mut self, mode: TearMode) -> Result<(), Self::Error> {
        T::set_tear_on(self, mode)
    }

    fn set_tear_off(&mut self) -> Result<(), Self::Error> {
        T::set_tear_off(self)
    }
}
