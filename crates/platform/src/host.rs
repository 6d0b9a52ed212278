//! Host display pipeline contracts
//!
//! A panel registers itself with the host pipeline on attach and removes
//! itself on detach. While registered, the pipeline asks it for modes through
//! a [`Connector`].

use panel_specs::{ModeName, TimingMode};

/// Handle returned by [`DisplayHost::add_panel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelId(pub u16);

/// Physical connector kind a panel sits behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectorType {
    /// MIPI-DSI
    Dsi,
}

/// What the host learns about a panel when it is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelInfo {
    /// Human-readable panel name
    pub name: &'static str,
    /// Connector kind
    pub connector_type: ConnectorType,
    /// Whether a backlight was bound to the panel
    pub has_backlight: bool,
}

/// Failures reported by the host pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostError {
    /// Host could not allocate room for the object
    OutOfMemory,
    /// Host refused the registration
    Rejected,
}

#[cfg(feature = "std")]
impl std::error::Error for HostError {}

impl core::fmt::Display for HostError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfMemory => write!(f, "Display host out of memory"),
            Self::Rejected => write!(f, "Display host rejected the request"),
        }
    }
}

/// Registration side of the host display pipeline.
pub trait DisplayHost {
    /// Make a panel available to the pipeline.
    fn add_panel(&mut self, info: &PanelInfo) -> Result<PanelId, HostError>;

    /// Withdraw a previously added panel. Unknown ids are ignored.
    fn remove_panel(&mut self, id: PanelId);
}

impl<T: DisplayHost + ?Sized> DisplayHost for &mut T {
    fn add_panel(&mut self, info: &PanelInfo) -> Result<PanelId, HostError> {
        T::add_panel(self, info)
    }

    fn remove_panel(&mut self, id: PanelId) {
        T::remove_panel(self, id);
    }
}

/// A mode as handed to the connector: a copy of the timing plus its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMode {
    /// Timing copied from the descriptor
    pub timing: TimingMode,
    /// `"WxH"` mode name
    pub name: ModeName,
}

impl DisplayMode {
    /// Duplicate a timing and derive its canonical name.
    pub fn from_timing(timing: &TimingMode) -> Self {
        Self {
            timing: *timing,
            name: timing.name(),
        }
    }

    /// Rounded refresh rate in Hz.
    pub fn vrefresh_hz(&self) -> u32 {
        self.timing.vrefresh_hz()
    }
}

/// Mode sink the pipeline passes to [`crate::DisplayPanel::get_modes`].
pub trait Connector {
    /// Append a probed mode. Fails if the host cannot take another mode.
    fn add_probed_mode(&mut self, mode: DisplayMode) -> Result<(), HostError>;

    /// Record the panel's physical size in millimetres.
    fn set_physical_size(&mut self, width_mm: u16, height_mm: u16);
}
