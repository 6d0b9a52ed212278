//! Panel descriptor type
//!
//! Binds a timing mode, link parameters and an init sequence into one named,
//! immutable panel variant.

use crate::{InitSequence, ModeFlags, PixelFormat, TimingError, TimingMode, MAX_DSI_LANES};

/// Complete description of one supported panel variant.
///
/// Descriptors are `const` data shared by every panel instance of that
/// variant; nothing mutates them after load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelDescriptor {
    /// Panel name (e.g., "gcat SN65 WS7D 7\"")
    pub name: &'static str,

    /// Video timing the panel expects
    pub mode: &'static TimingMode,

    /// Number of DSI data lanes (1..=MAX_DSI_LANES)
    pub lanes: u8,

    /// DSI mode flags handed to the host
    pub mode_flags: ModeFlags,

    /// Pixel format on the link
    pub format: PixelFormat,

    /// Vendor configuration played back during prepare
    pub init_sequence: InitSequence,
}

impl PanelDescriptor {
    /// Check the descriptor against link limits and its own timing.
    pub const fn validate(&self) -> Result<(), DescriptorError> {
        if self.lanes == 0 || self.lanes > MAX_DSI_LANES {
            return Err(DescriptorError::LaneCount(self.lanes));
        }
        match self.mode.validate() {
            Ok(()) => Ok(()),
            Err(e) => Err(DescriptorError::Timing(e)),
        }
    }
}

/// Reasons a [`PanelDescriptor`] is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DescriptorError {
    /// Lane count outside `1..=MAX_DSI_LANES`
    LaneCount(u8),
    /// Timing mode failed validation
    Timing(TimingError),
}

#[cfg(feature = "std")]
impl std::error::Error for DescriptorError {}

impl core::fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LaneCount(n) => write!(f, "invalid DSI lane count {n}"),
            Self::Timing(e) => write!(f, "invalid timing: {e}"),
        }
    }
}
