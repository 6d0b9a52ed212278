//! Display timing types
//!
//! A [`TimingMode`] is the fixed geometry and signal timing a panel expects on
//! its video link. The layout mirrors what display pipelines consume: active
//! area, then front porch, sync pulse and back porch for each axis.

// Sums are taken over u16 fields widened to u32/u64, which cannot overflow.
#![allow(clippy::arithmetic_side_effects)]

use core::fmt::Write;

use bitflags::bitflags;

/// Capacity of a rendered mode name (`"65535x65535i"` fits comfortably).
pub const MODE_NAME_LEN: usize = 24;

/// DRM-style mode name, e.g. `"1024x600"`.
pub type ModeName = heapless::String<MODE_NAME_LEN>;

bitflags! {
    /// Classification of a timing mode as seen by the display pipeline.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct ModeType: u8 {
        /// Mode was synthesised by the driver rather than read from EDID.
        const DRIVER = 1 << 6;
        /// Mode the pipeline should pick when nothing else is requested.
        const PREFERRED = 1 << 3;
    }
}

/// Immutable geometry and timing record for one panel.
///
/// All horizontal values are in pixels, all vertical values in lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct TimingMode {
    /// Pixel clock in kHz
    pub clock_khz: u32,

    /// Active pixels per line
    pub hdisplay: u16,
    /// Horizontal front porch
    pub hfront_porch: u16,
    /// Horizontal sync pulse width
    pub hsync_len: u16,
    /// Horizontal back porch
    pub hback_porch: u16,

    /// Active lines per frame
    pub vdisplay: u16,
    /// Vertical front porch
    pub vfront_porch: u16,
    /// Vertical sync pulse width
    pub vsync_len: u16,
    /// Vertical back porch
    pub vback_porch: u16,

    /// Physical width of the active area in millimetres
    pub width_mm: u16,
    /// Physical height of the active area in millimetres
    pub height_mm: u16,

    /// Driver/preferred classification
    pub mode_type: ModeType,
}

impl TimingMode {
    /// First pixel of the horizontal sync pulse.
    pub const fn hsync_start(&self) -> u32 {
        self.hdisplay as u32 + self.hfront_porch as u32
    }

    /// Pixel after the last one of the horizontal sync pulse.
    pub const fn hsync_end(&self) -> u32 {
        self.hsync_start() + self.hsync_len as u32
    }

    /// Total pixels per line, blanking included.
    pub const fn htotal(&self) -> u32 {
        self.hsync_end() + self.hback_porch as u32
    }

    /// First line of the vertical sync pulse.
    pub const fn vsync_start(&self) -> u32 {
        self.vdisplay as u32 + self.vfront_porch as u32
    }

    /// Line after the last one of the vertical sync pulse.
    pub const fn vsync_end(&self) -> u32 {
        self.vsync_start() + self.vsync_len as u32
    }

    /// Total lines per frame, blanking included.
    pub const fn vtotal(&self) -> u32 {
        self.vsync_end() + self.vback_porch as u32
    }

    /// Refresh rate in Hz, rounded to the closest integer.
    ///
    /// Returns 0 for a degenerate mode with no blanking area at all.
    pub fn vrefresh_hz(&self) -> u32 {
        let frame = u64::from(self.htotal()) * u64::from(self.vtotal());
        if frame == 0 {
            return 0;
        }
        let num = u64::from(self.clock_khz) * 1000;
        let hz = (num + frame / 2) / frame;
        u32::try_from(hz).unwrap_or(u32::MAX)
    }

    /// `true` when the pipeline should select this mode by default.
    pub const fn is_preferred(&self) -> bool {
        self.mode_type.contains(ModeType::PREFERRED)
    }

    /// Render the mode name the pipeline shows in diagnostics.
    pub fn name(&self) -> ModeName {
        let mut name = ModeName::new();
        // Two u16 values and an 'x' never exceed MODE_NAME_LEN.
        let _ = write!(name, "{}x{}", self.hdisplay, self.vdisplay);
        name
    }

    /// Check that every active, porch and sync value is positive.
    pub const fn validate(&self) -> Result<(), TimingError> {
        if self.clock_khz == 0 {
            return Err(TimingError::ZeroClock);
        }
        if self.hdisplay == 0
            || self.hfront_porch == 0
            || self.hsync_len == 0
            || self.hback_porch == 0
        {
            return Err(TimingError::ZeroHorizontal);
        }
        if self.vdisplay == 0
            || self.vfront_porch == 0
            || self.vsync_len == 0
            || self.vback_porch == 0
        {
            return Err(TimingError::ZeroVertical);
        }
        Ok(())
    }
}

/// Reasons a [`TimingMode`] is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingError {
    /// Pixel clock is zero
    ZeroClock,
    /// A horizontal active/porch/sync value is zero
    ZeroHorizontal,
    /// A vertical active/porch/sync value is zero
    ZeroVertical,
}

#[cfg(feature = "std")]
impl std::error::Error for TimingError {}

impl core::fmt::Display for TimingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ZeroClock => write!(f, "pixel clock is zero"),
            Self::ZeroHorizontal => write!(f, "horizontal timing has a zero field"),
            Self::ZeroVertical => write!(f, "vertical timing has a zero field"),
        }
    }
}
