//! Link-level parameters a panel dictates to its DSI host

use bitflags::bitflags;

/// Maximum number of data lanes a DSI link can carry.
pub const MAX_DSI_LANES: u8 = 4;

/// Pixel format on the DSI link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelFormat {
    /// 24 bpp, 8 bits per channel
    Rgb888,
    /// 18 bpp loosely packed into 24-bit words
    Rgb666,
    /// 18 bpp tightly packed
    Rgb666Packed,
    /// 16 bpp
    Rgb565,
}

impl PixelFormat {
    /// Bits occupied per pixel on the wire.
    pub const fn bits_per_pixel(self) -> u8 {
        match self {
            Self::Rgb888 | Self::Rgb666 => 24,
            Self::Rgb666Packed => 18,
            Self::Rgb565 => 16,
        }
    }

    /// Short label used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rgb888 => "RGB888",
            Self::Rgb666 => "RGB666",
            Self::Rgb666Packed => "RGB666_PACKED",
            Self::Rgb565 => "RGB565",
        }
    }
}

impl core::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// DSI operating mode flags.
    ///
    /// Bit positions match the host-side DSI mode word so the value can be
    /// handed to a host controller unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct ModeFlags: u32 {
        /// Video mode (continuous pixel stream) instead of command mode
        const VIDEO = 1 << 0;
        /// Burst transfers in video mode
        const VIDEO_BURST = 1 << 1;
        /// Sync pulses instead of sync events in video mode
        const VIDEO_SYNC_PULSE = 1 << 2;
        /// Clock lane may stop between transmissions
        const CLOCK_NON_CONTINUOUS = 1 << 10;
        /// Send commands in low-power mode
        const LPM = 1 << 11;
    }
}

impl ModeFlags {
    /// `true` for video-mode panels.
    pub const fn is_video(self) -> bool {
        self.contains(Self::VIDEO)
    }
}
