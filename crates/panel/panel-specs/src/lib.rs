//! MIPI-DSI Panel Specifications
//!
//! Static descriptions of the DSI panels the driver supports: video timing,
//! lane count, pixel format, mode flags and the vendor init sequence, plus the
//! registry that maps a hardware compatible string to one of them.
//!
//! # Features
//!
//! - **no_std compatible** - Pure `const` data, no allocation
//! - **Panel templates** - Pre-configured descriptors under [`panels`]
//! - **Serde support** - Optional serialization of timing data for diagnostics
//! - **defmt support** - Optional `defmt::Format` on error and format types
//! - **Test fixtures** - `testing` adds a non-empty [`InitSequence`] variant for driver tests
//!
//! # Example
//!
//! ```
//! use panel_specs::registry;
//!
//! let desc = registry::resolve("gcat,sn65_ws7d").unwrap();
//! println!("Panel: {}", desc.name);
//! println!("Mode: {} @ {} Hz", desc.mode.name(), desc.mode.vrefresh_hz());
//! println!("Lanes: {} ({})", desc.lanes, desc.format);
//! ```
//!
//! # Custom Descriptors
//!
//! ```
//! use panel_specs::{InitSequence, ModeFlags, ModeType, PanelDescriptor, PixelFormat, TimingMode};
//!
//! const MY_MODE: TimingMode = TimingMode {
//!     clock_khz: 20_500,
//!     hdisplay: 480,
//!     hfront_porch: 10,
//!     hsync_len: 4,
//!     hback_porch: 20,
//!     vdisplay: 854,
//!     vfront_porch: 8,
//!     vsync_len: 4,
//!     vback_porch: 14,
//!     width_mm: 43,
//!     height_mm: 58,
//!     mode_type: ModeType::DRIVER,
//! };
//!
//! const MY_PANEL: PanelDescriptor = PanelDescriptor {
//!     name: "Custom Panel",
//!     mode: &MY_MODE,
//!     lanes: 2,
//!     mode_flags: ModeFlags::VIDEO,
//!     format: PixelFormat::Rgb888,
//!     init_sequence: InitSequence::Sn65Ws7d,
//! };
//!
//! assert!(MY_PANEL.validate().is_ok());
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod descriptor;
mod format;
pub mod panels;
pub mod registry;
mod sequence;
mod timing;

pub use descriptor::{DescriptorError, PanelDescriptor};
pub use format::{ModeFlags, PixelFormat, MAX_DSI_LANES};
pub use registry::{DescriptorRegistry, RegistryEntry, ResolveError};
pub use sequence::InitSequence;
#[cfg(feature = "testing")]
pub use sequence::VENDOR_COMMANDS;
pub use timing::{ModeName, ModeType, TimingError, TimingMode, MODE_NAME_LEN};
