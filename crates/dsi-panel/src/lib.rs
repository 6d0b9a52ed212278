//! MIPI-DSI Panel Driver
//!
//! Binds a DSI device announced by a compatible string to one of the
//! descriptors in [`panel_specs`], registers it with the host display
//! pipeline, and drives the panel through `prepare` → `enable` → `disable` →
//! `unprepare` with the DCS commands and settle delays the controller needs.
//!
//! # Architecture
//!
//! ```text
//! Host pipeline ──DisplayPanel──► DsiPanel ──DsiDevice──► DSI host controller
//!                                    │
//!                                    ├── PanelDescriptor (panel-specs, const)
//!                                    ├── Backlight (optional)
//!                                    └── reset GPIO (optional)
//! ```
//!
//! # Features
//!
//! - `std`: `std::error::Error` impls and host-side support
//! - `defmt`: defmt log strings and `defmt::Format` derives (target builds)
//! - `tracing`: route logs through `tracing` (host builds)
//!
//! # Example
//!
//! ```no_run
//! use dsi_panel::DsiPanel;
//! use platform::{DisplayHost, DsiDevice, NO_BACKLIGHT};
//! use embedded_hal::delay::DelayNs;
//!
//! fn bring_up<D, T, H>(dsi: &mut D, delay: T, host: &mut H)
//! where
//!     D: DsiDevice,
//!     T: DelayNs,
//!     H: DisplayHost,
//! {
//!     let Ok(mut panel) = DsiPanel::attach("gcat,sn65_ws7d", dsi, delay, NO_BACKLIGHT, host) else {
//!         return;
//!     };
//!     if panel.prepare().is_ok() && panel.enable().is_ok() {
//!         // frames are visible
//!     }
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]

#[macro_use]
mod log;

pub mod error;
pub mod panel;
pub mod sequence;
pub mod state;

pub use error::{AttachError, PanelError, PrepareStep};
pub use panel::{
    DsiPanel, RESET_PULSE_MS, RESET_RECOVERY_MS, SLEEP_EXIT_SETTLE_MS, SOFT_RESET_SETTLE_MS,
    TEAR_MODE,
};
pub use state::{Operation, PanelState, Transition};

pub use panel_specs;
pub use platform;
