//! Hardware Abstraction Layer (HAL) for MIPI-DSI panels
//!
//! This crate provides the trait-based seams a panel driver sits between,
//! enabling development and testing without a display controller.
//!
//! # Architecture Layers
//!
//! ```text
//! Host display pipeline (DisplayHost, Connector)
//!         ↓
//! Panel driver (dsi-panel crate, implements DisplayPanel)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! DSI host controller, GPIO, backlight hardware
//! ```
//!
//! # Abstraction Levels
//!
//! ## Host Side
//! - [`DisplayHost`] - Panel registration
//! - [`Connector`] - Mode reporting
//! - [`DisplayPanel`] - Lifecycle the pipeline drives
//!
//! ## Device Side
//! - [`DsiDevice`] - DSI link configuration and DCS writes
//! - [`Backlight`] / [`BacklightLookup`] - Optional backlight
//! - [`gpio`] - Reset line placeholder
//!
//! # Features
//!
//! - `std`: Enable standard library support and the [`mocks`] module
//! - `defmt`: Enable defmt::Format derives
//!
//! # Example
//!
//! ```no_run
//! use platform::DsiDevice;
//!
//! fn wake<D: DsiDevice>(dsi: &mut D) -> Result<(), D::Error> {
//!     dsi.exit_sleep_mode()?;
//!     dsi.set_display_on()
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
// Pedantic lints suppressed for this HAL crate:
#![allow(clippy::doc_markdown)] // DCS opcode names in doc comments
#![allow(clippy::must_use_candidate)] // accessors, callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod backlight;
pub mod display;
pub mod dsi;
pub mod gpio;
pub mod host;
pub mod mocks;

// Re-export main high-level traits
pub use backlight::{
    Backlight, BacklightError, BacklightLookup, GpioBacklight, NoBacklight, MAX_BRIGHTNESS,
    NO_BACKLIGHT,
};
pub use display::DisplayPanel;
pub use dsi::{DcsCommand, DsiDevice, TearMode};
pub use gpio::NoResetPin;
pub use host::{
    Connector, ConnectorType, DisplayHost, DisplayMode, HostError, PanelId, PanelInfo,
};
