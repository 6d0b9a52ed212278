//! Display panel abstraction layer
//!
//! The host display pipeline drives every registered panel through the same
//! four-step power lifecycle and asks it for the modes it supports.

use crate::host::Connector;

/// Panel lifecycle as seen by the display pipeline.
///
/// Call order is `prepare` → `enable` → `disable` → `unprepare`. Each call
/// completes (or fails) before the next begins.
pub trait DisplayPanel {
    /// Error type for panel operations
    type Error: core::fmt::Debug;

    /// Power the panel up and run its initialisation. Video is not yet flowing.
    fn prepare(&mut self) -> Result<(), Self::Error>;

    /// Start showing frames. The video stream is already running.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Stop showing frames. The video stream is still running.
    fn disable(&mut self) -> Result<(), Self::Error>;

    /// Power the panel down.
    fn unprepare(&mut self) -> Result<(), Self::Error>;

    /// Report supported modes to `connector`. Returns how many were added.
    fn get_modes<C: Connector>(&self, connector: &mut C) -> Result<usize, Self::Error>;

    /// Backlight brightness, `None` when the panel has no backlight.
    fn brightness(&self) -> Option<u8>;
}
