//! Driver error types
//!
//! Both enums are generic over the DSI transport's error so callers keep the
//! underlying cause.

use panel_specs::{DescriptorError, ResolveError};
use platform::{BacklightError, HostError};

use crate::state::{Operation, PanelState};

/// Step of `prepare` that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PrepareStep {
    /// DCS soft reset (0x01)
    SoftReset,
    /// Vendor init sequence
    InitSequence,
    /// DCS tear-on (0x35)
    TearOn,
    /// DCS exit sleep (0x11)
    ExitSleep,
}

impl PrepareStep {
    /// Stable lower-case name for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SoftReset => "soft reset",
            Self::InitSequence => "init sequence",
            Self::TearOn => "tear on",
            Self::ExitSleep => "exit sleep",
        }
    }
}

impl core::fmt::Display for PrepareStep {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by lifecycle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError<E> {
    /// A transport write during `prepare` failed; panel stays unprepared.
    PrepareFailed {
        /// Step that failed
        step: PrepareStep,
        /// Transport error
        source: E,
    },
    /// Display-on failed; panel stays prepared.
    EnableFailed(E),
    /// Display-off failed; panel stays enabled.
    DisableFailed(E),
    /// Sleep-enter failed; panel is considered unprepared anyway.
    UnprepareFailed(E),
    /// Operation called out of order; nothing was sent.
    InvalidState {
        /// Requested operation
        op: Operation,
        /// State at the time of the call
        state: PanelState,
    },
    /// Reset GPIO could not be driven.
    Gpio(Operation),
    /// Host refused the probed mode.
    ResourceExhausted(HostError),
}

impl<E> PanelError<E> {
    /// Transport error behind this failure, if any.
    pub fn source_error(&self) -> Option<&E> {
        match self {
            Self::PrepareFailed { source, .. } => Some(source),
            Self::EnableFailed(e) | Self::DisableFailed(e) | Self::UnprepareFailed(e) => Some(e),
            Self::InvalidState { .. } | Self::Gpio(_) | Self::ResourceExhausted(_) => None,
        }
    }
}

impl<E: core::fmt::Display> core::fmt::Display for PanelError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::PrepareFailed { step, source } => {
                write!(f, "Panel prepare failed at {step}: {source}")
            }
            Self::EnableFailed(e) => write!(f, "Panel enable failed: {e}"),
            Self::DisableFailed(e) => write!(f, "Panel disable failed: {e}"),
            Self::UnprepareFailed(e) => write!(f, "Panel unprepare failed: {e}"),
            Self::InvalidState { op, state } => {
                write!(f, "Cannot {op} panel while {state}")
            }
            Self::Gpio(op) => write!(f, "Reset GPIO error during {op}"),
            Self::ResourceExhausted(e) => write!(f, "Failed to add mode: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug + core::fmt::Display> std::error::Error for PanelError<E> {}

/// Errors returned by attach. The panel is not registered with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AttachError<E> {
    /// No compiled-in support for the compatible string
    Resolution(ResolveError),
    /// Resolved descriptor is inconsistent
    Descriptor(DescriptorError),
    /// DSI configuration or attach failed
    Transport(E),
    /// Backlight lookup failed
    Dependency(BacklightError),
    /// Host registration failed
    Resource(HostError),
}

impl<E: core::fmt::Display> core::fmt::Display for AttachError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Resolution(e) => write!(f, "Panel resolution failed: {e}"),
            Self::Descriptor(e) => write!(f, "Panel descriptor rejected: {e}"),
            Self::Transport(e) => write!(f, "DSI transport error: {e}"),
            Self::Dependency(e) => write!(f, "Panel dependency missing: {e}"),
            Self::Resource(e) => write!(f, "Panel registration failed: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug + core::fmt::Display> std::error::Error for AttachError<E> {}
