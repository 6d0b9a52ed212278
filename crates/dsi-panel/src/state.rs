//! Lifecycle states and the transition table
//!
//! ```text
//!   Unprepared ──prepare──► Prepared ──enable──► Enabled
//!        ▲                    │  ▲                  │
//!        └─────unprepare──────┘  └─────disable──────┘
//! ```
//!
//! `unprepare` from `Enabled` is accepted and lands in `Unprepared`.

/// Power/visibility state of one panel instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelState {
    /// Powered down or never initialised
    #[default]
    Unprepared,
    /// Initialised and awake, not showing frames
    Prepared,
    /// Showing frames
    Enabled,
}

/// Host-driven lifecycle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    /// `prepare`
    Prepare,
    /// `enable`
    Enable,
    /// `disable`
    Disable,
    /// `unprepare`
    Unprepare,
}

/// What an operation should do from a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Perform the operation and move to the contained state on success
    Run(PanelState),
    /// Already there; succeed without touching hardware
    Skip,
    /// Out of order; refuse without touching hardware
    Reject,
}

impl PanelState {
    /// Decide how `op` behaves from this state.
    pub const fn check(self, op: Operation) -> Transition {
        match (op, self) {
            (Operation::Prepare, Self::Unprepared) => Transition::Run(Self::Prepared),
            (Operation::Prepare, Self::Prepared | Self::Enabled) => Transition::Skip,

            (Operation::Enable, Self::Prepared) => Transition::Run(Self::Enabled),
            (Operation::Enable, Self::Enabled) => Transition::Skip,
            (Operation::Enable, Self::Unprepared) => Transition::Reject,

            (Operation::Disable, Self::Enabled) => Transition::Run(Self::Prepared),
            (Operation::Disable, Self::Prepared | Self::Unprepared) => Transition::Skip,

            (Operation::Unprepare, Self::Prepared | Self::Enabled) => {
                Transition::Run(Self::Unprepared)
            }
            (Operation::Unprepare, Self::Unprepared) => Transition::Skip,
        }
    }

    /// Stable lower-case name for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unprepared => "unprepared",
            Self::Prepared => "prepared",
            Self::Enabled => "enabled",
        }
    }
}

impl core::fmt::Display for PanelState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Operation {
    /// Stable lower-case name for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prepare => "prepare",
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::Unprepare => "unprepare",
        }
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
