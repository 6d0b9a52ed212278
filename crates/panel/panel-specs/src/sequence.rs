//! Vendor init sequences
//!
//! Each supported panel owns one [`InitSequence`] variant. A sequence is a
//! fixed list of raw DCS buffers, sent verbatim and in order right after the
//! soft reset. The set is closed: adding a panel means adding a variant.

/// Vendor configuration routine for one panel model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum InitSequence {
    /// gcat SN65 WS7D 1024×600 panel. Needs nothing beyond reset and
    /// sleep-exit, so the sequence is empty.
    Sn65Ws7d,
    /// Generic three-write vendor routine for exercising playback in
    /// downstream tests.
    #[cfg(feature = "testing")]
    Vendor,
}

/// Command buffers for [`InitSequence::Sn65Ws7d`].
const SN65_WS7D_COMMANDS: &[&[u8]] = &[];

/// Command buffers for [`InitSequence::Vendor`]: unlock, set a register,
/// lock again.
#[cfg(feature = "testing")]
pub const VENDOR_COMMANDS: &[&[u8]] = &[&[0xB0, 0x04], &[0xC1, 0x00, 0x01, 0x02], &[0xB0, 0x03]];

impl InitSequence {
    /// The raw command buffers, in transmission order.
    pub const fn commands(self) -> &'static [&'static [u8]] {
        match self {
            Self::Sn65Ws7d => SN65_WS7D_COMMANDS,
            #[cfg(feature = "testing")]
            Self::Vendor => VENDOR_COMMANDS,
        }
    }

    /// Number of command writes the sequence performs.
    pub const fn len(self) -> usize {
        self.commands().len()
    }

    /// `true` when the panel needs no vendor configuration.
    pub const fn is_empty(self) -> bool {
        self.commands().is_empty()
    }

    /// Name used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sn65Ws7d => "sn65_ws7d",
            #[cfg(feature = "testing")]
            Self::Vendor => "vendor",
        }
    }
}
