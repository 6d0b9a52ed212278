//! Compatible-string registry
//!
//! Maps the hardware identifier a device announces (a device-tree style
//! `"vendor,model"` compatible string) to its [`PanelDescriptor`]. The table
//! is `const` data: it is built at compile time and never written.

use crate::panels;
use crate::PanelDescriptor;

/// One row of the registry.
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    /// Hardware identifier, e.g. `"gcat,sn65_ws7d"`
    pub compatible: &'static str,
    /// Descriptor bound to that identifier
    pub descriptor: &'static PanelDescriptor,
}

/// Read-only lookup table from compatible string to descriptor.
#[derive(Debug, Clone, Copy)]
pub struct DescriptorRegistry {
    entries: &'static [RegistryEntry],
}

/// Registry of every panel this crate supports.
pub const BUILTIN: DescriptorRegistry = DescriptorRegistry::new(&[RegistryEntry {
    compatible: "gcat,sn65_ws7d",
    descriptor: &panels::SN65_WS7D,
}]);

impl DescriptorRegistry {
    /// Wrap a static table. Keys must be unique; the first match wins.
    pub const fn new(entries: &'static [RegistryEntry]) -> Self {
        Self { entries }
    }

    /// Resolve a compatible string to its descriptor.
    pub fn resolve(&self, compatible: &str) -> Result<&'static PanelDescriptor, ResolveError> {
        self.entries
            .iter()
            .find(|entry| entry.compatible == compatible)
            .map(|entry| entry.descriptor)
            .ok_or(ResolveError::NotFound)
    }

    /// `true` if the identifier has compiled-in support.
    pub fn contains(&self, compatible: &str) -> bool {
        self.resolve(compatible).is_ok()
    }

    /// Iterate over all entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &'static RegistryEntry> {
        self.entries.iter()
    }

    /// Number of supported identifiers.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` for an empty table.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve against the [`BUILTIN`] registry.
pub fn resolve(compatible: &str) -> Result<&'static PanelDescriptor, ResolveError> {
    BUILTIN.resolve(compatible)
}

/// Registry lookup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResolveError {
    /// No compiled-in support for this identifier
    NotFound,
}

#[cfg(feature = "std")]
impl std::error::Error for ResolveError {}

impl core::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "no panel descriptor for this compatible string"),
        }
    }
}
