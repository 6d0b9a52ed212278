//! Built-in panel descriptors
//!
//! One module per vendor; each exports its timing modes and descriptors.

pub mod gcat;

pub use gcat::*;
