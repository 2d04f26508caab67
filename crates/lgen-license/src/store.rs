//! # Persistence Contract
//!
//! The single seam between the license model and whatever serializes,
//! signs, and writes licenses. The model makes no assumption about the
//! on-disk or on-wire format; it only hands over a complete license.

use std::path::Path;

use crate::license::License;

/// A backend that persists finished licenses.
///
/// Implementations choose their own error type; [`License::save_license`]
/// returns it unchanged.
pub trait LicenseStore {
    /// Failure reported by the backend.
    type Error;

    /// Persist `license` at `destination`.
    ///
    /// Must not retain a partially written document at `destination` when it
    /// returns an error.
    fn save(&self, license: &License, destination: &Path) -> Result<(), Self::Error>;
}
