//! # lgen-store — Filesystem License Persistence
//!
//! A reference implementation of the `LicenseStore` contract. Licenses are
//! written as JSON documents that carry:
//!
//! - the license itself, in its lossless serde form;
//! - a SHA-256 digest of the license's canonical bytes;
//! - optionally, an Ed25519 proof over the same canonical bytes.
//!
//! Reloading recomputes the digest, checks the proof, and re-validates the
//! license's variant invariants before returning it.
//!
//! ## Crate Policy
//!
//! - The license model does not depend on this crate; any other backend can
//!   implement `LicenseStore` instead.
//! - Writes go to a sibling temporary file and are renamed into place, so a
//!   failed save never leaves a truncated document at the destination.

pub mod document;
pub mod error;
pub mod file;

pub use document::{LicenseDocument, DOCUMENT_FORMAT};
pub use error::StoreError;
pub use file::FileLicenseStore;
