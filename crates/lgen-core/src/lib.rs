//! # lgen-core — Foundational Types for License Generation
//!
//! This crate is the leaf of the license generation workspace. It defines the
//! value types every other crate builds on: typed feature grants, UTC-only
//! timestamps, identity newtypes for license keys and issuers, and the
//! canonical byte form used for digests and signatures.
//!
//! ## Key Design Principles
//!
//! 1. **Closed feature value sum type.** `FeatureValue` has exactly six kinds.
//!    Every consumer must `match` all of them; there is no implicit coercion
//!    between kinds.
//!
//! 2. **Bit-exact feature equality.** Floats compare by IEEE-754 bit pattern,
//!    byte payloads byte-for-byte. `Int(42)` never equals `Float(42.0)`.
//!
//! 3. **`CanonicalBytes` newtype.** All digest and signature input flows
//!    through `CanonicalBytes::new()` (RFC 8785 JCS, floats rejected).
//!
//! 4. **UTC-only timestamps.** `Timestamp` enforces UTC with Z suffix and
//!    seconds precision.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `lgen-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod encoding;
pub mod error;
pub mod feature;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, sha256_hex, ContentDigest, DigestAlgorithm};
pub use error::{CoreError, FeatureTypeError};
pub use feature::{FeatureKind, FeatureValue};
pub use identity::{Issuer, LicenseKey};
pub use temporal::Timestamp;
