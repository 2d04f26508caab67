//! # Error Types
//!
//! Errors shared by every crate in the workspace. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! - Canonicalization errors carry the rejected value.
//! - Feature type mismatches name both the expected and the stored kind.
//! - Cryptographic errors fail loudly with full context.

use thiserror::Error;

use crate::feature::FeatureKind;

/// Top-level error type for core value handling.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A value failed validation at construction (timestamps, encodings).
    #[error("validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error in cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Key generation or parsing failed.
    #[error("key error: {0}")]
    KeyError(String),
}

/// A feature value was read as a kind it does not hold.
///
/// Feature values never coerce between kinds; reading an `Int` grant as a
/// `Float` is an error, not a conversion.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("feature type mismatch: expected {expected}, found {found}")]
pub struct FeatureTypeError {
    /// The kind the caller asked for.
    pub expected: FeatureKind,
    /// The kind actually stored.
    pub found: FeatureKind,
}
