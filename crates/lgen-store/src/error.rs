//! Persistence errors.

use std::path::PathBuf;

use lgen_core::error::{CanonicalizationError, CryptoError};
use lgen_core::ContentDigest;
use lgen_license::LicenseError;
use thiserror::Error;

/// Errors raised while saving or loading license documents.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("io error at {path}: {source}")]
    Io {
        /// The path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The destination has no file name component.
    #[error("destination {0} does not name a file")]
    InvalidDestination(PathBuf),

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The license could not be canonicalized for hashing or signing.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// The document declares a format this store does not read.
    #[error("unsupported document format {0:?}")]
    UnsupportedFormat(String),

    /// The stored digest does not match the license content.
    #[error("digest mismatch: document records {recorded}, license hashes to {computed}")]
    DigestMismatch {
        /// Digest stored in the document.
        recorded: ContentDigest,
        /// Digest recomputed from the license.
        computed: ContentDigest,
    },

    /// A trusted key is configured but the document carries no proof.
    #[error("document is unsigned but a trusted signer is required")]
    MissingProof,

    /// Proof verification failed.
    #[error("proof error: {0}")]
    Crypto(#[from] CryptoError),

    /// The reloaded license violates its variant invariants.
    #[error("invalid license: {0}")]
    InvalidLicense(#[from] LicenseError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
