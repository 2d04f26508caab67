//! # License Documents
//!
//! The envelope a license is persisted in.
//!
//! ```text
//! {
//!   "format":  "lgen-license/v1",
//!   "license": { ...License... },
//!   "digest":  "sha256:<hex>",          // over canonical(license)
//!   "proof":   { "type": "Ed25519Signature2020", ... }   // optional
//! }
//! ```
//!
//! Digest and proof both cover the canonical bytes of the `license` member
//! alone, so the envelope can gain fields without invalidating old proofs.

use lgen_core::{sha256_digest, CanonicalBytes, ContentDigest};
use lgen_crypto::{Ed25519KeyPair, Ed25519PublicKey, LicenseProof};
use lgen_license::License;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Format tag written into every document.
pub const DOCUMENT_FORMAT: &str = "lgen-license/v1";

/// A sealed license document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseDocument {
    /// Document format tag.
    pub format: String,
    /// The license.
    pub license: License,
    /// SHA-256 of the license's canonical bytes.
    pub digest: ContentDigest,
    /// Signature over the license's canonical bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<LicenseProof>,
}

impl LicenseDocument {
    /// Seal `license`, signing it when `signer` is given.
    pub fn seal(license: &License, signer: Option<&Ed25519KeyPair>) -> Result<Self, StoreError> {
        let canonical = CanonicalBytes::new(license)?;
        Ok(Self {
            format: DOCUMENT_FORMAT.to_string(),
            license: license.clone(),
            digest: sha256_digest(&canonical),
            proof: signer.map(|kp| LicenseProof::sign(&canonical, kp)),
        })
    }

    /// Check format, digest, proof, and license invariants.
    ///
    /// With `trusted` set, the document must carry a proof made by that key.
    /// Without it, a proof (if present) must still be internally valid.
    pub fn verify(&self, trusted: Option<&Ed25519PublicKey>) -> Result<(), StoreError> {
        if self.format != DOCUMENT_FORMAT {
            return Err(StoreError::UnsupportedFormat(self.format.clone()));
        }

        let canonical = CanonicalBytes::new(&self.license)?;
        let computed = sha256_digest(&canonical);
        if computed != self.digest {
            return Err(StoreError::DigestMismatch {
                recorded: self.digest.clone(),
                computed,
            });
        }

        match (&self.proof, trusted) {
            (Some(proof), Some(key)) => proof.verify_trusted(&canonical, key)?,
            (Some(proof), None) => proof.verify(&canonical)?,
            (None, Some(_)) => return Err(StoreError::MissingProof),
            (None, None) => {}
        }

        self.license.validate()?;
        Ok(())
    }

    /// Take the license out of the envelope.
    pub fn into_license(self) -> License {
        self.license
    }
}
