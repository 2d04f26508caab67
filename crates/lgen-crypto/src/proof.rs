//! # License Proofs
//!
//! A detached signature record that accompanies a persisted license. The
//! proof names its algorithm and carries the signer's public key, so a
//! verifier can check integrity from the document alone and, separately,
//! decide whether it trusts that key.

use lgen_core::error::CryptoError;
use lgen_core::{CanonicalBytes, Timestamp};
use serde::{Deserialize, Serialize};

use crate::ed25519::{verify_with_public_key, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// The type of cryptographic proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProofType {
    /// Ed25519 signature over the license's canonical bytes.
    Ed25519Signature2020,
}

/// A detached proof over a license's canonical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseProof {
    /// The type of proof.
    #[serde(rename = "type")]
    pub proof_type: ProofType,
    /// When the proof was produced.
    pub created: Timestamp,
    /// Public key of the signer.
    pub public_key: Ed25519PublicKey,
    /// Signature over the canonical bytes.
    pub signature: Ed25519Signature,
}

impl LicenseProof {
    /// Sign `data` with `key_pair`.
    pub fn sign(data: &CanonicalBytes, key_pair: &Ed25519KeyPair) -> Self {
        Self {
            proof_type: ProofType::Ed25519Signature2020,
            created: Timestamp::now(),
            public_key: key_pair.public_key(),
            signature: key_pair.sign(data),
        }
    }

    /// Check the signature against the embedded public key.
    ///
    /// This proves integrity only. Whether the embedded key is trusted is a
    /// separate decision; see [`LicenseProof::verify_trusted`].
    pub fn verify(&self, data: &CanonicalBytes) -> Result<(), CryptoError> {
        verify_with_public_key(data, &self.signature, &self.public_key)
    }

    /// Check that the proof was made by `trusted` and that the signature holds.
    pub fn verify_trusted(
        &self,
        data: &CanonicalBytes,
        trusted: &Ed25519PublicKey,
    ) -> Result<(), CryptoError> {
        if &self.public_key != trusted {
            return Err(CryptoError::VerificationFailed(format!(
                "proof signed by untrusted key {}",
                self.public_key
            )));
        }
        self.verify(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> CanonicalBytes {
        CanonicalBytes::new(&serde_json::json!({"license_key": "K-1"})).unwrap()
    }

    #[test]
    fn test_proof_verifies() {
        let kp = Ed25519KeyPair::generate();
        let proof = LicenseProof::sign(&data(), &kp);
        assert_eq!(proof.proof_type, ProofType::Ed25519Signature2020);
        proof.verify(&data()).unwrap();
        proof.verify_trusted(&data(), &kp.public_key()).unwrap();
    }

    #[test]
    fn test_untrusted_signer_rejected() {
        let kp = Ed25519KeyPair::generate();
        let trusted = Ed25519KeyPair::generate().public_key();
        let proof = LicenseProof::sign(&data(), &kp);
        let err = proof.verify_trusted(&data(), &trusted).unwrap_err();
        assert!(err.to_string().contains("untrusted key"));
    }

    #[test]
    fn test_swapped_public_key_fails() {
        let kp = Ed25519KeyPair::generate();
        let mut proof = LicenseProof::sign(&data(), &kp);
        proof.public_key = Ed25519KeyPair::generate().public_key();
        assert!(proof.verify(&data()).is_err());
    }

    #[test]
    fn test_proof_serde_shape() {
        let kp = Ed25519KeyPair::from_seed(&[1u8; 32]);
        let proof = LicenseProof::sign(&data(), &kp);
        let value = serde_json::to_value(&proof).unwrap();
        assert_eq!(value["type"], "Ed25519Signature2020");
        assert_eq!(value["public_key"], kp.public_key().to_hex());
        let parsed: LicenseProof = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, proof);
    }
}
