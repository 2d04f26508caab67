//! # lgen-crypto — Signing for Persisted Licenses
//!
//! Provides the cryptographic pieces a persistence backend needs to seal a
//! license document:
//!
//! - **Ed25519** key pairs, public keys, and signatures over
//!   `CanonicalBytes` (the only accepted signing input).
//! - **`LicenseProof`**, a detached proof record (algorithm, signer public
//!   key, signature) that travels next to the license it covers.
//!
//! Key generation policy and key storage are out of scope: callers hand in
//! a 32-byte seed or a ready key pair.
//!
//! ## Crate Policy
//!
//! - Depends only on `lgen-core` internally.
//! - No mocking of cryptographic operations in tests.

pub mod ed25519;
pub mod proof;

pub use ed25519::{verify, verify_with_public_key, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use proof::{LicenseProof, ProofType};
