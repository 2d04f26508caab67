//! # Verify Subcommand
//!
//! Loads a license document and checks its digest, proof, and variant
//! invariants. Exit code 0 means valid, 2 means the document was read but
//! failed verification.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use lgen_crypto::Ed25519PublicKey;
use lgen_store::{FileLicenseStore, StoreError};

/// Arguments for `lgen verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// License document to verify.
    pub path: PathBuf,

    /// Hex-encoded Ed25519 public key the document must be signed by.
    #[arg(long)]
    pub public_key: Option<String>,
}

/// Execute `lgen verify`.
pub fn run_verify(args: &VerifyArgs) -> Result<u8> {
    let mut store = FileLicenseStore::new();
    if let Some(hex) = &args.public_key {
        let key = Ed25519PublicKey::from_hex(hex.trim()).context("invalid --public-key")?;
        store = store.with_trusted_key(key);
    }

    match store.load_document(&args.path) {
        Ok(document) => {
            let license = &document.license;
            println!("OK: {} license {} is valid", license.kind(), license.license_key());
            println!("  digest: {}", document.digest);
            match &document.proof {
                Some(proof) => println!("  signer: {}", proof.public_key.to_hex()),
                None => println!("  signer: (unsigned)"),
            }
            Ok(0)
        }
        Err(err @ (StoreError::Io { .. } | StoreError::Serialization(_))) => Err(err)
            .with_context(|| format!("failed to read license: {}", args.path.display())),
        Err(err) => {
            tracing::info!(path = %args.path.display(), %err, "verification failed");
            eprintln!("INVALID: {}", args.path.display());
            eprintln!("  - {err}");
            Ok(2)
        }
    }
}
