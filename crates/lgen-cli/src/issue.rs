//! # Issue Subcommand
//!
//! Builds a license from an issuance profile and saves it as a sealed
//! document, signed when a seed file is given.
//!
//! ```bash
//! lgen issue --profile acme.yaml --out licenses/acme.lic --seed-file issuer.seed
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use lgen_crypto::Ed25519KeyPair;
use lgen_store::FileLicenseStore;

use crate::profile::IssuanceProfile;

/// Arguments for `lgen issue`.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Path to the YAML issuance profile.
    #[arg(long)]
    pub profile: PathBuf,

    /// Destination of the license document.
    #[arg(long, short)]
    pub out: PathBuf,

    /// File holding the 32-byte Ed25519 signing seed as hex.
    #[arg(long)]
    pub seed_file: Option<PathBuf>,

    /// License key to use instead of the profile's.
    #[arg(long)]
    pub key: Option<String>,
}

/// Execute `lgen issue`.
pub fn run_issue(args: &IssueArgs) -> Result<u8> {
    let profile = IssuanceProfile::load(&args.profile)?;
    let mut license = profile.build_license()?;
    if let Some(key) = &args.key {
        license.with_license_key(key.as_str());
    }

    let mut store = FileLicenseStore::new();
    if let Some(seed_file) = &args.seed_file {
        store = store.with_signer(read_seed(seed_file)?);
    }

    license
        .save_license(&store, &args.out)
        .with_context(|| format!("failed to save license: {}", args.out.display()))?;

    tracing::info!(
        license_key = %license.license_key(),
        kind = %license.kind(),
        features = license.features().len(),
        "license issued"
    );
    println!("OK: issued {} license {}", license.kind(), license.license_key());
    println!("  wrote: {}", args.out.display());
    if let Some(public_key) = store.signer_public_key() {
        println!("  signer: {}", public_key.to_hex());
    }
    Ok(0)
}

fn read_seed(path: &Path) -> Result<Ed25519KeyPair> {
    let hex = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file: {}", path.display()))?;
    Ed25519KeyPair::from_seed_hex(&hex)
        .with_context(|| format!("invalid signing seed in {}", path.display()))
}
