//! # Inspect Subcommand
//!
//! Prints a license as JSON after checking the document's digest. Proofs
//! are checked for internal consistency only; use `lgen verify` to pin a
//! signer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use lgen_store::FileLicenseStore;

/// Arguments for `lgen inspect`.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// License document to inspect.
    pub path: PathBuf,

    /// Print the whole envelope (format, digest, proof), not just the license.
    #[arg(long)]
    pub envelope: bool,
}

/// Execute `lgen inspect`.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    let document = FileLicenseStore::new()
        .load_document(&args.path)
        .with_context(|| format!("failed to load license: {}", args.path.display()))?;

    let json = if args.envelope {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string_pretty(&document.license)?
    };
    println!("{json}");
    Ok(0)
}
