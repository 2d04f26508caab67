//! # lgen-cli — License Generation CLI
//!
//! Provides the `lgen` command-line interface over the license stack.
//!
//! ## Subcommands
//!
//! - `lgen issue`: Build a license from a YAML issuance profile and save it.
//! - `lgen verify`: Check a saved document's digest, proof, and invariants.
//! - `lgen inspect`: Print a saved license as JSON.
//!
//! ```bash
//! lgen issue --profile acme.yaml --out acme.lic --seed-file issuer.seed
//! lgen verify acme.lic --public-key 8a88e3dd...
//! lgen inspect acme.lic --envelope
//! ```
//!
//! Handlers return the process exit code: `0` on success, `2` when a document
//! was read but failed verification. Operational failures surface as errors.

pub mod inspect;
pub mod issue;
pub mod profile;
pub mod verify;
