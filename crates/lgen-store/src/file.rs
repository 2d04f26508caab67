//! # Filesystem Store
//!
//! Writes sealed license documents as pretty-printed JSON and reads them
//! back with full verification.

use std::fs;
use std::path::{Path, PathBuf};

use lgen_crypto::{Ed25519KeyPair, Ed25519PublicKey};
use lgen_license::{License, LicenseStore};

use crate::document::LicenseDocument;
use crate::error::StoreError;

/// JSON-on-disk license store.
///
/// A store configured with a signer attaches an Ed25519 proof to every
/// document it writes. A store configured with a trusted key refuses to
/// load documents not signed by that key.
#[derive(Debug, Default)]
pub struct FileLicenseStore {
    signer: Option<Ed25519KeyPair>,
    trusted_key: Option<Ed25519PublicKey>,
}

impl FileLicenseStore {
    /// An unsigned store that accepts any internally consistent document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign every saved document with `key_pair`.
    pub fn with_signer(mut self, key_pair: Ed25519KeyPair) -> Self {
        self.signer = Some(key_pair);
        self
    }

    /// Require loaded documents to be signed by `public_key`.
    pub fn with_trusted_key(mut self, public_key: Ed25519PublicKey) -> Self {
        self.trusted_key = Some(public_key);
        self
    }

    /// Public key of the configured signer, if any.
    pub fn signer_public_key(&self) -> Option<Ed25519PublicKey> {
        self.signer.as_ref().map(Ed25519KeyPair::public_key)
    }

    /// Read and fully verify the document at `path`.
    pub fn load_document(&self, path: impl AsRef<Path>) -> Result<LicenseDocument, StoreError> {
        let path = path.as_ref();
        let raw = fs::read(path).map_err(|e| StoreError::io(path, e))?;
        let document: LicenseDocument = serde_json::from_slice(&raw)?;
        document.verify(self.trusted_key.as_ref()).map_err(|err| {
            tracing::warn!(path = %path.display(), %err, "license document rejected");
            err
        })?;
        tracing::debug!(
            path = %path.display(),
            license_key = %document.license.license_key(),
            signed = document.proof.is_some(),
            "license document loaded"
        );
        Ok(document)
    }

    /// Read, verify, and unwrap the license at `path`.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<License, StoreError> {
        self.load_document(path).map(LicenseDocument::into_license)
    }
}

impl LicenseStore for FileLicenseStore {
    type Error = StoreError;

    fn save(&self, license: &License, destination: &Path) -> Result<(), StoreError> {
        let document = LicenseDocument::seal(license, self.signer.as_ref())?;
        let mut json = serde_json::to_vec_pretty(&document)?;
        json.push(b'\n');

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        write_replacing(destination, &json)?;

        tracing::info!(
            path = %destination.display(),
            license_key = %license.license_key(),
            kind = %license.kind(),
            digest = %document.digest,
            signed = document.proof.is_some(),
            "license saved"
        );
        Ok(())
    }
}

/// Write `bytes` to a sibling staging file, then rename it over `destination`.
fn write_replacing(destination: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let staging = staging_path(destination)?;
    if let Err(e) = fs::write(&staging, bytes) {
        let _ = fs::remove_file(&staging);
        return Err(StoreError::io(&staging, e));
    }
    if let Err(e) = fs::rename(&staging, destination) {
        let _ = fs::remove_file(&staging);
        return Err(StoreError::io(destination, e));
    }
    Ok(())
}

fn staging_path(destination: &Path) -> Result<PathBuf, StoreError> {
    let name = destination
        .file_name()
        .ok_or_else(|| StoreError::InvalidDestination(destination.to_path_buf()))?;
    let mut staged = std::ffi::OsString::from(".");
    staged.push(name);
    staged.push(".partial");
    Ok(destination.with_file_name(staged))
}
