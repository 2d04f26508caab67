//! # License Identity Newtypes
//!
//! A license carries two identity strings: the opaque license key handed to
//! the customer and the issuer that vouches for it. Both are newtypes so a
//! key can never be passed where an issuer is expected.
//!
//! Neither type validates its format. Key formats belong to whatever layer
//! distributes and verifies keys; the data model stores the string as given.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque license key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenseKey(String);

/// Identity of the issuing authority.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Issuer(String);

impl LicenseKey {
    /// Wrap an existing key string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Generate a random placeholder key (UUID v4, uppercase, hyphenated).
    ///
    /// New licenses start with one of these until the caller sets a real key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string().to_uppercase())
    }

    /// Borrow the key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Issuer {
    /// Wrap an issuer identity.
    pub fn new(issuer: impl Into<String>) -> Self {
        Self(issuer.into())
    }

    /// Borrow the issuer string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether no issuer has been set yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for LicenseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for Issuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
