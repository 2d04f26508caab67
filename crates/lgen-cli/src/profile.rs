//! # Issuance Profiles
//!
//! YAML descriptions of a license to issue:
//!
//! ```yaml
//! issuer: ACME Corp
//! license_key: ACME-0001          # optional, generated when absent
//! issued_at: 2026-01-01T00:00:00Z # optional, defaults to now
//! expires: 2027-01-01T00:00:00Z   # optional, not allowed for trials
//! variant:
//!   kind: trial                   # standard | trial | node_locked | subscription
//!   days: 30
//! features:
//!   max-users: { type: int, value: 25 }
//!   ratio:     { type: float, value: 0.75 }
//!   beta:      { type: bool, value: true }
//!   edition:   { type: string, value: enterprise }
//!   support:   { type: datetime, value: 2028-01-01T00:00:00Z }
//!   salt:      { type: bytes, value: 00ff10 }
//! ```
//!
//! Profiles are plain data. `build_license` runs every field through the
//! license builder, so variant constraints apply exactly as they do to
//! library callers.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use lgen_core::encoding::from_hex;
use lgen_core::{FeatureValue, Timestamp};
use lgen_license::{License, LicenseVariant, TrialPolicy};

/// A license issuance profile.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IssuanceProfile {
    /// Issuing organisation.
    pub issuer: String,
    /// Explicit license key; a fresh key is generated when absent.
    #[serde(default)]
    pub license_key: Option<String>,
    /// Explicit issue date (RFC 3339, UTC).
    #[serde(default)]
    pub issued_at: Option<String>,
    /// Expiry date (RFC 3339, UTC).
    #[serde(default)]
    pub expires: Option<String>,
    /// License variant.
    pub variant: ProfileVariant,
    /// Feature grants by name.
    #[serde(default)]
    pub features: BTreeMap<String, ProfileFeature>,
}

/// Variant section of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileVariant {
    Standard,
    Trial {
        days: u32,
    },
    NodeLocked {
        #[serde(default)]
        node_fingerprint: Option<String>,
    },
    Subscription {
        subscription_id: String,
    },
}

/// A feature grant as written in YAML. Floats are plain decimals here;
/// datetimes are RFC 3339 strings and byte arrays are hex.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ProfileFeature {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Datetime(String),
    Bytes(String),
}

impl ProfileFeature {
    /// Convert to a license feature value.
    pub fn to_feature_value(&self) -> Result<FeatureValue> {
        Ok(match self {
            Self::Bool(b) => FeatureValue::from_bool(*b),
            Self::Int(i) => FeatureValue::from_int(*i),
            Self::Float(f) => FeatureValue::from_float(*f),
            Self::String(s) => FeatureValue::from_string(s.as_str()),
            Self::Datetime(s) => FeatureValue::from_datetime(parse_time(s)?),
            Self::Bytes(hex) => {
                let bytes = from_hex(hex).with_context(|| format!("invalid hex bytes {hex:?}"))?;
                FeatureValue::from_bytes(&bytes)
            }
        })
    }
}

impl IssuanceProfile {
    /// Parse a profile from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("invalid issuance profile")
    }

    /// Read and parse a profile file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read profile: {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("in profile {}", path.display()))
    }

    /// Assemble the license this profile describes.
    pub fn build_license(&self) -> Result<License> {
        let issued_at = match &self.issued_at {
            Some(s) => parse_time(s)?,
            None => Timestamp::now(),
        };
        let variant = match &self.variant {
            ProfileVariant::Standard => LicenseVariant::Standard,
            ProfileVariant::Trial { days } => LicenseVariant::Trial {
                policy: TrialPolicy::days(*days),
            },
            ProfileVariant::NodeLocked { .. } => LicenseVariant::NodeLocked {
                node_fingerprint: None,
            },
            ProfileVariant::Subscription { subscription_id } => LicenseVariant::Subscription {
                subscription_id: subscription_id.clone(),
            },
        };

        let mut license = License::new(variant, issued_at)?;
        license.with_issuer(self.issuer.as_str());
        if let Some(key) = &self.license_key {
            license.with_license_key(key.as_str());
        }
        if let Some(expires) = &self.expires {
            license.with_expiry_date(Some(parse_time(expires)?))?;
        }
        if let ProfileVariant::NodeLocked {
            node_fingerprint: Some(fingerprint),
        } = &self.variant
        {
            license.with_node_binding(fingerprint.as_str())?;
        }

        let mut features = BTreeMap::new();
        for (name, feature) in &self.features {
            let value = feature
                .to_feature_value()
                .with_context(|| format!("feature {name:?}"))?;
            features.insert(name.clone(), value);
        }
        license.with_features(features)?;

        Ok(license)
    }
}

fn parse_time(s: &str) -> Result<Timestamp> {
    Timestamp::parse(s).with_context(|| format!("invalid UTC timestamp {s:?}"))
}
