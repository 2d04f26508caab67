//! # License Entity
//!
//! A license is an identity-bound document: an opaque key, the issuer that
//! vouches for it, an issue date, an optional expiry, and a map of named,
//! typed feature grants. The variant is fixed at construction.
//!
//! ## Defaults
//!
//! Every constructor starts from a fresh random key placeholder, an empty
//! issuer, and no features. Trials derive their expiry from the issue date
//! and their [`TrialPolicy`]; all other variants start with no expiry.
//!
//! Features live in a `BTreeMap` so that serialization (and therefore the
//! canonical bytes a backend signs) is independent of insertion order.

use std::collections::BTreeMap;

use lgen_core::{FeatureValue, Issuer, LicenseKey, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::LicenseError;
use crate::variant::{LicenseKind, LicenseVariant, TrialPolicy};

/// A software license under assembly or reloaded from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub(crate) variant: LicenseVariant,
    pub(crate) license_key: LicenseKey,
    pub(crate) issuer: Issuer,
    pub(crate) issued_at: Timestamp,
    #[serde(default)]
    pub(crate) expiration_date: Option<Timestamp>,
    #[serde(default)]
    pub(crate) features: BTreeMap<String, FeatureValue>,
}

impl License {
    /// A standard license issued now.
    pub fn standard() -> Self {
        Self::assemble(LicenseVariant::Standard, Timestamp::now(), None)
    }

    /// A trial license issued now, expiring per `policy`.
    pub fn trial(policy: TrialPolicy) -> Result<Self, LicenseError> {
        Self::new(LicenseVariant::Trial { policy }, Timestamp::now())
    }

    /// An unbound node-locked license issued now.
    pub fn node_locked() -> Self {
        Self::assemble(
            LicenseVariant::NodeLocked {
                node_fingerprint: None,
            },
            Timestamp::now(),
            None,
        )
    }

    /// A subscription license issued now.
    pub fn subscription(subscription_id: impl Into<String>) -> Self {
        Self::assemble(
            LicenseVariant::Subscription {
                subscription_id: subscription_id.into(),
            },
            Timestamp::now(),
            None,
        )
    }

    /// A license of any variant with an explicit issue date.
    ///
    /// Fails only for trials whose derived expiry is out of range.
    pub fn new(variant: LicenseVariant, issued_at: Timestamp) -> Result<Self, LicenseError> {
        let expiration_date = match &variant {
            LicenseVariant::Trial { policy } => Some(trial_expiry(issued_at, policy)?),
            _ => None,
        };
        Ok(Self::assemble(variant, issued_at, expiration_date))
    }

    fn assemble(
        variant: LicenseVariant,
        issued_at: Timestamp,
        expiration_date: Option<Timestamp>,
    ) -> Self {
        Self {
            variant,
            license_key: LicenseKey::generate(),
            issuer: Issuer::default(),
            issued_at,
            expiration_date,
            features: BTreeMap::new(),
        }
    }

    /// Variant with its data.
    pub fn variant(&self) -> &LicenseVariant {
        &self.variant
    }

    /// Variant discriminator.
    pub fn kind(&self) -> LicenseKind {
        self.variant.kind()
    }

    /// The license key.
    pub fn license_key(&self) -> &LicenseKey {
        &self.license_key
    }

    /// The issuing authority.
    pub fn issuer(&self) -> &Issuer {
        &self.issuer
    }

    /// When the license was issued.
    pub fn issued_at(&self) -> Timestamp {
        self.issued_at
    }

    /// Expiry, or `None` for a license that never expires.
    pub fn expiration_date(&self) -> Option<Timestamp> {
        self.expiration_date
    }

    /// Whether the license has expired at `at`. The expiry instant itself
    /// counts as expired.
    pub fn is_expired_at(&self, at: Timestamp) -> bool {
        self.expiration_date.is_some_and(|expiry| at >= expiry)
    }

    /// All feature grants, keyed by feature name.
    pub fn features(&self) -> &BTreeMap<String, FeatureValue> {
        &self.features
    }

    /// One feature grant by name.
    pub fn feature(&self, name: &str) -> Option<&FeatureValue> {
        self.features.get(name)
    }

    /// Machine fingerprint of a bound node-locked license.
    pub fn node_fingerprint(&self) -> Option<&str> {
        match &self.variant {
            LicenseVariant::NodeLocked { node_fingerprint } => node_fingerprint.as_deref(),
            _ => None,
        }
    }

    /// Check the variant invariants a builder-assembled license always
    /// satisfies. Backends call this on reload, since a deserialized
    /// license has not passed through the builder.
    pub fn validate(&self) -> Result<(), LicenseError> {
        if let LicenseVariant::Trial { policy } = &self.variant {
            let expected = trial_expiry(self.issued_at, policy)?;
            if self.expiration_date != Some(expected) {
                return Err(LicenseError::Invariant {
                    kind: LicenseKind::Trial,
                    reason: format!(
                        "trial issued {} with a {}-day policy must expire at {expected}, found {}",
                        self.issued_at,
                        policy.duration_days,
                        display_expiry(self.expiration_date),
                    ),
                });
            }
        }
        Ok(())
    }
}

fn trial_expiry(issued_at: Timestamp, policy: &TrialPolicy) -> Result<Timestamp, LicenseError> {
    issued_at
        .plus_days(policy.duration_days)
        .map_err(|e| LicenseError::Invariant {
            kind: LicenseKind::Trial,
            reason: e.to_string(),
        })
}

fn display_expiry(expiry: Option<Timestamp>) -> String {
    expiry.map_or_else(|| "no expiry".to_string(), |ts| ts.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    #[test]
    fn test_defaults() {
        let lic = License::standard();
        assert_eq!(lic.kind(), LicenseKind::Standard);
        assert!(lic.issuer().is_empty());
        assert!(lic.features().is_empty());
        assert_eq!(lic.expiration_date(), None);
        assert_eq!(lic.license_key().as_str().len(), 36);
    }

    #[test]
    fn test_each_license_gets_a_fresh_key() {
        assert_ne!(License::standard().license_key(), License::standard().license_key());
    }

    #[test]
    fn test_trial_expiry_derived_from_policy() {
        let lic = License::new(
            LicenseVariant::Trial {
                policy: TrialPolicy::days(30),
            },
            ts("2026-03-01T09:00:00Z"),
        )
        .unwrap();
        assert_eq!(lic.expiration_date(), Some(ts("2026-03-31T09:00:00Z")));
        lic.validate().unwrap();
    }

    #[test]
    fn test_trial_constructor_sets_expiry() {
        let lic = License::trial(TrialPolicy::days(14)).unwrap();
        assert_eq!(
            lic.expiration_date(),
            Some(lic.issued_at().plus_days(14).unwrap())
        );
    }

    #[test]
    fn test_trial_expiry_past_year_9999_is_refused() {
        let err = License::new(
            LicenseVariant::Trial {
                policy: TrialPolicy::days(3_000_000),
            },
            ts("2026-01-01T00:00:00Z"),
        )
        .unwrap_err();
        assert!(matches!(err, LicenseError::Invariant { kind: LicenseKind::Trial, .. }));
    }

    #[test]
    fn test_longest_trial_reloads() {
        let lic = License::new(
            LicenseVariant::Trial {
                policy: TrialPolicy::days(1),
            },
            ts("9999-12-30T00:00:00Z"),
        )
        .unwrap();
        let json = serde_json::to_string(&lic).unwrap();
        let parsed: License = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, lic);
        parsed.validate().unwrap();
    }

    #[test]
    fn test_non_trial_variants_start_without_expiry() {
        for lic in [
            License::standard(),
            License::node_locked(),
            License::subscription("sub_1"),
        ] {
            assert_eq!(lic.expiration_date(), None, "{:?}", lic.kind());
            lic.validate().unwrap();
        }
    }

    #[test]
    fn test_is_expired_at() {
        let mut lic = License::standard();
        assert!(!lic.is_expired_at(ts("2999-01-01T00:00:00Z")));
        lic.expiration_date = Some(ts("2026-06-01T00:00:00Z"));
        assert!(!lic.is_expired_at(ts("2026-05-31T23:59:59Z")));
        assert!(lic.is_expired_at(ts("2026-06-01T00:00:00Z")));
    }

    #[test]
    fn test_validate_rejects_tampered_trial_expiry() {
        let mut lic = License::trial(TrialPolicy::days(14)).unwrap();
        lic.expiration_date = None;
        let err = lic.validate().unwrap_err();
        assert!(matches!(err, LicenseError::Invariant { kind: LicenseKind::Trial, .. }));
        assert!(err.to_string().contains("found no expiry"));
    }

    #[test]
    fn test_node_fingerprint_only_on_node_locked() {
        assert_eq!(License::standard().node_fingerprint(), None);
        assert_eq!(License::node_locked().node_fingerprint(), None);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut lic = License::subscription("sub_9");
        lic.features
            .insert("seats".to_string(), FeatureValue::from_int(25));
        let json = serde_json::to_string(&lic).unwrap();
        let parsed: License = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, lic);
    }

    #[test]
    fn test_serialized_shape() {
        let lic = License::new(LicenseVariant::Standard, ts("2026-01-15T12:00:00Z")).unwrap();
        let value = serde_json::to_value(&lic).unwrap();
        assert_eq!(value["variant"]["kind"], "standard");
        assert_eq!(value["issued_at"], "2026-01-15T12:00:00Z");
        assert_eq!(value["expiration_date"], serde_json::Value::Null);
        assert_eq!(value["issuer"], "");
    }
}
