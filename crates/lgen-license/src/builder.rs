//! # License Builder
//!
//! The fluent mutation surface over [`License`]. Every operation takes the
//! license by `&mut` and hands the same license back, so calls chain:
//!
//! ```
//! use lgen_license::{License, LicenseError};
//!
//! # fn main() -> Result<(), LicenseError> {
//! let mut license = License::standard();
//! license
//!     .with_issuer("ACME Corp")
//!     .with_license_key("ACME-0001")
//!     .with_feature("max-users", 10)?
//!     .with_feature("beta-channel", true)?;
//! assert_eq!(license.issuer().as_str(), "ACME Corp");
//! # Ok(())
//! # }
//! ```
//!
//! ## Rules
//!
//! - Operations that a variant may reject return `Result<&mut Self, _>`.
//!   The variant's constraint check runs first; a rejected call leaves the
//!   license exactly as it was.
//! - Issuer and key overwrites are unconditional and never fail. Their
//!   format is not validated here.
//! - `with_feature` is the single upsert path. Primitive arguments convert
//!   through `Into<FeatureValue>`, which delegates to the `FeatureValue::from_*`
//!   constructors.

use std::collections::BTreeMap;
use std::path::Path;

use lgen_core::{FeatureValue, Issuer, LicenseKey, Timestamp};

use crate::error::{LicenseError, Mutation};
use crate::license::License;
use crate::store::LicenseStore;
use crate::variant::LicenseVariant;

impl License {
    /// Set the expiry. `None` means the license never expires.
    ///
    /// # Errors
    ///
    /// [`LicenseError::Generation`] on a trial license, whatever `date` is.
    pub fn with_expiry_date(&mut self, date: Option<Timestamp>) -> Result<&mut Self, LicenseError> {
        self.permit(Mutation::SetExpiry)?;
        self.expiration_date = date;
        tracing::debug!(
            license_key = %self.license_key,
            expiry = ?date.map(|d| d.to_string()),
            "expiry set"
        );
        Ok(self)
    }

    /// Insert or replace one feature grant. A previous grant under the same
    /// name is replaced, not merged.
    pub fn with_feature(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FeatureValue>,
    ) -> Result<&mut Self, LicenseError> {
        self.permit(Mutation::UpsertFeature)?;
        let name = name.into();
        let value = value.into();
        tracing::debug!(license_key = %self.license_key, feature = %name, %value, "feature set");
        self.features.insert(name, value);
        Ok(self)
    }

    /// Replace the whole feature map. Every previous grant is discarded.
    pub fn with_features(
        &mut self,
        features: BTreeMap<String, FeatureValue>,
    ) -> Result<&mut Self, LicenseError> {
        self.permit(Mutation::ReplaceFeatures)?;
        tracing::debug!(
            license_key = %self.license_key,
            count = features.len(),
            "features replaced"
        );
        self.features = features;
        Ok(self)
    }

    /// Overwrite the issuer.
    pub fn with_issuer(&mut self, issuer: impl Into<String>) -> &mut Self {
        self.issuer = Issuer::new(issuer);
        self
    }

    /// Overwrite the license key.
    pub fn with_license_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.license_key = LicenseKey::new(key);
        self
    }

    /// Bind a node-locked license to a machine fingerprint, replacing any
    /// previous binding.
    ///
    /// # Errors
    ///
    /// [`LicenseError::Generation`] on every other variant.
    pub fn with_node_binding(
        &mut self,
        fingerprint: impl Into<String>,
    ) -> Result<&mut Self, LicenseError> {
        self.permit(Mutation::BindNode)?;
        if let LicenseVariant::NodeLocked { node_fingerprint } = &mut self.variant {
            *node_fingerprint = Some(fingerprint.into());
        }
        Ok(self)
    }

    /// Hand the license to `store` for persistence at `destination`.
    ///
    /// Returns the same, unchanged license on success. The store's error is
    /// returned as-is: no wrapping, no retry.
    pub fn save_license<S>(&self, store: &S, destination: impl AsRef<Path>) -> Result<&Self, S::Error>
    where
        S: LicenseStore + ?Sized,
    {
        store.save(self, destination.as_ref())?;
        Ok(self)
    }

    fn permit(&self, mutation: Mutation) -> Result<(), LicenseError> {
        self.variant.check(mutation).map_err(|err| {
            tracing::warn!(license_key = %self.license_key, %err, "mutation rejected");
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{LicenseKind, TrialPolicy};
    use lgen_core::FeatureKind;
    use std::cell::RefCell;
    use std::path::PathBuf;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn non_trial_licenses() -> Vec<License> {
        vec![
            License::standard(),
            License::node_locked(),
            License::subscription("sub_42"),
        ]
    }

    // ── Test doubles ─────────────────────────────────────────────────

    #[derive(Debug, PartialEq, Eq, thiserror::Error)]
    #[error("destination {0} is not writable")]
    struct Unwritable(String);

    struct FailingStore;

    impl LicenseStore for FailingStore {
        type Error = Unwritable;

        fn save(&self, _license: &License, destination: &Path) -> Result<(), Self::Error> {
            Err(Unwritable(destination.display().to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        saved: RefCell<Vec<(License, PathBuf)>>,
    }

    impl LicenseStore for RecordingStore {
        type Error = std::convert::Infallible;

        fn save(&self, license: &License, destination: &Path) -> Result<(), Self::Error> {
            self.saved
                .borrow_mut()
                .push((license.clone(), destination.to_path_buf()));
            Ok(())
        }
    }

    // ── Expiry ───────────────────────────────────────────────────────

    #[test]
    fn test_expiry_roundtrip_for_non_trial_variants() {
        for mut lic in non_trial_licenses() {
            let date = Some(ts("2027-01-01T00:00:00Z"));
            lic.with_expiry_date(date).unwrap();
            assert_eq!(lic.expiration_date(), date);

            lic.with_expiry_date(None).unwrap();
            assert_eq!(lic.expiration_date(), None, "{:?} should never expire", lic.kind());
        }
    }

    #[test]
    fn test_trial_rejects_any_expiry() {
        let mut lic = License::trial(TrialPolicy::days(30)).unwrap();
        let before = lic.clone();
        for date in [None, Some(ts("2030-01-01T00:00:00Z")), lic.expiration_date()] {
            let err = lic.with_expiry_date(date).unwrap_err();
            assert!(err.is_generation());
            assert!(matches!(
                err,
                LicenseError::Generation {
                    kind: LicenseKind::Trial,
                    mutation: Mutation::SetExpiry,
                    ..
                }
            ));
        }
        assert_eq!(lic, before);
    }

    // ── Features ─────────────────────────────────────────────────────

    #[test]
    fn test_feature_last_write_wins() {
        let mut lic = License::standard();
        lic.with_feature("seats", 5).unwrap();
        lic.with_feature("seats", 50).unwrap();
        assert_eq!(lic.features().len(), 1);
        assert_eq!(lic.feature("seats"), Some(&FeatureValue::from_int(50)));
    }

    #[test]
    fn test_feature_overwrite_replaces_kind() {
        let mut lic = License::standard();
        lic.with_feature("tier", 3).unwrap();
        lic.with_feature("tier", "gold").unwrap();
        let tier = lic.feature("tier").unwrap();
        assert_eq!(tier.kind(), FeatureKind::String);
        assert_eq!(tier.as_str().unwrap(), "gold");
    }

    #[test]
    fn test_primitive_overloads_match_constructors() {
        let issued = ts("2026-01-01T00:00:00Z");
        let mut lic = License::standard();
        lic.with_feature("b", true)
            .unwrap()
            .with_feature("i", 7i64)
            .unwrap()
            .with_feature("f", 0.5)
            .unwrap()
            .with_feature("s", "eu")
            .unwrap()
            .with_feature("d", issued)
            .unwrap()
            .with_feature("y", vec![1u8, 2])
            .unwrap();
        assert_eq!(lic.feature("b"), Some(&FeatureValue::from_bool(true)));
        assert_eq!(lic.feature("i"), Some(&FeatureValue::from_int(7)));
        assert_eq!(lic.feature("f"), Some(&FeatureValue::from_float(0.5)));
        assert_eq!(lic.feature("s"), Some(&FeatureValue::from_string("eu")));
        assert_eq!(lic.feature("d"), Some(&FeatureValue::from_datetime(issued)));
        assert_eq!(lic.feature("y"), Some(&FeatureValue::from_bytes(&[1, 2])));
    }

    #[test]
    fn test_with_features_replaces_wholesale() {
        let mut lic = License::standard();
        lic.with_feature("old-a", 1).unwrap();
        lic.with_feature("old-b", 2).unwrap();

        let mut replacement = BTreeMap::new();
        replacement.insert("new".to_string(), FeatureValue::from_bool(true));
        lic.with_features(replacement.clone()).unwrap();

        assert_eq!(lic.features(), &replacement);
    }

    #[test]
    fn test_with_features_empty_clears() {
        let mut lic = License::standard();
        lic.with_feature("x", 1).unwrap();
        lic.with_features(BTreeMap::new()).unwrap();
        assert!(lic.features().is_empty());
    }

    #[test]
    fn test_trial_accepts_features() {
        let mut lic = License::trial(TrialPolicy::days(7)).unwrap();
        lic.with_feature("max-users", 3).unwrap();
        assert_eq!(lic.feature("max-users").unwrap().as_int().unwrap(), 3);
    }

    // ── Identity ─────────────────────────────────────────────────────

    #[test]
    fn test_chaining_returns_same_license() {
        let mut lic = License::standard();
        let addr: *const License = &lic;
        let returned = lic
            .with_issuer("A")
            .with_license_key("K")
            .with_feature("x", true)
            .unwrap();
        assert!(std::ptr::eq(returned, addr));

        assert_eq!(lic.issuer().as_str(), "A");
        assert_eq!(lic.license_key().as_str(), "K");
        let x = lic.feature("x").unwrap();
        assert_eq!(x.kind(), FeatureKind::Bool);
        assert!(x.as_bool().unwrap());
    }

    #[test]
    fn test_issuer_and_key_are_unvalidated_overwrites() {
        let mut lic = License::trial(TrialPolicy::days(1)).unwrap();
        lic.with_issuer("first").with_issuer("");
        lic.with_license_key("  spaces and ünïcode ");
        assert_eq!(lic.issuer().as_str(), "");
        assert_eq!(lic.license_key().as_str(), "  spaces and ünïcode ");
    }

    // ── Node binding ─────────────────────────────────────────────────

    #[test]
    fn test_node_binding() {
        let mut lic = License::node_locked();
        lic.with_node_binding("fp-1").unwrap();
        lic.with_node_binding("fp-2").unwrap();
        assert_eq!(lic.node_fingerprint(), Some("fp-2"));
        assert_eq!(lic.kind(), LicenseKind::NodeLocked);
    }

    #[test]
    fn test_node_binding_rejected_elsewhere() {
        let mut lic = License::subscription("sub_1");
        let before = lic.clone();
        let err = lic.with_node_binding("fp").unwrap_err();
        assert!(err.is_generation());
        assert_eq!(lic, before);
    }

    // ── Save ─────────────────────────────────────────────────────────

    #[test]
    fn test_save_delegates_and_returns_same_license() {
        let store = RecordingStore::default();
        let mut lic = License::standard();
        lic.with_issuer("ACME");
        let returned = lic.save_license(&store, "/tmp/out.lic").unwrap();
        assert!(std::ptr::eq(returned, &lic));

        let saved = store.saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, lic);
        assert_eq!(saved[0].1, PathBuf::from("/tmp/out.lic"));
    }

    #[test]
    fn test_save_failure_propagates_unchanged() {
        let mut lic = License::standard();
        lic.with_issuer("ACME").with_feature("seats", 3).unwrap();
        let before = lic.clone();

        let err = lic.save_license(&FailingStore, "/readonly/x.lic").unwrap_err();
        assert_eq!(err, Unwritable("/readonly/x.lic".to_string()));
        assert_eq!(lic, before);
    }

    #[test]
    fn test_save_through_trait_object() {
        let store = RecordingStore::default();
        let dyn_store: &dyn LicenseStore<Error = std::convert::Infallible> = &store;
        License::standard().save_license(dyn_store, "a.lic").unwrap();
        assert_eq!(store.saved.borrow().len(), 1);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn upsert_keeps_only_last_value(name in "[a-z-]{1,12}", values in prop::collection::vec(any::<i64>(), 1..10)) {
            let mut lic = License::standard();
            for v in &values {
                lic.with_feature(name.clone(), *v).unwrap();
            }
            prop_assert_eq!(lic.features().len(), 1);
            prop_assert_eq!(lic.feature(&name), Some(&FeatureValue::from_int(*values.last().unwrap())));
        }

        #[test]
        fn with_features_equals_input(
            before in prop::collection::btree_map("[a-z]{1,6}", any::<bool>(), 0..8),
            after in prop::collection::btree_map("[a-z]{1,6}", any::<i64>(), 0..8),
        ) {
            let mut lic = License::standard();
            for (k, v) in before {
                lic.with_feature(k, v).unwrap();
            }
            let replacement: BTreeMap<String, FeatureValue> =
                after.into_iter().map(|(k, v)| (k, FeatureValue::from_int(v))).collect();
            lic.with_features(replacement.clone()).unwrap();
            prop_assert_eq!(lic.features(), &replacement);
        }
    }
}
