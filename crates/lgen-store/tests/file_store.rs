//! End-to-end save and reload through `License::save_license`.

use std::collections::BTreeMap;
use std::fs;

use lgen_core::{FeatureValue, Timestamp};
use lgen_crypto::Ed25519KeyPair;
use lgen_license::{License, LicenseKind, TrialPolicy};
use lgen_store::{FileLicenseStore, LicenseDocument, StoreError};

fn fully_loaded() -> License {
    let mut features = BTreeMap::new();
    features.insert("beta".to_string(), FeatureValue::from_bool(true));
    features.insert("seats".to_string(), FeatureValue::from_int(-3));
    features.insert("ratio".to_string(), FeatureValue::from_float(0.1 + 0.2));
    features.insert("edition".to_string(), FeatureValue::from_string("Ünïcødé"));
    features.insert(
        "support-until".to_string(),
        FeatureValue::from_datetime(Timestamp::parse("2031-01-01T00:00:00Z").unwrap()),
    );
    features.insert("blob".to_string(), FeatureValue::from_bytes(&[0, 1, 254, 255]));

    let mut license = License::subscription("sub_42");
    license
        .with_issuer("ACME Corp")
        .with_license_key("ACME-0001")
        .with_expiry_date(Some(Timestamp::parse("2030-06-30T12:00:00Z").unwrap()))
        .unwrap()
        .with_features(features)
        .unwrap();
    license
}

#[test]
fn saved_license_reloads_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("acme.lic");
    let store = FileLicenseStore::new();

    let license = fully_loaded();
    let returned = license.save_license(&store, &path).unwrap();
    assert!(std::ptr::eq(returned, &license));

    let reloaded = store.load(&path).unwrap();
    assert_eq!(reloaded, license);
    assert_eq!(reloaded.kind(), LicenseKind::Subscription);
    assert_eq!(
        reloaded.feature("ratio").unwrap().as_float().unwrap().to_bits(),
        (0.1f64 + 0.2).to_bits()
    );
}

#[test]
fn nested_destination_directories_are_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a").join("b").join("trial.lic");
    let mut license = License::trial(TrialPolicy::days(30)).unwrap();
    license.with_issuer("ACME").with_feature("max-users", 5).unwrap();

    license.save_license(&FileLicenseStore::new(), &path).unwrap();
    assert!(path.is_file());
    assert!(!dir.path().join("a").join("b").join(".trial.lic.partial").exists());
}

#[test]
fn signed_license_requires_trusted_signer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("signed.lic");
    let signer = Ed25519KeyPair::from_seed(&[7u8; 32]);
    let public = signer.public_key();

    fully_loaded()
        .save_license(&FileLicenseStore::new().with_signer(signer), &path)
        .unwrap();

    let trusting = FileLicenseStore::new().with_trusted_key(public);
    assert!(trusting.load(&path).is_ok());

    let other = Ed25519KeyPair::from_seed(&[8u8; 32]).public_key();
    let distrusting = FileLicenseStore::new().with_trusted_key(other);
    assert!(matches!(distrusting.load(&path), Err(StoreError::Crypto(_))));
}

#[test]
fn tampered_document_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tampered.lic");
    let store = FileLicenseStore::new();
    fully_loaded().save_license(&store, &path).unwrap();

    let mut doc: LicenseDocument = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    doc.license.with_feature("seats", 10_000).unwrap();
    fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();

    assert!(matches!(store.load(&path), Err(StoreError::DigestMismatch { .. })));
}

#[test]
fn trial_with_stretched_expiry_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trial.lic");
    let store = FileLicenseStore::new();
    let license = License::trial(TrialPolicy::days(7)).unwrap();
    license.save_license(&store, &path).unwrap();

    // Re-seal with a forged expiry so that only the variant invariant catches it.
    let mut value: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    value["license"]["expiration_date"] = serde_json::json!("2099-01-01T00:00:00Z");
    let forged: License = serde_json::from_value(value["license"].clone()).unwrap();
    let resealed = LicenseDocument::seal(&forged, None).unwrap();
    fs::write(&path, serde_json::to_vec(&resealed).unwrap()).unwrap();

    assert!(matches!(store.load(&path), Err(StoreError::InvalidLicense(_))));
}

#[test]
fn failed_save_propagates_and_leaves_license_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, b"occupied").unwrap();
    let destination = blocker.join("acme.lic");

    let license = fully_loaded();
    let before = license.clone();
    let err = license
        .save_license(&FileLicenseStore::new(), &destination)
        .unwrap_err();

    assert!(matches!(err, StoreError::Io { .. }));
    assert_eq!(license, before);
    assert!(!destination.exists());
}

#[test]
fn garbage_file_is_a_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.lic");
    fs::write(&path, b"not json").unwrap();
    assert!(matches!(
        FileLicenseStore::new().load(&path),
        Err(StoreError::Serialization(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        FileLicenseStore::new().load(dir.path().join("absent.lic")),
        Err(StoreError::Io { .. })
    ));
}
