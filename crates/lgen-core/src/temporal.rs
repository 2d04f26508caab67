//! # Temporal Types — UTC-Only Timestamps
//!
//! `Timestamp` is the only time type used in licenses: issue dates, expiry
//! dates, and `DateTime` feature grants. It is UTC with a `Z` suffix and
//! truncated to seconds, so a license's canonical bytes (and therefore its
//! digest and signature) do not depend on the issuing machine's timezone or
//! clock resolution.
//!
//! Non-UTC inputs are rejected by [`Timestamp::parse()`]; ingestion paths
//! that accept arbitrary offsets use [`Timestamp::parse_lenient()`].
//!
//! The wire form has a four-digit year, so only years 0000 through 9999
//! serialize. Fallible constructors reject instants outside that range, and
//! serializing an out-of-range timestamp built via `from_utc` fails.

use chrono::{DateTime, Datelike, Days, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`]: current UTC time, truncated.
/// - [`Timestamp::from_utc()`]: from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::parse()`]: from an ISO8601 string, rejecting non-UTC offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a timestamp from an RFC 3339 string with a `Z` suffix.
    ///
    /// Explicit offsets, even `+00:00`, are rejected.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if !s.ends_with('Z') {
            return Err(CoreError::Validation(format!(
                "timestamp must use Z suffix (UTC only), got: {s:?}"
            )));
        }
        Self::parse_lenient(s)
    }

    /// Parse a timestamp from an RFC 3339 string, accepting any offset and
    /// converting to UTC.
    pub fn parse_lenient(s: &str) -> Result<Self, CoreError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
            CoreError::Validation(format!("invalid RFC 3339 timestamp {s:?}: {e}"))
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, CoreError> {
        let dt = DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| CoreError::Validation(format!("invalid Unix timestamp: {secs}")))?;
        Self::within_wire_range(dt)
    }

    /// The instant `days` whole days after this one.
    pub fn plus_days(&self, days: u32) -> Result<Self, CoreError> {
        self.0
            .checked_add_days(Days::new(u64::from(days)))
            .ok_or_else(|| CoreError::Validation(format!("{self} + {days} days is out of range")))
            .and_then(Self::within_wire_range)
    }

    /// Whether the year fits the four-digit wire form.
    pub fn is_serializable(&self) -> bool {
        (MIN_YEAR..=MAX_YEAR).contains(&self.0.year())
    }

    fn within_wire_range(dt: DateTime<Utc>) -> Result<Self, CoreError> {
        let ts = Self(dt);
        if ts.is_serializable() {
            Ok(ts)
        } else {
            Err(CoreError::Validation(format!(
                "year {} is outside {MIN_YEAR:04}..={MAX_YEAR}",
                dt.year()
            )))
        }
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.is_serializable() {
            return Err(serde::ser::Error::custom(format!(
                "timestamp {self} has no four-digit-year form"
            )));
        }
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
