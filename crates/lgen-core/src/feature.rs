//! # Feature Values — Typed Feature Grants
//!
//! A feature grant is a named, typed capability attached to a license
//! (`"max-users" = Int 10`, `"beta-channel" = Bool true`). `FeatureValue` is
//! the closed sum of the six payload kinds a grant may hold.
//!
//! ## Invariants
//!
//! - The payload always matches the tag. There is no way to build a
//!   `FeatureValue` whose kind and payload disagree.
//! - No implicit coercion. `as_int()` on a `Float` grant fails with
//!   [`FeatureTypeError`], it does not round.
//! - Equality is tag-aware and bit-exact: floats compare by IEEE-754 bit
//!   pattern, bytes compare byte-for-byte. `Int(42) != Float(42.0)`.
//! - Values are immutable; a grant is replaced wholesale, never edited.
//!
//! ## Wire Form
//!
//! Adjacently tagged JSON, one object per grant:
//!
//! ```text
//! {"type":"bool","value":true}
//! {"type":"int","value":42}
//! {"type":"float","value":"4045000000000000"}   // IEEE-754 bits, hex
//! {"type":"string","value":"eu-west"}
//! {"type":"datetime","value":"2026-01-15T12:00:00Z"}
//! {"type":"bytes","value":"deadbeef"}
//! ```
//!
//! Floats travel as their bit pattern so that reload is bit-exact (NaN
//! payloads and `-0.0` included) and so the license stays acceptable to the
//! float-rejecting canonical form used for digests and signatures.

use serde::{Deserialize, Serialize};

use crate::error::FeatureTypeError;
use crate::temporal::Timestamp;

/// The kind tag of a [`FeatureValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    /// Boolean flag.
    #[serde(rename = "bool")]
    Bool,
    /// Signed 64-bit integer.
    #[serde(rename = "int")]
    Int,
    /// IEEE-754 double.
    #[serde(rename = "float")]
    Float,
    /// UTF-8 string.
    #[serde(rename = "string")]
    String,
    /// UTC timestamp, seconds precision.
    #[serde(rename = "datetime")]
    DateTime,
    /// Raw byte payload.
    #[serde(rename = "bytes")]
    ByteArray,
}

impl FeatureKind {
    /// Identifier used on the wire and in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::DateTime => "datetime",
            Self::ByteArray => "bytes",
        }
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One typed feature grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum FeatureValue {
    /// Boolean flag.
    #[serde(rename = "bool")]
    Bool(bool),
    /// Signed 64-bit integer.
    #[serde(rename = "int")]
    Int(i64),
    /// IEEE-754 double, serialized as its bit pattern.
    #[serde(rename = "float")]
    Float(#[serde(with = "float_bits")] f64),
    /// UTF-8 string.
    #[serde(rename = "string")]
    String(String),
    /// UTC timestamp.
    #[serde(rename = "datetime")]
    DateTime(Timestamp),
    /// Raw bytes, serialized as lowercase hex.
    #[serde(rename = "bytes")]
    ByteArray(#[serde(with = "hex_bytes")] Vec<u8>),
}

impl FeatureValue {
    /// Boolean grant.
    pub fn from_bool(value: bool) -> Self {
        Self::Bool(value)
    }

    /// Integer grant.
    pub fn from_int(value: i64) -> Self {
        Self::Int(value)
    }

    /// Float grant. The exact bit pattern is preserved.
    pub fn from_float(value: f64) -> Self {
        Self::Float(value)
    }

    /// String grant.
    pub fn from_string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Timestamp grant.
    pub fn from_datetime(value: Timestamp) -> Self {
        Self::DateTime(value)
    }

    /// Byte grant. The payload is copied; later changes to the caller's
    /// buffer do not reach the grant.
    pub fn from_bytes(value: &[u8]) -> Self {
        Self::ByteArray(value.to_vec())
    }

    /// The kind tag of this value.
    pub fn kind(&self) -> FeatureKind {
        match self {
            Self::Bool(_) => FeatureKind::Bool,
            Self::Int(_) => FeatureKind::Int,
            Self::Float(_) => FeatureKind::Float,
            Self::String(_) => FeatureKind::String,
            Self::DateTime(_) => FeatureKind::DateTime,
            Self::ByteArray(_) => FeatureKind::ByteArray,
        }
    }

    /// Read a `Bool` grant.
    pub fn as_bool(&self) -> Result<bool, FeatureTypeError> {
        match self {
            Self::Bool(v) => Ok(*v),
            other => Err(other.mismatch(FeatureKind::Bool)),
        }
    }

    /// Read an `Int` grant.
    pub fn as_int(&self) -> Result<i64, FeatureTypeError> {
        match self {
            Self::Int(v) => Ok(*v),
            other => Err(other.mismatch(FeatureKind::Int)),
        }
    }

    /// Read a `Float` grant.
    pub fn as_float(&self) -> Result<f64, FeatureTypeError> {
        match self {
            Self::Float(v) => Ok(*v),
            other => Err(other.mismatch(FeatureKind::Float)),
        }
    }

    /// Read a `String` grant.
    pub fn as_str(&self) -> Result<&str, FeatureTypeError> {
        match self {
            Self::String(v) => Ok(v),
            other => Err(other.mismatch(FeatureKind::String)),
        }
    }

    /// Read a `DateTime` grant.
    pub fn as_datetime(&self) -> Result<Timestamp, FeatureTypeError> {
        match self {
            Self::DateTime(v) => Ok(*v),
            other => Err(other.mismatch(FeatureKind::DateTime)),
        }
    }

    /// Read a `ByteArray` grant.
    pub fn as_bytes(&self) -> Result<&[u8], FeatureTypeError> {
        match self {
            Self::ByteArray(v) => Ok(v),
            other => Err(other.mismatch(FeatureKind::ByteArray)),
        }
    }

    fn mismatch(&self, expected: FeatureKind) -> FeatureTypeError {
        FeatureTypeError {
            expected,
            found: self.kind(),
        }
    }
}

impl PartialEq for FeatureValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::ByteArray(a), Self::ByteArray(b)) => a == b,
            _ => false,
        }
    }
}

// Bit-pattern comparison is reflexive, so `Eq` holds even for NaN.
impl Eq for FeatureValue {}

impl std::hash::Hash for FeatureValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Self::Bool(v) => v.hash(state),
            Self::Int(v) => v.hash(state),
            Self::Float(v) => v.to_bits().hash(state),
            Self::String(v) => v.hash(state),
            Self::DateTime(v) => v.hash(state),
            Self::ByteArray(v) => v.hash(state),
        }
    }
}

impl std::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "bool:{v}"),
            Self::Int(v) => write!(f, "int:{v}"),
            Self::Float(v) => write!(f, "float:{v}"),
            Self::String(v) => write!(f, "string:{v:?}"),
            Self::DateTime(v) => write!(f, "datetime:{v}"),
            Self::ByteArray(v) => write!(f, "bytes:{}", crate::encoding::to_hex(v)),
        }
    }
}

// ─── Conversions ─────────────────────────────────────────────────────
//
// Each conversion delegates to the matching `from_*` constructor.

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        Self::from_bool(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        Self::from_int(value)
    }
}

impl From<i32> for FeatureValue {
    fn from(value: i32) -> Self {
        Self::from_int(i64::from(value))
    }
}

impl From<u32> for FeatureValue {
    fn from(value: u32) -> Self {
        Self::from_int(i64::from(value))
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        Self::from_float(value)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        Self::from_string(value)
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        Self::from_string(value)
    }
}

impl From<Timestamp> for FeatureValue {
    fn from(value: Timestamp) -> Self {
        Self::from_datetime(value)
    }
}

impl From<&[u8]> for FeatureValue {
    fn from(value: &[u8]) -> Self {
        Self::from_bytes(value)
    }
}

impl From<Vec<u8>> for FeatureValue {
    fn from(value: Vec<u8>) -> Self {
        Self::from_bytes(&value)
    }
}

mod float_bits {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("{:016x}", value.to_bits()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.len() != 16 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(serde::de::Error::custom(format!(
                "float bits must be 16 hex digits, got {s:?}"
            )));
        }
        u64::from_str_radix(&s, 16)
            .map(f64::from_bits)
            .map_err(serde::de::Error::custom)
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&crate::encoding::to_hex(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        crate::encoding::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
