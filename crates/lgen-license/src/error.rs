//! License generation errors.

use thiserror::Error;

use crate::variant::LicenseKind;

/// A builder operation, as named in constraint checks and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    /// `with_expiry_date`.
    SetExpiry,
    /// `with_feature`.
    UpsertFeature,
    /// `with_features`.
    ReplaceFeatures,
    /// `with_node_binding`.
    BindNode,
}

impl std::fmt::Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SetExpiry => "set expiry date",
            Self::UpsertFeature => "upsert feature",
            Self::ReplaceFeatures => "replace features",
            Self::BindNode => "bind node",
        };
        f.write_str(s)
    }
}

/// Errors raised while assembling or validating a license.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LicenseError {
    /// A builder operation conflicts with the license variant's fixed
    /// semantics. Raised before any field is touched.
    #[error("license generation error: {kind} license cannot {mutation}: {reason}")]
    Generation {
        /// Variant of the license being assembled.
        kind: LicenseKind,
        /// The rejected operation.
        mutation: Mutation,
        /// Why the variant rejects it.
        reason: String,
    },

    /// A license value does not satisfy its variant's invariants. Raised
    /// when constructing a variant or checking a reloaded license.
    #[error("license invariant violated for {kind} license: {reason}")]
    Invariant {
        /// Variant of the offending license.
        kind: LicenseKind,
        /// The violated invariant.
        reason: String,
    },
}

impl LicenseError {
    /// Whether this is a generation-time constraint violation.
    pub fn is_generation(&self) -> bool {
        matches!(self, Self::Generation { .. })
    }
}
