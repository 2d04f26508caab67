//! # License Variants
//!
//! The license kind is fixed when a license is constructed. Each kind may
//! carry its own data (a trial carries its duration policy, a node-locked
//! license its machine binding) and its own rules about which builder
//! operations it accepts.
//!
//! ## Constraint Table
//!
//! ```text
//!                  SetExpiry   UpsertFeature   ReplaceFeatures   BindNode
//! Standard         ok          ok              ok                reject
//! Trial            reject      ok              ok                reject
//! NodeLocked       ok          ok              ok                ok
//! Subscription     ok          ok              ok                reject
//! ```
//!
//! New rules are added to [`LicenseVariant::check`]; the builder calls it
//! before every mutation, so call shapes never change.

use serde::{Deserialize, Serialize};

use crate::error::{LicenseError, Mutation};

/// Discriminator of a [`LicenseVariant`], without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseKind {
    /// Perpetual or fixed-term license with caller-chosen expiry.
    Standard,
    /// Evaluation license whose expiry follows from its trial policy.
    Trial,
    /// License bound to a single machine fingerprint.
    NodeLocked,
    /// License tied to a recurring subscription.
    Subscription,
}

impl LicenseKind {
    /// Identifier used in serialized documents and errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Trial => "trial",
            Self::NodeLocked => "node_locked",
            Self::Subscription => "subscription",
        }
    }
}

impl std::fmt::Display for LicenseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a trial license derives its expiry.
///
/// The trial length is configuration, not a constant: issuers supply it
/// when constructing the trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrialPolicy {
    /// Whole days from the issue date until the trial expires.
    pub duration_days: u32,
}

impl TrialPolicy {
    /// A trial lasting `duration_days` days from issue.
    pub fn days(duration_days: u32) -> Self {
        Self { duration_days }
    }
}

/// A license kind together with its kind-specific data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LicenseVariant {
    /// Standard license.
    Standard,
    /// Trial license.
    Trial {
        /// Expiry derivation policy.
        policy: TrialPolicy,
    },
    /// Node-locked license.
    NodeLocked {
        /// Machine fingerprint the license is bound to, once bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        node_fingerprint: Option<String>,
    },
    /// Subscription license.
    Subscription {
        /// Billing-system identifier of the subscription.
        subscription_id: String,
    },
}

impl LicenseVariant {
    /// The discriminator of this variant.
    pub fn kind(&self) -> LicenseKind {
        match self {
            Self::Standard => LicenseKind::Standard,
            Self::Trial { .. } => LicenseKind::Trial,
            Self::NodeLocked { .. } => LicenseKind::NodeLocked,
            Self::Subscription { .. } => LicenseKind::Subscription,
        }
    }

    /// Check whether this variant accepts `mutation`.
    pub fn check(&self, mutation: Mutation) -> Result<(), LicenseError> {
        let reason = match (self, mutation) {
            (Self::Trial { policy }, Mutation::SetExpiry) => format!(
                "trial expiry is fixed at {} days from issue",
                policy.duration_days
            ),
            (Self::NodeLocked { .. }, Mutation::BindNode) => return Ok(()),
            (_, Mutation::BindNode) => "only node-locked licenses carry a node binding".to_string(),
            _ => return Ok(()),
        };
        Err(LicenseError::Generation {
            kind: self.kind(),
            mutation,
            reason,
        })
    }
}
