//! # lgen-license — License Model and Builder
//!
//! Defines the license entity, its variants, and the fluent mutation surface
//! used to assemble a license before it is handed to a persistence backend.
//!
//! ## Modules
//!
//! - **Variant** (`variant.rs`): the closed set of license kinds
//!   (Standard, Trial, NodeLocked, Subscription) and the per-variant
//!   constraint table consulted before every mutation.
//!
//! - **License** (`license.rs`): identity (key, issuer), issue date, expiry,
//!   and the feature map. Fields are private; reads go through accessors and
//!   writes go through the builder.
//!
//! - **Builder** (`builder.rs`): `with_*` operations. Each checks the
//!   variant's constraints before touching any field and returns the same
//!   license for chaining.
//!
//! - **Store** (`store.rs`): the save contract a persistence backend
//!   implements. Backend errors pass through `save_license` unchanged.
//!
//! ## Lifecycle
//!
//! ```text
//! License::standard() / trial(policy) / node_locked() / subscription(id)
//!        │
//!        ▼
//!   Assembling ── with_* ──▶ Assembling
//!        │
//!        └── save_license(store, path) ──▶ Persisted
//! ```
//!
//! Nothing stops a caller from mutating after save; doing so is a contract
//! violation and the persisted copy will no longer match.

pub mod builder;
pub mod error;
pub mod license;
pub mod store;
pub mod variant;

pub use error::{LicenseError, Mutation};
pub use license::License;
pub use store::LicenseStore;
pub use variant::{LicenseKind, LicenseVariant, TrialPolicy};
