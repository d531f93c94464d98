//! # Resource Conventions
//!
//! **Canonical naming, tagging, and rule-based validation for provisioned resources.**
//!
//! This crate is the convention enforcement core that provisioning code calls
//! before it creates anything:
//!
//! - **Naming engine**: composes an [`Identity`] tuple into canonical resource
//!   names and enforces per-kind grammar and length rules.
//! - **Tagging engine**: builds the required + conditional tag map and validates
//!   arbitrary tag maps against the required schema.
//! - **Rule validators**: pure functions that grade narrow configuration facts
//!   (CIDR, port, retention, instance sizing, encryption, backups).
//! - **Aggregator**: runs a caller-supplied validator list and folds the results
//!   into a single [`Report`] with a derived pass/fail gate.
//!
//! Everything is pure and synchronous; the only clock read (tag creation date)
//! is injected through the [`Clock`] trait so outputs stay deterministic.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

// Core modules
mod aggregate;
mod defaults;
mod errors;
mod identity;
mod naming;
mod policy;
mod report;
mod tags;
mod validators;

// Re-export core types for public API
pub use aggregate::{validate, validator, ValidatorFn};
pub use errors::{ConventionError, Result};
pub use identity::{Environment, Identity, Service};
pub use naming::{name, relational_name, unique_name, ResourceKind};
pub use policy::ConventionPolicy;
pub use report::{Finding, Report, Severity};
pub use tags::{
    full_tags, required_tags, validate_tags, Clock, FixedClock, OptionalTagAttrs, SystemClock,
    TagMap, REQUIRED_TAG_KEYS,
};
pub use validators::{
    check_backup, check_cidr, check_data_retention, check_encryption, check_instance_size,
    check_port, check_storage_lifecycle, ComplianceFramework, StorageKind,
};

/// Policy schema version.
pub const POLICY_VERSION: u32 = 1;

/// Sentinel written into the `CreatedBy` tag to mark tool-managed resources.
pub const CREATED_BY: &str = "resource-conventions";
