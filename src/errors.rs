//! Centralized error definitions and helpers for resource-conventions.
//!
//! Grammar violations (bad identity fields, oversized or malformed names) are
//! programmer errors and fail loudly through [`ConventionError`]. Policy
//! violations discovered by validators are data-driven and travel as
//! [`crate::Finding`]s instead, so they can be counted and reported uniformly.

use std::path::Path;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConventionError>;

/// All fatal error conditions raised by the naming, tagging, and policy layers.
#[derive(Debug, Error)]
pub enum ConventionError {
    /// An identity field violates its grammar. Raised once at
    /// [`crate::Identity`] construction, never silently degraded.
    #[error("invalid identity field `{field}`: {value:?} ({constraint})")]
    InvalidIdentity {
        /// Field that failed validation.
        field: &'static str,
        /// Offending value as supplied by the caller.
        value: String,
        /// Constraint that was violated.
        constraint: String,
    },

    /// A composed name exceeds the resource kind's length cap.
    #[error("name `{name}` is {length} characters, exceeds limit of {max}")]
    NameTooLong {
        /// The composed name.
        name: String,
        /// Actual length in characters.
        length: usize,
        /// Maximum allowed length for the kind.
        max: usize,
    },

    /// A composed name contains characters outside the kind's charset.
    #[error("name `{name}` contains characters outside allowed set {allowed}")]
    InvalidCharacters {
        /// The composed name.
        name: String,
        /// Human-readable description of the allowed charset.
        allowed: &'static str,
    },

    /// A composed name violates a structural rule (leading hyphen, empty
    /// component, unusable length budget).
    #[error("name `{name}` is malformed: {reason}")]
    InvalidNameFormat {
        /// The offending name or name fragment.
        name: String,
        /// Which structural rule was violated.
        reason: String,
    },

    /// Policy TOML could not be parsed.
    #[error("policy parse failed during {operation}: {details}")]
    PolicyParse {
        /// Operation that was being performed.
        operation: &'static str,
        /// Parser diagnostics.
        details: String,
    },

    /// Policy file schema version is newer than this build understands.
    #[error("policy version {file_version} is newer than supported version {expected}")]
    PolicyVersionMismatch {
        /// Version found in the file.
        file_version: u32,
        /// Version this build supports.
        expected: u32,
    },

    /// A policy field holds a value outside its valid range or shape.
    #[error("invalid policy value for `{field}`: {reason}")]
    PolicyInvalidValue {
        /// Offending policy field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// File I/O failed while loading a policy file.
    #[error("I/O failure during {operation} on {path}: {source}")]
    Io {
        /// Operation that was being performed.
        operation: &'static str,
        /// Path involved, for diagnostics.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Identity field failed its grammar check.
#[inline]
pub(crate) fn invalid_identity(
    field: &'static str,
    value: impl Into<String>,
    constraint: impl Into<String>,
) -> ConventionError {
    ConventionError::InvalidIdentity {
        field,
        value: value.into(),
        constraint: constraint.into(),
    }
}

/// Composed name exceeds the kind's length cap.
#[inline]
pub(crate) fn name_too_long(name: impl Into<String>, max: usize) -> ConventionError {
    let name = name.into();
    let length = name.chars().count();
    ConventionError::NameTooLong { name, length, max }
}

/// Composed name contains characters outside the kind's charset.
#[inline]
pub(crate) fn invalid_characters(name: impl Into<String>, allowed: &'static str) -> ConventionError {
    ConventionError::InvalidCharacters {
        name: name.into(),
        allowed,
    }
}

/// Composed name violates a structural rule.
#[inline]
pub(crate) fn invalid_format(name: impl Into<String>, reason: impl Into<String>) -> ConventionError {
    ConventionError::InvalidNameFormat {
        name: name.into(),
        reason: reason.into(),
    }
}

/// Policy field holds an out-of-range or malformed value.
#[inline]
pub(crate) fn policy_invalid_value(
    field: &'static str,
    reason: impl Into<String>,
) -> ConventionError {
    ConventionError::PolicyInvalidValue {
        field,
        reason: reason.into(),
    }
}

/// Policy file read failed.
#[inline]
pub(crate) fn io_read_error<P: AsRef<Path>>(
    operation: &'static str,
    path: P,
    source: std::io::Error,
) -> ConventionError {
    ConventionError::Io {
        operation,
        path: path.as_ref().display().to_string(),
        source,
    }
}
