//! Canonical name composition and per-kind grammar enforcement.
//!
//! Names are composed as `project-environment-service-component[-identifier]`
//! and then post-processed per resource kind. Violations are typed errors
//! carrying the offending value and the violated constraint; nothing here
//! truncates silently. The one deliberate exception is [`unique_name`], which
//! shortens a human name and appends a content hash to guarantee global
//! uniqueness under a hard cap.

use crate::errors::{invalid_characters, invalid_format, name_too_long, Result};
use crate::identity::Identity;
use sha3::{Digest, Sha3_256};

/// Hex characters appended by [`unique_name`].
const UNIQUE_HASH_LEN: usize = 8;

/// Target grammar for a composed name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Object storage bucket: region-suffixed, ≤63 chars, `[a-z0-9-]`,
    /// no leading or trailing hyphen.
    ObjectStore,
    /// Compute function: ≤64 chars, `[A-Za-z0-9-_]`.
    Function,
    /// Tabular store: ≤255 chars, `[A-Za-z0-9-_.]`.
    Table,
    /// Relational instance: `primary` role suffix, ≤63 chars, must start
    /// with a letter. Use [`relational_name`] for non-default roles.
    RelationalInstance,
    /// Queue: optional `.fifo` suffix for ordered delivery, ≤80 chars.
    Queue {
        /// Append the literal `.fifo` suffix.
        fifo: bool,
    },
    /// Topic: optional `.fifo` suffix, ≤256 chars.
    Topic {
        /// Append the literal `.fifo` suffix.
        fifo: bool,
    },
    /// IAM-style role: fixed `-role` suffix, ≤64 chars, `[A-Za-z0-9-_]`.
    Role,
    /// Key alias: fixed `alias/` prefix, ≤256 chars, `[A-Za-z0-9-_/]`.
    Alias,
}

/// Compose a canonical resource name for `kind`.
///
/// The base is `project-environment-service-component`, with `identifier`
/// appended when provided. Kind-specific suffixes (region, `.fifo`, `-role`,
/// `alias/`, relational role) are applied afterwards, then the kind's length
/// and charset rules are enforced on the final string.
pub fn name(
    identity: &Identity,
    kind: ResourceKind,
    component: &str,
    identifier: Option<&str>,
) -> Result<String> {
    let base = compose_base(identity, component, identifier)?;

    match kind {
        ResourceKind::ObjectStore => {
            let mut full = base;
            if let Some(region) = identity.region() {
                full.push('-');
                full.push_str(region);
            }
            check_charset(&full, "[a-z0-9-]", |c| {
                c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
            })?;
            check_edges(&full)?;
            check_len(&full, 63)?;
            Ok(full)
        }
        ResourceKind::Function => {
            check_charset(&base, "[A-Za-z0-9-_]", |c| {
                c.is_ascii_alphanumeric() || c == '-' || c == '_'
            })?;
            check_len(&base, 64)?;
            Ok(base)
        }
        ResourceKind::Table => {
            check_charset(&base, "[A-Za-z0-9-_.]", |c| {
                c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'
            })?;
            check_len(&base, 255)?;
            Ok(base)
        }
        ResourceKind::RelationalInstance => relational_suffix(base, "primary"),
        ResourceKind::Queue { fifo } => fifo_name(base, fifo, 80),
        ResourceKind::Topic { fifo } => fifo_name(base, fifo, 256),
        ResourceKind::Role => {
            let full = format!("{base}-role");
            check_charset(&full, "[A-Za-z0-9-_]", |c| {
                c.is_ascii_alphanumeric() || c == '-' || c == '_'
            })?;
            check_len(&full, 64)?;
            Ok(full)
        }
        ResourceKind::Alias => {
            let full = format!("alias/{base}");
            check_charset(&full, "[A-Za-z0-9-_/]", |c| {
                c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '/'
            })?;
            check_len(&full, 256)?;
            Ok(full)
        }
    }
}

/// Compose a relational instance name with an explicit role suffix.
///
/// `name(..., ResourceKind::RelationalInstance, ..)` is equivalent to calling
/// this with role `primary`.
pub fn relational_name(
    identity: &Identity,
    component: &str,
    identifier: Option<&str>,
    role: &str,
) -> Result<String> {
    if role.is_empty() {
        return Err(invalid_format(role, "relational role must not be empty"));
    }
    let base = compose_base(identity, component, identifier)?;
    relational_suffix(base, role)
}

/// Deterministically shorten `base` under `max_len` while keeping it unique.
///
/// The seed is hashed (SHA3-256, truncated to 8 hex chars) and appended after
/// a hyphen; the base is truncated to fit. Identical `(base, seed, max_len)`
/// inputs always produce identical output.
pub fn unique_name(base: &str, uniqueness_seed: &str, max_len: usize) -> Result<String> {
    if base.is_empty() {
        return Err(invalid_format(base, "base name must not be empty"));
    }
    // Hash suffix plus separator plus at least one base character.
    if max_len < UNIQUE_HASH_LEN + 2 {
        return Err(invalid_format(
            base,
            format!(
                "max_len {max_len} cannot fit hash suffix (need at least {})",
                UNIQUE_HASH_LEN + 2
            ),
        ));
    }

    let digest = Sha3_256::digest(uniqueness_seed.as_bytes());
    let mut hash = hex::encode(digest);
    hash.truncate(UNIQUE_HASH_LEN);

    let budget = max_len - UNIQUE_HASH_LEN - 1;
    let truncated: String = base.chars().take(budget).collect();
    let truncated = truncated.trim_end_matches('-');
    if truncated.is_empty() {
        return Err(invalid_format(
            base,
            "base name reduces to nothing after truncation",
        ));
    }

    Ok(format!("{truncated}-{hash}"))
}

fn compose_base(identity: &Identity, component: &str, identifier: Option<&str>) -> Result<String> {
    if component.is_empty() {
        return Err(invalid_format(component, "component must not be empty"));
    }
    if identifier.is_some_and(str::is_empty) {
        return Err(invalid_format("", "identifier must not be empty when provided"));
    }

    let mut base = format!(
        "{}-{}-{}-{}",
        identity.project(),
        identity.environment(),
        identity.service(),
        component
    );
    if let Some(id) = identifier {
        base.push('-');
        base.push_str(id);
    }
    Ok(base)
}

fn relational_suffix(base: String, role: &str) -> Result<String> {
    let full = format!("{base}-{role}");
    check_charset(&full, "[A-Za-z0-9-]", |c| c.is_ascii_alphanumeric() || c == '-')?;
    if !full.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err(invalid_format(full, "must start with a letter"));
    }
    if full.ends_with('-') {
        return Err(invalid_format(full, "must not end with a hyphen"));
    }
    check_len(&full, 63)?;
    Ok(full)
}

fn fifo_name(base: String, fifo: bool, max: usize) -> Result<String> {
    check_charset(&base, "[A-Za-z0-9-_]", |c| {
        c.is_ascii_alphanumeric() || c == '-' || c == '_'
    })?;
    let full = if fifo { format!("{base}.fifo") } else { base };
    check_len(&full, max)?;
    Ok(full)
}

fn check_edges(name: &str) -> Result<()> {
    if name.starts_with('-') || name.ends_with('-') {
        return Err(invalid_format(
            name,
            "must not start or end with a hyphen",
        ));
    }
    Ok(())
}

fn check_len(name: &str, max: usize) -> Result<()> {
    if name.chars().count() > max {
        return Err(name_too_long(name, max));
    }
    Ok(())
}

fn check_charset(
    name: &str,
    allowed: &'static str,
    pred: impl Fn(char) -> bool,
) -> Result<()> {
    if !name.chars().all(pred) {
        return Err(invalid_characters(name, allowed));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{Environment, Service};

    fn identity() -> Identity {
        Identity::new("dso", Environment::Prod, Service::Data).expect("valid identity")
    }

    #[test]
    fn object_store_name_composes() {
        let n = name(&identity(), ResourceKind::ObjectStore, "ingestion", None)
            .expect("valid name");
        assert_eq!(n, "dso-prod-data-ingestion");
    }

    #[test]
    fn object_store_appends_region() {
        let id = identity().with_region("eu-west-1").expect("valid region");
        let n = name(&id, ResourceKind::ObjectStore, "ingestion", None).expect("valid name");
        assert_eq!(n, "dso-prod-data-ingestion-eu-west-1");
    }

    #[test]
    fn object_store_rejects_uppercase_component() {
        let err = name(&identity(), ResourceKind::ObjectStore, "Ingestion", None);
        assert!(matches!(
            err,
            Err(crate::ConventionError::InvalidCharacters { .. })
        ));
    }

    #[test]
    fn object_store_rejects_overlong_name() {
        let long_component = "c".repeat(64);
        let err = name(&identity(), ResourceKind::ObjectStore, &long_component, None);
        assert!(matches!(
            err,
            Err(crate::ConventionError::NameTooLong { max: 63, .. })
        ));
    }

    #[test]
    fn function_allows_mixed_case_and_underscore() {
        let n = name(&identity(), ResourceKind::Function, "Etl_Loader", None)
            .expect("valid name");
        assert_eq!(n, "dso-prod-data-Etl_Loader");
    }

    #[test]
    fn queue_fifo_suffix_applied() {
        let n = name(
            &identity(),
            ResourceKind::Queue { fifo: true },
            "processing",
            None,
        )
        .expect("valid name");
        assert_eq!(n, "dso-prod-data-processing.fifo");
    }

    #[test]
    fn queue_without_fifo_has_no_suffix() {
        let n = name(
            &identity(),
            ResourceKind::Queue { fifo: false },
            "processing",
            None,
        )
        .expect("valid name");
        assert_eq!(n, "dso-prod-data-processing");
    }

    #[test]
    fn topic_length_cap_is_256() {
        let component = "c".repeat(240);
        let n = name(
            &identity(),
            ResourceKind::Topic { fifo: false },
            &component,
            None,
        )
        .expect("valid name");
        assert!(n.len() <= 256);

        let component = "c".repeat(250);
        assert!(name(
            &identity(),
            ResourceKind::Topic { fifo: false },
            &component,
            None
        )
        .is_err());
    }

    #[test]
    fn relational_instance_defaults_to_primary_role() {
        let n = name(&identity(), ResourceKind::RelationalInstance, "orders", None)
            .expect("valid name");
        assert_eq!(n, "dso-prod-data-orders-primary");
    }

    #[test]
    fn relational_name_with_custom_role() {
        let n = relational_name(&identity(), "orders", None, "replica").expect("valid name");
        assert_eq!(n, "dso-prod-data-orders-replica");
    }

    #[test]
    fn relational_name_rejects_empty_role() {
        assert!(relational_name(&identity(), "orders", None, "").is_err());
    }

    #[test]
    fn role_suffix_applied() {
        let n = name(&identity(), ResourceKind::Role, "lambda-exec", None).expect("valid name");
        assert_eq!(n, "dso-prod-data-lambda-exec-role");
    }

    #[test]
    fn alias_prefix_applied() {
        let n = name(&identity(), ResourceKind::Alias, "encryption", None).expect("valid name");
        assert_eq!(n, "alias/dso-prod-data-encryption");
    }

    #[test]
    fn identifier_appended_when_present() {
        let n = name(&identity(), ResourceKind::ObjectStore, "ingestion", Some("raw"))
            .expect("valid name");
        assert_eq!(n, "dso-prod-data-ingestion-raw");
    }

    #[test]
    fn empty_component_rejected() {
        assert!(name(&identity(), ResourceKind::Function, "", None).is_err());
        assert!(name(&identity(), ResourceKind::Function, "x", Some("")).is_err());
    }

    #[test]
    fn unique_name_is_deterministic() {
        let a = unique_name("dso-prod-data-very-long-component-name", "seed-1", 32)
            .expect("valid name");
        let b = unique_name("dso-prod-data-very-long-component-name", "seed-1", 32)
            .expect("valid name");
        assert_eq!(a, b);
        assert!(a.len() <= 32);
    }

    #[test]
    fn unique_name_varies_with_seed() {
        let a = unique_name("dso-prod-data-x", "seed-1", 32).expect("valid name");
        let b = unique_name("dso-prod-data-x", "seed-2", 32).expect("valid name");
        assert_ne!(a, b);
        // Base part identical, hash part differs
        assert_eq!(a[..a.len() - 9], b[..b.len() - 9], "base parts should match");
    }

    #[test]
    fn unique_name_trims_dangling_hyphen() {
        // Truncation boundary lands right after a hyphen
        let n = unique_name("abcd-efgh", "seed", 14).expect("valid name");
        let base_part = &n[..n.len() - 9];
        assert!(!base_part.ends_with('-'));
    }

    #[test]
    fn unique_name_rejects_unusable_budget() {
        assert!(unique_name("abc", "seed", 9).is_err());
        assert!(unique_name("", "seed", 32).is_err());
    }
}
