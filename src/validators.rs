//! Rule validators for security, compliance, and cost policies.
//!
//! Each validator is a pure function over a narrow, typed fact. Callers map
//! their configuration object onto these facts (with defaults) rather than
//! handing validators an open-ended config to reflect into. An empty result
//! means the fact is fully compliant; a malformed fact shape is a programming
//! error, not a runtime finding.
//!
//! Tunable thresholds (insecure ports, retention windows, oversized instance
//! sizes) come from [`ConventionPolicy`] so organizations can adjust them
//! without code changes.

use crate::identity::Environment;
use crate::policy::ConventionPolicy;
use crate::report::Finding;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// Compliance framework governing retention and backup policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceFramework {
    /// EU General Data Protection Regulation
    Gdpr,
    /// US Health Insurance Portability and Accountability Act
    Hipaa,
    /// US Sarbanes-Oxley Act
    Sox,
    /// Payment Card Industry Data Security Standard
    PciDss,
}

impl fmt::Display for ComplianceFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gdpr => write!(f, "GDPR"),
            Self::Hipaa => write!(f, "HIPAA"),
            Self::Sox => write!(f, "SOX"),
            Self::PciDss => write!(f, "PCI-DSS"),
        }
    }
}

impl FromStr for ComplianceFramework {
    type Err = crate::ConventionError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gdpr" => Ok(Self::Gdpr),
            "hipaa" => Ok(Self::Hipaa),
            "sox" => Ok(Self::Sox),
            "pci-dss" | "pcidss" | "pci_dss" => Ok(Self::PciDss),
            other => Err(crate::errors::invalid_identity(
                "compliance_framework",
                other,
                "must be one of [gdpr, hipaa, sox, pci-dss]",
            )),
        }
    }
}

/// Storage flavor for lifecycle checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// Object storage (bucket-like)
    ObjectStore,
    /// Shared file storage
    FileStore,
    /// Block storage volumes
    BlockStore,
}

/// Check a CIDR block for parseability and size.
///
/// Unparsable input is an ERROR; a network wider than the policy's minimum
/// prefix (default `/16`, i.e. more than 65536 addresses) is a WARNING.
#[must_use]
pub fn check_cidr(cidr: &str, policy: &ConventionPolicy) -> Vec<Finding> {
    let parsed = cidr.split_once('/').and_then(|(addr, prefix)| {
        let addr: IpAddr = addr.parse().ok()?;
        let prefix: u8 = prefix.parse().ok()?;
        let max = match addr {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };
        (prefix <= max).then_some((addr, prefix))
    });

    let Some((_, prefix)) = parsed else {
        return vec![Finding::error(format!("CIDR block {cidr:?} is not parsable"))
            .with_property("cidr")
            .with_fix("use address/prefix notation, e.g. 10.0.0.0/24")];
    };

    if prefix < policy.min_cidr_prefix {
        return vec![Finding::warning(format!(
            "CIDR block {cidr} spans more than 65536 addresses (prefix /{prefix} < /{})",
            policy.min_cidr_prefix
        ))
        .with_property("cidr")
        .with_fix("narrow the network range")];
    }

    Vec::new()
}

/// Check a port number for validity and known-insecure protocols.
#[must_use]
pub fn check_port(port: u32, policy: &ConventionPolicy) -> Vec<Finding> {
    if port == 0 || port > 65535 {
        return vec![Finding::error(format!(
            "port {port} is outside the valid range 1-65535"
        ))
        .with_property("port")];
    }

    #[allow(clippy::cast_possible_truncation)]
    if policy.insecure_ports.contains(&(port as u16)) {
        return vec![Finding::warning(format!(
            "port {port} is a well-known insecure port"
        ))
        .with_property("port")
        .with_fix("prefer the TLS-protected equivalent")];
    }

    Vec::new()
}

/// Check encryption-at-rest. Disabled encryption blocks in prod and warns
/// everywhere else.
#[must_use]
pub fn check_encryption(enabled: bool, environment: Environment) -> Vec<Finding> {
    if enabled {
        return Vec::new();
    }

    let finding = if environment == Environment::Prod {
        Finding::error("encryption at rest is disabled in prod")
    } else {
        Finding::warning(format!(
            "encryption at rest is disabled in {environment}"
        ))
    };
    vec![finding
        .with_property("enable_encryption")
        .with_fix("enable encryption at rest")]
}

/// Check data retention against the framework's window.
///
/// GDPR caps retention (data minimization); HIPAA mandates a floor. Both
/// thresholds are policy-tunable.
#[must_use]
pub fn check_data_retention(
    days: u32,
    framework: ComplianceFramework,
    policy: &ConventionPolicy,
) -> Vec<Finding> {
    match framework {
        ComplianceFramework::Gdpr if days > policy.gdpr_max_retention_days => {
            vec![Finding::error(format!(
                "retention of {days} days exceeds the GDPR maximum of {}",
                policy.gdpr_max_retention_days
            ))
            .with_property("retention_days")
            .with_fix(format!(
                "reduce retention to at most {} days",
                policy.gdpr_max_retention_days
            ))]
        }
        ComplianceFramework::Hipaa if days < policy.hipaa_min_retention_days => {
            vec![Finding::error(format!(
                "retention of {days} days is below the HIPAA minimum of {}",
                policy.hipaa_min_retention_days
            ))
            .with_property("retention_days")
            .with_fix(format!(
                "increase retention to at least {} days",
                policy.hipaa_min_retention_days
            ))]
        }
        _ => Vec::new(),
    }
}

/// Check backup requirements. Backups are mandatory in prod and under SOX or
/// HIPAA regardless of environment.
#[must_use]
pub fn check_backup(
    enabled: bool,
    environment: Environment,
    framework: Option<ComplianceFramework>,
) -> Vec<Finding> {
    if enabled {
        return Vec::new();
    }

    let mut findings = Vec::new();
    if environment == Environment::Prod {
        findings.push(
            Finding::error("backups are disabled in prod")
                .with_property("enable_backup")
                .with_fix("enable backups"),
        );
    }
    if let Some(framework @ (ComplianceFramework::Sox | ComplianceFramework::Hipaa)) = framework {
        findings.push(
            Finding::error(format!("backups are disabled but {framework} requires them"))
                .with_property("enable_backup")
                .with_fix("enable backups"),
        );
    }
    findings
}

/// Check instance sizing. A malformed `family.size` string is an ERROR;
/// oversized instances in dev or staging are a cost WARNING.
#[must_use]
pub fn check_instance_size(
    instance_type: &str,
    environment: Environment,
    policy: &ConventionPolicy,
) -> Vec<Finding> {
    let Some((_family, size)) = instance_type
        .split_once('.')
        .filter(|(family, size)| !family.is_empty() && !size.is_empty())
    else {
        return vec![Finding::error(format!(
            "instance type {instance_type:?} is not in family.size form"
        ))
        .with_property("instance_type")];
    };

    let non_production = matches!(environment, Environment::Dev | Environment::Staging);
    if non_production && policy.oversized_instance_sizes.iter().any(|s| s == size) {
        return vec![Finding::warning(format!(
            "instance size {size:?} is oversized for {environment}"
        ))
        .with_property("instance_type")
        .with_fix("use a smaller size outside prod")];
    }

    Vec::new()
}

/// Check storage lifecycle configuration. Object and file stores without
/// lifecycle rules accumulate cost indefinitely.
#[must_use]
pub fn check_storage_lifecycle(lifecycle_enabled: bool, kind: StorageKind) -> Vec<Finding> {
    if lifecycle_enabled {
        return Vec::new();
    }

    match kind {
        StorageKind::ObjectStore | StorageKind::FileStore => {
            vec![Finding::warning(
                "storage has no lifecycle rules; stale data will accumulate cost",
            )
            .with_property("lifecycle_enabled")
            .with_fix("add expiration or tiering lifecycle rules")]
        }
        StorageKind::BlockStore => Vec::new(),
    }
}
