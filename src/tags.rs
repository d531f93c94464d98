//! Tag map construction and schema validation.
//!
//! The tagging engine produces the required + conditional key/value map that
//! provisioning code attaches to every resource, and validates arbitrary tag
//! maps against the required schema. The clock is injected so `CreatedDate`
//! stays deterministic under test.

use crate::identity::{Environment, Identity};
use crate::policy::ConventionPolicy;
use crate::report::Finding;
use crate::validators::ComplianceFramework;
use crate::CREATED_BY;
use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Tag key/value map. `BTreeMap` keeps iteration deterministic for
/// serialization and tests; validation itself is order-independent.
pub type TagMap = BTreeMap<String, String>;

/// Keys that [`required_tags`] always emits.
pub const REQUIRED_TAG_KEYS: [&str; 6] = [
    "Environment",
    "Project",
    "Owner",
    "CostCenter",
    "CreatedBy",
    "CreatedDate",
];

/// Keys that [`validate_tags`] requires on a fully tagged resource. The full
/// tag contract also demands `Application` and `Component`.
const VALIDATED_TAG_KEYS: [&str; 8] = [
    "Environment",
    "Project",
    "Owner",
    "CostCenter",
    "Application",
    "Component",
    "CreatedBy",
    "CreatedDate",
];

/// Injected date source for `CreatedDate`.
pub trait Clock {
    /// Current date (no time component).
    fn today(&self) -> NaiveDate;
}

/// Wall-clock dates for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Pinned date for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Optional attributes that become conditional tags.
///
/// Each field maps to one tag key and is emitted iff the field is `Some`.
/// Booleans serialize as lowercase `"true"`/`"false"`.
#[derive(Debug, Clone, Default)]
pub struct OptionalTagAttrs {
    /// `DataClassification` tag (e.g. `public`, `internal`, `confidential`).
    pub data_classification: Option<String>,
    /// `PIIData` tag.
    pub pii_data: Option<bool>,
    /// `ComplianceFramework` tag.
    pub compliance_framework: Option<ComplianceFramework>,
    /// `BackupSchedule` tag (e.g. a cron expression).
    pub backup_schedule: Option<String>,
    /// `MonitoringLevel` tag (e.g. `basic`, `enhanced`).
    pub monitoring_level: Option<String>,
}

/// Build the fixed required tag set.
///
/// Always returns exactly the six [`REQUIRED_TAG_KEYS`]. `CreatedDate` is the
/// injected clock's date in `YYYY-MM-DD`; `CreatedBy` is the tool sentinel.
#[must_use]
pub fn required_tags(
    identity: &Identity,
    owner: &str,
    cost_center: &str,
    clock: &dyn Clock,
) -> TagMap {
    let mut tags = TagMap::new();
    tags.insert("Environment".into(), identity.environment().to_string());
    tags.insert("Project".into(), identity.project().to_string());
    tags.insert("Owner".into(), owner.to_string());
    tags.insert("CostCenter".into(), cost_center.to_string());
    tags.insert("CreatedBy".into(), CREATED_BY.to_string());
    tags.insert(
        "CreatedDate".into(),
        clock.today().format("%Y-%m-%d").to_string(),
    );
    tags
}

/// Build the full tag set: required keys, application/component, and any
/// conditional keys whose attribute is present.
#[must_use]
pub fn full_tags(
    identity: &Identity,
    owner: &str,
    cost_center: &str,
    application: &str,
    component: &str,
    attrs: &OptionalTagAttrs,
    clock: &dyn Clock,
) -> TagMap {
    let mut tags = required_tags(identity, owner, cost_center, clock);
    tags.insert("Application".into(), application.to_string());
    tags.insert("Component".into(), component.to_string());

    if let Some(classification) = &attrs.data_classification {
        tags.insert("DataClassification".into(), classification.clone());
    }
    if let Some(pii) = attrs.pii_data {
        tags.insert("PIIData".into(), pii.to_string());
    }
    if let Some(framework) = attrs.compliance_framework {
        tags.insert("ComplianceFramework".into(), framework.to_string());
    }
    if let Some(schedule) = &attrs.backup_schedule {
        tags.insert("BackupSchedule".into(), schedule.clone());
    }
    if let Some(level) = &attrs.monitoring_level {
        tags.insert("MonitoringLevel".into(), level.clone());
    }

    tags
}

/// Validate an arbitrary tag map against the required schema.
///
/// Tag shape is a hard contract: every violation is an ERROR finding, never a
/// warning. An empty result means the map is compliant.
#[must_use]
pub fn validate_tags(tags: &TagMap, policy: &ConventionPolicy) -> Vec<Finding> {
    let mut findings = Vec::new();

    for key in VALIDATED_TAG_KEYS {
        if !tags.contains_key(key) {
            findings.push(
                Finding::error(format!("required tag `{key}` is missing"))
                    .with_property(key)
                    .with_fix(format!("add the `{key}` tag")),
            );
        }
    }

    if let Some(env) = tags.get("Environment") {
        if Environment::from_str(env).is_err() {
            findings.push(
                Finding::error(format!(
                    "tag `Environment` has value {env:?}, expected one of {:?}",
                    Environment::allowed()
                ))
                .with_property("Environment")
                .with_fix("use a recognized environment code"),
            );
        }
    }

    if let Some(cost_center) = tags.get("CostCenter") {
        match Regex::new(&policy.cost_center_pattern) {
            Ok(re) => {
                if !re.is_match(cost_center) {
                    findings.push(
                        Finding::error(format!(
                            "tag `CostCenter` value {cost_center:?} does not match pattern `{}`",
                            policy.cost_center_pattern
                        ))
                        .with_property("CostCenter")
                        .with_fix(format!(
                            "use a cost center matching `{}`",
                            policy.cost_center_pattern
                        )),
                    );
                }
            }
            Err(err) => {
                findings.push(
                    Finding::error(format!(
                        "policy cost-center pattern does not compile: {err}"
                    ))
                    .with_property("CostCenter"),
                );
            }
        }
    }

    findings
}
