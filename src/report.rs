//! Findings and validation reports.
//!
//! A [`Finding`] is one graded observation produced by a validator; a
//! [`Report`] is the ordered collection of findings for a single validation
//! run. Both are immutable values: the pass/fail gate is derived from the
//! findings, never stored independently.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Severity of a finding, totally ordered by blocking power.
///
/// Only [`Severity::Error`] blocks; warnings and informational findings are
/// surfaced but never fail a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Blocks provisioning
    Error,
    /// Surfaced, non-blocking
    Warning,
    /// Informational only
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
            Self::Info => write!(f, "INFO"),
        }
    }
}

/// One graded observation produced by a single validator invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// False when the finding describes a violation.
    pub is_valid: bool,

    /// Grade of the observation.
    pub severity: Severity,

    /// Human-readable description.
    pub message: String,

    /// Configuration property the finding refers to, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,

    /// Actionable remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,

    /// Link to relevant internal or vendor documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_link: Option<String>,
}

impl Finding {
    /// Blocking violation.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            severity: Severity::Error,
            message: message.into(),
            property_name: None,
            suggested_fix: None,
            doc_link: None,
        }
    }

    /// Non-blocking violation.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            severity: Severity::Warning,
            message: message.into(),
            property_name: None,
            suggested_fix: None,
            doc_link: None,
        }
    }

    /// Informational observation (compliant configuration).
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            severity: Severity::Info,
            message: message.into(),
            property_name: None,
            suggested_fix: None,
            doc_link: None,
        }
    }

    /// Attach the configuration property this finding refers to.
    #[must_use]
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property_name = Some(property.into());
        self
    }

    /// Attach a remediation hint.
    #[must_use]
    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.suggested_fix = Some(fix.into());
        self
    }

    /// Attach a documentation link.
    #[must_use]
    pub fn with_doc_link(mut self, link: impl Into<String>) -> Self {
        self.doc_link = Some(link.into());
        self
    }
}

/// Ordered findings for one validation run, plus the derived pass/fail gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Name of the subject that was validated.
    pub subject_name: String,

    /// Findings in validator order, then emission order within a validator.
    pub findings: Vec<Finding>,
}

impl Report {
    /// Build a report from an ordered finding list.
    #[must_use]
    pub fn new(subject_name: impl Into<String>, findings: Vec<Finding>) -> Self {
        Self {
            subject_name: subject_name.into(),
            findings,
        }
    }

    /// True iff no finding carries [`Severity::Error`].
    #[must_use]
    pub fn overall_status(&self) -> bool {
        !self
            .findings
            .iter()
            .any(|f| f.severity == Severity::Error)
    }

    /// Count of findings by severity. All three severities are always present
    /// so counts sum to `findings.len()` without key probing.
    #[must_use]
    pub fn summary(&self) -> BTreeMap<Severity, usize> {
        let mut counts = BTreeMap::from([
            (Severity::Error, 0),
            (Severity::Warning, 0),
            (Severity::Info, 0),
        ]);
        for finding in &self.findings {
            if let Some(count) = counts.get_mut(&finding.severity) {
                *count += 1;
            }
        }
        counts
    }

    /// Error findings, order preserved.
    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
    }

    /// Warning findings, order preserved.
    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_passes() {
        let report = Report::new("Bucket", vec![]);
        assert!(report.overall_status());
        assert_eq!(report.summary()[&Severity::Error], 0);
    }

    #[test]
    fn error_finding_fails_report() {
        let report = Report::new(
            "Bucket",
            vec![Finding::warning("minor"), Finding::error("blocker")],
        );
        assert!(!report.overall_status());
    }

    #[test]
    fn summary_counts_sum_to_len() {
        let report = Report::new(
            "Queue",
            vec![
                Finding::error("a"),
                Finding::warning("b"),
                Finding::warning("c"),
                Finding::info("d"),
            ],
        );
        let summary = report.summary();
        let total: usize = summary.values().sum();
        assert_eq!(total, report.findings.len());
        assert_eq!(summary[&Severity::Warning], 2);
    }

    #[test]
    fn filtered_views_preserve_order() {
        let report = Report::new(
            "Db",
            vec![
                Finding::warning("first"),
                Finding::error("only-error"),
                Finding::warning("second"),
            ],
        );
        let warnings: Vec<_> = report.warnings().map(|f| f.message.as_str()).collect();
        assert_eq!(warnings, ["first", "second"]);
        assert_eq!(report.errors().count(), 1);
    }

    #[test]
    fn builder_attaches_context() {
        let finding = Finding::error("missing tag")
            .with_property("CostCenter")
            .with_fix("add CostCenter tag")
            .with_doc_link("https://internal/docs/tagging");
        assert_eq!(finding.property_name.as_deref(), Some("CostCenter"));
        assert_eq!(finding.suggested_fix.as_deref(), Some("add CostCenter tag"));
        assert!(finding.doc_link.is_some());
    }

    #[test]
    fn severity_orders_by_blocking_power() {
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Warning < Severity::Info);
    }
}
