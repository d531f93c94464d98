//! Tunable policy constants for the rule validators.
//!
//! Thresholds like retention windows and the cost-center pattern are domain
//! policy, not structure; they load from TOML so organizations can adjust
//! them without code changes. [`ConventionPolicy::default`] carries the
//! shipped constants.

use crate::defaults::*;
use crate::errors::{self, policy_invalid_value, Result};
use crate::POLICY_VERSION;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Tunable validation thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConventionPolicy {
    /// Policy schema version
    #[serde(default = "default_policy_version")]
    pub version: u32,

    /// Pattern a `CostCenter` tag value must match
    #[serde(default = "default_cost_center_pattern")]
    pub cost_center_pattern: String,

    /// Maximum retention days permitted under GDPR
    #[serde(default = "default_gdpr_max_retention_days")]
    pub gdpr_max_retention_days: u32,

    /// Minimum retention days mandated under HIPAA
    #[serde(default = "default_hipaa_min_retention_days")]
    pub hipaa_min_retention_days: u32,

    /// Ports flagged as well-known insecure protocols
    #[serde(default = "default_insecure_ports")]
    pub insecure_ports: Vec<u16>,

    /// Instance sizes flagged as oversized outside prod
    #[serde(default = "default_oversized_instance_sizes")]
    pub oversized_instance_sizes: Vec<String>,

    /// Smallest CIDR prefix that is not flagged as oversized
    #[serde(default = "default_min_cidr_prefix")]
    pub min_cidr_prefix: u8,
}

impl ConventionPolicy {
    /// Load policy from a TOML file (async, as all policy loads happen during
    /// provisioning setup on an async runtime).
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, the TOML is invalid, the
    /// schema version is newer than this build, or validation fails.
    pub async fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| errors::io_read_error("load_policy", path, e))?;

        let policy: ConventionPolicy =
            toml::from_str(&contents).map_err(|e| crate::ConventionError::PolicyParse {
                operation: "parse_policy_toml",
                details: e.to_string(),
            })?;

        if policy.version > POLICY_VERSION {
            return Err(crate::ConventionError::PolicyVersionMismatch {
                file_version: policy.version,
                expected: POLICY_VERSION,
            });
        }

        if policy.version < POLICY_VERSION {
            warn!(
                file_version = policy.version,
                supported = POLICY_VERSION,
                "policy version is older than this build; consider updating"
            );
        }

        policy.validate()?;

        Ok(policy)
    }

    /// Validate policy values.
    pub fn validate(&self) -> Result<()> {
        if self.cost_center_pattern.is_empty() {
            return Err(policy_invalid_value(
                "cost_center_pattern",
                "pattern must not be empty",
            ));
        }
        Regex::new(&self.cost_center_pattern).map_err(|e| {
            policy_invalid_value("cost_center_pattern", format!("pattern does not compile: {e}"))
        })?;

        if self.gdpr_max_retention_days == 0 {
            return Err(policy_invalid_value(
                "gdpr_max_retention_days",
                "must be greater than zero",
            ));
        }
        if self.hipaa_min_retention_days == 0 {
            return Err(policy_invalid_value(
                "hipaa_min_retention_days",
                "must be greater than zero",
            ));
        }
        if self.min_cidr_prefix > 32 {
            return Err(policy_invalid_value(
                "min_cidr_prefix",
                "must be at most 32",
            ));
        }
        if self.insecure_ports.iter().any(|&p| p == 0) {
            return Err(policy_invalid_value(
                "insecure_ports",
                "port 0 is not a valid port",
            ));
        }

        Ok(())
    }

}

impl Default for ConventionPolicy {
    fn default() -> Self {
        Self {
            version: POLICY_VERSION,
            cost_center_pattern: default_cost_center_pattern(),
            gdpr_max_retention_days: default_gdpr_max_retention_days(),
            hipaa_min_retention_days: default_hipaa_min_retention_days(),
            insecure_ports: default_insecure_ports(),
            oversized_instance_sizes: default_oversized_instance_sizes(),
            min_cidr_prefix: default_min_cidr_prefix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_validates() {
        let policy = ConventionPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.gdpr_max_retention_days, 365);
        assert_eq!(policy.hipaa_min_retention_days, 2555);
        assert_eq!(policy.cost_center_pattern, "^CC-[0-9]{4}$");
    }

    #[test]
    fn empty_pattern_rejected() {
        let mut policy = ConventionPolicy::default();
        policy.cost_center_pattern = String::new();
        assert!(policy.validate().is_err());
    }

    #[test]
    fn non_compiling_pattern_rejected() {
        let mut policy = ConventionPolicy::default();
        policy.cost_center_pattern = "(unclosed".to_string();
        assert!(policy.validate().is_err());
    }

    #[test]
    fn zero_retention_thresholds_rejected() {
        let mut policy = ConventionPolicy::default();
        policy.gdpr_max_retention_days = 0;
        assert!(policy.validate().is_err());

        let mut policy = ConventionPolicy::default();
        policy.hipaa_min_retention_days = 0;
        assert!(policy.validate().is_err());
    }

    #[test]
    fn oversized_min_prefix_rejected() {
        let mut policy = ConventionPolicy::default();
        policy.min_cidr_prefix = 33;
        assert!(policy.validate().is_err());
    }

    #[test]
    fn minimal_toml_fills_defaults() {
        let policy: ConventionPolicy = toml::from_str("").expect("empty policy parses");
        assert_eq!(policy.version, POLICY_VERSION);
        assert_eq!(policy.insecure_ports, vec![21, 23, 80, 135, 139, 445]);
    }
}
