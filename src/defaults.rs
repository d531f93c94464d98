//! Default values for the validation policy.

use crate::POLICY_VERSION;

#[inline]
#[must_use]
pub(crate) fn default_policy_version() -> u32 {
    POLICY_VERSION
}

#[inline]
#[must_use]
pub(crate) fn default_cost_center_pattern() -> String {
    "^CC-[0-9]{4}$".to_string()
}

#[inline]
#[must_use]
pub(crate) fn default_gdpr_max_retention_days() -> u32 {
    365
}

#[inline]
#[must_use]
pub(crate) fn default_hipaa_min_retention_days() -> u32 {
    2555
}

#[inline]
#[must_use]
pub(crate) fn default_insecure_ports() -> Vec<u16> {
    vec![21, 23, 80, 135, 139, 445]
}

#[inline]
#[must_use]
pub(crate) fn default_oversized_instance_sizes() -> Vec<String> {
    [
        "large", "xlarge", "2xlarge", "4xlarge", "8xlarge", "12xlarge", "16xlarge", "24xlarge",
        "metal",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

#[inline]
#[must_use]
pub(crate) fn default_min_cidr_prefix() -> u8 {
    16
}
