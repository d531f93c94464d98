//! Fail-soft validation aggregation.
//!
//! The aggregator runs a caller-supplied list of validators against one
//! configuration object and folds every finding into a single [`Report`].
//! A validator that returns `Err` becomes exactly one ERROR finding; it never
//! aborts evaluation of the remaining validators, and the aggregator itself
//! never returns an error. Gating on the result is the caller's job.

use crate::errors::Result;
use crate::report::{Finding, Report};
use tracing::{debug, warn};

/// Boxed validator bound to a caller-defined configuration type.
///
/// Validators translate the configuration into narrow facts and delegate to
/// the pure rule functions in [`crate::validators`].
pub type ValidatorFn<C> = Box<dyn Fn(&C) -> Result<Vec<Finding>> + Send + Sync>;

/// Box a closure as a [`ValidatorFn`].
pub fn validator<C, F>(f: F) -> ValidatorFn<C>
where
    F: Fn(&C) -> Result<Vec<Finding>> + Send + Sync + 'static,
{
    Box::new(f)
}

/// Run `validators` in order against `config` and aggregate the findings.
///
/// Ordering is stable: findings appear in validator order, then in emission
/// order within each validator, so reports are reproducible.
#[must_use]
pub fn validate<C>(subject_name: &str, config: &C, validators: &[ValidatorFn<C>]) -> Report {
    let mut findings = Vec::new();

    for (index, validator) in validators.iter().enumerate() {
        match validator(config) {
            Ok(mut emitted) => {
                debug!(
                    subject = subject_name,
                    validator = index,
                    findings = emitted.len(),
                    "validator completed"
                );
                findings.append(&mut emitted);
            }
            Err(err) => {
                warn!(
                    subject = subject_name,
                    validator = index,
                    error = %err,
                    "validator invocation failed"
                );
                findings.push(Finding::error(format!(
                    "validator {index} failed: {err}"
                )));
            }
        }
    }

    Report::new(subject_name, findings)
}
