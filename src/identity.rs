//! Identity tuple seeding all generated names and tags.
//!
//! An [`Identity`] is validated once at construction and immutable afterwards;
//! the naming and tagging engines trust its fields without re-checking.

use crate::errors::{invalid_identity, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static PROJECT_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[a-z0-9-]{3,8}$").unwrap()
});

static REGION_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[a-z0-9-]+$").unwrap()
});

/// Deployment environment, drawn from a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development
    Dev,
    /// Staging / pre-production
    Staging,
    /// Production
    Prod,
    /// Experimentation sandbox
    Sandbox,
    /// Disaster recovery
    Dr,
}

impl Environment {
    /// Short code used in names and tag values.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Staging => "staging",
            Self::Prod => "prod",
            Self::Sandbox => "sandbox",
            Self::Dr => "dr",
        }
    }

    /// All allowed environment codes, for validation messages.
    #[must_use]
    pub fn allowed() -> &'static [&'static str] {
        &["dev", "staging", "prod", "sandbox", "dr"]
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = crate::ConventionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dev" => Ok(Self::Dev),
            "staging" => Ok(Self::Staging),
            "prod" => Ok(Self::Prod),
            "sandbox" => Ok(Self::Sandbox),
            "dr" => Ok(Self::Dr),
            other => Err(invalid_identity(
                "environment",
                other,
                format!("must be one of {:?}", Environment::allowed()),
            )),
        }
    }
}

/// Service domain short code, drawn from a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    /// Data platform
    Data,
    /// Machine learning
    Ml,
    /// API services
    Api,
    /// Shared infrastructure
    Infra,
    /// Messaging
    Msg,
    /// Security tooling
    Sec,
    /// Monitoring
    Mon,
}

impl Service {
    /// Short code used in names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Ml => "ml",
            Self::Api => "api",
            Self::Infra => "infra",
            Self::Msg => "msg",
            Self::Sec => "sec",
            Self::Mon => "mon",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = crate::ConventionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "data" => Ok(Self::Data),
            "ml" => Ok(Self::Ml),
            "api" => Ok(Self::Api),
            "infra" => Ok(Self::Infra),
            "msg" => Ok(Self::Msg),
            "sec" => Ok(Self::Sec),
            "mon" => Ok(Self::Mon),
            other => Err(invalid_identity(
                "service",
                other,
                "must be one of [data, ml, api, infra, msg, sec, mon]",
            )),
        }
    }
}

/// Immutable identity tuple for one logical resource group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    project: String,
    environment: Environment,
    service: Service,
    region: Option<String>,
}

impl Identity {
    /// Create a validated identity.
    ///
    /// `project` must match `^[a-z0-9-]{3,8}$`. Environment and service are
    /// closed enums, so they carry no further checks.
    pub fn new(project: impl Into<String>, environment: Environment, service: Service) -> Result<Self> {
        let project = project.into();
        if !PROJECT_RE.is_match(&project) {
            return Err(invalid_identity(
                "project",
                project,
                "must match ^[a-z0-9-]{3,8}$",
            ));
        }

        Ok(Self {
            project,
            environment,
            service,
            region: None,
        })
    }

    /// Attach a region code (lowercase alphanumerics and hyphens).
    pub fn with_region(mut self, region: impl Into<String>) -> Result<Self> {
        let region = region.into();
        if !REGION_RE.is_match(&region) {
            return Err(invalid_identity(
                "region",
                region,
                "must match ^[a-z0-9-]+$",
            ));
        }
        self.region = Some(region);
        Ok(self)
    }

    /// Project short code.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Deployment environment.
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Service domain.
    #[must_use]
    pub fn service(&self) -> Service {
        self.service
    }

    /// Optional region code.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_identity_constructs() {
        let id = Identity::new("dso", Environment::Prod, Service::Data).expect("valid identity");
        assert_eq!(id.project(), "dso");
        assert_eq!(id.environment(), Environment::Prod);
        assert_eq!(id.service(), Service::Data);
        assert!(id.region().is_none());
    }

    #[test]
    fn project_grammar_enforced() {
        // Too short
        assert!(Identity::new("ab", Environment::Dev, Service::Api).is_err());
        // Too long
        assert!(Identity::new("overlong-x", Environment::Dev, Service::Api).is_err());
        // Uppercase
        assert!(Identity::new("Dso", Environment::Dev, Service::Api).is_err());
        // Empty
        assert!(Identity::new("", Environment::Dev, Service::Api).is_err());
        // Underscore
        assert!(Identity::new("a_b_c", Environment::Dev, Service::Api).is_err());
    }

    #[test]
    fn region_grammar_enforced() {
        let id = Identity::new("dso", Environment::Prod, Service::Data).expect("valid identity");
        assert!(id.clone().with_region("eu-west-1").is_ok());
        assert!(id.clone().with_region("EU-WEST-1").is_err());
        assert!(id.with_region("").is_err());
    }

    #[test]
    fn environment_round_trips_through_str() {
        for env in [
            Environment::Dev,
            Environment::Staging,
            Environment::Prod,
            Environment::Sandbox,
            Environment::Dr,
        ] {
            let parsed: Environment = env.as_str().parse().expect("parse env");
            assert_eq!(parsed, env);
        }
        assert!("production".parse::<Environment>().is_err());
    }

    #[test]
    fn service_rejects_unknown_code() {
        assert!("database".parse::<Service>().is_err());
        assert_eq!("msg".parse::<Service>().expect("msg"), Service::Msg);
    }
}
