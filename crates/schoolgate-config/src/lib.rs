//! # Schoolgate Config
//!
//! Configuration structures loaded from environment variables.
//!
//! - [`scope`]: How far teacher scope reaches across academic years
//!
//! # Example
//!
//! ```ignore
//! use schoolgate_config::AuthzConfig;
//!
//! let config = AuthzConfig::from_env();
//! ```

pub mod scope;

pub use scope::{AcademicYearScope, ScopeConfig};

/// Top-level configuration of the authorization engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthzConfig {
    pub scope: ScopeConfig,
    /// Emit `authz_decisions_total` counters.
    pub record_metrics: bool,
}

impl Default for AuthzConfig {
    fn default() -> Self {
        Self {
            scope: ScopeConfig::default(),
            record_metrics: true,
        }
    }
}

impl AuthzConfig {
    /// Loads the configuration from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `AUTHZ_ACADEMIC_YEAR`: see [`ScopeConfig::from_env`]
    /// - `AUTHZ_METRICS_ENABLED`: `true`/`false`, default `true`
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            scope: ScopeConfig::from_env(),
            record_metrics: std::env::var("AUTHZ_METRICS_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}
