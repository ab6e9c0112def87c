//! Teacher scope configuration.
//!
//! Teacher scope is the union of homeroom classes and classes reached through
//! teaching assignments. By default assignments from every academic year count;
//! a deployment can pin scope to a single year instead.

use schoolgate_models::is_academic_year;
use tracing::warn;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AcademicYearScope {
    /// Assignments of any academic year count.
    #[default]
    All,
    /// Only classes and assignments of this academic year count.
    Only(String),
}

impl AcademicYearScope {
    pub fn includes(&self, academic_year: &str) -> bool {
        match self {
            AcademicYearScope::All => true,
            AcademicYearScope::Only(year) => year == academic_year,
        }
    }

    /// Parses `YYYY-YYYY`; anything else is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        is_academic_year(raw).then(|| AcademicYearScope::Only(raw.to_string()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopeConfig {
    pub academic_year: AcademicYearScope,
}

impl ScopeConfig {
    pub fn all_years() -> Self {
        Self::default()
    }

    pub fn only_year(year: impl Into<String>) -> Self {
        Self {
            academic_year: AcademicYearScope::Only(year.into()),
        }
    }

    /// Reads `AUTHZ_ACADEMIC_YEAR`.
    ///
    /// Unset or empty keeps every year in scope. A malformed value is logged
    /// and also falls back to every year.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var("AUTHZ_ACADEMIC_YEAR") {
            Ok(raw) if !raw.trim().is_empty() => Self::from_raw(&raw),
            _ => Self::default(),
        }
    }

    fn from_raw(raw: &str) -> Self {
        match AcademicYearScope::parse(raw) {
            Some(academic_year) => Self { academic_year },
            None => {
                warn!(
                    value = %raw,
                    "Ignoring malformed AUTHZ_ACADEMIC_YEAR, scoping across all years"
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_includes_everything() {
        assert!(AcademicYearScope::All.includes("1999-2000"));
    }

    #[test]
    fn test_only_includes_one_year() {
        let scope = AcademicYearScope::Only("2024-2025".to_string());
        assert!(scope.includes("2024-2025"));
        assert!(!scope.includes("2023-2024"));
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            AcademicYearScope::parse(" 2024-2025 "),
            Some(AcademicYearScope::Only("2024-2025".to_string()))
        );
        assert_eq!(AcademicYearScope::parse("2024-2026"), None);
        assert_eq!(AcademicYearScope::parse("current"), None);
        assert_eq!(AcademicYearScope::parse("+123-0124"), None);
    }

    #[test]
    fn test_malformed_falls_back_to_all() {
        assert_eq!(ScopeConfig::from_raw("next year"), ScopeConfig::all_years());
        assert_eq!(
            ScopeConfig::from_raw("2030-2031"),
            ScopeConfig::only_year("2030-2031")
        );
    }
}
