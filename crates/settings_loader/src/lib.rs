//! # Settings Loader
//!
//! Centralized loading of `settings.json`, the file that carries the
//! planning policy (emergency-fund floor, conflict thresholds, minimum SIP,
//! loan defaults), the recommendation cache lifetime and the EMI estimation
//! switch. Absent fields fall back to the built-in constants.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! // Load settings from a specific path
//! let settings = settings_loader::load_settings("config/my_settings.json")?;
//!
//! // Load optional settings (defaults when no path is given)
//! let path = Some(PathBuf::from("settings.json"));
//! let settings = settings_loader::load_optional_settings(path.as_ref())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use models::{PlanningPolicy, Settings};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";
pub const SUPPORTED_SETTINGS_VERSION: u32 = 1;
/// Longest planning phase accepted, in years.
pub const MAX_PHASE_LENGTH_YEARS: i32 = 100;

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("unsupported settings_version {0} (expected {SUPPORTED_SETTINGS_VERSION})")]
    UnsupportedVersion(u32),
    #[error("emergencyFundFloor must be >= 0, got {0}")]
    NegativeEmergencyFloor(f64),
    #[error("emergencyFundMonths must be > 0, got {0}")]
    NonPositiveEmergencyMonths(f64),
    #[error("{0} must be a finite number >= 0, got {1}")]
    InvalidThreshold(&'static str, f64),
    #[error("conflictThreshold ({medium}) must not exceed highSeverityThreshold ({high})")]
    ThresholdOrder { medium: f64, high: f64 },
    #[error("minimumSip must be > 0, got {0}")]
    NonPositiveMinimumSip(f64),
    #[error("phaseLengthYears must be between 1 and {MAX_PHASE_LENGTH_YEARS}, got {0}")]
    InvalidPhaseLength(i32),
    #[error("loan default for {0} has a negative rate or zero tenure")]
    InvalidLoanDefault(&'static str),
}

fn finite_non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

/// Checks the policy for values the engine cannot work with.
pub fn validate_policy(policy: &PlanningPolicy) -> Result<(), SettingsError> {
    if !finite_non_negative(policy.emergency_fund_floor) {
        return Err(SettingsError::NegativeEmergencyFloor(policy.emergency_fund_floor));
    }
    if !(policy.emergency_fund_months.is_finite() && policy.emergency_fund_months > 0.0) {
        return Err(SettingsError::NonPositiveEmergencyMonths(policy.emergency_fund_months));
    }
    if !finite_non_negative(policy.conflict_threshold) {
        return Err(SettingsError::InvalidThreshold("conflictThreshold", policy.conflict_threshold));
    }
    if !finite_non_negative(policy.high_severity_threshold) {
        return Err(SettingsError::InvalidThreshold(
            "highSeverityThreshold",
            policy.high_severity_threshold,
        ));
    }
    if policy.conflict_threshold > policy.high_severity_threshold {
        return Err(SettingsError::ThresholdOrder {
            medium: policy.conflict_threshold,
            high: policy.high_severity_threshold,
        });
    }
    if !(policy.minimum_sip.is_finite() && policy.minimum_sip > 0.0) {
        return Err(SettingsError::NonPositiveMinimumSip(policy.minimum_sip));
    }
    if !(1..=MAX_PHASE_LENGTH_YEARS).contains(&policy.phase_length_years) {
        return Err(SettingsError::InvalidPhaseLength(policy.phase_length_years));
    }
    for debt_type in models::DebtType::ALL {
        let a = policy.loan_defaults.for_type(debt_type);
        if !finite_non_negative(a.interest_rate) || a.tenure_months == 0 {
            return Err(SettingsError::InvalidLoanDefault(debt_type.key()));
        }
    }
    Ok(())
}

pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.settings_version != SUPPORTED_SETTINGS_VERSION {
        return Err(SettingsError::UnsupportedVersion(settings.settings_version));
    }
    validate_policy(&settings.policy)
}

/// Loads and validates settings from a JSON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;
    validate_settings(&settings)
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    debug!(path = %path.display(), "Loaded settings");
    Ok(settings)
}

/// Loads settings from the default location (settings.json in the current directory)
pub fn load_default_settings() -> Result<Settings> {
    load_settings(DEFAULT_SETTINGS_FILE)
}

/// Loads settings from an optional path; built-in defaults when no path is provided
pub fn load_optional_settings(path: Option<&PathBuf>) -> Result<Settings> {
    match path {
        Some(settings_path) => load_settings(settings_path),
        None => Ok(Settings::default()),
    }
}

/// Tries the provided path, then the default location, then the built-in defaults.
/// A file that exists but fails to parse or validate is still an error.
pub fn load_settings_with_fallback(path: Option<&PathBuf>) -> Result<Settings> {
    if let Some(settings_path) = path {
        if settings_file_exists(settings_path) {
            return load_settings(settings_path);
        }
        warn!(path = %settings_path.display(), "Settings file not found, trying default location");
    }

    if default_settings_exist() {
        return load_default_settings();
    }
    debug!("No settings file found, using built-in defaults");
    Ok(Settings::default())
}

/// Checks if a settings file exists at the given path
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_file()
}

/// Checks if the default settings file (settings.json) exists
pub fn default_settings_exist() -> bool {
    settings_file_exists(DEFAULT_SETTINGS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_settings(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_partial_settings() {
        let file = write_settings(
            r#"{ "settings_version": 1, "policy": { "minimumSip": 2500 }, "estimate_missing_emi": true }"#,
        );
        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.policy.minimum_sip, 2_500.0);
        assert_eq!(settings.policy.emergency_fund_floor, models::EMERGENCY_FUND_FLOOR);
        assert!(settings.estimate_missing_emi);
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let file = write_settings(
            r#"{ "policy": { "conflictThreshold": 6000000, "highSeverityThreshold": 5000000 } }"#,
        );
        let err = load_settings(file.path()).unwrap_err();
        let root = err.root_cause().to_string();
        assert!(root.contains("conflictThreshold"), "{root}");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let file = write_settings("{ not json");
        let err = load_settings(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Parsing settings JSON"));
    }

    #[test]
    fn test_optional_settings_default_when_absent() {
        let settings = load_optional_settings(None).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_fallback_skips_missing_path() {
        let missing = PathBuf::from("/definitely/not/here/settings.json");
        let settings = load_settings_with_fallback(Some(&missing)).unwrap();
        assert_eq!(settings.settings_version, 1);
    }

    #[test]
    fn test_validate_policy_errors() {
        let bad_floor = PlanningPolicy { emergency_fund_floor: -1.0, ..Default::default() };
        assert_eq!(validate_policy(&bad_floor), Err(SettingsError::NegativeEmergencyFloor(-1.0)));

        let bad_sip = PlanningPolicy { minimum_sip: 0.0, ..Default::default() };
        assert_eq!(validate_policy(&bad_sip), Err(SettingsError::NonPositiveMinimumSip(0.0)));

        let bad_phase = PlanningPolicy { phase_length_years: 0, ..Default::default() };
        assert_eq!(validate_policy(&bad_phase), Err(SettingsError::InvalidPhaseLength(0)));

        let mut bad_loan = PlanningPolicy::default();
        bad_loan.loan_defaults.gold_loan.tenure_months = 0;
        assert_eq!(validate_policy(&bad_loan), Err(SettingsError::InvalidLoanDefault("goldLoan")));

        assert_eq!(validate_policy(&PlanningPolicy::default()), Ok(()));
    }

    #[test]
    fn test_non_finite_thresholds_are_rejected() {
        let nan_medium = PlanningPolicy { conflict_threshold: f64::NAN, ..Default::default() };
        assert!(matches!(
            validate_policy(&nan_medium),
            Err(SettingsError::InvalidThreshold("conflictThreshold", v)) if v.is_nan()
        ));

        let inf_high = PlanningPolicy { high_severity_threshold: f64::INFINITY, ..Default::default() };
        assert_eq!(
            validate_policy(&inf_high),
            Err(SettingsError::InvalidThreshold("highSeverityThreshold", f64::INFINITY))
        );

        let negative = PlanningPolicy { conflict_threshold: -1.0, ..Default::default() };
        assert_eq!(
            validate_policy(&negative),
            Err(SettingsError::InvalidThreshold("conflictThreshold", -1.0))
        );
    }

    #[test]
    fn test_phase_length_upper_bound() {
        let longest = PlanningPolicy { phase_length_years: MAX_PHASE_LENGTH_YEARS, ..Default::default() };
        assert_eq!(validate_policy(&longest), Ok(()));

        let too_long = PlanningPolicy { phase_length_years: 101, ..Default::default() };
        assert_eq!(validate_policy(&too_long), Err(SettingsError::InvalidPhaseLength(101)));

        let file = write_settings(r#"{ "policy": { "phaseLengthYears": 2147483647 } }"#);
        let err = load_settings(file.path()).unwrap_err();
        assert!(err.root_cause().to_string().contains("phaseLengthYears"));
    }

    #[test]
    fn test_unsupported_version() {
        let settings = Settings { settings_version: 7, ..Default::default() };
        assert_eq!(validate_settings(&settings), Err(SettingsError::UnsupportedVersion(7)));
    }
}
