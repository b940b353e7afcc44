use serde::{Deserialize, Serialize};

use crate::DebtType;

// Business policy constants. Calibration basis for these values is not
// documented anywhere upstream; change them through settings, not here.

/// Minimum viable emergency reserve regardless of expense level.
pub const EMERGENCY_FUND_FLOOR: f64 = 50_000.0;
/// Months of committed outflows the emergency reserve should cover.
pub const EMERGENCY_FUND_MONTHS: f64 = 6.0;
/// Combined same-year goal amount above which a timeline conflict is raised.
pub const CONFLICT_THRESHOLD: f64 = 2_000_000.0;
/// Combined same-year goal amount above which a conflict is `High` severity.
pub const HIGH_SEVERITY_THRESHOLD: f64 = 5_000_000.0;
/// Smallest monthly contribution suggested for any funded goal.
pub const MINIMUM_SIP: f64 = 5_000.0;
/// Width of each staged-implementation phase.
pub const PHASE_LENGTH_YEARS: i32 = 3;
/// Age assumed by the age-based allocation when no date of birth is known.
pub const DEFAULT_CLIENT_AGE: u32 = 35;
/// Cache lifetime for external recommendations.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 24 * 60 * 60;

/// Rate and tenure assumed for a loan whose EMI was not supplied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanAssumption {
    pub interest_rate: f64,
    pub tenure_months: u32,
}

impl LoanAssumption {
    const fn new(interest_rate: f64, tenure_months: u32) -> Self {
        Self {
            interest_rate,
            tenure_months,
        }
    }
}

/// Canonical fallback table used when estimating missing EMIs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoanDefaults {
    pub home_loan: LoanAssumption,
    pub personal_loan: LoanAssumption,
    pub car_loan: LoanAssumption,
    pub education_loan: LoanAssumption,
    pub credit_cards: LoanAssumption,
    pub business_loan: LoanAssumption,
    pub gold_loan: LoanAssumption,
    pub other_loans: LoanAssumption,
}

impl Default for LoanDefaults {
    fn default() -> Self {
        Self {
            home_loan: LoanAssumption::new(8.5, 240),
            personal_loan: LoanAssumption::new(12.0, 60),
            car_loan: LoanAssumption::new(9.0, 60),
            education_loan: LoanAssumption::new(10.0, 84),
            credit_cards: LoanAssumption::new(36.0, 24),
            business_loan: LoanAssumption::new(14.0, 60),
            gold_loan: LoanAssumption::new(9.0, 12),
            other_loans: LoanAssumption::new(12.0, 36),
        }
    }
}

impl LoanDefaults {
    pub fn for_type(&self, debt_type: DebtType) -> LoanAssumption {
        match debt_type {
            DebtType::HomeLoan => self.home_loan,
            DebtType::PersonalLoan => self.personal_loan,
            DebtType::CarLoan => self.car_loan,
            DebtType::EducationLoan => self.education_loan,
            DebtType::CreditCards => self.credit_cards,
            DebtType::BusinessLoan => self.business_loan,
            DebtType::GoldLoan => self.gold_loan,
            DebtType::OtherLoans => self.other_loans,
        }
    }
}

/// Tunable thresholds consumed by the planning engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanningPolicy {
    pub emergency_fund_floor: f64,
    pub emergency_fund_months: f64,
    pub conflict_threshold: f64,
    pub high_severity_threshold: f64,
    pub minimum_sip: f64,
    pub phase_length_years: i32,
    pub default_client_age: u32,
    pub loan_defaults: LoanDefaults,
}

impl Default for PlanningPolicy {
    fn default() -> Self {
        Self {
            emergency_fund_floor: EMERGENCY_FUND_FLOOR,
            emergency_fund_months: EMERGENCY_FUND_MONTHS,
            conflict_threshold: CONFLICT_THRESHOLD,
            high_severity_threshold: HIGH_SEVERITY_THRESHOLD,
            minimum_sip: MINIMUM_SIP,
            phase_length_years: PHASE_LENGTH_YEARS,
            default_client_age: DEFAULT_CLIENT_AGE,
            loan_defaults: LoanDefaults::default(),
        }
    }
}

/// Contents of `settings.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub settings_version: u32,
    pub policy: PlanningPolicy,
    pub cache_ttl_secs: u64,
    pub estimate_missing_emi: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            settings_version: 1,
            policy: PlanningPolicy::default(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            estimate_missing_emi: false,
        }
    }
}
