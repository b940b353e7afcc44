//! Composite 0–100 financial health score.
//!
//! Five independent categories, each worth at most 20 points:
//! income stability, expense management, debt management, savings
//! discipline and emergency preparedness.

use models::{ClientFinancialProfile, HealthAssessment, HealthBreakdown, MonthlyMetrics};

use crate::emergency::months_of_coverage;
use crate::metrics::compute_monthly_metrics;

pub const MAX_CATEGORY_SCORE: u8 = 20;

fn income_stability(m: &MonthlyMetrics) -> u8 {
    if m.monthly_income > 0.0 { 20 } else { 0 }
}

fn expense_management(m: &MonthlyMetrics) -> u8 {
    match m.expense_ratio {
        r if r < 50.0 => 20,
        r if r < 70.0 => 10,
        _ => 0,
    }
}

fn debt_management(m: &MonthlyMetrics) -> u8 {
    match m.emi_ratio {
        r if r == 0.0 => 20,
        r if r < 30.0 => 15,
        r if r < 40.0 => 10,
        r if r < 50.0 => 5,
        _ => 0,
    }
}

fn savings_discipline(m: &MonthlyMetrics) -> u8 {
    match m.savings_rate {
        r if r > 30.0 => 20,
        r if r > 20.0 => 15,
        r if r > 10.0 => 10,
        r if r > 0.0 => 5,
        _ => 0,
    }
}

fn emergency_preparedness(months: f64) -> u8 {
    match months {
        m if m >= 6.0 => 20,
        m if m >= 3.0 => 10,
        m if m >= 1.0 => 5,
        _ => 0,
    }
}

/// Scores already-computed metrics; shared by every caller that needs a
/// health score so the rules live in one place.
pub fn score_from_metrics(metrics: &MonthlyMetrics, months_of_coverage: f64) -> HealthBreakdown {
    HealthBreakdown {
        income_stability: income_stability(metrics),
        expense_management: expense_management(metrics),
        debt_management: debt_management(metrics),
        savings_discipline: savings_discipline(metrics),
        emergency_preparedness: emergency_preparedness(months_of_coverage),
    }
}

pub fn score_breakdown(profile: &ClientFinancialProfile) -> HealthBreakdown {
    let metrics = compute_monthly_metrics(profile);
    let coverage = months_of_coverage(
        profile.assets.cash_bank_savings,
        metrics.monthly_expenses + metrics.total_emis,
    );
    score_from_metrics(&metrics, coverage)
}

pub fn score_financial_health(profile: &ClientFinancialProfile) -> u8 {
    score_breakdown(profile).total()
}

pub fn assess_financial_health(profile: &ClientFinancialProfile) -> HealthAssessment {
    let breakdown = score_breakdown(profile);
    HealthAssessment {
        score: breakdown.total(),
        breakdown,
    }
}
