use chrono::{Datelike, NaiveDate};
use models::{ClientFinancialProfile, HealthAssessment, PlanningPolicy, ProfileAnalysis};
use tracing::debug;

use crate::allocation::allocation_for_age;
use crate::debts::{prioritize_debts, summarize_debts};
use crate::emergency::evaluate_emergency_fund_with_policy;
use crate::health::score_from_metrics;
use crate::metrics::{compute_monthly_metrics, summarize_assets};

/// Completed years between `dob` and `as_of`; 0 for a birth date in the future.
pub fn age_on(dob: NaiveDate, as_of: NaiveDate) -> u32 {
    if dob > as_of {
        return 0;
    }
    let mut years = as_of.year() - dob.year();
    if (as_of.month(), as_of.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// Runs every profile-level component once and bundles the results.
pub fn analyze_profile(
    profile: &ClientFinancialProfile,
    as_of: NaiveDate,
    policy: &PlanningPolicy,
) -> ProfileAnalysis {
    let age = profile.date_of_birth.map(|dob| age_on(dob, as_of));
    let metrics = compute_monthly_metrics(profile);
    let emergency_fund = evaluate_emergency_fund_with_policy(profile, policy);
    let breakdown = score_from_metrics(&metrics, emergency_fund.months_of_coverage);
    let recommended_allocation = allocation_for_age(
        age.unwrap_or(policy.default_client_age),
        profile.risk_tolerance,
    );

    let analysis = ProfileAnalysis {
        age,
        metrics,
        assets: summarize_assets(profile),
        debt_summary: summarize_debts(&profile.debts),
        prioritized_debts: prioritize_debts(&profile.debts),
        emergency_fund,
        health: HealthAssessment {
            score: breakdown.total(),
            breakdown,
        },
        recommended_allocation,
    };
    debug!(
        health = analysis.health.score,
        surplus = analysis.metrics.monthly_surplus,
        debts = analysis.prioritized_debts.len(),
        "Analyzed profile"
    );
    analysis
}
