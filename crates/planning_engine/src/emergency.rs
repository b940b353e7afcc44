use models::{ClientFinancialProfile, EmergencyFundStatus, PlanningPolicy};

use crate::metrics::total_emis;

/// Emergency reserve status under the default policy.
pub fn evaluate_emergency_fund(profile: &ClientFinancialProfile) -> EmergencyFundStatus {
    evaluate_emergency_fund_with_policy(profile, &PlanningPolicy::default())
}

/// The reserve is sized at `emergency_fund_months` of committed outflows
/// (expenses plus EMIs), never below `emergency_fund_floor`. Cash and bank
/// savings count as the current reserve.
pub fn evaluate_emergency_fund_with_policy(
    profile: &ClientFinancialProfile,
    policy: &PlanningPolicy,
) -> EmergencyFundStatus {
    let monthly_commitments = profile.monthly_expenses + total_emis(profile);
    let target_amount =
        (monthly_commitments * policy.emergency_fund_months).max(policy.emergency_fund_floor);
    let current_amount = profile.assets.cash_bank_savings;

    EmergencyFundStatus {
        monthly_commitments,
        target_amount,
        current_amount,
        gap: (target_amount - current_amount).max(0.0),
        months_of_coverage: months_of_coverage(current_amount, monthly_commitments),
        completion_percentage: if target_amount > 0.0 {
            current_amount / target_amount * 100.0
        } else {
            0.0
        },
    }
}

pub fn months_of_coverage(current_amount: f64, monthly_commitments: f64) -> f64 {
    if monthly_commitments > 0.0 {
        current_amount / monthly_commitments
    } else {
        0.0
    }
}
