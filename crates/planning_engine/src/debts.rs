use models::{
    ClientFinancialProfile, DebtEntry, DebtPriority, DebtRecord, DebtSummary, DebtType,
    LoanDefaults, PlanningPolicy, PrioritizedDebt,
};

/// Annual rate (percent) at or above which a debt is repaid first.
pub const HIGH_PRIORITY_RATE: f64 = 15.0;
/// Annual rate (percent) at or above which a debt is worth prepaying.
pub const MEDIUM_PRIORITY_RATE: f64 = 10.0;

pub fn classify_rate(interest_rate: f64) -> DebtPriority {
    if interest_rate >= HIGH_PRIORITY_RATE {
        DebtPriority::High
    } else if interest_rate >= MEDIUM_PRIORITY_RATE {
        DebtPriority::Medium
    } else {
        DebtPriority::Low
    }
}

fn reason(priority: DebtPriority) -> &'static str {
    match priority {
        DebtPriority::High => {
            "High interest rate (15% or more); clear this before investing any surplus"
        }
        DebtPriority::Medium => {
            "Moderate interest rate; prepay once high-interest debts are cleared"
        }
        DebtPriority::Low => "Low interest rate; continue regular EMIs without prepayment",
    }
}

/// Avalanche ordering: outstanding debts by descending interest rate.
///
/// Only debts flagged `hasLoan` with a positive outstanding amount are
/// ranked. Equal rates keep their declaration order.
pub fn prioritize_debts(debts: &[DebtEntry]) -> Vec<PrioritizedDebt> {
    let mut outstanding: Vec<&DebtEntry> =
        debts.iter().filter(|d| d.record.is_outstanding()).collect();
    // sort_by is stable
    outstanding.sort_by(|a, b| b.record.interest_rate.total_cmp(&a.record.interest_rate));

    outstanding
        .into_iter()
        .enumerate()
        .map(|(idx, d)| {
            let priority = classify_rate(d.record.interest_rate);
            PrioritizedDebt {
                debt_type: d.debt_type,
                name: d.debt_type.label().to_string(),
                outstanding_amount: d.record.outstanding_amount,
                monthly_emi: d.record.monthly_emi,
                interest_rate: d.record.interest_rate,
                priority_rank: idx + 1,
                priority,
                reason: reason(priority).to_string(),
            }
        })
        .collect()
}

/// Total still owed on active debts, floored at 0.
pub fn total_outstanding(debts: &[DebtEntry]) -> f64 {
    debts
        .iter()
        .filter(|d| d.record.is_outstanding())
        .map(|d| d.record.outstanding_amount)
        .sum::<f64>()
        .max(0.0)
}

pub fn summarize_debts(debts: &[DebtEntry]) -> DebtSummary {
    let active: Vec<&DebtRecord> = debts
        .iter()
        .map(|d| &d.record)
        .filter(|r| r.is_outstanding())
        .collect();

    let total = total_outstanding(debts);
    let total_emi = active
        .iter()
        .map(|r| r.monthly_emi)
        .filter(|emi| *emi > 0.0)
        .sum::<f64>();
    let weighted_interest_rate = if total > 0.0 {
        active
            .iter()
            .map(|r| r.outstanding_amount * r.interest_rate)
            .sum::<f64>()
            / total
    } else {
        0.0
    };
    let monthly_interest_cost = active
        .iter()
        .map(|r| r.outstanding_amount * r.interest_rate / 1200.0)
        .sum::<f64>();

    DebtSummary {
        active_debts: active.len(),
        total_outstanding: total,
        total_emi,
        weighted_interest_rate,
        monthly_interest_cost,
    }
}

/// Standard amortizing EMI:
///
/// EMI = P × r × (1 + r)^n / [(1 + r)^n - 1], with r = annual_rate / 12 / 100.
pub fn calculate_emi(principal: f64, annual_rate_percent: f64, tenure_months: f64) -> f64 {
    let valid = principal.is_finite() && tenure_months.is_finite() && annual_rate_percent.is_finite();
    if !valid || principal <= 0.0 || tenure_months <= 0.0 {
        return 0.0;
    }

    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    if monthly_rate <= 0.0 {
        return principal / tenure_months;
    }

    let growth = (1.0 + monthly_rate).powf(tenure_months);
    principal * monthly_rate * growth / (growth - 1.0)
}

/// EMI for a debt, falling back to the policy table for whatever rate or
/// tenure the record does not carry.
pub fn estimate_emi(debt_type: DebtType, record: &DebtRecord, defaults: &LoanDefaults) -> f64 {
    let assumption = defaults.for_type(debt_type);
    let rate = if record.interest_rate > 0.0 {
        record.interest_rate
    } else {
        assumption.interest_rate
    };
    let tenure = if record.remaining_tenure_months > 0.0 {
        record.remaining_tenure_months
    } else {
        f64::from(assumption.tenure_months)
    };
    calculate_emi(record.outstanding_amount, rate, tenure)
}

/// Copy of `profile` where every outstanding debt without an EMI gets an
/// estimated one. Debts that already declare an EMI are left alone.
pub fn fill_missing_emis(
    profile: &ClientFinancialProfile,
    policy: &PlanningPolicy,
) -> ClientFinancialProfile {
    let mut filled = profile.clone();
    for entry in filled.debts.iter_mut() {
        if entry.record.is_outstanding() && entry.record.monthly_emi <= 0.0 {
            let emi = estimate_emi(entry.debt_type, &entry.record, &policy.loan_defaults);
            tracing::debug!(
                debt = entry.debt_type.key(),
                emi,
                "estimated missing EMI"
            );
            entry.record.monthly_emi = emi;
        }
    }
    filled
}
