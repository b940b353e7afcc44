//! Goal projection: SIP sizing, its inverse, and compounding helpers.
//!
//! Every calculator here degrades to 0 on non-positive amounts, negative
//! horizons or an unusable rate instead of returning NaN or infinity.

use models::{Goal, GoalProjection, PlanningPolicy, RiskTolerance};
use tracing::debug;

use crate::allocation::{allocation_for_timeline, expected_return, horizon_bucket};

fn usable_rate(rate: f64) -> bool {
    rate.is_finite() && rate >= 0.0
}

fn monthly_rate(annual_pct: f64) -> f64 {
    annual_pct / 1200.0
}

/// Monthly contribution that grows to `target` in `years` at `rate` percent
/// a year (ordinary annuity, monthly compounding).
///
/// `years == 0` means the money is needed now, so the whole target is due.
pub fn required_monthly_sip(target: f64, years: f64, rate: f64) -> f64 {
    if !target.is_finite() || target <= 0.0 || !years.is_finite() || years < 0.0 || !usable_rate(rate) {
        return 0.0;
    }
    if years == 0.0 {
        return target;
    }
    let n = years * 12.0;
    let r = monthly_rate(rate);
    if r == 0.0 {
        return target / n;
    }
    target * r / ((1.0 + r).powf(n) - 1.0)
}

pub fn future_value_of_sip(monthly_sip: f64, rate: f64, years: f64) -> f64 {
    if !monthly_sip.is_finite() || monthly_sip <= 0.0 || !years.is_finite() || years <= 0.0 || !usable_rate(rate) {
        return 0.0;
    }
    let n = years * 12.0;
    let r = monthly_rate(rate);
    if r == 0.0 {
        return monthly_sip * n;
    }
    monthly_sip * ((1.0 + r).powf(n) - 1.0) / r
}

/// Annually compounded growth of a lump sum.
pub fn future_value_lump_sum(principal: f64, rate: f64, years: f64) -> f64 {
    if !principal.is_finite() || principal <= 0.0 || !years.is_finite() || years < 0.0 || !usable_rate(rate) {
        return 0.0;
    }
    principal * (1.0 + rate / 100.0).powf(years)
}

/// Years needed to reach `target` contributing `monthly_sip` each month.
pub fn goal_timeline_from_sip(target: f64, monthly_sip: f64, rate: f64) -> f64 {
    if !monthly_sip.is_finite() || monthly_sip <= 0.0 || !target.is_finite() || target <= 0.0 || !usable_rate(rate) {
        return 0.0;
    }
    let r = monthly_rate(rate);
    if r == 0.0 {
        return target / monthly_sip / 12.0;
    }
    let months = (1.0 + target * r / monthly_sip).ln() / (1.0 + r).ln();
    months / 12.0
}

/// Cost of something priced `present` today after `years` of `inflation` percent.
pub fn future_cost(present: f64, inflation: f64, years: f64) -> f64 {
    if !present.is_finite() || present <= 0.0 {
        return 0.0;
    }
    if !years.is_finite() || years <= 0.0 || !usable_rate(inflation) {
        return present;
    }
    present * (1.0 + inflation / 100.0).powf(years)
}

pub fn project_goal(
    goal: &Goal,
    risk: RiskTolerance,
    current_year: i32,
    policy: &PlanningPolicy,
) -> GoalProjection {
    let time_in_years = goal.time_in_years(current_year);
    let horizon = horizon_bucket(time_in_years);
    let asset_allocation = allocation_for_timeline(time_in_years, risk);
    let rate = asset_allocation
        .expected_return
        .unwrap_or_else(|| expected_return(horizon));
    let years = f64::from(time_in_years);

    let future_target = future_cost(goal.target_amount, goal.inflation_rate, years);
    let projected_savings = future_value_lump_sum(goal.current_savings, rate, years);
    let remaining = (future_target - projected_savings).max(0.0);
    let monthly_sip = required_monthly_sip(remaining, years, rate);
    let suggested_monthly_sip = if monthly_sip > 0.0 {
        monthly_sip.max(policy.minimum_sip)
    } else {
        0.0
    };

    GoalProjection {
        goal: goal.clone(),
        time_in_years,
        horizon,
        risk_profile: risk,
        asset_allocation,
        future_target,
        projected_savings,
        monthly_sip,
        suggested_monthly_sip,
    }
}

pub fn project_goals(
    goals: &[Goal],
    risk: RiskTolerance,
    current_year: i32,
    policy: &PlanningPolicy,
) -> Vec<GoalProjection> {
    let projections: Vec<GoalProjection> = goals
        .iter()
        .map(|g| project_goal(g, risk, current_year, policy))
        .collect();
    debug!(
        goals = projections.len(),
        total_sip = projections.iter().map(|p| p.monthly_sip).sum::<f64>(),
        "Projected goals"
    );
    projections
}
