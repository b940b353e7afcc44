//! Deterministic financial planning formulas.
//!
//! Everything in this crate is a pure function over normalized
//! `models` records: no I/O, no shared state, no failure paths. Bad input
//! degrades to zero-valued output rather than NaN or a panic.

pub mod allocation;
pub mod analysis;
pub mod debts;
pub mod emergency;
pub mod goals;
pub mod health;
pub mod metrics;
pub mod optimizer;

pub use allocation::{allocation_for_age, allocation_for_timeline, horizon_bucket};
pub use analysis::{age_on, analyze_profile};
pub use debts::{
    calculate_emi, estimate_emi, fill_missing_emis, prioritize_debts, summarize_debts,
    total_outstanding,
};
pub use emergency::{evaluate_emergency_fund, evaluate_emergency_fund_with_policy};
pub use goals::{
    future_cost, future_value_lump_sum, future_value_of_sip, goal_timeline_from_sip,
    project_goal, project_goals, required_monthly_sip,
};
pub use health::{assess_financial_health, score_breakdown, score_financial_health};
pub use metrics::{compute_monthly_metrics, summarize_assets, total_emis};
pub use optimizer::{
    allocate_surplus, detect_timeline_conflicts, detect_timeline_conflicts_with_policy,
    optimize_multiple_goals, phase_goals, prioritize_goals,
};
