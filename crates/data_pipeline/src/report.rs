use std::collections::BTreeMap;

use models::{
    AssetAllocation, DebtSummary, EmergencyFundStatus, GoalProjection, MonthlyMetrics,
    OptimizationResult, PlanningPolicy, ProfileAnalysis, TimelineConflict,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub generated_at: String,
    pub as_of: String,
    pub settings_version: u32,
    pub policy: PlanningPolicy,
    /// True when missing EMIs were estimated from the loan default table.
    pub estimated_emis: bool,
    /// Set when the caller replaced the computed surplus.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_surplus_override: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryReport {
    pub metadata: ReportMetadata,
    pub analysis: ProfileAnalysis,
    pub goals: Vec<GoalProjection>,
    pub conflicts: Vec<TimelineConflict>,
    pub optimization: OptimizationResult,
    /// Provider output per goal id, passed through unchanged.
    pub recommendations: BTreeMap<String, Value>,
    pub warnings: Vec<String>,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round_metrics(m: &mut MonthlyMetrics) {
    for v in [
        &mut m.monthly_income,
        &mut m.monthly_expenses,
        &mut m.total_emis,
        &mut m.monthly_surplus,
        &mut m.emi_ratio,
        &mut m.savings_rate,
        &mut m.expense_ratio,
        &mut m.fixed_expenditure_ratio,
    ] {
        *v = round2(*v);
    }
}

fn round_debt_summary(s: &mut DebtSummary) {
    s.total_outstanding = round2(s.total_outstanding);
    s.total_emi = round2(s.total_emi);
    s.weighted_interest_rate = round2(s.weighted_interest_rate);
    s.monthly_interest_cost = round2(s.monthly_interest_cost);
}

fn round_emergency(e: &mut EmergencyFundStatus) {
    for v in [
        &mut e.monthly_commitments,
        &mut e.target_amount,
        &mut e.current_amount,
        &mut e.gap,
        &mut e.months_of_coverage,
        &mut e.completion_percentage,
    ] {
        *v = round2(*v);
    }
}

fn round_allocation(a: &mut AssetAllocation) {
    a.equity = round2(a.equity);
    a.debt = round2(a.debt);
    a.expected_return = a.expected_return.map(round2);
}

impl AdvisoryReport {
    /// Rounds every monetary amount and ratio to 2 decimals for output.
    pub fn rounded(mut self) -> Self {
        let analysis = &mut self.analysis;
        round_metrics(&mut analysis.metrics);
        round_debt_summary(&mut analysis.debt_summary);
        round_emergency(&mut analysis.emergency_fund);
        round_allocation(&mut analysis.recommended_allocation);

        let assets = &mut analysis.assets;
        assets.cash_bank_savings = round2(assets.cash_bank_savings);
        assets.total_investments = round2(assets.total_investments);
        assets.total_assets = round2(assets.total_assets);
        assets.total_liabilities = round2(assets.total_liabilities);
        assets.net_worth = round2(assets.net_worth);
        for v in assets.investments_by_category.values_mut() {
            *v = round2(*v);
        }

        for d in &mut analysis.prioritized_debts {
            d.outstanding_amount = round2(d.outstanding_amount);
            d.monthly_emi = round2(d.monthly_emi);
            d.interest_rate = round2(d.interest_rate);
        }

        for p in &mut self.goals {
            p.future_target = round2(p.future_target);
            p.projected_savings = round2(p.projected_savings);
            p.monthly_sip = round2(p.monthly_sip);
            p.suggested_monthly_sip = round2(p.suggested_monthly_sip);
            round_allocation(&mut p.asset_allocation);
        }

        for c in &mut self.conflicts {
            c.total_amount = round2(c.total_amount);
        }

        let opt = &mut self.optimization;
        opt.total_required = round2(opt.total_required);
        opt.available_surplus = round2(opt.available_surplus);
        opt.deficit = round2(opt.deficit);
        opt.surplus_utilization = round2(opt.surplus_utilization);
        for g in &mut opt.prioritized_goals {
            g.monthly_sip = round2(g.monthly_sip);
        }
        for phase in &mut opt.phases {
            phase.total_monthly_sip = round2(phase.total_monthly_sip);
            for g in &mut phase.goals {
                g.monthly_sip = round2(g.monthly_sip);
            }
        }
        for f in &mut opt.funding {
            f.required = round2(f.required);
            f.allocated = round2(f.allocated);
            f.shortfall = round2(f.shortfall);
        }

        self
    }
}
