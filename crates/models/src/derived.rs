use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{DebtType, Goal, GoalPriority, RiskTolerance};

// Cash-flow metrics
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyMetrics {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    #[serde(rename = "totalEMIs")]
    pub total_emis: f64,
    /// Negative when the client runs a deficit.
    pub monthly_surplus: f64,
    pub emi_ratio: f64,
    pub savings_rate: f64,
    pub expense_ratio: f64,
    pub fixed_expenditure_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSummary {
    pub cash_bank_savings: f64,
    pub investments_by_category: BTreeMap<String, f64>,
    pub total_investments: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
}

// Debts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizedDebt {
    pub debt_type: DebtType,
    pub name: String,
    pub outstanding_amount: f64,
    #[serde(rename = "monthlyEMI")]
    pub monthly_emi: f64,
    pub interest_rate: f64,
    pub priority_rank: usize,
    pub priority: DebtPriority,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtSummary {
    pub active_debts: usize,
    pub total_outstanding: f64,
    #[serde(rename = "totalEMI")]
    pub total_emi: f64,
    /// Outstanding-weighted average annual rate, 0 when nothing is owed.
    pub weighted_interest_rate: f64,
    pub monthly_interest_cost: f64,
}

// Emergency fund
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyFundStatus {
    pub monthly_commitments: f64,
    pub target_amount: f64,
    pub current_amount: f64,
    pub gap: f64,
    pub months_of_coverage: f64,
    pub completion_percentage: f64,
}

// Health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthBreakdown {
    pub income_stability: u8,
    pub expense_management: u8,
    pub debt_management: u8,
    pub savings_discipline: u8,
    pub emergency_preparedness: u8,
}

impl HealthBreakdown {
    pub fn total(&self) -> u8 {
        let sum = u32::from(self.income_stability)
            + u32::from(self.expense_management)
            + u32::from(self.debt_management)
            + u32::from(self.savings_discipline)
            + u32::from(self.emergency_preparedness);
        sum.min(100) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAssessment {
    pub score: u8,
    pub breakdown: HealthBreakdown,
}

// Allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizonBucket {
    Short,
    Medium,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAllocation {
    pub equity: f64,
    pub debt: f64,
    /// Only the timeline model carries an expected return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_return: Option<f64>,
}

// Goals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProjection {
    pub goal: Goal,
    pub time_in_years: i32,
    pub horizon: HorizonBucket,
    pub risk_profile: RiskTolerance,
    pub asset_allocation: AssetAllocation,
    /// Target after inflation, before crediting current savings.
    pub future_target: f64,
    /// What the current savings grow to by the target year.
    pub projected_savings: f64,
    #[serde(rename = "monthlySIP")]
    pub monthly_sip: f64,
    #[serde(rename = "suggestedMonthlySIP")]
    pub suggested_monthly_sip: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictSeverity {
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineConflict {
    pub year: i32,
    pub goal_ids: Vec<String>,
    pub total_amount: f64,
    pub severity: ConflictSeverity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizedGoal {
    pub goal_id: String,
    pub title: String,
    pub priority: GoalPriority,
    pub time_in_years: i32,
    pub priority_score: u32,
    #[serde(rename = "monthlySIP")]
    pub monthly_sip: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPhase {
    pub phase: u32,
    /// e.g. "Years 1-3"
    pub label: String,
    /// Goals due more than `from_years` and at most `to_years` from now.
    pub from_years: i32,
    pub to_years: i32,
    pub goals: Vec<PrioritizedGoal>,
    #[serde(rename = "totalMonthlySIP")]
    pub total_monthly_sip: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingAllocation {
    pub goal_id: String,
    pub required: f64,
    pub allocated: f64,
    pub shortfall: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub total_required: f64,
    pub available_surplus: f64,
    pub deficit: f64,
    pub can_afford_all: bool,
    pub surplus_utilization: f64,
    pub prioritized_goals: Vec<PrioritizedGoal>,
    pub phases: Vec<GoalPhase>,
    pub funding: Vec<FundingAllocation>,
}

/// Everything the engine derives from a single profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAnalysis {
    pub age: Option<u32>,
    pub metrics: MonthlyMetrics,
    pub assets: AssetSummary,
    pub debt_summary: DebtSummary,
    pub prioritized_debts: Vec<PrioritizedDebt>,
    pub emergency_fund: EmergencyFundStatus,
    pub health: HealthAssessment,
    pub recommended_allocation: AssetAllocation,
}
