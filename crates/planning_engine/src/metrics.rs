use models::{AssetSummary, ClientFinancialProfile, MonthlyMetrics};
use std::collections::BTreeMap;

use crate::debts::total_outstanding;

/// Percentage of `part` in `income`; 0 whenever there is no income.
pub(crate) fn ratio(part: f64, income: f64) -> f64 {
    if income > 0.0 {
        part / income * 100.0
    } else {
        0.0
    }
}

/// Sum of positive EMIs across debts flagged `hasLoan`, floored at 0.
pub fn total_emis(profile: &ClientFinancialProfile) -> f64 {
    profile
        .active_debts()
        .map(|d| d.record.monthly_emi)
        .filter(|emi| *emi > 0.0)
        .sum::<f64>()
        .max(0.0)
}

/// Monthly cash-flow view of a profile. The surplus may be negative;
/// every ratio is 0 when income is 0.
pub fn compute_monthly_metrics(profile: &ClientFinancialProfile) -> MonthlyMetrics {
    let income = profile.monthly_income;
    let expenses = profile.monthly_expenses;
    let emis = total_emis(profile);
    let surplus = income - expenses - emis;

    MonthlyMetrics {
        monthly_income: income,
        monthly_expenses: expenses,
        total_emis: emis,
        monthly_surplus: surplus,
        emi_ratio: ratio(emis, income),
        savings_rate: ratio(surplus, income),
        expense_ratio: ratio(expenses, income),
        fixed_expenditure_ratio: ratio(expenses + emis, income),
    }
}

/// Balance-sheet view: cash, investments per category, liabilities and net worth.
pub fn summarize_assets(profile: &ClientFinancialProfile) -> AssetSummary {
    let investments_by_category: BTreeMap<String, f64> = profile
        .assets
        .investments
        .iter()
        .map(|(category, holdings)| (category.clone(), holdings.values().sum::<f64>()))
        .collect();
    let total_investments: f64 = investments_by_category.values().sum();
    let total_assets = profile.assets.cash_bank_savings + total_investments;
    let total_liabilities = total_outstanding(&profile.debts);

    AssetSummary {
        cash_bank_savings: profile.assets.cash_bank_savings,
        investments_by_category,
        total_investments,
        total_assets,
        total_liabilities,
        net_worth: total_assets - total_liabilities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{DebtEntry, DebtRecord, DebtType};
    use proptest::prelude::{prop_assert, proptest};

    fn debt(debt_type: DebtType, has_loan: bool, outstanding: f64, emi: f64) -> DebtEntry {
        DebtEntry {
            debt_type,
            record: DebtRecord {
                has_loan,
                outstanding_amount: outstanding,
                monthly_emi: emi,
                ..Default::default()
            },
        }
    }

    fn scenario_a() -> ClientFinancialProfile {
        ClientFinancialProfile {
            monthly_income: 100_000.0,
            monthly_expenses: 60_000.0,
            debts: vec![debt(DebtType::CarLoan, true, 400_000.0, 10_000.0)],
            ..Default::default()
        }
    }

    #[test]
    fn test_scenario_a_metrics() {
        let m = compute_monthly_metrics(&scenario_a());
        assert_eq!(m.total_emis, 10_000.0);
        assert_eq!(m.monthly_surplus, 30_000.0);
        assert!((m.emi_ratio - 10.0).abs() < 1e-9);
        assert!((m.savings_rate - 30.0).abs() < 1e-9);
        assert!((m.expense_ratio - 60.0).abs() < 1e-9);
        assert!((m.fixed_expenditure_ratio - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_inactive_and_non_positive_emis_are_ignored() {
        let profile = ClientFinancialProfile {
            monthly_income: 50_000.0,
            debts: vec![
                debt(DebtType::HomeLoan, false, 1_000_000.0, 20_000.0),
                debt(DebtType::GoldLoan, true, 10_000.0, 0.0),
                debt(DebtType::PersonalLoan, true, 90_000.0, 3_000.0),
            ],
            ..Default::default()
        };
        assert_eq!(total_emis(&profile), 3_000.0);
    }

    #[test]
    fn test_surplus_can_go_negative() {
        let profile = ClientFinancialProfile {
            monthly_income: 40_000.0,
            monthly_expenses: 45_000.0,
            debts: vec![debt(DebtType::CreditCards, true, 20_000.0, 2_000.0)],
            ..Default::default()
        };
        let m = compute_monthly_metrics(&profile);
        assert_eq!(m.monthly_surplus, -7_000.0);
        assert!(m.savings_rate < 0.0);
    }

    #[test]
    fn test_summarize_assets() {
        let mut profile = scenario_a();
        profile.assets.cash_bank_savings = 150_000.0;
        profile.assets.investments.insert(
            "equity".to_string(),
            BTreeMap::from([("mutualFunds".to_string(), 200_000.0), ("stocks".to_string(), 50_000.0)]),
        );
        profile.assets.investments.insert(
            "debt".to_string(),
            BTreeMap::from([("ppf".to_string(), 100_000.0)]),
        );

        let s = summarize_assets(&profile);
        assert_eq!(s.investments_by_category["equity"], 250_000.0);
        assert_eq!(s.total_investments, 350_000.0);
        assert_eq!(s.total_assets, 500_000.0);
        assert_eq!(s.total_liabilities, 400_000.0);
        assert_eq!(s.net_worth, 100_000.0);
    }

    proptest! {
        #[test]
        fn prop_zero_income_yields_zero_ratios(
            expenses in 0u32..1_000_000,
            emi_a in 0u32..200_000,
            emi_b in 0u32..200_000,
        ) {
            let profile = ClientFinancialProfile {
                monthly_income: 0.0,
                monthly_expenses: expenses as f64,
                debts: vec![
                    debt(DebtType::HomeLoan, true, 1.0, emi_a as f64),
                    debt(DebtType::CarLoan, true, 1.0, emi_b as f64),
                ],
                ..Default::default()
            };
            let m = compute_monthly_metrics(&profile);
            prop_assert!(m.emi_ratio == 0.0);
            prop_assert!(m.savings_rate == 0.0);
            prop_assert!(m.expense_ratio == 0.0);
            prop_assert!(m.fixed_expenditure_ratio == 0.0);
            prop_assert!(m.total_emis >= 0.0);
        }
    }
}
