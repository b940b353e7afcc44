//! Fixed alias table for loosely-typed client documents.
//!
//! Every canonical field lists the names it may appear under, in lookup
//! order. Matching folds case and ignores `_`, `-` and spaces, so
//! `monthly_income`, `MonthlyIncome` and `monthlyIncome` are the same key.

use serde_json::{Map, Value};

// Profile fields
pub const MONTHLY_INCOME: &[&str] = &["monthlyIncome", "totalMonthlyIncome", "monthlyTakeHome", "income"];
pub const MONTHLY_EXPENSES: &[&str] = &["monthlyExpenses", "totalMonthlyExpenses", "monthlyExpense", "expenses"];
pub const DATE_OF_BIRTH: &[&str] = &["dateOfBirth", "dob", "birthDate"];
pub const RISK_TOLERANCE: &[&str] = &["riskTolerance", "riskProfile", "riskAppetite"];

/// Sub-objects some forms use to group profile fields.
pub const PROFILE_SECTIONS: &[&str] = &["personalInfo", "incomeInfo", "expenseInfo", "financials", "cashFlow"];

// Containers
pub const DEBTS: &[&str] = &["debts", "debtInfo", "liabilities", "loans"];
pub const ASSETS: &[&str] = &["assets", "assetInfo"];
pub const CASH_BANK_SAVINGS: &[&str] = &["cashBankSavings", "bankSavings", "cashInBank", "savings"];
pub const INVESTMENTS: &[&str] = &["investments"];

// Debt record fields
pub const DEBT_KIND: &[&str] = &["debtType", "type", "kind"];
pub const HAS_LOAN: &[&str] = &["hasLoan", "hasDebt"];
pub const OUTSTANDING_AMOUNT: &[&str] = &["outstandingAmount", "totalOutstanding", "outstandingBalance", "outstanding"];
pub const MONTHLY_EMI: &[&str] = &["monthlyEMI", "monthlyPayment", "emi"];
pub const INTEREST_RATE: &[&str] = &["interestRate", "annualInterestRate", "rate"];
pub const REMAINING_TENURE: &[&str] = &["remainingTenureMonths", "remainingTenure", "tenureMonths"];

// Goal fields
pub const GOALS: &[&str] = &["goals", "financialGoals"];
pub const GOAL_ID: &[&str] = &["id", "goalId"];
pub const GOAL_TITLE: &[&str] = &["title", "name", "goalName"];
pub const GOAL_TARGET_AMOUNT: &[&str] = &["targetAmount", "goalAmount", "targetValue", "amount"];
pub const GOAL_TARGET_YEAR: &[&str] = &["targetYear", "year"];
pub const GOAL_TARGET_DATE: &[&str] = &["targetDate"];
pub const GOAL_PRIORITY: &[&str] = &["priority"];
pub const GOAL_CURRENT_SAVINGS: &[&str] = &["currentSavings", "existingSavings", "currentAmount"];
pub const GOAL_INFLATION: &[&str] = &["inflationRate", "inflation"];

fn fold(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns the first non-null value found under any of `aliases`.
pub fn lookup<'a>(obj: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases.iter().find_map(|alias| {
        let wanted = fold(alias);
        obj.iter()
            .find(|(k, v)| !v.is_null() && fold(k) == wanted)
            .map(|(_, v)| v)
    })
}

/// Like [`lookup`], but also searches the known profile sections when the
/// field is not present at the top level.
pub fn lookup_in_sections<'a>(obj: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    lookup(obj, aliases).or_else(|| {
        PROFILE_SECTIONS.iter().find_map(|section| {
            lookup(obj, &[section])
                .and_then(Value::as_object)
                .and_then(|inner| lookup(inner, aliases))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_folds_case_and_separators() {
        let v = json!({ "monthly_income": 1000, "Monthly-Expenses": 500 });
        let obj = v.as_object().unwrap();
        assert_eq!(lookup(obj, MONTHLY_INCOME), Some(&json!(1000)));
        assert_eq!(lookup(obj, MONTHLY_EXPENSES), Some(&json!(500)));
    }

    #[test]
    fn test_lookup_respects_alias_order() {
        let v = json!({ "monthlyPayment": 200, "monthlyEMI": 100 });
        let obj = v.as_object().unwrap();
        assert_eq!(lookup(obj, MONTHLY_EMI), Some(&json!(100)));
    }

    #[test]
    fn test_lookup_skips_null_values() {
        let v = json!({ "outstandingAmount": null, "totalOutstanding": 5000 });
        let obj = v.as_object().unwrap();
        assert_eq!(lookup(obj, OUTSTANDING_AMOUNT), Some(&json!(5000)));
    }

    #[test]
    fn test_lookup_in_sections() {
        let v = json!({ "incomeInfo": { "monthlyIncome": 90000 } });
        let obj = v.as_object().unwrap();
        assert_eq!(lookup(obj, MONTHLY_INCOME), None);
        assert_eq!(lookup_in_sections(obj, MONTHLY_INCOME), Some(&json!(90000)));
    }
}
