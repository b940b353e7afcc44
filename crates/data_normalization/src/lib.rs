pub mod aliases;
pub mod parse;

use models::*;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::aliases::{lookup, lookup_in_sections};
use crate::parse::{parse_bool, parse_date, parse_number, parse_text, parse_year};

/// Largest amount accepted for any monetary or numeric field. Larger inputs
/// are clamped so that engine sums and products stay finite.
pub const MAX_MONEY: f64 = 1e15;

/// Normalizes a raw client document into a [`ClientFinancialProfile`].
///
/// Never fails: anything missing or unparseable becomes zero (or the field's
/// default). Use [`normalize_profile_with_warnings`] to learn what was replaced.
pub fn normalize_profile(raw: &Value) -> ClientFinancialProfile {
    let mut warnings = Vec::new();
    normalize_profile_with_warnings(raw, &mut warnings)
}

pub fn normalize_profile_with_warnings(
    raw: &Value,
    warnings: &mut Vec<String>,
) -> ClientFinancialProfile {
    let Some(obj) = raw.as_object() else {
        warnings.push("Profile is not a JSON object — using an empty profile".to_string());
        return ClientFinancialProfile::default();
    };

    let monthly_income = money(lookup_in_sections(obj, aliases::MONTHLY_INCOME), "monthlyIncome", warnings);
    let monthly_expenses = money(lookup_in_sections(obj, aliases::MONTHLY_EXPENSES), "monthlyExpenses", warnings);

    let date_of_birth = match lookup_in_sections(obj, aliases::DATE_OF_BIRTH) {
        Some(v) => {
            let parsed = parse_date(v);
            if parsed.is_none() {
                warnings.push(format!("Unparseable dateOfBirth {} — ignored", v));
            }
            parsed
        }
        None => None,
    };

    let risk_tolerance = match lookup_in_sections(obj, aliases::RISK_TOLERANCE) {
        Some(v) => match v.as_str().and_then(RiskTolerance::from_label) {
            Some(risk) => risk,
            None => {
                warnings.push(format!("Unknown riskTolerance {} — assuming Moderate", v));
                RiskTolerance::default()
            }
        },
        None => RiskTolerance::default(),
    };

    let debts = lookup(obj, aliases::DEBTS)
        .map(|v| normalize_debts(v, warnings))
        .unwrap_or_default();

    let assets = lookup(obj, aliases::ASSETS)
        .and_then(Value::as_object)
        .map(|a| normalize_assets(a, warnings))
        .unwrap_or_default();

    tracing::debug!(
        debts = debts.len(),
        warnings = warnings.len(),
        "normalized client profile"
    );

    ClientFinancialProfile {
        monthly_income,
        monthly_expenses,
        date_of_birth,
        risk_tolerance,
        debts,
        assets,
    }
}

/// Accepts either an object keyed by debt type or an array of records that
/// carry their type in a `debtType`/`type` field. Declaration order is kept.
fn normalize_debts(raw: &Value, warnings: &mut Vec<String>) -> Vec<DebtEntry> {
    let keyed: Vec<(String, &Map<String, Value>)> = match raw {
        Value::Object(map) => map
            .iter()
            .filter_map(|(k, v)| {
                let record = v.as_object();
                if record.is_none() {
                    warnings.push(format!("Debt '{}' is not an object — skipped", k));
                }
                record.map(|o| (k.clone(), o))
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .filter_map(|(i, v)| {
                let record = v.as_object();
                if record.is_none() {
                    warnings.push(format!("Debt #{} is not an object — skipped", i + 1));
                }
                let o = record?;
                let kind = lookup(o, aliases::DEBT_KIND).and_then(parse_text);
                if kind.is_none() {
                    warnings.push("Debt record without a type — skipped".to_string());
                }
                kind.map(|k| (k, o))
            })
            .collect(),
        _ => {
            warnings.push("Debts are neither an object nor an array — ignored".to_string());
            return Vec::new();
        }
    };

    let mut entries: Vec<DebtEntry> = Vec::with_capacity(keyed.len());
    for (key, record) in keyed {
        let Some(debt_type) = DebtType::from_key(&key) else {
            warnings.push(format!("Unknown debt type '{}' — skipped", key));
            continue;
        };
        if entries.iter().any(|e| e.debt_type == debt_type) {
            warnings.push(format!("Duplicate debt type '{}' — keeping the first", key));
            continue;
        }
        let record = normalize_debt_record(debt_type, record, warnings);
        entries.push(DebtEntry { debt_type, record });
    }
    entries
}

fn normalize_debt_record(
    debt_type: DebtType,
    obj: &Map<String, Value>,
    warnings: &mut Vec<String>,
) -> DebtRecord {
    let key = debt_type.key();
    let outstanding_amount = money(lookup(obj, aliases::OUTSTANDING_AMOUNT), &format!("{key}.outstandingAmount"), warnings);
    let has_loan = match lookup(obj, aliases::HAS_LOAN).and_then(parse_bool) {
        Some(flag) => flag,
        None => {
            if outstanding_amount > 0.0 {
                warnings.push(format!(
                    "{} has an outstanding amount but no hasLoan flag — treated as inactive",
                    key
                ));
            }
            false
        }
    };

    DebtRecord {
        has_loan,
        outstanding_amount,
        monthly_emi: money(lookup(obj, aliases::MONTHLY_EMI), &format!("{key}.monthlyEMI"), warnings),
        interest_rate: money(lookup(obj, aliases::INTEREST_RATE), &format!("{key}.interestRate"), warnings),
        remaining_tenure_months: money(lookup(obj, aliases::REMAINING_TENURE), &format!("{key}.remainingTenureMonths"), warnings),
    }
}

fn normalize_assets(obj: &Map<String, Value>, warnings: &mut Vec<String>) -> Assets {
    let cash_bank_savings = money(lookup(obj, aliases::CASH_BANK_SAVINGS), "assets.cashBankSavings", warnings);

    let mut investments: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    if let Some(categories) = lookup(obj, aliases::INVESTMENTS).and_then(Value::as_object) {
        for (category, holdings) in categories {
            let instruments = investments.entry(category.clone()).or_default();
            match holdings {
                Value::Object(items) => {
                    for (instrument, value) in items {
                        let label = format!("assets.investments.{category}.{instrument}");
                        *instruments.entry(instrument.clone()).or_insert(0.0) += money(Some(value), &label, warnings);
                    }
                }
                // A bare number is the category total.
                other => {
                    let label = format!("assets.investments.{category}");
                    *instruments.entry("total".to_string()).or_insert(0.0) += money(Some(other), &label, warnings);
                }
            }
        }
    }

    Assets {
        cash_bank_savings,
        investments,
    }
}

/// Normalizes a goals document: either a bare array or an object holding a
/// `goals` array. Goals without an id get a positional one (`goal-1`, ...).
pub fn normalize_goals(raw: &Value, warnings: &mut Vec<String>) -> Vec<Goal> {
    let items = match raw {
        Value::Array(items) => items.as_slice(),
        Value::Object(obj) => match lookup(obj, aliases::GOALS).and_then(Value::as_array) {
            Some(items) => items.as_slice(),
            None => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| {
            let Some(obj) = item.as_object() else {
                warnings.push(format!("Goal #{} is not an object — skipped", idx + 1));
                return None;
            };
            Some(normalize_goal(idx, obj, warnings))
        })
        .collect()
}

fn normalize_goal(idx: usize, obj: &Map<String, Value>, warnings: &mut Vec<String>) -> Goal {
    let id = lookup(obj, aliases::GOAL_ID)
        .and_then(parse_text)
        .unwrap_or_else(|| format!("goal-{}", idx + 1));
    let title = lookup(obj, aliases::GOAL_TITLE)
        .and_then(parse_text)
        .unwrap_or_else(|| id.clone());

    let target_year = lookup(obj, aliases::GOAL_TARGET_YEAR)
        .or_else(|| lookup(obj, aliases::GOAL_TARGET_DATE))
        .and_then(parse_year);
    if target_year.is_none() {
        warnings.push(format!("Goal '{}' has no usable target year", id));
    }

    let priority = match lookup(obj, aliases::GOAL_PRIORITY) {
        Some(v) => match v.as_str().and_then(GoalPriority::from_label) {
            Some(p) => p,
            None => {
                warnings.push(format!("Goal '{}' has unknown priority {} — assuming Medium", id, v));
                GoalPriority::default()
            }
        },
        None => GoalPriority::default(),
    };

    Goal {
        target_amount: money(lookup(obj, aliases::GOAL_TARGET_AMOUNT), &format!("{id}.targetAmount"), warnings),
        current_savings: money(lookup(obj, aliases::GOAL_CURRENT_SAVINGS), &format!("{id}.currentSavings"), warnings),
        inflation_rate: money(lookup(obj, aliases::GOAL_INFLATION), &format!("{id}.inflationRate"), warnings),
        target_year: target_year.unwrap_or(0),
        priority,
        title,
        id,
    }
}

/// Resolves a monetary field. Absent → 0 silently; present but unparseable
/// or negative → 0 with a warning.
fn money(value: Option<&Value>, field: &str, warnings: &mut Vec<String>) -> f64 {
    let Some(value) = value else {
        return 0.0;
    };
    match parse_number(value) {
        Some(n) if n > MAX_MONEY => {
            warnings.push(format!("Value {} for '{}' exceeds {} — capped", n, field, MAX_MONEY));
            MAX_MONEY
        }
        Some(n) if n >= 0.0 => n,
        Some(n) => {
            warnings.push(format!("Negative value {} for '{}' — using 0", n, field));
            0.0
        }
        None => {
            warnings.push(format!("Unparseable value {} for '{}' — using 0", value, field));
            0.0
        }
    }
}
