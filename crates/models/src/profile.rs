use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Client's declared appetite for market risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    /// Parses a risk label case-insensitively. Accepts the canonical names
    /// plus the low/medium/high vocabulary used by older forms.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "conservative" | "low" => Some(RiskTolerance::Conservative),
            "moderate" | "medium" | "balanced" => Some(RiskTolerance::Moderate),
            "aggressive" | "high" => Some(RiskTolerance::Aggressive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTolerance::Conservative => "Conservative",
            RiskTolerance::Moderate => "Moderate",
            RiskTolerance::Aggressive => "Aggressive",
        }
    }
}

/// The fixed set of loan categories a profile can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DebtType {
    HomeLoan,
    PersonalLoan,
    CarLoan,
    EducationLoan,
    CreditCards,
    BusinessLoan,
    GoldLoan,
    OtherLoans,
}

impl DebtType {
    pub const ALL: [DebtType; 8] = [
        DebtType::HomeLoan,
        DebtType::PersonalLoan,
        DebtType::CarLoan,
        DebtType::EducationLoan,
        DebtType::CreditCards,
        DebtType::BusinessLoan,
        DebtType::GoldLoan,
        DebtType::OtherLoans,
    ];

    /// Canonical camelCase key as it appears in client documents.
    pub fn key(&self) -> &'static str {
        match self {
            DebtType::HomeLoan => "homeLoan",
            DebtType::PersonalLoan => "personalLoan",
            DebtType::CarLoan => "carLoan",
            DebtType::EducationLoan => "educationLoan",
            DebtType::CreditCards => "creditCards",
            DebtType::BusinessLoan => "businessLoan",
            DebtType::GoldLoan => "goldLoan",
            DebtType::OtherLoans => "otherLoans",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DebtType::HomeLoan => "Home Loan",
            DebtType::PersonalLoan => "Personal Loan",
            DebtType::CarLoan => "Car Loan",
            DebtType::EducationLoan => "Education Loan",
            DebtType::CreditCards => "Credit Cards",
            DebtType::BusinessLoan => "Business Loan",
            DebtType::GoldLoan => "Gold Loan",
            DebtType::OtherLoans => "Other Loans",
        }
    }

    /// Resolves a document key to a debt type. Matching ignores case and
    /// the separators `_`, `-` and space, so `home_loan`, `Home Loan` and
    /// `homeLoan` all resolve to `HomeLoan`.
    pub fn from_key(key: &str) -> Option<Self> {
        let folded: String = key
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match folded.as_str() {
            "homeloan" | "housingloan" | "mortgage" => Some(DebtType::HomeLoan),
            "personalloan" => Some(DebtType::PersonalLoan),
            "carloan" | "vehicleloan" | "autoloan" => Some(DebtType::CarLoan),
            "educationloan" | "studentloan" => Some(DebtType::EducationLoan),
            "creditcards" | "creditcard" | "creditcarddebt" => Some(DebtType::CreditCards),
            "businessloan" => Some(DebtType::BusinessLoan),
            "goldloan" => Some(DebtType::GoldLoan),
            "otherloans" | "otherloan" | "others" => Some(DebtType::OtherLoans),
            _ => None,
        }
    }
}

/// One declared loan. Supplied fully formed by the caller and never mutated
/// by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DebtRecord {
    pub has_loan: bool,
    pub outstanding_amount: f64,
    #[serde(rename = "monthlyEMI")]
    pub monthly_emi: f64,
    pub interest_rate: f64,
    pub remaining_tenure_months: f64,
}

impl DebtRecord {
    /// A debt counts toward prioritization only when flagged and still owed.
    pub fn is_outstanding(&self) -> bool {
        self.has_loan && self.outstanding_amount > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtEntry {
    pub debt_type: DebtType,
    #[serde(flatten)]
    pub record: DebtRecord,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Assets {
    pub cash_bank_savings: f64,
    /// category -> instrument -> value
    pub investments: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Normalized client input. Every monetary field is finite and non-negative.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientFinancialProfile {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub date_of_birth: Option<NaiveDate>,
    pub risk_tolerance: RiskTolerance,
    /// Debts in the order they were declared. Each `DebtType` appears at most once.
    pub debts: Vec<DebtEntry>,
    pub assets: Assets,
}

impl ClientFinancialProfile {
    pub fn debt(&self, debt_type: DebtType) -> Option<&DebtRecord> {
        self.debts
            .iter()
            .find(|d| d.debt_type == debt_type)
            .map(|d| &d.record)
    }

    /// Debts flagged with `hasLoan`, in declaration order.
    pub fn active_debts(&self) -> impl Iterator<Item = &DebtEntry> {
        self.debts.iter().filter(|d| d.record.has_loan)
    }
}
