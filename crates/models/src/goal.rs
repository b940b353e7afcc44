use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GoalPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl GoalPriority {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" | "critical" => Some(GoalPriority::High),
            "medium" | "moderate" | "normal" => Some(GoalPriority::Medium),
            "low" => Some(GoalPriority::Low),
            _ => None,
        }
    }

    /// Weight used when ranking goals against each other.
    pub fn weight(&self) -> u32 {
        match self {
            GoalPriority::High => 3,
            GoalPriority::Medium => 2,
            GoalPriority::Low => 1,
        }
    }
}

/// A savings target the client wants to reach by `target_year`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub target_amount: f64,
    pub target_year: i32,
    pub priority: GoalPriority,
    /// Amount already set aside for this goal today.
    pub current_savings: f64,
    /// Annual inflation (percent) applied to `target_amount`; 0 keeps it nominal.
    pub inflation_rate: f64,
}

impl Goal {
    pub fn time_in_years(&self, current_year: i32) -> i32 {
        self.target_year - current_year
    }
}
