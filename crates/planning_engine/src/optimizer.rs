use std::cmp::Reverse;
use std::collections::BTreeMap;

use models::{
    ConflictSeverity, FundingAllocation, Goal, GoalPhase, GoalPriority, GoalProjection,
    OptimizationResult, PlanningPolicy, PrioritizedGoal, TimelineConflict,
};
use tracing::{debug, info};

/// Goals due within this many years get double weight.
pub const NEAR_TERM_YEARS: i32 = 5;

pub fn detect_timeline_conflicts(goals: &[Goal]) -> Vec<TimelineConflict> {
    detect_timeline_conflicts_with_policy(goals, &PlanningPolicy::default())
}

/// Flags every target year where two or more goals together exceed the
/// conflict threshold. Goals without a usable target year are ignored.
pub fn detect_timeline_conflicts_with_policy(
    goals: &[Goal],
    policy: &PlanningPolicy,
) -> Vec<TimelineConflict> {
    let mut by_year: BTreeMap<i32, Vec<&Goal>> = BTreeMap::new();
    for goal in goals.iter().filter(|g| g.target_year > 0) {
        by_year.entry(goal.target_year).or_default().push(goal);
    }

    by_year
        .into_iter()
        .filter(|(_, year_goals)| year_goals.len() >= 2)
        .filter_map(|(year, year_goals)| {
            let total_amount: f64 = year_goals.iter().map(|g| g.target_amount).sum();
            if total_amount <= policy.conflict_threshold {
                return None;
            }
            let severity = if total_amount > policy.high_severity_threshold {
                ConflictSeverity::High
            } else {
                ConflictSeverity::Medium
            };
            Some(TimelineConflict {
                year,
                goal_ids: year_goals.iter().map(|g| g.id.clone()).collect(),
                total_amount,
                severity,
            })
        })
        .collect()
}

pub fn priority_score(priority: GoalPriority, time_in_years: i32) -> u32 {
    let timeline_weight = if time_in_years < NEAR_TERM_YEARS { 2 } else { 1 };
    priority.weight() * timeline_weight
}

/// Orders projections by priority score, highest first. Equal scores keep
/// their input order.
pub fn prioritize_goals(projections: &[GoalProjection]) -> Vec<PrioritizedGoal> {
    let mut ranked: Vec<PrioritizedGoal> = projections
        .iter()
        .map(|p| PrioritizedGoal {
            goal_id: p.goal.id.clone(),
            title: p.goal.title.clone(),
            priority: p.goal.priority,
            time_in_years: p.time_in_years,
            priority_score: priority_score(p.goal.priority, p.time_in_years),
            monthly_sip: p.monthly_sip,
        })
        .collect();
    ranked.sort_by_key(|g| Reverse(g.priority_score));
    ranked
}

fn phase_index(time_in_years: i32, phase_length: i32) -> u32 {
    if time_in_years <= 0 {
        return 1;
    }
    (time_in_years as u32).div_ceil(phase_length as u32)
}

/// Groups prioritized goals into consecutive phases of `phase_length` years.
/// Only phases that contain goals are returned, earliest first; within a
/// phase goals keep their priority order.
pub fn phase_goals(prioritized: &[PrioritizedGoal], phase_length: i32) -> Vec<GoalPhase> {
    let phase_length = phase_length.max(1);
    let mut phases: BTreeMap<u32, Vec<PrioritizedGoal>> = BTreeMap::new();
    for goal in prioritized {
        phases
            .entry(phase_index(goal.time_in_years, phase_length))
            .or_default()
            .push(goal.clone());
    }

    phases
        .into_iter()
        .map(|(phase, goals)| {
            let to_years = i32::try_from(phase)
                .unwrap_or(i32::MAX)
                .saturating_mul(phase_length);
            let from_years = to_years.saturating_sub(phase_length);
            GoalPhase {
                phase,
                label: format!("Years {}-{}", from_years + 1, to_years),
                from_years,
                to_years,
                total_monthly_sip: goals.iter().map(|g| g.monthly_sip).sum(),
                goals,
            }
        })
        .collect()
}

/// Funds goals in priority order until the surplus runs out.
pub fn allocate_surplus(prioritized: &[PrioritizedGoal], surplus: f64) -> Vec<FundingAllocation> {
    let mut remaining = surplus.max(0.0);
    prioritized
        .iter()
        .map(|g| {
            let required = g.monthly_sip.max(0.0);
            let allocated = required.min(remaining);
            remaining -= allocated;
            FundingAllocation {
                goal_id: g.goal_id.clone(),
                required,
                allocated,
                shortfall: required - allocated,
            }
        })
        .collect()
}

pub fn optimize_multiple_goals(
    projections: &[GoalProjection],
    monthly_surplus: f64,
    policy: &PlanningPolicy,
) -> OptimizationResult {
    // NaN or infinite surplus plans as if nothing were available
    let monthly_surplus = if monthly_surplus.is_finite() { monthly_surplus } else { 0.0 };
    let total_required: f64 = projections.iter().map(|p| p.monthly_sip).sum();
    let deficit = (total_required - monthly_surplus).max(0.0);
    let surplus_utilization = if monthly_surplus > 0.0 {
        total_required / monthly_surplus * 100.0
    } else {
        0.0
    };

    let prioritized_goals = prioritize_goals(projections);
    let phases = phase_goals(&prioritized_goals, policy.phase_length_years);
    let funding = allocate_surplus(&prioritized_goals, monthly_surplus);

    if deficit > 0.0 {
        info!(total_required, monthly_surplus, deficit, "Goals exceed available surplus");
    } else {
        debug!(total_required, monthly_surplus, "All goals affordable");
    }

    OptimizationResult {
        total_required,
        available_surplus: monthly_surplus,
        deficit,
        can_afford_all: deficit == 0.0,
        surplus_utilization,
        prioritized_goals,
        phases,
        funding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::project_goals;
    use models::RiskTolerance;

    fn goal(id: &str, amount: f64, year: i32, priority: GoalPriority) -> Goal {
        Goal {
            id: id.to_string(),
            title: id.to_uppercase(),
            target_amount: amount,
            target_year: year,
            priority,
            ..Default::default()
        }
    }

    fn prioritized(id: &str, t: i32, sip: f64) -> PrioritizedGoal {
        PrioritizedGoal {
            goal_id: id.to_string(),
            title: id.to_string(),
            priority: GoalPriority::Medium,
            time_in_years: t,
            priority_score: priority_score(GoalPriority::Medium, t),
            monthly_sip: sip,
        }
    }

    #[test]
    fn test_scenario_e_high_severity_conflict() {
        let goals = vec![
            goal("house", 3_000_000.0, 2030, GoalPriority::High),
            goal("wedding", 2_500_000.0, 2030, GoalPriority::Medium),
        ];
        let conflicts = detect_timeline_conflicts(&goals);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].year, 2030);
        assert_eq!(conflicts[0].total_amount, 5_500_000.0);
        assert_eq!(conflicts[0].severity, ConflictSeverity::High);
        assert_eq!(conflicts[0].goal_ids, vec!["house", "wedding"]);
    }

    #[test]
    fn test_medium_conflict_and_thresholds() {
        let goals = vec![
            goal("a", 1_500_000.0, 2031, GoalPriority::Low),
            goal("b", 1_000_000.0, 2031, GoalPriority::Low),
            // exactly at the threshold is not a conflict
            goal("c", 1_000_000.0, 2032, GoalPriority::Low),
            goal("d", 1_000_000.0, 2032, GoalPriority::Low),
        ];
        let conflicts = detect_timeline_conflicts(&goals);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].year, 2031);
        assert_eq!(conflicts[0].severity, ConflictSeverity::Medium);
    }

    #[test]
    fn test_single_large_goal_is_not_a_conflict() {
        let goals = vec![
            goal("big", 9_000_000.0, 2035, GoalPriority::High),
            goal("undated", 9_000_000.0, 0, GoalPriority::High),
            goal("undated2", 9_000_000.0, 0, GoalPriority::High),
        ];
        assert!(detect_timeline_conflicts(&goals).is_empty());
    }

    #[test]
    fn test_priority_score() {
        assert_eq!(priority_score(GoalPriority::High, 2), 6);
        assert_eq!(priority_score(GoalPriority::High, 5), 3);
        assert_eq!(priority_score(GoalPriority::Medium, 4), 4);
        assert_eq!(priority_score(GoalPriority::Low, 10), 1);
    }

    #[test]
    fn test_prioritize_is_stable() {
        let goals = vec![
            goal("retire", 10_000_000.0, 2050, GoalPriority::High),
            goal("car", 800_000.0, 2028, GoalPriority::Medium),
            goal("trip", 300_000.0, 2027, GoalPriority::Medium),
            goal("school", 1_500_000.0, 2029, GoalPriority::High),
        ];
        let projections = project_goals(&goals, RiskTolerance::Moderate, 2026, &PlanningPolicy::default());
        let ranked = prioritize_goals(&projections);
        let ids: Vec<&str> = ranked.iter().map(|g| g.goal_id.as_str()).collect();
        // school 6, car 4, trip 4, retire 3
        assert_eq!(ids, vec!["school", "car", "trip", "retire"]);
    }

    #[test]
    fn test_phase_goals() {
        let goals = vec![
            prioritized("now", 0, 100.0),
            prioritized("y3", 3, 200.0),
            prioritized("y4", 4, 300.0),
            prioritized("y10", 10, 400.0),
        ];
        let phases = phase_goals(&goals, 3);
        assert_eq!(phases.len(), 3);
        assert_eq!(phases[0].phase, 1);
        assert_eq!(phases[0].label, "Years 1-3");
        assert_eq!(phases[0].goals.len(), 2);
        assert_eq!(phases[0].total_monthly_sip, 300.0);
        assert_eq!(phases[1].phase, 2);
        assert_eq!((phases[1].from_years, phases[1].to_years), (3, 6));
        assert_eq!(phases[2].phase, 4);
        assert_eq!(phases[2].label, "Years 10-12");
    }

    #[test]
    fn test_phase_goals_with_extreme_phase_length() {
        let goals = vec![prioritized("far", i32::MAX, 1.0)];
        let phases = phase_goals(&goals, i32::MAX);
        assert_eq!(phases.len(), 1);
        assert_eq!(phases[0].phase, 1);
        assert_eq!(phases[0].to_years, i32::MAX);
    }

    #[test]
    fn test_allocate_surplus_in_priority_order() {
        let goals = vec![prioritized("a", 1, 6_000.0), prioritized("b", 2, 5_000.0)];
        let funding = allocate_surplus(&goals, 8_000.0);
        assert_eq!(funding[0].allocated, 6_000.0);
        assert_eq!(funding[0].shortfall, 0.0);
        assert_eq!(funding[1].allocated, 2_000.0);
        assert_eq!(funding[1].shortfall, 3_000.0);

        let none = allocate_surplus(&goals, -1_000.0);
        assert!(none.iter().all(|f| f.allocated == 0.0));
    }

    #[test]
    fn test_optimize_feasibility() {
        let goals = vec![
            goal("house", 1_000_000.0, 2036, GoalPriority::High),
            goal("car", 500_000.0, 2029, GoalPriority::Medium),
        ];
        let projections = project_goals(&goals, RiskTolerance::Moderate, 2026, &PlanningPolicy::default());
        let required: f64 = projections.iter().map(|p| p.monthly_sip).sum();

        let rich = optimize_multiple_goals(&projections, 100_000.0, &PlanningPolicy::default());
        assert!(rich.can_afford_all);
        assert_eq!(rich.deficit, 0.0);
        assert!((rich.total_required - required).abs() < 1e-9);
        assert!((rich.surplus_utilization - required / 1_000.0).abs() < 1e-9);

        let tight = optimize_multiple_goals(&projections, 5_000.0, &PlanningPolicy::default());
        assert!(!tight.can_afford_all);
        assert!((tight.deficit - (required - 5_000.0)).abs() < 1e-9);
        assert_eq!(tight.prioritized_goals[0].goal_id, "car");

        let broke = optimize_multiple_goals(&projections, -2_000.0, &PlanningPolicy::default());
        assert_eq!(broke.surplus_utilization, 0.0);
        assert!((broke.deficit - (required + 2_000.0)).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_surplus_is_treated_as_zero() {
        let goals = vec![goal("house", 1_000_000.0, 2036, GoalPriority::High)];
        let projections = project_goals(&goals, RiskTolerance::Moderate, 2026, &PlanningPolicy::default());
        let required = projections[0].monthly_sip;
        assert!(required > 0.0);

        for surplus in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = optimize_multiple_goals(&projections, surplus, &PlanningPolicy::default());
            assert!(!result.can_afford_all, "surplus {surplus}");
            assert_eq!(result.available_surplus, 0.0);
            assert!((result.deficit - required).abs() < 1e-9);
            assert_eq!(result.surplus_utilization, 0.0);
            assert_eq!(result.funding[0].allocated, 0.0);
            assert!((result.funding[0].shortfall - required).abs() < 1e-9);
        }
    }

    #[test]
    fn test_optimize_without_goals() {
        let result = optimize_multiple_goals(&[], 10_000.0, &PlanningPolicy::default());
        assert!(result.can_afford_all);
        assert_eq!(result.total_required, 0.0);
        assert!(result.phases.is_empty());
    }
}
