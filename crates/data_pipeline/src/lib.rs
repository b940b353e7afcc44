pub mod cache;
pub mod recommendations;
pub mod report;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate, Utc};
use serde_json::Value;
use tracing::{info, warn};

use data_normalization::{normalize_goals, normalize_profile_with_warnings};
use models::Settings;
use planning_engine::{
    analyze_profile, detect_timeline_conflicts_with_policy, fill_missing_emis,
    optimize_multiple_goals, project_goals,
};

use crate::cache::InMemoryCache;
use crate::recommendations::{CachedRecommender, FileRecommendationProvider};
pub use crate::report::{AdvisoryReport, ReportMetadata};

pub struct Config {
    pub profile_file: PathBuf,
    /// Separate goals document; when absent, goals are read from the profile's `goals` array.
    pub goals_file: Option<PathBuf>,
    pub output_file: PathBuf,
    pub settings_file: Option<PathBuf>,
    pub recommendations_file: Option<PathBuf>,
    /// Reference date for ages and goal horizons; today when absent.
    pub as_of: Option<NaiveDate>,
    /// Replaces the surplus computed from the profile.
    pub monthly_surplus: Option<f64>,
    pub pretty: bool,
}

/// Loads the inputs, runs the engine and writes the rounded report.
pub fn run(cfg: Config) -> Result<AdvisoryReport> {
    let settings = settings_loader::load_optional_settings(cfg.settings_file.as_ref())?;

    let raw_profile = read_json(&cfg.profile_file)?;
    let raw_goals = match &cfg.goals_file {
        Some(path) => read_json(path)?,
        None => raw_profile.clone(),
    };

    let provider = cfg
        .recommendations_file
        .as_ref()
        .map(FileRecommendationProvider::load)
        .transpose()?;
    let cache = InMemoryCache::with_ttl_secs(settings.cache_ttl_secs);
    let recommender = provider
        .as_ref()
        .map(|p| CachedRecommender::new(p, &cache));

    let as_of = cfg.as_of.unwrap_or_else(|| Local::now().date_naive());
    let report = build_report(
        &raw_profile,
        &raw_goals,
        &settings,
        as_of,
        cfg.monthly_surplus,
        recommender.as_ref(),
    )
    .rounded();

    write_report(&cfg.output_file, &report, cfg.pretty)?;
    info!(
        output = %cfg.output_file.display(),
        goals = report.goals.len(),
        health = report.analysis.health.score,
        "Wrote advisory report"
    );
    Ok(report)
}

/// Runs normalization and every engine component over already-parsed
/// documents. The result is not rounded.
pub fn build_report(
    raw_profile: &Value,
    raw_goals: &Value,
    settings: &Settings,
    as_of: NaiveDate,
    monthly_surplus: Option<f64>,
    recommender: Option<&CachedRecommender<'_>>,
) -> AdvisoryReport {
    let policy = &settings.policy;
    let mut warnings = Vec::new();

    let mut profile = normalize_profile_with_warnings(raw_profile, &mut warnings);
    if settings.estimate_missing_emi {
        profile = fill_missing_emis(&profile, policy);
    }
    let goals = normalize_goals(raw_goals, &mut warnings);

    let analysis = analyze_profile(&profile, as_of, policy);
    let projections = project_goals(&goals, profile.risk_tolerance, as_of.year(), policy);
    let conflicts = detect_timeline_conflicts_with_policy(&goals, policy);
    let surplus = monthly_surplus.unwrap_or(analysis.metrics.monthly_surplus);
    let optimization = optimize_multiple_goals(&projections, surplus, policy);

    let mut recommendations = BTreeMap::new();
    if let Some(recommender) = recommender {
        for projection in &projections {
            match recommender.recommend(&profile, projection) {
                Ok(Some(value)) => {
                    recommendations.insert(projection.goal.id.clone(), value);
                }
                Ok(None) => {}
                Err(e) => warnings.push(format!("{e:#}")),
            }
        }
    }

    for w in &warnings {
        warn!("{}", w);
    }

    AdvisoryReport {
        metadata: ReportMetadata {
            generated_at: Utc::now().to_rfc3339(),
            as_of: as_of.format("%Y-%m-%d").to_string(),
            settings_version: settings.settings_version,
            policy: *policy,
            estimated_emis: settings.estimate_missing_emi,
            monthly_surplus_override: monthly_surplus,
        },
        analysis,
        goals: projections,
        conflicts,
        optimization,
        recommendations,
        warnings,
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Parsing JSON in {}", path.display()))
}

/// Writes the report as JSON, creating parent directories as needed.
pub fn write_report(path: &Path, report: &AdvisoryReport, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Creating output dir: {}", parent.display()))?;
    }

    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };

    fs::write(path, json).with_context(|| format!("Writing output file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{ConflictSeverity, DebtType};
    use serde_json::json;
    use tempfile::tempdir;

    fn sample_profile() -> Value {
        json!({
            "personalInfo": {
                "dateOfBirth": "1990-04-12",
                "riskProfile": "aggressive"
            },
            "cashFlow": {
                "monthlyIncome": "₹1,00,000",
                "monthlyExpenses": 60000
            },
            "debts": {
                "homeLoan": { "hasLoan": true, "outstandingAmount": 2000000, "monthlyEMI": 8000, "interestRate": 8 },
                "creditCards": { "hasDebt": true, "totalOutstanding": "50,000", "monthlyPayment": 2000, "interestRate": 24 }
            },
            "assets": {
                "cashBankSavings": 420000,
                "investments": { "equity": { "mutualFunds": 300000 } }
            },
            "goals": [
                { "id": "house", "title": "House", "targetAmount": 3000000, "targetYear": 2030, "priority": "High" },
                { "id": "wedding", "title": "Wedding", "targetAmount": 2500000, "targetYear": 2030, "priority": "Medium" },
                { "id": "retire", "title": "Retirement", "targetAmount": "abc", "targetYear": 2055, "priority": "Low" }
            ]
        })
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_build_report_end_to_end() {
        let raw = sample_profile();
        let report = build_report(&raw, &raw, &Settings::default(), as_of(), None, None);

        assert_eq!(report.analysis.age, Some(36));
        assert_eq!(report.analysis.metrics.total_emis, 10_000.0);
        assert_eq!(report.analysis.metrics.monthly_surplus, 30_000.0);
        assert_eq!(report.analysis.prioritized_debts[0].debt_type, DebtType::CreditCards);
        assert_eq!(report.goals.len(), 3);
        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(report.conflicts[0].severity, ConflictSeverity::High);
        assert_eq!(report.optimization.available_surplus, 30_000.0);
        assert!(report.warnings.iter().any(|w| w.contains("retire.targetAmount")));
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_surplus_override_and_emi_estimation() {
        let raw = json!({
            "monthlyIncome": 80000,
            "monthlyExpenses": 30000,
            "debts": { "carLoan": { "hasLoan": true, "outstandingAmount": 500000 } }
        });
        let settings = Settings { estimate_missing_emi: true, ..Default::default() };
        let report = build_report(&raw, &json!([]), &settings, as_of(), Some(12_000.0), None);

        assert!(report.analysis.metrics.total_emis > 10_000.0);
        assert_eq!(report.optimization.available_surplus, 12_000.0);
        assert_eq!(report.metadata.monthly_surplus_override, Some(12_000.0));
        assert!(report.metadata.estimated_emis);
    }

    #[test]
    fn test_extreme_amounts_keep_report_finite() {
        let raw = json!({
            "monthlyIncome": f64::MAX,
            "monthlyExpenses": f64::MAX,
            "debts": {
                "homeLoan": { "hasLoan": true, "outstandingAmount": f64::MAX, "monthlyEMI": f64::MAX, "interestRate": 8 },
                "carLoan": { "hasLoan": true, "outstandingAmount": f64::MAX, "monthlyEMI": f64::MAX, "interestRate": 9 }
            },
            "assets": { "cashBankSavings": f64::MAX }
        });
        let report = build_report(&raw, &json!([]), &Settings::default(), as_of(), None, None);
        let m = &report.analysis.metrics;

        assert!(m.total_emis.is_finite());
        assert!(m.monthly_surplus.is_finite());
        assert!(report.analysis.debt_summary.total_outstanding.is_finite());
        assert!(report.analysis.assets.net_worth.is_finite());
        assert!(report.optimization.available_surplus.is_finite());
        assert!(serde_json::to_string(&report.rounded()).is_ok());
    }

    #[test]
    fn test_run_writes_rounded_report_with_recommendations() {
        let dir = tempdir().unwrap();
        let profile_path = dir.path().join("profile.json");
        let recs_path = dir.path().join("recommendations.json");
        let out_path = dir.path().join("out").join("report.json");
        fs::write(&profile_path, sample_profile().to_string()).unwrap();
        fs::write(&recs_path, json!({ "house": { "summary": "Prefer balanced funds" } }).to_string()).unwrap();

        let report = run(Config {
            profile_file: profile_path,
            goals_file: None,
            output_file: out_path.clone(),
            settings_file: None,
            recommendations_file: Some(recs_path),
            as_of: Some(as_of()),
            monthly_surplus: None,
            pretty: true,
        })
        .unwrap();

        assert_eq!(report.recommendations["house"]["summary"], "Prefer balanced funds");

        let written: Value = serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(written["metadata"]["asOf"], "2026-10-19");
        assert_eq!(written["analysis"]["metrics"]["monthlySurplus"], 30000.0);
        let sip = written["goals"][0]["monthlySIP"].as_f64().unwrap();
        assert_eq!((sip * 100.0).round() / 100.0, sip);
    }

    #[test]
    fn test_run_reports_missing_profile() {
        let dir = tempdir().unwrap();
        let err = run(Config {
            profile_file: dir.path().join("missing.json"),
            goals_file: None,
            output_file: dir.path().join("report.json"),
            settings_file: None,
            recommendations_file: None,
            as_of: None,
            monthly_surplus: None,
            pretty: false,
        })
        .unwrap_err();
        assert!(err.to_string().starts_with("Reading"));
    }
}
