use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use data_pipeline::{AdvisoryReport, Config};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "advise", about = "Analyze a client profile and goals, and write an advisory report.")]
struct Args {
    /// Client profile JSON (may also carry a `goals` array)
    #[arg(short, long)]
    profile: PathBuf,

    /// Separate goals JSON; defaults to the profile's own `goals`
    #[arg(short, long)]
    goals: Option<PathBuf>,

    /// Output report path
    #[arg(short, long, default_value = "report.json")]
    output: PathBuf,

    /// Optional settings.json with policy overrides
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Optional JSON object of external recommendations keyed by goal id
    #[arg(long)]
    recommendations: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    as_of: Option<String>,

    /// Monthly surplus to plan with instead of the computed one
    #[arg(long, value_parser = parse_surplus)]
    surplus: Option<f64>,

    /// Pretty-print the JSON report
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Debug-level logging for the planning crates
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn parse_surplus(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("surplus must be a finite number, got {s}"))
    }
}

fn print_summary(report: &AdvisoryReport) {
    let a = &report.analysis;
    println!("Health score     : {}/100", a.health.score);
    println!("Monthly surplus  : {:.2}", a.metrics.monthly_surplus);
    println!(
        "Emergency fund   : {:.2} of {:.2} ({:.1} months covered)",
        a.emergency_fund.current_amount, a.emergency_fund.target_amount, a.emergency_fund.months_of_coverage
    );
    if let Some(top) = a.prioritized_debts.first() {
        println!("Repay first      : {} at {:.2}%", top.name, top.interest_rate);
    }
    let opt = &report.optimization;
    println!(
        "Goals            : {} (required SIP {:.2}, deficit {:.2})",
        report.goals.len(),
        opt.total_required,
        opt.deficit
    );
    for c in &report.conflicts {
        println!("Conflict {}    : {:?} {:.2} across {}", c.year, c.severity, c.total_amount, c.goal_ids.join(", "));
    }
    if !report.warnings.is_empty() {
        println!("Warnings         : {}", report.warnings.len());
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(&logger::default_directive(args.verbose));

    let as_of = args
        .as_of
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("parsing --as-of (expected YYYY-MM-DD)")?;

    let output = args.output.clone();
    let report = data_pipeline::run(Config {
        profile_file: args.profile,
        goals_file: args.goals,
        output_file: args.output,
        settings_file: args.settings,
        recommendations_file: args.recommendations,
        as_of,
        monthly_surplus: args.surplus,
        pretty: args.pretty,
    })
    .context("generating advisory report")?;

    print_summary(&report);
    println!("Report written to {}", output.display());
    Ok(())
}
