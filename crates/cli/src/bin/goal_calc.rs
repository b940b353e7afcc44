use anyhow::Result;
use clap::{Parser, Subcommand};
use planning_engine::{
    calculate_emi, future_value_lump_sum, future_value_of_sip, goal_timeline_from_sip,
    required_monthly_sip,
};
use serde_json::{Map, Value, json};

#[derive(Parser, Debug)]
#[command(name = "goal-calc", about = "SIP, timeline, future-value and EMI calculator.")]
struct Args {
    /// Print the result as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Monthly SIP needed to reach a target
    Sip {
        #[arg(long)]
        target: f64,
        #[arg(long)]
        years: f64,
        /// Expected annual return, percent
        #[arg(long)]
        rate: f64,
    },
    /// Years needed to reach a target with a given SIP
    Timeline {
        #[arg(long)]
        target: f64,
        #[arg(long)]
        sip: f64,
        #[arg(long)]
        rate: f64,
    },
    /// Future value of a monthly SIP and/or a lump sum
    Fv {
        #[arg(long, default_value_t = 0.0)]
        sip: f64,
        #[arg(long, default_value_t = 0.0)]
        lump_sum: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        years: f64,
    },
    /// EMI of an amortizing loan
    Emi {
        #[arg(long)]
        principal: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        months: f64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init("warn");

    let (label, value) = match args.command {
        Command::Sip { target, years, rate } => {
            ("monthlySIP", required_monthly_sip(target, years, rate))
        }
        Command::Timeline { target, sip, rate } => {
            ("years", goal_timeline_from_sip(target, sip, rate))
        }
        Command::Fv { sip, lump_sum, rate, years } => (
            "futureValue",
            future_value_of_sip(sip, rate, years) + future_value_lump_sum(lump_sum, rate, years),
        ),
        Command::Emi { principal, rate, months } => {
            ("monthlyEMI", calculate_emi(principal, rate, months))
        }
    };
    tracing::debug!(label, value, "calculated");

    if args.json {
        let mut out = Map::new();
        out.insert(label.to_string(), json!((value * 100.0).round() / 100.0));
        println!("{}", Value::Object(out));
    } else {
        println!("{label}: {value:.2}");
    }
    Ok(())
}
