//! Two independent allocation models. They answer different questions and
//! are intentionally not merged:
//!
//! * [`allocation_for_age`] sizes a client's overall portfolio from age and
//!   risk tolerance.
//! * [`allocation_for_timeline`] sizes a single goal's portfolio from its
//!   horizon and risk tolerance, and carries the expected return used to
//!   project that goal.

use models::{AssetAllocation, HorizonBucket, RiskTolerance};

pub const MIN_AGE_EQUITY: f64 = 30.0;
pub const CONSERVATIVE_EQUITY_FLOOR: f64 = 20.0;
pub const AGGRESSIVE_EQUITY_CAP: f64 = 90.0;
pub const RISK_ADJUSTMENT: f64 = 20.0;

pub const SHORT_HORIZON_YEARS: i32 = 3;
pub const MEDIUM_HORIZON_YEARS: i32 = 7;

pub fn allocation_for_age(age: u32, risk: RiskTolerance) -> AssetAllocation {
    let base = (100.0 - f64::from(age)).max(MIN_AGE_EQUITY);
    let equity = match risk {
        RiskTolerance::Conservative => (base - RISK_ADJUSTMENT).max(CONSERVATIVE_EQUITY_FLOOR),
        RiskTolerance::Moderate => base,
        RiskTolerance::Aggressive => (base + RISK_ADJUSTMENT).min(AGGRESSIVE_EQUITY_CAP),
    };
    AssetAllocation {
        equity,
        debt: 100.0 - equity,
        expected_return: None,
    }
}

pub fn horizon_bucket(years: i32) -> HorizonBucket {
    if years <= SHORT_HORIZON_YEARS {
        HorizonBucket::Short
    } else if years <= MEDIUM_HORIZON_YEARS {
        HorizonBucket::Medium
    } else {
        HorizonBucket::Long
    }
}

/// Annual return (percent) assumed for a horizon bucket.
pub fn expected_return(horizon: HorizonBucket) -> f64 {
    match horizon {
        HorizonBucket::Short => 8.0,
        HorizonBucket::Medium => 10.0,
        HorizonBucket::Long => 12.0,
    }
}

fn timeline_equity(horizon: HorizonBucket, risk: RiskTolerance) -> f64 {
    use HorizonBucket::*;
    use RiskTolerance::*;
    match (risk, horizon) {
        (Conservative, Short) => 10.0,
        (Conservative, Medium) => 30.0,
        (Conservative, Long) => 50.0,
        (Moderate, Short) => 20.0,
        (Moderate, Medium) => 50.0,
        (Moderate, Long) => 70.0,
        (Aggressive, Short) => 30.0,
        (Aggressive, Medium) => 60.0,
        (Aggressive, Long) => 80.0,
    }
}

pub fn allocation_for_timeline(years: i32, risk: RiskTolerance) -> AssetAllocation {
    let horizon = horizon_bucket(years);
    let equity = timeline_equity(horizon, risk);
    AssetAllocation {
        equity,
        debt: 100.0 - equity,
        expected_return: Some(expected_return(horizon)),
    }
}
