use chrono::NaiveDate;

use super::model::{Derived, EmployeeRecord, Level, RemoteWorkCategory};

// ---------------------------------------------------------------------------
// Derivation stage: classification rules applied per record
// ---------------------------------------------------------------------------

/// Average Gregorian year length, matching the source's tenure formula.
const DAYS_PER_YEAR: f64 = 365.25;

/// Classify a 1–5 score: below 3 is Low, exactly 3 is Medium, above High.
///
/// Ordered comparisons make the function total: `NaN` fails both tests
/// and lands in the final branch.
pub fn score_level(score: f64) -> Level {
    if score < 3.0 {
        Level::Low
    } else if score == 3.0 {
        Level::Medium
    } else {
        Level::High
    }
}

/// Classify a retention-risk index: below 0.8 Low, [0.8, 1.5) Medium,
/// 1.5 and above High.
pub fn retention_level(index: f64) -> Level {
    if index < 0.8 {
        Level::Low
    } else if index < 1.5 {
        Level::Medium
    } else {
        Level::High
    }
}

/// Map a remote-work frequency (0–100) to a category:
/// exactly 0 is office-based, exactly 100 fully remote, anything else hybrid.
pub fn remote_category(frequency: f64) -> RemoteWorkCategory {
    if frequency == 0.0 {
        RemoteWorkCategory::Office
    } else if frequency == 100.0 {
        RemoteWorkCategory::Home
    } else {
        RemoteWorkCategory::Hybrid
    }
}

/// Fractional years between `hire_date` and `today`; `NaN` when the hire
/// date is unknown.
pub fn years_at_company(hire_date: Option<NaiveDate>, today: NaiveDate) -> f64 {
    match hire_date {
        Some(d) => (today - d).num_days() as f64 / DAYS_PER_YEAR,
        None => f64::NAN,
    }
}

/// Compute the derived attributes for one record.
pub fn derive_record(rec: &EmployeeRecord, today: NaiveDate) -> Derived {
    Derived {
        years_at_company: years_at_company(rec.hire_date, today),
        performance_level: score_level(rec.performance_score),
        satisfaction_level: score_level(rec.satisfaction_score),
        retention_risk_level: retention_level(rec.retention_risk_index),
        remote_work_category: remote_category(rec.remote_work_frequency),
    }
}

/// Derivation stage: pure `records → derived` pass, one output per input.
///
/// `today` is injected rather than read from the clock so the stage stays
/// deterministic under test; callers pass `Local::now().date_naive()`.
pub fn derive(records: &[EmployeeRecord], today: NaiveDate) -> Vec<Derived> {
    records.iter().map(|r| derive_record(r, today)).collect()
}
