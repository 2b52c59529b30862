use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Level – shared Low / Medium / High classification
// ---------------------------------------------------------------------------

/// Three-step classification used for performance, satisfaction and
/// retention risk. Ordered so `BTreeMap` group keys sort Low → High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => write!(f, "Low"),
            Level::Medium => write!(f, "Medium"),
            Level::High => write!(f, "High"),
        }
    }
}

// ---------------------------------------------------------------------------
// RemoteWorkCategory
// ---------------------------------------------------------------------------

/// Work-location category derived from `Remote_Work_Frequency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RemoteWorkCategory {
    Office,
    Hybrid,
    Home,
}

impl RemoteWorkCategory {
    /// All categories, in the order the sidebar lists them.
    pub const ALL: [RemoteWorkCategory; 3] = [
        RemoteWorkCategory::Office,
        RemoteWorkCategory::Hybrid,
        RemoteWorkCategory::Home,
    ];
}

impl fmt::Display for RemoteWorkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteWorkCategory::Office => write!(f, "Work From Office"),
            RemoteWorkCategory::Hybrid => write!(f, "Hybrid"),
            RemoteWorkCategory::Home => write!(f, "Work From Home"),
        }
    }
}

// ---------------------------------------------------------------------------
// EmployeeRecord – one row of the source table
// ---------------------------------------------------------------------------

/// One employee row as parsed from the spreadsheet export.
///
/// Unparseable numeric cells arrive as `NaN` and unparseable hire dates
/// as `None`; rows are never dropped for bad cells.
#[derive(Debug, Clone)]
pub struct EmployeeRecord {
    pub employee_id: String,
    pub department: String,
    pub job_title: String,
    pub hire_date: Option<NaiveDate>,
    pub performance_score: f64,
    pub satisfaction_score: f64,
    pub retention_risk_index: f64,
    /// 0–100; 0 means fully office-based, 100 fully remote.
    pub remote_work_frequency: f64,
    pub productivity_score: f64,
    /// `None` when the optional source column is absent or the cell is blank.
    pub remote_work_efficiency: Option<f64>,
}

// ---------------------------------------------------------------------------
// Derived – per-record classifications, recomputed every refresh cycle
// ---------------------------------------------------------------------------

/// Attributes derived from an [`EmployeeRecord`]; never written back to
/// the source. One entry per record, parallel to `EmployeeDataset::records`.
#[derive(Debug, Clone, Copy)]
pub struct Derived {
    /// Fractional years since hire; `NaN` when the hire date is unknown.
    pub years_at_company: f64,
    pub performance_level: Level,
    pub satisfaction_level: Level,
    pub retention_risk_level: Level,
    pub remote_work_category: RemoteWorkCategory,
}

// ---------------------------------------------------------------------------
// EmployeeDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with derived attributes and pre-computed
/// unique-value indices for the sidebar widgets. Immutable once built;
/// filtering produces index vectors and never touches the rows.
#[derive(Debug, Clone)]
pub struct EmployeeDataset {
    pub records: Vec<EmployeeRecord>,
    /// Same length and order as `records`.
    pub derived: Vec<Derived>,
    /// Sorted distinct departments (blank values excluded).
    pub departments: Vec<String>,
    /// Sorted distinct job titles (blank values excluded).
    pub job_titles: Vec<String>,
    /// Sorted distinct employee IDs.
    pub employee_ids: Vec<String>,
    /// Observed (min, max) hire date over rows with a parseable date.
    pub hire_date_span: Option<(NaiveDate, NaiveDate)>,
    /// Source header name of the optional efficiency column, when present.
    pub efficiency_column: Option<String>,
}

impl EmployeeDataset {
    /// Build the unique-value indices from parsed records.
    pub fn from_records(
        records: Vec<EmployeeRecord>,
        derived: Vec<Derived>,
        efficiency_column: Option<String>,
    ) -> Self {
        debug_assert_eq!(records.len(), derived.len());

        let mut departments: BTreeSet<String> = BTreeSet::new();
        let mut job_titles: BTreeSet<String> = BTreeSet::new();
        let mut employee_ids: BTreeSet<String> = BTreeSet::new();
        let mut hire_date_span: Option<(NaiveDate, NaiveDate)> = None;

        for rec in &records {
            if !rec.department.is_empty() {
                departments.insert(rec.department.clone());
            }
            if !rec.job_title.is_empty() {
                job_titles.insert(rec.job_title.clone());
            }
            if !rec.employee_id.is_empty() {
                employee_ids.insert(rec.employee_id.clone());
            }
            if let Some(d) = rec.hire_date {
                hire_date_span = Some(match hire_date_span {
                    None => (d, d),
                    Some((lo, hi)) => (lo.min(d), hi.max(d)),
                });
            }
        }

        EmployeeDataset {
            records,
            derived,
            departments: departments.into_iter().collect(),
            job_titles: job_titles.into_iter().collect(),
            employee_ids: employee_ids.into_iter().collect(),
            hire_date_span,
            efficiency_column,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, dept: &str, job: &str, hire: Option<NaiveDate>) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: id.to_string(),
            department: dept.to_string(),
            job_title: job.to_string(),
            hire_date: hire,
            performance_score: 3.0,
            satisfaction_score: 3.0,
            retention_risk_index: 0.5,
            remote_work_frequency: 50.0,
            productivity_score: 70.0,
            remote_work_efficiency: None,
        }
    }

    fn mid_derived() -> Derived {
        Derived {
            years_at_company: 1.0,
            performance_level: Level::Medium,
            satisfaction_level: Level::Medium,
            retention_risk_level: Level::Low,
            remote_work_category: RemoteWorkCategory::Hybrid,
        }
    }

    #[test]
    fn from_records_builds_sorted_unique_indices() {
        let d1 = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2018, 3, 15).unwrap();
        let records = vec![
            record("E2", "Sales", "Analyst", Some(d1)),
            record("E1", "Engineering", "Developer", Some(d2)),
            record("E3", "Sales", "Analyst", None),
        ];
        let derived = vec![mid_derived(), mid_derived(), mid_derived()];
        let ds = EmployeeDataset::from_records(records, derived, None);

        assert_eq!(ds.departments, vec!["Engineering", "Sales"]);
        assert_eq!(ds.job_titles, vec!["Analyst", "Developer"]);
        assert_eq!(ds.employee_ids, vec!["E1", "E2", "E3"]);
        assert_eq!(ds.hire_date_span, Some((d2, d1)));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn span_is_none_when_no_date_parses() {
        let records = vec![record("E1", "Sales", "Analyst", None)];
        let ds = EmployeeDataset::from_records(records, vec![mid_derived()], None);
        assert!(ds.hire_date_span.is_none());
    }

    #[test]
    fn level_and_category_display_match_source_labels() {
        assert_eq!(Level::Medium.to_string(), "Medium");
        assert_eq!(RemoteWorkCategory::Home.to_string(), "Work From Home");
        assert_eq!(RemoteWorkCategory::Office.to_string(), "Work From Office");
    }
}
