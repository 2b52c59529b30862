use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use csv::StringRecord;
use thiserror::Error;

use super::derive;
use super::model::{EmployeeDataset, EmployeeRecord};

// ---------------------------------------------------------------------------
// Errors – everything here is fatal for the current refresh cycle
// ---------------------------------------------------------------------------

/// A failed load. Per-row problems (bad dates, bad numbers) never reach
/// this enum; they degrade the affected cell and are logged instead.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Network/HTTP failure (including timeout) or unreadable file.
    #[error("data source unavailable: {0}")]
    SourceUnavailable(String),
    /// Structurally malformed CSV.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    /// A required header is missing from the export.
    #[error("required column '{0}' not found in the data source")]
    MissingColumn(&'static str),
}

// ---------------------------------------------------------------------------
// DataSource
// ---------------------------------------------------------------------------

/// Where the CSV export comes from: the remote spreadsheet URL, or a
/// local file picked through the Open dialog.
#[derive(Debug, Clone)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(u) => write!(f, "{u}"),
            DataSource::File(p) => write!(f, "{}", p.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Fetch and parse the dataset for one refresh cycle. The fetch blocks
/// for at most `timeout`; `today` anchors the tenure derivation.
pub fn load(
    source: &DataSource,
    timeout: Duration,
    today: NaiveDate,
) -> Result<EmployeeDataset, LoadError> {
    let text = match source {
        DataSource::Url(url) => fetch_url(url, timeout)?,
        DataSource::File(path) => std::fs::read_to_string(path)
            .map_err(|e| LoadError::SourceUnavailable(format!("{}: {e}", path.display())))?,
    };
    parse_csv(&text, today)
}

fn fetch_url(url: &str, timeout: Duration) -> Result<String, LoadError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LoadError::SourceUnavailable(e.to_string()))?;
    client
        .get(url)
        .send()
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.text())
        .map_err(|e| LoadError::SourceUnavailable(e.to_string()))
}

// ---------------------------------------------------------------------------
// Schema resolution
// ---------------------------------------------------------------------------

/// Required headers, by their exact names in the export. The odd
/// spellings ("Retension risk index") are the source's, not ours.
const COL_EMPLOYEE_ID: &str = "Employee_ID";
const COL_DEPARTMENT: &str = "Department";
const COL_JOB_TITLE: &str = "Job_Title";
const COL_HIRE_DATE: &str = "Hire_Date";
const COL_PERFORMANCE: &str = "Performance_Score";
const COL_SATISFACTION: &str = "Employee_Satisfaction_Score";
const COL_RETENTION: &str = "Retension risk index";
const COL_REMOTE_FREQ: &str = "Remote_Work_Frequency";
const COL_PRODUCTIVITY: &str = "Productivity score";

/// Normalized name the optional efficiency column must match.
const EFFICIENCY_NORMALIZED: &str = "remote_work_efficiency";

/// Resolved column positions for one parse.
struct Columns {
    employee_id: usize,
    department: usize,
    job_title: usize,
    hire_date: usize,
    performance: usize,
    satisfaction: usize,
    retention: usize,
    remote_freq: usize,
    productivity: usize,
    /// Position and source name of the optional efficiency column.
    efficiency: Option<(usize, String)>,
}

fn resolve_columns(headers: &StringRecord) -> Result<Columns, LoadError> {
    let find = |name: &'static str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))
    };

    Ok(Columns {
        employee_id: find(COL_EMPLOYEE_ID)?,
        department: find(COL_DEPARTMENT)?,
        job_title: find(COL_JOB_TITLE)?,
        hire_date: find(COL_HIRE_DATE)?,
        performance: find(COL_PERFORMANCE)?,
        satisfaction: find(COL_SATISFACTION)?,
        retention: find(COL_RETENTION)?,
        remote_freq: find(COL_REMOTE_FREQ)?,
        productivity: find(COL_PRODUCTIVITY)?,
        efficiency: find_efficiency_column(headers),
    })
}

/// Locate the optional efficiency column by case/whitespace-insensitive
/// name match, returning its position and original header text.
fn find_efficiency_column(headers: &StringRecord) -> Option<(usize, String)> {
    headers
        .iter()
        .position(|h| normalize_header(h) == EFFICIENCY_NORMALIZED)
        .map(|i| (i, headers[i].to_string()))
}

fn normalize_header(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace(' ', "_")
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Hire-date formats accepted, first match wins.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

fn parse_hire_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    // ISO timestamps from some exports carry a time suffix; the date
    // prefix is enough.
    let date_part = cell.split_whitespace().next().unwrap_or("");
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// Parse CSV text into a derived dataset.
///
/// Whole-table problems (missing required column, malformed CSV) fail
/// the load; per-row problems degrade the cell: unparseable dates
/// become `None`, unparseable numbers `NaN`. Both are counted and
/// reported with a single `warn` per load.
pub fn parse_csv(text: &str, today: NaiveDate) -> Result<EmployeeDataset, LoadError> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let columns = resolve_columns(reader.headers()?)?;

    if columns.efficiency.is_none() {
        log::warn!("optional '{EFFICIENCY_NORMALIZED}' column not found; KPI will show 0");
    }

    let mut records = Vec::new();
    let mut bad_dates = 0usize;
    let mut bad_numbers = 0usize;

    let mut numeric = |cell: &str| -> f64 {
        let cell = cell.trim();
        if cell.is_empty() {
            bad_numbers += 1;
            return f64::NAN;
        }
        cell.parse::<f64>().unwrap_or_else(|_| {
            bad_numbers += 1;
            f64::NAN
        })
    };

    for row in reader.records() {
        let row = row?;
        let cell = |i: usize| row.get(i).unwrap_or("").trim();

        let hire_cell = cell(columns.hire_date);
        let hire_date = parse_hire_date(hire_cell);
        if hire_date.is_none() && !hire_cell.is_empty() {
            bad_dates += 1;
        }

        let remote_work_efficiency = columns.efficiency.as_ref().and_then(|(i, _)| {
            let v = cell(*i);
            if v.is_empty() {
                None
            } else {
                v.parse::<f64>().ok()
            }
        });

        records.push(EmployeeRecord {
            employee_id: cell(columns.employee_id).to_string(),
            department: cell(columns.department).to_string(),
            job_title: cell(columns.job_title).to_string(),
            hire_date,
            performance_score: numeric(cell(columns.performance)),
            satisfaction_score: numeric(cell(columns.satisfaction)),
            retention_risk_index: numeric(cell(columns.retention)),
            remote_work_frequency: numeric(cell(columns.remote_freq)),
            productivity_score: numeric(cell(columns.productivity)),
            remote_work_efficiency,
        });
    }

    if bad_dates > 0 || bad_numbers > 0 {
        log::warn!(
            "kept all {} rows; {bad_dates} unparseable hire dates, {bad_numbers} unparseable numeric cells",
            records.len()
        );
    }

    let derived = derive::derive(&records, today);
    let efficiency_column = columns.efficiency.map(|(_, name)| name);
    Ok(EmployeeDataset::from_records(records, derived, efficiency_column))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Employee_ID,Department,Job_Title,Hire_Date,Performance_Score,\
Employee_Satisfaction_Score,Retension risk index,Remote_Work_Frequency,Productivity score";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn parses_a_complete_row() {
        let csv = format!(
            "{HEADER},Remote_Work_Efficiency\n\
             E1,Engineering,Developer,2020-06-01,3,2,1.5,50,70,85.5\n"
        );
        let ds = parse_csv(&csv, today()).unwrap();
        assert_eq!(ds.len(), 1);
        let rec = &ds.records[0];
        assert_eq!(rec.employee_id, "E1");
        assert_eq!(rec.department, "Engineering");
        assert_eq!(rec.hire_date, NaiveDate::from_ymd_opt(2020, 6, 1));
        assert_eq!(rec.performance_score, 3.0);
        assert_eq!(rec.remote_work_efficiency, Some(85.5));
        assert_eq!(ds.efficiency_column.as_deref(), Some("Remote_Work_Efficiency"));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let csv = "Employee_ID,Department\nE1,Engineering\n";
        let err = parse_csv(csv, today()).unwrap_err();
        match err {
            LoadError::MissingColumn(name) => assert_eq!(name, "Job_Title"),
            other => panic!("expected MissingColumn, got {other}"),
        }
    }

    #[test]
    fn missing_optional_efficiency_column_degrades() {
        let csv = format!("{HEADER}\nE1,Engineering,Developer,2020-06-01,4,4,0.5,0,70\n");
        let ds = parse_csv(&csv, today()).unwrap();
        assert!(ds.efficiency_column.is_none());
        assert_eq!(ds.records[0].remote_work_efficiency, None);
    }

    #[test]
    fn efficiency_column_matches_case_and_space_insensitively() {
        let csv = format!(
            "{HEADER},Remote Work Efficiency\n\
             E1,Engineering,Developer,2020-06-01,4,4,0.5,0,70,91\n"
        );
        let ds = parse_csv(&csv, today()).unwrap();
        assert_eq!(ds.efficiency_column.as_deref(), Some("Remote Work Efficiency"));
        assert_eq!(ds.records[0].remote_work_efficiency, Some(91.0));
    }

    #[test]
    fn unparseable_date_keeps_the_row() {
        let csv = format!(
            "{HEADER}\n\
             E1,Engineering,Developer,not-a-date,4,4,0.5,0,70\n\
             E2,Engineering,Developer,2020-06-01,4,4,0.5,0,70\n"
        );
        let ds = parse_csv(&csv, today()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].hire_date, None);
        assert!(ds.derived[0].years_at_company.is_nan());
        assert!(ds.derived[1].years_at_company > 0.0);
    }

    #[test]
    fn unparseable_numeric_becomes_nan() {
        let csv = format!("{HEADER}\nE1,Engineering,Developer,2020-06-01,oops,4,0.5,0,\n");
        let ds = parse_csv(&csv, today()).unwrap();
        assert!(ds.records[0].performance_score.is_nan());
        assert!(ds.records[0].productivity_score.is_nan());
        assert_eq!(ds.records[0].satisfaction_score, 4.0);
    }

    #[test]
    fn alternate_date_formats_accepted() {
        for cell in ["2020/06/01", "06/01/2020", "01-06-2020", "2020-06-01 00:00:00"] {
            assert_eq!(
                parse_hire_date(cell),
                NaiveDate::from_ymd_opt(2020, 6, 1),
                "format: {cell}"
            );
        }
        assert_eq!(parse_hire_date(""), None);
        assert_eq!(parse_hire_date("June 1st"), None);
    }

    #[test]
    fn file_source_errors_are_source_unavailable() {
        let source = DataSource::File(PathBuf::from("/definitely/not/here.csv"));
        let err = load(&source, Duration::from_secs(1), today()).unwrap_err();
        assert!(matches!(err, LoadError::SourceUnavailable(_)));
    }
}
