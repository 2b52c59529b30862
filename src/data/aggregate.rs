use std::collections::BTreeMap;

use super::model::{EmployeeDataset, Level, RemoteWorkCategory};

// ---------------------------------------------------------------------------
// Mean accumulator: every mean here skips non-finite samples and reports
// 0.0 over an empty (or all-NaN) group, never NaN.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
struct MeanAcc {
    sum: f64,
    n: usize,
}

impl MeanAcc {
    fn add(&mut self, v: f64) {
        if v.is_finite() {
            self.sum += v;
            self.n += 1;
        }
    }

    fn mean(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.sum / self.n as f64
        }
    }
}

// ---------------------------------------------------------------------------
// KPI cards
// ---------------------------------------------------------------------------

/// The two scalar KPIs shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kpis {
    pub remote_efficiency_avg: f64,
    pub productivity_avg: f64,
    /// False when the optional efficiency column is absent from the
    /// source; the average is then a neutral 0 and the UI shows a warning.
    pub efficiency_available: bool,
}

/// Mean remote-work efficiency and productivity over the filtered rows.
pub fn kpis(dataset: &EmployeeDataset, indices: &[usize]) -> Kpis {
    let mut efficiency = MeanAcc::default();
    let mut productivity = MeanAcc::default();

    for &i in indices {
        let rec = &dataset.records[i];
        if let Some(e) = rec.remote_work_efficiency {
            efficiency.add(e);
        }
        productivity.add(rec.productivity_score);
    }

    Kpis {
        remote_efficiency_avg: efficiency.mean(),
        productivity_avg: productivity.mean(),
        efficiency_available: dataset.efficiency_column.is_some(),
    }
}

// ---------------------------------------------------------------------------
// Grouped aggregates, one per chart
// ---------------------------------------------------------------------------

/// Mean productivity score grouped by (department, remote-work category).
pub fn mean_productivity_by_dept_remote(
    dataset: &EmployeeDataset,
    indices: &[usize],
) -> BTreeMap<(String, RemoteWorkCategory), f64> {
    let mut groups: BTreeMap<(String, RemoteWorkCategory), MeanAcc> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        let key = (rec.department.clone(), dataset.derived[i].remote_work_category);
        groups.entry(key).or_default().add(rec.productivity_score);
    }
    groups.into_iter().map(|(k, acc)| (k, acc.mean())).collect()
}

/// Employee count grouped by (job title, performance level).
pub fn count_by_job_performance(
    dataset: &EmployeeDataset,
    indices: &[usize],
) -> BTreeMap<(String, Level), usize> {
    count_by_job_level(dataset, indices, |i| dataset.derived[i].performance_level)
}

/// Employee count grouped by (job title, retention-risk level).
pub fn count_by_job_retention(
    dataset: &EmployeeDataset,
    indices: &[usize],
) -> BTreeMap<(String, Level), usize> {
    count_by_job_level(dataset, indices, |i| dataset.derived[i].retention_risk_level)
}

fn count_by_job_level(
    dataset: &EmployeeDataset,
    indices: &[usize],
    level_of: impl Fn(usize) -> Level,
) -> BTreeMap<(String, Level), usize> {
    let mut groups: BTreeMap<(String, Level), usize> = BTreeMap::new();
    for &i in indices {
        let key = (dataset.records[i].job_title.clone(), level_of(i));
        *groups.entry(key).or_insert(0) += 1;
    }
    groups
}

/// Employee count per remote-work category.
pub fn count_by_remote_category(
    dataset: &EmployeeDataset,
    indices: &[usize],
) -> BTreeMap<RemoteWorkCategory, usize> {
    let mut groups: BTreeMap<RemoteWorkCategory, usize> = BTreeMap::new();
    for &i in indices {
        *groups
            .entry(dataset.derived[i].remote_work_category)
            .or_insert(0) += 1;
    }
    groups
}

/// Mean satisfaction score per department.
pub fn mean_satisfaction_by_department(
    dataset: &EmployeeDataset,
    indices: &[usize],
) -> BTreeMap<String, f64> {
    let mut groups: BTreeMap<String, MeanAcc> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        groups
            .entry(rec.department.clone())
            .or_default()
            .add(rec.satisfaction_score);
    }
    groups.into_iter().map(|(k, acc)| (k, acc.mean())).collect()
}

// ---------------------------------------------------------------------------
// Tenure trend: mean performance per (tenure bin, job title)
// ---------------------------------------------------------------------------

/// Number of equal-width tenure bins in the trend chart.
pub const TREND_BINS: usize = 10;

/// One line-chart point: mean performance for a job title at a bin midpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub years_midpoint: f64,
    pub job_title: String,
    pub mean_performance: f64,
}

/// Partition the filtered rows' tenure into [`TREND_BINS`] equal-width
/// bins spanning the observed finite min/max, then average the
/// performance score per (bin, job title).
///
/// Edges are recomputed from the current filtered range on every call.
/// Rows with unknown tenure are skipped; if every row's tenure is
/// unknown the result is empty. An all-equal range degenerates to a
/// single bin at that value.
pub fn performance_trend(dataset: &EmployeeDataset, indices: &[usize]) -> Vec<TrendPoint> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &i in indices {
        let y = dataset.derived[i].years_at_company;
        if y.is_finite() {
            min = min.min(y);
            max = max.max(y);
        }
    }
    if min > max {
        return Vec::new();
    }

    let width = (max - min) / TREND_BINS as f64;
    let bin_of = |y: f64| -> usize {
        if width == 0.0 {
            0
        } else {
            // The max value itself belongs to the last bin.
            (((y - min) / width) as usize).min(TREND_BINS - 1)
        }
    };
    let midpoint_of = |bin: usize| -> f64 {
        if width == 0.0 {
            min
        } else {
            min + (bin as f64 + 0.5) * width
        }
    };

    let mut groups: BTreeMap<(usize, String), MeanAcc> = BTreeMap::new();
    for &i in indices {
        let y = dataset.derived[i].years_at_company;
        if !y.is_finite() {
            continue;
        }
        let key = (bin_of(y), dataset.records[i].job_title.clone());
        groups
            .entry(key)
            .or_default()
            .add(dataset.records[i].performance_score);
    }

    groups
        .into_iter()
        .map(|((bin, job_title), acc)| TrendPoint {
            years_midpoint: midpoint_of(bin),
            job_title,
            mean_performance: acc.mean(),
        })
        .collect()
}
