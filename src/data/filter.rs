use chrono::NaiveDate;

use super::model::{EmployeeDataset, RemoteWorkCategory};

// ---------------------------------------------------------------------------
// Filter predicates: the sidebar's current selection state
// ---------------------------------------------------------------------------

/// The request context for one pipeline run: every sidebar predicate,
/// each independently optional. `None` means "All" (no constraint).
///
/// The pipeline only reads this; the widgets own and mutate it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub job_title: Option<String>,
    pub remote_category: Option<RemoteWorkCategory>,
    /// Inclusive on both ends. Rows without a parseable hire date fail
    /// an active range predicate.
    pub hire_date_range: Option<(NaiveDate, NaiveDate)>,
}

impl FilterSelection {
    /// Drop selections that no longer exist in a freshly loaded dataset
    /// (a refresh can change the distinct values under the widgets).
    pub fn revalidate(&mut self, dataset: &EmployeeDataset) {
        if let Some(id) = &self.employee_id {
            if !dataset.employee_ids.contains(id) {
                self.employee_id = None;
            }
        }
        if let Some(dept) = &self.department {
            if !dataset.departments.contains(dept) {
                self.department = None;
            }
        }
        if let Some(job) = &self.job_title {
            if !dataset.job_titles.contains(job) {
                self.job_title = None;
            }
        }
    }
}

/// Return indices of records that pass every active predicate.
///
/// Predicates compose by AND; an unset predicate is a no-op. The empty
/// result is valid and flows unchanged into every aggregation.
pub fn filtered_indices(dataset: &EmployeeDataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .zip(dataset.derived.iter())
        .enumerate()
        .filter(|(_, (rec, der))| {
            if let Some(id) = &selection.employee_id {
                if rec.employee_id != *id {
                    return false;
                }
            }
            if let Some(dept) = &selection.department {
                if rec.department != *dept {
                    return false;
                }
            }
            if let Some(job) = &selection.job_title {
                if rec.job_title != *job {
                    return false;
                }
            }
            if let Some(cat) = selection.remote_category {
                if der.remote_work_category != cat {
                    return false;
                }
            }
            if let Some((start, end)) = selection.hire_date_range {
                match rec.hire_date {
                    Some(d) => {
                        if d < start || d > end {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect()
}
