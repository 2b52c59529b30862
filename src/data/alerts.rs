use std::collections::BTreeSet;

use super::model::{EmployeeDataset, Level};

// ---------------------------------------------------------------------------
// Alert candidates: Low satisfaction combined with High retention risk
// ---------------------------------------------------------------------------

/// Indices (into the dataset) of filtered rows that are alert candidates.
pub fn alert_candidates(dataset: &EmployeeDataset, filtered: &[usize]) -> Vec<usize> {
    filtered
        .iter()
        .copied()
        .filter(|&i| {
            let d = &dataset.derived[i];
            d.satisfaction_level == Level::Low && d.retention_risk_level == Level::High
        })
        .collect()
}

/// Sorted distinct departments present in the candidate set.
pub fn departments_with_alerts(dataset: &EmployeeDataset, candidates: &[usize]) -> Vec<String> {
    let set: BTreeSet<String> = candidates
        .iter()
        .map(|&i| dataset.records[i].department.clone())
        .filter(|d| !d.is_empty())
        .collect();
    set.into_iter().collect()
}

// ---------------------------------------------------------------------------
// AlertSelector – the sidebar's two-level drill-down
// ---------------------------------------------------------------------------

/// Sidebar toggle for the alert browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertMode {
    #[default]
    None,
    Critical,
}

/// Drill-down state for the alert browser: hidden until critical alerts
/// are enabled, then optionally narrowed to one department, then to one
/// candidate by index.
///
/// The selections are widget-owned and can go stale when a refresh
/// changes the data underneath; [`AlertSelector::revalidate`] is called
/// with every fresh candidate set before the selections are read.
#[derive(Debug, Clone, Default)]
pub struct AlertSelector {
    pub mode: AlertMode,
    /// `None` means "All" departments.
    pub department: Option<String>,
    /// Index into the department-restricted candidate subset.
    pub index: usize,
}

impl AlertSelector {
    /// Whether the alert browser is enabled at all.
    pub fn is_active(&self) -> bool {
        self.mode == AlertMode::Critical
    }

    /// The candidate subset the index selector ranges over: all
    /// candidates, or only those in the chosen department.
    pub fn visible_candidates(
        &self,
        dataset: &EmployeeDataset,
        candidates: &[usize],
    ) -> Vec<usize> {
        match &self.department {
            None => candidates.to_vec(),
            Some(dept) => candidates
                .iter()
                .copied()
                .filter(|&i| dataset.records[i].department == *dept)
                .collect(),
        }
    }

    /// Re-check the selections against a fresh candidate set: a vanished
    /// department resets to All, an out-of-range index clamps to the
    /// last candidate (0 when the subset is empty).
    pub fn revalidate(&mut self, dataset: &EmployeeDataset, candidates: &[usize]) {
        if let Some(dept) = &self.department {
            let present = departments_with_alerts(dataset, candidates);
            if !present.contains(dept) {
                self.department = None;
            }
        }
        let visible = self.visible_candidates(dataset, candidates);
        if visible.is_empty() {
            self.index = 0;
        } else if self.index >= visible.len() {
            self.index = visible.len() - 1;
        }
    }

    /// Dataset index of the currently selected alert, if any. With a
    /// single candidate, index 0 selects it; with none, no selection.
    pub fn selected(&self, dataset: &EmployeeDataset, candidates: &[usize]) -> Option<usize> {
        if !self.is_active() {
            return None;
        }
        self.visible_candidates(dataset, candidates)
            .get(self.index)
            .copied()
    }

    /// The alert banner text for the current selection, if any.
    pub fn message(&self, dataset: &EmployeeDataset, candidates: &[usize]) -> Option<String> {
        let i = self.selected(dataset, candidates)?;
        let rec = &dataset.records[i];
        Some(format!(
            "Alert: Employee {} from {} has Low Satisfaction and High Retention Risk (Job Title: {})",
            rec.employee_id, rec.department, rec.job_title
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::derive;
    use crate::data::model::EmployeeRecord;
    use chrono::NaiveDate;

    fn record(id: &str, dept: &str, job: &str, sat: f64, risk: f64) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: id.to_string(),
            department: dept.to_string(),
            job_title: job.to_string(),
            hire_date: NaiveDate::from_ymd_opt(2020, 6, 1),
            performance_score: 3.0,
            satisfaction_score: sat,
            retention_risk_index: risk,
            remote_work_frequency: 50.0,
            productivity_score: 70.0,
            remote_work_efficiency: None,
        }
    }

    fn dataset(records: Vec<EmployeeRecord>) -> EmployeeDataset {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let derived = derive::derive(&records, today);
        EmployeeDataset::from_records(records, derived, None)
    }

    #[test]
    fn candidates_need_low_satisfaction_and_high_risk() {
        let ds = dataset(vec![
            record("E1", "Eng", "Dev", 2.0, 1.5),  // candidate
            record("E2", "Eng", "Dev", 2.0, 1.0),  // risk only Medium
            record("E3", "Eng", "Dev", 4.0, 2.0),  // satisfaction High
            record("E4", "Sales", "Rep", 1.0, 1.8), // candidate
        ]);
        let filtered: Vec<usize> = (0..ds.len()).collect();
        let cands = alert_candidates(&ds, &filtered);
        assert_eq!(cands, vec![0, 3]);
        assert_eq!(departments_with_alerts(&ds, &cands), vec!["Eng", "Sales"]);
    }

    #[test]
    fn candidates_respect_the_filtered_view() {
        let ds = dataset(vec![
            record("E1", "Eng", "Dev", 2.0, 1.5),
            record("E2", "Sales", "Rep", 2.0, 1.5),
        ]);
        // Only the Sales row is in the filtered view.
        let cands = alert_candidates(&ds, &[1]);
        assert_eq!(cands, vec![1]);
    }

    #[test]
    fn index_zero_selects_a_single_candidate() {
        let ds = dataset(vec![record("E100", "Eng", "Developer", 2.0, 1.5)]);
        let filtered: Vec<usize> = (0..ds.len()).collect();
        let cands = alert_candidates(&ds, &filtered);
        assert_eq!(cands.len(), 1);

        let sel = AlertSelector {
            mode: AlertMode::Critical,
            department: Some("Eng".to_string()),
            index: 0,
        };
        assert_eq!(sel.selected(&ds, &cands), Some(0));
        let msg = sel.message(&ds, &cands).unwrap();
        assert!(msg.contains("E100"));
        assert!(msg.contains("Eng"));
        assert!(msg.contains("Developer"));
    }

    #[test]
    fn hidden_mode_produces_no_selection() {
        let ds = dataset(vec![record("E1", "Eng", "Dev", 2.0, 1.5)]);
        let cands = alert_candidates(&ds, &[0]);
        let sel = AlertSelector::default();
        assert_eq!(sel.selected(&ds, &cands), None);
        assert_eq!(sel.message(&ds, &cands), None);
    }

    #[test]
    fn empty_candidate_set_suspends_without_panic() {
        let ds = dataset(vec![record("E1", "Eng", "Dev", 4.0, 0.5)]);
        let cands = alert_candidates(&ds, &[0]);
        assert!(cands.is_empty());

        let mut sel = AlertSelector {
            mode: AlertMode::Critical,
            department: Some("Eng".to_string()),
            index: 3,
        };
        sel.revalidate(&ds, &cands);
        assert_eq!(sel.department, None);
        assert_eq!(sel.index, 0);
        assert_eq!(sel.selected(&ds, &cands), None);
    }

    #[test]
    fn revalidate_clamps_a_stale_index() {
        let ds = dataset(vec![
            record("E1", "Eng", "Dev", 2.0, 1.5),
            record("E2", "Eng", "Dev", 2.0, 1.5),
        ]);
        let cands = alert_candidates(&ds, &[0, 1]);
        let mut sel = AlertSelector {
            mode: AlertMode::Critical,
            department: None,
            index: 5,
        };
        sel.revalidate(&ds, &cands);
        assert_eq!(sel.index, 1);
        assert_eq!(sel.selected(&ds, &cands), Some(1));
    }

    #[test]
    fn department_choice_narrows_the_index_range() {
        let ds = dataset(vec![
            record("E1", "Eng", "Dev", 2.0, 1.5),
            record("E2", "Sales", "Rep", 2.0, 1.5),
            record("E3", "Sales", "Rep", 1.0, 1.6),
        ]);
        let cands = alert_candidates(&ds, &[0, 1, 2]);
        let sel = AlertSelector {
            mode: AlertMode::Critical,
            department: Some("Sales".to_string()),
            index: 1,
        };
        assert_eq!(sel.visible_candidates(&ds, &cands), vec![1, 2]);
        assert_eq!(sel.selected(&ds, &cands), Some(2));
    }
}
