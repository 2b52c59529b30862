use std::time::Instant;

use chrono::Local;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::alerts::{self, AlertSelector};
use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::loader::{self, DataSource};
use crate::data::model::EmployeeDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
///
/// The dataset is replaced wholesale on every refresh cycle; the only
/// state that survives a cycle is the widget selections, and those are
/// revalidated against each fresh dataset.
pub struct AppState {
    pub config: DashboardConfig,

    /// Where the next refresh loads from (config URL until the user
    /// opens a local file).
    pub source: DataSource,

    /// Loaded table (None until the first successful load).
    pub dataset: Option<EmployeeDataset>,

    /// Current sidebar predicates.
    pub selection: FilterSelection,

    /// Indices of records passing the current predicates (cached).
    pub visible_indices: Vec<usize>,

    /// Alert candidates within the filtered view (cached).
    pub alert_candidates: Vec<usize>,

    /// Alert browser drill-down state.
    pub alerts: AlertSelector,

    /// Stable series colours for the charts.
    pub department_colors: ColorMap,
    pub job_title_colors: ColorMap,

    /// When the last load attempt finished (success or failure).
    pub last_refresh: Option<Instant>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let source = DataSource::Url(config.source_url.clone());
        Self {
            config,
            source,
            dataset: None,
            selection: FilterSelection::default(),
            visible_indices: Vec::new(),
            alert_candidates: Vec::new(),
            alerts: AlertSelector::default(),
            department_colors: ColorMap::default(),
            job_title_colors: ColorMap::default(),
            last_refresh: None,
            status_message: None,
        }
    }

    /// Whether the auto-refresh clock has fired.
    pub fn refresh_due(&self, now: Instant) -> bool {
        match self.last_refresh {
            None => true,
            Some(at) => now.duration_since(at) >= self.config.refresh_interval(),
        }
    }

    /// Run one load → derive cycle from the current source. On failure
    /// the previous dataset stays on screen and the error becomes the
    /// status message.
    pub fn reload(&mut self) {
        let today = Local::now().date_naive();
        match loader::load(&self.source, self.config.fetch_timeout(), today) {
            Ok(dataset) => {
                log::info!(
                    "loaded {} employees from {} ({} departments, {} job titles)",
                    dataset.len(),
                    self.source,
                    dataset.departments.len(),
                    dataset.job_titles.len()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("refresh failed: {e}");
                self.status_message = Some(format!("Refresh failed: {e}"));
            }
        }
        self.last_refresh = Some(Instant::now());
    }

    /// Ingest a freshly loaded dataset: revalidate the widget
    /// selections against it, rebuild colours, recompute the view.
    pub fn set_dataset(&mut self, dataset: EmployeeDataset) {
        self.selection.revalidate(&dataset);
        self.department_colors = ColorMap::new(dataset.departments.iter().cloned());
        self.job_title_colors = ColorMap::new(dataset.job_titles.iter().cloned());
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the filtered view and the alert candidate set after
    /// any selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.selection);
            self.alert_candidates = alerts::alert_candidates(ds, &self.visible_indices);
            self.alerts.revalidate(ds, &self.alert_candidates);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::derive;
    use crate::data::model::{EmployeeDataset, EmployeeRecord};
    use chrono::NaiveDate;
    use std::time::Duration;

    fn record(id: &str, dept: &str, sat: f64, risk: f64) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: id.to_string(),
            department: dept.to_string(),
            job_title: "Dev".to_string(),
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
    fn refresh_is_due_immediately_and_after_the_interval() {
        let mut state = AppState::new(DashboardConfig::default());
        let now = Instant::now();
        assert!(state.refresh_due(now));

        state.last_refresh = Some(now);
        assert!(!state.refresh_due(now + Duration::from_secs(59)));
        assert!(state.refresh_due(now + Duration::from_secs(60)));
    }

    #[test]
    fn set_dataset_rebuilds_the_view_and_candidates() {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(dataset(vec![
            record("E1", "Eng", 2.0, 1.5),
            record("E2", "Sales", 4.0, 0.5),
        ]));
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(state.alert_candidates, vec![0]);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn stale_selection_is_dropped_on_reload() {
        let mut state = AppState::new(DashboardConfig::default());
        state.selection.department = Some("Legal".to_string());
        state.set_dataset(dataset(vec![record("E1", "Eng", 4.0, 0.5)]));
        // "Legal" does not exist in the new data, so the filter resets
        // and every row stays visible.
        assert_eq!(state.selection.department, None);
        assert_eq!(state.visible_indices, vec![0]);
    }
}
