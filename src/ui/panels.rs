use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};
use egui_extras::DatePickerButton;

use crate::data::alerts::{self, AlertMode};
use crate::data::loader::DataSource;
use crate::data::model::RemoteWorkCategory;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filters and the alert browser
// ---------------------------------------------------------------------------

/// Render the sidebar; recomputes the filtered view when a widget changes.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No data loaded yet.");
        return;
    }

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            changed |= filter_widgets(ui, state);

            ui.add_space(8.0);
            ui.heading("Data Alerts");
            ui.separator();
            changed |= alert_widgets(ui, state);
        });

    if changed {
        state.refilter();
    }
}

fn filter_widgets(ui: &mut Ui, state: &mut AppState) -> bool {
    // Clone the option lists so the combos can mutate the selection.
    let Some(ds) = &state.dataset else {
        return false;
    };
    let employee_ids = ds.employee_ids.clone();
    let departments = ds.departments.clone();
    let job_titles = ds.job_titles.clone();
    let hire_span = ds.hire_date_span;

    let mut changed = false;

    ui.strong("Employee ID");
    changed |= all_or_value_combo(ui, "employee_id", &mut state.selection.employee_id, &employee_ids);

    ui.strong("Department");
    changed |= all_or_value_combo(ui, "department", &mut state.selection.department, &departments);

    ui.strong("Job Title");
    changed |= all_or_value_combo(ui, "job_title", &mut state.selection.job_title, &job_titles);

    ui.strong("Remote Work Type");
    let current = state
        .selection
        .remote_category
        .map(|c| c.to_string())
        .unwrap_or_else(|| "All".to_string());
    egui::ComboBox::from_id_salt("remote_category")
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.selection.remote_category.is_none(), "All")
                .clicked()
            {
                state.selection.remote_category = None;
                changed = true;
            }
            for cat in RemoteWorkCategory::ALL {
                if ui
                    .selectable_label(
                        state.selection.remote_category == Some(cat),
                        cat.to_string(),
                    )
                    .clicked()
                {
                    state.selection.remote_category = Some(cat);
                    changed = true;
                }
            }
        });

    ui.add_space(4.0);
    let mut range_active = state.selection.hire_date_range.is_some();
    if ui
        .checkbox(&mut range_active, "Filter by hire date")
        .changed()
    {
        // Enabling seeds the pickers with the observed span.
        state.selection.hire_date_range = if range_active { hire_span } else { None };
        changed = true;
    }
    if let Some((mut start, mut end)) = state.selection.hire_date_range {
        ui.horizontal(|ui: &mut Ui| {
            ui.label("From");
            if ui
                .add(DatePickerButton::new(&mut start).id_salt("hire_from"))
                .changed()
            {
                changed = true;
            }
        });
        ui.horizontal(|ui: &mut Ui| {
            ui.label("To");
            if ui
                .add(DatePickerButton::new(&mut end).id_salt("hire_to"))
                .changed()
            {
                changed = true;
            }
        });
        if end < start {
            end = start;
        }
        state.selection.hire_date_range = Some((start, end));
    }

    changed
}

/// A combo with an "All" entry followed by the distinct values.
fn all_or_value_combo(
    ui: &mut Ui,
    id: &str,
    selection: &mut Option<String>,
    values: &[String],
) -> bool {
    let mut changed = false;
    let current = selection.clone().unwrap_or_else(|| "All".to_string());
    egui::ComboBox::from_id_salt(id)
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(selection.is_none(), "All").clicked() {
                *selection = None;
                changed = true;
            }
            for value in values {
                if ui
                    .selectable_label(selection.as_deref() == Some(value), value)
                    .clicked()
                {
                    *selection = Some(value.clone());
                    changed = true;
                }
            }
        });
    changed
}

// ---------------------------------------------------------------------------
// Alert browser: mode → department → index drill-down
// ---------------------------------------------------------------------------

fn alert_widgets(ui: &mut Ui, state: &mut AppState) -> bool {
    let mut changed = false;

    egui::ComboBox::from_id_salt("alert_mode")
        .selected_text(match state.alerts.mode {
            AlertMode::None => "None",
            AlertMode::Critical => "Critical Alerts",
        })
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.alerts.mode == AlertMode::None, "None")
                .clicked()
            {
                state.alerts.mode = AlertMode::None;
                changed = true;
            }
            if ui
                .selectable_label(state.alerts.mode == AlertMode::Critical, "Critical Alerts")
                .clicked()
            {
                state.alerts.mode = AlertMode::Critical;
                changed = true;
            }
        });

    if !state.alerts.is_active() {
        return changed;
    }
    let Some(ds) = &state.dataset else {
        return changed;
    };

    let dept_options = alerts::departments_with_alerts(ds, &state.alert_candidates);
    if dept_options.is_empty() {
        ui.label("No critical alerts in the current view.");
        return changed;
    }

    ui.strong("Department");
    changed |= all_or_value_combo(ui, "alert_department", &mut state.alerts.department, &dept_options);

    // The index slider ranges over the department-restricted subset;
    // with an empty subset it is not shown at all.
    let visible = state.alerts.visible_candidates(ds, &state.alert_candidates);
    if !visible.is_empty() {
        let max = visible.len() - 1;
        state.alerts.index = state.alerts.index.min(max);
        ui.strong("Select Employee Alert");
        if ui
            .add(Slider::new(&mut state.alerts.index, 0..=max))
            .changed()
        {
            changed = true;
        }
    }

    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} employees loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
            ui.separator();
        }

        if let Some(at) = state.last_refresh {
            ui.label(format!("refreshed {}s ago", at.elapsed().as_secs()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Let the user point the dashboard at a local CSV export; the chosen
/// file becomes the source for subsequent auto-refreshes too.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open employee CSV export")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.source = DataSource::File(path);
        state.reload();
    }
}
