use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

/// Column headers of the employee-details projection.
const HEADERS: [&str; 7] = [
    "Employee_ID",
    "Department",
    "Job_Title",
    "Performance_Level",
    "Satisfaction_Level",
    "Remote_Work_Category",
    "Retention_Risk_Level",
];

// ---------------------------------------------------------------------------
// Employee details table
// ---------------------------------------------------------------------------

/// Render the row-level projection of the filtered view.
pub fn details_table(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    let indices = &state.visible_indices;

    ui.heading("Employee Details");
    if indices.is_empty() {
        ui.label("No rows match the current filters.");
        return;
    }

    // The central panel already scrolls; let the table take its full height.
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .columns(Column::auto().resizable(true), HEADERS.len() - 1)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, indices.len(), |mut row| {
                let i = indices[row.index()];
                let rec = &ds.records[i];
                let der = &ds.derived[i];

                row.col(|ui: &mut Ui| {
                    ui.label(&rec.employee_id);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.department);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.job_title);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(der.performance_level.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(der.satisfaction_level.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(der.remote_work_category.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(der.retention_risk_level.to_string());
                });
            });
        });
}
