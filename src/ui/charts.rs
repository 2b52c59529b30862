use std::collections::BTreeMap;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::{level_color, remote_category_color, retention_color};
use crate::data::aggregate;
use crate::data::model::{EmployeeDataset, Level, RemoteWorkCategory};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 240.0;
const LEVELS: [Level; 3] = [Level::Low, Level::Medium, Level::High];

// ---------------------------------------------------------------------------
// Central panel: alert banner, KPI cards, five charts
// ---------------------------------------------------------------------------

/// Render the dashboard body from the current filtered view.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Waiting for the first data load…");
        });
        return;
    };
    let indices = &state.visible_indices;

    if let Some(msg) = state.alerts.message(ds, &state.alert_candidates) {
        egui::Frame::none()
            .fill(Color32::from_rgb(0x5A, 0x1E, 0x1E))
            .rounding(6.0)
            .inner_margin(8.0)
            .show(ui, |ui: &mut Ui| {
                ui.label(RichText::new(msg).color(Color32::WHITE).strong());
            });
        ui.add_space(6.0);
    }

    kpi_row(ui, ds, indices);
    ui.add_space(8.0);

    ui.heading("Performance Overview");
    ui.columns(2, |cols| {
        productivity_by_dept_chart(&mut cols[0], ds, indices);
        performance_count_chart(&mut cols[1], ds, indices);
    });

    ui.heading("Retention and Work Type");
    ui.columns(2, |cols| {
        retention_count_chart(&mut cols[0], ds, indices);
        remote_distribution_chart(&mut cols[1], ds, indices);
    });

    ui.heading("Employee Satisfaction");
    satisfaction_chart(ui, state, ds, indices);

    ui.heading("Performance Score Trend by Years at Company");
    trend_chart(ui, state, ds, indices);
}

// ---------------------------------------------------------------------------
// KPI cards
// ---------------------------------------------------------------------------

fn kpi_row(ui: &mut Ui, ds: &EmployeeDataset, indices: &[usize]) {
    let kpis = aggregate::kpis(ds, indices);

    if !kpis.efficiency_available {
        ui.label(
            RichText::new("Remote Work Efficiency column not found in the data source.")
                .color(Color32::YELLOW),
        );
    }

    ui.columns(2, |cols| {
        kpi_card(&mut cols[0], "Remote Work Efficiency", kpis.remote_efficiency_avg);
        kpi_card(&mut cols[1], "Productivity Score", kpis.productivity_avg);
    });
}

fn kpi_card(ui: &mut Ui, title: &str, value: f64) {
    egui::Frame::none()
        .fill(Color32::BLACK)
        .rounding(10.0)
        .inner_margin(16.0)
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(RichText::new(title).color(Color32::WHITE).size(16.0));
                ui.label(
                    RichText::new(format!("{value:.2}"))
                        .color(Color32::WHITE)
                        .size(28.0)
                        .strong(),
                );
            });
        });
}

// ---------------------------------------------------------------------------
// Grouped bar helper
// ---------------------------------------------------------------------------

struct BarSeries {
    name: String,
    color: Color32,
    /// (slot on the x axis, bar height)
    values: Vec<(usize, f64)>,
}

/// Bars grouped per x-axis slot, one colour per series, slot labels on
/// the axis. Integer grid marks map back to the slot labels.
fn grouped_bar_plot(ui: &mut Ui, id: &str, slot_labels: Vec<String>, series: Vec<BarSeries>) {
    let n_series = series.len().max(1);
    let bar_width = 0.8 / n_series as f64;

    let labels = slot_labels.clone();
    Plot::new(id.to_string())
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_formatter(move |mark, _range| {
            let slot = mark.value.round();
            if (mark.value - slot).abs() > 0.001 || slot < 0.0 {
                return String::new();
            }
            labels.get(slot as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (j, s) in series.iter().enumerate() {
                let bars: Vec<Bar> = s
                    .values
                    .iter()
                    .map(|&(slot, value)| {
                        let x = slot as f64
                            + (j as f64 - (n_series as f64 - 1.0) / 2.0) * bar_width;
                        Bar::new(x, value).width(bar_width)
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(&s.name).color(s.color));
            }
        });
}

fn slot_of(labels: &[String], label: &str) -> Option<usize> {
    labels.iter().position(|l| l == label)
}

// ---------------------------------------------------------------------------
// The five charts
// ---------------------------------------------------------------------------

/// Mean productivity per department, one bar colour per remote category.
fn productivity_by_dept_chart(ui: &mut Ui, ds: &EmployeeDataset, indices: &[usize]) {
    ui.label(RichText::new("Remote Work Efficiency by Department").strong());
    let grouped = aggregate::mean_productivity_by_dept_remote(ds, indices);

    let slots: Vec<String> = ds.departments.clone();
    let series = RemoteWorkCategory::ALL
        .iter()
        .map(|&cat| BarSeries {
            name: cat.to_string(),
            color: remote_category_color(cat),
            values: grouped
                .iter()
                .filter(|((_, c), _)| *c == cat)
                .filter_map(|((dept, _), &mean)| slot_of(&slots, dept).map(|s| (s, mean)))
                .collect(),
        })
        .filter(|s| !s.values.is_empty())
        .collect();

    grouped_bar_plot(ui, "productivity_by_dept", slots, series);
}

/// Employee count per job title, split by performance level.
fn performance_count_chart(ui: &mut Ui, ds: &EmployeeDataset, indices: &[usize]) {
    ui.label(RichText::new("Performance Level Distribution by Job Title").strong());
    let grouped = aggregate::count_by_job_performance(ds, indices);
    job_level_count_chart(ui, "performance_count", ds, grouped, level_color);
}

/// Employee count per job title, split by retention-risk level.
fn retention_count_chart(ui: &mut Ui, ds: &EmployeeDataset, indices: &[usize]) {
    ui.label(RichText::new("Employee Count by Retention Risk Level and Job Title").strong());
    let grouped = aggregate::count_by_job_retention(ds, indices);
    job_level_count_chart(ui, "retention_count", ds, grouped, retention_color);
}

fn job_level_count_chart(
    ui: &mut Ui,
    id: &str,
    ds: &EmployeeDataset,
    grouped: BTreeMap<(String, Level), usize>,
    color_of: fn(Level) -> Color32,
) {
    let slots: Vec<String> = ds.job_titles.clone();
    let series = LEVELS
        .iter()
        .map(|&level| BarSeries {
            name: level.to_string(),
            color: color_of(level),
            values: grouped
                .iter()
                .filter(|((_, l), _)| *l == level)
                .filter_map(|((job, _), &n)| slot_of(&slots, job).map(|s| (s, n as f64)))
                .collect(),
        })
        .filter(|s| !s.values.is_empty())
        .collect();

    grouped_bar_plot(ui, id, slots, series);
}

/// Headcount per remote-work category.
fn remote_distribution_chart(ui: &mut Ui, ds: &EmployeeDataset, indices: &[usize]) {
    ui.label(RichText::new("Remote Work Type Distribution").strong());
    let counts = aggregate::count_by_remote_category(ds, indices);

    let slots: Vec<String> = RemoteWorkCategory::ALL.iter().map(|c| c.to_string()).collect();
    let series = RemoteWorkCategory::ALL
        .iter()
        .enumerate()
        .filter_map(|(slot, &cat)| {
            counts.get(&cat).map(|&n| BarSeries {
                name: cat.to_string(),
                color: remote_category_color(cat),
                values: vec![(slot, n as f64)],
            })
        })
        .collect();

    grouped_bar_plot(ui, "remote_distribution", slots, series);
}

/// Mean satisfaction per department, one bar per department.
fn satisfaction_chart(ui: &mut Ui, state: &AppState, ds: &EmployeeDataset, indices: &[usize]) {
    ui.label(RichText::new("Average Employee Satisfaction by Department").strong());
    let means = aggregate::mean_satisfaction_by_department(ds, indices);

    let slots: Vec<String> = ds.departments.clone();
    let series = means
        .into_iter()
        .filter_map(|(dept, mean)| {
            slot_of(&slots, &dept).map(|slot| BarSeries {
                color: state.department_colors.color_for(&dept),
                name: dept,
                values: vec![(slot, mean)],
            })
        })
        .collect();

    grouped_bar_plot(ui, "satisfaction_by_dept", slots, series);
}

/// Mean performance per tenure bin, one line per job title.
fn trend_chart(ui: &mut Ui, state: &AppState, ds: &EmployeeDataset, indices: &[usize]) {
    let trend = aggregate::performance_trend(ds, indices);

    // Regroup the (midpoint, job, mean) rows into one polyline per job.
    let mut by_job: BTreeMap<String, Vec<[f64; 2]>> = BTreeMap::new();
    for point in trend {
        by_job
            .entry(point.job_title)
            .or_default()
            .push([point.years_midpoint, point.mean_performance]);
    }

    Plot::new("performance_trend")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Years at Company")
        .y_axis_label("Performance Score")
        .show(ui, |plot_ui| {
            for (job, mut points) in by_job {
                points.sort_by(|a, b| a[0].total_cmp(&b[0]));
                let line = Line::new(PlotPoints::from(points))
                    .name(&job)
                    .color(state.job_title_colors.color_for(&job))
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}
