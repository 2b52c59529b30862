use std::time::{Duration, Instant};

use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StaffboardApp {
    pub state: AppState,
}

impl StaffboardApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for StaffboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Refresh driver: reload when the clock fires (the first
        // frame counts as due, so startup triggers the initial load) ----
        let now = Instant::now();
        if self.state.refresh_due(now) {
            self.state.reload();
        }
        // Schedule a repaint for the next due time so the timer fires
        // even without user input.
        let remaining = self
            .state
            .last_refresh
            .map(|at| {
                self.state
                    .config
                    .refresh_interval()
                    .saturating_sub(now.duration_since(at))
            })
            .unwrap_or(Duration::ZERO);
        ctx.request_repaint_after(remaining);

        // ---- Top panel: menu / status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters and alerts ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, charts, details table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    charts::dashboard(ui, &self.state);
                    ui.add_space(8.0);
                    table::details_table(ui, &self.state);
                });
        });
    }
}
