use eframe::egui;

use crate::data::view::DashboardView;
use crate::state::AppState;
use crate::ui::{dashboard, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WeatherDashboardApp {
    pub state: AppState,
}

impl WeatherDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for WeatherDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // Every interaction above feeds a fresh view for this frame.
        let selection = self.state.selection();
        let view = self
            .state
            .dataset
            .as_ref()
            .map(|ds| DashboardView::compute(ds, &selection));

        // ---- Right side panel: rankings ----
        egui::SidePanel::right("ranking_panel")
            .default_width(340.0)
            .resizable(true)
            .show(ctx, |ui| {
                dashboard::ranking_panel(ui, &mut self.state, view.as_ref());
            });

        // ---- Central panel: cards and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard::central_panel(ui, view.as_ref(), &selection);
        });
    }
}
