use eframe::egui;

use crate::config::AppConfig;
use crate::state::{AppState, Tab};
use crate::ui::{panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CareMarketApp {
    pub state: AppState,
}

impl CareMarketApp {
    /// Build the app and perform the initial (blocking) load.
    pub fn new(config: &AppConfig) -> Self {
        let mut state = AppState::new(config.data_source(), config.timeout());
        state.load();
        Self { state }
    }
}

impl eframe::App for CareMarketApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: selected view ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.tab {
            Tab::Overview => tables::overview_tab(ui, &self.state),
            Tab::Ratings => tables::ratings_tab(ui, &self.state),
            Tab::Activity => plot::activity_chart(ui, &self.state),
            Tab::Map => plot::location_map(ui, &self.state),
        });
    }
}
