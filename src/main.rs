mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;
mod views;

use app::CareMarketApp;
use clap::Parser;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();
    let config = AppConfig::parse();
    log::info!("Starting with source {}", config.source);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Care Market Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(CareMarketApp::new(&config)))),
    )
}
