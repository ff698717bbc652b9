mod app;
mod color;
mod config;
mod data;
mod error;
mod pipeline;
mod state;
mod ui;

use std::path::Path;

use app::PumaAtlasApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional JSON config as the first argument; defaults otherwise.
    let (config, notice) = match std::env::args_os().nth(1) {
        Some(path) => match DashboardConfig::from_path(Path::new(&path)) {
            Ok(config) => (config, None),
            Err(e) => {
                log::error!("Failed to load config: {e:#}");
                (
                    DashboardConfig::default(),
                    Some(format!("Config not loaded, using defaults: {e:#}")),
                )
            }
        },
        None => (DashboardConfig::default(), None),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Puma concolor en Costa Rica",
        options,
        Box::new(move |_cc| Ok(Box::new(PumaAtlasApp::new(config, notice)))),
    )
}
