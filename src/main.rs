use std::path::PathBuf;

use anyhow::{anyhow, Context};
use eframe::egui;
use weather_dashboard::app::WeatherDashboardApp;
use weather_dashboard::data;
use weather_dashboard::state::AppState;

/// Dataset opened when no path is given on the command line.
const DEFAULT_DATASET: &str = "weather.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET));
    let dataset = data::loader::load_file(&path).context("startup dataset could not be loaded")?;
    let state = AppState::with_dataset(dataset, path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([900.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Weather Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(WeatherDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("UI terminated: {e}"))
}
