#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

use project_timeline::app::TimelineApp;
use project_timeline::config::TimelineSettings;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let settings_path = TimelineSettings::default_path();
    let settings = TimelineSettings::load_or_default(&settings_path);
    tracing::info!(path = %settings_path.display(), "settings loaded");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Project Timeline"),
        ..Default::default()
    };

    eframe::run_native(
        "Project Timeline",
        options,
        Box::new(|cc| Ok(Box::new(TimelineApp::new(cc, settings, settings_path)))),
    )
    .map_err(|e| anyhow!("failed to run the timeline window: {e}"))
}
