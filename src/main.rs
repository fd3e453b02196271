use std::path::PathBuf;

use eframe::egui;
use rusty_dashboard::app::DashboardApp;
use rusty_dashboard::config::DashboardConfig;
use rusty_dashboard::data::source::FileSource;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_env();
    log::debug!("Starting with {config:?}");

    let mut app = DashboardApp::new(config);
    // A path argument opens that file instead of fetching the endpoint.
    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => app.start_load(Box::new(FileSource { path })),
        None => app.reload_from_url(),
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Dashboard – Insights",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
