mod app;
mod data;
mod state;
mod theme;
mod ui;

use app::EvDashboardApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "EV Analytics Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(EvDashboardApp::new(cc)))),
    )
}
