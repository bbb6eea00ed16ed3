use eframe::egui;

use happy_atlas::app::HappyAtlasApp;
use happy_atlas::config::DashboardConfig;
use happy_atlas::state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // CatalogUnavailable is the one session-fatal error: abort startup.
    let state = match AppState::new(DashboardConfig::default()) {
        Ok(state) => state,
        Err(e) => {
            log::error!("{e}");
            eprintln!("happy-atlas: {e}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Happy Atlas – World Happiness Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(HappyAtlasApp::new(state)))),
    )
}
