mod app;
mod buffer;
mod command;
mod entry;
mod error;
mod prefs;
mod preview;
mod scanner;
mod store;

use app::SlowJournalApp;
use eframe::NativeOptions;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 600.0])
            .with_min_inner_size([480.0, 320.0])
            .with_title("journal"),
        ..Default::default()
    };
    eframe::run_native("journal", options, Box::new(|cc| {
        slowcore::SlowTheme::default().apply(&cc.egui_ctx);
        Box::new(SlowJournalApp::new(cc))
    }))
}
