use eframe::egui;
use sheetcards::gui::FlashcardApp;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // An optional sheet URL on the command line takes precedence over the saved one.
    let url_override = std::env::args().nth(1);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Sheetcards")
            .with_inner_size([760.0, 540.0])
            .with_min_inner_size([520.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sheetcards",
        options,
        Box::new(move |cc| match FlashcardApp::new(cc, url_override) {
            Ok(app) => Ok(Box::new(app)),
            Err(e) => {
                log::error!("Failed to start: {}", e);
                Err(Box::new(e))
            }
        }),
    )
}
