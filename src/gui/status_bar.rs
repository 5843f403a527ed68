use eframe::egui;

use super::theme::Palette;

pub struct StatusBar;

impl StatusBar {
    pub fn show(ctx: &egui::Context, status: &str, loading: bool, palette: &Palette) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if loading {
                    ui.add(egui::Spinner::new().color(palette.accent()));
                    ui.label("Loading deck...");
                    ui.separator();
                }
                ui.label(palette.muted(status));
            });
        });
    }
}
