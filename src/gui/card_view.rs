use eframe::egui;

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    theme::Palette,
};
use crate::core::session::CardView;

pub fn show(
    ctx: &egui::Context,
    view: &CardView<'_>,
    palette: &Palette,
    actions: &mut ActionQueue,
) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            ui.label(palette.muted(&view.position));
            ui.add_space(8.0);

            egui::Frame::new()
                .fill(palette.raised())
                .stroke(egui::Stroke::new(1.0, palette.border()))
                .corner_radius(10.0)
                .inner_margin(24.0)
                .show(ui, |ui| {
                    ui.set_min_size(egui::vec2(ui.available_width(), 220.0));
                    ui.vertical_centered(|ui| {
                        ui.add(egui::Label::new(palette.front_text(view.front)).wrap());
                        ui.add_space(16.0);
                        if view.revealed {
                            ui.separator();
                            ui.add_space(8.0);
                            ui.add(egui::Label::new(palette.back_text(view.back)).wrap());
                        } else {
                            ui.label(palette.muted("Press Space or Flip to reveal the answer"));
                        }
                    });
                });

            ui.add_space(16.0);
            ui.horizontal(|ui| {
                // Center the row of buttons under the card.
                let row_width = 4.0 * 96.0 + 3.0 * ui.spacing().item_spacing.x;
                ui.add_space(((ui.available_width() - row_width) / 2.0).max(0.0));

                if ui.add(nav_button("◀ Previous")).clicked() {
                    actions.push(UiAction::Previous);
                }
                let flip_text = if view.revealed { "Hide" } else { "Flip" };
                if ui.add(nav_button(flip_text)).clicked() {
                    actions.push(UiAction::Flip);
                }
                if ui.add(nav_button("Next ▶")).clicked() {
                    actions.push(UiAction::Next);
                }
                if ui.add(nav_button("Shuffle")).clicked() {
                    actions.push(UiAction::Shuffle);
                }
            });
        });
    });

    handle_shortcuts(ctx, actions);
}

fn nav_button(text: &str) -> egui::Button<'_> {
    egui::Button::new(text).min_size(egui::vec2(96.0, 32.0))
}

fn handle_shortcuts(ctx: &egui::Context, actions: &mut ActionQueue) {
    // Typing in the URL box must not flip cards.
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        if i.key_pressed(egui::Key::Space) {
            actions.push(UiAction::Flip);
        }
        if i.key_pressed(egui::Key::ArrowRight) {
            actions.push(UiAction::Next);
        }
        if i.key_pressed(egui::Key::ArrowLeft) {
            actions.push(UiAction::Previous);
        }
    });
}
