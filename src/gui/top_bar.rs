use eframe::egui;

use super::actions::{
    ActionQueue,
    UiAction,
};
use crate::{
    core::TabList,
    persistence::ThemeKey,
};

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        url_input: &mut String,
        tabs: &TabList,
        theme: ThemeKey,
        actions: &mut ActionQueue,
    ) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label("Sheet");
                let response = ui.add(
                    egui::TextEdit::singleline(url_input)
                        .hint_text("Paste a published Google Sheet URL")
                        .desired_width(ui.available_width() - 160.0),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                if ui.button("Connect").clicked() || submitted {
                    actions.push(UiAction::Connect);
                }
                if ui.button("Refresh").clicked() {
                    actions.push(UiAction::Refresh);
                }
            });

            ui.horizontal(|ui| {
                ui.label("Deck");
                Self::show_deck_select(ui, tabs, actions);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_theme_select(ui, theme, actions);
                });
            });
            ui.add_space(4.0);
        });
    }

    fn show_deck_select(ui: &mut egui::Ui, tabs: &TabList, actions: &mut ActionQueue) {
        let selected_text = match tabs.selected_tab() {
            Some(tab) => tab.display_name.clone(),
            None if tabs.tabs.is_empty() => "No tabs found".to_string(),
            None => String::new(),
        };

        ui.add_enabled_ui(tabs.enabled, |ui| {
            egui::ComboBox::from_id_salt("deck_select")
                .selected_text(selected_text)
                .width(240.0)
                .show_ui(ui, |ui| {
                    for tab in &tabs.tabs {
                        let is_selected = tabs.selected.as_deref() == Some(tab.tab_id.as_str());
                        if ui.selectable_label(is_selected, &tab.display_name).clicked()
                            && !is_selected
                        {
                            actions.push(UiAction::SwitchTab(tab.tab_id.clone()));
                        }
                    }
                });
        });
    }

    fn show_theme_select(ui: &mut egui::Ui, theme: ThemeKey, actions: &mut ActionQueue) {
        egui::ComboBox::from_id_salt("theme_select").selected_text(theme.label()).show_ui(
            ui,
            |ui| {
                for key in ThemeKey::ALL {
                    if ui.selectable_label(key == theme, key.label()).clicked() && key != theme {
                        actions.push(UiAction::SetTheme(key));
                    }
                }
            },
        );
        ui.label("Theme");
    }
}
