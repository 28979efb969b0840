use eframe::egui;
use reqwest::Url;

use super::data::SettingsData;
use crate::gui::modal::{
    Modal,
    ModalConfig,
    ModalResult,
};

#[derive(Clone, Default)]
pub struct SettingsModalData {
    pub settings: SettingsData,
    pub original_settings: SettingsData,
}

impl SettingsModalData {
    pub fn is_dirty(&self) -> bool {
        self.settings != self.original_settings
    }

    /// Why the edited server URL cannot be used, if it cannot.
    pub fn url_problem(&self) -> Option<String> {
        match Url::parse(self.settings.server_url.trim()) {
            Ok(url) if url.cannot_be_a_base() => Some("URL cannot carry a path".to_string()),
            Ok(_) => None,
            Err(e) => Some(e.to_string()),
        }
    }
}

pub struct SettingsModal {
    modal: Modal<SettingsModalData>,
}

impl SettingsModal {
    pub fn new() -> Self {
        let config = ModalConfig { min_width: 420.0, ..Default::default() };

        Self {
            modal: Modal::new_with_data("Settings", SettingsModalData::default()).with_config(config),
        }
    }

    pub fn open_settings(&mut self, current_settings: SettingsData) {
        let data = self.modal.data_mut();
        data.settings = current_settings.clone();
        data.original_settings = current_settings;
        self.modal.open();
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    /// Returns the new settings once the user saves them.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<SettingsData> {
        let result = self.modal.show(ctx, |ui, data| {
            egui::Grid::new("settings_grid").num_columns(2).spacing([12.0, 8.0]).show(ui, |ui| {
                ui.label("Server URL");
                ui.text_edit_singleline(&mut data.settings.server_url);
                ui.end_row();

                ui.label("Dishes to preload");
                ui.add(egui::DragValue::new(&mut data.settings.prefetch_target).range(1..=5));
                ui.end_row();

                ui.label("Swipe duration");
                ui.add(
                    egui::DragValue::new(&mut data.settings.swipe_duration_ms)
                        .range(100..=1500)
                        .suffix(" ms"),
                );
                ui.end_row();

                ui.label("Swipe distance");
                ui.add(egui::Slider::new(&mut data.settings.swipe_threshold, 40.0..=300.0).suffix(" pt"));
                ui.end_row();

                ui.label("Dark mode");
                ui.checkbox(&mut data.settings.dark_mode, "");
                ui.end_row();
            });

            let url_problem = data.url_problem();
            if let Some(problem) = &url_problem {
                ui.colored_label(ui.visuals().error_fg_color, format!("Invalid URL: {problem}"));
            } else if data.is_dirty() {
                ui.horizontal(|ui| {
                    ui.colored_label(ui.visuals().warn_fg_color, "⚠");
                    ui.label("Saving starts a new swipe session");
                });
            }

            ui.separator();

            ui.horizontal(|ui| {
                let can_save = data.is_dirty() && url_problem.is_none();

                if ui.add_enabled(can_save, egui::Button::new("Save")).clicked() {
                    data.settings.server_url = data.settings.server_url.trim().to_string();
                    return Some(ModalResult::Confirmed(data.clone()));
                }
                if ui.button("Restore Default").clicked() {
                    data.settings = SettingsData::new();
                }
                if ui.button("Close").clicked() {
                    return Some(ModalResult::Cancelled);
                }
                None
            })
            .inner
        });

        match result {
            Some(ModalResult::Confirmed(data)) => Some(data.settings),
            _ => None,
        }
    }
}

impl Default for SettingsModal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirty_tracking_and_url_check() {
        let mut data = SettingsModalData {
            settings: SettingsData::new(),
            original_settings: SettingsData::new(),
        };
        assert!(!data.is_dirty());
        assert!(data.url_problem().is_none());

        data.settings.server_url = "localhost".to_string();
        assert!(data.is_dirty());
        assert!(data.url_problem().is_some());

        data.settings.server_url = "data:text/plain,hi".to_string();
        assert!(data.url_problem().is_some());
    }
}
