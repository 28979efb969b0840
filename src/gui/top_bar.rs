use eframe::egui::{
    self,
    containers,
};

use crate::session::SwipeController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopBarAction {
    ShowProfile,
    OpenSettings,
    ResetSession,
}

pub struct TopBar;

impl TopBar {
    pub fn show(ctx: &egui::Context, controller: Option<&SwipeController>) -> Option<TopBarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);

                ui.menu_button("Session", |ui| {
                    if ui.button("Taste Profile").clicked() {
                        action = Some(TopBarAction::ShowProfile);
                    }
                    if ui.button("Reset Session").clicked() {
                        action = Some(TopBarAction::ResetSession);
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                if ui.button("Settings").clicked() {
                    action = Some(TopBarAction::OpenSettings);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(controller) = controller {
                        Self::show_status(ui, controller);
                    }
                });
            });
        });

        action
    }

    fn show_status(ui: &mut egui::Ui, controller: &SwipeController) {
        let queued = controller.queue().len();
        let target = controller.queue().target();

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 6.0;
            ui.small(format!("♥ {}", controller.liked_count()))
                .on_hover_text("Dishes liked this session");
            ui.small(format!("{queued}/{target} ready"))
                .on_hover_text("Dishes preloaded and waiting");
        });
    }
}
