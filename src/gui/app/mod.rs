mod modals;

use std::{
    sync::Arc,
    time::Instant,
};

use eframe::egui;
use modals::Modals;
use tokio::runtime::Runtime;
use tracing::{
    error,
    info,
};

use super::{
    activity_log::activity_log,
    analysis_panel::analysis_window,
    card_stack::{
        card_stack,
        DragState,
    },
    modal::{
        confirmation_dialog,
        ModalResult,
    },
    settings::{
        SettingsData,
        SETTINGS_FILE,
    },
    theme::{
        set_theme,
        Theme,
    },
    top_bar::{
        TopBar,
        TopBarAction,
    },
};
use crate::{
    api::HttpDishApi,
    core::{
        models::Decision,
        tasks::RepaintHook,
    },
    persistence::save_json,
    session::SwipeController,
};

pub struct DishSwipeApp {
    runtime: Runtime,

    // Configuration
    settings_data: SettingsData,

    // Session
    controller: Option<SwipeController>,
    setup_error: Option<String>,

    // UI State
    theme: Theme,
    drag: DragState,
    modals: Modals,
    repaint: RepaintHook,
}

impl DishSwipeApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings_data: SettingsData,
        runtime: Runtime,
    ) -> Self {
        let ctx = cc.egui_ctx.clone();
        let repaint: RepaintHook = Arc::new(move || ctx.request_repaint());

        let mut app = Self {
            runtime,
            settings_data,
            controller: None,
            setup_error: None,
            theme: Theme::tokyo(),
            drag: DragState::default(),
            modals: Modals::default(),
            repaint,
        };

        set_theme(&cc.egui_ctx, &app.theme, app.settings_data.dark_mode);
        app.start_session();
        app
    }

    /// Throws away the current session, if any, and starts a fresh one.
    fn start_session(&mut self) {
        self.drag = DragState::default();

        let api = match HttpDishApi::new(&self.settings_data.server_url) {
            Ok(api) => api,
            Err(e) => {
                error!("Cannot start session: {e}");
                self.controller = None;
                self.setup_error = Some(e.to_string());
                return;
            }
        };

        info!("Starting session against {}", api.base_url());
        let mut controller = SwipeController::new(
            Arc::new(api),
            self.runtime.handle().clone(),
            self.settings_data.session_settings(),
        );
        controller.set_repaint(Arc::clone(&self.repaint));
        controller.start();

        self.controller = Some(controller);
        self.setup_error = None;
    }

    fn decide(&mut self, decision: Decision) {
        if let Some(controller) = &mut self.controller {
            controller.decide(decision, Instant::now());
        }
    }

    fn save_settings(&self) {
        if let Err(e) = save_json(&self.settings_data, SETTINGS_FILE) {
            error!("Failed to save settings: {e}");
        }
    }

    fn apply_settings(&mut self, ctx: &egui::Context, settings: SettingsData) {
        let restart = settings.server_url != self.settings_data.server_url
            || settings.session_settings() != self.settings_data.session_settings();

        self.settings_data = settings;
        self.save_settings();
        set_theme(ctx, &self.theme, self.settings_data.dark_mode);

        if restart {
            self.start_session();
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() || self.modals.settings.is_open() {
            return;
        }

        let (left, right) = ctx.input(|i| {
            (i.key_pressed(egui::Key::ArrowLeft), i.key_pressed(egui::Key::ArrowRight))
        });

        if left {
            self.decide(Decision::Reject);
        } else if right {
            self.decide(Decision::Accept);
        }
    }
}

impl eframe::App for DishSwipeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(controller) = &mut self.controller {
            controller.poll(Instant::now());
        }
        if self.controller.as_ref().is_some_and(SwipeController::reset_confirmed) {
            self.start_session();
        }

        if let Some(action) = TopBar::show(ctx, self.controller.as_ref()) {
            match action {
                TopBarAction::ShowProfile => {
                    if let Some(controller) = &mut self.controller {
                        controller.show_profile();
                    }
                }
                TopBarAction::OpenSettings => {
                    self.modals.settings.open_settings(self.settings_data.clone())
                }
                TopBarAction::ResetSession => self.modals.reset.open(),
            }
        }

        self.handle_keys(ctx);

        if let Some(controller) = &mut self.controller {
            if activity_log(ctx, controller.log()) {
                controller.clear_log();
            }
        }

        let mut decision = None;
        egui::CentralPanel::default().show(ctx, |ui| match (&self.controller, &self.setup_error) {
            (Some(controller), _) => {
                decision = card_stack(
                    ui,
                    controller.card_area(),
                    &mut self.drag,
                    &self.theme,
                    self.settings_data.swipe_threshold,
                );
            }
            (None, Some(problem)) => {
                ui.centered_and_justified(|ui| {
                    ui.colored_label(
                        ui.visuals().error_fg_color,
                        format!("Cannot reach the dish service: {problem}\nCheck the server URL in Settings."),
                    );
                });
            }
            (None, None) => {}
        });
        if let Some(decision) = decision {
            self.decide(decision);
        }

        if let Some(controller) = &mut self.controller {
            if controller.analysis().is_open()
                && analysis_window(ctx, controller.analysis().panel(), &self.theme)
            {
                controller.dismiss_profile();
            }
        }

        if let Some(settings) = self.modals.settings.show(ctx) {
            self.apply_settings(ctx, settings);
        }

        if let Some(ModalResult::Confirmed(())) = confirmation_dialog(
            &mut self.modals.reset,
            ctx,
            "Forget every liked dish and start over?",
        ) {
            if let Some(controller) = &mut self.controller {
                controller.request_reset();
            }
        }

        if self.controller.as_ref().is_some_and(SwipeController::is_animating) {
            ctx.request_repaint();
        }
    }
}
