use eframe::egui;

use super::{
    card_stack::flavor_bar,
    theme::Theme,
};
use crate::view::{
    analysis::{
        ProfileView,
        RecommendationView,
        ANALYSIS_ERROR_MESSAGE,
        NO_ANALYSIS_MESSAGE,
    },
    AnalysisPanel,
};

/// Shows the taste profile window. Returns `true` when the user closed it.
pub fn analysis_window(ctx: &egui::Context, panel: &AnalysisPanel, theme: &Theme) -> bool {
    let mut open = true;

    egui::Window::new("Taste Profile")
        .open(&mut open)
        .default_width(380.0)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match panel {
                AnalysisPanel::Hidden => {}
                AnalysisPanel::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading your taste profile...");
                    });
                }
                AnalysisPanel::NotEnoughData => {
                    ui.label(NO_ANALYSIS_MESSAGE);
                }
                AnalysisPanel::Failed => {
                    ui.colored_label(ui.visuals().error_fg_color, ANALYSIS_ERROR_MESSAGE);
                }
                AnalysisPanel::Ready { profile, recommendations } => {
                    if let Some(profile) = profile {
                        profile_section(ui, profile, theme);
                    }
                    if !recommendations.is_empty() {
                        ui.separator();
                        recommendations_section(ui, recommendations, theme);
                    }
                }
            });
        });

    !open
}

fn profile_section(ui: &mut egui::Ui, profile: &ProfileView, theme: &Theme) {
    ui.horizontal(|ui| {
        ui.heading("Your Taste");
        egui::Frame::new()
            .fill(theme.accent(ui.ctx()))
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::symmetric(8, 2))
            .show(ui, |ui| {
                ui.label(egui::RichText::new(&profile.foodie_type).strong().color(egui::Color32::BLACK));
            });
    });

    ui.small(&profile.foodie_tag);
    ui.add_space(6.0);

    if !profile.summary.is_empty() {
        ui.label(&profile.summary);
        ui.add_space(6.0);
    }

    for bar in &profile.metrics {
        flavor_bar(ui, bar, theme);
    }

    if !profile.cuisines.is_empty() {
        ui.add_space(6.0);
        ui.label(format!("Favourite cuisines: {}", profile.cuisines.join(", ")));
    }
}

fn recommendations_section(ui: &mut egui::Ui, recommendations: &[RecommendationView], theme: &Theme) {
    ui.heading("Recommended for you");

    for recommendation in recommendations {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(&recommendation.name).strong());
            ui.label(&recommendation.description);
            ui.horizontal_wrapped(|ui| {
                for chip in &recommendation.chips {
                    ui.small(egui::RichText::new(chip.chip()).color(theme.flavor(ui.ctx(), chip.flavor)));
                }
            });
        });
    }
}
