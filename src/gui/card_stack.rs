use eframe::egui;

use super::theme::Theme;
use crate::{
    core::models::Decision,
    view::{
        card::FlavorBar,
        CardArea,
        CardView,
    },
};

const CARD_WIDTH: f32 = 360.0;
const CARD_HEIGHT: f32 = 420.0;

/// Per-card drag offset, dropped whenever a new card is rendered.
#[derive(Debug, Default, Clone, Copy)]
pub struct DragState {
    generation: u64,
    offset: f32,
    released: bool,
}

impl DragState {
    fn sync(&mut self, card: &CardView) {
        if self.generation != card.generation {
            *self = DragState { generation: card.generation, ..Default::default() };
        }
    }
}

/// Draws the card area and returns a decision made by dragging the card
/// past `threshold` points or clicking one of the buttons.
pub fn card_stack(
    ui: &mut egui::Ui,
    area: &CardArea,
    drag: &mut DragState,
    theme: &Theme,
    threshold: f32,
) -> Option<Decision> {
    let mut decision = None;

    ui.vertical_centered(|ui| {
        ui.add_space(16.0);

        match area {
            CardArea::Empty => {
                ui.allocate_space(egui::vec2(CARD_WIDTH, CARD_HEIGHT));
            }
            CardArea::Loading => placeholder(ui, |ui| {
                ui.add(egui::Spinner::new().size(32.0));
                ui.label("Loading dishes...");
            }),
            CardArea::Error(message) => placeholder(ui, |ui| {
                ui.label(egui::RichText::new(message).color(ui.visuals().error_fg_color).size(16.0));
            }),
            CardArea::Card(card) => {
                drag.sync(card);
                decision = draggable_card(ui, card, drag, theme, threshold);
            }
        }

        ui.add_space(16.0);

        let can_decide = matches!(area, CardArea::Card(card) if card.motion.offset == 0.0);
        ui.horizontal(|ui| {
            ui.add_space((ui.available_width() - 220.0).max(0.0) / 2.0);

            let dislike = egui::Button::new(
                egui::RichText::new("✖ Nope").size(18.0).color(theme.dislike(ui.ctx())),
            )
            .min_size(egui::vec2(100.0, 40.0));
            if ui.add_enabled(can_decide, dislike).clicked() {
                decision = Some(Decision::Reject);
            }

            ui.add_space(20.0);

            let like = egui::Button::new(
                egui::RichText::new("♥ Yum").size(18.0).color(theme.like(ui.ctx())),
            )
            .min_size(egui::vec2(100.0, 40.0));
            if ui.add_enabled(can_decide, like).clicked() {
                decision = Some(Decision::Accept);
            }
        });
    });

    decision
}

fn placeholder(ui: &mut egui::Ui, content: impl FnOnce(&mut egui::Ui)) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(CARD_WIDTH, CARD_HEIGHT), egui::Sense::hover());
    ui.scope_builder(egui::UiBuilder::new().max_rect(rect), |ui| {
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(content);
        });
    });
}

fn draggable_card(
    ui: &mut egui::Ui,
    card: &CardView,
    drag: &mut DragState,
    theme: &Theme,
    threshold: f32,
) -> Option<Decision> {
    let (slot, response) = ui.allocate_exact_size(
        egui::vec2(CARD_WIDTH, CARD_HEIGHT),
        egui::Sense::drag(),
    );

    let animating = card.motion.offset != 0.0;
    let mut decision = None;

    if !animating && !drag.released {
        if response.dragged() {
            drag.offset += response.drag_delta().x;
        }
        if response.drag_stopped() {
            if drag.offset.abs() >= threshold {
                decision = Some(if drag.offset > 0.0 { Decision::Accept } else { Decision::Reject });
                drag.released = true;
            } else {
                drag.offset = 0.0;
            }
        }
    }

    let offset = drag.offset + card.motion.offset * CARD_WIDTH;
    let tilt = (offset / CARD_WIDTH).clamp(-1.0, 1.0);
    let rect = slot.translate(egui::vec2(offset, 0.0));

    ui.scope_builder(egui::UiBuilder::new().max_rect(rect), |ui| {
        ui.set_opacity(card.motion.opacity);

        let stamp = if tilt > 0.2 {
            Some(("YUM", theme.like(ui.ctx())))
        } else if tilt < -0.2 {
            Some(("NOPE", theme.dislike(ui.ctx())))
        } else {
            None
        };

        egui::Frame::group(ui.style())
            .fill(theme.card_fill(ui.ctx()))
            .corner_radius(egui::CornerRadius::same(12))
            .inner_margin(egui::Margin::same(16))
            .show(ui, |ui| {
                ui.set_min_size(rect.size() - egui::vec2(32.0, 32.0));
                card_content(ui, card, theme, stamp);
            });
    });

    if response.hovered() && !animating {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
    }

    decision
}

fn card_content(
    ui: &mut egui::Ui,
    card: &CardView,
    theme: &Theme,
    stamp: Option<(&str, egui::Color32)>,
) {
    ui.horizontal(|ui| {
        ui.heading(egui::RichText::new(&card.name).strong());
        if let Some((text, color)) = stamp {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(text).size(20.0).strong().color(color));
            });
        }
    });

    if let Some(cuisine) = &card.cuisine {
        ui.label(egui::RichText::new(cuisine).italics().color(theme.accent(ui.ctx())));
    }

    ui.add_space(8.0);
    ui.label(&card.description);
    ui.add_space(8.0);

    if !card.tags.is_empty() {
        ui.horizontal_wrapped(|ui| {
            for tag in &card.tags {
                ui.small(egui::RichText::new(format!("#{tag}")).color(theme.accent(ui.ctx())));
            }
        });
        ui.add_space(8.0);
    }

    for bar in &card.flavors {
        flavor_bar(ui, bar, theme);
    }
}

pub fn flavor_bar(ui: &mut egui::Ui, bar: &FlavorBar, theme: &Theme) {
    ui.horizontal(|ui| {
        ui.add_sized([60.0, 18.0], egui::Label::new(bar.flavor.label()));
        ui.add(
            egui::ProgressBar::new(bar.width_fraction())
                .fill(theme.flavor(ui.ctx(), bar.flavor))
                .text(bar.label())
                .desired_width(ui.available_width()),
        );
    });
}
