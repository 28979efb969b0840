use eframe::egui;

use crate::logging::LogSink;

/// Collapsible list of background failures. Returns `true` if the user
/// asked to clear it.
pub fn activity_log(ctx: &egui::Context, log: &LogSink) -> bool {
    let mut clear = false;

    egui::TopBottomPanel::bottom("activity_log").resizable(false).show(ctx, |ui| {
        egui::CollapsingHeader::new(format!("Activity ({})", log.len()))
            .id_salt("activity_log_header")
            .default_open(false)
            .show(ui, |ui| {
                if log.is_empty() {
                    ui.weak("Nothing to report");
                    return;
                }

                egui::ScrollArea::vertical().max_height(120.0).stick_to_bottom(true).show(ui, |ui| {
                    for entry in log.entries() {
                        ui.horizontal(|ui| {
                            ui.monospace(entry.timestamp());
                            ui.weak(entry.task.label());
                            ui.label(&entry.message);
                        });
                    }
                });

                if ui.small_button("Clear").clicked() {
                    clear = true;
                }
            });
    });

    clear
}
