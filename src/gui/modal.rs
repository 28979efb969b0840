use eframe::egui;

#[derive(Debug, Clone)]
pub enum ModalResult<T> {
    Confirmed(T),
    Cancelled,
}

#[derive(Clone)]
pub struct ModalConfig {
    pub resizable: bool,
    pub min_width: f32,
    /// Dim the rest of the window and close when it is clicked.
    pub show_overlay: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self { resizable: false, min_width: 320.0, show_overlay: true }
    }
}

/// A centered window holding editable data of type `T` until the content
/// closure confirms or cancels it.
pub struct Modal<T> {
    open: bool,
    title: String,
    data: T,
    config: ModalConfig,
}

impl<T> Modal<T> {
    pub fn new_with_data(title: impl Into<String>, data: T) -> Self {
        Self { open: false, title: title.into(), data, config: ModalConfig::default() }
    }

    pub fn with_config(mut self, config: ModalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    pub fn show<F>(&mut self, ctx: &egui::Context, content: F) -> Option<ModalResult<T>>
    where
        F: FnOnce(&mut egui::Ui, &mut T) -> Option<ModalResult<T>>,
    {
        if !self.open {
            return None;
        }

        let outside_click = self.config.show_overlay && show_overlay(ctx);

        let data = &mut self.data;
        let inner = egui::Window::new(&self.title)
            .collapsible(false)
            .resizable(self.config.resizable)
            .min_width(self.config.min_width)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| content(ui, data))
            .and_then(|response| response.inner)
            .flatten();

        let result = match inner {
            Some(result) => Some(result),
            None if outside_click => Some(ModalResult::Cancelled),
            None => None,
        };

        if result.is_some() {
            self.open = false;
        }
        result
    }
}

fn show_overlay(ctx: &egui::Context) -> bool {
    egui::Area::new(egui::Id::new("modal_overlay"))
        .order(egui::Order::Background)
        .fixed_pos(egui::Pos2::ZERO)
        .show(ctx, |ui| {
            let screen_rect = ctx.screen_rect();
            let (_rect, response) = ui.allocate_exact_size(screen_rect.size(), egui::Sense::click());
            ui.painter().rect_filled(screen_rect, 0.0, egui::Color32::from_black_alpha(100));
            response.clicked()
        })
        .inner
}

/// Yes/No dialog; `Confirmed(())` when the user agreed.
pub fn confirmation_dialog(
    modal: &mut Modal<()>,
    ctx: &egui::Context,
    message: &str,
) -> Option<ModalResult<()>> {
    modal.show(ctx, |ui, _| {
        ui.label(message);
        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button("Yes").clicked() {
                Some(ModalResult::Confirmed(()))
            } else if ui.button("No").clicked() {
                Some(ModalResult::Cancelled)
            } else {
                None
            }
        })
        .inner
    })
}
