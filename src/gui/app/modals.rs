use crate::gui::{
    modal::Modal,
    settings::SettingsModal,
};

pub struct Modals {
    pub settings: SettingsModal,
    pub reset: Modal<()>,
}

impl Default for Modals {
    fn default() -> Self {
        Self { settings: SettingsModal::new(), reset: Modal::new_with_data("Reset Session", ()) }
    }
}
