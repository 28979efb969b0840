mod activity_log;
mod analysis_panel;
pub mod app;
mod card_stack;
pub mod modal;
pub mod settings;
pub mod theme;
mod top_bar;

pub use app::DishSwipeApp;
