//! View-models the GUI draws. Nothing in here touches egui.

pub mod analysis;
pub mod card;

pub use analysis::{
    AnalysisPanel,
    AnalysisPresenter,
};
pub use card::{
    CardArea,
    CardMotion,
    CardStack,
    CardView,
};
