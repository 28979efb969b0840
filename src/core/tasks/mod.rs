mod manager;
pub mod types;

pub use manager::{
    RepaintHook,
    TaskManager,
    TaskSender,
};
pub use types::{
    TaskKind,
    TaskResult,
};
