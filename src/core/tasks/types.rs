use crate::{
    core::{
        errors::FetchError,
        models::{
            Dish,
            DishFetch,
            Feedback,
            Profile,
            ResetOutcome,
        },
    },
    session::queue::FillOutcome,
};

/// Which background job a report belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    InitialDish,
    NextDish,
    Prefetch,
    Feedback,
    Profile,
    Reset,
}

impl TaskKind {
    pub fn label(self) -> &'static str {
        match self {
            TaskKind::InitialDish => "initial_dish",
            TaskKind::NextDish => "next_dish",
            TaskKind::Prefetch => "prefetch",
            TaskKind::Feedback => "feedback",
            TaskKind::Profile => "profile",
            TaskKind::Reset => "reset",
        }
    }
}

#[derive(Debug)]
pub enum TaskResult {
    InitialDish(Result<DishFetch, FetchError>),
    NextDish(Result<DishFetch, FetchError>),

    /// One dish accepted by a running fill cycle. Progress only, always
    /// followed by a `PrefetchFinished` from the same task.
    Prefetched(Dish),
    PrefetchFinished(FillOutcome),

    Feedback { dish_name: String, result: Result<Feedback, FetchError> },
    ProfileLoaded(Result<Profile, FetchError>),
    SessionReset(Result<ResetOutcome, FetchError>),

    Crashed { task: TaskKind, error: String },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::InitialDish(_) => "initial_dish",
            TaskResult::NextDish(_) => "next_dish",
            TaskResult::Prefetched(_) => "prefetch_progress",
            TaskResult::PrefetchFinished(_) => "prefetch",
            TaskResult::Feedback { .. } => "feedback",
            TaskResult::ProfileLoaded(_) => "profile",
            TaskResult::SessionReset(_) => "reset",
            TaskResult::Crashed { .. } => "crashed",
        }
    }

    /// Every spawned task ends with exactly one final report.
    pub fn is_final(&self) -> bool {
        !matches!(self, TaskResult::Prefetched(_))
    }
}
