pub mod errors;
pub mod models;
pub mod tasks;

pub use errors::{
    DishSwipeError,
    FetchError,
};
pub use models::{
    Decision,
    Dish,
};
