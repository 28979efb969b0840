//! Client side of the dish service.
//!
//! | Endpoint            | Purpose                                  |
//! |---------------------|------------------------------------------|
//! | `GET /random-dish`  | one random dish, or an exhaustion signal |
//! | `GET /like/{name}`  | record a like, may return insights       |
//! | `GET /profile`      | liked dishes and recommendations         |
//! | `GET /reset-session`| drop the server side session             |
use futures::future::BoxFuture;

use crate::core::{
    errors::FetchError,
    models::{
        DishFetch,
        Feedback,
        Profile,
        ResetOutcome,
    },
};

pub mod http;
#[cfg(test)]
pub mod testing;
pub mod types;

pub use http::HttpDishApi;

pub trait DishApi: Send + Sync {
    fn random_dish(&self) -> BoxFuture<'_, Result<DishFetch, FetchError>>;

    fn like<'a>(&'a self, dish_name: &'a str) -> BoxFuture<'a, Result<Feedback, FetchError>>;

    fn profile(&self) -> BoxFuture<'_, Result<Profile, FetchError>>;

    fn reset_session(&self) -> BoxFuture<'_, Result<ResetOutcome, FetchError>>;
}
