use std::{
    collections::VecDeque,
    sync::{
        atomic::{
            AtomicUsize,
            Ordering,
        },
        Mutex,
    },
};

use futures::{
    future::BoxFuture,
    FutureExt,
};

use super::DishApi;
use crate::core::{
    errors::FetchError,
    models::{
        Dish,
        DishFetch,
        Feedback,
        FlavorProfile,
        Profile,
        ResetOutcome,
        NO_DESCRIPTION,
    },
};

pub fn dish(name: &str) -> Dish {
    Dish {
        name: name.to_string(),
        description: NO_DESCRIPTION.to_string(),
        cuisine: None,
        tags: Vec::new(),
        flavor: FlavorProfile::default(),
    }
}

pub fn flavored(name: &str, spicy: f64, sweet: f64, creamy: f64) -> Dish {
    Dish { flavor: FlavorProfile { spicy, sweet, creamy }, ..dish(name) }
}

/// In-memory dish service answering from scripted replies.
///
/// Once a script runs dry the service answers with its default: exhaustion
/// for dishes, a plain success for likes, an empty profile and a confirmed
/// reset.
#[derive(Default)]
pub struct ScriptedApi {
    dishes: Mutex<VecDeque<Result<DishFetch, FetchError>>>,
    likes: Mutex<VecDeque<Result<Feedback, FetchError>>>,
    profiles: Mutex<VecDeque<Result<Profile, FetchError>>>,
    resets: Mutex<VecDeque<Result<ResetOutcome, FetchError>>>,
    liked_names: Mutex<Vec<String>>,
    dish_calls: AtomicUsize,
    profile_calls: AtomicUsize,
    reset_calls: AtomicUsize,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one successful reply per name.
    pub fn with_dishes(self, names: &[&str]) -> Self {
        for name in names {
            self.push_dish(Ok(DishFetch::Dish(dish(name))));
        }
        self
    }

    pub fn push_dish(&self, reply: Result<DishFetch, FetchError>) {
        self.dishes.lock().unwrap().push_back(reply);
    }

    pub fn push_like(&self, reply: Result<Feedback, FetchError>) {
        self.likes.lock().unwrap().push_back(reply);
    }

    pub fn push_profile(&self, reply: Result<Profile, FetchError>) {
        self.profiles.lock().unwrap().push_back(reply);
    }

    pub fn push_reset(&self, reply: Result<ResetOutcome, FetchError>) {
        self.resets.lock().unwrap().push_back(reply);
    }

    pub fn dish_calls(&self) -> usize {
        self.dish_calls.load(Ordering::SeqCst)
    }

    pub fn like_calls(&self) -> usize {
        self.liked_names.lock().unwrap().len()
    }

    pub fn liked_names(&self) -> Vec<String> {
        self.liked_names.lock().unwrap().clone()
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    pub fn reset_calls(&self) -> usize {
        self.reset_calls.load(Ordering::SeqCst)
    }
}

impl DishApi for ScriptedApi {
    fn random_dish(&self) -> BoxFuture<'_, Result<DishFetch, FetchError>> {
        self.dish_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.dishes.lock().unwrap().pop_front().unwrap_or(Ok(DishFetch::Exhausted));
        async move { reply }.boxed()
    }

    fn like<'a>(&'a self, dish_name: &'a str) -> BoxFuture<'a, Result<Feedback, FetchError>> {
        self.liked_names.lock().unwrap().push(dish_name.to_string());
        let reply = self.likes.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(Feedback {
                accepted: true,
                message: Some(format!("Liked {dish_name}")),
                ..Feedback::default()
            })
        });
        async move { reply }.boxed()
    }

    fn profile(&self) -> BoxFuture<'_, Result<Profile, FetchError>> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.profiles.lock().unwrap().pop_front().unwrap_or(Ok(Profile::default()));
        async move { reply }.boxed()
    }

    fn reset_session(&self) -> BoxFuture<'_, Result<ResetOutcome, FetchError>> {
        self.reset_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.resets.lock().unwrap().pop_front().unwrap_or(Ok(ResetOutcome::Confirmed));
        async move { reply }.boxed()
    }
}
