use std::collections::{
    HashSet,
    VecDeque,
};

use tracing::{
    debug,
    info,
    warn,
};

use crate::{
    api::DishApi,
    core::{
        errors::FetchError,
        models::{
            Dish,
            DishFetch,
        },
    },
};

pub const DEFAULT_PREFETCH_TARGET: usize = 2;

/// Requests one fill cycle may spend per missing slot before giving up.
pub const FILL_ATTEMPTS_PER_SLOT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    Added,
    Duplicate,
    Full,
    Invalid,
}

#[derive(Debug)]
pub enum FillOutcome {
    Filled,
    Exhausted,
    BudgetSpent,
    Failed(FetchError),
}

/// Lookahead buffer of dishes waiting to be shown.
#[derive(Debug, Clone)]
pub struct PrefetchQueue {
    entries: VecDeque<Dish>,
    target: usize,
}

impl Default for PrefetchQueue {
    fn default() -> Self {
        Self::new(DEFAULT_PREFETCH_TARGET)
    }
}

impl PrefetchQueue {
    pub fn new(target: usize) -> Self {
        Self { entries: VecDeque::with_capacity(target), target }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn missing(&self) -> usize {
        self.target.saturating_sub(self.entries.len())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|dish| dish.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|dish| dish.name.as_str()).collect()
    }

    /// Appends `dish` unless it is nameless, already queued, or the queue is full.
    pub fn offer(&mut self, dish: Dish) -> Offer {
        if !dish.has_valid_name() {
            return Offer::Invalid;
        }
        if self.contains(&dish.name) {
            return Offer::Duplicate;
        }
        if self.entries.len() >= self.target {
            return Offer::Full;
        }

        self.entries.push_back(dish);
        Offer::Added
    }

    pub fn take(&mut self) -> Option<Dish> {
        self.entries.pop_front()
    }
}

/// One fill cycle: asks the service for dishes until `needed` new ones were
/// handed to `on_dish`, or the service runs dry or fails.
///
/// Nameless records and names in `known` (or already delivered in this
/// cycle) are skipped. The cycle spends at most
/// `needed * FILL_ATTEMPTS_PER_SLOT` requests.
pub async fn fill_queue(
    api: &dyn DishApi,
    mut known: HashSet<String>,
    needed: usize,
    mut on_dish: impl FnMut(Dish) + Send,
) -> FillOutcome {
    let budget = needed * FILL_ATTEMPTS_PER_SLOT;
    let mut delivered = 0;

    if needed == 0 {
        return FillOutcome::Filled;
    }

    for _ in 0..budget {
        match api.random_dish().await {
            Ok(DishFetch::Dish(dish)) => {
                if !known.insert(dish.name.clone()) {
                    warn!("Received duplicate dish: {}", dish.name);
                    continue;
                }

                debug!("Prefetched dish: {}", dish.name);
                on_dish(dish);
                delivered += 1;

                if delivered >= needed {
                    return FillOutcome::Filled;
                }
            }
            Ok(DishFetch::Exhausted) => {
                info!("No more dishes available for caching");
                return FillOutcome::Exhausted;
            }
            Err(FetchError::Malformed(reason)) => {
                warn!("Received invalid dish data: {reason}");
            }
            Err(error) => {
                warn!("Error preloading dishes: {error}");
                return FillOutcome::Failed(error);
            }
        }
    }

    warn!("Gave up preloading after {budget} requests, {delivered}/{needed} dishes found");
    FillOutcome::BudgetSpent
}
