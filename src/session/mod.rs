//! One swipe session: the current card, the lookahead queue and the
//! decision state machine, all owned by [`SwipeController`] on the UI thread.

pub mod queue;
pub mod state;

use std::{
    collections::HashSet,
    sync::Arc,
    time::{
        Duration,
        Instant,
    },
};

use tokio::runtime::Handle;
use tracing::{
    debug,
    error,
    info,
    info_span,
    warn,
    Instrument,
    Span,
};
use uuid::Uuid;

use self::{
    queue::{
        fill_queue,
        FillOutcome,
        Offer,
        PrefetchQueue,
        DEFAULT_PREFETCH_TARGET,
    },
    state::{
        SessionState,
        SwipeAnimation,
        DEFAULT_SWIPE_DURATION,
    },
};
use crate::{
    api::DishApi,
    core::{
        errors::FetchError,
        models::{
            Decision,
            Dish,
            DishFetch,
            Feedback,
            ResetOutcome,
        },
        tasks::{
            RepaintHook,
            TaskKind,
            TaskManager,
            TaskResult,
        },
    },
    logging::LogSink,
    view::{
        card::CardMotion,
        AnalysisPresenter,
        CardArea,
        CardStack,
    },
};

pub const NO_MORE_DISHES_MESSAGE: &str = "No more dishes available";
pub const NO_DISHES_MESSAGE: &str = "No dishes available";
pub const RESET_FAILED_MESSAGE: &str = "Failed to reset session";
const INVALID_DISH_DATA: &str = "Invalid dish data received";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub prefetch_target: usize,
    pub swipe_duration: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self { prefetch_target: DEFAULT_PREFETCH_TARGET, swipe_duration: DEFAULT_SWIPE_DURATION }
    }
}

pub struct SwipeController {
    id: Uuid,
    api: Arc<dyn DishApi>,
    tasks: TaskManager,
    settings: SessionSettings,
    state: SessionState,
    cards: CardStack,
    analysis: AnalysisPresenter,
    log: LogSink,
    started: bool,
    refill_running: bool,
    refill_requested: bool,
    reset_confirmed: bool,
}

impl SwipeController {
    pub fn new(api: Arc<dyn DishApi>, runtime: Handle, settings: SessionSettings) -> Self {
        let id = Uuid::new_v4();
        info!(session = %id, "Creating swipe session");

        Self {
            id,
            api,
            tasks: TaskManager::new(runtime),
            settings,
            state: SessionState::new(settings.prefetch_target),
            cards: CardStack::new(),
            analysis: AnalysisPresenter::new(),
            log: LogSink::default(),
            started: false,
            refill_running: false,
            refill_requested: false,
            reset_confirmed: false,
        }
    }

    pub fn set_repaint(&mut self, repaint: RepaintHook) {
        self.tasks.set_repaint(repaint);
    }

    fn span(&self) -> Span {
        info_span!("session", id = %self.id)
    }

    /// Loads the first dish. Only the first call does anything.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        self.cards.show_loading();

        let api = Arc::clone(&self.api);
        let span = self.span();
        self.tasks.spawn(TaskKind::InitialDish, move |_| {
            async move { TaskResult::InitialDish(api.random_dish().await) }.instrument(span)
        });
    }

    /// Applies the user's verdict to the card on screen.
    ///
    /// Returns `false`, changing nothing, while a previous swipe is still
    /// animating or when there is no card to decide on.
    pub fn decide(&mut self, decision: Decision, now: Instant) -> bool {
        if self.state.is_animating() {
            debug!(session = %self.id, "Ignoring {:?}, a swipe is in flight", decision);
            return false;
        }
        let Some(name) = self.state.current.as_ref().map(|dish| dish.name.clone()) else {
            debug!(session = %self.id, "Ignoring {:?}, no card on screen", decision);
            return false;
        };

        if decision == Decision::Accept {
            self.state.liked_count += 1;
            self.send_feedback(name);
        }

        self.state.animation = Some(SwipeAnimation::new(decision, now, self.settings.swipe_duration));
        self.cards.set_motion(CardMotion::exiting(decision, 0.0));
        true
    }

    /// Drains finished background work, then advances the swipe animation.
    pub fn poll(&mut self, now: Instant) {
        for result in self.tasks.poll_results() {
            self.handle_task_result(result);
        }
        self.tick(now);
    }

    pub fn tick(&mut self, now: Instant) {
        let Some(animation) = self.state.animation else {
            return;
        };

        if animation.is_finished(now) {
            self.finish_swipe();
        } else {
            self.cards.set_motion(CardMotion::exiting(animation.decision, animation.progress(now)));
        }
    }

    /// Waits until every background task has reported and been handled,
    /// including the ones spawned while handling.
    pub async fn settle(&mut self) {
        while let Some(result) = self.tasks.next_result().await {
            self.handle_task_result(result);
        }
    }

    /// Opens the taste profile, fetching it unless a fetch is already running.
    pub fn show_profile(&mut self) {
        if !self.analysis.begin_profile_load() {
            return;
        }

        let api = Arc::clone(&self.api);
        let span = self.span();
        self.tasks.spawn(TaskKind::Profile, move |_| {
            async move { TaskResult::ProfileLoaded(api.profile().await) }.instrument(span)
        });
    }

    pub fn dismiss_profile(&mut self) {
        self.analysis.dismiss();
    }

    pub fn request_reset(&mut self) {
        info!(session = %self.id, "Requesting session reset");

        let api = Arc::clone(&self.api);
        let span = self.span();
        self.tasks.spawn(TaskKind::Reset, move |_| {
            async move { TaskResult::SessionReset(api.reset_session().await) }.instrument(span)
        });
    }

    /// The server dropped its side of the session; this controller should be
    /// replaced by a fresh one.
    pub fn reset_confirmed(&self) -> bool {
        self.reset_confirmed
    }

    pub fn card_area(&self) -> &CardArea {
        self.cards.area()
    }

    pub fn current(&self) -> Option<&Dish> {
        self.state.current.as_ref()
    }

    pub fn queue(&self) -> &PrefetchQueue {
        &self.state.queue
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    pub fn is_exhausted(&self) -> bool {
        self.state.exhausted
    }

    pub fn liked_count(&self) -> u32 {
        self.state.liked_count
    }

    pub fn analysis(&self) -> &AnalysisPresenter {
        &self.analysis
    }

    pub fn log(&self) -> &LogSink {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    fn send_feedback(&mut self, dish_name: String) {
        let api = Arc::clone(&self.api);
        let span = self.span();
        self.tasks.spawn(TaskKind::Feedback, move |_| {
            async move {
                let result = api.like(&dish_name).await;
                TaskResult::Feedback { dish_name, result }
            }
            .instrument(span)
        });
    }

    fn fetch_next(&mut self) {
        self.cards.show_loading();

        let api = Arc::clone(&self.api);
        let span = self.span();
        self.tasks.spawn(TaskKind::NextDish, move |_| {
            async move { TaskResult::NextDish(api.random_dish().await) }.instrument(span)
        });
    }

    /// Starts a fill cycle unless the queue is full, the service ran dry or
    /// a cycle is already running (then it runs again once that one ends).
    fn request_refill(&mut self) {
        if self.state.exhausted || self.state.queue.missing() == 0 {
            return;
        }
        if self.refill_running {
            self.refill_requested = true;
            return;
        }

        self.refill_running = true;
        self.refill_requested = false;

        let known: HashSet<String> =
            self.state.queue.names().into_iter().map(str::to_string).collect();
        let needed = self.state.queue.missing();
        debug!(session = %self.id, needed, "Refilling dish queue");

        let api = Arc::clone(&self.api);
        let span = self.span();
        self.tasks.spawn(TaskKind::Prefetch, move |sender| {
            async move {
                let outcome = fill_queue(api.as_ref(), known, needed, |dish| {
                    sender.send(TaskResult::Prefetched(dish))
                })
                .await;
                TaskResult::PrefetchFinished(outcome)
            }
            .instrument(span)
        });
    }

    fn finish_swipe(&mut self) {
        self.state.animation = None;
        if let Some(dish) = self.state.current.take() {
            debug!(session = %self.id, "Swiped away {}", dish.name);
        }
        self.cards.clear();

        match self.state.queue.take() {
            Some(next) => {
                debug!(session = %self.id, "Showing queued dish {}", next.name);
                self.show(next);
                self.request_refill();
            }
            None => self.fetch_next(),
        }
    }

    fn show(&mut self, dish: Dish) {
        if self.cards.render(&dish) {
            self.state.current = Some(dish);
        } else {
            warn!(session = %self.id, "Refusing to show a dish without a name");
            self.state.current = None;
        }
    }

    fn show_exhausted(&mut self) {
        info!(session = %self.id, "No more dishes available");
        self.state.exhausted = true;
        self.state.current = None;
        self.cards.show_error(NO_MORE_DISHES_MESSAGE);
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::InitialDish(result) => self.on_initial_dish(result),
            TaskResult::NextDish(result) => self.on_next_dish(result),
            TaskResult::Prefetched(dish) => self.on_prefetched(dish),
            TaskResult::PrefetchFinished(outcome) => self.on_prefetch_finished(outcome),
            TaskResult::Feedback { dish_name, result } => self.on_feedback(&dish_name, result),
            TaskResult::ProfileLoaded(result) => self.analysis.apply_profile(result),
            TaskResult::SessionReset(result) => self.on_reset(result),
            TaskResult::Crashed { task, error } => self.on_crash(task, error),
        }
    }

    fn on_initial_dish(&mut self, result: Result<DishFetch, FetchError>) {
        match result {
            Ok(DishFetch::Dish(dish)) if dish.has_valid_name() => {
                info!(session = %self.id, "Loaded first dish {}", dish.name);
                self.show(dish);
                self.request_refill();
            }
            Ok(DishFetch::Dish(_)) | Err(FetchError::Malformed(_)) => {
                error!(session = %self.id, "First dish record was unusable");
                self.cards.show_error(NO_DISHES_MESSAGE);
            }
            Ok(DishFetch::Exhausted) => self.show_exhausted(),
            Err(e) => {
                error!(session = %self.id, "Error initializing app: {e}");
                self.cards.show_error(format!("Failed to initialize app: {e}"));
            }
        }
    }

    fn on_next_dish(&mut self, result: Result<DishFetch, FetchError>) {
        match result {
            Ok(DishFetch::Dish(dish)) if dish.has_valid_name() => {
                self.show(dish);
                self.request_refill();
            }
            Ok(DishFetch::Dish(_)) => {
                warn!(session = %self.id, "Next dish record has no name");
                self.cards.show_error(format!("Failed to load dish: {INVALID_DISH_DATA}"));
            }
            Ok(DishFetch::Exhausted) => self.show_exhausted(),
            Err(e) => {
                error!(session = %self.id, "Error loading dish: {e}");
                self.cards.show_error(format!("Failed to load dish: {e}"));
            }
        }
    }

    fn on_prefetched(&mut self, dish: Dish) {
        let name = dish.name.clone();
        match self.state.queue.offer(dish) {
            Offer::Added => {
                debug!(session = %self.id, waiting = self.state.queue.len(), "Queued {name}")
            }
            Offer::Duplicate => debug!(session = %self.id, "Dropped duplicate {name}"),
            Offer::Full => debug!(session = %self.id, "Queue full, dropped {name}"),
            Offer::Invalid => warn!(session = %self.id, "Dropped a dish without a name"),
        }
    }

    fn on_prefetch_finished(&mut self, outcome: FillOutcome) {
        self.refill_running = false;

        match outcome {
            FillOutcome::Filled => debug!(session = %self.id, "Dish queue filled"),
            FillOutcome::Exhausted => {
                // The service has nothing left; the next swipe asks again.
                self.refill_requested = false;
            }
            FillOutcome::BudgetSpent => {
                self.log.record(TaskKind::Prefetch, "Gave up preloading after repeated duplicates");
            }
            FillOutcome::Failed(e) => {
                self.log.record(TaskKind::Prefetch, format!("Error preloading dishes: {e}"));
            }
        }

        if self.refill_requested {
            self.request_refill();
        }
    }

    fn on_feedback(&mut self, dish_name: &str, result: Result<Feedback, FetchError>) {
        match result {
            Ok(feedback) if feedback.accepted => {
                info!(session = %self.id, "Liked {dish_name}");
                self.analysis.present_inline(&feedback);
            }
            Ok(feedback) => {
                let message = feedback.message.unwrap_or_else(|| "no reason given".to_string());
                warn!(session = %self.id, "Like for {dish_name} was not recorded: {message}");
                self.log.record(
                    TaskKind::Feedback,
                    format!("Like for {dish_name} was not recorded: {message}"),
                );
            }
            Err(e) => {
                warn!(session = %self.id, "Error liking dish {dish_name}: {e}");
                self.log.record(TaskKind::Feedback, format!("Error liking dish {dish_name}: {e}"));
            }
        }
    }

    fn on_reset(&mut self, result: Result<ResetOutcome, FetchError>) {
        match result {
            Ok(ResetOutcome::Confirmed) => {
                info!(session = %self.id, "Session reset confirmed");
                self.reset_confirmed = true;
            }
            Ok(ResetOutcome::Declined(status)) => {
                warn!(session = %self.id, "Session reset answered with status '{status}'");
                self.log.record(TaskKind::Reset, format!("Reset answered with status '{status}'"));
            }
            Err(e) => {
                error!(session = %self.id, "Error resetting session: {e}");
                self.show_reset_failure();
            }
        }
    }

    fn show_reset_failure(&mut self) {
        self.state.animation = None;
        self.state.current = None;
        self.cards.show_error(RESET_FAILED_MESSAGE);
    }

    fn on_crash(&mut self, task: TaskKind, error: String) {
        self.log.record(task, format!("Task crashed: {error}"));

        match task {
            TaskKind::InitialDish => {
                self.cards.show_error(format!("Failed to initialize app: {error}"));
            }
            TaskKind::NextDish => self.cards.show_error(format!("Failed to load dish: {error}")),
            TaskKind::Prefetch => {
                self.refill_running = false;
                if self.refill_requested {
                    self.request_refill();
                }
            }
            TaskKind::Feedback => {}
            TaskKind::Profile => self.analysis.fail(),
            TaskKind::Reset => self.show_reset_failure(),
        }
    }
}
