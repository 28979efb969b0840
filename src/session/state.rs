use std::time::{
    Duration,
    Instant,
};

use super::queue::PrefetchQueue;
use crate::core::models::{
    Decision,
    Dish,
};

pub const DEFAULT_SWIPE_DURATION: Duration = Duration::from_millis(300);

/// A card leaving the screen after a decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeAnimation {
    pub decision: Decision,
    pub started_at: Instant,
    pub duration: Duration,
}

impl SwipeAnimation {
    pub fn new(decision: Decision, started_at: Instant, duration: Duration) -> Self {
        Self { decision, started_at, duration }
    }

    /// Fraction of the animation elapsed at `now`, in `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }
}

/// Everything one swipe session knows. Owned by the controller, never shared.
#[derive(Debug, Default)]
pub struct SessionState {
    pub current: Option<Dish>,
    /// An in-flight swipe. While set, further decisions are dropped.
    pub animation: Option<SwipeAnimation>,
    pub liked_count: u32,
    pub queue: PrefetchQueue,
    /// Set once the service ran out of dishes with nothing left to show.
    pub exhausted: bool,
}

impl SessionState {
    pub fn new(prefetch_target: usize) -> Self {
        Self { queue: PrefetchQueue::new(prefetch_target), ..Self::default() }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_progress() {
        let start = Instant::now();
        let animation = SwipeAnimation::new(Decision::Accept, start, DEFAULT_SWIPE_DURATION);

        assert_eq!(animation.progress(start), 0.0);
        assert!((animation.progress(start + Duration::from_millis(150)) - 0.5).abs() < 1e-4);
        assert_eq!(animation.progress(start + Duration::from_secs(2)), 1.0);

        assert!(!animation.is_finished(start + Duration::from_millis(299)));
        assert!(animation.is_finished(start + Duration::from_millis(300)));
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let start = Instant::now();
        let animation = SwipeAnimation::new(Decision::Reject, start, Duration::ZERO);

        assert_eq!(animation.progress(start), 1.0);
        assert!(animation.is_finished(start));
    }
}
