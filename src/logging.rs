//! Tracing setup and the in-app activity log.

use std::{
    collections::VecDeque,
    sync::Once,
};

use chrono::{
    DateTime,
    Local,
};
use tracing_subscriber::{
    fmt,
    prelude::*,
    EnvFilter,
};

use crate::core::tasks::TaskKind;

pub const LOG_ENV: &str = "DISHSWIPE_LOG";
const DEFAULT_FILTER: &str = "dishswipe=info";

pub const LOG_SINK_CAPACITY: usize = 64;

static INIT: Once = Once::new();

/// Installs the global subscriber. Filters come from `DISHSWIPE_LOG`
/// (e.g. `DISHSWIPE_LOG=dishswipe::session=debug`), falling back to
/// `dishswipe=info`. Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry().with(fmt::layer().with_target(true)).with(filter).init();
    });
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub at: DateTime<Local>,
    pub task: TaskKind,
    pub message: String,
}

impl LogEntry {
    pub fn timestamp(&self) -> String {
        self.at.format("%H:%M:%S").to_string()
    }
}

/// Background failures the user never sees as errors, newest last.
#[derive(Debug)]
pub struct LogSink {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Default for LogSink {
    fn default() -> Self {
        Self::with_capacity(LOG_SINK_CAPACITY)
    }
}

impl LogSink {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn record(&mut self, task: TaskKind, message: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry { at: Local::now(), task, message: message.into() });
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_drops_oldest() {
        let mut sink = LogSink::with_capacity(2);
        sink.record(TaskKind::Prefetch, "first");
        sink.record(TaskKind::Feedback, "second");
        sink.record(TaskKind::Prefetch, "third");

        let messages: Vec<&str> = sink.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "third"]);
        assert_eq!(sink.entries().next().map(|e| e.task), Some(TaskKind::Feedback));
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
    }
}
