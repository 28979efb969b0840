use std::{
    future::Future,
    sync::Arc,
};

use tokio::{
    runtime::Handle,
    sync::mpsc::{
        self,
        UnboundedReceiver,
        UnboundedSender,
    },
};
use tracing::{
    debug,
    error,
};

use super::{
    TaskKind,
    TaskResult,
};

pub type RepaintHook = Arc<dyn Fn() + Send + Sync>;

/// Handle given to a running task for reporting back to the owner.
#[derive(Clone)]
pub struct TaskSender {
    sender: UnboundedSender<TaskResult>,
    repaint: Option<RepaintHook>,
}

impl TaskSender {
    pub fn send(&self, result: TaskResult) {
        if self.sender.send(result).is_err() {
            debug!("Task report dropped, its session is gone");
            return;
        }

        if let Some(repaint) = &self.repaint {
            repaint();
        }
    }
}

/// Spawns supervised jobs on a tokio runtime and collects their reports for
/// the thread that owns the session.
pub struct TaskManager {
    runtime: Handle,
    sender: UnboundedSender<TaskResult>,
    receiver: UnboundedReceiver<TaskResult>,
    repaint: Option<RepaintHook>,
    outstanding: usize,
}

impl TaskManager {
    pub fn new(runtime: Handle) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        Self { runtime, sender, receiver, repaint: None, outstanding: 0 }
    }

    pub fn set_repaint(&mut self, repaint: RepaintHook) {
        self.repaint = Some(repaint);
    }

    fn task_context(&self) -> TaskSender {
        TaskSender { sender: self.sender.clone(), repaint: self.repaint.clone() }
    }

    /// Runs `task` in the background. Its output is reported as the final
    /// result; a panic is reported as [`TaskResult::Crashed`] instead.
    pub fn spawn<F, Fut>(&mut self, kind: TaskKind, task: F)
    where
        F: FnOnce(TaskSender) -> Fut,
        Fut: Future<Output = TaskResult> + Send + 'static,
    {
        let sender = self.task_context();
        let job = task(sender.clone());
        let runtime = self.runtime.clone();

        self.outstanding += 1;
        debug!(task = kind.label(), outstanding = self.outstanding, "Spawning task");

        self.runtime.spawn(async move {
            let result = match runtime.spawn(job).await {
                Ok(result) => result,
                Err(join_error) => {
                    error!(task = kind.label(), "Background task failed: {join_error}");
                    TaskResult::Crashed { task: kind, error: join_error.to_string() }
                }
            };

            sender.send(result);
        });
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            self.account(&result);
            results.push(result);
        }

        results
    }

    /// Waits for the next report, `None` once every spawned task has
    /// delivered its final result.
    pub async fn next_result(&mut self) -> Option<TaskResult> {
        if self.outstanding == 0 {
            return None;
        }

        let result = self.receiver.recv().await?;
        self.account(&result);
        Some(result)
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    fn account(&mut self, result: &TaskResult) {
        if result.is_final() {
            self.outstanding = self.outstanding.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reports_are_counted() {
        let mut manager = TaskManager::new(Handle::current());

        manager.spawn(TaskKind::Prefetch, |sender| async move {
            sender.send(TaskResult::Prefetched(crate::api::testing::dish("A")));
            TaskResult::PrefetchFinished(crate::session::queue::FillOutcome::Filled)
        });
        assert_eq!(manager.outstanding(), 1);

        let first = manager.next_result().await.unwrap();
        assert_eq!(first.task_type(), "prefetch_progress");
        assert_eq!(manager.outstanding(), 1);

        let last = manager.next_result().await.unwrap();
        assert_eq!(last.task_type(), "prefetch");
        assert_eq!(manager.outstanding(), 0);
        assert!(manager.next_result().await.is_none());
    }

    #[tokio::test]
    async fn test_panicking_task_reports_crash() {
        let mut manager = TaskManager::new(Handle::current());

        let explode = true;
        manager.spawn(TaskKind::Profile, move |_| async move {
            if explode {
                panic!("profile exploded");
            }
            TaskResult::Crashed { task: TaskKind::Profile, error: String::new() }
        });

        match manager.next_result().await {
            Some(TaskResult::Crashed { task, error }) => {
                assert_eq!(task, TaskKind::Profile);
                assert!(!error.is_empty());
            }
            other => panic!("Expected crash report, got {:?}", other),
        }
        assert_eq!(manager.outstanding(), 0);
    }

    #[tokio::test]
    async fn test_repaint_hook_fires_per_report() {
        use std::sync::atomic::{
            AtomicUsize,
            Ordering,
        };

        let repaints = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&repaints);

        let mut manager = TaskManager::new(Handle::current());
        manager.set_repaint(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        manager.spawn(TaskKind::Reset, |_| async move {
            TaskResult::SessionReset(Ok(crate::core::models::ResetOutcome::Confirmed))
        });
        manager.next_result().await.unwrap();

        assert_eq!(repaints.load(Ordering::SeqCst), 1);
    }
}
