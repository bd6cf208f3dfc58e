//! Startup work that runs while the splash is visible
//!
//! Construction of the main window is pushed onto the runtime so the event
//! loop keeps animating the splash. Tasks report progress through a
//! [`StatusSink`] and the finished main-window state lands in a
//! [`StartupHandle`] polled by the UI thread.

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use parking_lot::RwLock;
use tracing::{error, info};

use crate::state::StatusSink;

/// A unit of startup work
#[async_trait::async_trait]
pub trait StartupTask: Send + Sync {
    /// Name shown in the status line while the task runs
    fn name(&self) -> &str;

    /// Perform the work
    async fn run(&self, status: &StatusSink) -> Result<()>;
}

/// Run tasks in order, publishing progress after each one
///
/// A failing task is logged and recorded in the status; it does not abort
/// the remaining tasks or the launch.
pub async fn run_tasks(tasks: &[Box<dyn StartupTask>], status: &StatusSink) {
    let total = tasks.len();
    for (index, task) in tasks.iter().enumerate() {
        status.set_message(task.name());
        status.set_progress(index as f32 / total.max(1) as f32);
        info!("startup task {}/{}: {}", index + 1, total, task.name());

        if let Err(e) = task.run(status).await {
            error!("startup task '{}' failed: {:#}", task.name(), e);
            status.push_error(format!("{}: {e:#}", task.name()));
        }
    }
    status.set_message("ready");
    status.set_progress(1.0);
}

/// Slot that receives the main-window state built during the splash
pub struct StartupHandle<T> {
    slot: Arc<RwLock<Option<T>>>,
}

impl<T: Send + Sync + 'static> StartupHandle<T> {
    /// Spawn `build` on the runtime; `on_done` fires after the result is stored
    ///
    /// `on_done` is the place to request a repaint so the UI notices the
    /// result without polling at full rate.
    pub fn spawn<F>(
        runtime: &tokio::runtime::Handle,
        build: F,
        on_done: impl Fn() + Send + Sync + 'static,
    ) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let slot = Arc::new(RwLock::new(None));
        let out = slot.clone();
        runtime.spawn(async move {
            let value = build.await;
            *out.write() = Some(value);
            on_done();
        });
        Self { slot }
    }

    /// Whether the built value has arrived
    pub fn is_ready(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Remove and return the built value
    pub fn take(&self) -> Option<T> {
        self.slot.write().take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::time::Duration;

    struct Renames;

    #[async_trait::async_trait]
    impl StartupTask for Renames {
        fn name(&self) -> &str {
            "migrating settings"
        }

        async fn run(&self, status: &StatusSink) -> Result<()> {
            status.set_message("renaming keys");
            Ok(())
        }
    }

    struct Fails;

    #[async_trait::async_trait]
    impl StartupTask for Fails {
        fn name(&self) -> &str {
            "warming cache"
        }

        async fn run(&self, _status: &StatusSink) -> Result<()> {
            Err(anyhow!("disk full"))
        }
    }

    #[test]
    fn test_run_tasks_records_failures_and_finishes() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let status = StatusSink::new();
        let tasks: Vec<Box<dyn StartupTask>> = vec![Box::new(Renames), Box::new(Fails)];

        runtime.block_on(run_tasks(&tasks, &status));

        let snapshot = status.snapshot();
        assert_eq!(snapshot.message, "ready");
        assert_eq!(snapshot.progress, Some(1.0));
        assert_eq!(snapshot.errors.len(), 1);
        assert!(snapshot.errors[0].contains("warming cache"));
    }

    #[test]
    fn test_startup_handle_delivers_once() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let handle = StartupHandle::spawn(runtime.handle(), async { 42usize }, || {});

        runtime.block_on(async {
            for _ in 0..100 {
                if handle.is_ready() {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        });

        assert!(handle.is_ready());
        assert_eq!(handle.take(), Some(42));
        assert_eq!(handle.take(), None);
    }
}
