//! Shared startup state

use std::sync::Arc;

use parking_lot::RwLock;

/// Progress reported by startup work, rendered on the splash
#[derive(Debug, Clone, Default)]
pub struct StartupStatus {
    /// Short description of the current step
    pub message: String,

    /// Completion fraction in 0..=1, when known
    pub progress: Option<f32>,

    /// Messages from steps that failed
    pub errors: Vec<String>,
}

/// Handle for publishing and reading startup progress
///
/// Cloned freely; the splash reads a snapshot each frame while the startup
/// tasks write into it from the runtime.
#[derive(Clone, Default)]
pub struct StatusSink {
    inner: Arc<RwLock<StartupStatus>>,
}

impl StatusSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current step description
    pub fn set_message(&self, message: impl Into<String>) {
        self.inner.write().message = message.into();
    }

    /// Update the completion fraction
    pub fn set_progress(&self, progress: f32) {
        self.inner.write().progress = Some(progress.clamp(0.0, 1.0));
    }

    /// Record a non-fatal failure
    pub fn push_error(&self, error: impl Into<String>) {
        self.inner.write().errors.push(error.into());
    }

    /// Copy of the current status for rendering
    pub fn snapshot(&self) -> StartupStatus {
        self.inner.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_updates_visible_in_snapshot() {
        let sink = StatusSink::new();
        sink.set_message("loading settings");
        sink.set_progress(0.5);
        sink.push_error("cache warmup failed");

        let status = sink.snapshot();
        assert_eq!(status.message, "loading settings");
        assert_eq!(status.progress, Some(0.5));
        assert_eq!(status.errors.len(), 1);
    }

    #[test]
    fn test_progress_clamped() {
        let sink = StatusSink::new();
        sink.set_progress(1.7);
        assert_eq!(sink.snapshot().progress, Some(1.0));
    }
}
