//! Startup work performed while the splash is on screen

use std::time::Duration;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use splash_core::{StartupTask, StatusSink};
use tracing::debug;

/// The demo's startup sequence
pub fn startup_tasks() -> Vec<Box<dyn StartupTask>> {
    vec![
        Box::new(LoadSettings),
        Box::new(ScanWorkspace),
        Box::new(WarmCaches),
    ]
}

struct LoadSettings;

#[async_trait]
impl StartupTask for LoadSettings {
    fn name(&self) -> &str {
        "loading settings"
    }

    async fn run(&self, _status: &StatusSink) -> Result<()> {
        // Stands in for reading user preferences from disk.
        tokio::time::sleep(Duration::from_millis(250)).await;
        Ok(())
    }
}

struct ScanWorkspace;

#[async_trait]
impl StartupTask for ScanWorkspace {
    fn name(&self) -> &str {
        "scanning workspace"
    }

    async fn run(&self, status: &StatusSink) -> Result<()> {
        let cwd = std::env::current_dir().context("no working directory")?;
        let mut entries = tokio::fs::read_dir(&cwd)
            .await
            .with_context(|| format!("failed to read {:?}", cwd))?;

        let mut count = 0usize;
        while entries.next_entry().await?.is_some() {
            count += 1;
        }
        debug!("workspace scan found {} entries in {:?}", count, cwd);
        status.set_message(format!("indexed {} workspace entries", count));
        Ok(())
    }
}

struct WarmCaches;

#[async_trait]
impl StartupTask for WarmCaches {
    fn name(&self) -> &str {
        "warming caches"
    }

    async fn run(&self, _status: &StatusSink) -> Result<()> {
        tokio::time::sleep(Duration::from_millis(400)).await;
        Ok(())
    }
}
