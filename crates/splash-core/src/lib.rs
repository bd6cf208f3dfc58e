//! Core timing and startup logic for the splash screen
//!
//! This crate owns everything that is not presentation: the launch
//! sequencer that decides when the splash gives way to the main window,
//! the splash configuration, and the startup work that runs while the
//! splash is on screen.

pub mod config;
pub mod sequence;
pub mod state;
pub mod task;

// Re-export commonly used types
pub use config::{SplashConfig, WindowConfig};
pub use sequence::{LaunchSequencer, SplashDirective};
pub use state::{StartupStatus, StatusSink};
pub use task::{run_tasks, StartupHandle, StartupTask};
