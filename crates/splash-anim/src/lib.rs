//! Animated-image playback for the splash screen
//!
//! This crate provides the decoded frame model, the GIF loader, and the
//! playback engine that turns wall-clock time into frame changes and loop
//! boundaries.

pub mod frames;
pub mod gif;
pub mod movie;

// Re-export commonly used types
pub use frames::{Frame, FrameBuffer};
pub use gif::AnimError;
pub use movie::{Movie, SpeedRamp, Tick};
