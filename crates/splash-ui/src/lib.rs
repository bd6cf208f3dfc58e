//! User interface components for the splash screen
//!
//! This crate provides the egui-based presentation: the splash view that
//! plays the logo animation, the painted fallback logo, and the
//! application theme.

pub mod logo;
pub mod splash_view;
pub mod theme;

// Re-export commonly used types
pub use logo::PulseLogo;
pub use splash_view::{fit_size, LogoSource, SplashResponse, SplashView};
pub use theme::{apply_theme, Theme};
