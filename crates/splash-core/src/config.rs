//! Splash configuration
//!
//! Settings are read from a JSON file next to the executable (or wherever
//! `SPLASH_CONFIG` points). A missing file is not an error; every field has
//! a default matching the stock behavior.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use splash_anim::SpeedRamp;
use tracing::info;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "SPLASH_CONFIG";

/// Default config file name, resolved relative to the working directory
pub const CONFIG_FILE: &str = "splash.json";

/// Top-level splash settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashConfig {
    /// Minimum time the splash stays on screen ("3s", "1500ms", ...)
    #[serde(with = "duration_str")]
    pub min_display: Duration,

    /// Animated GIF to play; the painted logo is used when absent
    pub logo: Option<PathBuf>,

    /// Playback acceleration applied on every frame change
    pub speed_ramp: SpeedRamp,

    /// Window settings
    pub window: WindowConfig,
}

/// Window-related settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title of the main window shown after the splash
    pub title: String,

    /// Splash window size override; defaults to the animation's pixel size
    pub splash_size: Option<[f32; 2]>,

    /// Inner size of the main window
    pub main_size: [f32; 2],
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            min_display: Duration::from_secs(3),
            logo: None,
            speed_ramp: SpeedRamp::default(),
            window: WindowConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Splash Demo".to_string(),
            splash_size: None,
            main_size: [1200.0, 800.0],
        }
    }
}

impl SplashConfig {
    /// Load settings from `path`, falling back to defaults if it is absent
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("no config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {:?}", path))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {:?}", path))?;
        info!("loaded config from {:?}", path);
        Ok(config)
    }

    /// Load from `SPLASH_CONFIG` if set, otherwise from `splash.json`
    pub fn load_default() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        Self::load(path)
    }
}

/// Serde adapter for humantime duration strings
mod duration_str {
    use super::*;
    use serde::{de, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let text = String::deserialize(deserializer)?;
        humantime::parse_duration(&text).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = SplashConfig::load("/nonexistent/splash.json").unwrap();
        assert_eq!(config.min_display, Duration::from_secs(3));
        assert!(config.logo.is_none());
    }

    #[test]
    fn test_parse_humantime_durations() {
        let config: SplashConfig = serde_json::from_str(
            r#"{
                "min_display": "1500ms",
                "logo": "assets/logo.gif",
                "speed_ramp": { "step_percent": 10, "max_percent": 300 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.min_display, Duration::from_millis(1500));
        assert_eq!(config.logo.as_deref(), Some(Path::new("assets/logo.gif")));
        assert_eq!(config.speed_ramp.step_percent, 10);
        // Unspecified sections keep their defaults.
        assert_eq!(config.window.main_size, [1200.0, 800.0]);
    }

    #[test]
    fn test_bad_duration_rejected() {
        let result: std::result::Result<SplashConfig, _> =
            serde_json::from_str(r#"{ "min_display": "soon" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_duration_serializes_as_string() {
        let json = serde_json::to_value(SplashConfig::default()).unwrap();
        assert_eq!(json["min_display"], "3s");
    }
}
