use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::easing::CubicBezier;

/// Per-request animation options.
///
/// Every field has a default; malformed numeric values (non-positive or
/// non-finite duration, zero tick rate) silently fall back to their
/// defaults instead of failing the request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScrollOptions {
    /// Animation duration in seconds.
    #[serde(default = "default_time")]
    pub time: f64,
    /// Animation ticks per second.
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Extra offset above the target, in pixels. May be negative, which
    /// shifts the effective destination downward.
    #[serde(default)]
    pub offset_y: i64,
    /// Whether a user scroll cancels the animation (`true`), or user
    /// scrolling is suppressed until the animation finishes (`false`).
    #[serde(default = "default_true")]
    pub interruptable: bool,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            time: default_time(),
            fps: default_fps(),
            offset_y: 0,
            interruptable: default_true(),
        }
    }
}

impl ScrollOptions {
    /// Duration with malformed values replaced by the default.
    pub(crate) fn effective_time(&self) -> f64 {
        if self.time.is_finite() && self.time > 0.0 {
            self.time
        } else {
            default_time()
        }
    }

    /// Tick rate with a zero value replaced by the default.
    pub(crate) fn effective_fps(&self) -> u32 {
        if self.fps > 0 {
            self.fps
        } else {
            default_fps()
        }
    }
}

fn default_time() -> f64 {
    1.0
}

fn default_fps() -> u32 {
    60
}

fn default_true() -> bool {
    true
}

/// Easing control points as stored in the config file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EasingConfig {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Default for EasingConfig {
    fn default() -> Self {
        // The CSS "ease" shape
        Self {
            x1: 0.25,
            y1: 0.1,
            x2: 0.25,
            y2: 1.0,
        }
    }
}

impl EasingConfig {
    pub fn curve(&self) -> CubicBezier {
        CubicBezier::new(self.x1, self.y1, self.x2, self.y2)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scroll: ScrollOptions,
    #[serde(default)]
    pub easing: EasingConfig,
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/glidescroll/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("glidescroll")
            .join("config.toml")
    }
}
