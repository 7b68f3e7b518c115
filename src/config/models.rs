//! Configuration data models
//!
//! This module defines the data structures used for application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default rotation interval in milliseconds (30 seconds)
pub const DEFAULT_ROTATION_INTERVAL_MS: u64 = 30_000;

/// Minimum accepted rotation interval in milliseconds
pub const MIN_ROTATION_INTERVAL_MS: u64 = 1_000;

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Folder the wallpaper candidates are enumerated from (unset until the
    /// user picks one)
    pub wallpaper_folder: Option<PathBuf>,
    /// User preferences
    pub preferences: UserPreferences,
}

/// User preferences and settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Rotation interval in milliseconds (>= `MIN_ROTATION_INTERVAL_MS`)
    pub rotation_interval_ms: u64,
    /// Whether to auto-start on Windows login
    pub auto_start: bool,
}

/// Time unit for interval entry
///
/// The interval is stored in milliseconds; units only scale user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntervalUnit {
    /// Seconds (x1000)
    Seconds,
    /// Minutes (x60_000)
    Minutes,
    /// Hours (x3_600_000)
    Hours,
    /// Days (x86_400_000)
    Days,
}

impl IntervalUnit {
    /// Milliseconds per one unit
    pub fn scale_ms(self) -> u64 {
        match self {
            Self::Seconds => 1_000,
            Self::Minutes => 60 * 1_000,
            Self::Hours => 60 * 60 * 1_000,
            Self::Days => 24 * 60 * 60 * 1_000,
        }
    }

    /// Convert a value in this unit to milliseconds, saturating on overflow
    pub fn to_millis(self, value: u64) -> u64 {
        value.saturating_mul(self.scale_ms())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            wallpaper_folder: None,
            preferences: UserPreferences::default(),
        }
    }
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            rotation_interval_ms: DEFAULT_ROTATION_INTERVAL_MS,
            auto_start: false,
        }
    }
}

impl UserPreferences {
    /// Rotation interval as a `Duration`
    pub fn rotation_interval(&self) -> Duration {
        Duration::from_millis(self.rotation_interval_ms)
    }
}
