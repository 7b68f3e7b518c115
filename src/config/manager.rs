//! Configuration manager for loading and saving application configuration
//!
//! This module provides functionality to load and save configuration to
//! %APPDATA%\DesktopCurator\config.json with atomic writes to prevent
//! corruption.

use crate::config::models::AppConfig;
use crate::error::Result;
use std::path::PathBuf;
use tracing::{info, warn};

/// Name of the application directory under %APPDATA%
pub const APP_DIR_NAME: &str = "DesktopCurator";

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Get the application data directory
    ///
    /// Returns: %APPDATA%\DesktopCurator (falls back to the working directory
    /// when APPDATA is unset, e.g. in tests on non-Windows hosts)
    pub fn app_data_dir() -> PathBuf {
        let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join(APP_DIR_NAME)
    }

    /// Get the path to the configuration file
    ///
    /// Returns: %APPDATA%\DesktopCurator\config.json
    pub fn get_config_path() -> PathBuf {
        Self::app_data_dir().join("config.json")
    }

    /// Ensure the configuration directory exists
    ///
    /// Creates %APPDATA%\DesktopCurator if it doesn't exist
    pub fn ensure_config_dir() -> Result<PathBuf> {
        let config_dir = Self::app_data_dir();
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist or is corrupt, returns default
    /// configuration.
    pub fn load() -> Result<AppConfig> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            info!("Configuration file not found, using defaults");
            return Ok(AppConfig::default());
        }

        let json = std::fs::read_to_string(&config_path)?;

        match serde_json::from_str(&json) {
            Ok(config) => {
                info!("Configuration loaded successfully");
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse configuration, using defaults: {}", e);
                Ok(AppConfig::default())
            }
        }
    }

    /// Save configuration to disk with atomic write
    ///
    /// Uses a temporary file and rename to ensure atomic write operation.
    pub fn save(config: &AppConfig) -> Result<()> {
        let config_path = Self::get_config_path();
        let config_dir = Self::ensure_config_dir()?;

        // Atomic write: write to temp file, then rename
        let temp_path = config_dir.join("config.json.tmp");
        let json = serde_json::to_string_pretty(config)?;
        std::fs::write(&temp_path, json)?;
        std::fs::rename(temp_path, config_path)?;

        info!("Configuration saved successfully");
        Ok(())
    }
}
