//! Auto-start registry management
//!
//! This module manages Windows auto-start via a value under the current
//! user's Run key.

use crate::error::Result;

/// Registry value name under the Run key
#[cfg(windows)]
const RUN_VALUE_NAME: &str = "DesktopCurator";

/// Path of the Run key under HKEY_CURRENT_USER
#[cfg(windows)]
const RUN_KEY_PATH: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";

/// Auto-start manager
pub struct AutoStartManager;

#[cfg(windows)]
impl AutoStartManager {
    /// Check if auto-start is enabled
    pub fn is_enabled() -> Result<bool> {
        use winreg::RegKey;
        use winreg::enums::HKEY_CURRENT_USER;

        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let run = match hkcu.open_subkey(RUN_KEY_PATH) {
            Ok(key) => key,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        match run.get_value::<String, _>(RUN_VALUE_NAME) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Enable auto-start for the current executable
    pub fn enable() -> Result<()> {
        use winreg::RegKey;
        use winreg::enums::HKEY_CURRENT_USER;

        let exe_path = std::env::current_exe()?;
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let (run, _) = hkcu.create_subkey(RUN_KEY_PATH)?;
        // Quoted so paths with spaces survive the shell
        run.set_value(RUN_VALUE_NAME, &format!("\"{}\"", exe_path.display()))?;

        tracing::info!("Auto-start registry entry written");
        Ok(())
    }

    /// Disable auto-start
    pub fn disable() -> Result<()> {
        use winreg::RegKey;
        use winreg::enums::{HKEY_CURRENT_USER, KEY_SET_VALUE};

        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let run = match hkcu.open_subkey_with_flags(RUN_KEY_PATH, KEY_SET_VALUE) {
            Ok(key) => key,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        match run.delete_value(RUN_VALUE_NAME) {
            Ok(()) => {
                tracing::info!("Auto-start registry entry removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Enable or disable auto-start
    pub fn set_enabled(enabled: bool) -> Result<()> {
        if enabled { Self::enable() } else { Self::disable() }
    }
}

#[cfg(not(windows))]
impl AutoStartManager {
    /// Check if auto-start is enabled (stub for non-Windows)
    pub fn is_enabled() -> Result<bool> {
        Ok(false)
    }

    /// Enable or disable auto-start (stub for non-Windows)
    pub fn set_enabled(enabled: bool) -> Result<()> {
        tracing::debug!(
            "Ignoring auto-start change ({}) on non-Windows platform",
            enabled
        );
        Ok(())
    }
}
