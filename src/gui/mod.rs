//! GUI module
//!
//! Provides the system tray icon and context menu. There is no main window:
//! the tray menu (with a native folder picker) is the whole configuration
//! surface.

#[cfg(windows)]
pub mod tray;

#[cfg(windows)]
pub use tray::WallpaperTray;
