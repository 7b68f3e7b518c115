//! Desktop Curator - Random wallpaper rotation for Windows
//!
//! Periodically picks a random image from a configured folder, letterboxes it
//! to the primary display resolution, and applies it as the desktop
//! background. A `RotationTimer` emits ticks, the `AppController` coordinates
//! change cycles, and the `WallpaperChanger` performs selection, composition,
//! and the native apply call.
//!
//! # Requirements
//!
//! - Windows 10 or later for the tray icon and wallpaper apply
//! - Non-Windows builds compile with stubs; selection and composition are
//!   fully portable

// Module declarations
pub mod config;
pub mod controller;
pub mod desktop;
pub mod error;
pub mod scheduler;
pub mod utils;
pub mod wallpaper;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use error::{CuratorError, Result};
