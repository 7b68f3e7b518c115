//! Error types for Desktop Curator
//!
//! This module defines all error types used throughout the application,
//! providing clear error messages and proper error propagation.
//!
//! Every failure in a wallpaper change cycle is non-fatal to the host
//! process: the cycle is skipped and the next timer tick or manual trigger
//! retries independently.

use std::path::PathBuf;
use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for Desktop Curator
#[derive(Debug, Error)]
pub enum CuratorError {
    /// No image candidates were found under the wallpaper folder
    #[error("no wallpaper candidates found under {0}")]
    NoCandidates(PathBuf),

    /// The chosen image could not be decoded (corrupt or unsupported)
    #[error("failed to decode image {path}")]
    Decode {
        /// Path of the image that failed to decode
        path: PathBuf,
        /// Decoder error
        #[source]
        source: image::ImageError,
    },

    /// The composed wallpaper could not be written to the staging file
    /// Preserves the underlying error source for full error chain transparency
    #[error("failed to persist composed wallpaper: {0}")]
    Persist(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The desktop background could not be applied
    /// Preserves the underlying error source for full error chain transparency
    #[error("failed to apply desktop wallpaper: {0}")]
    Apply(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    /// Preserves the underlying error source for full error chain transparency
    #[error("configuration error: {0}")]
    Config(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Windows API error
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Desktop Curator operations
pub type Result<T> = std::result::Result<T, CuratorError>;

/// Convert an error to a user-friendly message
///
/// Takes a `CuratorError` and returns a message suitable for displaying to
/// end users in error dialogs. Only startup failures are ever surfaced this
/// way; per-cycle failures are logged and the cycle is skipped.
pub fn get_user_friendly_error(error: &CuratorError) -> String {
    match error {
        CuratorError::NoCandidates(folder) => {
            format!(
                "No images were found under:\n\n{}\n\n\
                 Supported formats: jpg, jpeg, png, gif, tiff, bmp.\n\
                 Pick a different wallpaper folder from the tray menu.",
                folder.display()
            )
        }
        CuratorError::Decode { path, .. } => {
            format!(
                "The image could not be read:\n\n{}\n\n\
                 The file may be corrupt or in an unsupported format.\n\
                 The next rotation will pick a different image.",
                path.display()
            )
        }
        CuratorError::Persist(_) => "Failed to write the prepared wallpaper.\n\n\
             Check that you have write permissions to:\n\
             %APPDATA%\\DesktopCurator\\temp\n\
             and that the disk is not full."
            .to_string(),
        CuratorError::Apply(_) => "Unable to change the desktop background.\n\n\
             Please ensure:\n\
             - Changing the desktop background is not blocked by policy\n\
             - The desktop shell (explorer.exe) is running"
            .to_string(),
        CuratorError::Config(_) => "Failed to load or save configuration.\n\n\
             Your settings may not persist.\n\
             Check that you have write permissions to:\n\
             %APPDATA%\\DesktopCurator"
            .to_string(),
        #[cfg(windows)]
        CuratorError::WindowsApi(e) => {
            format!(
                "A Windows API error occurred:\n\n{e}\n\n\
                 Please ensure your Windows installation is up to date."
            )
        }
        CuratorError::Io(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        CuratorError::Json(e) => {
            format!(
                "Configuration file is corrupted:\n\n{e}\n\n\
                 The application will use default settings."
            )
        }
    }
}
