//! Desktop background capability
//!
//! The single narrow boundary to the operating system: report the primary
//! display resolution and apply an image file as the desktop background.
//!
//! # Windows implementation
//!
//! The apply call runs on a dedicated worker thread because the underlying
//! `SystemParametersInfoW(SPI_SETDESKWALLPAPER, ..)` call broadcasts a
//! blocking `WM_SETTINGCHANGE` to every top-level window; a hung recipient
//! would otherwise stall the rotation cycle. The caller waits a bounded
//! timeout for the worker and abandons (does not kill) it when the timeout
//! elapses — the cycle is then reported failed and the next trigger retries.
//!
//! Non-Windows builds get stubs so the portable core compiles and tests run
//! anywhere; applying a wallpaper there is an error, not a crash.

use crate::error::Result;
use std::path::Path;

#[cfg(windows)]
use crate::error::{CuratorError, StringError};

/// Screen size reported when the platform cannot be queried
const FALLBACK_SCREEN_SIZE: (u32, u32) = (1920, 1080);

/// Bound on how long one apply call may hold up a change cycle
#[cfg(windows)]
const APPLY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(2);

/// Primary display resolution in physical pixels
///
/// Falls back to 1920x1080 if the platform reports nothing useful.
#[cfg(windows)]
#[expect(
    unsafe_code,
    reason = "Windows FFI to query primary display metrics via GetSystemMetrics"
)]
pub fn primary_screen_size() -> (u32, u32) {
    use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

    // GetSystemMetrics has no failure channel beyond returning 0
    let (width, height) = unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };

    if width <= 0 || height <= 0 {
        tracing::warn!(
            "GetSystemMetrics returned {}x{}, using fallback resolution",
            width,
            height
        );
        return FALLBACK_SCREEN_SIZE;
    }

    #[expect(clippy::cast_sign_loss, reason = "Both metrics checked positive above")]
    let size = (width as u32, height as u32);
    size
}

/// Primary display resolution (non-Windows stub)
#[cfg(not(windows))]
pub fn primary_screen_size() -> (u32, u32) {
    FALLBACK_SCREEN_SIZE
}

/// Apply the image at `path` as the desktop background
///
/// # Safety
///
/// Sound FFI call: the wallpaper path is a valid, NUL-terminated UTF-16
/// buffer owned by the worker for the duration of the call; the mutable
/// pointer is only read by the API; the `Result` conversion checks the
/// BOOL return before success is reported.
#[cfg(windows)]
#[expect(
    unsafe_code,
    reason = "Windows FFI to set the desktop wallpaper via SystemParametersInfoW"
)]
pub fn apply(path: &Path) -> Result<()> {
    use std::os::windows::ffi::OsStrExt;
    use std::sync::mpsc;
    use tracing::{debug, warn};
    use windows::Win32::UI::WindowsAndMessaging::{
        SPI_SETDESKWALLPAPER, SPIF_SENDCHANGE, SPIF_UPDATEINIFILE, SystemParametersInfoW,
    };

    let mut wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    debug!("Applying desktop wallpaper: {}", path.display());

    let (done_tx, done_rx) = mpsc::channel::<windows::core::Result<()>>();
    std::thread::spawn(move || {
        let result = unsafe {
            SystemParametersInfoW(
                SPI_SETDESKWALLPAPER,
                0,
                Some(wide.as_mut_ptr().cast::<std::ffi::c_void>()),
                SPIF_UPDATEINIFILE | SPIF_SENDCHANGE,
            )
        };
        // The receiver may have timed out and gone away
        let _ = done_tx.send(result);
    });

    match done_rx.recv_timeout(APPLY_TIMEOUT) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(CuratorError::Apply(Box::new(e))),
        Err(_) => {
            warn!(
                "Wallpaper apply did not complete within {:?}, abandoning worker",
                APPLY_TIMEOUT
            );
            Err(CuratorError::Apply(StringError::new(format!(
                "apply timed out after {APPLY_TIMEOUT:?}"
            ))))
        }
    }
}

/// Apply the image at `path` as the desktop background (non-Windows stub)
#[cfg(not(windows))]
pub fn apply(path: &Path) -> Result<()> {
    use crate::error::{CuratorError, StringError};

    tracing::debug!(
        "Ignoring wallpaper apply for {} on non-Windows platform",
        path.display()
    );
    Err(CuratorError::Apply(StringError::new(
        "desktop wallpaper control is only supported on Windows",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_screen_size_is_nonzero() {
        let (width, height) = primary_screen_size();
        assert!(width > 0);
        assert!(height > 0);
    }

    #[test]
    #[cfg(not(windows))]
    fn test_apply_stub_errors_without_panicking() {
        let result = apply(Path::new("/tmp/wallpaper.bmp"));
        assert!(matches!(result, Err(crate::CuratorError::Apply(_))));
    }
}
