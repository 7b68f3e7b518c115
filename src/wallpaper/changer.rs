//! Wallpaper change cycle coordination
//!
//! Runs one change cycle end to end: enumerate candidates, draw one, compose
//! it for the primary display, and hand the staged file to the desktop apply
//! capability. A cycle that is already running causes later requests to be
//! coalesced, so timer ticks and manual triggers can never overlap.

use crate::config::manager::ConfigManager;
use crate::desktop;
use crate::error::{CuratorError, Result};
use crate::wallpaper::compositor;
use crate::wallpaper::selector::{WallpaperSelector, collect_candidates};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// File name of the staged, composed wallpaper
const STAGING_FILE_NAME: &str = "wallpaper.bmp";

/// At-most-one-cycle-at-a-time guard
///
/// Cloning shares the underlying flag. `try_begin` wins at most once until
/// the returned guard is dropped; losers are told to skip, not to wait.
#[derive(Clone)]
pub struct SingleFlight {
    in_flight: Arc<AtomicBool>,
}

impl SingleFlight {
    /// Create a released guard
    pub fn new() -> Self {
        Self {
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Try to enter the guarded section; `None` means a cycle is running
    pub fn try_begin(&self) -> Option<SingleFlightGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| SingleFlightGuard {
                in_flight: Arc::clone(&self.in_flight),
            })
    }
}

impl Default for SingleFlight {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases the in-flight flag on drop, including on error paths
pub struct SingleFlightGuard {
    in_flight: Arc<AtomicBool>,
}

impl Drop for SingleFlightGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::SeqCst);
    }
}

/// Performs wallpaper change cycles
pub struct WallpaperChanger {
    /// Uniform random selector with its own generator
    selector: WallpaperSelector,
    /// Fixed staging path, overwritten every cycle
    staging_path: PathBuf,
    /// Overlap guard shared with any clone-holders
    single_flight: SingleFlight,
}

impl WallpaperChanger {
    /// Create a changer staging under %APPDATA%\DesktopCurator\temp
    pub fn new() -> Self {
        let staging_path = ConfigManager::app_data_dir()
            .join("temp")
            .join(STAGING_FILE_NAME);
        Self::with_staging_path(staging_path)
    }

    /// Create a changer with an explicit staging path
    pub fn with_staging_path(staging_path: PathBuf) -> Self {
        Self {
            selector: WallpaperSelector::new(),
            staging_path,
            single_flight: SingleFlight::new(),
        }
    }

    /// Enumerate, draw, decode, compose, and stage one wallpaper
    ///
    /// Nothing is written to disk unless a candidate was chosen. Returns the
    /// staging path for the apply step.
    pub fn select_and_prepare(
        &mut self,
        folder: &Path,
        screen_w: u32,
        screen_h: u32,
    ) -> Result<PathBuf> {
        let candidates = collect_candidates(folder);
        let chosen = self
            .selector
            .pick(&candidates)
            .ok_or_else(|| CuratorError::NoCandidates(folder.to_path_buf()))?
            .clone();

        info!(
            "Selected {} from {} candidates",
            chosen.display(),
            candidates.len()
        );

        compositor::compose_to_file(&chosen, screen_w, screen_h, &self.staging_path)
    }

    /// Run one full change cycle
    ///
    /// Returns `Ok(true)` if a wallpaper was applied and `Ok(false)` if the
    /// request was coalesced into a cycle that was already running. Errors
    /// mean the cycle did nothing; the caller logs and waits for the next
    /// trigger.
    pub fn change(&mut self, folder: &Path) -> Result<bool> {
        let Some(_guard) = self.single_flight.try_begin() else {
            debug!("Wallpaper change already in flight, skipping request");
            return Ok(false);
        };

        let (screen_w, screen_h) = desktop::primary_screen_size();
        let staged = self.select_and_prepare(folder, screen_w, screen_h)?;
        desktop::apply(&staged)?;

        info!("Wallpaper changed to {}", staged.display());
        Ok(true)
    }

    /// Shared handle to the overlap guard, for tests that simulate an
    /// in-flight cycle
    #[cfg(test)]
    pub(crate) fn single_flight_handle(&self) -> SingleFlight {
        self.single_flight.clone()
    }
}

impl Default for WallpaperChanger {
    fn default() -> Self {
        Self::new()
    }
}
