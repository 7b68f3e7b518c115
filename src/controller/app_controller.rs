//! Application controller implementation
//!
//! This module implements the main application logic controller that
//! coordinates tray commands, rotation ticks, and wallpaper changes.

use crate::config::models::MIN_ROTATION_INTERVAL_MS;
use crate::config::{AppConfig, ConfigManager};
use crate::scheduler::{IntervalHandle, RotationEvent};
use crate::utils::autostart::AutoStartManager;
use crate::wallpaper::WallpaperChanger;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Commands sent from the tray menu to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayCommand {
    /// Change the wallpaper now, out of band of the timer
    NextWallpaper,
    /// Use a new wallpaper folder
    SetFolder(PathBuf),
    /// Use a new rotation interval
    SetInterval(Duration),
    /// Enable or disable auto-start on login
    SetAutoStart(bool),
    /// Persist configuration and terminate the application
    Exit,
}

/// Application logic controller
pub struct AppController {
    /// Application configuration, persisted on every settings change
    config: AppConfig,
    /// Performs the actual change cycles
    changer: WallpaperChanger,
    /// Handle into the running rotation timer
    interval: IntervalHandle,
    /// Command receiver from the tray menu
    command_receiver: mpsc::Receiver<TrayCommand>,
    /// Tick receiver from the rotation timer
    tick_receiver: mpsc::Receiver<RotationEvent>,
}

impl AppController {
    /// Create a new application controller
    pub fn new(
        config: AppConfig,
        changer: WallpaperChanger,
        interval: IntervalHandle,
        command_receiver: mpsc::Receiver<TrayCommand>,
        tick_receiver: mpsc::Receiver<RotationEvent>,
    ) -> Self {
        Self {
            config,
            changer,
            interval,
            command_receiver,
            tick_receiver,
        }
    }

    /// Start the controller event loop on a background thread
    pub fn start(mut self) -> JoinHandle<()> {
        std::thread::spawn(move || self.run())
    }

    /// Run the event loop until the command channel closes
    ///
    /// Commands are the primary channel with a 100ms receive timeout; ticks
    /// are drained non-blocking after each pass so a chatty menu cannot
    /// starve rotation and vice versa.
    fn run(&mut self) {
        use mpsc::{RecvTimeoutError, TryRecvError};

        info!("Entering controller event loop (tray commands + rotation ticks)");
        loop {
            match self.command_receiver.recv_timeout(Duration::from_millis(100)) {
                Ok(command) => {
                    self.handle_command(command);
                }
                Err(RecvTimeoutError::Timeout) => {
                    // Timeout is normal - just continue to check rotation ticks
                }
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("Command channel disconnected. Exiting event loop.");
                    break;
                }
            }

            loop {
                match self.tick_receiver.try_recv() {
                    Ok(RotationEvent::Tick) => {
                        self.rotate("timer tick");
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        warn!("Tick channel disconnected.");
                        // Manual triggers keep working without the timer
                        break;
                    }
                }
            }
        }

        info!("Controller event loop exited");
    }

    /// Handle a single tray command
    fn handle_command(&mut self, command: TrayCommand) {
        match command {
            TrayCommand::NextWallpaper => {
                self.rotate("manual trigger");
            }
            TrayCommand::SetFolder(folder) => {
                info!("Wallpaper folder set to {}", folder.display());
                self.config.wallpaper_folder = Some(folder);
                self.save_config();
            }
            TrayCommand::SetInterval(interval) => {
                let clamped =
                    interval.max(Duration::from_millis(MIN_ROTATION_INTERVAL_MS));
                if clamped != interval {
                    warn!(
                        "Requested interval {:?} below minimum, clamping to {:?}",
                        interval, clamped
                    );
                }
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "Intervals are far below u64::MAX milliseconds"
                )]
                let millis = clamped.as_millis() as u64;
                self.config.preferences.rotation_interval_ms = millis;
                self.interval.set_interval(clamped);
                self.save_config();
            }
            TrayCommand::SetAutoStart(enabled) => {
                match AutoStartManager::set_enabled(enabled) {
                    Ok(()) => {
                        info!("Auto-start {}", if enabled { "enabled" } else { "disabled" });
                        self.config.preferences.auto_start = enabled;
                        self.save_config();
                    }
                    Err(e) => {
                        error!("Failed to update auto-start setting: {}", e);
                    }
                }
            }
            TrayCommand::Exit => {
                info!("Exit requested from tray menu");
                self.save_config();
                self.interval.shutdown();
                info!("Desktop Curator shutting down");
                std::process::exit(0);
            }
        }
    }

    /// Run one wallpaper change cycle
    ///
    /// A missing folder, an empty candidate set, or any per-cycle failure is
    /// a skipped cycle, never a crash.
    fn rotate(&mut self, reason: &str) {
        let Some(folder) = self.config.wallpaper_folder.clone() else {
            debug!("No wallpaper folder configured, skipping rotation ({reason})");
            return;
        };

        match self.changer.change(&folder) {
            Ok(true) => {
                debug!("Rotation completed ({reason})");
            }
            Ok(false) => {
                debug!("Rotation coalesced into running cycle ({reason})");
            }
            Err(e) => {
                warn!("Rotation cycle skipped ({reason}): {e}");
            }
        }
    }

    /// Persist the configuration; a failed save never interrupts operation
    fn save_config(&self) {
        if let Err(e) = ConfigManager::save(&self.config) {
            error!("Failed to save configuration: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{RotationTimer, TICK_CHANNEL_CAPACITY};
    use crate::test_utils::{AppdataGuard, create_test_dir};

    struct Harness {
        controller: AppController,
        _command_sender: mpsc::SyncSender<TrayCommand>,
        _tick_sender: mpsc::SyncSender<RotationEvent>,
        interval: IntervalHandle,
    }

    fn make_controller(config: AppConfig, staging: PathBuf) -> Harness {
        let (command_tx, command_rx) = mpsc::sync_channel(32);
        let (tick_tx, tick_rx) = mpsc::sync_channel(TICK_CHANNEL_CAPACITY);
        // Timer is deliberately never started; only its handle is needed.
        // The handle stays valid after the timer itself is dropped.
        let (timer_tx, _) = mpsc::sync_channel(TICK_CHANNEL_CAPACITY);
        let timer = RotationTimer::new(Duration::from_secs(3600), timer_tx);
        let interval = timer.interval_handle();

        let controller = AppController::new(
            config,
            WallpaperChanger::with_staging_path(staging),
            interval.clone(),
            command_rx,
            tick_rx,
        );
        Harness {
            controller,
            _command_sender: command_tx,
            _tick_sender: tick_tx,
            interval,
        }
    }

    #[test]
    fn test_set_interval_clamps_to_minimum() {
        let temp_dir = create_test_dir();
        let _guard = AppdataGuard::new(&temp_dir);

        let staging = temp_dir.path().join("wallpaper.bmp");
        let mut harness = make_controller(AppConfig::default(), staging);

        harness
            .controller
            .handle_command(TrayCommand::SetInterval(Duration::from_millis(10)));

        assert_eq!(harness.interval.interval(), Duration::from_millis(1000));
        assert_eq!(
            harness.controller.config.preferences.rotation_interval_ms,
            1000
        );
    }

    #[test]
    fn test_set_interval_persists_config() {
        let temp_dir = create_test_dir();
        let _guard = AppdataGuard::new(&temp_dir);

        let staging = temp_dir.path().join("wallpaper.bmp");
        let mut harness = make_controller(AppConfig::default(), staging);

        harness
            .controller
            .handle_command(TrayCommand::SetInterval(Duration::from_secs(60)));

        let loaded = ConfigManager::load().unwrap();
        assert_eq!(loaded.preferences.rotation_interval_ms, 60_000);
    }

    #[test]
    fn test_set_folder_persists_config() {
        let temp_dir = create_test_dir();
        let _guard = AppdataGuard::new(&temp_dir);

        let staging = temp_dir.path().join("wallpaper.bmp");
        let folder = temp_dir.path().join("wallpapers");
        let mut harness = make_controller(AppConfig::default(), staging);

        harness
            .controller
            .handle_command(TrayCommand::SetFolder(folder.clone()));

        assert_eq!(harness.controller.config.wallpaper_folder, Some(folder.clone()));
        let loaded = ConfigManager::load().unwrap();
        assert_eq!(loaded.wallpaper_folder, Some(folder));
    }

    #[test]
    fn test_rotate_without_folder_is_noop() {
        let temp_dir = create_test_dir();
        let _guard = AppdataGuard::new(&temp_dir);

        let staging = temp_dir.path().join("wallpaper.bmp");
        let mut harness = make_controller(AppConfig::default(), staging.clone());

        harness.controller.rotate("test");
        assert!(!staging.exists());
    }

    #[test]
    fn test_rotate_with_empty_folder_skips_without_panic() {
        let temp_dir = create_test_dir();
        let _guard = AppdataGuard::new(&temp_dir);

        let folder = temp_dir.path().join("empty");
        std::fs::create_dir_all(&folder).unwrap();

        let mut config = AppConfig::default();
        config.wallpaper_folder = Some(folder);

        let staging = temp_dir.path().join("wallpaper.bmp");
        let mut harness = make_controller(config, staging.clone());

        harness.controller.rotate("test");
        assert!(!staging.exists());
    }

    #[test]
    fn test_event_loop_exits_when_command_channel_closes() {
        let temp_dir = create_test_dir();
        let _guard = AppdataGuard::new(&temp_dir);

        let (command_tx, command_rx) = mpsc::sync_channel(32);
        let (tick_tx, tick_rx) = mpsc::sync_channel(TICK_CHANNEL_CAPACITY);
        let timer = RotationTimer::new(Duration::from_secs(3600), tick_tx);
        let interval = timer.interval_handle();

        let controller = AppController::new(
            AppConfig::default(),
            WallpaperChanger::with_staging_path(temp_dir.path().join("wallpaper.bmp")),
            interval,
            command_rx,
            tick_rx,
        );

        let join = controller.start();
        drop(command_tx);
        join.join().unwrap();
    }
}
