//! Desktop Curator - Random wallpaper rotation for Windows
//!
//! Tray-resident application that periodically picks a random image from a
//! configured folder, letterboxes it to the primary display, and applies it
//! as the desktop background.

// Set Windows subsystem to hide console window
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// GUI module is only in the binary, not the library
mod gui;

use anyhow::{Context, Result};
use desktop_curator::{config::ConfigManager, utils};
use tracing::{error, info};

/// Main entry point for the application
///
/// Performs initialization including logging, single-instance enforcement,
/// configuration load, and component startup, then hands the main thread to
/// the tray message loop.
fn main() -> Result<()> {
    utils::init_logging().context("Failed to initialize logging system")?;

    info!("Desktop Curator v{} starting...", env!("CARGO_PKG_VERSION"));

    // Enforce single instance - a second tray icon rotating the same
    // wallpaper would double every timer tick
    let _single_instance_guard = match utils::SingleInstanceGuard::new() {
        Ok(guard) => guard,
        Err(e) => {
            error!("Single instance check failed: {}", e);

            #[cfg(windows)]
            {
                show_error_and_exit(
                    "Another instance of Desktop Curator is already running.\n\n\
                     Please close the existing instance before starting a new one.\n\n\
                     Check the system tray for the Desktop Curator icon.",
                );
            }

            return Err(e.into());
        }
    };

    info!("Single instance check passed");

    let config = ConfigManager::load().context("Failed to load application configuration")?;
    info!(
        "Configuration loaded (folder: {}, interval: {}ms)",
        config
            .wallpaper_folder
            .as_ref()
            .map_or_else(|| "unset".to_string(), |f| f.display().to_string()),
        config.preferences.rotation_interval_ms
    );

    #[cfg(not(windows))]
    {
        let _ = config;
        eprintln!("Desktop Curator is a Windows-only application.");
        eprintln!("This application cannot run on macOS or other non-Windows platforms.");
        return Err(anyhow::anyhow!(
            "Desktop Curator is a Windows-only application"
        ));
    }

    #[cfg(windows)]
    {
        return run(config);
    }
}

/// Wire up the timer, controller, and tray, then run the message loop
#[cfg(windows)]
fn run(config: desktop_curator::config::AppConfig) -> Result<()> {
    use desktop_curator::controller::{AppController, TrayCommand};
    use desktop_curator::scheduler::{RotationTimer, TICK_CHANNEL_CAPACITY};
    use desktop_curator::utils::AutoStartManager;
    use desktop_curator::wallpaper::WallpaperChanger;
    use std::sync::mpsc;

    let channel_capacity = 32;
    let (command_tx, command_rx) = mpsc::sync_channel::<TrayCommand>(channel_capacity);
    let (tick_tx, tick_rx) = mpsc::sync_channel(TICK_CHANNEL_CAPACITY);

    info!(
        "Creating rotation timer with interval: {:?}",
        config.preferences.rotation_interval()
    );
    let timer = RotationTimer::new(config.preferences.rotation_interval(), tick_tx);
    let interval_handle = timer.interval_handle();

    info!("Creating application controller");
    let controller = AppController::new(
        config,
        WallpaperChanger::new(),
        interval_handle,
        command_rx,
        tick_rx,
    );

    info!("Starting rotation timer thread");
    let _timer_handle = timer.start();

    info!("Starting controller thread");
    let _controller_handle = controller.start();

    let autostart_enabled = AutoStartManager::is_enabled().unwrap_or_else(|e| {
        error!("Failed to query auto-start state: {}", e);
        false
    });

    let _tray = gui::WallpaperTray::new(command_tx, autostart_enabled)
        .context("Failed to create system tray icon")?;

    info!("Entering tray message loop");
    run_message_loop();

    info!("Desktop Curator shutting down");
    Ok(())
}

/// Pump Win32 messages so the tray icon and its menu stay responsive
///
/// # Safety
///
/// Sound FFI: `MSG` is default-initialized and only written by the API;
/// `GetMessageW` return codes are checked, with -1 (error) and 0 (WM_QUIT)
/// both terminating the loop.
#[cfg(windows)]
#[expect(
    unsafe_code,
    reason = "Win32 message pump required for tray icon event delivery"
)]
fn run_message_loop() {
    use windows::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, GetMessageW, MSG, TranslateMessage,
    };

    let mut msg = MSG::default();
    loop {
        let ret = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        match ret.0 {
            0 => break, // WM_QUIT
            -1 => {
                error!("GetMessageW failed, leaving message loop");
                break;
            }
            _ => unsafe {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            },
        }
    }
}

/// Shows an error dialog and exits the application
#[cfg(windows)]
fn show_error_and_exit(message: &str) {
    use rfd::MessageDialog;

    MessageDialog::new()
        .set_title("Desktop Curator - Error")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .set_level(rfd::MessageLevel::Error)
        .show();

    std::process::exit(1);
}
