//! System tray integration
//!
//! This module implements the system tray icon and context menu:
//! manual rotation, wallpaper folder selection, rotation interval presets,
//! auto-start toggle, about, and exit. Menu events are mapped to
//! `TrayCommand`s and sent to the controller thread; the folder picker runs
//! modally on the UI thread.

use desktop_curator::controller::TrayCommand;
use desktop_curator::error::{CuratorError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::SyncSender;
use std::time::Duration;
use tracing::{debug, info, warn};
use tray_icon::menu::{CheckMenuItem, Menu, MenuEvent, MenuItem, PredefinedMenuItem, Submenu};
use tray_icon::{Icon, TrayIconBuilder};

/// Project page opened by the About menu item
const PROJECT_URL: &str = "https://github.com/desktop-curator/desktop-curator";

/// Interval presets offered in the tray menu, spanning the seconds /
/// minutes / hours / days units of the interval setting
const INTERVAL_PRESETS: [(&str, &str, Duration); 5] = [
    ("interval-30s", "30 seconds", Duration::from_secs(30)),
    ("interval-1m", "1 minute", Duration::from_secs(60)),
    ("interval-10m", "10 minutes", Duration::from_secs(600)),
    ("interval-1h", "1 hour", Duration::from_secs(3600)),
    ("interval-1d", "1 day", Duration::from_secs(86_400)),
];

/// Edge length of the generated tray icon
const ICON_SIZE: usize = 32;

/// System tray icon with context menu
///
/// Owns the tray icon handle; dropping it removes the icon, so the instance
/// must outlive the message loop.
pub struct WallpaperTray {
    /// The actual tray icon
    _tray: tray_icon::TrayIcon,
}

impl WallpaperTray {
    /// Create the tray icon, build the context menu, and install the menu
    /// event handler
    ///
    /// `autostart_enabled` seeds the check state of the "Start with Windows"
    /// item from the registry.
    pub fn new(
        command_sender: SyncSender<TrayCommand>,
        autostart_enabled: bool,
    ) -> Result<Self> {
        info!("Creating system tray icon");

        let menu = Menu::new();

        let next_item = MenuItem::with_id("next", "Next wallpaper", true, None);
        let folder_item =
            MenuItem::with_id("choose-folder", "Choose wallpaper folder…", true, None);

        let interval_menu = Submenu::new("Rotation interval", true);
        for (id, label, _) in INTERVAL_PRESETS {
            interval_menu
                .append(&MenuItem::with_id(id, label, true, None))
                .map_err(menu_error)?;
        }

        let autostart_item = CheckMenuItem::with_id(
            "autostart",
            "Start with Windows",
            true,
            autostart_enabled,
            None,
        );
        let about_item = MenuItem::with_id("about", "About Desktop Curator", true, None);
        let exit_item = MenuItem::with_id("exit", "Exit", true, None);

        menu.append(&next_item).map_err(menu_error)?;
        menu.append(&folder_item).map_err(menu_error)?;
        menu.append(&interval_menu).map_err(menu_error)?;
        menu.append(&PredefinedMenuItem::separator())
            .map_err(menu_error)?;
        menu.append(&autostart_item).map_err(menu_error)?;
        menu.append(&PredefinedMenuItem::separator())
            .map_err(menu_error)?;
        menu.append(&about_item).map_err(menu_error)?;
        menu.append(&exit_item).map_err(menu_error)?;

        let icon = create_tray_icon_image()?;

        let tray = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_icon(icon)
            .with_tooltip("Desktop Curator")
            .build()
            .map_err(|e| CuratorError::Config(Box::new(e)))?;

        // The handler must be Send + Sync, so the check item handle itself
        // cannot be captured; the check state is mirrored in an atomic that
        // flips in lockstep with the item's self-toggling on click
        let autostart_state = AtomicBool::new(autostart_enabled);
        MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
            handle_menu_event(&event, &command_sender, &autostart_state);
        }));

        info!("System tray icon created successfully");

        Ok(Self { _tray: tray })
    }
}

/// Map one menu event to a `TrayCommand`
fn handle_menu_event(
    event: &MenuEvent,
    sender: &SyncSender<TrayCommand>,
    autostart_state: &AtomicBool,
) {
    match event.id().0.as_str() {
        "next" => send(sender, TrayCommand::NextWallpaper),
        "choose-folder" => {
            // Modal; the message pump resumes when the picker closes
            if let Some(folder) = rfd::FileDialog::new()
                .set_title("Choose wallpaper folder")
                .pick_folder()
            {
                send(sender, TrayCommand::SetFolder(folder));
            } else {
                debug!("Folder selection cancelled");
            }
        }
        "autostart" => {
            // The check item toggles itself before the event arrives
            let enabled = !autostart_state.fetch_xor(true, Ordering::SeqCst);
            send(sender, TrayCommand::SetAutoStart(enabled));
        }
        "about" => {
            if let Err(e) = open::that_detached(PROJECT_URL) {
                warn!("Failed to open project page: {}", e);
            }
        }
        "exit" => send(sender, TrayCommand::Exit),
        other => {
            if let Some((_, _, duration)) =
                INTERVAL_PRESETS.iter().find(|(id, _, _)| *id == other)
            {
                send(sender, TrayCommand::SetInterval(*duration));
            } else {
                debug!("Unhandled menu id: {other}");
            }
        }
    }
}

/// Deliver a command to the controller, dropping it if the channel is full
fn send(sender: &SyncSender<TrayCommand>, command: TrayCommand) {
    if let Err(e) = sender.try_send(command) {
        warn!("Failed to deliver tray command: {}", e);
    }
}

/// Wrap a menu construction error
fn menu_error(e: tray_icon::menu::Error) -> CuratorError {
    CuratorError::Config(Box::new(e))
}

/// Generate the tray icon image
///
/// A 32x32 framed landscape (sky over ground) built in code, so no icon
/// asset needs to ship with the binary.
fn create_tray_icon_image() -> Result<Icon> {
    let mut rgba = vec![0u8; ICON_SIZE * ICON_SIZE * 4];

    for y in 0..ICON_SIZE {
        for x in 0..ICON_SIZE {
            let idx = (y * ICON_SIZE + x) * 4;

            let (r, g, b) = if x < 2 || x >= ICON_SIZE - 2 || y < 2 || y >= ICON_SIZE - 2 {
                (60, 60, 60) // Frame
            } else if y < ICON_SIZE * 2 / 3 {
                (90, 160, 220) // Sky
            } else {
                (70, 150, 90) // Ground
            };

            rgba[idx] = r;
            rgba[idx + 1] = g;
            rgba[idx + 2] = b;
            rgba[idx + 3] = 255;
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "ICON_SIZE is a small compile-time constant"
    )]
    let size = ICON_SIZE as u32;
    Icon::from_rgba(rgba, size, size).map_err(|e| CuratorError::Config(Box::new(e)))
}
