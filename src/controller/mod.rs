//! Application logic controller module
//!
//! This module coordinates the rotation timer, tray commands, and wallpaper
//! change cycles.
//!
//! # Overview
//!
//! The application controller is the central coordinator that:
//! - **Receives tray commands** (manual rotation, settings changes, exit)
//! - **Receives rotation ticks** from the `RotationTimer`
//! - **Runs change cycles** through the `WallpaperChanger`
//! - **Persists configuration** whenever a setting changes
//!
//! # Event Flow
//!
//! ```text
//! RotationTimer → RotationEvent ┐
//!                               ├→ AppController → WallpaperChanger → desktop
//! Tray menu     → TrayCommand  ┘
//! ```
//!
//! # Failure model
//!
//! A failed change cycle (no candidates, undecodable image, staging write
//! failure, apply failure) is logged and skipped. Nothing is retried until
//! the next tick or manual trigger, which starts over with a fresh draw.

pub mod app_controller;

pub use app_controller::{AppController, TrayCommand};
