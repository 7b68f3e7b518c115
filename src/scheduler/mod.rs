//! Rotation scheduling module
//!
//! This module provides the periodic trigger for wallpaper rotation.
//!
//! # Overview
//!
//! - `RotationTimer`: background thread that emits a tick at the configured
//!   interval (default 30 seconds, user-configurable at runtime)
//! - `RotationEvent`: events sent to the application controller
//! - `IntervalHandle`: shared handle for updating the interval; updates wake
//!   the timer immediately and restart the wait with the new duration
//!
//! # Overlap protection
//!
//! Ticks travel over a bounded channel of capacity one. When a change cycle
//! is still draining the previous tick, the send fails and the tick is
//! dropped — overlapping rotation triggers coalesce instead of queueing up.
//! The changer's own in-flight guard covers manual triggers arriving through
//! the command channel.

pub mod rotation_timer;

pub use rotation_timer::{IntervalHandle, RotationEvent, RotationTimer, TICK_CHANNEL_CAPACITY};
